/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};

/// Host and port of an FTP endpoint. The host may be a domain name or an
/// IP literal; a port of 0 means "not set" and is for the caller to fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddr {
    host: String,
    port: u16,
}

#[derive(Debug, Error)]
#[error("invalid server address: {0}")]
pub struct ServerAddrParseError(&'static str);

impl ServerAddr {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        ServerAddr {
            host: host.into(),
            port,
        }
    }

    #[inline]
    pub fn host(&self) -> &str {
        self.host.as_str()
    }

    #[inline]
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn set_port(&mut self, port: u16) {
        self.port = port;
    }
}

impl fmt::Display for ServerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl From<SocketAddr> for ServerAddr {
    fn from(addr: SocketAddr) -> Self {
        ServerAddr {
            host: addr.ip().to_string(),
            port: addr.port(),
        }
    }
}

impl FromStr for ServerAddr {
    type Err = ServerAddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ServerAddrParseError("empty string"));
        }

        if let Some(v6) = s.strip_prefix('[') {
            // [host]:port
            let Some((host, tail)) = v6.split_once(']') else {
                return Err(ServerAddrParseError("unbalanced brackets"));
            };
            if host.is_empty() {
                return Err(ServerAddrParseError("empty host"));
            }
            let port = match tail.strip_prefix(':') {
                Some(p) => u16::from_str(p).map_err(|_| ServerAddrParseError("invalid port"))?,
                None if tail.is_empty() => 0,
                None => return Err(ServerAddrParseError("garbage after brackets")),
            };
            return Ok(ServerAddr::new(host, port));
        }

        match s.split_once(':') {
            Some((host, port)) if !port.contains(':') => {
                if host.is_empty() {
                    return Err(ServerAddrParseError("empty host"));
                }
                let port =
                    u16::from_str(port).map_err(|_| ServerAddrParseError("invalid port"))?;
                Ok(ServerAddr::new(host, port))
            }
            // more than one ':', treat as a bare IPv6 literal
            Some(_) => Ok(ServerAddr::new(s, 0)),
            None => Ok(ServerAddr::new(s, 0)),
        }
    }
}

/// Establishes the byte streams the client runs on. The control
/// connection lives as long as the session; a fresh data connection is
/// requested for every passive-mode transfer, targeting the address the
/// server advertised in its PASV reply.
#[async_trait]
pub trait FtpConnectionProvider<S: AsyncRead + AsyncWrite, E: Error, UD> {
    async fn new_control_connection(&mut self, server: &ServerAddr, user_data: &UD)
    -> Result<S, E>;

    async fn new_data_connection(&mut self, server: &ServerAddr, user_data: &UD) -> Result<S, E>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_host_only() {
        let addr = ServerAddr::from_str("ftp.example.net").unwrap();
        assert_eq!(addr.host(), "ftp.example.net");
        assert_eq!(addr.port(), 0);
    }

    #[test]
    fn parse_host_port() {
        let addr = ServerAddr::from_str("127.0.0.1:2121").unwrap();
        assert_eq!(addr.host(), "127.0.0.1");
        assert_eq!(addr.port(), 2121);
        assert_eq!(addr.to_string(), "127.0.0.1:2121");
    }

    #[test]
    fn parse_v6() {
        let addr = ServerAddr::from_str("[2001:db8::1]:21").unwrap();
        assert_eq!(addr.host(), "2001:db8::1");
        assert_eq!(addr.port(), 21);
        assert_eq!(addr.to_string(), "[2001:db8::1]:21");

        let addr = ServerAddr::from_str("2001:db8::1").unwrap();
        assert_eq!(addr.host(), "2001:db8::1");
        assert_eq!(addr.port(), 0);
    }

    #[test]
    fn parse_invalid() {
        assert!(ServerAddr::from_str("").is_err());
        assert!(ServerAddr::from_str(":21").is_err());
        assert!(ServerAddr::from_str("host:99999").is_err());
        assert!(ServerAddr::from_str("[::1").is_err());
        assert!(ServerAddr::from_str("[::1]x").is_err());
    }

    #[test]
    fn from_socket_addr() {
        let sa: SocketAddr = "127.0.0.1:51201".parse().unwrap();
        let addr = ServerAddr::from(sa);
        assert_eq!(addr.host(), "127.0.0.1");
        assert_eq!(addr.port(), 51201);
    }
}
