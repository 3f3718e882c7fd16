/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io;
use std::net::{IpAddr, SocketAddr};

use async_trait::async_trait;
use tokio::net::{TcpSocket, TcpStream};

use rftp_client::{FtpConnectionProvider, ServerAddr};

#[derive(Default)]
pub(crate) struct LocalConnectionProvider {
    bind_ip: Option<IpAddr>,
}

impl LocalConnectionProvider {
    pub(crate) fn set_bind_ip(&mut self, ip: IpAddr) {
        self.bind_ip = Some(ip);
    }

    async fn connect(&self, server: &ServerAddr) -> io::Result<TcpStream> {
        let mut err = io::Error::new(io::ErrorKind::AddrNotAvailable, "no addr resolved");
        for addr in tokio::net::lookup_host(server.to_string()).await? {
            match self.connect_once(addr).await {
                Ok(stream) => return Ok(stream),
                Err(e) => err = e,
            }
        }
        Err(err)
    }

    async fn connect_once(&self, addr: SocketAddr) -> io::Result<TcpStream> {
        match self.bind_ip {
            Some(ip) => {
                let socket = if addr.is_ipv4() {
                    TcpSocket::new_v4()?
                } else {
                    TcpSocket::new_v6()?
                };
                socket.bind(SocketAddr::new(ip, 0))?;
                socket.connect(addr).await
            }
            None => TcpStream::connect(addr).await,
        }
    }
}

#[async_trait]
impl FtpConnectionProvider<TcpStream, io::Error, ()> for LocalConnectionProvider {
    async fn new_control_connection(
        &mut self,
        server: &ServerAddr,
        _user_data: &(),
    ) -> io::Result<TcpStream> {
        self.connect(server).await
    }

    async fn new_data_connection(
        &mut self,
        server: &ServerAddr,
        _user_data: &(),
    ) -> io::Result<TcpStream> {
        self.connect(server).await
    }
}
