/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use crate::error::FtpReplyError;

/// A single-line control reply: the 3-digit status code and the text
/// after it, line ending trimmed.
#[derive(Debug, Clone)]
pub struct FtpReply {
    code: u16,
    line: String,
}

macro_rules! char_to_u16 {
    ($c:expr) => {
        ($c - b'0') as u16
    };
}

impl FtpReply {
    /// `line` is a full reply line including the trailing `\n`.
    pub(crate) fn parse_single_line(line: &[u8]) -> Result<Self, FtpReplyError> {
        // at least `<code><SP>\n`
        if line.len() < 5 || line[3] != b' ' {
            return Err(FtpReplyError::InvalidLineFormat);
        }
        if !line[0].is_ascii_digit() || !line[1].is_ascii_digit() || !line[2].is_ascii_digit() {
            return Err(FtpReplyError::InvalidLineFormat);
        }
        let code = char_to_u16!(line[0]) * 100 + char_to_u16!(line[1]) * 10 + char_to_u16!(line[2]);
        if !(100..600).contains(&code) {
            return Err(FtpReplyError::InvalidReplyCode(code));
        }
        let msg = std::str::from_utf8(&line[4..]).map_err(|_| FtpReplyError::LineIsNotUtf8)?;
        Ok(FtpReply {
            code,
            line: msg.trim_end().to_string(),
        })
    }

    #[inline]
    pub fn code(&self) -> u16 {
        self.code
    }

    #[inline]
    pub fn line(&self) -> &str {
        self.line.as_str()
    }

    pub(crate) fn parse_pasv_227_reply(&self) -> Option<SocketAddr> {
        let line = &self.line;

        if let Some(p_start) = memchr::memchr(b'(', line.as_bytes()) {
            if let Some(p_end) = memchr::memchr(b')', &line.as_bytes()[p_start..]) {
                let p_end = p_end + p_start;

                let a: Vec<&str> = line[p_start + 1..p_end].split(',').collect();
                if a.len() != 6 {
                    return None;
                }

                let h1 = u8::from_str(a[0]).ok()?;
                let h2 = u8::from_str(a[1]).ok()?;
                let h3 = u8::from_str(a[2]).ok()?;
                let h4 = u8::from_str(a[3]).ok()?;
                let p1 = u8::from_str(a[4]).ok()?;
                let p2 = u8::from_str(a[5]).ok()?;

                let ip = IpAddr::V4(Ipv4Addr::new(h1, h2, h3, h4));
                let port = ((p1 as u16) << 8) + (p2 as u16);
                return Some(SocketAddr::new(ip, port));
            }
        }

        None
    }
}

impl fmt::Display for FtpReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(code: u16, line: &str) -> FtpReply {
        FtpReply {
            code,
            line: line.to_string(),
        }
    }

    #[test]
    fn parse_single_line_ok() {
        let r = FtpReply::parse_single_line(b"220 Service ready\r\n").unwrap();
        assert_eq!(r.code(), 220);
        assert_eq!(r.line(), "Service ready");

        // bare LF line ending
        let r = FtpReply::parse_single_line(b"221 Bye\n").unwrap();
        assert_eq!(r.code(), 221);
        assert_eq!(r.line(), "Bye");

        // empty message text
        let r = FtpReply::parse_single_line(b"200  \r\n").unwrap();
        assert_eq!(r.code(), 200);
        assert_eq!(r.line(), "");
    }

    #[test]
    fn parse_single_line_err() {
        assert!(matches!(
            FtpReply::parse_single_line(b"2a0 text\r\n"),
            Err(FtpReplyError::InvalidLineFormat)
        ));
        assert!(matches!(
            FtpReply::parse_single_line(b"099 below range\r\n"),
            Err(FtpReplyError::InvalidReplyCode(99))
        ));
        assert!(matches!(
            FtpReply::parse_single_line(b"2200invalid\r\n"),
            Err(FtpReplyError::InvalidLineFormat)
        ));
        // shorter than <code><SP>\n
        assert!(matches!(
            FtpReply::parse_single_line(b"22\n"),
            Err(FtpReplyError::InvalidLineFormat)
        ));
    }

    #[test]
    fn parse_pasv_227_ok() {
        let r = reply(227, "Entering Passive Mode (127,0,0,1,200,1)");
        let addr = r.parse_pasv_227_reply().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:51201");

        let r = reply(227, "Entering Passive Mode (10,1,2,3,0,21)");
        let addr = r.parse_pasv_227_reply().unwrap();
        assert_eq!(addr.to_string(), "10.1.2.3:21");

        let r = reply(227, "Entering Passive Mode (255,255,255,255,255,255)");
        let addr = r.parse_pasv_227_reply().unwrap();
        assert_eq!(addr.to_string(), "255.255.255.255:65535");

        // some servers skip the standard phrase
        let r = reply(227, "=(192,168,1,10,4,7)");
        let addr = r.parse_pasv_227_reply().unwrap();
        assert_eq!(addr.to_string(), "192.168.1.10:1031");
    }

    #[test]
    fn parse_pasv_227_port_weight() {
        for (p1, p2, port) in [(0u8, 0u8, 0u16), (0, 255, 255), (1, 0, 256), (200, 1, 51201)] {
            let r = reply(227, &format!("Entering Passive Mode (127,0,0,1,{p1},{p2})"));
            let addr = r.parse_pasv_227_reply().unwrap();
            assert_eq!(addr.port(), port);
        }
    }

    #[test]
    fn parse_pasv_227_malformed() {
        // wrong field count
        let r = reply(227, "Entering Passive Mode (127,0,0,1,200)");
        assert!(r.parse_pasv_227_reply().is_none());
        let r = reply(227, "Entering Passive Mode (127,0,0,1,200,1,3)");
        assert!(r.parse_pasv_227_reply().is_none());
        // non numeric field
        let r = reply(227, "Entering Passive Mode (127,0,x,1,200,1)");
        assert!(r.parse_pasv_227_reply().is_none());
        // out of range byte
        let r = reply(227, "Entering Passive Mode (256,0,0,1,200,1)");
        assert!(r.parse_pasv_227_reply().is_none());
        let r = reply(227, "Entering Passive Mode (127,0,0,1,200,300)");
        assert!(r.parse_pasv_227_reply().is_none());
        // negative field
        let r = reply(227, "Entering Passive Mode (-1,0,0,1,200,1)");
        assert!(r.parse_pasv_227_reply().is_none());
        // missing parentheses
        let r = reply(227, "Entering Passive Mode 127,0,0,1,200,1");
        assert!(r.parse_pasv_227_reply().is_none());
        // empty tuple
        let r = reply(227, "Entering Passive Mode ()");
        assert!(r.parse_pasv_227_reply().is_none());
    }
}
