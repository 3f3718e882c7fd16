/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::net::SocketAddr;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::config::FtpControlConfig;
use crate::error::{FtpCommandError, FtpReplyError};
use crate::io::{LineRecvBuf, RecvLineError};

mod response;
pub use response::FtpReply;

mod command;
pub use command::FtpCommand;

pub(crate) struct FtpControlChannel<S>
where
    S: AsyncRead + AsyncWrite,
{
    config: FtpControlConfig,
    stream: S,
    line_buf: LineRecvBuf,
}

impl<S> FtpControlChannel<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub(crate) fn new(stream: S, config: FtpControlConfig) -> Self {
        let line_buf = LineRecvBuf::new(config.max_line_len);
        FtpControlChannel {
            config,
            stream,
            line_buf,
        }
    }

    /// Reads and parses the next reply line. Replies split across reads
    /// or coalesced into one read are both handled by the line buffer.
    pub(crate) async fn read_reply(&mut self) -> Result<FtpReply, FtpReplyError> {
        let parsed = match self.line_buf.read_line(&mut self.stream).await {
            Ok(line) => {
                #[cfg(feature = "log-raw-io")]
                crate::debug::log_rsp(std::str::from_utf8(line).unwrap_or("<raw>").trim_end());

                if line.len() >= 5 && line[3] == b'-' {
                    // multi-line replies are not supported
                    Err(FtpReplyError::InvalidLineFormat)
                } else {
                    FtpReply::parse_single_line(line)
                }
            }
            Err(RecvLineError::IoError(e)) => return Err(FtpReplyError::ReadFailed(e)),
            Err(RecvLineError::IoClosed) => return Err(FtpReplyError::ConnectionClosed),
            Err(RecvLineError::LineTooLong) => return Err(FtpReplyError::LineTooLong),
        };
        self.line_buf.consume_line();
        parsed
    }

    async fn timed_read_reply(&mut self, stage: &'static str) -> Result<FtpReply, FtpReplyError> {
        match tokio::time::timeout(self.config.command_timeout, self.read_reply()).await {
            Ok(r) => r,
            Err(_) => Err(FtpReplyError::ReadReplyTimedOut(stage)),
        }
    }

    pub(crate) async fn wait_greetings(&mut self) -> Result<FtpReply, FtpCommandError> {
        loop {
            let reply = self.read_reply().await?;
            return match reply.code() {
                120 => continue,
                220 => Ok(reply),
                421 => Err(FtpCommandError::ServiceNotAvailable),
                _ => Err(FtpCommandError::UnexpectedReplyCode(
                    FtpCommand::GREETING,
                    reply,
                )),
            };
        }
    }

    /// USER exchange. The reply is surfaced as is: login acceptance is
    /// for the caller to judge from the code and text.
    pub(crate) async fn send_username(&mut self, name: &str) -> Result<FtpReply, FtpCommandError> {
        self.send_cmd1(FtpCommand::USER, name)
            .await
            .map_err(FtpCommandError::SendFailed)?;
        Ok(self.timed_read_reply("send username").await?)
    }

    pub(crate) async fn send_password(&mut self, pass: &str) -> Result<FtpReply, FtpCommandError> {
        self.send_cmd1(FtpCommand::PASS, pass)
            .await
            .map_err(FtpCommandError::SendFailed)?;
        Ok(self.timed_read_reply("send password").await?)
    }

    pub(crate) async fn send_quit(&mut self) -> Result<FtpReply, FtpCommandError> {
        self.send_cmd(FtpCommand::QUIT)
            .await
            .map_err(FtpCommandError::SendFailed)?;
        Ok(self.timed_read_reply("send quit").await?)
    }

    pub(crate) async fn change_directory(&mut self, path: &str) -> Result<FtpReply, FtpCommandError> {
        self.send_cmd1(FtpCommand::CWD, path)
            .await
            .map_err(FtpCommandError::SendFailed)?;
        Ok(self.timed_read_reply("change directory").await?)
    }

    pub(crate) async fn delete_file(&mut self, path: &str) -> Result<FtpReply, FtpCommandError> {
        self.send_cmd1(FtpCommand::DELE, path)
            .await
            .map_err(FtpCommandError::SendFailed)?;
        Ok(self.timed_read_reply("delete file").await?)
    }

    /// PASV exchange. A 227 reply that does not carry a well formed
    /// `(h1,h2,h3,h4,p1,p2)` tuple is a hard protocol error, no data
    /// connection may be attempted from it.
    pub(crate) async fn request_pasv_addr(
        &mut self,
    ) -> Result<(SocketAddr, FtpReply), FtpCommandError> {
        let cmd = FtpCommand::PASV;
        self.send_cmd(cmd)
            .await
            .map_err(FtpCommandError::SendFailed)?;

        let reply = self.timed_read_reply("request pasv addr").await?;
        match reply.code() {
            227 => match reply.parse_pasv_227_reply() {
                Some(addr) => Ok((addr, reply)),
                None => Err(FtpCommandError::InvalidReplySyntax(cmd, reply)),
            },
            500 | 501 => Err(FtpCommandError::RejectedCommandSyntax(cmd, reply)),
            530 => Err(FtpCommandError::NotLoggedIn(cmd, reply)),
            421 => Err(FtpCommandError::ServiceNotAvailable),
            _ => Err(FtpCommandError::UnexpectedReplyCode(cmd, reply)),
        }
    }

    /// Sends LIST/RETR/STOR and gates on the preliminary 1xx reply, so
    /// no data phase starts on a refused transfer.
    pub(crate) async fn start_transfer(
        &mut self,
        cmd: FtpCommand,
        path: Option<&str>,
    ) -> Result<FtpReply, FtpCommandError> {
        match path {
            Some(path) => self.send_cmd1(cmd, path).await,
            None => self.send_cmd(cmd).await,
        }
        .map_err(FtpCommandError::SendFailed)?;

        let reply = self.timed_read_reply("start transfer").await?;
        match reply.code() {
            125 | 150 => Ok(reply),
            500 | 501 => Err(FtpCommandError::RejectedCommandSyntax(cmd, reply)),
            530 => Err(FtpCommandError::NotLoggedIn(cmd, reply)),
            450 | 550 => Err(FtpCommandError::FileUnavailable(cmd, reply)),
            421 => Err(FtpCommandError::ServiceNotAvailable),
            _ => Err(FtpCommandError::UnexpectedReplyCode(cmd, reply)),
        }
    }

    pub(crate) async fn shutdown(&mut self) {
        let _ = self.stream.shutdown().await;
    }
}
