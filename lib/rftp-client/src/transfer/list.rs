/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::config::FtpTransferConfig;
use crate::error::FtpLineDataReadError;
use crate::io::{LineRecvBuf, RecvLineError};

/// Consumer side of a directory listing transfer. Lines arrive with
/// their original line endings; the last one may lack a newline if the
/// server closed the data stream without sending one.
#[async_trait]
pub trait FtpLineDataReceiver {
    async fn recv_line(&mut self, line: &str);
    fn should_return_early(&self) -> bool;
}

pub(crate) struct FtpLineDataTransfer<S: AsyncRead + AsyncWrite> {
    io: S,
    line_buf: LineRecvBuf,
    max_lines: usize,
}

impl<S> FtpLineDataTransfer<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub(crate) fn new(io: S, config: &FtpTransferConfig) -> Self {
        FtpLineDataTransfer {
            io,
            line_buf: LineRecvBuf::new(config.list_max_line_len),
            max_lines: config.list_max_entries,
        }
    }

    /// Streams listing lines to `receiver` until the peer closes the
    /// data stream. Consumes the transfer, dropping (closing) the data
    /// stream in every exit path.
    pub(crate) async fn read_to_end<R>(mut self, receiver: &mut R) -> Result<(), FtpLineDataReadError>
    where
        R: FtpLineDataReceiver,
    {
        for i in 0..self.max_lines {
            let end = match self.line_buf.read_line(&mut self.io).await {
                Ok(line) => {
                    let s = std::str::from_utf8(line)
                        .map_err(|_| FtpLineDataReadError::UnsupportedEncoding)?;
                    receiver.recv_line(s).await;
                    false
                }
                Err(RecvLineError::IoClosed) => {
                    if self.line_buf.is_empty() {
                        return Ok(());
                    }
                    // unterminated tail, still part of the listing
                    let s = std::str::from_utf8(self.line_buf.remaining())
                        .map_err(|_| FtpLineDataReadError::UnsupportedEncoding)?;
                    receiver.recv_line(s).await;
                    true
                }
                Err(RecvLineError::IoError(e)) => return Err(FtpLineDataReadError::ReadFailed(e)),
                Err(RecvLineError::LineTooLong) => {
                    return Err(FtpLineDataReadError::LineTooLong(i + 1));
                }
            };
            if receiver.should_return_early() {
                return Err(FtpLineDataReadError::AbortedByCallback);
            }
            if end {
                return Ok(());
            }
            self.line_buf.consume_line();
        }
        Err(FtpLineDataReadError::TooManyLines)
    }
}
