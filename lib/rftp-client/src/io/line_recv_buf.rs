/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

#[derive(Debug, Error)]
pub(crate) enum RecvLineError {
    #[error("io error: {0:?}")]
    IoError(#[from] io::Error),
    #[error("io closed")]
    IoClosed,
    #[error("line too long")]
    LineTooLong,
}

/// Accumulates raw bytes from a stream and hands them out one
/// LF-delimited line at a time. A line may arrive split across any
/// number of reads, and one read may carry any number of lines; neither
/// changes what the caller sees. Lines longer than the buffer capacity
/// are rejected.
pub(crate) struct LineRecvBuf {
    length: usize,
    line_start: usize,
    line_end: usize,
    buf: Box<[u8]>,
}

impl LineRecvBuf {
    pub(crate) fn new(max_line_len: usize) -> Self {
        LineRecvBuf {
            length: 0,
            line_start: 0,
            line_end: 0,
            buf: vec![0u8; max_line_len].into_boxed_slice(),
        }
    }

    /// Returns the next line including its trailing `\n`. Each returned
    /// line must be released with [`Self::consume_line`] before the next
    /// call.
    pub(crate) async fn read_line<R>(&mut self, reader: &mut R) -> Result<&[u8], RecvLineError>
    where
        R: AsyncRead + Unpin,
    {
        self.fill_until_line(reader).await?;
        Ok(&self.buf[self.line_start..self.line_end])
    }

    async fn fill_until_line<R>(&mut self, reader: &mut R) -> Result<(), RecvLineError>
    where
        R: AsyncRead + Unpin,
    {
        if self.get_line().is_some() {
            return Ok(());
        }
        loop {
            if self.length >= self.buf.len() {
                return Err(RecvLineError::LineTooLong);
            }
            let nr = reader.read(&mut self.buf[self.length..]).await?;
            if nr == 0 {
                return Err(RecvLineError::IoClosed);
            }
            self.length += nr;
            if self.get_line().is_some() {
                return Ok(());
            }
        }
    }

    fn get_line(&mut self) -> Option<()> {
        if self.line_end > self.line_start {
            return Some(());
        }
        if self.line_start >= self.length {
            return None;
        }
        match memchr::memchr(b'\n', &self.buf[self.line_start..self.length]) {
            Some(p) => {
                self.line_end = self.line_start + p + 1;
                Some(())
            }
            None => None,
        }
    }

    pub(crate) fn consume_line(&mut self) {
        self.line_start = self.line_end;
        if self.get_line().is_some() {
            return;
        }
        if self.line_start < self.length {
            self.buf.copy_within(self.line_start..self.length, 0);
            self.length -= self.line_start;
        } else {
            self.length = 0;
        }
        self.line_start = 0;
        self.line_end = 0;
    }

    /// Bytes buffered past the last consumed line. Non-empty after an
    /// `IoClosed` when the peer closed mid-line.
    pub(crate) fn remaining(&self) -> &[u8] {
        &self.buf[self.line_start..self.length]
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.line_start >= self.length
    }
}
