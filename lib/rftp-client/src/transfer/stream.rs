/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

#[derive(Debug)]
pub(crate) enum StreamCopyError {
    ReadFailed(io::Error),
    WriteFailed(io::Error),
}

/// Chunked copy until the reader reports EOF. Only the bytes a read
/// actually returned are written out, the final chunk is usually short.
pub(crate) async fn copy_stream<R, W>(
    reader: &mut R,
    writer: &mut W,
    buffer_size: usize,
) -> Result<u64, StreamCopyError>
where
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut buf = vec![0u8; buffer_size];
    let mut copied: u64 = 0;
    loop {
        let nr = reader
            .read(&mut buf)
            .await
            .map_err(StreamCopyError::ReadFailed)?;
        if nr == 0 {
            return Ok(copied);
        }
        writer
            .write_all(&buf[..nr])
            .await
            .map_err(StreamCopyError::WriteFailed)?;
        copied += nr as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn copy_not_a_buffer_multiple() {
        // 5000 bytes with a 2048 byte buffer: two full chunks plus a
        // 904 byte remainder
        let payload: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
        let mut reader = payload.as_slice();
        let mut sink: Vec<u8> = Vec::new();
        let copied = copy_stream(&mut reader, &mut sink, 2048).await.unwrap();
        assert_eq!(copied, 5000);
        assert_eq!(sink, payload);
    }

    #[tokio::test]
    async fn copy_empty() {
        let mut reader: &[u8] = b"";
        let mut sink: Vec<u8> = Vec::new();
        let copied = copy_stream(&mut reader, &mut sink, 2048).await.unwrap();
        assert_eq!(copied, 0);
        assert!(sink.is_empty());
    }
}
