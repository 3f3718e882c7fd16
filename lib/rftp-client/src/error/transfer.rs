/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io;

use thiserror::Error;

use super::{FtpCommandError, FtpReplyError};

#[derive(Debug, Error)]
pub enum FtpLineDataReadError {
    #[error("read failed: {0:?}")]
    ReadFailed(io::Error),
    #[error("line {0} is too long")]
    LineTooLong(usize),
    #[error("too many lines")]
    TooManyLines,
    #[error("line data is not valid utf8")]
    UnsupportedEncoding,
    #[error("aborted by receiver callback")]
    AbortedByCallback,
}

/// Failure before any payload byte moved: the PASV exchange, the data
/// connection, or the transfer start command.
#[derive(Debug, Error)]
pub enum FtpTransferSetupError<E: std::error::Error> {
    #[error("command error: {0}")]
    CommandError(#[from] FtpCommandError),
    #[error("unable to connect data stream: {0:?}")]
    DataConnectFailed(E),
    #[error("timed out to connect data stream")]
    DataConnectTimedOut,
}

#[derive(Debug, Error)]
pub enum FtpFileListError<E: std::error::Error> {
    #[error("transfer setup failed: {0}")]
    SetupFailed(#[from] FtpTransferSetupError<E>),
    #[error("data read failed: {0}")]
    DataReadFailed(#[from] FtpLineDataReadError),
    #[error("timeout to wait all data")]
    TimeoutToWaitAllData,
    #[error("timeout to wait end reply")]
    TimeoutToWaitEndReply,
    #[error("end reply recv failed: {0}")]
    EndReplyRecvFailed(FtpReplyError),
}

impl<E: std::error::Error> From<FtpCommandError> for FtpFileListError<E> {
    fn from(e: FtpCommandError) -> Self {
        FtpFileListError::SetupFailed(FtpTransferSetupError::CommandError(e))
    }
}

#[derive(Debug, Error)]
pub enum FtpFileRetrieveError<E: std::error::Error> {
    #[error("transfer setup failed: {0}")]
    SetupFailed(#[from] FtpTransferSetupError<E>),
    #[error("data read failed: {0:?}")]
    DataReadFailed(io::Error),
    #[error("local write failed: {0:?}")]
    LocalWriteFailed(io::Error),
    #[error("timeout to wait end reply")]
    TimeoutToWaitEndReply,
    #[error("end reply recv failed: {0}")]
    EndReplyRecvFailed(FtpReplyError),
}

impl<E: std::error::Error> From<FtpCommandError> for FtpFileRetrieveError<E> {
    fn from(e: FtpCommandError) -> Self {
        FtpFileRetrieveError::SetupFailed(FtpTransferSetupError::CommandError(e))
    }
}

#[derive(Debug, Error)]
pub enum FtpFileStoreError<E: std::error::Error> {
    #[error("transfer setup failed: {0}")]
    SetupFailed(#[from] FtpTransferSetupError<E>),
    #[error("local read failed: {0:?}")]
    LocalReadFailed(io::Error),
    #[error("data write failed: {0:?}")]
    DataWriteFailed(io::Error),
    #[error("timeout to wait end reply")]
    TimeoutToWaitEndReply,
    #[error("end reply recv failed: {0}")]
    EndReplyRecvFailed(FtpReplyError),
}

impl<E: std::error::Error> From<FtpCommandError> for FtpFileStoreError<E> {
    fn from(e: FtpCommandError) -> Self {
        FtpFileStoreError::SetupFailed(FtpTransferSetupError::CommandError(e))
    }
}
