/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io;

use thiserror::Error;

use super::FtpReplyError;
use crate::control::{FtpCommand, FtpReply};

#[derive(Debug, Error)]
pub enum FtpCommandError {
    #[error("session is already closed")]
    SessionClosed,
    #[error("unable to send command: {0:?}")]
    SendFailed(io::Error),
    #[error("unable to recv reply: {0}")]
    RecvFailed(#[from] FtpReplyError),
    #[error("service not available")]
    ServiceNotAvailable,
    #[error("{0} syntax rejected by server: {1}")]
    RejectedCommandSyntax(FtpCommand, FtpReply),
    #[error("not logged in ({0} -> {1})")]
    NotLoggedIn(FtpCommand, FtpReply),
    #[error("file unavailable ({0} -> {1})")]
    FileUnavailable(FtpCommand, FtpReply),
    #[error("unexpected reply ({0} -> {1})")]
    UnexpectedReplyCode(FtpCommand, FtpReply),
    #[error("invalid reply syntax ({0} -> {1})")]
    InvalidReplySyntax(FtpCommand, FtpReply),
}

impl FtpCommandError {
    /// The server reply that produced this error, when one was read.
    /// Keeps the raw text reachable for diagnostic display.
    pub fn reply(&self) -> Option<&FtpReply> {
        match self {
            FtpCommandError::RejectedCommandSyntax(_, r)
            | FtpCommandError::NotLoggedIn(_, r)
            | FtpCommandError::FileUnavailable(_, r)
            | FtpCommandError::UnexpectedReplyCode(_, r)
            | FtpCommandError::InvalidReplySyntax(_, r) => Some(r),
            _ => None,
        }
    }
}
