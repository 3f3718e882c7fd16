/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

//! A minimal FTP client protocol library.
//!
//! The control channel and the per-transfer passive data channels are
//! driven over generic async byte streams, established through the
//! [`FtpConnectionProvider`] seam, so the transport (plain TCP, a proxied
//! stream, an in-memory pipe in tests) stays out of the protocol code.

mod debug;
pub use debug::{FTP_DEBUG_LOG_LEVEL, FTP_DEBUG_LOG_TARGET};

mod config;
pub use config::{FtpClientConfig, FtpControlConfig, FtpTransferConfig};

mod connection;
pub use connection::{FtpConnectionProvider, ServerAddr, ServerAddrParseError};

pub mod error;

mod io;

mod control;
pub use control::{FtpCommand, FtpReply};

mod transfer;
pub use transfer::FtpLineDataReceiver;

mod client;
pub use client::{FtpClient, FtpLoginReply, SessionState};
