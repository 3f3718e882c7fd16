/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

mod connect;
pub use connect::FtpConnectError;

mod response;
pub use response::FtpReplyError;

mod command;
pub use command::FtpCommandError;

mod transfer;
pub use transfer::{
    FtpFileListError, FtpFileRetrieveError, FtpFileStoreError, FtpLineDataReadError,
    FtpTransferSetupError,
};
