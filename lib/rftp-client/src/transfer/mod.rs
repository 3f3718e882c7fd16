/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

mod list;
pub use list::FtpLineDataReceiver;
pub(crate) use list::FtpLineDataTransfer;

mod stream;
pub(crate) use stream::{StreamCopyError, copy_stream};
