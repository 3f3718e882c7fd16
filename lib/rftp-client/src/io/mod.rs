/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

mod line_recv_buf;
pub(crate) use line_recv_buf::{LineRecvBuf, RecvLineError};
