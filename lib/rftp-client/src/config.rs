/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::time::Duration;

const MINIMAL_LINE_LEN: usize = 64;

/// Limits and deadlines for the control connection.
#[derive(Clone)]
pub struct FtpControlConfig {
    /// max accepted length for a single reply line, CRLF included
    pub max_line_len: usize,
    /// read deadline for each expected reply
    pub command_timeout: Duration,
}

impl Default for FtpControlConfig {
    fn default() -> Self {
        FtpControlConfig {
            max_line_len: 2048,
            command_timeout: Duration::from_secs(30),
        }
    }
}

impl FtpControlConfig {
    pub fn set_max_line_len(&mut self, len: usize) {
        self.max_line_len = len.max(MINIMAL_LINE_LEN);
    }
}

/// Limits and deadlines for passive data connections.
#[derive(Clone)]
pub struct FtpTransferConfig {
    /// chunk size for RETR / STOR data copy loops
    pub buffer_size: usize,
    pub list_max_line_len: usize,
    pub list_max_entries: usize,
    /// deadline for receiving a full directory listing
    pub list_all_timeout: Duration,
    /// deadline for the transfer completion reply after data EOF
    pub end_wait_timeout: Duration,
}

impl Default for FtpTransferConfig {
    fn default() -> Self {
        FtpTransferConfig {
            buffer_size: 2048,
            list_max_line_len: 2048,
            list_max_entries: 4096,
            list_all_timeout: Duration::from_secs(300),
            end_wait_timeout: Duration::from_secs(10),
        }
    }
}

impl FtpTransferConfig {
    pub fn set_buffer_size(&mut self, size: usize) {
        self.buffer_size = size.max(MINIMAL_LINE_LEN);
    }

    pub fn set_list_all_timeout(&mut self, timeout: Duration) {
        self.list_all_timeout = timeout;
    }
}

#[derive(Clone)]
pub struct FtpClientConfig {
    pub control: FtpControlConfig,
    pub transfer: FtpTransferConfig,
    pub connect_timeout: Duration,
    pub greeting_timeout: Duration,
}

impl Default for FtpClientConfig {
    fn default() -> Self {
        FtpClientConfig {
            control: FtpControlConfig::default(),
            transfer: FtpTransferConfig::default(),
            connect_timeout: Duration::from_secs(10),
            greeting_timeout: Duration::from_secs(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits() {
        let config = FtpClientConfig::default();
        assert_eq!(config.control.max_line_len, 2048);
        assert_eq!(config.transfer.buffer_size, 2048);
        assert!(config.connect_timeout > Duration::ZERO);
        assert!(config.greeting_timeout > Duration::ZERO);
    }

    #[test]
    fn clamped_setters() {
        let mut control = FtpControlConfig::default();
        control.set_max_line_len(1);
        assert_eq!(control.max_line_len, MINIMAL_LINE_LEN);

        let mut transfer = FtpTransferConfig::default();
        transfer.set_buffer_size(0);
        assert_eq!(transfer.buffer_size, MINIMAL_LINE_LEN);
    }
}
