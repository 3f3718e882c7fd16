/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::marker::PhantomData;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::config::FtpClientConfig;
use crate::connection::{FtpConnectionProvider, ServerAddr};
use crate::control::{FtpCommand, FtpControlChannel, FtpReply};
use crate::error::{
    FtpCommandError, FtpConnectError, FtpFileListError, FtpFileRetrieveError, FtpFileStoreError,
    FtpTransferSetupError,
};
use crate::log_msg;
use crate::transfer::{FtpLineDataReceiver, FtpLineDataTransfer, StreamCopyError, copy_stream};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connected,
    Closed,
}

/// Replies collected during login. Acceptance is not adjudicated here,
/// the caller branches on the surfaced codes and text.
#[derive(Debug)]
pub struct FtpLoginReply {
    pub user: FtpReply,
    pub pass: Option<FtpReply>,
}

impl FtpLoginReply {
    /// The last reply of the exchange, the one that tells how the
    /// server left things.
    pub fn final_reply(&self) -> &FtpReply {
        self.pass.as_ref().unwrap_or(&self.user)
    }
}

/// One FTP session: a control connection for its whole lifetime, plus
/// one passive data connection per transfer, owned by that operation
/// and never kept across it.
pub struct FtpClient<CP, S, E, UD>
where
    CP: FtpConnectionProvider<S, E, UD>,
    S: AsyncRead + AsyncWrite,
    E: std::error::Error,
{
    conn_provider: CP,
    control: FtpControlChannel<S>,
    server: ServerAddr,
    config: Arc<FtpClientConfig>,
    greeting: FtpReply,
    state: SessionState,
    _phantom: PhantomData<(E, UD)>,
}

impl<CP, S, E, UD> FtpClient<CP, S, E, UD>
where
    CP: FtpConnectionProvider<S, E, UD>,
    S: AsyncRead + AsyncWrite + Unpin,
    E: std::error::Error,
{
    /// Connects the control stream and waits out the server greeting.
    /// The session is born connected; there is no open() to call twice.
    pub async fn connect_to(
        server: ServerAddr,
        mut conn_provider: CP,
        user_data: &UD,
        config: &Arc<FtpClientConfig>,
    ) -> Result<Self, FtpConnectError<E>> {
        let stream = match tokio::time::timeout(
            config.connect_timeout,
            conn_provider.new_control_connection(&server, user_data),
        )
        .await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(FtpConnectError::ConnectIoError(e)),
            Err(_) => return Err(FtpConnectError::ConnectTimedOut),
        };

        let mut control = FtpControlChannel::new(stream, config.control.clone());
        let greeting =
            match tokio::time::timeout(config.greeting_timeout, control.wait_greetings()).await {
                Ok(Ok(reply)) => reply,
                Ok(Err(FtpCommandError::ServiceNotAvailable)) => {
                    return Err(FtpConnectError::ServiceNotAvailable);
                }
                Ok(Err(e)) => return Err(FtpConnectError::GreetingFailed(e)),
                Err(_) => return Err(FtpConnectError::GreetingTimedOut),
            };
        log_msg!("connected to {}, greeting: {}", server, greeting);

        Ok(FtpClient {
            conn_provider,
            control,
            server,
            config: Arc::clone(config),
            greeting,
            state: SessionState::Connected,
            _phantom: PhantomData,
        })
    }

    #[inline]
    pub fn greeting(&self) -> &FtpReply {
        &self.greeting
    }

    #[inline]
    pub fn server(&self) -> &ServerAddr {
        &self.server
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    fn check_connected(&self) -> Result<(), FtpCommandError> {
        match self.state {
            SessionState::Connected => Ok(()),
            SessionState::Closed => Err(FtpCommandError::SessionClosed),
        }
    }

    /// USER/PASS exchange. PASS is sent only when the USER reply asks
    /// for more (331/332). Both replies are surfaced verbatim.
    pub async fn login(
        &mut self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<FtpLoginReply, FtpCommandError> {
        self.check_connected()?;
        let user = self
            .control
            .send_username(username.unwrap_or("anonymous"))
            .await?;
        let pass = match user.code() {
            331 | 332 => Some(
                self.control
                    .send_password(password.unwrap_or("xxx"))
                    .await?,
            ),
            _ => None,
        };
        Ok(FtpLoginReply { user, pass })
    }

    pub async fn change_remote_directory(
        &mut self,
        path: &str,
    ) -> Result<FtpReply, FtpCommandError> {
        self.check_connected()?;
        self.control.change_directory(path).await
    }

    pub async fn delete_file(&mut self, path: &str) -> Result<FtpReply, FtpCommandError> {
        self.check_connected()?;
        self.control.delete_file(path).await
    }

    /// PASV then data dial. The advertised address is handed to the
    /// connection provider as is.
    async fn setup_data_stream(&mut self, user_data: &UD) -> Result<S, FtpTransferSetupError<E>> {
        let (addr, _reply) = self.control.request_pasv_addr().await?;
        log_msg!("passive data channel at {}", addr);
        let data_addr = ServerAddr::from(addr);
        match tokio::time::timeout(
            self.config.connect_timeout,
            self.conn_provider.new_data_connection(&data_addr, user_data),
        )
        .await
        {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) => Err(FtpTransferSetupError::DataConnectFailed(e)),
            Err(_) => Err(FtpTransferSetupError::DataConnectTimedOut),
        }
    }

    /// LIST over a fresh passive connection. Returns the transfer end
    /// reply once the listing is fully delivered to `receiver`.
    pub async fn list_directory<R>(
        &mut self,
        path: Option<&str>,
        user_data: &UD,
        receiver: &mut R,
    ) -> Result<FtpReply, FtpFileListError<E>>
    where
        R: FtpLineDataReceiver,
    {
        self.check_connected()?;
        let mut data = self.setup_data_stream(user_data).await?;

        if let Err(e) = self.control.start_transfer(FtpCommand::LIST, path).await {
            let _ = data.shutdown().await;
            return Err(e.into());
        }

        let transfer = FtpLineDataTransfer::new(data, &self.config.transfer);
        match tokio::time::timeout(
            self.config.transfer.list_all_timeout,
            transfer.read_to_end(receiver),
        )
        .await
        {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(FtpFileListError::DataReadFailed(e)),
            Err(_) => return Err(FtpFileListError::TimeoutToWaitAllData),
        }

        match tokio::time::timeout(
            self.config.transfer.end_wait_timeout,
            self.control.read_reply(),
        )
        .await
        {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(e)) => Err(FtpFileListError::EndReplyRecvFailed(e)),
            Err(_) => Err(FtpFileListError::TimeoutToWaitEndReply),
        }
    }

    /// RETR into the caller's sink. Returns the byte count received and
    /// the transfer end reply. Only the bytes each read returned are
    /// written, a short final chunk stays short.
    pub async fn retrieve_file<W>(
        &mut self,
        path: &str,
        user_data: &UD,
        sink: &mut W,
    ) -> Result<(u64, FtpReply), FtpFileRetrieveError<E>>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        self.check_connected()?;
        let mut data = self.setup_data_stream(user_data).await?;

        if let Err(e) = self.control.start_transfer(FtpCommand::RETR, Some(path)).await {
            let _ = data.shutdown().await;
            return Err(e.into());
        }

        let copied = match copy_stream(&mut data, sink, self.config.transfer.buffer_size).await {
            Ok(n) => n,
            Err(StreamCopyError::ReadFailed(e)) => {
                let _ = data.shutdown().await;
                return Err(FtpFileRetrieveError::DataReadFailed(e));
            }
            Err(StreamCopyError::WriteFailed(e)) => {
                let _ = data.shutdown().await;
                return Err(FtpFileRetrieveError::LocalWriteFailed(e));
            }
        };
        let _ = data.shutdown().await;
        drop(data);
        log_msg!("{} data bytes received", copied);

        match tokio::time::timeout(
            self.config.transfer.end_wait_timeout,
            self.control.read_reply(),
        )
        .await
        {
            Ok(Ok(reply)) => Ok((copied, reply)),
            Ok(Err(e)) => Err(FtpFileRetrieveError::EndReplyRecvFailed(e)),
            Err(_) => Err(FtpFileRetrieveError::TimeoutToWaitEndReply),
        }
    }

    /// STOR from the caller's source. The data stream is shut down once
    /// the source is exhausted so the server sees EOF, then the end
    /// reply is read. Only the bytes each read returned are sent.
    pub async fn store_file<R>(
        &mut self,
        path: &str,
        user_data: &UD,
        source: &mut R,
    ) -> Result<(u64, FtpReply), FtpFileStoreError<E>>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        self.check_connected()?;
        let mut data = self.setup_data_stream(user_data).await?;

        if let Err(e) = self.control.start_transfer(FtpCommand::STOR, Some(path)).await {
            let _ = data.shutdown().await;
            return Err(e.into());
        }

        let copied = match copy_stream(source, &mut data, self.config.transfer.buffer_size).await {
            Ok(n) => n,
            Err(StreamCopyError::ReadFailed(e)) => {
                let _ = data.shutdown().await;
                return Err(FtpFileStoreError::LocalReadFailed(e));
            }
            Err(StreamCopyError::WriteFailed(e)) => {
                let _ = data.shutdown().await;
                return Err(FtpFileStoreError::DataWriteFailed(e));
            }
        };
        if let Err(e) = data.shutdown().await {
            return Err(FtpFileStoreError::DataWriteFailed(e));
        }
        drop(data);
        log_msg!("{} data bytes sent", copied);

        match tokio::time::timeout(
            self.config.transfer.end_wait_timeout,
            self.control.read_reply(),
        )
        .await
        {
            Ok(Ok(reply)) => Ok((copied, reply)),
            Ok(Err(e)) => Err(FtpFileStoreError::EndReplyRecvFailed(e)),
            Err(_) => Err(FtpFileStoreError::TimeoutToWaitEndReply),
        }
    }

    /// QUIT, then control stream teardown. Idempotent: the second and
    /// later calls are no-ops returning `None`.
    pub async fn quit_and_close(&mut self) -> Result<Option<FtpReply>, FtpCommandError> {
        if self.state == SessionState::Closed {
            return Ok(None);
        }
        self.state = SessionState::Closed;
        let quit = self.control.send_quit().await;
        self.control.shutdown().await;
        quit.map(Some)
    }
}
