/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::path::Path;

use clap::{Arg, ArgMatches, Command};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufWriter};

use rftp_client::{FtpClient, FtpConnectionProvider};

pub(super) const COMMAND: &str = "get";

const COMMAND_ARG_PATH: &str = "path";

pub(super) fn command() -> Command {
    Command::new(COMMAND).about("Download file").arg(
        Arg::new(COMMAND_ARG_PATH)
            .value_name("FILE PATH")
            .num_args(1)
            .required(true),
    )
}

pub(super) async fn run<CP, S, E>(
    client: &mut FtpClient<CP, S, E, ()>,
    args: &ArgMatches,
    local_dir: &Path,
) -> anyhow::Result<()>
where
    CP: FtpConnectionProvider<S, E, ()>,
    S: AsyncRead + AsyncWrite + Unpin,
    E: std::error::Error + Send + Sync + 'static,
{
    let path = args.get_one::<String>(COMMAND_ARG_PATH).unwrap();

    let file_name = Path::new(path)
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("no file name in path {path}"))?;
    let local_path = local_dir.join(file_name);

    let file = tokio::fs::File::create(&local_path).await?;
    let mut sink = BufWriter::new(file);
    let (copied, end_reply) = client.retrieve_file(path, &(), &mut sink).await?;
    sink.flush().await?;
    log::info!("retrieve: {end_reply}");

    println!("{} bytes saved to {}", copied, local_path.display());
    Ok(())
}
