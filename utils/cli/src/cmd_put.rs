/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::path::Path;

use clap::{Arg, ArgMatches, Command};
use tokio::io::{AsyncRead, AsyncWrite, BufReader};

use rftp_client::{FtpClient, FtpConnectionProvider};

pub(super) const COMMAND: &str = "put";

const COMMAND_ARG_PATH: &str = "path";

pub(super) fn command() -> Command {
    Command::new(COMMAND).about("Upload file").arg(
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

    let local_path = if Path::new(path).is_absolute() {
        Path::new(path).to_path_buf()
    } else {
        local_dir.join(path)
    };

    let file = tokio::fs::File::open(&local_path).await?;
    let mut source = BufReader::new(file);

    let file_name = Path::new(path)
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("no file name in path {path}"))?
        .to_string_lossy()
        .to_string();
    let (copied, end_reply) = client.store_file(&file_name, &(), &mut source).await?;
    log::info!("store: {end_reply}");

    println!("{} bytes sent from {}", copied, local_path.display());
    Ok(())
}
