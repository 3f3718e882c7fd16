/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io;
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::anyhow;
use clap::{Arg, ArgAction, Command, value_parser};
use clap_complete::Shell;

use rftp_client::{FtpClient, FtpClientConfig, ServerAddr};

mod connection;
mod logger;

mod cmd_del;
mod cmd_get;
mod cmd_list;
mod cmd_put;

const GLOBAL_ARG_COMPLETION: &str = "completion";
const GLOBAL_ARG_SERVER: &str = "server";
const GLOBAL_ARG_USERNAME: &str = "username";
const GLOBAL_ARG_PASSWORD: &str = "password";
const GLOBAL_ARG_SOURCE_IP: &str = "source-ip";
const GLOBAL_ARG_REMOTE_DIR: &str = "remote-dir";
const GLOBAL_ARG_LOCAL_DIR: &str = "local-dir";
const GLOBAL_ARG_VERBOSE: &str = "verbose";

fn build_cli_args() -> Command {
    Command::new("rftp")
        .arg(
            Arg::new(GLOBAL_ARG_COMPLETION)
                .num_args(1)
                .value_name("SHELL")
                .long("completion")
                .value_parser(value_parser!(Shell))
                .exclusive(true),
        )
        .arg(
            Arg::new(GLOBAL_ARG_SERVER)
                .help("FTP server address")
                .num_args(1)
                .value_name("SERVER ADDRESS")
                .required_unless_present(GLOBAL_ARG_COMPLETION),
        )
        .arg(
            Arg::new(GLOBAL_ARG_USERNAME)
                .help("FTP username")
                .num_args(1)
                .value_name("USERNAME")
                .short('u')
                .global(true),
        )
        .arg(
            Arg::new(GLOBAL_ARG_PASSWORD)
                .help("FTP password")
                .num_args(1)
                .value_name("PASSWORD")
                .short('p')
                .global(true),
        )
        .arg(
            Arg::new(GLOBAL_ARG_SOURCE_IP)
                .help("source ip address")
                .num_args(1)
                .value_name("IP ADDRESS")
                .value_parser(value_parser!(IpAddr))
                .long("source")
                .short('s')
                .global(true),
        )
        .arg(
            Arg::new(GLOBAL_ARG_REMOTE_DIR)
                .help("change to this remote directory after login")
                .num_args(1)
                .value_name("REMOTE DIR")
                .long("remote-dir")
                .short('C')
                .global(true),
        )
        .arg(
            Arg::new(GLOBAL_ARG_LOCAL_DIR)
                .help("local directory for file transfers")
                .num_args(1)
                .value_name("LOCAL DIR")
                .value_parser(value_parser!(PathBuf))
                .long("local-dir")
                .short('L')
                .global(true),
        )
        .arg(
            Arg::new(GLOBAL_ARG_VERBOSE)
                .help("show verbose message")
                .num_args(0)
                .action(ArgAction::Count)
                .short('v')
                .global(true),
        )
        .subcommand(cmd_list::command())
        .subcommand(cmd_get::command())
        .subcommand(cmd_put::command())
        .subcommand(cmd_del::command())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = build_cli_args().get_matches();

    if let Some(target) = args.get_one::<Shell>(GLOBAL_ARG_COMPLETION) {
        let mut app = build_cli_args();
        let bin_name = app.get_name().to_string();
        clap_complete::generate(*target, &mut app, bin_name, &mut io::stdout());
        return Ok(());
    }

    let verbose_level = args
        .get_one::<u8>(GLOBAL_ARG_VERBOSE)
        .copied()
        .unwrap_or_default();
    let logger = logger::SyncLogger::new(verbose_level);
    logger.into_global_logger().unwrap();

    let server = args.get_one::<String>(GLOBAL_ARG_SERVER).unwrap();
    let mut server = ServerAddr::from_str(server)?;
    if server.port() == 0 {
        server.set_port(21);
    }

    let username = args.get_one::<String>(GLOBAL_ARG_USERNAME);
    let password = args.get_one::<String>(GLOBAL_ARG_PASSWORD);

    // transfer arguments resolve against an absolute local directory
    let local_dir = match args.get_one::<PathBuf>(GLOBAL_ARG_LOCAL_DIR) {
        Some(dir) => std::path::absolute(dir)?,
        None => std::env::current_dir()?,
    };

    let mut conn_provider = connection::LocalConnectionProvider::default();
    if let Some(ip) = args.get_one::<IpAddr>(GLOBAL_ARG_SOURCE_IP) {
        conn_provider.set_bind_ip(*ip);
    }

    let config = Arc::new(FtpClientConfig::default());

    if let Some((subcommand, sub_args)) = args.subcommand() {
        let mut client = FtpClient::connect_to(server, conn_provider, &(), &config).await?;

        let login = client
            .login(username.map(|s| s.as_str()), password.map(|s| s.as_str()))
            .await?;
        log::info!("login: {}", login.final_reply());

        if let Some(dir) = args.get_one::<String>(GLOBAL_ARG_REMOTE_DIR) {
            let reply = client.change_remote_directory(dir).await?;
            log::info!("cwd: {reply}");
        }

        let ret = match subcommand {
            cmd_list::COMMAND => cmd_list::run(&mut client, sub_args).await,
            cmd_get::COMMAND => cmd_get::run(&mut client, sub_args, &local_dir).await,
            cmd_put::COMMAND => cmd_put::run(&mut client, sub_args, &local_dir).await,
            cmd_del::COMMAND => cmd_del::run(&mut client, sub_args).await,
            cmd => Err(anyhow!("invalid subcommand {cmd}")),
        };

        client.quit_and_close().await?;

        ret
    } else {
        Err(anyhow!("no subcommand found"))
    }
}
