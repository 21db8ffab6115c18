// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sonar: command-line front end for the search server's channels

mod color;
mod commands;
mod exit_error;
mod output;

use std::time::Duration;

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use sonar_client::{ClientConfig, ClientError};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::commands::{control, ingest, search, server};
use crate::exit_error::ExitError;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "sonar",
    version = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH")),
    about = "Client for a search server's channel protocol"
)]
#[command(styles = color::styles())]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Overrides applied on top of the config file and `SONAR_*` variables.
#[derive(Args)]
struct ConnectionArgs {
    /// Server host
    #[arg(long, global = true)]
    host: Option<String>,

    /// Server port
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Channel password
    #[arg(long, global = true)]
    password: Option<String>,

    /// Read and write timeout in milliseconds
    #[arg(long = "timeout-ms", global = true)]
    timeout_ms: Option<u64>,
}

impl ConnectionArgs {
    fn config(&self) -> Result<ClientConfig, ClientError> {
        let mut config = ClientConfig::load()?;
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(password) = &self.password {
            config.password = password.clone();
        }
        if let Some(ms) = self.timeout_ms {
            config = config.with_timeout(Duration::from_millis(ms));
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Index, unindex, count and flush (ingest channel)
    Ingest(ingest::IngestArgs),
    /// Query and suggest (search channel)
    Search(search::SearchArgs),
    /// Maintenance actions (control channel)
    Control(control::ControlArgs),
    /// Check that a channel answers PING
    Ping {
        /// Channel to open
        #[arg(long, value_enum, default_value_t)]
        mode: server::Mode,
    },
    /// Show the server's HELP text
    Manual {
        /// Manual to show, e.g. commands
        manual: Option<String>,
        /// Channel to open
        #[arg(long, value_enum, default_value_t)]
        mode: server::Mode,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("SONAR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };
    let config = cli.connection.config()?;
    info!(host = %config.host, port = config.port, "using server");

    let format = cli.output;
    match command {
        Commands::Ingest(args) => ingest::handle(args.command, &config, format),
        Commands::Search(args) => search::handle(args.command, &config, format),
        Commands::Control(args) => control::handle(args.command, &config, format),
        Commands::Ping { mode } => server::ping(&config, mode, format),
        Commands::Manual { manual, mode } => {
            server::manual(&config, mode, manual.as_deref(), format)
        }
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        let exit = ExitError::from_anyhow(err);
        eprintln!("sonar: {exit}");
        std::process::exit(exit.code);
    }
}
