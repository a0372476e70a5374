//! # zosmf-cli
//!
//! Command-line interface for z/OS TSO address spaces over the z/OSMF REST
//! API.
//!
//! ## Usage
//!
//! ```bash
//! # Issue a command in a fresh address space and print its output
//! zosmf-cli tso issue --host mf.example.com --user ibmuser --password secret \
//!   --account ACCT# --command "STATUS"
//!
//! # Start an address space and keep it around
//! zosmf-cli tso start --host mf.example.com --account ACCT#
//!
//! # Ping and stop it by servlet key
//! zosmf-cli tso ping --host mf.example.com --servlet-key IBMUSER-123-aabcaaaf
//! zosmf-cli tso stop --host mf.example.com IBMUSER-123-aabcaaaf
//! ```

#![warn(rust_2018_idioms, unreachable_pub, clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub use cli::{Cli, Commands, Connection, OutputFormat};
pub use error::{CliError, CliResult};

/// Run the CLI application.
pub async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Tso(command) => commands::run_tso(command, cli.format).await,
    }
}
