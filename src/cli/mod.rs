// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod fetch;
pub mod serve;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::FetchConfig;

/// pagefetch CLI
#[derive(Parser, Debug)]
#[command(name = "pagefetch-cli")]
#[command(version)]
#[command(about = "Fetch web pages as Markdown under a character budget", long_about = None)]
pub struct Cli {
    /// TOML config file with a [fetch] table (FETCH_* env vars override it)
    #[arg(long, global = true, env = "PAGEFETCH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a single URL
    Fetch(fetch::FetchArgs),

    /// Fetch several URLs sharing one character budget
    FetchMultiple(fetch::FetchMultipleArgs),

    /// Run the HTTP API server
    Serve(serve::ServeArgs),

    /// Print version information
    Version,
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let config = FetchConfig::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Fetch(args) => fetch::fetch_one(args, config).await,
        Commands::FetchMultiple(args) => fetch::fetch_many(args, config).await,
        Commands::Serve(args) => serve::serve(args, config).await,
        Commands::Version => {
            println!("{}", serde_json::to_string_pretty(&crate::version::get_version_info())?);
            Ok(())
        }
    }
}
