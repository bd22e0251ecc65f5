// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::api::start_server;
use crate::config::{FetchConfig, ServerConfig};
use crate::fetch::FetchService;
use crate::version;

/// Arguments for serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Listen address (defaults to PAGEFETCH_HOST or 127.0.0.1)
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port (defaults to PAGEFETCH_PORT or 8080)
    #[arg(long)]
    pub port: Option<u16>,
}

pub async fn serve(args: ServeArgs, config: FetchConfig) -> Result<()> {
    let mut server = ServerConfig::from_env();
    if let Some(host) = args.host {
        server.host = host;
    }
    if let Some(port) = args.port {
        server.port = port;
    }

    info!("starting {}", version::get_version_string());
    let service = FetchService::new(config)?;
    start_server(server, service).await
}
