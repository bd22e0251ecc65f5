// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use pagefetch::{
    api::start_server,
    config::{FetchConfig, ServerConfig},
    fetch::FetchService,
    version,
};
use std::{env, path::PathBuf};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("starting {}", version::get_version_string());

    let config_path = env::var("PAGEFETCH_CONFIG").ok().map(PathBuf::from);
    let config = FetchConfig::load(config_path.as_deref())?;
    let server = ServerConfig::from_env();

    let service = FetchService::new(config)?;
    start_server(server, service).await
}
