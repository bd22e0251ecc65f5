// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::config::FetchConfig;
use crate::fetch::{BatchFetchRequest, FetchRequest, FetchService};

/// Arguments for fetch command
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// URL to fetch
    pub url: String,

    /// Maximum number of characters to return (0 = configured default)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub max_length: i64,

    /// Start content from this character index
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub start_index: i64,

    /// Get raw content without markdown conversion
    #[arg(long)]
    pub raw: bool,
}

/// Arguments for fetch-multiple command
#[derive(Args, Debug)]
pub struct FetchMultipleArgs {
    /// URLs to fetch
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Maximum total characters across all URLs combined (0 = configured default)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub max_length: i64,

    /// Get raw content without markdown conversion
    #[arg(long)]
    pub raw: bool,
}

pub async fn fetch_one(args: FetchArgs, config: FetchConfig) -> Result<()> {
    let service = FetchService::new(config)?;
    let request = FetchRequest {
        url: args.url,
        max_length: args.max_length,
        start_index: args.start_index,
        raw: args.raw,
    };

    let response = service.execute_fetch(&request).await?;
    info!(url = %request.url, status = response.status_code, "fetch complete");
    print_json(&response)
}

pub async fn fetch_many(args: FetchMultipleArgs, config: FetchConfig) -> Result<()> {
    let service = FetchService::new(config)?;
    let request = BatchFetchRequest {
        urls: args.urls,
        max_length: args.max_length,
        raw: args.raw,
    };

    let response = service.execute_batch(&request).await?;
    print_json(&response)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
