// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod fetch;
pub mod version;

pub use config::{ConfigError, FetchConfig, ServerConfig};
pub use fetch::{
    BatchFetchRequest, BatchFetchResponse, FetchError, FetchRequest, FetchResponse,
    FetchService, RequestError,
};
