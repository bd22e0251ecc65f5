// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod fetch;
pub mod http_server;
pub mod tools;

pub use errors::{ApiError, ErrorResponse};
pub use fetch::{fetch_handler, fetch_multiple_handler};
pub use http_server::{create_app, start_server, AppState, HealthResponse};
pub use tools::{describe_tools, ToolDescriptor, ToolsResponse};
