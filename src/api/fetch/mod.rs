// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Page fetch API endpoints
//!
//! Provides `/v1/fetch` and `/v1/fetch_multiple`.

pub mod handler;

pub use handler::{fetch_handler, fetch_multiple_handler};
