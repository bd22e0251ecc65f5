// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fetch API endpoint handlers

use axum::{extract::State, Json};
use tracing::{debug, error, info, warn};

use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::fetch::{BatchFetchRequest, BatchFetchResponse, FetchRequest, FetchResponse};

/// POST /v1/fetch - Fetch one URL as Markdown
///
/// # Request
/// - `url`: URL to fetch (required)
/// - `max_length`: Maximum characters to return (default from config)
/// - `start_index`: Start content from this character index
/// - `raw`: Return the body without Markdown conversion
///
/// # Errors
/// - 400 Bad Request: Missing or malformed URL
/// - 502 Bad Gateway: Connection or body read failure
/// - 504 Gateway Timeout: Upstream did not answer in time
pub async fn fetch_handler(
    State(state): State<AppState>,
    Json(request): Json<FetchRequest>,
) -> Result<Json<FetchResponse>, ApiError> {
    info!(
        url = %request.url,
        max_length = request.max_length,
        start_index = request.start_index,
        raw = request.raw,
        "executing fetch"
    );

    let response = state.service.execute_fetch(&request).await.map_err(|e| {
        error!(url = %request.url, error = %e, "failed to fetch URL");
        ApiError::from(e)
    })?;

    Ok(Json(response))
}

/// POST /v1/fetch_multiple - Fetch several URLs under one character budget
///
/// # Request
/// - `urls`: URLs to fetch (1 to `max_urls`)
/// - `max_length`: Total characters across all URLs combined (default from config)
/// - `raw`: Return bodies without Markdown conversion
///
/// # Response
/// - `responses`: Successful fetches keyed by requested URL
/// - `errors`: Error messages keyed by requested URL
///
/// Individual URL failures never fail the request.
pub async fn fetch_multiple_handler(
    State(state): State<AppState>,
    Json(request): Json<BatchFetchRequest>,
) -> Result<Json<BatchFetchResponse>, ApiError> {
    debug!(
        urls_count = request.urls.len(),
        max_length = request.max_length,
        raw = request.raw,
        "executing fetch_multiple"
    );

    let response = state.service.execute_batch(&request).await.map_err(|e| {
        warn!(error = %e, "fetch_multiple validation failed");
        ApiError::from(e)
    })?;

    Ok(Json(response))
}
