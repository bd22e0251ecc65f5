// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::fetch::{fetch_handler, fetch_multiple_handler};
use super::tools::{describe_tools, ToolsResponse};
use crate::config::ServerConfig;
use crate::fetch::FetchService;
use crate::version;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FetchService>,
}

impl AppState {
    pub fn new(service: FetchService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Operation catalogue
        .route("/v1/tools", get(tools_handler))
        // Fetch endpoints
        .route("/v1/fetch", post(fetch_handler))
        .route("/v1/fetch_multiple", post(fetch_multiple_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn start_server(config: ServerConfig, service: FetchService) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let app = create_app(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("server shutting down");
        })
        .await?;

    Ok(())
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: version::VERSION_NUMBER.to_string(),
    })
}

async fn tools_handler(State(state): State<AppState>) -> Json<ToolsResponse> {
    Json(describe_tools(state.service.config()))
}
