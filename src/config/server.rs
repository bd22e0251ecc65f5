// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP listener configuration

use std::env;
use std::net::SocketAddr;

use super::ConfigError;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Load from `PAGEFETCH_HOST` / `PAGEFETCH_PORT`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("PAGEFETCH_HOST").unwrap_or(defaults.host),
            port: env::var("PAGEFETCH_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("bad listen address: {e}")))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}
