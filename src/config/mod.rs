// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for page fetching
//!
//! Values are resolved in three layers: built-in defaults, an optional TOML
//! file with a `[fetch]` table, then `FETCH_*` environment variables.

pub mod server;

pub use server::ServerConfig;

use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for fetching and content budgeting
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    /// Per-request HTTP timeout in seconds (default: 10)
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Maximum URLs accepted in one batch (default: 20)
    pub max_urls: usize,
    /// Maximum concurrent fetches in one batch (default: 20)
    pub max_workers: usize,
    /// Character budget used when a caller passes none (default: 5000)
    pub default_max_length: usize,
}

/// `[fetch]` table of a config file; missing keys keep their defaults
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FetchSection {
    timeout: Option<u64>,
    user_agent: Option<String>,
    max_urls: Option<usize>,
    max_workers: Option<usize>,
    default_max_length: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    fetch: FetchSection,
}

impl FetchConfig {
    /// Load configuration from environment variables on top of defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|key| env::var(key).ok());
        config
    }

    /// Load configuration from a TOML file on top of defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_file(path.as_ref())?;
        Ok(config)
    }

    /// Defaults, then the optional file, then environment overrides; validated
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(path) = path {
            config.apply_file(path)?;
        }
        config.apply_env(|key| env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let section = file.fetch;
        if let Some(v) = section.timeout {
            self.timeout_secs = v;
        }
        if let Some(v) = section.user_agent {
            self.user_agent = v;
        }
        if let Some(v) = section.max_urls {
            self.max_urls = v;
        }
        if let Some(v) = section.max_workers {
            self.max_workers = v;
        }
        if let Some(v) = section.default_max_length {
            self.default_max_length = v;
        }
        Ok(())
    }

    /// Override fields from `lookup`; unparsable values are ignored
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("FETCH_TIMEOUT").and_then(|v| v.parse().ok()) {
            self.timeout_secs = v;
        }
        if let Some(v) = lookup("FETCH_USER_AGENT") {
            self.user_agent = v;
        }
        if let Some(v) = lookup("FETCH_MAX_URLS").and_then(|v| v.parse().ok()) {
            self.max_urls = v;
        }
        if let Some(v) = lookup("FETCH_MAX_WORKERS").and_then(|v| v.parse().ok()) {
            self.max_workers = v;
        }
        if let Some(v) = lookup("FETCH_DEFAULT_MAX_LENGTH").and_then(|v| v.parse().ok()) {
            self.default_max_length = v;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout must be at least 1 second".to_string()));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid("user_agent must not be empty".to_string()));
        }
        if self.max_urls == 0 {
            return Err(ConfigError::Invalid("max_urls must be at least 1".to_string()));
        }
        if self.max_workers == 0 {
            return Err(ConfigError::Invalid("max_workers must be at least 1".to_string()));
        }
        if self.default_max_length == 0 {
            return Err(ConfigError::Invalid(
                "default_max_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: format!("pagefetch/{}", crate::version::VERSION_NUMBER),
            max_urls: 20,
            max_workers: 20,
            default_max_length: 5000,
        }
    }
}
