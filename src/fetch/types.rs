// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for page fetching

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Request body for a single-URL fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchRequest {
    /// URL to fetch
    pub url: String,
    /// Maximum number of characters to return (0 = configured default)
    #[serde(default, alias = "maxLength")]
    pub max_length: i64,
    /// Start content from this character index
    #[serde(default, alias = "startIndex")]
    pub start_index: i64,
    /// Return the body without Markdown conversion
    #[serde(default)]
    pub raw: bool,
}

impl FetchRequest {
    /// Reject input that must never reach the network
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.url.trim().is_empty() {
            return Err(RequestError::EmptyUrl);
        }
        Ok(())
    }
}

/// Request body for a multi-URL fetch sharing one character budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchFetchRequest {
    /// URLs to fetch
    #[serde(default)]
    pub urls: Vec<String>,
    /// Total characters across all URLs combined (0 = configured default)
    #[serde(default, alias = "maxLength")]
    pub max_length: i64,
    /// Return bodies without Markdown conversion
    #[serde(default)]
    pub raw: bool,
}

impl BatchFetchRequest {
    /// Validate URL count and entries against the configured maximum
    pub fn validate(&self, max_urls: usize) -> Result<(), RequestError> {
        if self.urls.is_empty() {
            return Err(RequestError::NoUrls);
        }
        if self.urls.len() > max_urls {
            return Err(RequestError::TooManyUrls {
                count: self.urls.len(),
                max: max_urls,
            });
        }
        if self.urls.iter().any(|u| u.trim().is_empty()) {
            return Err(RequestError::EmptyUrl);
        }
        Ok(())
    }
}

/// Result of one HTTP GET, before any content processing
#[derive(Debug, Clone, PartialEq)]
pub struct RawFetchResult {
    /// URL of the last request in the redirect chain
    pub final_url: String,
    /// Requested URL, set only if a redirect occurred
    pub original_url: Option<String>,
    pub status_code: u16,
    pub body: String,
    pub content_type: String,
}

/// Display text derived from a [`RawFetchResult`], not yet trimmed
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedContent {
    pub text: String,
    pub content_type: String,
    pub status_code: u16,
    pub final_url: String,
    pub original_url: Option<String>,
}

/// Response for one fetched URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResponse {
    /// Final URL after redirects
    pub url: String,
    pub content_type: String,
    pub content: String,
    pub status_code: u16,
    /// Initial URL before any redirects; present only if a redirect occurred
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
}

/// Response for a multi-URL fetch
///
/// Both maps are keyed by the requested URL. Every requested URL lands in
/// exactly one of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchFetchResponse {
    /// Successful fetches
    pub responses: BTreeMap<String, FetchResponse>,
    /// Error messages for failed fetches
    pub errors: BTreeMap<String, String>,
}

impl BatchFetchResponse {
    /// Total characters returned across all responses
    pub fn total_chars(&self) -> usize {
        self.responses
            .values()
            .map(|r| r.content.chars().count())
            .sum()
    }
}

/// Coarse failure classes for a single fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    RequestConstruction,
    Transport,
    BodyRead,
    Internal,
}

/// Errors that terminate a single URL's fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to create request: invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to create request: unsupported scheme '{scheme}' in '{url}'")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("failed to create request: {0}")]
    RequestBuild(#[source] reqwest::Error),

    #[error("failed to execute request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to execute request: timed out after {timeout_secs}s")]
    Timeout {
        timeout_secs: u64,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to execute request: too many redirects (max {max})")]
    TooManyRedirects {
        max: usize,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read response body: {0}")]
    BodyRead(#[source] reqwest::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::InvalidUrl { .. } | Self::UnsupportedScheme { .. } | Self::RequestBuild(_) => {
                FetchErrorKind::RequestConstruction
            }
            Self::Transport(_) | Self::Timeout { .. } | Self::TooManyRedirects { .. } => {
                FetchErrorKind::Transport
            }
            Self::BodyRead(_) => FetchErrorKind::BodyRead,
            Self::Internal(_) => FetchErrorKind::Internal,
        }
    }
}

/// Errors raised by an [`Extractor`](super::extract::Extractor)
///
/// These never reach callers; the extraction pipeline absorbs them.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("empty document")]
    NoDocument,

    #[error("no readable content found")]
    NoContent,

    #[error("markdown conversion failed: {0}")]
    Markdown(#[source] std::io::Error),
}

/// Caller input rejected before any network activity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("URL is required")]
    EmptyUrl,

    #[error("at least one URL is required")]
    NoUrls,

    #[error("too many URLs: maximum allowed is {max}")]
    TooManyUrls { count: usize, max: usize },
}

/// Error returned by the validated single-URL entry point
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
