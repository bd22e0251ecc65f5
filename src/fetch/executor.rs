// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP transport for single page fetches
//!
//! Issues one GET per call, follows at most [`MAX_REDIRECTS`] redirects,
//! and reports the final URL alongside the requested one when they differ.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{redirect, Client};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::types::{FetchError, RawFetchResult};
use crate::config::FetchConfig;

/// Redirect hops allowed before a fetch fails
pub const MAX_REDIRECTS: usize = 10;

/// Source of raw page bodies
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch the full body of `url`
    async fn fetch(&self, url: &str) -> Result<RawFetchResult, FetchError>;
}

#[derive(Debug, thiserror::Error)]
#[error("stopped after {0} redirects")]
struct RedirectLimit(usize);

/// reqwest-backed [`Transport`]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
    timeout_secs: u64,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(redirect::Policy::custom(|attempt| {
                // previous() holds every URL requested so far, including the first
                if attempt.previous().len() > MAX_REDIRECTS {
                    attempt.error(RedirectLimit(MAX_REDIRECTS))
                } else {
                    attempt.follow()
                }
            }))
            .build()
            .map_err(FetchError::RequestBuild)?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_redirect() {
            FetchError::TooManyRedirects {
                max: MAX_REDIRECTS,
                source: err,
            }
        } else if err.is_timeout() {
            FetchError::Timeout {
                timeout_secs: self.timeout_secs,
                source: err,
            }
        } else if err.is_builder() {
            FetchError::RequestBuild(err)
        } else {
            FetchError::Transport(err)
        }
    }
}

/// Parse `raw` as an absolute http(s) URL
pub fn parse_target(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw.trim()).map_err(|source| FetchError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(FetchError::UnsupportedScheme {
            url: raw.to_string(),
            scheme: scheme.to_string(),
        }),
    }
}

#[async_trait]
impl Transport for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<RawFetchResult, FetchError> {
        let target = parse_target(url)?;

        let request = self
            .client
            .get(target.clone())
            .header(USER_AGENT, self.user_agent.as_str())
            .build()
            .map_err(FetchError::RequestBuild)?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| self.classify(e))?;

        let status_code = response.status().as_u16();
        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let content_length = response.content_length();

        let body = response.text().await.map_err(FetchError::BodyRead)?;

        debug!(
            url = %url,
            final_url = %final_url,
            status = status_code,
            content_length = ?content_length,
            bytes = body.len(),
            content_type = %content_type,
            "response received"
        );

        let original_url = (final_url != target).then(|| url.to_string());

        Ok(RawFetchResult {
            final_url: final_url.to_string(),
            original_url,
            status_code,
            body,
            content_type,
        })
    }
}
