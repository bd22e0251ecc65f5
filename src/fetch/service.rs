// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Page fetch service
//!
//! Entry point for callers: single fetches with an explicit content window,
//! and batch fetches sharing one character budget.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

use super::allocator::allocate;
use super::executor::{HttpFetcher, Transport};
use super::extract::{ExtractionPipeline, Extractor};
use super::orchestrator::Orchestrator;
use super::readability::ReadabilityExtractor;
use super::types::{
    BatchFetchRequest, BatchFetchResponse, ExtractedContent, FetchError, FetchRequest,
    FetchResponse, RequestError, ServiceError,
};
use super::window::{char_len, select};
use crate::config::FetchConfig;

/// Fetches pages and shapes their content for callers
pub struct FetchService {
    config: FetchConfig,
    transport: Arc<dyn Transport>,
    pipeline: ExtractionPipeline,
    orchestrator: Orchestrator,
}

impl FetchService {
    /// Create a service using HTTP transport and the default extractor
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        info!(
            timeout = config.timeout_secs,
            user_agent = %config.user_agent,
            max_urls = config.max_urls,
            max_workers = config.max_workers,
            default_max_length = config.default_max_length,
            "creating fetch service"
        );
        let transport = Arc::new(HttpFetcher::new(&config)?);
        Ok(Self::with_components(
            config,
            transport,
            Arc::new(ReadabilityExtractor::new()),
        ))
    }

    /// Create a service from explicit collaborators
    pub fn with_components(
        config: FetchConfig,
        transport: Arc<dyn Transport>,
        extractor: Arc<dyn Extractor>,
    ) -> Self {
        let pipeline = ExtractionPipeline::new(extractor);
        let orchestrator =
            Orchestrator::new(Arc::clone(&transport), pipeline.clone(), config.max_workers);
        Self {
            config,
            transport,
            pipeline,
            orchestrator,
        }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetch one URL and return the requested window of its content
    ///
    /// `max_length <= 0` returns everything from `start_index` on.
    pub async fn fetch(
        &self,
        url: &str,
        max_length: i64,
        start_index: i64,
        raw: bool,
    ) -> Result<FetchResponse, FetchError> {
        debug!(url = %url, max_length, start_index, raw, "fetching URL");

        let fetched = self.transport.fetch(url).await?;
        let content = self.pipeline.extract_content(fetched, raw);

        let trimmed = select(&content.text, start_index, max_length);
        if trimmed.len() != content.text.len() {
            debug!(
                original_length = char_len(&content.text),
                start_index,
                trimmed_length = char_len(trimmed),
                "content trimmed"
            );
        }

        Ok(FetchResponse {
            url: content.final_url,
            content: trimmed.to_string(),
            content_type: content.content_type,
            status_code: content.status_code,
            original_url: content.original_url,
        })
    }

    /// Fetch many URLs in parallel and split `max_length` characters across them
    ///
    /// `max_length <= 0` uses the configured default budget. Never fails:
    /// URLs that could not be fetched are listed in `errors`.
    pub async fn fetch_multiple(&self, urls: &[String], max_length: i64, raw: bool) -> BatchFetchResponse {
        let budget = usize::try_from(max_length)
            .ok()
            .filter(|&n| n > 0)
            .unwrap_or(self.config.default_max_length);
        let urls = dedup_urls(urls);

        debug!(
            count = urls.len(),
            max_length = budget,
            raw,
            workers = self.orchestrator.worker_count(urls.len()),
            "fetching multiple URLs"
        );

        let outcomes = self.orchestrator.fetch_all(&urls, raw).await;

        let mut errors = BTreeMap::new();
        let mut contents = Vec::with_capacity(outcomes.len());
        let mut metadata: BTreeMap<String, ExtractedContent> = BTreeMap::new();
        for outcome in outcomes {
            match outcome.result {
                Ok(mut extracted) => {
                    let text = std::mem::take(&mut extracted.text);
                    contents.push((outcome.url.clone(), text));
                    metadata.insert(outcome.url, extracted);
                }
                Err(err) => {
                    errors.insert(outcome.url, err.to_string());
                }
            }
        }
        let num_successful = contents.len();

        let mut responses = BTreeMap::new();
        for record in allocate(contents, budget) {
            let Some(meta) = metadata.remove(&record.url) else {
                continue;
            };
            let response = FetchResponse {
                url: meta.final_url,
                content: record.content().to_string(),
                content_type: meta.content_type,
                status_code: meta.status_code,
                original_url: meta.original_url,
            };
            responses.insert(record.url, response);
        }

        let batch = BatchFetchResponse { responses, errors };
        info!(
            total_urls_requested = urls.len(),
            successful_fetches = num_successful,
            error_count = batch.errors.len(),
            final_total_content_length = batch.total_chars(),
            max_length_limit = budget,
            "completed fetching multiple URLs"
        );
        batch
    }

    /// Validate and run a single fetch, substituting the default length
    pub async fn execute_fetch(&self, request: &FetchRequest) -> Result<FetchResponse, ServiceError> {
        request.validate()?;
        let max_length = if request.max_length <= 0 {
            i64::try_from(self.config.default_max_length).unwrap_or(i64::MAX)
        } else {
            request.max_length
        };
        Ok(self
            .fetch(request.url.trim(), max_length, request.start_index, request.raw)
            .await?)
    }

    /// Validate and run a batch fetch
    pub async fn execute_batch(
        &self,
        request: &BatchFetchRequest,
    ) -> Result<BatchFetchResponse, RequestError> {
        request.validate(self.config.max_urls)?;
        Ok(self
            .fetch_multiple(&request.urls, request.max_length, request.raw)
            .await)
    }
}

/// Drop repeated URLs, keeping first occurrences in order
fn dedup_urls(urls: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(urls.len());
    urls.iter()
        .filter(|url| seen.insert(url.as_str()))
        .cloned()
        .collect()
}
