// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Parallel fetching of many URLs under a worker limit
//!
//! Each URL is fetched and extracted in its own task. Tasks write nothing
//! shared: every task's `JoinHandle` is the result slot for its index, and
//! slots are read only after all of them have been joined.

use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use super::executor::Transport;
use super::extract::ExtractionPipeline;
use super::types::{ExtractedContent, FetchError};

/// Outcome of fetching one URL
#[derive(Debug)]
pub struct UrlOutcome {
    /// URL as requested
    pub url: String,
    pub result: Result<ExtractedContent, FetchError>,
}

/// Fans fetch+extract work out across a bounded set of tasks
#[derive(Clone)]
pub struct Orchestrator {
    transport: Arc<dyn Transport>,
    pipeline: ExtractionPipeline,
    max_workers: usize,
}

impl Orchestrator {
    pub fn new(transport: Arc<dyn Transport>, pipeline: ExtractionPipeline, max_workers: usize) -> Self {
        Self {
            transport,
            pipeline,
            max_workers,
        }
    }

    /// Worker count for a batch of `url_count` URLs
    pub fn worker_count(&self, url_count: usize) -> usize {
        self.max_workers.min(url_count).max(1)
    }

    /// Fetch and extract every URL; returns one outcome per URL, in input order
    ///
    /// Individual failures are reported in their outcome and never abort
    /// sibling fetches. Returns only once every task has finished.
    pub async fn fetch_all(&self, urls: &[String], raw: bool) -> Vec<UrlOutcome> {
        let workers = self.worker_count(urls.len());
        let permits = Arc::new(Semaphore::new(workers));
        debug!(count = urls.len(), workers, raw, "dispatching fetches");

        let handles: Vec<_> = urls
            .iter()
            .cloned()
            .map(|url| {
                let permits = Arc::clone(&permits);
                let transport = Arc::clone(&self.transport);
                let pipeline = self.pipeline.clone();
                tokio::spawn(async move {
                    let _permit = permits
                        .acquire_owned()
                        .await
                        .map_err(|e| FetchError::Internal(e.to_string()))?;
                    debug!(url = %url, "initiating fetch for URL");
                    let fetched = transport.fetch(&url).await?;
                    Ok::<_, FetchError>(pipeline.extract_content(fetched, raw))
                })
            })
            .collect();

        let joined = join_all(handles).await;

        urls.iter()
            .zip(joined)
            .map(|(url, slot)| {
                let result = slot.unwrap_or_else(|join_err| {
                    warn!(url = %url, error = %join_err, "fetch task did not complete");
                    Err(FetchError::Internal(format!("fetch task failed: {join_err}")))
                });
                UrlOutcome {
                    url: url.clone(),
                    result,
                }
            })
            .collect()
    }
}
