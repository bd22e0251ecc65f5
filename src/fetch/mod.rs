// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Page fetching and content budgeting
//!
//! ## Architecture
//!
//! ```text
//! URLs → Orchestrator ─┬─ HttpFetcher → ExtractionPipeline ─┐
//!                      ├─ HttpFetcher → ExtractionPipeline ─┤→ allocate() → BatchFetchResponse
//!                      └─ ...                               ─┘
//! ```
//!
//! Single fetches skip allocation and apply a caller-supplied window with
//! [`window::select`].
//!
//! ## Usage
//!
//! ```ignore
//! let service = FetchService::new(FetchConfig::from_env())?;
//!
//! let page = service.fetch("https://example.com", 2000, 0, false).await?;
//!
//! let urls = vec!["https://example.com".to_string(), "https://example.org".to_string()];
//! let batch = service.fetch_multiple(&urls, 8000, false).await;
//! ```

pub mod allocator;
pub mod executor;
pub mod extract;
pub mod orchestrator;
pub mod readability;
pub mod service;
pub mod types;
pub mod window;

pub use allocator::{allocate, AllocationRecord};
pub use executor::{HttpFetcher, Transport, MAX_REDIRECTS};
pub use extract::{Article, ExtractionPipeline, Extractor};
pub use orchestrator::{Orchestrator, UrlOutcome};
pub use readability::ReadabilityExtractor;
pub use service::FetchService;
pub use types::{
    BatchFetchRequest, BatchFetchResponse, ExtractError, ExtractedContent, FetchError,
    FetchErrorKind, FetchRequest, FetchResponse, RawFetchResult, RequestError, ServiceError,
};
pub use window::select;
