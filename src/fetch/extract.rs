// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Content extraction pipeline
//!
//! Turns a raw HTTP body into display text. HTML goes through the
//! [`Extractor`]; every failure falls back to a cruder rendering so a
//! successful fetch always yields text.

use std::sync::Arc;
use tracing::{debug, warn};

use super::types::{ExtractError, ExtractedContent, RawFetchResult};

/// Main content of an HTML document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Article {
    pub title: String,
    pub byline: Option<String>,
    pub excerpt: Option<String>,
    /// HTML fragment holding the readable content
    pub content_html: String,
}

/// HTML readability and Markdown conversion capability
#[cfg_attr(test, mockall::automock)]
pub trait Extractor: Send + Sync {
    /// Locate the readable article inside `html`
    fn readability_extract(&self, html: &str, base_url: &str) -> Result<Article, ExtractError>;

    /// Convert an HTML document or fragment to Markdown
    fn html_to_markdown(&self, html: &str) -> Result<String, ExtractError>;
}

pub fn is_html(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("text/html")
}

/// Stateless text extraction over a shared [`Extractor`]
#[derive(Clone)]
pub struct ExtractionPipeline {
    extractor: Arc<dyn Extractor>,
}

impl ExtractionPipeline {
    pub fn new(extractor: Arc<dyn Extractor>) -> Self {
        Self { extractor }
    }

    /// Full display text for `result`
    pub fn extract(&self, result: &RawFetchResult, raw: bool) -> String {
        if raw {
            debug!(url = %result.final_url, "raw mode enabled");
            return result.body.clone();
        }
        if is_html(&result.content_type) {
            return self.render_html(&result.body, &result.final_url);
        }
        debug!(url = %result.final_url, content_type = %result.content_type, "non-HTML content");
        result.body.clone()
    }

    /// Consume `result`, keeping its metadata next to the extracted text
    pub fn extract_content(&self, result: RawFetchResult, raw: bool) -> ExtractedContent {
        let text = self.extract(&result, raw);
        ExtractedContent {
            text,
            content_type: result.content_type,
            status_code: result.status_code,
            final_url: result.final_url,
            original_url: result.original_url,
        }
    }

    fn render_html(&self, html: &str, url: &str) -> String {
        match self.readable_markdown(html, url) {
            Ok(markdown) => markdown,
            Err(err) => {
                warn!(url = %url, error = %err, "readability extraction failed, converting whole document");
                match self.extractor.html_to_markdown(html) {
                    Ok(markdown) => markdown,
                    Err(err) => {
                        warn!(url = %url, error = %err, "markdown conversion failed, returning raw body");
                        html.to_string()
                    }
                }
            }
        }
    }

    fn readable_markdown(&self, html: &str, url: &str) -> Result<String, ExtractError> {
        let article = self.extractor.readability_extract(html, url)?;
        let body = self.extractor.html_to_markdown(&article.content_html)?;

        let mut out = String::with_capacity(body.len() + article.title.len() + 8);
        if !article.title.is_empty() {
            out.push_str("# ");
            out.push_str(&article.title);
            out.push_str("\n\n");
        }
        out.push_str(&body);

        let footer = article
            .byline
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| article.excerpt.as_deref().filter(|s| !s.is_empty()));
        if let Some(footer) = footer {
            out.push_str("\n\n---\n\n");
            out.push_str(footer);
        }

        debug!(
            url = %url,
            title = %article.title,
            markdown_length = out.len(),
            "processed HTML with readability to Markdown"
        );
        Ok(out)
    }
}
