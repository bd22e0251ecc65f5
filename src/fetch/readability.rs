// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Default [`Extractor`] built on `scraper` and `htmd`
//!
//! Readability here is a selector heuristic: the first well-known content
//! container holding a substantial amount of text wins, otherwise `<body>`.

use htmd::options::{CodeBlockStyle, HeadingStyle, LinkStyle, Options};
use htmd::HtmlToMarkdown;
use regex::{Captures, Regex};
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use url::Url;

use super::extract::{Article, Extractor};
use super::types::ExtractError;

/// Candidate containers for the main content, in priority order
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    "[role='main']",
    ".post-content",
    ".article-content",
    ".entry-content",
    ".story-body",
    ".article__body",
    ".content-body",
    "#article-body",
    "#content",
    ".prose",
];

/// Minimum text length for a candidate container to be accepted
const MIN_CANDIDATE_CHARS: usize = 200;

/// Elements dropped during Markdown conversion
const NOISE_TAGS: &[&str] = &[
    "head", "script", "style", "noscript", "nav", "footer", "aside", "form", "iframe", "svg",
    "template",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ReadabilityExtractor;

impl ReadabilityExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for ReadabilityExtractor {
    fn readability_extract(&self, html: &str, base_url: &str) -> Result<Article, ExtractError> {
        if html.trim().is_empty() {
            return Err(ExtractError::NoDocument);
        }
        let document = Html::parse_document(html);

        let title = first_text(&document, "title")
            .or_else(|| meta_content(&document, "meta[property='og:title']"))
            .or_else(|| first_text(&document, "h1"))
            .unwrap_or_default();
        let byline = meta_content(&document, "meta[name='author']")
            .or_else(|| first_text(&document, "[rel='author'], .byline, .author"));
        let excerpt = meta_content(&document, "meta[name='description']")
            .or_else(|| meta_content(&document, "meta[property='og:description']"));

        let content = main_content(&document).ok_or(ExtractError::NoContent)?;
        let content_html = match Url::parse(base_url) {
            Ok(base) => absolutize_links(&content.inner_html(), &base),
            Err(_) => content.inner_html(),
        };

        Ok(Article {
            title,
            byline,
            excerpt,
            content_html,
        })
    }

    fn html_to_markdown(&self, html: &str) -> Result<String, ExtractError> {
        let converter = HtmlToMarkdown::builder()
            .skip_tags(NOISE_TAGS.to_vec())
            .options(Options {
                heading_style: HeadingStyle::Atx,
                code_block_style: CodeBlockStyle::Fenced,
                link_style: LinkStyle::Inlined,
                ..Default::default()
            })
            .build();
        let markdown = converter.convert(html).map_err(ExtractError::Markdown)?;
        Ok(tidy_markdown(&markdown))
    }
}

fn main_content(document: &Html) -> Option<ElementRef<'_>> {
    for selector_str in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        if let Some(element) = document.select(&selector).next() {
            if clean_text(&element).chars().count() > MIN_CANDIDATE_CHARS {
                return Some(element);
            }
        }
    }

    let body = Selector::parse("body").ok()?;
    document
        .select(&body)
        .next()
        .filter(|element| !clean_text(element).is_empty())
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| clean_text(&el))
        .filter(|text| !text.is_empty())
}

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .filter_map(|el| el.value().attr("content"))
        .map(|c| c.trim().to_string())
        .find(|c| !c.is_empty())
}

/// Element text with whitespace collapsed
fn clean_text(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"\b(href|src)="([^"]*)""#).expect("link pattern is a valid regex")
    })
}

/// Resolve relative `href`/`src` attributes against `base`
fn absolutize_links(html: &str, base: &Url) -> String {
    link_pattern()
        .replace_all(html, |caps: &Captures| {
            let target = &caps[2];
            if target.starts_with('#') {
                return caps[0].to_string();
            }
            match base.join(target) {
                Ok(resolved) => format!("{}=\"{}\"", &caps[1], resolved),
                Err(_) => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn blank_lines() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\n{3,}").expect("blank line pattern is a valid regex"))
}

fn tidy_markdown(markdown: &str) -> String {
    blank_lines().replace_all(markdown, "\n\n").trim().to_string()
}
