// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared fixtures: a local site to fetch from and a matching config
#![allow(dead_code)]

use axum::{
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect},
    routing::get,
    Router,
};
use pagefetch::FetchConfig;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const TEST_USER_AGENT: &str = "pagefetch-test/1.0";

pub const ARTICLE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Main Article Title</title>
    <meta name="author" content="Jane Doe">
    <meta name="description" content="A short article used by the tests">
</head>
<body>
    <nav>Navigation menu</nav>
    <article>
        <h2>Background</h2>
        <p>This is the main content of the article. It has enough text to be picked
        as the readable region of the page, well past the minimum candidate size that
        the extractor insists on before trusting a container.</p>
        <p>A second paragraph links to <a href="/related">a related page</a> and keeps
        going for a while so that the article clearly outweighs the surrounding chrome.</p>
    </article>
    <footer>Footer links</footer>
</body>
</html>"#;

/// Config pointed at nothing in particular, with a short timeout
pub fn test_config() -> FetchConfig {
    FetchConfig {
        timeout_secs: 1,
        user_agent: TEST_USER_AGENT.to_string(),
        max_urls: 5,
        max_workers: 4,
        default_max_length: 5000,
    }
}

/// Routes served by the local test site
pub fn site() -> Router {
    Router::new()
        .route("/article", get(|| async { Html(ARTICLE_HTML) }))
        .route(
            "/tiny",
            get(|| async { Html("<html><head><title>T</title></head><body>hi</body></html>") }),
        )
        .route("/text", get(|| async { "This is a long sentence." }))
        .route("/redirect", get(|| async { Redirect::temporary("/text") }))
        .route("/chain/:hops", get(chain))
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, "no such page") }),
        )
        .route("/user-agent", get(echo_user_agent))
        .route("/slow", get(slow))
        .route("/sized/:n", get(sized))
}

async fn chain(Path(hops): Path<usize>) -> axum::response::Response {
    if hops == 0 {
        "end of chain".into_response()
    } else {
        Redirect::temporary(&format!("/chain/{}", hops - 1)).into_response()
    }
}

async fn echo_user_agent(headers: HeaderMap) -> String {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(3)).await;
    "too late"
}

async fn sized(Path(n): Path<usize>) -> String {
    "x".repeat(n)
}

/// Serve the test site on an ephemeral port and return its base URL
pub async fn spawn_site() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, site()).await.unwrap();
    });
    format!("http://{addr}")
}

/// URL of a port nothing listens on
pub async fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/")
}

/// Server that promises more body than it sends, then hangs up
pub async fn truncated_body_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 100\r\n\r\npartial",
                )
                .await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{addr}/")
}
