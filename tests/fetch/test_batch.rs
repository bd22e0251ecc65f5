// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Batch fetches sharing one character budget

use crate::common::{refused_url, spawn_site, test_config};
use pagefetch::{BatchFetchRequest, FetchService, RequestError};

fn service() -> FetchService {
    FetchService::new(test_config()).unwrap()
}

#[tokio::test]
async fn test_budget_split_across_pages() {
    let base = spawn_site().await;
    let urls = vec![
        format!("{base}/sized/10"),
        format!("{base}/sized/30"),
        format!("{base}/sized/5"),
    ];

    let batch = service().fetch_multiple(&urls, 30, false).await;

    assert!(batch.errors.is_empty());
    assert_eq!(batch.responses[&urls[0]].content.len(), 10);
    assert_eq!(batch.responses[&urls[1]].content.len(), 15);
    assert_eq!(batch.responses[&urls[2]].content.len(), 5);
    assert_eq!(batch.total_chars(), 30);
}

#[tokio::test]
async fn test_partial_failure_keeps_successes() {
    let base = spawn_site().await;
    let ok = format!("{base}/sized/100");
    let not_found = format!("{base}/missing");
    let dead_a = refused_url().await;
    let dead_b = refused_url().await;
    let urls = vec![ok.clone(), dead_a.clone(), not_found.clone(), dead_b.clone()];

    let batch = service().fetch_multiple(&urls, 1000, false).await;

    assert_eq!(batch.responses.len(), 2);
    assert_eq!(batch.errors.len(), 2);
    assert_eq!(batch.responses[&ok].content.len(), 100);
    assert_eq!(batch.responses[&not_found].status_code, 404);
    assert!(batch.errors[&dead_a].starts_with("failed to execute request:"));
    assert!(batch.errors.contains_key(&dead_b));
}

#[tokio::test]
async fn test_every_url_lands_in_exactly_one_map() {
    let base = spawn_site().await;
    let dead = refused_url().await;
    let urls = vec![
        format!("{base}/text"),
        dead,
        format!("{base}/slow"),
        format!("{base}/tiny"),
    ];

    let batch = service().fetch_multiple(&urls, 500, false).await;

    for url in &urls {
        let in_responses = batch.responses.contains_key(url);
        let in_errors = batch.errors.contains_key(url);
        assert!(in_responses ^ in_errors, "{url} must be in exactly one map");
    }
    assert_eq!(batch.responses.len() + batch.errors.len(), urls.len());
}

#[tokio::test]
async fn test_total_never_exceeds_budget() {
    let base = spawn_site().await;
    let sizes = [0usize, 3, 17, 40, 250];

    for budget in [1i64, 4, 25, 60, 199, 1000] {
        let urls: Vec<String> = sizes.iter().map(|n| format!("{base}/sized/{n}")).collect();
        let batch = service().fetch_multiple(&urls, budget, true).await;

        assert!(batch.errors.is_empty());
        assert!(
            batch.total_chars() <= budget as usize,
            "budget {budget}: got {}",
            batch.total_chars()
        );
        for (url, n) in urls.iter().zip(sizes) {
            assert!(batch.responses[url].content.len() <= n);
        }
    }
}

#[tokio::test]
async fn test_execute_batch_rejects_too_many_urls() {
    let urls: Vec<String> = (0..6).map(|i| format!("http://example.com/{i}")).collect();
    let request = BatchFetchRequest {
        urls,
        max_length: 0,
        raw: false,
    };

    let err = service().execute_batch(&request).await.unwrap_err();

    assert_eq!(err, RequestError::TooManyUrls { count: 6, max: 5 });
    assert_eq!(err.to_string(), "too many URLs: maximum allowed is 5");
}

#[tokio::test]
async fn test_execute_batch_uses_default_budget() {
    let base = spawn_site().await;
    let mut config = test_config();
    config.default_max_length = 12;
    let service = FetchService::new(config).unwrap();
    let request = BatchFetchRequest {
        urls: vec![format!("{base}/sized/100"), format!("{base}/sized/100?b")],
        max_length: 0,
        raw: false,
    };

    let batch = service.execute_batch(&request).await.unwrap();

    assert_eq!(batch.total_chars(), 12);
}
