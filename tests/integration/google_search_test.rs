// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{test_settings, SEARCH_PATH};
use newscheck::domain::search::engine::{SearchEngine, SearchError};
use newscheck::infrastructure::search::GoogleSearchEngine;
use serde_json::json;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn sends_credentials_and_preserves_ranking() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("key", "test-key"))
        .and(query_param("cx", "test-cx"))
        .and(query_param("q", "wildfire forces evacuation"))
        .and(query_param("num", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "title": "First", "link": "https://bbc.com/1", "snippet": "one" },
                { "title": "Second", "link": "https://cnn.com/2" },
                { "title": "Third", "link": "https://apnews.com/3", "snippet": "three" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = test_settings(&server.uri(), vec![]);
    let engine = GoogleSearchEngine::new(&settings.google_search).unwrap();
    let outcome = engine.search("wildfire forces evacuation", 3).await;

    assert!(!outcome.is_degraded());
    let titles: Vec<&str> = outcome.results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
    assert_eq!(outcome.results[1].snippet, "");
}

#[tokio::test]
async fn limit_is_bounded_to_provider_maximum() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("num", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = test_settings(&server.uri(), vec![]);
    let engine = GoogleSearchEngine::new(&settings.google_search).unwrap();
    let outcome = engine.search("query", 50).await;
    assert!(outcome.results.is_empty());
    assert!(!outcome.is_degraded());
}

#[tokio::test]
async fn caller_limit_is_not_capped_by_configured_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("num", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("num", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = test_settings(&server.uri(), vec![]);
    assert!(settings.google_search.result_limit < 10);
    let engine = GoogleSearchEngine::new(&settings.google_search).unwrap();

    assert!(!engine.search("query", 10).await.is_degraded());
    assert!(!engine.search("query", 0).await.is_degraded());
}

#[tokio::test]
async fn server_error_is_a_warning_not_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let settings = test_settings(&server.uri(), vec![]);
    let engine = GoogleSearchEngine::new(&settings.google_search).unwrap();
    let outcome = engine.search("query", 5).await;

    assert!(outcome.results.is_empty());
    assert_eq!(outcome.warning, Some(SearchError::HttpStatus(500)));
}

#[tokio::test]
async fn malformed_json_is_a_parse_warning() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let settings = test_settings(&server.uri(), vec![]);
    let engine = GoogleSearchEngine::new(&settings.google_search).unwrap();
    let outcome = engine.search("query", 5).await;

    assert!(outcome.results.is_empty());
    assert!(matches!(outcome.warning, Some(SearchError::ParseError(_))));
}

#[tokio::test]
async fn slow_provider_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "items": [] }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let settings = test_settings(
        &server.uri(),
        vec![("google_search.timeout_secs", 1.into())],
    );
    let engine = GoogleSearchEngine::new(&settings.google_search).unwrap();
    let outcome = engine.search("query", 5).await;

    assert!(outcome.results.is_empty());
    assert_eq!(outcome.warning, Some(SearchError::Timeout));
}

#[tokio::test]
async fn consecutive_calls_respect_min_interval() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(3)
        .mount(&server)
        .await;

    let settings = test_settings(
        &server.uri(),
        vec![("google_search.min_interval_ms", 200.into())],
    );
    let engine = GoogleSearchEngine::new(&settings.google_search).unwrap();

    let start = Instant::now();
    for _ in 0..3 {
        engine.search("query", 5).await;
    }
    // first call is immediate, the next two each wait one interval
    assert!(start.elapsed() >= Duration::from_millis(380));
}

#[tokio::test]
async fn long_queries_are_truncated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("q", "wildfire forces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = test_settings(
        &server.uri(),
        vec![("google_search.max_query_chars", 18.into())],
    );
    let engine = GoogleSearchEngine::new(&settings.google_search).unwrap();
    let outcome = engine.search("wildfire forces evacuation of town", 5).await;
    assert!(!outcome.is_degraded());
}
