// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{build_service, test_settings, SEARCH_PATH};
use axum::http::StatusCode;
use axum_test::TestServer;
use newscheck::domain::classifier::{ClassifierError, NewsClassifier};
use newscheck::domain::models::verdict::MlLabel;
use newscheck::domain::services::analysis_service::AnalysisService;
use newscheck::domain::services::evidence_scorer::{EvidenceScorer, ScoringConfig};
use newscheck::domain::services::trusted_domains::TrustedDomainRegistry;
use newscheck::domain::services::verdict_combiner::VerdictCombiner;
use newscheck::engines::reqwest_engine::ReqwestEngine;
use newscheck::infrastructure::search::GoogleSearchEngine;
use newscheck::presentation::routes;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn no_results_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn health_and_version_endpoints() {
    let mock = no_results_server().await;
    let service = build_service(&test_settings(&mock.uri(), vec![]), MlLabel::Real);
    let server = TestServer::new(routes::routes(service)).unwrap();

    let health = server.get("/health").await;
    assert_eq!(health.status_code(), StatusCode::OK);
    assert_eq!(health.text(), "OK");

    let version = server.get("/v1/version").await;
    assert_eq!(version.text(), env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn analyze_returns_verdict_json() {
    let mock = no_results_server().await;
    let service = build_service(&test_settings(&mock.uri(), vec![]), MlLabel::Real);
    let server = TestServer::new(routes::routes(service)).unwrap();

    let response = server
        .post("/v1/analyze")
        .json(&json!({ "text": "The sky is blue" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["label"], "REAL_WITH_CAUTION");
    assert_eq!(body["raw_ml_label"], "REAL");
    assert_eq!(body["verified"], false);
    assert_eq!(body["unverified_reason"], "no_search_results");
    assert!(body["caution"].is_string());
    assert!(body["evidence"].as_array().unwrap().is_empty());
    assert!(body["analyzed_at"].is_string());
}

#[tokio::test]
async fn empty_text_is_rejected() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock)
        .await;
    let service = build_service(&test_settings(&mock.uri(), vec![]), MlLabel::Real);
    let server = TestServer::new(routes::routes(service)).unwrap();

    for text in ["", "   "] {
        let response = server
            .post("/v1/analyze")
            .json(&json!({ "text": text }))
            .expect_failure()
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("Please enter some text to analyze"));
    }
}

struct BrokenClassifier;

impl NewsClassifier for BrokenClassifier {
    fn predict(&self, _text: &str) -> Result<MlLabel, ClassifierError> {
        Err(ClassifierError::ModelUnavailable(
            "models/classifier.json".to_string(),
        ))
    }

    fn name(&self) -> &'static str {
        "broken"
    }
}

#[tokio::test]
async fn classifier_failure_is_a_server_error() {
    let mock = no_results_server().await;
    let settings = test_settings(&mock.uri(), vec![]);
    let scorer = EvidenceScorer::new(
        ScoringConfig::from_settings(&settings),
        Arc::new(ReqwestEngine::new(&settings.fetcher).unwrap()),
    );
    let service = Arc::new(AnalysisService::new(
        Arc::new(BrokenClassifier),
        Arc::new(GoogleSearchEngine::new(&settings.google_search).unwrap()),
        Arc::new(TrustedDomainRegistry::default()),
        Arc::new(scorer),
        VerdictCombiner::default(),
        5,
    ));
    let server = TestServer::new(routes::routes(service)).unwrap();

    let response = server
        .post("/v1/analyze")
        .json(&json!({ "text": "The sky is blue" }))
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("unavailable"));
}
