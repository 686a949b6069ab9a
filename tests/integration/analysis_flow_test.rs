// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{article_page, build_service, test_settings, ARTICLE_TEXT, SEARCH_PATH};
use newscheck::domain::models::verdict::{MlLabel, UnverifiedReason, VerdictLabel};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 搜索无结果：真实新闻被标记为需谨慎
#[tokio::test]
async fn no_search_results_gives_real_with_caution() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "kind": "customsearch#search" })))
        .expect(1)
        .mount(&server)
        .await;

    let service = build_service(&test_settings(&server.uri(), vec![]), MlLabel::Real);
    let verdict = service.analyze("The sky is blue").await.unwrap();

    assert!(!verdict.verified);
    assert_eq!(verdict.label, VerdictLabel::RealWithCaution);
    assert!(verdict.caution.is_some());
    assert_eq!(verdict.unverified_reason, Some(UnverifiedReason::NoSearchResults));
    assert!(verdict.warnings.is_empty());
}

/// 输入与可信来源文章逐字一致：佐证覆盖分类器的虚假判定
#[tokio::test]
async fn verbatim_trusted_article_overrides_fake_prediction() {
    let server = MockServer::start().await;
    let article_url = format!("{}/news/wildfire", server.uri());

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "title": "Wildfire forces evacuation", "link": article_url, "snippet": "Crews evacuated..." },
                { "title": "Blog repost", "link": "https://random-blog.example/fire", "snippet": "..." }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/news/wildfire"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(article_page(ARTICLE_TEXT), "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = build_service(&test_settings(&server.uri(), vec![]), MlLabel::Fake);
    let verdict = service.analyze(ARTICLE_TEXT).await.unwrap();

    assert!(verdict.verified);
    assert_eq!(verdict.label, VerdictLabel::Real);
    assert_eq!(verdict.raw_ml_label, MlLabel::Fake);
    assert_eq!(verdict.evidence.len(), 1);
    assert_eq!(verdict.evidence[0].source.url, article_url);
    assert!(verdict.evidence[0].score > 0.9);
    assert!(verdict.unverified_reason.is_none());
}

/// 搜索服务返回 500：不抛出错误，退化为只用分类器判定
#[tokio::test]
async fn provider_failure_falls_back_to_classifier() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let service = build_service(&test_settings(&server.uri(), vec![]), MlLabel::Fake);
    let verdict = service.analyze(ARTICLE_TEXT).await.unwrap();

    assert!(!verdict.verified);
    assert_eq!(verdict.label, VerdictLabel::Fake);
    assert!(verdict.evidence.is_empty());
    assert_eq!(verdict.unverified_reason, Some(UnverifiedReason::NoSearchResults));
    assert_eq!(verdict.warnings.len(), 1);
    assert!(verdict.warnings[0].contains("500"));
}

/// 输入规范化后为空时不发起任何网络请求
#[tokio::test]
async fn empty_normalized_input_makes_no_network_calls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let service = build_service(&test_settings(&server.uri(), vec![]), MlLabel::Real);
    let verdict = service.analyze("!!! 2024 ... the of and").await.unwrap();

    assert!(!verdict.verified);
    assert_eq!(verdict.unverified_reason, Some(UnverifiedReason::EmptyInput));
}

/// 可信来源抓取失败：原因为内容不足
#[tokio::test]
async fn unreachable_trusted_pages_are_insufficient_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "title": "Gone", "link": format!("{}/gone", server.uri()), "snippet": "" },
                { "title": "Short", "link": format!("{}/short", server.uri()), "snippet": "" }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/short"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(article_page("Wildfire update."), "text/html"),
        )
        .mount(&server)
        .await;

    let service = build_service(&test_settings(&server.uri(), vec![]), MlLabel::Fake);
    let verdict = service.analyze(ARTICLE_TEXT).await.unwrap();

    assert_eq!(verdict.label, VerdictLabel::Fake);
    assert_eq!(
        verdict.unverified_reason,
        Some(UnverifiedReason::InsufficientContent)
    );
}

/// 关键词策略只使用标题和摘要，不抓取页面
#[tokio::test]
async fn keyword_strategy_uses_titles_and_snippets() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "title": "Wildfire forces evacuation",
                    "link": format!("{}/news/a", server.uri()),
                    "snippet": "Residents of coastal town flee the flames"
                }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/news/a"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let settings = test_settings(
        &server.uri(),
        vec![("scoring.strategy", "keyword_overlap".into())],
    );
    let service = build_service(&settings, MlLabel::Fake);
    let verdict = service
        .analyze("Wildfire forces evacuation of coastal town")
        .await
        .unwrap();

    assert!(verdict.verified);
    assert_eq!(verdict.label, VerdictLabel::Real);
    assert_eq!(verdict.evidence.len(), 1);
}

/// 分类器优先策略：佐证成功但分类器判为虚假时给出谨慎标签
#[tokio::test]
async fn classifier_first_policy_marks_disagreement() {
    let server = MockServer::start().await;
    let article_url = format!("{}/news/wildfire", server.uri());
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "title": "Wildfire", "link": article_url, "snippet": "" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/news/wildfire"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(article_page(ARTICLE_TEXT), "text/html"),
        )
        .mount(&server)
        .await;

    let settings = test_settings(
        &server.uri(),
        vec![("verdict.policy", "classifier_first".into())],
    );
    let service = build_service(&settings, MlLabel::Fake);
    let verdict = service.analyze(ARTICLE_TEXT).await.unwrap();

    assert!(verdict.verified);
    assert_eq!(verdict.label, VerdictLabel::RealWithCaution);
    assert!(verdict.caution.is_some());
}
