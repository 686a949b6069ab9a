// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use newscheck::config::settings::Settings;
use newscheck::domain::classifier::{ClassifierError, NewsClassifier};
use newscheck::domain::models::verdict::MlLabel;
use newscheck::domain::services::analysis_service::AnalysisService;
use newscheck::domain::services::evidence_scorer::{EvidenceScorer, ScoringConfig};
use newscheck::domain::services::trusted_domains::TrustedDomainRegistry;
use newscheck::domain::services::verdict_combiner::VerdictCombiner;
use newscheck::engines::reqwest_engine::ReqwestEngine;
use newscheck::infrastructure::search::GoogleSearchEngine;
use std::sync::Arc;

pub const SEARCH_PATH: &str = "/customsearch/v1";

/// 一篇足够长的新闻正文，用于端到端相似度场景
pub const ARTICLE_TEXT: &str = "Emergency crews evacuated thousands of residents on Tuesday as a fast \
    moving wildfire spread toward the coastal town of Port Hadley, officials said. Firefighters \
    battled strong winds through the night while shelters opened in nearby schools and the \
    regional governor declared a state of emergency for the entire county.";

/// 返回固定标签的分类器
pub struct FixedClassifier(pub MlLabel);

impl NewsClassifier for FixedClassifier {
    fn predict(&self, text: &str) -> Result<MlLabel, ClassifierError> {
        if text.trim().is_empty() {
            return Err(ClassifierError::InvalidInput("text is empty".to_string()));
        }
        Ok(self.0)
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// 指向 mock 服务器的测试配置
pub fn test_settings(mock_uri: &str, extra: Vec<(&str, config::Value)>) -> Settings {
    let mut overrides: Vec<(&str, config::Value)> = vec![
        ("google_search.api_key", "test-key".into()),
        ("google_search.cx", "test-cx".into()),
        (
            "google_search.endpoint",
            format!("{}{}", mock_uri, SEARCH_PATH).into(),
        ),
        ("google_search.min_interval_ms", 10.into()),
        ("google_search.timeout_secs", 2.into()),
        ("fetcher.timeout_secs", 2.into()),
    ];
    overrides.extend(extra);
    Settings::from_overrides(overrides).expect("test settings should be valid")
}

/// 使用真实搜索客户端与抓取引擎构建分析服务
pub fn build_service(settings: &Settings, label: MlLabel) -> Arc<AnalysisService> {
    let search_engine = Arc::new(GoogleSearchEngine::new(&settings.google_search).unwrap());
    let fetcher = Arc::new(ReqwestEngine::new(&settings.fetcher).unwrap());
    let scorer = EvidenceScorer::new(ScoringConfig::from_settings(settings), fetcher);

    Arc::new(AnalysisService::new(
        Arc::new(FixedClassifier(label)),
        search_engine,
        // mock 服务器的页面都来自本机
        Arc::new(TrustedDomainRegistry::new(["127.0.0.1"])),
        Arc::new(scorer),
        VerdictCombiner::new(settings.verdict.policy),
        settings.google_search.bounded_limit(),
    ))
}

pub fn article_page(body: &str) -> String {
    format!(
        "<html><head><title>News</title></head><body><nav>Home World</nav>\
         <article><p>{}</p></article><footer>Contact us</footer></body></html>",
        body
    )
}
