// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anyhow::Context;
use newscheck::config::settings::Settings;
use newscheck::domain::services::analysis_service::AnalysisService;
use newscheck::domain::services::evidence_scorer::{EvidenceScorer, ScoringConfig};
use newscheck::domain::services::trusted_domains::TrustedDomainRegistry;
use newscheck::domain::services::verdict_combiner::VerdictCombiner;
use newscheck::engines::reqwest_engine::ReqwestEngine;
use newscheck::infrastructure::classifier::LinearTfidfClassifier;
use newscheck::infrastructure::search::GoogleSearchEngine;
use newscheck::presentation::routes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use newscheck::utils::telemetry;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting newscheck...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new().context("Failed to load configuration")?);
    info!("Configuration loaded: {:?}", settings.google_search);

    // 3. Initialize Prometheus Metrics
    newscheck::infrastructure::metrics::init_metrics(&settings.metrics);

    // 4. Trusted sources
    let registry = Arc::new(TrustedDomainRegistry::from_settings(&settings.trusted_domains)?);
    info!("Trusted domain registry ready with {} domains", registry.len());

    // 5. Classifier
    let classifier = Arc::new(
        LinearTfidfClassifier::from_file(&settings.classifier.model_path)
            .context("Failed to load classifier model")?,
    );

    // 6. Search client and content fetcher
    let search_engine = Arc::new(GoogleSearchEngine::new(&settings.google_search)?);
    let fetcher = Arc::new(ReqwestEngine::new(&settings.fetcher)?);

    // 7. Scoring and verdict policy
    let scoring = ScoringConfig::from_settings(&settings);
    info!(
        "Scoring strategy {:?}, verdict policy {:?}",
        scoring.strategy, settings.verdict.policy
    );
    let scorer = Arc::new(EvidenceScorer::new(scoring, fetcher));
    let combiner = VerdictCombiner::new(settings.verdict.policy);

    let service = Arc::new(AnalysisService::new(
        classifier,
        search_engine,
        registry,
        scorer,
        combiner,
        settings.google_search.bounded_limit(),
    ));

    // 8. Start HTTP server
    let app = routes::routes(service);
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
