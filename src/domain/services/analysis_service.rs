// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::classifier::{ClassifierError, NewsClassifier};
use crate::domain::models::verdict::{UnverifiedReason, Verdict};
use crate::domain::search::engine::SearchEngine;
use crate::domain::services::evidence_scorer::EvidenceScorer;
use crate::domain::services::trusted_domains::TrustedDomainRegistry;
use crate::domain::services::verdict_combiner::VerdictCombiner;
use crate::infrastructure::metrics;
use crate::utils::text_processing::normalize;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// 分析错误
///
/// 只有分类器错误会中断分析，其余 I/O 错误都在各自组件内降级为“无证据”。
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),
}

/// 新闻可信度分析服务
///
/// 串联分类器、搜索、可信来源过滤、佐证评分和判定合并
pub struct AnalysisService {
    classifier: Arc<dyn NewsClassifier>,
    search_engine: Arc<dyn SearchEngine>,
    registry: Arc<TrustedDomainRegistry>,
    scorer: Arc<EvidenceScorer>,
    combiner: VerdictCombiner,
    result_limit: u32,
}

impl AnalysisService {
    pub fn new(
        classifier: Arc<dyn NewsClassifier>,
        search_engine: Arc<dyn SearchEngine>,
        registry: Arc<TrustedDomainRegistry>,
        scorer: Arc<EvidenceScorer>,
        combiner: VerdictCombiner,
        result_limit: u32,
    ) -> Self {
        Self {
            classifier,
            search_engine,
            registry,
            scorer,
            combiner,
            result_limit,
        }
    }

    /// 分析一段新闻文本
    ///
    /// # 返回值
    ///
    /// * `Ok(Verdict)` - 最终判定，未佐证时附带原因
    /// * `Err(AnalysisError)` - 分类器不可用或输入无效
    pub async fn analyze(&self, text: &str) -> Result<Verdict, AnalysisError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("analysis", %request_id);
        self.analyze_inner(text).instrument(span).await
    }

    async fn analyze_inner(&self, text: &str) -> Result<Verdict, AnalysisError> {
        let start = Instant::now();

        let ml_label = self.classifier.predict(text)?;
        info!("Classifier {} predicted {}", self.classifier.name(), ml_label);

        let verdict = if normalize(text).is_empty() {
            info!("Input has no comparable words, skipping corroboration");
            self.combiner
                .combine(ml_label.is_fake(), false, Vec::new())
                .with_unverified_reason(Some(UnverifiedReason::EmptyInput))
        } else {
            self.corroborate(text, ml_label.is_fake()).await
        };

        info!(
            "Verdict {} (verified={}, evidence={}, reason={:?})",
            verdict.label,
            verdict.verified,
            verdict.evidence.len(),
            verdict.unverified_reason
        );
        metrics::record_verdict(verdict.label.as_str(), start.elapsed());
        Ok(verdict)
    }

    async fn corroborate(&self, text: &str, ml_is_fake: bool) -> Verdict {
        let outcome = self.search_engine.search(text, self.result_limit).await;
        let warnings: Vec<String> = outcome
            .warning
            .iter()
            .map(|e| format!("Search provider unavailable: {}", e))
            .collect();

        if outcome.results.is_empty() {
            return self
                .combiner
                .combine(ml_is_fake, false, Vec::new())
                .with_unverified_reason(Some(UnverifiedReason::NoSearchResults))
                .with_warnings(warnings);
        }

        let trusted = self.registry.filter_trusted(&outcome.results);
        info!(
            "{} of {} search results are from trusted sources",
            trusted.len(),
            outcome.results.len()
        );
        if trusted.is_empty() {
            return self
                .combiner
                .combine(ml_is_fake, false, Vec::new())
                .with_unverified_reason(Some(UnverifiedReason::NoTrustedSources))
                .with_warnings(warnings);
        }

        let scored = self.scorer.score(text, &trusted).await;
        self.combiner
            .combine(ml_is_fake, scored.verified, scored.evidence)
            .with_unverified_reason(scored.reason)
            .with_warnings(warnings)
    }
}
