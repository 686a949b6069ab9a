// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::models::evidence::EvidenceItem;
use crate::domain::models::search_result::SearchResult;
use crate::domain::models::verdict::UnverifiedReason;
use crate::domain::services::tfidf::{cosine_similarity, TfIdfVectorizer};
use crate::engines::traits::ContentFetcher;
use crate::utils::text_processing::{normalize, NormalizedText};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// 佐证评分策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    /// 抓取可信来源正文，TF-IDF 余弦相似度超过阈值即为匹配
    #[default]
    Similarity,
    /// 只比较搜索结果的标题和摘要，统计输入关键词命中数
    KeywordOverlap,
}

/// 评分参数
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub strategy: ScoringStrategy,
    pub similarity_threshold: f64,
    pub keyword_fraction: f64,
    pub min_content_tokens: usize,
    pub max_concurrency: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            strategy: ScoringStrategy::Similarity,
            similarity_threshold: 0.1,
            keyword_fraction: 0.8,
            min_content_tokens: 20,
            max_concurrency: 5,
        }
    }
}

impl ScoringConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            strategy: settings.scoring.strategy,
            similarity_threshold: settings.scoring.similarity_threshold,
            keyword_fraction: settings.scoring.keyword_fraction,
            min_content_tokens: settings.scoring.min_content_tokens,
            max_concurrency: settings.fetcher.max_concurrency.max(1),
        }
    }
}

/// 评分结果
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOutcome {
    pub verified: bool,
    /// 匹配的候选来源，保持搜索结果的排序
    pub evidence: Vec<EvidenceItem>,
    /// 未佐证时的原因
    pub reason: Option<UnverifiedReason>,
}

impl ScoreOutcome {
    fn unverified(reason: UnverifiedReason) -> Self {
        Self {
            verified: false,
            evidence: Vec::new(),
            reason: Some(reason),
        }
    }
}

/// 佐证评分器
///
/// 对已过滤为可信来源的候选结果打分，判断输入文本是否被佐证
pub struct EvidenceScorer {
    config: ScoringConfig,
    fetcher: Arc<dyn ContentFetcher>,
}

impl EvidenceScorer {
    pub fn new(config: ScoringConfig, fetcher: Arc<dyn ContentFetcher>) -> Self {
        Self { config, fetcher }
    }

    /// 对候选来源评分
    ///
    /// # 参数
    ///
    /// * `input_text` - 原始输入文本
    /// * `candidates` - 可信来源的搜索结果，按搜索排序
    pub async fn score(&self, input_text: &str, candidates: &[SearchResult]) -> ScoreOutcome {
        let input = normalize(input_text);
        if input.is_empty() {
            return ScoreOutcome::unverified(UnverifiedReason::EmptyInput);
        }
        if candidates.is_empty() {
            return ScoreOutcome::unverified(UnverifiedReason::NoTrustedSources);
        }

        match self.config.strategy {
            ScoringStrategy::Similarity => self.score_by_similarity(&input, candidates).await,
            ScoringStrategy::KeywordOverlap => self.score_by_keywords(&input, candidates),
        }
    }

    async fn score_by_similarity(
        &self,
        input: &NormalizedText,
        candidates: &[SearchResult],
    ) -> ScoreOutcome {
        // 每个抓取任务持有自己的 URL 和抓取器句柄，`buffered` 按输入顺序产出
        let contents: Vec<Option<NormalizedText>> = stream::iter(candidates.to_vec())
            .map(|candidate| {
                let fetcher = Arc::clone(&self.fetcher);
                async move { fetcher.fetch(&candidate.url).await }
            })
            .buffered(self.config.max_concurrency.max(1))
            .collect()
            .await;

        let survivors: Vec<(&SearchResult, NormalizedText)> = candidates
            .iter()
            .zip(contents)
            .filter_map(|(candidate, content)| {
                let content = content?;
                if content.len() < self.config.min_content_tokens {
                    debug!(
                        "Discarding {}: {} tokens below minimum {}",
                        candidate.url,
                        content.len(),
                        self.config.min_content_tokens
                    );
                    return None;
                }
                Some((candidate, content))
            })
            .collect();

        if survivors.is_empty() {
            return ScoreOutcome::unverified(UnverifiedReason::InsufficientContent);
        }

        let vectorizer = TfIdfVectorizer::fit(
            std::iter::once(input).chain(survivors.iter().map(|(_, content)| content)),
        );
        let input_vector = vectorizer.transform(input);

        let evidence: Vec<EvidenceItem> = survivors
            .into_iter()
            .filter_map(|(candidate, content)| {
                let similarity = cosine_similarity(&input_vector, &vectorizer.transform(&content));
                debug!("Similarity {:.4} for {}", similarity, candidate.url);
                (similarity > self.config.similarity_threshold)
                    .then(|| EvidenceItem::new(candidate.clone(), similarity, true))
            })
            .collect();

        info!(
            "Similarity scoring: {} of {} candidates matched",
            evidence.len(),
            candidates.len()
        );

        if evidence.is_empty() {
            ScoreOutcome::unverified(UnverifiedReason::BelowThreshold)
        } else {
            ScoreOutcome {
                verified: true,
                evidence,
                reason: None,
            }
        }
    }

    fn score_by_keywords(&self, input: &NormalizedText, candidates: &[SearchResult]) -> ScoreOutcome {
        let keywords = input.unique_terms();
        let total = keywords.len();

        let mut aggregate = 0usize;
        let mut evidence = Vec::new();
        for candidate in candidates {
            let haystack = normalize(&format!("{} {}", candidate.title, candidate.snippet));
            let terms: HashSet<&str> = haystack.unique_terms();
            let hits = keywords.iter().filter(|k| terms.contains(*k)).count();
            if hits > 0 {
                aggregate += hits;
                evidence.push(EvidenceItem::new(
                    candidate.clone(),
                    hits as f64 / total as f64,
                    true,
                ));
            }
        }

        let verified =
            !evidence.is_empty() && aggregate as f64 >= self.config.keyword_fraction * total as f64;

        info!(
            "Keyword scoring: {} hits over {} keywords, {} candidates matched",
            aggregate,
            total,
            evidence.len()
        );

        ScoreOutcome {
            verified,
            evidence,
            reason: (!verified).then_some(UnverifiedReason::BelowThreshold),
        }
    }
}
