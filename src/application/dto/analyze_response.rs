// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::verdict::{MlLabel, UnverifiedReason, Verdict, VerdictLabel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponseDto {
    pub label: VerdictLabel,
    pub raw_ml_label: MlLabel,
    pub verified: bool,
    pub unverified_reason: Option<UnverifiedReason>,
    /// 未佐证原因的可读描述
    pub verification: Option<String>,
    pub caution: Option<String>,
    pub warnings: Vec<String>,
    pub evidence: Vec<EvidenceDto>,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct EvidenceDto {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub score: f64,
}

impl From<Verdict> for AnalyzeResponseDto {
    fn from(verdict: Verdict) -> Self {
        Self {
            label: verdict.label,
            raw_ml_label: verdict.raw_ml_label,
            verified: verdict.verified,
            unverified_reason: verdict.unverified_reason,
            verification: verdict
                .unverified_reason
                .map(|reason| reason.describe().to_string()),
            caution: verdict.caution,
            warnings: verdict.warnings,
            evidence: verdict
                .evidence
                .into_iter()
                .map(|item| EvidenceDto {
                    title: item.source.title,
                    url: item.source.url,
                    snippet: item.source.snippet,
                    score: item.score,
                })
                .collect(),
            analyzed_at: Utc::now(),
        }
    }
}
