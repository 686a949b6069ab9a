// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::evidence::EvidenceItem;
use crate::domain::models::verdict::{MlLabel, Verdict, VerdictLabel};
use serde::{Deserialize, Serialize};

pub const CAUTION_VERIFICATION_FAILED: &str =
    "Could not verify this text against trusted sources; treat it with caution.";
pub const CAUTION_CLASSIFIER_DISAGREES: &str =
    "Potentially real: trusted sources corroborate this text, but the classifier predicted fake.";

/// 分类器结果与佐证结果的合并策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictPolicy {
    /// 佐证优先：佐证成功即为真实；未佐证的真实新闻带警告
    #[default]
    Strict,
    /// 分类器优先：只在佐证成功时修正虚假标签，其余情况沿用分类器结果
    ClassifierFirst,
}

impl VerdictPolicy {
    /// 决策表，返回最终标签和可选的警告
    pub fn decide(self, ml_is_fake: bool, verified: bool) -> (VerdictLabel, Option<&'static str>) {
        match (self, ml_is_fake, verified) {
            (VerdictPolicy::Strict, false, true) => (VerdictLabel::Real, None),
            (VerdictPolicy::Strict, false, false) => (
                VerdictLabel::RealWithCaution,
                Some(CAUTION_VERIFICATION_FAILED),
            ),
            (VerdictPolicy::Strict, true, true) => (VerdictLabel::Real, None),
            (VerdictPolicy::Strict, true, false) => (VerdictLabel::Fake, None),

            (VerdictPolicy::ClassifierFirst, true, true) => (
                VerdictLabel::RealWithCaution,
                Some(CAUTION_CLASSIFIER_DISAGREES),
            ),
            (VerdictPolicy::ClassifierFirst, false, true) => (VerdictLabel::Real, None),
            (VerdictPolicy::ClassifierFirst, true, false) => (VerdictLabel::Fake, None),
            (VerdictPolicy::ClassifierFirst, false, false) => (VerdictLabel::Real, None),
        }
    }
}

/// 判定合并器
#[derive(Debug, Clone, Copy, Default)]
pub struct VerdictCombiner {
    policy: VerdictPolicy,
}

impl VerdictCombiner {
    pub fn new(policy: VerdictPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> VerdictPolicy {
        self.policy
    }

    pub fn combine(&self, ml_is_fake: bool, verified: bool, evidence: Vec<EvidenceItem>) -> Verdict {
        let (label, caution) = self.policy.decide(ml_is_fake, verified);
        Verdict {
            label,
            raw_ml_label: if ml_is_fake { MlLabel::Fake } else { MlLabel::Real },
            verified,
            unverified_reason: None,
            caution: caution.map(str::to_string),
            evidence,
            warnings: Vec::new(),
        }
    }
}
