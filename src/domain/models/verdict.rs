// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::evidence::EvidenceItem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 分类器给出的原始标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MlLabel {
    Real,
    Fake,
}

impl MlLabel {
    pub fn is_fake(self) -> bool {
        matches!(self, MlLabel::Fake)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MlLabel::Real => "REAL",
            MlLabel::Fake => "FAKE",
        }
    }
}

impl fmt::Display for MlLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 最终判定标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictLabel {
    Real,
    Fake,
    RealWithCaution,
}

impl VerdictLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            VerdictLabel::Real => "REAL",
            VerdictLabel::Fake => "FAKE",
            VerdictLabel::RealWithCaution => "REAL_WITH_CAUTION",
        }
    }
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未能完成佐证的原因
///
/// 只描述“没有找到证据”，从不表示“证据与输入相矛盾”。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnverifiedReason {
    /// 输入规范化后为空，未发起任何网络请求
    EmptyInput,
    /// 搜索没有返回结果（包括搜索服务出错）
    NoSearchResults,
    /// 搜索结果中没有可信来源
    NoTrustedSources,
    /// 可信来源的正文不可用或过短
    InsufficientContent,
    /// 有可用来源，但均未达到匹配阈值
    BelowThreshold,
}

impl UnverifiedReason {
    pub fn describe(self) -> &'static str {
        match self {
            UnverifiedReason::EmptyInput => "input contains no comparable words",
            UnverifiedReason::NoSearchResults => "search returned no results",
            UnverifiedReason::NoTrustedSources => "no results from trusted sources",
            UnverifiedReason::InsufficientContent => {
                "trusted sources could not be fetched or had too little content"
            }
            UnverifiedReason::BelowThreshold => "no trusted source was similar enough",
        }
    }
}

/// 一次分析请求的最终输出，不做持久化
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Verdict {
    /// 最终标签
    pub label: VerdictLabel,
    /// 分类器原始标签
    pub raw_ml_label: MlLabel,
    /// 是否被可信来源佐证
    pub verified: bool,
    /// 未佐证原因，佐证成功时为空
    pub unverified_reason: Option<UnverifiedReason>,
    /// 提示信息（例如佐证失败的警告）
    pub caution: Option<String>,
    /// 证据列表，保持搜索结果的排序
    pub evidence: Vec<EvidenceItem>,
    /// 非致命警告（例如搜索服务不可用）
    pub warnings: Vec<String>,
}

impl Verdict {
    /// 设置未佐证原因，已佐证的判定不受影响
    pub fn with_unverified_reason(mut self, reason: Option<UnverifiedReason>) -> Self {
        if !self.verified {
            self.unverified_reason = reason.or(Some(UnverifiedReason::BelowThreshold));
        }
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}
