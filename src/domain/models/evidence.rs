// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_result::SearchResult;
use serde::{Deserialize, Serialize};

/// 证据条目
///
/// 一个可信来源对输入文本的佐证结果。`score` 取值范围为 `[0, 1]`，
/// 其含义取决于评分策略（相似度或关键词命中比例）。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvidenceItem {
    /// 对应的搜索结果
    pub source: SearchResult,
    /// 佐证分数
    pub score: f64,
    /// 是否达到匹配条件
    pub matched: bool,
}

impl EvidenceItem {
    pub fn new(source: SearchResult, score: f64, matched: bool) -> Self {
        Self {
            source,
            score: score.clamp(0.0, 1.0),
            matched,
        }
    }
}
