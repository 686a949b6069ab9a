// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 搜索结果
///
/// 由搜索客户端产生，保持搜索服务商的排序，创建后不再修改。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SearchResult {
    /// 结果标题
    pub title: String,
    /// 结果摘要
    pub snippet: String,
    /// 结果链接
    pub url: String,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        snippet: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            url: url.into(),
        }
    }
}
