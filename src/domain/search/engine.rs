// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_result::SearchResult;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Search provider returned status {0}")]
    HttpStatus(u16),
    #[error("Malformed search response: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
    #[error("Search client misconfigured: {0}")]
    Config(String),
}

/// 一次搜索的结果
///
/// 搜索服务的错误不会越过搜索客户端的边界：出错时 `results` 为空，
/// 错误保留在 `warning` 中交给调用方展示。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOutcome {
    pub results: Vec<SearchResult>,
    pub warning: Option<SearchError>,
}

impl SearchOutcome {
    pub fn ok(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            warning: None,
        }
    }

    pub fn degraded(error: SearchError) -> Self {
        Self {
            results: Vec::new(),
            warning: Some(error),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.warning.is_some()
    }
}

#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Perform a search query, preserving provider ranking order
    async fn search(&self, query: &str, limit: u32) -> SearchOutcome;

    /// Get the name of the search engine
    fn name(&self) -> &'static str;
}
