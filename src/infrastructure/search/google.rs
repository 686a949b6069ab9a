// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{GoogleSearchSettings, GOOGLE_MAX_RESULTS};
use crate::domain::models::search_result::SearchResult;
use crate::domain::search::engine::{SearchEngine, SearchError, SearchOutcome};
use crate::infrastructure::metrics;
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Google Custom Search 客户端
///
/// 每次调用只发出一个请求；两次请求之间的最小间隔由令牌桶保证，
/// 等待是异步的，不会阻塞运行时线程。
pub struct GoogleSearchEngine {
    client: Client,
    endpoint: String,
    api_key: String,
    cx: String,
    max_query_chars: usize,
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl GoogleSearchEngine {
    pub fn new(settings: &GoogleSearchSettings) -> Result<Self, SearchError> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| SearchError::Config("missing search API key".to_string()))?;
        let cx = settings
            .cx
            .clone()
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| SearchError::Config("missing search scope id".to_string()))?;

        let quota = Quota::with_period(settings.min_interval()).ok_or_else(|| {
            SearchError::Config("search interval must be greater than zero".to_string())
        })?;

        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| {
                SearchError::Config(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            api_key,
            cx,
            max_query_chars: settings.max_query_chars,
            limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    /// 发出一次搜索请求，返回具体错误
    ///
    /// `limit` 截断到 `[1, GOOGLE_MAX_RESULTS]`
    pub async fn try_search(&self, query: &str, limit: u32) -> Result<Vec<SearchResult>, SearchError> {
        let query = truncate_query(query, self.max_query_chars);
        let num = limit.clamp(1, GOOGLE_MAX_RESULTS).to_string();

        self.limiter.until_ready().await;

        debug!("Google search: q_chars={}, num={}", query.chars().count(), num);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cx.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout
                } else {
                    SearchError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::NetworkError(e.to_string()))?;
        let parsed: GoogleSearchResponse =
            serde_json::from_str(&body).map_err(|e| SearchError::ParseError(e.to_string()))?;

        let results = parsed
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|item| SearchResult::new(item.title, item.snippet.unwrap_or_default(), item.link))
            .collect::<Vec<_>>();

        info!("Google search returned {} results", results.len());
        Ok(results)
    }
}

#[async_trait]
impl SearchEngine for GoogleSearchEngine {
    async fn search(&self, query: &str, limit: u32) -> SearchOutcome {
        match self.try_search(query, limit).await {
            Ok(results) => {
                metrics::record_search("ok");
                SearchOutcome::ok(results)
            }
            Err(e) => {
                warn!("Search provider failed, continuing without evidence: {}", e);
                metrics::record_search(match e {
                    SearchError::NetworkError(_) => "network",
                    SearchError::HttpStatus(_) => "status",
                    SearchError::ParseError(_) => "parse",
                    SearchError::Timeout => "timeout",
                    SearchError::Config(_) => "config",
                });
                SearchOutcome::degraded(e)
            }
        }
    }

    fn name(&self) -> &'static str {
        "google"
    }
}

/// 按字符数截断查询，尽量停在单词边界
pub fn truncate_query(query: &str, max_chars: usize) -> &str {
    let query = query.trim();
    let cut = match query.char_indices().nth(max_chars) {
        Some((idx, _)) => idx,
        None => return query,
    };

    let head = &query[..cut];
    match head.rfind(char::is_whitespace) {
        Some(space) if space > 0 => head[..space].trim_end(),
        _ => head,
    }
}

#[derive(Debug, Deserialize)]
struct GoogleSearchResponse {
    items: Option<Vec<GoogleSearchItem>>,
}

#[derive(Debug, Deserialize)]
struct GoogleSearchItem {
    #[serde(default)]
    title: String,
    link: String,
    snippet: Option<String>,
}
