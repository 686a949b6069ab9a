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

use crate::utils::text_processing::NormalizedText;
use async_trait::async_trait;
use thiserror::Error;

/// 正文抓取错误类型
///
/// 这些错误都不是致命的：抓取器记录日志后返回空结果，对应候选来源被跳过。
#[derive(Error, Debug)]
pub enum FetchError {
    /// URL 无效或协议不受支持
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// 网络请求失败
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// 非 2xx 状态码
    #[error("Unexpected status: {0}")]
    HttpStatus(u16),
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// 响应内容无法解析为文本
    #[error("Parse error: {0}")]
    Parse(String),
}

impl FetchError {
    /// 用于日志与指标的简短分类名
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::InvalidUrl(_) => "invalid_url",
            FetchError::Network(e) if e.is_timeout() => "timeout",
            FetchError::Network(_) => "network",
            FetchError::HttpStatus(_) => "status",
            FetchError::Timeout => "timeout",
            FetchError::Parse(_) => "parse",
        }
    }
}

/// 正文抓取器特质
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// 抓取 URL 并返回规范化后的正文；任何失败都返回 `None`
    async fn fetch(&self, url: &str) -> Option<NormalizedText>;

    /// 抓取器名称
    fn name(&self) -> &'static str;
}
