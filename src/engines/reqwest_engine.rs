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

use crate::config::settings::FetcherSettings;
use crate::engines::traits::{ContentFetcher, FetchError};
use crate::infrastructure::metrics;
use crate::utils::text_encoding::{charset_from_content_type, decode_body};
use crate::utils::text_processing::{normalize, NormalizedText};
use crate::utils::web_content_processor::{extract_article_text, is_textual_content_type};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use std::time::Instant;
use tracing::{debug, warn};
use url::Url;

/// 正文抓取引擎
///
/// 基于reqwest实现的HTTP抓取引擎，请求带真实浏览器标识和有界超时
pub struct ReqwestEngine {
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl ReqwestEngine {
    /// 根据抓取配置创建引擎
    ///
    /// # 参数
    ///
    /// * `settings` - 抓取配置（超时、User-Agent、响应体上限）
    pub fn new(settings: &FetcherSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout())
            .build()?;

        Ok(Self {
            client,
            max_body_bytes: settings.max_body_bytes,
        })
    }

    /// 抓取并规范化正文，返回具体的失败原因
    ///
    /// # 返回值
    ///
    /// * `Ok(NormalizedText)` - 规范化后的正文（可能为空或很短，由调用方过滤）
    /// * `Err(FetchError)` - 抓取过程中出现的错误
    pub async fn try_fetch(&self, url: &str) -> Result<NormalizedText, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }

        let start = Instant::now();
        let mut response = self
            .client
            .get(parsed)
            .header(
                ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !is_textual_content_type(&content_type) {
            return Err(FetchError::Parse(format!(
                "unsupported content type: {}",
                content_type
            )));
        }

        // 按块读取，达到上限后不再读取剩余响应体
        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(classify_error)? {
            let room = self.max_body_bytes - body.len();
            if chunk.len() >= room {
                body.extend_from_slice(&chunk[..room]);
                debug!("响应体达到上限 {} 字节，已截断: {}", self.max_body_bytes, url);
                break;
            }
            body.extend_from_slice(&chunk);
        }

        let charset = charset_from_content_type(&content_type);
        let html = decode_body(&body, charset.as_deref());
        let extracted = extract_article_text(&html);
        let text = normalize(&extracted.text);

        debug!(
            "抓取完成: url={}, tokens={}, from_markers={}, elapsed_ms={}",
            url,
            text.len(),
            extracted.from_content_markers,
            start.elapsed().as_millis()
        );

        Ok(text)
    }
}

fn classify_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(error)
    }
}

#[async_trait]
impl ContentFetcher for ReqwestEngine {
    /// 抓取正文，失败时记录日志并返回 `None`
    async fn fetch(&self, url: &str) -> Option<NormalizedText> {
        match self.try_fetch(url).await {
            Ok(text) => {
                metrics::record_fetch("ok");
                Some(text)
            }
            Err(e) => {
                warn!("正文抓取失败，跳过该来源: url={}, error={}", url, e);
                metrics::record_fetch(e.kind());
                None
            }
        }
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
