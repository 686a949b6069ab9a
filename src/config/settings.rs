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

use crate::domain::services::evidence_scorer::ScoringStrategy;
use crate::domain::services::verdict_combiner::VerdictPolicy;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Google Custom Search 单次请求允许的最大结果数
pub const GOOGLE_MAX_RESULTS: u32 = 10;

/// 正文抓取超时上限（秒）
pub const MAX_FETCH_TIMEOUT_SECS: u64 = 10;

/// 应用程序配置设置
///
/// 启动时加载一次，之后以只读方式通过 `Arc` 共享
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 搜索服务配置
    pub google_search: GoogleSearchSettings,
    /// 正文抓取配置
    pub fetcher: FetcherSettings,
    /// 佐证评分配置
    pub scoring: ScoringSettings,
    /// 判定策略配置
    pub verdict: VerdictSettings,
    /// 可信域名配置
    pub trusted_domains: TrustedDomainSettings,
    /// 分类器配置
    pub classifier: ClassifierSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 搜索服务配置设置
#[derive(Deserialize, Clone)]
pub struct GoogleSearchSettings {
    /// API 密钥（必填）
    pub api_key: Option<String>,
    /// 搜索范围标识（必填）
    pub cx: Option<String>,
    /// 搜索接口地址
    pub endpoint: String,
    /// 默认返回结果数
    pub result_limit: u32,
    /// 两次请求的最小间隔（毫秒）
    pub min_interval_ms: u64,
    /// 请求超时（秒）
    pub timeout_secs: u64,
    /// 查询文本最大字符数
    pub max_query_chars: usize,
}

impl fmt::Debug for GoogleSearchSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleSearchSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("cx", &self.cx)
            .field("endpoint", &self.endpoint)
            .field("result_limit", &self.result_limit)
            .field("min_interval_ms", &self.min_interval_ms)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_query_chars", &self.max_query_chars)
            .finish()
    }
}

impl GoogleSearchSettings {
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// 结果数截断到 `[1, GOOGLE_MAX_RESULTS]`
    pub fn bounded_limit(&self) -> u32 {
        self.result_limit.clamp(1, GOOGLE_MAX_RESULTS)
    }
}

/// 正文抓取配置设置
#[derive(Debug, Deserialize, Clone)]
pub struct FetcherSettings {
    /// 请求超时（秒），不超过 10 秒
    pub timeout_secs: u64,
    /// 请求使用的 User-Agent
    pub user_agent: String,
    /// 并发抓取上限
    pub max_concurrency: usize,
    /// 响应体最大字节数，超出部分被截断
    pub max_body_bytes: usize,
}

impl FetcherSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.clamp(1, MAX_FETCH_TIMEOUT_SECS))
    }
}

/// 佐证评分配置设置
#[derive(Debug, Deserialize, Clone)]
pub struct ScoringSettings {
    /// 评分策略
    pub strategy: ScoringStrategy,
    /// 相似度阈值（严格大于）
    pub similarity_threshold: f64,
    /// 关键词策略下判定佐证所需的命中比例
    pub keyword_fraction: f64,
    /// 候选正文的最少词数
    pub min_content_tokens: usize,
}

/// 判定策略配置设置
#[derive(Debug, Deserialize, Clone)]
pub struct VerdictSettings {
    pub policy: VerdictPolicy,
}

/// 可信域名配置设置
#[derive(Debug, Deserialize, Clone)]
pub struct TrustedDomainSettings {
    /// 域名列表，为空时使用内置列表
    #[serde(default)]
    pub domains: Vec<String>,
    /// YAML 文件路径，设置后替换内置列表
    pub file: Option<String>,
}

/// 分类器配置设置
#[derive(Debug, Deserialize, Clone)]
pub struct ClassifierSettings {
    /// 模型文件路径
    pub model_path: String,
}

/// 指标配置设置
#[derive(Debug, Deserialize, Clone)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出监听地址
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从默认值、配置文件和环境变量加载配置，并做合法性校验
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载或校验失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("NEWSCHECK")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("trusted_domains.domains")
                    .try_parsing(true),
            );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// 只使用默认值和给定的覆盖项构建配置（用于测试和嵌入式使用）
    pub fn from_overrides<I, K, V>(overrides: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<config::Value>,
    {
        let mut builder = Self::defaults(Config::builder())?;
        for (key, value) in overrides {
            builder = builder.set_override(key.as_ref(), value)?;
        }
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            // Server
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Search provider
            .set_default(
                "google_search.endpoint",
                "https://www.googleapis.com/customsearch/v1",
            )?
            .set_default("google_search.result_limit", 5)?
            .set_default("google_search.min_interval_ms", 1000)?
            .set_default("google_search.timeout_secs", 10)?
            .set_default("google_search.max_query_chars", 2048)?
            // Content fetcher
            .set_default("fetcher.timeout_secs", 10)?
            .set_default(
                "fetcher.user_agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            )?
            .set_default("fetcher.max_concurrency", 5)?
            .set_default("fetcher.max_body_bytes", 2 * 1024 * 1024)?
            // Scoring
            .set_default("scoring.strategy", "similarity")?
            .set_default("scoring.similarity_threshold", 0.1)?
            .set_default("scoring.keyword_fraction", 0.8)?
            .set_default("scoring.min_content_tokens", 20)?
            // Verdict
            .set_default("verdict.policy", "strict")?
            // Trusted domains
            .set_default("trusted_domains.domains", Vec::<String>::new())?
            // Classifier
            .set_default("classifier.model_path", "models/classifier.json")?
            // Metrics
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }

    /// 校验配置
    ///
    /// 凭据必须由外部提供，阈值必须落在 `[0, 1]`
    pub fn validate(&self) -> Result<(), ConfigError> {
        let search = &self.google_search;
        if search.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
            return Err(ConfigError::Message(
                "google_search.api_key is required".to_string(),
            ));
        }
        if search.cx.as_deref().map_or(true, |c| c.trim().is_empty()) {
            return Err(ConfigError::Message(
                "google_search.cx is required".to_string(),
            ));
        }
        if search.min_interval_ms == 0 {
            return Err(ConfigError::Message(
                "google_search.min_interval_ms must be greater than zero".to_string(),
            ));
        }
        if search.max_query_chars == 0 {
            return Err(ConfigError::Message(
                "google_search.max_query_chars must be greater than zero".to_string(),
            ));
        }
        if self.fetcher.max_concurrency == 0 {
            return Err(ConfigError::Message(
                "fetcher.max_concurrency must be greater than zero".to_string(),
            ));
        }
        for (name, value) in [
            ("scoring.similarity_threshold", self.scoring.similarity_threshold),
            ("scoring.keyword_fraction", self.scoring.keyword_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Message(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
