// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::TrustedDomainSettings;
use crate::domain::models::search_result::SearchResult;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

/// 内置的可信新闻域名
pub const DEFAULT_TRUSTED_DOMAINS: &[&str] = &[
    // English & global
    "bbc.com", "reuters.com", "apnews.com", "theguardian.com", "cnn.com", "nytimes.com",
    "theatlantic.com", "economist.com", "aljazeera.com", "ndtv.com",
    // European broadcasters and papers
    "dw.com", "lemonde.fr", "elpais.com",
    // Asia
    "xinhuanet.com", "nhk.or.jp", "ptinews.com",
    // Agencies
    "afp.com", "efe.com", "anadoluagency.com", "tass.com", "ipsnews.net",
    // Tamil-language outlets
    "dailythanthi.com", "dinamalar.com", "dinamani.com", "malaimalar.com", "dinakaran.com",
    "tamil.thehindu.com", "thinaboomi.in", "theekkathir.in", "viduthalai.in",
    "tamilmurasu.com.sg", "thuglak.com", "ibctamil.com",
    // United States
    "washingtonpost.com", "wsj.com", "usatoday.com", "latimes.com", "chicagotribune.com",
    "bostonglobe.com",
    // United Kingdom
    "dailymail.co.uk", "thetimes.co.uk", "telegraph.co.uk", "independent.co.uk", "ft.com",
    "metro.co.uk", "mirror.co.uk", "express.co.uk", "thesun.co.uk",
    // Canada
    "theglobeandmail.com", "nationalpost.com", "torontostar.com",
    // India
    "timesofindia.indiatimes.com", "thehindu.com", "indianexpress.com",
    // Australia
    "smh.com.au", "theage.com.au", "afr.com", "abc.net.au",
    // Kenya, Singapore, Philippines
    "nation.co.ke", "straitstimes.com", "inquirer.net",
    // Others
    "nypost.com", "iol.co.za", "denverpost.com", "seattletimes.com", "baltimoresun.com",
    "philly.com", "sacbee.com", "post-gazette.com", "kansascity.com",
    // Taiwan, South Korea
    "udn.com", "koreajoongangdaily.joins.com",
];

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read trusted domain file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse trusted domain file {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("Trusted domain list is empty")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct TrustedDomainFile {
    domains: Vec<String>,
}

/// 可信域名注册表
///
/// 启动时构建一次，之后只读，通过 `Arc` 共享给评分流程。
#[derive(Debug, Clone)]
pub struct TrustedDomainRegistry {
    domains: Vec<String>,
}

impl Default for TrustedDomainRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_TRUSTED_DOMAINS.iter().copied())
    }
}

impl TrustedDomainRegistry {
    /// 由域名列表构建注册表，域名会被规范化并去重
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for domain in domains {
            let domain = normalize_host(domain.as_ref().trim());
            if !domain.is_empty() && !normalized.contains(&domain) {
                normalized.push(domain);
            }
        }
        Self {
            domains: normalized,
        }
    }

    /// 从 YAML 文件加载（格式：`domains: [..]`）
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: shown.clone(),
            source,
        })?;
        let file: TrustedDomainFile =
            serde_yaml::from_str(&content).map_err(|source| RegistryError::Parse {
                path: shown.clone(),
                source,
            })?;

        let registry = Self::new(file.domains);
        if registry.is_empty() {
            return Err(RegistryError::Empty);
        }
        info!("从 {} 加载了 {} 个可信域名", shown, registry.len());
        Ok(registry)
    }

    /// 按配置构建：文件优先，其次是配置中的列表，都没有时使用内置列表
    pub fn from_settings(settings: &TrustedDomainSettings) -> Result<Self, RegistryError> {
        if let Some(path) = settings.file.as_deref() {
            return Self::from_yaml_file(path);
        }
        if !settings.domains.is_empty() {
            let registry = Self::new(&settings.domains);
            if registry.is_empty() {
                return Err(RegistryError::Empty);
            }
            return Ok(registry);
        }
        Ok(Self::default())
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// 判断 URL 是否来自可信域名
    ///
    /// 只与主机名比较（去除协议与 `www.` 前缀，忽略大小写），
    /// 主机名包含可信域名即命中，路径中出现的可信域名不会命中。
    /// 无法解析的 URL 返回 `false`。
    pub fn is_trusted(&self, url: &str) -> bool {
        let Some(host) = extract_host(url) else {
            return false;
        };
        self.domains.iter().any(|trusted| host.contains(trusted.as_str()))
    }

    /// 过滤出可信来源的搜索结果，保持原有排序
    pub fn filter_trusted(&self, results: &[SearchResult]) -> Vec<SearchResult> {
        let trusted: Vec<SearchResult> = results
            .iter()
            .filter(|r| self.is_trusted(&r.url))
            .cloned()
            .collect();
        debug!("{} 个搜索结果中有 {} 个来自可信来源", results.len(), trusted.len());
        trusted
    }
}

fn normalize_host(host: &str) -> String {
    let host = host.trim_end_matches('.').to_lowercase();
    match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    }
}

/// 提取并规范化 URL 的主机名，缺少协议时按 http 处理
fn extract_host(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("http://{}", url)).ok()?
        }
        Err(_) => return None,
    };

    let host = parsed.host_str()?;
    let host = normalize_host(host);
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}
