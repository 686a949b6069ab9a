// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// HTML meta 标签中的编码声明
static META_CHARSET_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]*charset\s*=\s*["']?([A-Za-z0-9_\-:.]+)"#).unwrap()
});

/// HTTP Content-Type 头中的编码声明
static HEADER_CHARSET_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^;"'\s]+)"#).unwrap());

/// 只在文档开头查找 meta 声明
const META_SNIFF_LIMIT: usize = 2048;

/// 从 Content-Type 头中提取编码名称
pub fn charset_from_content_type(content_type: &str) -> Option<String> {
    HEADER_CHARSET_REGEX
        .captures(content_type)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_lowercase())
}

/// 从 HTML 开头的 meta 标签中提取编码名称
pub fn charset_from_meta(body: &[u8]) -> Option<String> {
    let head = &body[..body.len().min(META_SNIFF_LIMIT)];
    let head = String::from_utf8_lossy(head);
    META_CHARSET_REGEX
        .captures(&head)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_lowercase())
}

/// 将响应体解码为 UTF-8 文本
///
/// 优先级：HTTP 头声明 > meta 声明 > 合法 UTF-8 > chardetng 检测。
/// 解码永不失败，无法映射的字节以替换字符代替。
pub fn decode_body(body: &[u8], declared_charset: Option<&str>) -> String {
    let declared = declared_charset
        .map(str::to_string)
        .or_else(|| charset_from_meta(body));

    if let Some(label) = declared {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            debug!("使用声明的编码解码: {}", encoding.name());
            let (decoded, _, _) = encoding.decode(body);
            return decoded.into_owned();
        }
        debug!("未知的编码声明: {}，改为自动检测", label);
    }

    if let Ok(text) = std::str::from_utf8(body) {
        return text.to_string();
    }

    let mut detector = EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    debug!("检测到编码: {}", encoding.name());

    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}
