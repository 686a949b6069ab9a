// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 文本规范化模块
//!
//! 将原始文本（用户输入或抓取到的网页正文）转换为可比较的规范词序列：
//! 1. 去除 HTML 类标签
//! 2. 去除所有非字母字符（数字、标点）
//! 3. 转为小写
//! 4. 按空白切分
//! 5. 去除英文停用词
//!
//! 相同输入总是得到相同输出。

use deunicode::deunicode;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^<>]*>").unwrap());
static NON_ALPHA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z]+").unwrap());

/// 英文停用词表
const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
    "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just", "don",
    "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "couldn", "didn",
    "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn", "needn", "shan",
    "shouldn", "wasn", "weren", "won", "wouldn",
];

static STOPWORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ENGLISH_STOPWORDS.iter().copied().collect());

/// 规范化后的文本
///
/// 有序的小写字母词序列，已去除停用词。仅在评分期间存在，不做持久化。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText {
    tokens: Vec<String>,
}

impl NormalizedText {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// 以单个空格连接的文本形式
    pub fn to_text(&self) -> String {
        self.tokens.join(" ")
    }

    /// 词频统计
    pub fn term_counts(&self) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for token in &self.tokens {
            *counts.entry(token.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// 去重后的词集合
    pub fn unique_terms(&self) -> HashSet<&str> {
        self.tokens.iter().map(String::as_str).collect()
    }
}

impl From<Vec<String>> for NormalizedText {
    fn from(tokens: Vec<String>) -> Self {
        Self { tokens }
    }
}

/// 判断一个词是否为停用词
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// 去除 HTML 类标签，标签位置以空格替代，避免相邻单词粘连
pub fn strip_tags(raw_text: &str) -> String {
    TAG_REGEX.replace_all(raw_text, " ").into_owned()
}

/// 规范化原始文本
///
/// 空输入返回空序列，不视为错误。
pub fn normalize(raw_text: &str) -> NormalizedText {
    if raw_text.trim().is_empty() {
        return NormalizedText::default();
    }

    let without_tags = strip_tags(raw_text);
    let decoded = html_escape::decode_html_entities(&without_tags);
    // Fold accented letters to ASCII so "café" survives as "cafe"
    let folded = deunicode(&decoded);
    let alphabetic = NON_ALPHA_REGEX.replace_all(&folded, " ");

    let tokens = alphabetic
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|token| !is_stopword(token))
        .collect();

    NormalizedText { tokens }
}

/// 规范化并重新拼接为文本
pub fn normalize_to_text(raw_text: &str) -> String {
    normalize(raw_text).to_text()
}
