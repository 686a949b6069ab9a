// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node};
use tracing::debug;

/// 正文类元素的标记（标签名或 class 名）
static CONTENT_MARKER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)content|article|body|text").unwrap());

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// 不可见内容的标签，提取文本时整体跳过
const INVISIBLE_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "head", "title", "svg", "iframe", "object",
];

/// 文档骨架标签，不参与标签名匹配（否则 `<body>` 总会命中）
const STRUCTURAL_TAGS: &[&str] = &["html", "body"];

/// 网页正文提取结果
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedContent {
    /// 提取出的可见文本，空白已规范化
    pub text: String,
    /// 是否命中了正文标记元素（否则为整页可见文本）
    pub from_content_markers: bool,
}

/// 从 HTML 中提取正文文本
///
/// 优先收集标签名或 class 名匹配 `content|article|body|text` 的最外层元素的文本；
/// 若不存在这样的元素，回退为整页可见文本。
pub fn extract_article_text(html: &str) -> ExtractedContent {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let mut blocks = Vec::new();
    collect_marked_blocks(root, &mut blocks);

    if !blocks.is_empty() {
        debug!("命中 {} 个正文标记元素", blocks.len());
        return ExtractedContent {
            text: collapse_whitespace(&blocks.join(" ")),
            from_content_markers: true,
        };
    }

    debug!("未找到正文标记元素，回退为整页可见文本");
    let mut text = String::new();
    push_visible_text(root, &mut text);
    ExtractedContent {
        text: collapse_whitespace(&text),
        from_content_markers: false,
    }
}

fn is_content_marked(element: &ElementRef) -> bool {
    let value = element.value();
    let name = value.name();
    let tag_matches = !STRUCTURAL_TAGS.contains(&name) && CONTENT_MARKER_REGEX.is_match(name);
    tag_matches || value.classes().any(|class| CONTENT_MARKER_REGEX.is_match(class))
}

/// 深度优先收集最外层的正文标记元素，嵌套的标记元素不重复计入
fn collect_marked_blocks(element: ElementRef, blocks: &mut Vec<String>) {
    for child in element.children() {
        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };
        if INVISIBLE_TAGS.contains(&child.value().name()) {
            continue;
        }
        if is_content_marked(&child) {
            let mut text = String::new();
            push_visible_text(child, &mut text);
            if !text.trim().is_empty() {
                blocks.push(text);
            }
        } else {
            collect_marked_blocks(child, blocks);
        }
    }
}

fn push_visible_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(el) if !INVISIBLE_TAGS.contains(&el.name()) => {
                if let Some(child) = ElementRef::wrap(child) {
                    push_visible_text(child, out);
                }
            }
            _ => {}
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}

/// 判断响应的内容类型是否可作为文本解析
pub fn is_textual_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime.is_empty()
        || mime == "text/html"
        || mime == "application/xhtml+xml"
        || mime == "text/plain"
        || mime == "application/xml"
        || mime == "text/xml"
}
