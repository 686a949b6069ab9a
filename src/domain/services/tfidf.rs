// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::text_processing::NormalizedText;
use std::collections::HashMap;

/// 稀疏向量：词 -> 权重
pub type SparseVector = HashMap<String, f64>;

/// TF-IDF 向量化器
///
/// 在一个小语料（输入文本 + 各候选来源正文）上拟合：
/// - tf 为原始词频
/// - idf = ln((1 + n) / (1 + df)) + 1（平滑 idf）
/// - 向量做 L2 归一化
#[derive(Debug, Clone, Default)]
pub struct TfIdfVectorizer {
    idf: HashMap<String, f64>,
    document_count: usize,
}

impl TfIdfVectorizer {
    /// 在给定语料上拟合 idf
    pub fn fit<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a NormalizedText>,
    {
        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        let mut document_count = 0usize;

        for document in documents {
            document_count += 1;
            for term in document.unique_terms() {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n = document_count as f64;
        let idf = document_frequency
            .into_iter()
            .map(|(term, df)| {
                let weight = ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0;
                (term.to_string(), weight)
            })
            .collect();

        Self {
            idf,
            document_count,
        }
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    /// 将文本转换为 L2 归一化的 TF-IDF 向量，未登录词被忽略
    pub fn transform(&self, document: &NormalizedText) -> SparseVector {
        let mut vector: SparseVector = document
            .term_counts()
            .into_iter()
            .filter_map(|(term, count)| {
                self.idf
                    .get(term)
                    .map(|idf| (term.to_string(), count as f64 * idf))
            })
            .collect();

        let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in vector.values_mut() {
                *weight /= norm;
            }
        }
        vector
    }
}

/// 余弦相似度，任一向量为零向量时为 0，结果截断到 `[0, 1]`
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(term, wa)| large.get(term).map(|wb| wa * wb))
        .sum();

    let norm_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = b.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}
