// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::classifier::{ClassifierError, NewsClassifier};
use crate::domain::models::verdict::MlLabel;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// 序列化的模型制品
#[derive(Debug, Deserialize)]
struct ModelArtifact {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    coefficients: Vec<f64>,
    intercept: f64,
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default = "default_fake_label")]
    fake_label: u8,
}

fn default_fake_label() -> u8 {
    1
}

/// TF-IDF 特征 + 线性决策函数的分类器
///
/// 决策值大于 0 判为类别 1，`fake_label` 指明哪个类别代表虚假新闻
#[derive(Debug, Clone)]
pub struct LinearTfidfClassifier {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    coefficients: Vec<f64>,
    intercept: f64,
    sublinear_tf: bool,
    fake_label: u8,
}

impl LinearTfidfClassifier {
    /// 从 JSON 文本加载并校验模型
    pub fn from_json_str(json: &str) -> Result<Self, ClassifierError> {
        let artifact: ModelArtifact = serde_json::from_str(json)
            .map_err(|e| ClassifierError::MalformedModel(e.to_string()))?;

        let dimension = artifact.vocabulary.len();
        if artifact.idf.len() != dimension {
            return Err(ClassifierError::MalformedModel(format!(
                "idf has {} entries, vocabulary has {}",
                artifact.idf.len(),
                dimension
            )));
        }
        if artifact.coefficients.len() != dimension {
            return Err(ClassifierError::MalformedModel(format!(
                "coefficients has {} entries, vocabulary has {}",
                artifact.coefficients.len(),
                dimension
            )));
        }
        if let Some((term, index)) = artifact.vocabulary.iter().find(|(_, &i)| i >= dimension) {
            return Err(ClassifierError::MalformedModel(format!(
                "vocabulary index {} for '{}' is out of range",
                index, term
            )));
        }
        if artifact.fake_label > 1 {
            return Err(ClassifierError::MalformedModel(format!(
                "fake_label must be 0 or 1, got {}",
                artifact.fake_label
            )));
        }

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            coefficients: artifact.coefficients,
            intercept: artifact.intercept,
            sublinear_tf: artifact.sublinear_tf,
            fake_label: artifact.fake_label,
        })
    }

    /// 从文件加载模型，文件不存在或不可读时返回 `ModelUnavailable`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ClassifierError::ModelUnavailable(format!("{}: {}", path.display(), e))
        })?;
        let model = Self::from_json_str(&json)?;
        info!(
            "Loaded classifier model from {} ({} features)",
            path.display(),
            model.vocabulary.len()
        );
        Ok(model)
    }

    pub fn feature_count(&self) -> usize {
        self.vocabulary.len()
    }

    /// 计算线性决策值 w·x + b
    pub fn decision_function(&self, text: &str) -> Result<f64, ClassifierError> {
        if text.trim().is_empty() {
            return Err(ClassifierError::InvalidInput("text is empty".to_string()));
        }

        let lowered = text.to_lowercase();
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in TOKEN_PATTERN.find_iter(&lowered) {
            if let Some(&index) = self.vocabulary.get(token.as_str()) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut features: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (index, tf * self.idf[index])
            })
            .collect();

        let norm = features.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in features.iter_mut() {
                *weight /= norm;
            }
        }

        let score = features
            .iter()
            .map(|(index, weight)| weight * self.coefficients[*index])
            .sum::<f64>()
            + self.intercept;

        debug!("Classifier decision: {:.4} ({} known terms)", score, features.len());
        Ok(score)
    }
}

impl NewsClassifier for LinearTfidfClassifier {
    fn predict(&self, text: &str) -> Result<MlLabel, ClassifierError> {
        let class = u8::from(self.decision_function(text)? > 0.0);
        Ok(if class == self.fake_label {
            MlLabel::Fake
        } else {
            MlLabel::Real
        })
    }

    fn name(&self) -> &'static str {
        "linear_tfidf"
    }
}
