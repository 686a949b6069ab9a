// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::verdict::MlLabel;
use thiserror::Error;

/// 分类器错误
///
/// 分类器不可用时无法产生判定，因此这是分析请求中唯一的致命错误。
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Classifier model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("Classifier model is malformed: {0}")]
    MalformedModel(String),
    #[error("Invalid classifier input: {0}")]
    InvalidInput(String),
}

/// 预训练文本分类器适配接口
///
/// 模型与向量化器作为不透明制品由实现方加载，调用方只关心 `predict`。
pub trait NewsClassifier: Send + Sync {
    /// 预测文本为真实或虚假新闻
    fn predict(&self, text: &str) -> Result<MlLabel, ClassifierError>;

    /// 分类器名称
    fn name(&self) -> &'static str;
}
