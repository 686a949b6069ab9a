// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 分类器适配模块
///
/// 加载预训练的 TF-IDF + 线性模型制品并实现 `NewsClassifier`
pub mod linear_model;

pub use linear_model::LinearTfidfClassifier;
