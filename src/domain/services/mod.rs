// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 分析服务（analysis_service）：串联分类、搜索、过滤、评分与判定
/// - 佐证评分（evidence_scorer）：相似度或关键词命中两种评分策略
/// - TF-IDF（tfidf）：向量化与余弦相似度
/// - 可信域名（trusted_domains）：只读的可信来源注册表
/// - 判定合并（verdict_combiner）：分类器结果与佐证结果的合并策略
pub mod analysis_service;
pub mod evidence_scorer;
pub mod tfidf;
pub mod trusted_domains;
pub mod verdict_combiner;
