// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了一次分析请求中流转的实体：
/// - 搜索结果（search_result）：搜索服务返回的候选来源
/// - 证据（evidence）：可信来源对输入文本的佐证结果
/// - 判定（verdict）：分类器标签与佐证结果合并后的最终输出
///
/// 所有实体都在单次请求内创建并在响应后丢弃，不跨请求共享。
pub mod evidence;
pub mod search_result;
pub mod verdict;
