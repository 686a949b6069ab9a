// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 搜索领域模块
///
/// 定义搜索引擎接口、搜索错误以及不会向外抛出错误的搜索结果包装
pub mod engine;
