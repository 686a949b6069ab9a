// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 搜索服务模块
///
/// 提供搜索服务的 API 客户端
pub mod google;

pub use google::GoogleSearchEngine;
