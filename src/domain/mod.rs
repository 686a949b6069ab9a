// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 分类器接口（classifier）：预训练模型的适配边界
/// - 领域模型（models）：搜索结果、证据与判定
/// - 搜索接口（search）：搜索服务抽象
/// - 服务（services）：佐证与判定的业务规则
///
/// 领域层只依赖抽象接口，具体的网络与模型实现位于基础设施层。
pub mod classifier;
pub mod models;
pub mod search;
pub mod services;
