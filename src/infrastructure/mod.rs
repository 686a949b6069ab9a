// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，负责与外部系统的交互。
///
/// 包含的子模块：
/// - 分类器（classifier）：加载模型制品并实现分类器接口
/// - 指标（metrics）：Prometheus 指标导出与记录
/// - 搜索（search）：搜索服务 API 客户端
///
/// 基础设施层依赖于领域层的抽象接口，
/// 确保领域层保持纯粹的业务逻辑，不受技术实现的影响。
pub mod classifier;
pub mod metrics;
pub mod search;
