// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
/// 包括文本规范化、编码检测、正文提取和日志初始化
pub mod telemetry;
pub mod text_encoding;
pub mod text_processing;
pub mod web_content_processor;
