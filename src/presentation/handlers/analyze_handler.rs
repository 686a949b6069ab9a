// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
};
use std::sync::Arc;
use validator::Validate;

use crate::{
    application::dto::{analyze_request::AnalyzeRequestDto, analyze_response::AnalyzeResponseDto},
    domain::services::analysis_service::AnalysisService,
    presentation::errors::AppError,
};

/// 处理分析请求
///
/// # 参数
///
/// * `service` - 分析服务实例
/// * `payload` - 待分析的新闻文本
///
/// # 错误
///
/// - 文本为空或过长时返回 400
/// - 分类器不可用时返回 500
pub async fn analyze(
    Extension(service): Extension<Arc<AnalysisService>>,
    Json(payload): Json<AnalyzeRequestDto>,
) -> Result<(StatusCode, Json<AnalyzeResponseDto>), AppError> {
    payload.validate()?;

    let verdict = service.analyze(&payload.text).await?;
    Ok((StatusCode::OK, Json(AnalyzeResponseDto::from(verdict))))
}
