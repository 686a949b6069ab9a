// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;
use validator::ValidationErrors;

use crate::domain::classifier::ClassifierError;
use crate::domain::services::analysis_service::AnalysisError;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，提供统一的错误处理接口
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    pub fn status(&self) -> StatusCode {
        if self.0.downcast_ref::<ValidationErrors>().is_some() {
            return StatusCode::BAD_REQUEST;
        }
        match self.0.downcast_ref::<AnalysisError>() {
            Some(AnalysisError::Classifier(ClassifierError::InvalidInput(_))) => {
                StatusCode::BAD_REQUEST
            }
            Some(AnalysisError::Classifier(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = self.0.to_string();
        if status.is_server_error() {
            error!("Request failed: {}", error_message);
        }

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
