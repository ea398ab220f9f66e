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
use tracing::{error, warn};
use validator::ValidationErrors;

use crate::domain::repositories::RepositoryError;
use crate::domain::services::ServiceError;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，提供统一的错误处理接口
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    /// 错误对应的 HTTP 状态码
    pub fn status(&self) -> StatusCode {
        if self.0.downcast_ref::<ValidationErrors>().is_some() {
            return StatusCode::BAD_REQUEST;
        }

        match self.0.downcast_ref::<ServiceError>() {
            Some(ServiceError::Validation(_)) => StatusCode::BAD_REQUEST,
            Some(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            Some(ServiceError::SessionUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Some(ServiceError::Upstream(_)) => StatusCode::BAD_GATEWAY,
            Some(ServiceError::Repository(RepositoryError::Database(_))) | None => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = self.0.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %error_message, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %error_message, "Request rejected");
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
