//! HTTP Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式 `{"error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    PayloadTooLarge(String),
    Internal(String),
    GatewayTimeout(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(status = status.as_u16(), error = %msg, "Bad request");
                msg
            }
            ApiError::NotFound(msg) => {
                tracing::warn!(status = status.as_u16(), error = %msg, "Resource not found");
                msg
            }
            ApiError::PayloadTooLarge(msg) => {
                tracing::warn!(status = status.as_u16(), error = %msg, "Upload rejected");
                msg
            }
            ApiError::Internal(msg) => {
                tracing::error!(status = status.as_u16(), error = %msg, "Internal server error");
                msg
            }
            ApiError::GatewayTimeout(msg) => {
                tracing::error!(status = status.as_u16(), error = %msg, "Synthesis timed out");
                msg
            }
        };

        (status, Json(ErrorResponse::new(msg))).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            ApplicationError::Timeout(_) => ApiError::GatewayTimeout(e.to_string()),
            ApplicationError::ConfigurationError(_)
            | ApplicationError::StorageError(_)
            | ApplicationError::UpstreamError(_)
            | ApplicationError::SynthesisError(_)
            | ApplicationError::InternalError(_) => ApiError::Internal(e.to_string()),
        }
    }
}
