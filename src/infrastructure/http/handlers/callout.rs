//! Callout HTTP Handlers

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::application::{GenerateCallout, GetArtifact};
use crate::infrastructure::http::dto::{GenerateCalloutDto, GenerateCalloutRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 生成播报
pub async fn generate_callout(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateCalloutRequest>, JsonRejection>,
) -> Result<Json<GenerateCalloutDto>, ApiError> {
    let Json(req) =
        payload.map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e.body_text())))?;

    let command = GenerateCallout {
        profile_id: req.profile_id.unwrap_or_default(),
        message: req.message,
    };

    let result = state.generate_callout_handler.handle(command).await?;

    Ok(Json(GenerateCalloutDto::from(result)))
}

/// 下载生成产物（流式返回）
pub async fn download_artifact(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let artifact = state
        .get_artifact_handler
        .handle(GetArtifact { filename })
        .await?;

    let stream = ReaderStream::new(artifact.file);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, artifact.content_type)
        .header(header::CONTENT_LENGTH, artifact.size)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.name),
        )
        .body(Body::from_stream(stream))
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}
