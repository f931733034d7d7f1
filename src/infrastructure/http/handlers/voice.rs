//! Voice HTTP Handlers

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, Path, State,
    },
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::{GetProfile, UploadVoice};
use crate::infrastructure::http::dto::{ProfileDto, UploadVoiceDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 上传音色样本（multipart 字段 `audio`）
pub async fn upload_voice(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadVoiceDto>, ApiError> {
    let mut multipart = multipart
        .map_err(|e| ApiError::BadRequest(format!("Expected multipart form data: {}", e)))?;

    let mut audio_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to read multipart field", e))?
    {
        if field.name() != Some("audio") {
            continue;
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Failed to read audio", e))?;
        audio_data = Some(bytes.to_vec());
    }

    let audio_data = audio_data
        .filter(|d| !d.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No audio file provided".to_string()))?;

    let result = state
        .upload_voice_handler
        .handle(UploadVoice { sample: audio_data })
        .await?;

    tracing::info!(
        profile_id = %result.profile_id,
        duration_secs = result.sample_duration_seconds,
        "Voice uploaded"
    );

    Ok(Json(UploadVoiceDto::from(result)))
}

/// 超出 DefaultBodyLimit 时返回 413，其余读取错误为 400
fn multipart_error(context: &str, e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge("Audio file exceeds the maximum upload size".to_string())
    } else {
        ApiError::BadRequest(format!("{}: {}", context, e))
    }
}

/// 获取音色档案详情
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<String>,
) -> Result<Json<ProfileDto>, ApiError> {
    let result = state.get_profile_handler.handle(GetProfile { profile_id })?;
    Ok(Json(ProfileDto::from(result)))
}
