//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{GenerateCalloutResponse, ProfileResponse, UploadVoiceResponse};

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct UploadVoiceDto {
    pub success: bool,
    pub profile_id: String,
    pub message: String,
    pub sample_duration_seconds: f64,
}

impl From<UploadVoiceResponse> for UploadVoiceDto {
    fn from(resp: UploadVoiceResponse) -> Self {
        Self {
            success: true,
            profile_id: resp.profile_id.to_string(),
            message: "Voice sample uploaded successfully".to_string(),
            sample_duration_seconds: resp.sample_duration_seconds,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileDto {
    pub profile_id: String,
    pub sample_duration_seconds: f64,
    pub created_at: String,
}

impl From<ProfileResponse> for ProfileDto {
    fn from(resp: ProfileResponse) -> Self {
        Self {
            profile_id: resp.profile_id,
            sample_duration_seconds: resp.sample_duration_seconds,
            created_at: resp.created_at,
        }
    }
}

// ============================================================================
// Callout DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateCalloutRequest {
    #[serde(default)]
    pub profile_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateCalloutDto {
    pub success: bool,
    pub audio_url: String,
    pub message: String,
    /// "completed" 或 "degraded"
    pub status: String,
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded_reason: Option<String>,
}

impl From<GenerateCalloutResponse> for GenerateCalloutDto {
    fn from(resp: GenerateCalloutResponse) -> Self {
        let degraded = resp.is_degraded();
        let message = if degraded {
            "Voice synthesis unavailable; returned the original voice sample instead"
        } else {
            "Callout message generated successfully"
        };
        Self {
            success: true,
            audio_url: resp.artifact.download_url(),
            message: message.to_string(),
            status: resp.state.to_string(),
            degraded,
            degraded_reason: resp.degraded_reason,
        }
    }
}
