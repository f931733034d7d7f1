//! Voice Command Handlers

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::application::commands::UploadVoice;
use crate::application::error::ApplicationError;
use crate::application::registry::VoiceProfileRegistry;
use crate::domain::profile::ProfileId;

/// 上传音色响应
#[derive(Debug, Clone)]
pub struct UploadVoiceResponse {
    pub profile_id: ProfileId,
    pub sample_duration_seconds: f64,
    pub created_at: DateTime<Utc>,
}

/// UploadVoice Handler
pub struct UploadVoiceHandler {
    registry: Arc<VoiceProfileRegistry>,
}

impl UploadVoiceHandler {
    pub fn new(registry: Arc<VoiceProfileRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, command: UploadVoice) -> Result<UploadVoiceResponse, ApplicationError> {
        if command.sample.is_empty() {
            return Err(ApplicationError::validation("No audio file provided"));
        }

        let profile = self.registry.create(&command.sample).await?;

        Ok(UploadVoiceResponse {
            profile_id: profile.id(),
            sample_duration_seconds: profile.sample_duration().as_secs(),
            created_at: profile.created_at(),
        })
    }
}
