//! Profile Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::queries::GetProfile;
use crate::application::registry::VoiceProfileRegistry;
use crate::domain::profile::{ProfileError, VoiceProfile};

/// 档案详情响应
#[derive(Debug, Clone)]
pub struct ProfileResponse {
    pub profile_id: String,
    pub sample_duration_seconds: f64,
    pub created_at: String,
}

impl From<VoiceProfile> for ProfileResponse {
    fn from(profile: VoiceProfile) -> Self {
        Self {
            profile_id: profile.id().to_string(),
            sample_duration_seconds: profile.sample_duration().as_secs(),
            created_at: profile.created_at().to_rfc3339(),
        }
    }
}

/// GetProfile Handler
pub struct GetProfileHandler {
    registry: Arc<VoiceProfileRegistry>,
}

impl GetProfileHandler {
    pub fn new(registry: Arc<VoiceProfileRegistry>) -> Self {
        Self { registry }
    }

    pub fn handle(&self, query: GetProfile) -> Result<ProfileResponse, ApplicationError> {
        self.registry
            .lookup(&query.profile_id)
            .map(ProfileResponse::from)
            .map_err(|e| match e {
                ProfileError::NotFound(id) => ApplicationError::not_found("Voice profile", id),
                other => other.into(),
            })
    }
}
