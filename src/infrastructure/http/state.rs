//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    GenerateCalloutHandler, UploadVoiceHandler,
    // Query handlers
    GetArtifactHandler, GetProfileHandler,
    // Ports
    SampleStoragePort, SynthesisGatewayPort, VoiceProfileRegistry,
};

/// 应用状态
pub struct AppState {
    // ========== Core ==========
    pub registry: Arc<VoiceProfileRegistry>,
    pub gateway: Arc<dyn SynthesisGatewayPort>,

    // ========== Command Handlers ==========
    pub upload_voice_handler: UploadVoiceHandler,
    pub generate_callout_handler: GenerateCalloutHandler,

    // ========== Query Handlers ==========
    pub get_artifact_handler: GetArtifactHandler,
    pub get_profile_handler: GetProfileHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        registry: Arc<VoiceProfileRegistry>,
        storage: Arc<dyn SampleStoragePort>,
        gateway: Arc<dyn SynthesisGatewayPort>,
    ) -> Self {
        Self {
            registry: registry.clone(),
            gateway: gateway.clone(),

            // Command handlers
            upload_voice_handler: UploadVoiceHandler::new(registry.clone()),
            generate_callout_handler: GenerateCalloutHandler::new(
                registry.clone(),
                gateway,
                storage.clone(),
            ),

            // Query handlers
            get_artifact_handler: GetArtifactHandler::new(storage),
            get_profile_handler: GetProfileHandler::new(registry),
        }
    }
}
