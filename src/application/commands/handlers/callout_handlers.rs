//! Callout Command Handlers

use std::sync::Arc;

use crate::application::commands::GenerateCallout;
use crate::application::error::ApplicationError;
use crate::application::ports::{SampleStoragePort, SynthesisGatewayPort, SynthesisOutcome};
use crate::application::registry::VoiceProfileRegistry;
use crate::domain::callout::{ArtifactName, CalloutText, GenerationState};
use crate::domain::profile::ProfileId;

/// 生成播报响应
#[derive(Debug, Clone)]
pub struct GenerateCalloutResponse {
    pub profile_id: ProfileId,
    pub artifact: ArtifactName,
    /// Completed 或 Degraded
    pub state: GenerationState,
    pub degraded_reason: Option<String>,
}

impl GenerateCalloutResponse {
    pub fn is_degraded(&self) -> bool {
        self.state == GenerationState::Degraded
    }
}

/// GenerateCallout Handler
///
/// 查找档案 → 解析文本 → 分配新产物路径 → 调用合成网关。失败不重试。
pub struct GenerateCalloutHandler {
    registry: Arc<VoiceProfileRegistry>,
    gateway: Arc<dyn SynthesisGatewayPort>,
    storage: Arc<dyn SampleStoragePort>,
}

impl GenerateCalloutHandler {
    pub fn new(
        registry: Arc<VoiceProfileRegistry>,
        gateway: Arc<dyn SynthesisGatewayPort>,
        storage: Arc<dyn SampleStoragePort>,
    ) -> Self {
        Self {
            registry,
            gateway,
            storage,
        }
    }

    pub async fn handle(
        &self,
        command: GenerateCallout,
    ) -> Result<GenerateCalloutResponse, ApplicationError> {
        let mut state = GenerationState::Received;

        match self.execute(&mut state, command).await {
            Ok(response) => Ok(response),
            Err(err) => {
                let from = state;
                // 终态下的失败只可能来自状态机本身
                if let Err(e) = state.advance(GenerationState::Failed) {
                    tracing::debug!(error = %e, "Failed state not recorded");
                }
                if err.is_client_error() {
                    tracing::warn!(from = %from, state = %state, error = %err, "Callout rejected");
                } else {
                    tracing::error!(from = %from, state = %state, error = %err, "Callout generation failed");
                }
                Err(err)
            }
        }
    }

    async fn execute(
        &self,
        state: &mut GenerationState,
        command: GenerateCallout,
    ) -> Result<GenerateCalloutResponse, ApplicationError> {
        let profile = self.registry.lookup(&command.profile_id)?;
        let text = CalloutText::resolve(command.message.as_deref())?;
        state.advance(GenerationState::Validated)?;

        let artifact = ArtifactName::fresh(profile.id(), self.gateway.output_extension());
        let output = self.storage.artifact_path(&artifact);

        state.advance(GenerationState::Synthesizing)?;
        tracing::info!(
            profile_id = %profile.id(),
            artifact = %artifact,
            engine = self.gateway.name(),
            default_text = text.is_default(),
            text_len = text.as_str().len(),
            "Synthesizing callout"
        );

        let outcome = match self
            .gateway
            .synthesize(profile.sample_location().path(), text.as_str(), &output)
            .await
        {
            Ok(outcome) => outcome,
            Err(err) => {
                // 清理可能残留的半成品
                if self.storage.artifact_exists(&artifact).await {
                    let _ = tokio::fs::remove_file(&output).await;
                }
                return Err(err.into());
            }
        };

        if !self.storage.artifact_exists(&artifact).await {
            return Err(ApplicationError::SynthesisError(format!(
                "{} reported success but produced no file",
                self.gateway.name()
            )));
        }

        let degraded_reason = match outcome {
            SynthesisOutcome::Completed => {
                state.advance(GenerationState::Completed)?;
                None
            }
            SynthesisOutcome::Degraded { reason } => {
                state.advance(GenerationState::Degraded)?;
                tracing::warn!(
                    profile_id = %profile.id(),
                    artifact = %artifact,
                    reason = %reason,
                    "Callout degraded to voice sample copy"
                );
                Some(reason)
            }
        };

        tracing::info!(
            profile_id = %profile.id(),
            artifact = %artifact,
            state = %state,
            "Callout generated"
        );

        Ok(GenerateCalloutResponse {
            profile_id: profile.id(),
            artifact,
            state: *state,
            degraded_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::callout::DEFAULT_CALLOUT_MESSAGE;
    use crate::infrastructure::adapters::{
        FakeBehavior, FakeSynthesisGateway, FileSampleStorage, SymphoniaProbe,
    };
    use crate::infrastructure::memory::InMemoryProfileRepository;

    struct Fixture {
        _dir: tempfile::TempDir,
        registry: Arc<VoiceProfileRegistry>,
        storage: Arc<FileSampleStorage>,
        gateway: Arc<FakeSynthesisGateway>,
    }

    impl Fixture {
        async fn new(behavior: FakeBehavior) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let storage = Arc::new(
                FileSampleStorage::new(dir.path().join("uploads"), dir.path().join("generated"))
                    .await
                    .unwrap(),
            );
            let registry = Arc::new(VoiceProfileRegistry::new(
                Arc::new(InMemoryProfileRepository::new()),
                storage.clone(),
                Arc::new(SymphoniaProbe::new()),
            ));
            Self {
                _dir: dir,
                registry,
                storage,
                gateway: Arc::new(FakeSynthesisGateway::new(behavior)),
            }
        }

        fn handler(&self) -> GenerateCalloutHandler {
            GenerateCalloutHandler::new(
                self.registry.clone(),
                self.gateway.clone(),
                self.storage.clone(),
            )
        }

        fn generated_count(&self) -> usize {
            std::fs::read_dir(self.storage.generated_dir()).unwrap().count()
        }
    }

    #[tokio::test]
    async fn test_default_text_when_message_missing() {
        let fx = Fixture::new(FakeBehavior::Audio(b"RIFFfake".to_vec())).await;
        let profile = fx.registry.create(b"sample").await.unwrap();

        for message in [None, Some(String::new())] {
            let resp = fx
                .handler()
                .handle(GenerateCallout {
                    profile_id: profile.id().to_string(),
                    message,
                })
                .await
                .unwrap();
            assert_eq!(resp.state, GenerationState::Completed);
        }

        let texts = fx.gateway.received_texts();
        assert_eq!(texts, vec![DEFAULT_CALLOUT_MESSAGE, DEFAULT_CALLOUT_MESSAGE]);
    }

    #[tokio::test]
    async fn test_explicit_message_used_verbatim() {
        let fx = Fixture::new(FakeBehavior::Audio(b"RIFFfake".to_vec())).await;
        let profile = fx.registry.create(b"sample").await.unwrap();

        let resp = fx
            .handler()
            .handle(GenerateCallout {
                profile_id: profile.id().to_string(),
                message: Some("Testing".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(fx.gateway.received_texts(), vec!["Testing"]);
        assert!(fx.storage.artifact_exists(&resp.artifact).await);
        assert!(resp.artifact.as_str().ends_with(".wav"));
    }

    #[tokio::test]
    async fn test_unknown_profile_creates_no_file() {
        let fx = Fixture::new(FakeBehavior::Audio(b"RIFFfake".to_vec())).await;

        let err = fx
            .handler()
            .handle(GenerateCallout {
                profile_id: ProfileId::new().to_string(),
                message: None,
            })
            .await
            .unwrap_err();

        assert!(err.is_client_error());
        assert_eq!(fx.generated_count(), 0);
        assert!(fx.gateway.received_texts().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_generations_get_distinct_artifacts() {
        let fx = Fixture::new(FakeBehavior::Audio(b"RIFFfake".to_vec())).await;
        let profile = fx.registry.create(b"sample").await.unwrap();
        let handler = Arc::new(fx.handler());

        let spawn = |handler: Arc<GenerateCalloutHandler>| {
            let profile_id = profile.id().to_string();
            tokio::spawn(async move {
                handler
                    .handle(GenerateCallout {
                        profile_id,
                        message: Some("same".to_string()),
                    })
                    .await
            })
        };

        let a = spawn(handler.clone());
        let b = spawn(handler.clone());
        let a = a.await.unwrap().unwrap();
        let b = b.await.unwrap().unwrap();

        assert_ne!(a.artifact, b.artifact);
        assert_eq!(fx.generated_count(), 2);
    }

    #[tokio::test]
    async fn test_degraded_outcome_is_tagged() {
        let fx = Fixture::new(FakeBehavior::Degrade).await;
        let profile = fx.registry.create(b"sample bytes").await.unwrap();

        let resp = fx
            .handler()
            .handle(GenerateCallout {
                profile_id: profile.id().to_string(),
                message: None,
            })
            .await
            .unwrap();

        assert!(resp.is_degraded());
        assert!(resp.degraded_reason.is_some());
        let copied = tokio::fs::read(fx.storage.artifact_path(&resp.artifact))
            .await
            .unwrap();
        assert_eq!(copied, b"sample bytes");
    }

    #[tokio::test]
    async fn test_gateway_failure_is_server_error_and_cleans_up() {
        let fx = Fixture::new(FakeBehavior::Fail("engine down".to_string())).await;
        let profile = fx.registry.create(b"sample").await.unwrap();

        let err = fx
            .handler()
            .handle(GenerateCallout {
                profile_id: profile.id().to_string(),
                message: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::SynthesisError(_)));
        assert_eq!(fx.generated_count(), 0);
    }
}
