//! Fake Synthesis Gateway - 用于测试的合成网关
//!
//! 不调用任何引擎，按配置的行为返回固定结果，并记录收到的文本

use async_trait::async_trait;
use std::path::Path;
use std::sync::Mutex;

use crate::application::ports::{SynthesisError, SynthesisGatewayPort, SynthesisOutcome};

/// Fake 网关行为
#[derive(Debug, Clone)]
pub enum FakeBehavior {
    /// 写入固定音频，返回 Completed
    Audio(Vec<u8>),
    /// 复制样本，返回 Degraded
    Degrade,
    /// 返回 SynthesisError::Failed
    Fail(String),
    /// 返回 SynthesisError::Configuration
    Unconfigured,
}

/// Fake Synthesis Gateway
pub struct FakeSynthesisGateway {
    behavior: FakeBehavior,
    texts: Mutex<Vec<String>>,
}

impl FakeSynthesisGateway {
    pub fn new(behavior: FakeBehavior) -> Self {
        Self {
            behavior,
            texts: Mutex::new(Vec::new()),
        }
    }

    /// 按调用顺序返回收到的文本
    pub fn received_texts(&self) -> Vec<String> {
        self.texts
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SynthesisGatewayPort for FakeSynthesisGateway {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn output_extension(&self) -> &'static str {
        "wav"
    }

    async fn synthesize(
        &self,
        sample: &Path,
        text: &str,
        output: &Path,
    ) -> Result<SynthesisOutcome, SynthesisError> {
        tracing::debug!(
            text_len = text.len(),
            sample = %sample.display(),
            "FakeSynthesisGateway: returning scripted result"
        );

        if let Ok(mut texts) = self.texts.lock() {
            texts.push(text.to_string());
        }

        match &self.behavior {
            FakeBehavior::Audio(data) => {
                tokio::fs::write(output, data)
                    .await
                    .map_err(|e| SynthesisError::Io(e.to_string()))?;
                Ok(SynthesisOutcome::Completed)
            }
            FakeBehavior::Degrade => {
                tokio::fs::copy(sample, output)
                    .await
                    .map_err(|e| SynthesisError::Io(e.to_string()))?;
                Ok(SynthesisOutcome::Degraded {
                    reason: "fake engine unavailable".to_string(),
                })
            }
            FakeBehavior::Fail(msg) => Err(SynthesisError::Failed(msg.clone())),
            FakeBehavior::Unconfigured => Err(SynthesisError::Configuration(
                "fake engine has no credential".to_string(),
            )),
        }
    }
}
