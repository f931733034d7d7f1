//! Local Model Gateway - 调用本地说话人条件 TTS 模型
//!
//! 以子进程方式运行本地 TTS 命令（默认 Coqui `tts` + XTTS v2）:
//! `tts --model_name M --text=T --speaker_wav S --language_idx L --out_path O`
//!
//! 模型自身失败时可选择回退：复制原始样本作为占位产物，并以 Degraded 明确标记。
//! 超时不触发回退。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::application::ports::{SynthesisError, SynthesisGatewayPort, SynthesisOutcome};

/// 本地网关配置
#[derive(Debug, Clone)]
pub struct LocalModelGatewayConfig {
    /// TTS 可执行文件
    pub program: PathBuf,
    /// 置于模型参数之前的额外参数（如 `-m TTS.bin.synthesize`）
    pub args: Vec<String>,
    /// 模型名称
    pub model: String,
    pub language: String,
    /// 超时时间（秒）
    pub timeout_secs: u64,
    /// 模型失败时是否回退为样本副本
    pub fallback_to_sample: bool,
}

impl Default for LocalModelGatewayConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("tts"),
            args: Vec::new(),
            model: "tts_models/multilingual/multi-dataset/xtts_v2".to_string(),
            language: "en".to_string(),
            timeout_secs: 120,
            fallback_to_sample: true,
        }
    }
}

/// 本地模型网关
pub struct LocalModelGateway {
    config: LocalModelGatewayConfig,
}

impl LocalModelGateway {
    pub fn new(config: LocalModelGatewayConfig) -> Self {
        Self { config }
    }

    fn command(&self, sample: &Path, text: &str, output: &Path) -> Command {
        let mut cmd = Command::new(&self.config.program);
        cmd.args(&self.config.args)
            .arg("--model_name")
            .arg(&self.config.model)
            // 合并为单个参数，以 `-` 开头的文本不会被当作选项
            .arg(format!("--text={}", text))
            .arg("--speaker_wav")
            .arg(sample)
            .arg("--language_idx")
            .arg(&self.config.language)
            .arg("--out_path")
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    /// 运行模型；Err 仅表示模型自身失败
    async fn run_model(&self, sample: &Path, text: &str, output: &Path) -> Result<(), String> {
        let child = self
            .command(sample, text, output)
            .spawn()
            .map_err(|e| format!("Failed to spawn {}: {}", self.config.program.display(), e))?;

        let result = child
            .wait_with_output()
            .await
            .map_err(|e| format!("Failed to wait for model process: {}", e))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let lines: Vec<&str> = stderr.lines().collect();
            let tail = lines[lines.len().saturating_sub(3)..].join(" | ");
            return Err(format!("Model exited with {}: {}", result.status, tail));
        }

        match tokio::fs::metadata(output).await {
            Ok(m) if m.len() > 0 => Ok(()),
            _ => Err("Model produced no output".to_string()),
        }
    }
}

#[async_trait]
impl SynthesisGatewayPort for LocalModelGateway {
    fn name(&self) -> &'static str {
        "local"
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
        let timeout = Duration::from_secs(self.config.timeout_secs);

        // 超时后 future 被丢弃，kill_on_drop 负责结束子进程
        let reason = match tokio::time::timeout(timeout, self.run_model(sample, text, output)).await
        {
            Err(_) => {
                let _ = tokio::fs::remove_file(output).await;
                return Err(SynthesisError::Timeout(self.config.timeout_secs));
            }
            Ok(Ok(())) => {
                tracing::info!(output = %output.display(), "Local synthesis completed");
                return Ok(SynthesisOutcome::Completed);
            }
            Ok(Err(reason)) => reason,
        };

        if !self.config.fallback_to_sample {
            return Err(SynthesisError::Failed(reason));
        }

        tracing::warn!(
            error = %reason,
            sample = %sample.display(),
            "Local synthesis failed, falling back to voice sample copy"
        );

        match tokio::fs::copy(sample, output).await {
            Ok(_) => Ok(SynthesisOutcome::Degraded { reason }),
            Err(e) => Err(SynthesisError::Failed(format!(
                "{} (fallback copy failed: {})",
                reason, e
            ))),
        }
    }
}
