//! Synthesis Gateway Port - 声音克隆引擎抽象
//!
//! 定义语音合成的抽象接口，具体实现（远程 API / 本地模型）在 infrastructure/adapters 层

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// 合成错误
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// 缺少必需的配置（如 API 凭证）
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// 远程服务返回非成功状态
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// 本地模型失败
    #[error("Synthesis failed: {0}")]
    Failed(String),

    #[error("Synthesis timed out after {0}s")]
    Timeout(u64),

    /// 写出产物失败
    #[error("IO error: {0}")]
    Io(String),
}

/// 一次合成的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisOutcome {
    /// 真实合成成功
    Completed,
    /// 合成失败，产物为原始样本的副本
    Degraded { reason: String },
}

impl SynthesisOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// Synthesis Gateway Port
///
/// 每个进程启动时选定一个实现。调用方必须为每次请求提供全新的 `output`，
/// 同一输出路径上的并发调用没有任何保证。
#[async_trait]
pub trait SynthesisGatewayPort: Send + Sync {
    /// 引擎名称（用于日志和健康检查）
    fn name(&self) -> &'static str;

    /// 产物文件扩展名
    fn output_extension(&self) -> &'static str;

    /// 以 `sample` 为说话人条件合成 `text`，写入 `output`
    async fn synthesize(
        &self,
        sample: &Path,
        text: &str,
        output: &Path,
    ) -> Result<SynthesisOutcome, SynthesisError>;
}
