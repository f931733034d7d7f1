//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{RepositoryError, StorageError, SynthesisError};
use crate::domain::callout::CalloutError;
use crate::domain::profile::ProfileError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 客户端输入错误（缺失字段、未知档案、非法文件名）
    #[error("{0}")]
    ValidationError(String),

    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 缺少必需配置
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// 文件系统写入失败
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 远程合成服务错误
    #[error("Upstream error: {0}")]
    UpstreamError(String),

    /// 本地合成失败
    #[error("Synthesis error: {0}")]
    SynthesisError(String),

    /// 合成超时
    #[error("Synthesis timed out after {0}s")]
    Timeout(u64),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 是否为客户端错误
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::NotFound { .. })
    }
}

impl From<SynthesisError> for ApplicationError {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::Configuration(msg) => Self::ConfigurationError(msg),
            SynthesisError::Upstream(msg) => Self::UpstreamError(msg),
            SynthesisError::Failed(msg) => Self::SynthesisError(msg),
            SynthesisError::Timeout(secs) => Self::Timeout(secs),
            SynthesisError::Io(msg) => Self::StorageError(msg),
        }
    }
}

impl From<StorageError> for ApplicationError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::FileNotFound(name) => Self::not_found("File", name),
            StorageError::IoError(msg) => Self::StorageError(msg),
        }
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<ProfileError> for ApplicationError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::NotFound(_) => Self::validation("Invalid profile ID"),
            ProfileError::MissingSample(path) => {
                Self::StorageError(format!("Voice sample missing after write: {}", path))
            }
        }
    }
}

impl From<CalloutError> for ApplicationError {
    fn from(err: CalloutError) -> Self {
        match err {
            CalloutError::InvalidTransition { .. } => Self::InternalError(err.to_string()),
            other => Self::ValidationError(other.to_string()),
        }
    }
}
