//! Sample Storage Port - 出站端口
//!
//! 定义上传样本和生成产物的文件存储抽象

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::callout::ArtifactName;
use crate::domain::profile::ProfileId;

/// 存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Sample Storage Port - 出站端口
///
/// 管理两个目录：上传样本目录与生成产物目录
#[async_trait]
pub trait SampleStoragePort: Send + Sync {
    /// 获取样本文件路径
    fn sample_path(&self, profile_id: ProfileId) -> PathBuf;

    /// 获取产物文件路径（始终位于产物目录内）
    fn artifact_path(&self, name: &ArtifactName) -> PathBuf;

    /// 保存上传的样本
    async fn save_sample(&self, profile_id: ProfileId, data: &[u8])
        -> Result<PathBuf, StorageError>;

    /// 删除样本（档案登记失败时清理）
    async fn remove_sample(&self, profile_id: ProfileId) -> Result<(), StorageError>;

    /// 打开产物文件，返回文件句柄与大小
    async fn open_artifact(
        &self,
        name: &ArtifactName,
    ) -> Result<(tokio::fs::File, u64), StorageError>;

    /// 检查产物是否存在
    async fn artifact_exists(&self, name: &ArtifactName) -> bool;
}
