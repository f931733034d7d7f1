//! Profile Repository Port - 音色档案存储抽象
//!
//! 当前实现为进程内内存映射，后续可替换为持久化存储

use thiserror::Error;

use crate::domain::profile::{ProfileId, VoiceProfile};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Profile already exists: {0}")]
    Duplicate(ProfileId),
}

/// Profile Repository Port
///
/// 只支持插入和按 id 精确查找；并发插入必须保持映射一致
pub trait ProfileRepositoryPort: Send + Sync {
    /// 插入新档案，id 冲突时失败
    fn insert(&self, profile: VoiceProfile) -> Result<(), RepositoryError>;

    /// 按 id 查找
    fn find_by_id(&self, id: &ProfileId) -> Option<VoiceProfile>;

    /// 档案数量
    fn count(&self) -> usize;
}
