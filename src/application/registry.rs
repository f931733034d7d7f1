//! Voice Profile Registry
//!
//! 上传样本 → 档案标识 的映射。存储、时长探测与档案表均通过端口注入。

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{AudioProbePort, ProfileRepositoryPort, SampleStoragePort};
use crate::domain::profile::{ProfileError, ProfileId, SampleLocation, VoiceProfile};

/// 音色档案注册表
///
/// 生命周期只有 create-then-read-many，没有更新和删除
pub struct VoiceProfileRegistry {
    repo: Arc<dyn ProfileRepositoryPort>,
    storage: Arc<dyn SampleStoragePort>,
    probe: Arc<dyn AudioProbePort>,
}

impl VoiceProfileRegistry {
    pub fn new(
        repo: Arc<dyn ProfileRepositoryPort>,
        storage: Arc<dyn SampleStoragePort>,
        probe: Arc<dyn AudioProbePort>,
    ) -> Self {
        Self {
            repo,
            storage,
            probe,
        }
    }

    /// 保存样本并登记新档案
    pub async fn create(&self, sample: &[u8]) -> Result<VoiceProfile, ApplicationError> {
        let id = ProfileId::new();

        let path = self.storage.save_sample(id, sample).await?;
        let profile = match self.register(id, path).await {
            Ok(profile) => profile,
            Err(err) => {
                // 样本已落盘但没有档案指向它
                if let Err(e) = self.storage.remove_sample(id).await {
                    tracing::warn!(profile_id = %id, error = %e, "Failed to remove orphaned voice sample");
                }
                return Err(err);
            }
        };
        let duration = profile.sample_duration();

        tracing::info!(
            profile_id = %id,
            sample = %profile.sample_location().path().display(),
            duration_secs = duration.as_secs(),
            "Voice profile created"
        );

        Ok(profile)
    }

    async fn register(
        &self,
        id: ProfileId,
        path: PathBuf,
    ) -> Result<VoiceProfile, ApplicationError> {
        let location = SampleLocation::existing(path)?;
        let duration = self.probe.duration(location.path()).await;

        let profile = VoiceProfile::new(id, location, duration);
        self.repo.insert(profile.clone())?;
        Ok(profile)
    }

    /// 按 id 精确查找
    pub fn get(&self, id: &ProfileId) -> Result<VoiceProfile, ProfileError> {
        self.repo
            .find_by_id(id)
            .ok_or_else(|| ProfileError::NotFound(id.to_string()))
    }

    /// 按客户端提交的原始字符串查找；空串或格式错误同样返回 NotFound
    pub fn lookup(&self, raw_id: &str) -> Result<VoiceProfile, ProfileError> {
        let id = ProfileId::parse(raw_id)?;
        self.get(&id)
    }

    pub fn count(&self) -> usize {
        self.repo.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::RepositoryError;
    use crate::infrastructure::adapters::{FileSampleStorage, SymphoniaProbe};
    use crate::infrastructure::memory::InMemoryProfileRepository;

    async fn registry(dir: &std::path::Path) -> VoiceProfileRegistry {
        let storage = FileSampleStorage::new(dir.join("uploads"), dir.join("generated"))
            .await
            .unwrap();
        VoiceProfileRegistry::new(
            Arc::new(InMemoryProfileRepository::new()),
            Arc::new(storage),
            Arc::new(SymphoniaProbe::new()),
        )
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(dir.path()).await;

        let profile = registry.create(b"not really audio").await.unwrap();
        let found = registry.get(&profile.id()).unwrap();

        assert_eq!(found.id(), profile.id());
        assert!(found.sample_location().path().is_file());
        // 无法解码的样本时长为 0
        assert!(!found.sample_duration().is_known());
        assert_eq!(registry.count(), 1);
    }

    #[tokio::test]
    async fn test_lookup_unknown_empty_or_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(dir.path()).await;

        assert!(registry.lookup("").is_err());
        assert!(registry.lookup("garbage").is_err());
        assert!(registry.lookup(&ProfileId::new().to_string()).is_err());
        assert!(registry.get(&ProfileId::new()).is_err());
    }

    #[tokio::test]
    async fn test_concurrent_creates_keep_all_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let registry = Arc::new(registry(dir.path()).await);

        let mut handles = Vec::new();
        for i in 0..16u8 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move { registry.create(&[i; 8]).await }));
        }

        let mut ids = std::collections::HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap().unwrap().id());
        }

        assert_eq!(ids.len(), 16);
        assert_eq!(registry.count(), 16);
    }

    /// 拒绝所有插入的档案表
    struct RejectingRepository;

    impl ProfileRepositoryPort for RejectingRepository {
        fn insert(&self, profile: VoiceProfile) -> Result<(), RepositoryError> {
            Err(RepositoryError::Duplicate(profile.id()))
        }

        fn find_by_id(&self, _id: &ProfileId) -> Option<VoiceProfile> {
            None
        }

        fn count(&self) -> usize {
            0
        }
    }

    #[tokio::test]
    async fn test_failed_insert_removes_sample() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSampleStorage::new(dir.path().join("uploads"), dir.path().join("generated"))
            .await
            .unwrap();
        let registry = VoiceProfileRegistry::new(
            Arc::new(RejectingRepository),
            Arc::new(storage),
            Arc::new(SymphoniaProbe::new()),
        );

        let err = registry.create(b"sample").await.unwrap_err();
        assert!(matches!(err, ApplicationError::InternalError(_)));
        assert_eq!(std::fs::read_dir(dir.path().join("uploads")).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(dir.path()).await;
        std::fs::remove_dir_all(dir.path().join("uploads")).unwrap();
        std::fs::write(dir.path().join("uploads"), b"now a file").unwrap();

        let err = registry.create(b"data").await.unwrap_err();
        assert!(matches!(err, ApplicationError::StorageError(_)));
        assert_eq!(registry.count(), 0);
    }
}
