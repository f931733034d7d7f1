//! File Storage - 文件系统样本/产物存储实现
//!
//! 实现 SampleStoragePort trait

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{SampleStoragePort, StorageError};
use crate::domain::callout::ArtifactName;
use crate::domain::profile::ProfileId;

/// 文件系统存储
///
/// 样本：`{uploads_dir}/voice_sample_{profile_id}.wav`
/// 产物：`{generated_dir}/{artifact_name}`
pub struct FileSampleStorage {
    uploads_dir: PathBuf,
    generated_dir: PathBuf,
}

impl FileSampleStorage {
    /// 创建新的文件存储
    pub async fn new(
        uploads_dir: impl AsRef<Path>,
        generated_dir: impl AsRef<Path>,
    ) -> Result<Self, StorageError> {
        let uploads_dir = uploads_dir.as_ref().to_path_buf();
        let generated_dir = generated_dir.as_ref().to_path_buf();

        // 确保目录存在
        for dir in [&uploads_dir, &generated_dir] {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| StorageError::IoError(format!("{}: {}", dir.display(), e)))?;
        }

        Ok(Self {
            uploads_dir,
            generated_dir,
        })
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    pub fn generated_dir(&self) -> &Path {
        &self.generated_dir
    }
}

#[async_trait]
impl SampleStoragePort for FileSampleStorage {
    fn sample_path(&self, profile_id: ProfileId) -> PathBuf {
        self.uploads_dir
            .join(format!("voice_sample_{}.wav", profile_id))
    }

    fn artifact_path(&self, name: &ArtifactName) -> PathBuf {
        name.resolve_in(&self.generated_dir)
    }

    async fn save_sample(
        &self,
        profile_id: ProfileId,
        data: &[u8],
    ) -> Result<PathBuf, StorageError> {
        let sample_path = self.sample_path(profile_id);

        fs::write(&sample_path, data)
            .await
            .map_err(|e| StorageError::IoError(format!("{}: {}", sample_path.display(), e)))?;

        tracing::debug!(
            "Saved voice sample: profile={}, size={} bytes",
            profile_id,
            data.len()
        );

        Ok(sample_path)
    }

    async fn remove_sample(&self, profile_id: ProfileId) -> Result<(), StorageError> {
        let sample_path = self.sample_path(profile_id);

        match fs::remove_file(&sample_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::IoError(format!("{}: {}", sample_path.display(), e))),
        }
    }

    async fn open_artifact(
        &self,
        name: &ArtifactName,
    ) -> Result<(fs::File, u64), StorageError> {
        let path = self.artifact_path(name);

        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::FileNotFound(name.to_string()));
            }
            Err(e) => return Err(StorageError::IoError(e.to_string())),
        };

        let metadata = file
            .metadata()
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;
        if !metadata.is_file() {
            return Err(StorageError::FileNotFound(name.to_string()));
        }

        Ok((file, metadata.len()))
    }

    async fn artifact_exists(&self, name: &ArtifactName) -> bool {
        fs::metadata(self.artifact_path(name))
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_sample() {
        let temp_dir = tempdir().unwrap();
        let storage = FileSampleStorage::new(
            temp_dir.path().join("uploads"),
            temp_dir.path().join("generated"),
        )
        .await
        .unwrap();

        let profile_id = ProfileId::new();
        let path = storage.save_sample(profile_id, b"fake wav data").await.unwrap();

        assert!(path.starts_with(storage.uploads_dir()));
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            format!("voice_sample_{}.wav", profile_id)
        );
        assert_eq!(std::fs::read(&path).unwrap(), b"fake wav data");
    }

    #[tokio::test]
    async fn test_remove_sample() {
        let temp_dir = tempdir().unwrap();
        let storage = FileSampleStorage::new(
            temp_dir.path().join("uploads"),
            temp_dir.path().join("generated"),
        )
        .await
        .unwrap();

        let profile_id = ProfileId::new();
        let path = storage.save_sample(profile_id, b"data").await.unwrap();
        storage.remove_sample(profile_id).await.unwrap();
        assert!(!path.exists());

        // 重复删除不是错误
        storage.remove_sample(profile_id).await.unwrap();
    }

    #[tokio::test]
    async fn test_open_artifact() {
        let temp_dir = tempdir().unwrap();
        let storage = FileSampleStorage::new(
            temp_dir.path().join("uploads"),
            temp_dir.path().join("generated"),
        )
        .await
        .unwrap();

        let name = ArtifactName::fresh(ProfileId::new(), "wav");
        assert!(!storage.artifact_exists(&name).await);
        assert!(matches!(
            storage.open_artifact(&name).await,
            Err(StorageError::FileNotFound(_))
        ));

        std::fs::write(storage.artifact_path(&name), b"1234").unwrap();
        assert!(storage.artifact_exists(&name).await);
        let (_file, size) = storage.open_artifact(&name).await.unwrap();
        assert_eq!(size, 4);
    }
}
