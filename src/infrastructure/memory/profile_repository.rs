//! In-Memory Profile Repository Implementation

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::application::ports::{ProfileRepositoryPort, RepositoryError};
use crate::domain::profile::{ProfileId, VoiceProfile};

/// 内存档案表
///
/// 进程退出即丢失，没有淘汰策略
pub struct InMemoryProfileRepository {
    profiles: DashMap<ProfileId, VoiceProfile>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self {
            profiles: DashMap::new(),
        }
    }
}

impl Default for InMemoryProfileRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileRepositoryPort for InMemoryProfileRepository {
    fn insert(&self, profile: VoiceProfile) -> Result<(), RepositoryError> {
        match self.profiles.entry(profile.id()) {
            Entry::Occupied(_) => Err(RepositoryError::Duplicate(profile.id())),
            Entry::Vacant(slot) => {
                tracing::debug!(profile_id = %profile.id(), "Profile stored");
                slot.insert(profile);
                Ok(())
            }
        }
    }

    fn find_by_id(&self, id: &ProfileId) -> Option<VoiceProfile> {
        self.profiles.get(id).map(|p| p.clone())
    }

    fn count(&self) -> usize {
        self.profiles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{SampleDuration, SampleLocation};

    fn profile(dir: &std::path::Path, id: ProfileId) -> VoiceProfile {
        let path = dir.join(format!("{}.wav", id));
        std::fs::write(&path, b"RIFF").unwrap();
        VoiceProfile::new(
            id,
            SampleLocation::existing(path).unwrap(),
            SampleDuration::UNKNOWN,
        )
    }

    #[test]
    fn test_profile_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let repo = InMemoryProfileRepository::new();
        let id = ProfileId::new();

        // Insert
        assert!(repo.insert(profile(dir.path(), id)).is_ok());
        assert_eq!(repo.count(), 1);

        // Find
        let found = repo.find_by_id(&id).unwrap();
        assert_eq!(found.id(), id);
        assert!(repo.find_by_id(&ProfileId::new()).is_none());

        // Duplicate id
        assert!(matches!(
            repo.insert(profile(dir.path(), id)),
            Err(RepositoryError::Duplicate(_))
        ));
        assert_eq!(repo.count(), 1);
    }
}
