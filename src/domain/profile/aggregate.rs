//! Profile Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ProfileId, SampleDuration, SampleLocation};

/// VoiceProfile 聚合根
///
/// 不变量:
/// - 创建后 id、样本位置、创建时间均不可变
/// - 没有更新或删除操作，只能创建后多次读取
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceProfile {
    id: ProfileId,
    sample_location: SampleLocation,
    created_at: DateTime<Utc>,
    sample_duration: SampleDuration,
}

impl VoiceProfile {
    /// 创建新档案
    pub fn new(id: ProfileId, sample_location: SampleLocation, sample_duration: SampleDuration) -> Self {
        Self {
            id,
            sample_location,
            created_at: Utc::now(),
            sample_duration,
        }
    }

    // Getters
    pub fn id(&self) -> ProfileId {
        self.id
    }

    pub fn sample_location(&self) -> &SampleLocation {
        &self.sample_location
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn sample_duration(&self) -> SampleDuration {
        self.sample_duration
    }
}
