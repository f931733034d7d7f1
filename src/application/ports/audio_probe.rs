//! Audio Probe Port - 音频时长探测

use async_trait::async_trait;
use std::path::Path;

use crate::domain::profile::SampleDuration;

/// Audio Probe Port
///
/// 结果仅供参考：任何失败都返回 `SampleDuration::UNKNOWN`
#[async_trait]
pub trait AudioProbePort: Send + Sync {
    async fn duration(&self, path: &Path) -> SampleDuration;
}
