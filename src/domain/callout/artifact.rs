//! 生成产物文件名

use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

use super::CalloutError;
use crate::domain::profile::ProfileId;

/// 产物文件名
///
/// 不变量:
/// - 只有一个普通路径分量，不含分隔符、`..` 或 NUL
/// - 解析结果总在产物目录之内
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactName(String);

impl ArtifactName {
    /// 为一次生成请求分配新文件名：`callout_{profile_id}_{uuid}.{ext}`
    pub fn fresh(profile_id: ProfileId, extension: &str) -> Self {
        Self(format!(
            "callout_{}_{}.{}",
            profile_id,
            Uuid::new_v4(),
            extension
        ))
    }

    /// 校验客户端提交的下载文件名
    pub fn parse(raw: &str) -> Result<Self, CalloutError> {
        let reject = || CalloutError::InvalidArtifactName(raw.to_string());

        if raw.is_empty()
            || raw.contains('/')
            || raw.contains('\\')
            || raw.contains('\0')
            || raw.contains("..")
        {
            return Err(reject());
        }

        let mut components = Path::new(raw).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(Self(raw.to_string())),
            _ => Err(reject()),
        }
    }

    /// 在产物目录下解析为完整路径
    pub fn resolve_in(&self, dir: &Path) -> PathBuf {
        dir.join(&self.0)
    }

    /// 小写扩展名
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.0)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }

    /// 根据扩展名推断 Content-Type
    pub fn content_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("wav") => "audio/wav",
            Some("mp3") => "audio/mpeg",
            Some("flac") => "audio/flac",
            Some("ogg") => "audio/ogg",
            _ => "application/octet-stream",
        }
    }

    /// 下载地址
    pub fn download_url(&self) -> String {
        format!("/api/download/{}", self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
