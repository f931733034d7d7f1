//! Profile Context - Value Objects

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::ProfileError;

/// 音色档案唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId(Uuid);

impl ProfileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// 从客户端提交的字符串解析
    ///
    /// 空字符串或非 UUID 格式均视为未知档案
    pub fn parse(raw: &str) -> Result<Self, ProfileError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProfileError::NotFound(String::new()));
        }
        Uuid::parse_str(trimmed)
            .map(Self)
            .map_err(|_| ProfileError::NotFound(trimmed.to_string()))
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 参考音频样本位置
///
/// 不变量:
/// - 每个档案独占一个样本文件
/// - 创建时文件必须存在
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleLocation(PathBuf);

impl SampleLocation {
    /// 校验文件存在后构造
    pub fn existing(path: PathBuf) -> Result<Self, ProfileError> {
        if !path.is_file() {
            return Err(ProfileError::MissingSample(path.display().to_string()));
        }
        Ok(Self(path))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// 样本时长（秒），仅供参考，无法测量时为 0
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SampleDuration(f64);

impl SampleDuration {
    pub const UNKNOWN: Self = Self(0.0);

    /// 四舍五入到两位小数；负数或非有限值视为未知
    pub fn from_secs(secs: f64) -> Self {
        if !secs.is_finite() || secs <= 0.0 {
            return Self::UNKNOWN;
        }
        Self((secs * 100.0).round() / 100.0)
    }

    pub fn as_secs(&self) -> f64 {
        self.0
    }

    pub fn is_known(&self) -> bool {
        self.0 > 0.0
    }
}
