//! Profile Queries

/// 获取音色档案详情
#[derive(Debug, Clone)]
pub struct GetProfile {
    pub profile_id: String,
}
