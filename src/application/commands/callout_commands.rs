//! Callout Commands

/// 生成播报命令
///
/// `profile_id` 保持客户端原样，由处理器负责校验
#[derive(Debug, Clone)]
pub struct GenerateCallout {
    pub profile_id: String,
    pub message: Option<String>,
}
