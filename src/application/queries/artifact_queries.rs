//! Artifact Queries - 产物下载查询

/// 获取生成产物
///
/// `filename` 为客户端原样提交的文件名，由处理器校验
#[derive(Debug, Clone)]
pub struct GetArtifact {
    pub filename: String,
}
