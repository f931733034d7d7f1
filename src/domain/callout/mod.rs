//! Callout Context - 播报生成限界上下文
//!
//! 职责:
//! - 播报文本解析（默认文本回退）
//! - 产物文件命名与下载文件名校验
//! - 单次生成请求的状态机

mod artifact;
mod errors;
mod state;
mod text;

pub use artifact::ArtifactName;
pub use errors::CalloutError;
pub use state::GenerationState;
pub use text::{CalloutText, DEFAULT_CALLOUT_MESSAGE, MAX_CALLOUT_CHARS};
