//! Profile Context - 音色档案限界上下文
//!
//! 职责:
//! - 上传样本与档案标识的映射
//! - 档案查询（只读）

mod aggregate;
mod errors;
mod value_objects;

pub use aggregate::VoiceProfile;
pub use errors::ProfileError;
pub use value_objects::{ProfileId, SampleDuration, SampleLocation};
