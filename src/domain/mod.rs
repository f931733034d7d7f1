//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Profile Context: 音色档案
//! - Callout Context: 播报生成

pub mod callout;
pub mod profile;
