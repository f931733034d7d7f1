//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：处理所有读操作

mod artifact_queries;
mod profile_queries;

pub mod handlers;

pub use artifact_queries::*;
pub use profile_queries::*;
