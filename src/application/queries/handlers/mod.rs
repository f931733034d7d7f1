//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod artifact_handlers;
mod profile_handlers;

pub use artifact_handlers::*;
pub use profile_handlers::*;
