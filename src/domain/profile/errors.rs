//! Profile Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Voice profile not found: {0}")]
    NotFound(String),

    #[error("Voice sample file missing: {0}")]
    MissingSample(String),
}
