//! Callout Context - Errors

use thiserror::Error;

use super::GenerationState;

#[derive(Debug, Error)]
pub enum CalloutError {
    #[error("Message too long: {len} characters (max {max})")]
    MessageTooLong { len: usize, max: usize },

    #[error("Invalid filename: {0:?}")]
    InvalidArtifactName(String),

    #[error("Invalid generation state transition: {from} -> {to}")]
    InvalidTransition {
        from: GenerationState,
        to: GenerationState,
    },
}
