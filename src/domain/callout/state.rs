//! 生成请求状态机
//!
//! Received → Validated → Synthesizing → {Completed | Degraded | Failed}
//!
//! 任意非终态可直接进入 Failed；终态不再迁移，也不会自动重试。

use serde::Serialize;

use super::CalloutError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationState {
    Received,
    Validated,
    Synthesizing,
    Completed,
    Degraded,
    Failed,
}

impl GenerationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Degraded | Self::Failed)
    }

    fn can_transition_to(&self, next: GenerationState) -> bool {
        use GenerationState::*;
        match (self, next) {
            (Received, Validated) => true,
            (Validated, Synthesizing) => true,
            (Synthesizing, Completed) | (Synthesizing, Degraded) => true,
            (from, Failed) => !from.is_terminal(),
            _ => false,
        }
    }

    /// 迁移到下一个状态
    pub fn advance(&mut self, next: GenerationState) -> Result<(), CalloutError> {
        if !self.can_transition_to(next) {
            return Err(CalloutError::InvalidTransition {
                from: *self,
                to: next,
            });
        }
        *self = next;
        Ok(())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Validated => "validated",
            Self::Synthesizing => "synthesizing",
            Self::Completed => "completed",
            Self::Degraded => "degraded",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for GenerationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
