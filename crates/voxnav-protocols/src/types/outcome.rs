//! Execution outcomes.

use serde::{Deserialize, Serialize};

/// Result of dispatching one action descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    Success,
    /// The action was well-formed but the simulated input failed.
    ExecutionFailure { reason: Option<String> },
    /// The descriptor broke an invariant and nothing was executed.
    ValidationError { message: String },
}

impl ExecutionOutcome {
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::ExecutionFailure {
            reason: Some(reason.into()),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}
