//! Result reporting.

use serde::Serialize;
use voxnav_config::NotifyConfig;
use voxnav_protocols::{ActionError, ExecutionOutcome, Notification, bound_message};

pub const SUCCESS_MESSAGE: &str = "Task completed successfully.";
pub const EXECUTION_FAILURE_MESSAGE: &str = "Error: Action could not be executed.";

/// How a command cycle ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum CycleOutcome {
    /// No action was executed.
    Rejected { error: ActionError },
    /// An action was dispatched.
    Executed { outcome: ExecutionOutcome },
}

impl CycleOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Self::Executed {
                outcome: ExecutionOutcome::Success
            }
        )
    }
}

impl From<ActionError> for CycleOutcome {
    fn from(error: ActionError) -> Self {
        Self::Rejected { error }
    }
}

impl From<ExecutionOutcome> for CycleOutcome {
    fn from(outcome: ExecutionOutcome) -> Self {
        Self::Executed { outcome }
    }
}

/// Maps a cycle outcome to exactly one user-facing notification.
#[derive(Debug, Clone)]
pub struct ResultReporter {
    title: String,
    timeout_secs: u64,
}

impl ResultReporter {
    pub fn new(config: &NotifyConfig) -> Self {
        Self {
            title: config.title.clone(),
            timeout_secs: config.timeout_secs,
        }
    }

    pub fn message(&self, outcome: &CycleOutcome) -> String {
        match outcome {
            CycleOutcome::Rejected { error } => error.message().to_string(),
            CycleOutcome::Executed { outcome } => match outcome {
                ExecutionOutcome::Success => SUCCESS_MESSAGE.to_string(),
                ExecutionOutcome::ValidationError { message } => message.clone(),
                ExecutionOutcome::ExecutionFailure { reason } => match reason {
                    Some(reason) if !reason.trim().is_empty() => bound_message(reason.trim()),
                    _ => EXECUTION_FAILURE_MESSAGE.to_string(),
                },
            },
        }
    }

    pub fn notification(&self, outcome: &CycleOutcome) -> Notification {
        Notification::new(&self.title, self.message(outcome), self.timeout_secs)
    }
}
