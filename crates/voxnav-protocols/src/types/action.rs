//! Action descriptors and action errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message used when the model response is not a JSON object.
pub const PARSE_FAILURE_MESSAGE: &str = "Failed to parse API response.";

/// Upper bound (in characters) for messages shown to the user.
pub const MAX_ERROR_MESSAGE_CHARS: usize = 99;

/// Absolute screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    /// Signed scroll amount for this direction. Down is positive.
    pub fn signed(self, magnitude: u32) -> i32 {
        let magnitude = i32::try_from(magnitude).unwrap_or(i32::MAX);
        match self {
            Self::Up => -magnitude,
            Self::Down => magnitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabDirection {
    Next,
    Previous,
}

impl TabDirection {
    /// Key combination that switches browser tabs in this direction.
    pub fn hotkey(self) -> &'static [&'static str] {
        match self {
            Self::Next => &["ctrl", "tab"],
            Self::Previous => &["ctrl", "shift", "tab"],
        }
    }
}

/// A validated, executable action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionDescriptor {
    Click { target: String, position: Position },
    Open { target: String },
    Type { value: String },
    Scroll { direction: ScrollDirection },
    ChangeTab { direction: TabDirection },
}

impl ActionDescriptor {
    /// Short action name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Click { .. } => "click",
            Self::Open { .. } => "open",
            Self::Type { .. } => "type",
            Self::Scroll { .. } => "scroll",
            Self::ChangeTab { .. } => "change_tab",
        }
    }
}

/// Where an [`ActionError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionErrorKind {
    /// The model response was not a JSON object.
    UpstreamMalformed,
    /// The model answered with its own `error` key.
    Reported,
    /// The response parsed but broke the action contract.
    Validation,
    /// A collaborator (screen capture, model call, speech) failed.
    Collaborator,
}

/// A user-facing error produced instead of an action.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ActionError {
    kind: ActionErrorKind,
    message: String,
}

impl ActionError {
    pub fn new(kind: ActionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn parse_failure() -> Self {
        Self::new(ActionErrorKind::UpstreamMalformed, PARSE_FAILURE_MESSAGE)
    }

    /// The model's own error text, kept verbatim.
    pub fn reported(message: impl Into<String>) -> Self {
        Self::new(ActionErrorKind::Reported, message)
    }

    pub fn validation(message: impl AsRef<str>) -> Self {
        Self::new(ActionErrorKind::Validation, bound_message(message.as_ref()))
    }

    pub fn collaborator(message: impl AsRef<str>) -> Self {
        Self::new(ActionErrorKind::Collaborator, bound_message(message.as_ref()))
    }

    pub fn kind(&self) -> ActionErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Truncate a message to [`MAX_ERROR_MESSAGE_CHARS`] characters, marking the cut
/// with an ellipsis.
pub fn bound_message(message: &str) -> String {
    if message.chars().count() <= MAX_ERROR_MESSAGE_CHARS {
        return message.to_string();
    }
    let mut bounded: String = message.chars().take(MAX_ERROR_MESSAGE_CHARS - 3).collect();
    bounded.push_str("...");
    bounded
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
