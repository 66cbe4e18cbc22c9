//! User-facing notifications.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub timeout_secs: u64,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            timeout_secs,
        }
    }
}
