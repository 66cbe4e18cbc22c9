//! Notification collaborator.

use crate::error::NotifyError;
use crate::types::Notification;

/// Shows a notification to the user.
pub trait Notifier: Send + Sync {
    /// Channel identifier used in logs.
    fn id(&self) -> &str;

    fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}
