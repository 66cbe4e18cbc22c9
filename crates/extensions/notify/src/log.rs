//! Log-only notification channel.

use tracing::info;
use voxnav_protocols::{Notification, Notifier, NotifyError};

/// Writes notifications through `tracing` instead of the desktop.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn id(&self) -> &str {
        "log"
    }

    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        info!(
            title = %notification.title,
            message = %notification.message,
            "Notification"
        );
        Ok(())
    }
}
