//! Notification channels for voxnav.
//!
//! - [`DesktopNotifier`] - native desktop notifications
//! - [`LogNotifier`] - writes notifications to the log

mod desktop;
mod log;

use std::sync::Arc;

use voxnav_config::{NotifyChannel, NotifyConfig};
use voxnav_protocols::Notifier;

pub use desktop::DesktopNotifier;
pub use log::LogNotifier;

/// Build the notifier selected by `notify.channel`.
pub fn notifier_from_config(config: &NotifyConfig) -> Arc<dyn Notifier> {
    match config.channel {
        NotifyChannel::Desktop => Arc::new(DesktopNotifier::new(config)),
        NotifyChannel::Log => Arc::new(LogNotifier),
    }
}
