//! Action execution.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use voxnav_config::ExecutorConfig;
use voxnav_protocols::{
    ActionDescriptor, BrowserLauncher, ExecutionOutcome, InputDriver, InputError,
};

/// Maps an [`ActionDescriptor`] to exactly one input side effect.
///
/// Dispatch is flat: each action completes or fails in one step and no state
/// is kept between calls. Every failure, including a panic inside the input
/// layer, becomes [`ExecutionOutcome::ExecutionFailure`].
pub struct ActionDispatcher {
    input: Box<dyn InputDriver>,
    browser: Arc<dyn BrowserLauncher>,
    typing_interval: Duration,
    scroll_amount: u32,
}

impl ActionDispatcher {
    pub fn new(
        input: Box<dyn InputDriver>,
        browser: Arc<dyn BrowserLauncher>,
        config: &ExecutorConfig,
    ) -> Self {
        Self {
            input,
            browser,
            typing_interval: config.typing_interval(),
            scroll_amount: config.scroll_amount,
        }
    }

    pub fn dispatch(&mut self, descriptor: &ActionDescriptor) -> ExecutionOutcome {
        if let Err(message) = check(descriptor) {
            warn!(action = descriptor.kind(), %message, "Rejected invalid descriptor");
            return ExecutionOutcome::validation(message);
        }

        info!(action = descriptor.kind(), ?descriptor, "Performing action");

        match panic::catch_unwind(AssertUnwindSafe(|| self.execute(descriptor))) {
            Ok(Ok(())) => {
                info!(action = descriptor.kind(), "Action completed");
                ExecutionOutcome::Success
            }
            Ok(Err(e)) => {
                error!(action = descriptor.kind(), error = %e, "Error executing action");
                ExecutionOutcome::failure(e.to_string())
            }
            Err(payload) => {
                error!(
                    action = descriptor.kind(),
                    panic = panic_message(payload.as_ref()),
                    "Input layer panicked"
                );
                ExecutionOutcome::ExecutionFailure { reason: None }
            }
        }
    }

    fn execute(&mut self, descriptor: &ActionDescriptor) -> Result<(), InputError> {
        match descriptor {
            ActionDescriptor::Click { target, position } => {
                self.input.move_pointer(position.x, position.y)?;
                self.input.primary_click()?;
                info!(%target, x = position.x, y = position.y, "Clicked");
                Ok(())
            }
            ActionDescriptor::Open { target } => self.browser.open_url(target.trim()),
            ActionDescriptor::Type { value } => self.input.type_text(value, self.typing_interval),
            ActionDescriptor::Scroll { direction } => {
                self.input.scroll(direction.signed(self.scroll_amount))
            }
            ActionDescriptor::ChangeTab { direction } => self.input.hotkey(direction.hotkey()),
        }
    }
}

/// Descriptor invariants the parser guarantees, checked again before acting.
fn check(descriptor: &ActionDescriptor) -> Result<(), String> {
    match descriptor {
        ActionDescriptor::Open { target } if target.trim().is_empty() => {
            Err("No URL provided for open action".to_string())
        }
        ActionDescriptor::Type { value } if value.is_empty() => {
            Err("No text provided for type action".to_string())
        }
        _ => Ok(()),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
