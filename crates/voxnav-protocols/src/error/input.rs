//! Input simulation errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Input failed: {0}")]
    Failed(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Browser launch failed: {0}")]
    BrowserLaunch(String),
}
