//! Errors that abort a command cycle.

use thiserror::Error;
use voxnav_protocols::CaptureError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Screen capture failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("Blocking worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
