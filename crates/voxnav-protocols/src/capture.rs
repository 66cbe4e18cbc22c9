//! Screen capture collaborator.

use crate::error::CaptureError;
use crate::types::Screenshot;

/// Captures a raster image of the current display.
///
/// Implementations block until the capture completes; async callers should
/// run them on a blocking worker.
pub trait ScreenCapturer: Send + Sync {
    /// Capture the primary display.
    fn capture(&self) -> Result<Screenshot, CaptureError>;
}
