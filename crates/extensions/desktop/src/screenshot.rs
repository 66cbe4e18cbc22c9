//! Screen capture.

use std::io::Cursor;

use screenshots::Screen;
use screenshots::image::{ImageOutputFormat, RgbaImage};
use tracing::debug;
use voxnav_protocols::{CaptureError, ScreenCapturer, Screenshot};

/// Captures the primary monitor as PNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScreenshotCapturer;

impl ScreenshotCapturer {
    pub fn new() -> Self {
        Self
    }
}

impl ScreenCapturer for ScreenshotCapturer {
    fn capture(&self) -> Result<Screenshot, CaptureError> {
        let screens = Screen::all().map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;
        let primary = screens
            .iter()
            .position(|s| s.display_info.is_primary)
            .unwrap_or(0);
        let screen = screens.into_iter().nth(primary).ok_or(CaptureError::NoMonitor)?;

        let image = screen
            .capture()
            .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;
        debug!(
            display = screen.display_info.id,
            width = image.width(),
            height = image.height(),
            "Captured display"
        );

        encode_png(&image)
    }
}

pub(crate) fn encode_png(image: &RgbaImage) -> Result<Screenshot, CaptureError> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageOutputFormat::Png)
        .map_err(|e| CaptureError::EncodingFailed(e.to_string()))?;

    Ok(Screenshot::new(buffer.into_inner(), image.width(), image.height()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png() {
        let image = RgbaImage::new(4, 3);
        let screenshot = encode_png(&image).unwrap();

        assert_eq!(screenshot.width, 4);
        assert_eq!(screenshot.height, 3);
        assert_eq!(&screenshot.png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
