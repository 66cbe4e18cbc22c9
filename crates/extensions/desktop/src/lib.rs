//! Desktop collaborators for voxnav.
//!
//! - [`EnigoInputDriver`] - pointer and keyboard simulation
//! - [`ScreenshotCapturer`] - primary display capture
//! - [`TesseractOcr`] - word boxes from the tesseract CLI
//! - [`SystemBrowser`] - opens URLs with the preferred browser or platform opener

mod browser;
mod input;
mod ocr;
mod screenshot;

pub use browser::SystemBrowser;
pub use input::EnigoInputDriver;
pub use ocr::TesseractOcr;
pub use screenshot::ScreenshotCapturer;
