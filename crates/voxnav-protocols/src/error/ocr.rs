//! OCR errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    /// Failed to perform OCR.
    #[error("OCR failed: {0}")]
    RecognitionFailed(String),

    /// Invalid image data.
    #[error("Invalid image data: {0}")]
    InvalidImage(String),

    /// OCR engine not available.
    #[error("OCR engine not available: {0}")]
    EngineNotAvailable(String),

    /// Engine output could not be read.
    #[error("Malformed OCR output: {0}")]
    MalformedOutput(String),
}
