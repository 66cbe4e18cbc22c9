//! OCR collaborator.

use serde::{Deserialize, Serialize};

use crate::error::OcrError;
use crate::types::Screenshot;

/// A raw text fragment as reported by an OCR engine.
///
/// The text is untrimmed and may be empty; filtering happens downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrFragment {
    pub text: String,
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl OcrFragment {
    pub fn new(text: impl Into<String>, left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            text: text.into(),
            left,
            top,
            width,
            height,
        }
    }
}

/// Extracts text fragments and their bounding boxes from a screenshot.
pub trait OcrEngine: Send + Sync {
    /// Engine identifier used in logs.
    fn id(&self) -> &str;

    /// Recognize text in scan order.
    fn recognize(&self, screenshot: &Screenshot) -> Result<Vec<OcrFragment>, OcrError>;
}
