//! UI element extraction from OCR output.

use tracing::debug;
use voxnav_config::PerceptionConfig;
use voxnav_protocols::{OcrEngine, OcrError, OcrFragment, Screenshot, UIElement, UIElementSummary};

/// Turns raw OCR fragments into a bounded, ordered summary.
///
/// Blank fragments are dropped. Scan order is preserved and nothing is
/// reordered, deduplicated or merged.
#[derive(Debug, Clone, Copy)]
pub struct UIElementExtractor {
    max_ui_elements: usize,
}

impl UIElementExtractor {
    pub fn new(config: &PerceptionConfig) -> Self {
        Self::with_cap(config.max_ui_elements)
    }

    pub fn with_cap(max_ui_elements: usize) -> Self {
        Self { max_ui_elements }
    }

    pub fn max_ui_elements(&self) -> usize {
        self.max_ui_elements
    }

    /// Run OCR on a screenshot and summarize the result.
    pub fn extract(
        &self,
        ocr: &dyn OcrEngine,
        screenshot: &Screenshot,
    ) -> Result<UIElementSummary, OcrError> {
        let fragments = ocr.recognize(screenshot)?;
        debug!(engine = ocr.id(), fragments = fragments.len(), "OCR complete");
        Ok(self.summarize(fragments))
    }

    pub fn summarize(&self, fragments: impl IntoIterator<Item = OcrFragment>) -> UIElementSummary {
        let elements = fragments.into_iter().filter_map(|fragment| {
            UIElement::new(
                &fragment.text,
                fragment.left,
                fragment.top,
                fragment.width,
                fragment.height,
            )
        });
        let summary = UIElementSummary::bounded(elements, self.max_ui_elements);

        for element in &summary {
            debug!(%element, "UI element");
        }

        summary
    }
}

#[cfg(test)]
#[path = "extractor_tests.rs"]
mod tests;
