//! On-screen UI elements.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A text fragment and its pixel bounding box.
///
/// The text is always trimmed and non-empty; [`UIElement::new`] refuses
/// anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UIElement {
    text: String,
    left: u32,
    top: u32,
    width: u32,
    height: u32,
}

impl UIElement {
    /// Create an element, returning `None` when the trimmed text is empty.
    pub fn new(text: &str, left: u32, top: u32, width: u32, height: u32) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            left,
            top,
            width,
            height,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn left(&self) -> u32 {
        self.left
    }

    pub fn top(&self) -> u32 {
        self.top
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl fmt::Display for UIElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at ({}, {}, {}x{})",
            self.text, self.left, self.top, self.width, self.height
        )
    }
}

/// Ordered, size-bounded list of UI elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UIElementSummary {
    elements: Vec<UIElement>,
}

impl UIElementSummary {
    /// Build a summary from elements in scan order, keeping at most `cap`.
    pub fn bounded(elements: impl IntoIterator<Item = UIElement>, cap: usize) -> Self {
        Self {
            elements: elements.into_iter().take(cap).collect(),
        }
    }

    /// A summary with no elements, used when OCR is unavailable.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[UIElement] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UIElement> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<'a> IntoIterator for &'a UIElementSummary {
    type Item = &'a UIElement;
    type IntoIter = std::slice::Iter<'a, UIElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// The input unit handed to the model-facing stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub command_text: String,
    pub ui_summary: UIElementSummary,
}

impl ActionRequest {
    pub fn new(command_text: impl Into<String>, ui_summary: UIElementSummary) -> Self {
        Self {
            command_text: command_text.into(),
            ui_summary,
        }
    }
}
