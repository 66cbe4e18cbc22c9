//! Direction classifiers for loosely phrased model output.
//!
//! Matching is a case-insensitive substring search over a closed set of
//! keywords. A hint that matches both directions, or neither, is
//! `Unrecognized`; nothing is guessed.

use voxnav_protocols::{ScrollDirection, TabDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollClassification {
    Up,
    Down,
    Unrecognized,
}

impl ScrollClassification {
    pub fn direction(self) -> Option<ScrollDirection> {
        match self {
            Self::Up => Some(ScrollDirection::Up),
            Self::Down => Some(ScrollDirection::Down),
            Self::Unrecognized => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabClassification {
    Next,
    Previous,
    Unrecognized,
}

impl TabClassification {
    pub fn direction(self) -> Option<TabDirection> {
        match self {
            Self::Next => Some(TabDirection::Next),
            Self::Previous => Some(TabDirection::Previous),
            Self::Unrecognized => None,
        }
    }
}

/// Classify a scroll hint such as `"down"` or `"scroll up a bit"`.
pub fn classify_scroll_direction(hint: &str) -> ScrollClassification {
    let hint = hint.to_lowercase();
    match (hint.contains("up"), hint.contains("down")) {
        (true, false) => ScrollClassification::Up,
        (false, true) => ScrollClassification::Down,
        _ => ScrollClassification::Unrecognized,
    }
}

/// Classify a tab hint such as `"next"` or `"previous tab"`.
pub fn classify_tab_direction(hint: &str) -> TabClassification {
    let hint = hint.to_lowercase();
    match (hint.contains("next"), hint.contains("previous")) {
        (true, false) => TabClassification::Next,
        (false, true) => TabClassification::Previous,
        _ => TabClassification::Unrecognized,
    }
}
