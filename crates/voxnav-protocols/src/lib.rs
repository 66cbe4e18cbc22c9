//! # voxnav Protocols
//!
//! Core protocol definitions for the voxnav voice assistant.
//! Contains only data types and collaborator interfaces - no implementations.
//!
//! ## Collaborator Traits
//!
//! - [`ScreenCapturer`] - Captures the current display
//! - [`OcrEngine`] - Extracts text fragments and bounding boxes from a screenshot
//! - [`LanguageModel`] - Turns a prompt into raw response text
//! - [`InputDriver`] - Simulates pointer and keyboard input
//! - [`BrowserLauncher`] - Opens a URL in a browser
//! - [`Notifier`] - Shows a notification to the user
//! - [`SpeechListener`] - Detects the wake word and transcribes commands

pub mod capture;
pub mod error;
pub mod input;
pub mod notify;
pub mod ocr;
pub mod provider;
pub mod speech;
pub mod types;

pub use capture::ScreenCapturer;
pub use error::{CaptureError, InputError, NotifyError, OcrError, ProviderError, SpeechError};
pub use input::{BrowserLauncher, InputDriver};
pub use notify::Notifier;
pub use ocr::{OcrEngine, OcrFragment};
pub use provider::LanguageModel;
pub use speech::SpeechListener;
pub use types::*;
