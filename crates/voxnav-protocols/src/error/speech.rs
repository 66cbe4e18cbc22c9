//! Speech capture and transcription errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("No input device found")]
    NoInputDevice,

    #[error("Audio device error: {0}")]
    Device(String),

    #[error("Audio stream error: {0}")]
    Stream(String),

    #[error("Audio encoding failed: {0}")]
    Encoding(String),

    #[error("Speech was unintelligible")]
    Unintelligible,

    #[error("Transcription failed: {0}")]
    Transcription(String),
}
