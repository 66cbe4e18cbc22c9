//! Speech input for voxnav.
//!
//! - [`MicrophoneRecorder`]: cpal capture with ambient-noise calibration
//! - [`SilenceDetector`]: energy-based end-of-speech detection
//! - [`WhisperTranscriber`]: OpenAI-compatible speech-to-text
//! - [`VoiceListener`]: the [`SpeechListener`](voxnav_protocols::SpeechListener)
//!   built from the three

mod detector;
mod listener;
mod recorder;
mod transcriber;
mod wav;

pub use detector::{DetectorState, RecordingLimits, SilenceDetector, StopReason, rms};
pub use listener::{VoiceListener, contains_wake_word};
pub use recorder::{AudioRecorder, Calibration, MicrophoneRecorder, Recording};
pub use transcriber::WhisperTranscriber;
pub use wav::encode_wav;
