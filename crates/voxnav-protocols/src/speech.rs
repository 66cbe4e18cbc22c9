//! Speech collaborator.

use async_trait::async_trait;

use crate::error::SpeechError;

/// Supplies wake-word detection and command transcripts.
#[async_trait]
pub trait SpeechListener: Send + Sync {
    /// Block until a phrase containing `wake_word` is heard.
    async fn wait_for_wake_word(&self, wake_word: &str) -> Result<(), SpeechError>;

    /// Record one spoken command until silence and return its transcript.
    async fn record_command(&self) -> Result<String, SpeechError>;
}
