//! Wake-word and command listening.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use voxnav_config::SpeechConfig;
use voxnav_protocols::{SpeechError, SpeechListener};

use crate::detector::RecordingLimits;
use crate::recorder::{AudioRecorder, MicrophoneRecorder, Recording};
use crate::transcriber::WhisperTranscriber;
use crate::wav::encode_wav;

/// [`SpeechListener`] over a recorder and a transcriber.
pub struct VoiceListener {
    recorder: Arc<dyn AudioRecorder>,
    transcriber: WhisperTranscriber,
    phrase: RecordingLimits,
    command: RecordingLimits,
}

impl VoiceListener {
    /// Listener on the configured microphone.
    pub fn new(config: &SpeechConfig) -> Self {
        Self::with_recorder(Arc::new(MicrophoneRecorder::new(config)), config)
    }

    pub fn with_recorder(recorder: Arc<dyn AudioRecorder>, config: &SpeechConfig) -> Self {
        Self {
            recorder,
            transcriber: WhisperTranscriber::new(config),
            phrase: RecordingLimits::phrase(config),
            command: RecordingLimits::command(config),
        }
    }

    async fn record(&self, limits: RecordingLimits) -> Result<Recording, SpeechError> {
        let recorder = Arc::clone(&self.recorder);
        tokio::task::spawn_blocking(move || recorder.record(&limits))
            .await
            .map_err(|e| SpeechError::Device(e.to_string()))?
    }

    async fn transcribe(&self, recording: &Recording) -> Result<String, SpeechError> {
        if !recording.heard_speech() {
            return Err(SpeechError::Unintelligible);
        }
        let wav = encode_wav(&recording.samples, recording.sample_rate)?;
        self.transcriber.transcribe(wav).await
    }
}

#[async_trait]
impl SpeechListener for VoiceListener {
    async fn wait_for_wake_word(&self, wake_word: &str) -> Result<(), SpeechError> {
        info!(%wake_word, "Listening for wake word");

        loop {
            let recording = self.record(self.phrase).await?;
            match self.transcribe(&recording).await {
                Ok(transcript) => {
                    if contains_wake_word(&transcript, wake_word) {
                        info!("Wake word detected");
                        return Ok(());
                    }
                    debug!(%transcript, "Wake word not in phrase");
                }
                Err(SpeechError::Unintelligible) => {}
                Err(e @ (SpeechError::NoInputDevice | SpeechError::Device(_))) => return Err(e),
                Err(e) => warn!(error = %e, "Wake word recognition failed"),
            }
        }
    }

    async fn record_command(&self) -> Result<String, SpeechError> {
        info!("Recording command");
        let recording = self.record(self.command).await?;
        let command = self.transcribe(&recording).await?;
        info!(%command, "Command recognized");
        Ok(command)
    }
}

/// Case-insensitive substring match. A blank wake word never matches.
pub fn contains_wake_word(transcript: &str, wake_word: &str) -> bool {
    let wake_word = wake_word.trim().to_lowercase();
    !wake_word.is_empty() && transcript.to_lowercase().contains(&wake_word)
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
