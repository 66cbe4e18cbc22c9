//! Speech-to-text through an OpenAI-compatible transcription endpoint.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;
use voxnav_config::SpeechConfig;
use voxnav_protocols::SpeechError;

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: String,
}

/// Uploads WAV audio and returns the lower-cased transcript.
pub struct WhisperTranscriber {
    client: reqwest::Client,
    url: String,
    model: String,
    language: String,
    api_key: Option<String>,
}

impl WhisperTranscriber {
    pub fn new(config: &SpeechConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: config.transcription_url.clone(),
            model: config.transcription_model.clone(),
            language: config.language.clone(),
            api_key: config.resolved_api_key(),
        }
    }

    /// Transcribe one WAV file. An empty transcript is [`SpeechError::Unintelligible`].
    pub async fn transcribe(&self, wav: Vec<u8>) -> Result<String, SpeechError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SpeechError::Transcription("no API key configured".to_string()))?;

        let file = Part::bytes(wav)
            .file_name("speech.wav")
            .mime_str("audio/wav")
            .map_err(|e| SpeechError::Transcription(e.to_string()))?;
        let mut form = Form::new()
            .part("file", file)
            .text("model", self.model.clone());
        if !self.language.trim().is_empty() {
            form = form.text("language", self.language.clone());
        }

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SpeechError::Transcription(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(SpeechError::Transcription(format!("{} - {}", status, text)));
        }

        let body: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::Transcription(e.to_string()))?;

        let transcript = normalize_transcript(&body.text).ok_or(SpeechError::Unintelligible)?;
        debug!(%transcript, "Transcript received");
        Ok(transcript)
    }
}

fn normalize_transcript(text: &str) -> Option<String> {
    let text = text.trim().to_lowercase();
    (!text.is_empty()).then_some(text)
}
