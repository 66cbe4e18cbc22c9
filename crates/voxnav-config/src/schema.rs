//! Configuration schema definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub assistant: AssistantConfig,

    #[serde(default)]
    pub speech: SpeechConfig,

    #[serde(default)]
    pub perception: PerceptionConfig,

    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub executor: ExecutorConfig,

    #[serde(default)]
    pub notify: NotifyConfig,
}

/// Listening loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_wake_word")]
    pub wake_word: String,

    /// Pause between command cycles.
    #[serde(default = "default_loop_sleep_ms")]
    pub loop_sleep_ms: u64,
}

impl AssistantConfig {
    pub fn loop_sleep(&self) -> Duration {
        Duration::from_millis(self.loop_sleep_ms)
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            wake_word: default_wake_word(),
            loop_sleep_ms: default_loop_sleep_ms(),
        }
    }
}

fn default_wake_word() -> String {
    "hello".to_string()
}

fn default_loop_sleep_ms() -> u64 {
    300
}

/// Microphone capture and transcription configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Seconds of silence that end a command recording.
    #[serde(default = "default_silence_threshold")]
    pub silence_threshold_secs: f32,

    /// Upper bound for a single wake-word phrase.
    #[serde(default = "default_phrase_time_limit")]
    pub phrase_time_limit_secs: f32,

    /// Upper bound for a command recording.
    #[serde(default = "default_max_command")]
    pub max_command_secs: f32,

    /// Ambient-noise sampling window before each recording.
    #[serde(default = "default_calibration_ms")]
    pub calibration_ms: u64,

    #[serde(default = "default_energy_multiplier")]
    pub energy_multiplier: f32,

    /// Floor for the calibrated speech energy threshold.
    #[serde(default = "default_min_energy")]
    pub min_energy: f32,

    #[serde(default = "default_transcription_url")]
    pub transcription_url: String,

    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,

    #[serde(default = "default_language")]
    pub language: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Input device name; the system default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

impl SpeechConfig {
    pub fn resolved_api_key(&self) -> Option<String> {
        resolve_api_key(self.api_key.as_deref())
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            silence_threshold_secs: default_silence_threshold(),
            phrase_time_limit_secs: default_phrase_time_limit(),
            max_command_secs: default_max_command(),
            calibration_ms: default_calibration_ms(),
            energy_multiplier: default_energy_multiplier(),
            min_energy: default_min_energy(),
            transcription_url: default_transcription_url(),
            transcription_model: default_transcription_model(),
            language: default_language(),
            api_key: None,
            device: None,
        }
    }
}

fn default_silence_threshold() -> f32 {
    2.0
}

fn default_phrase_time_limit() -> f32 {
    6.0
}

fn default_max_command() -> f32 {
    30.0
}

fn default_calibration_ms() -> u64 {
    1000
}

fn default_energy_multiplier() -> f32 {
    1.5
}

fn default_min_energy() -> f32 {
    0.01
}

fn default_transcription_url() -> String {
    "https://api.openai.com/v1/audio/transcriptions".to_string()
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

/// Screen perception configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerceptionConfig {
    /// Maximum number of UI elements included in a prompt.
    #[serde(default = "default_max_ui_elements")]
    pub max_ui_elements: usize,

    #[serde(default = "default_tesseract_cmd")]
    pub tesseract_cmd: String,

    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,

    /// Convert screenshots to grayscale before OCR.
    #[serde(default = "default_true")]
    pub grayscale: bool,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            max_ui_elements: default_max_ui_elements(),
            tesseract_cmd: default_tesseract_cmd(),
            ocr_language: default_ocr_language(),
            grayscale: true,
        }
    }
}

fn default_max_ui_elements() -> usize {
    500
}

fn default_tesseract_cmd() -> String {
    "tesseract".to_string()
}

fn default_ocr_language() -> String {
    "eng".to_string()
}

fn default_true() -> bool {
    true
}

/// Language model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request a streamed response. The full text is still returned at once.
    #[serde(default)]
    pub stream: bool,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl ModelConfig {
    pub fn resolved_api_key(&self) -> Option<String> {
        resolve_api_key(self.api_key.as_deref())
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            stream: false,
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_tokens() -> u32 {
    150
}

fn default_timeout_secs() -> u64 {
    60
}

/// Input simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Pause between typed characters.
    #[serde(default = "default_typing_interval_ms")]
    pub typing_interval_ms: u64,

    /// Scroll notches per scroll action.
    #[serde(default = "default_scroll_amount")]
    pub scroll_amount: u32,

    /// Pause after moving the pointer and before clicking.
    #[serde(default = "default_pointer_settle_ms")]
    pub pointer_settle_ms: u64,

    /// Preferred browser command; the platform opener when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
}

impl ExecutorConfig {
    pub fn typing_interval(&self) -> Duration {
        Duration::from_millis(self.typing_interval_ms)
    }

    pub fn pointer_settle(&self) -> Duration {
        Duration::from_millis(self.pointer_settle_ms)
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            typing_interval_ms: default_typing_interval_ms(),
            scroll_amount: default_scroll_amount(),
            pointer_settle_ms: default_pointer_settle_ms(),
            browser: None,
        }
    }
}

fn default_typing_interval_ms() -> u64 {
    50
}

fn default_scroll_amount() -> u32 {
    5
}

fn default_pointer_settle_ms() -> u64 {
    200
}

/// Where result notifications are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyChannel {
    #[default]
    Desktop,
    Log,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default)]
    pub channel: NotifyChannel,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default = "default_notify_timeout")]
    pub timeout_secs: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            channel: NotifyChannel::default(),
            title: default_title(),
            app_name: default_app_name(),
            timeout_secs: default_notify_timeout(),
        }
    }
}

fn default_title() -> String {
    "Browser Automation".to_string()
}

fn default_app_name() -> String {
    "Web Accessibility App".to_string()
}

fn default_notify_timeout() -> u64 {
    3
}

fn resolve_api_key(configured: Option<&str>) -> Option<String> {
    configured
        .map(str::to_string)
        .or_else(|| std::env::var(API_KEY_ENV).ok())
        .filter(|key| !key.trim().is_empty())
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
