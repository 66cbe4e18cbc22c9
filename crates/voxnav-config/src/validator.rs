//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Element caps above this are allowed but make prompts very long.
const HIGH_UI_ELEMENT_CAP: usize = 2000;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_assistant(config, &mut result);
        Self::validate_speech(config, &mut result);
        Self::validate_perception(config, &mut result);
        Self::validate_model(config, &mut result);
        Self::validate_executor(config, &mut result);

        Ok(result)
    }

    fn validate_assistant(config: &Config, result: &mut ValidationResult) {
        if config.assistant.wake_word.trim().is_empty() {
            result.add_error(ValidationError::new(
                "assistant.wake_word",
                "Wake word cannot be empty",
            ));
        }
    }

    fn validate_speech(config: &Config, result: &mut ValidationResult) {
        let speech = &config.speech;

        if speech.silence_threshold_secs <= 0.0 {
            result.add_error(ValidationError::new(
                "speech.silence_threshold_secs",
                "silence_threshold_secs must be greater than 0",
            ));
        }

        if speech.max_command_secs < speech.silence_threshold_secs {
            result.add_warning(ValidationWarning::new(
                "speech.max_command_secs",
                "max_command_secs is shorter than the silence threshold, commands may be cut off",
            ));
        }

        Self::check_url(&speech.transcription_url, "speech.transcription_url", result);

        if speech.resolved_api_key().is_none() {
            result.add_warning(ValidationWarning::new(
                "speech.api_key",
                "API key is not set, transcription requests will be rejected",
            ));
        }
    }

    fn validate_perception(config: &Config, result: &mut ValidationResult) {
        let perception = &config.perception;

        if perception.max_ui_elements == 0 {
            result.add_error(ValidationError::new(
                "perception.max_ui_elements",
                "max_ui_elements must be greater than 0",
            ));
        }

        if perception.max_ui_elements > HIGH_UI_ELEMENT_CAP {
            result.add_warning(ValidationWarning::new(
                "perception.max_ui_elements",
                format!(
                    "max_ui_elements is very high (>{}), prompts may exceed the model context",
                    HIGH_UI_ELEMENT_CAP
                ),
            ));
        }

        if perception.tesseract_cmd.trim().is_empty() {
            result.add_error(ValidationError::new(
                "perception.tesseract_cmd",
                "tesseract_cmd cannot be empty",
            ));
        }
    }

    fn validate_model(config: &Config, result: &mut ValidationResult) {
        let model = &config.model;

        Self::check_url(&model.api_url, "model.api_url", result);

        if model.model.trim().is_empty() {
            result.add_error(ValidationError::new("model.model", "Model cannot be empty"));
        }

        if !(0.0..=2.0).contains(&model.temperature) {
            result.add_error(ValidationError::new(
                "model.temperature",
                "temperature must be between 0 and 2",
            ));
        }

        if model.max_tokens == 0 {
            result.add_error(ValidationError::new(
                "model.max_tokens",
                "max_tokens must be greater than 0",
            ));
        }

        if model.timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "model.timeout_secs",
                "timeout_secs must be greater than 0",
            ));
        }

        if model.resolved_api_key().is_none() {
            result.add_warning(ValidationWarning::new(
                "model.api_key",
                "API key is not set, may need to be set via environment variable",
            ));
        }
    }

    fn validate_executor(config: &Config, result: &mut ValidationResult) {
        let executor = &config.executor;

        if executor.scroll_amount == 0 {
            result.add_error(ValidationError::new(
                "executor.scroll_amount",
                "scroll_amount must be greater than 0",
            ));
        }

        if executor.typing_interval_ms > 1000 {
            result.add_warning(ValidationWarning::new(
                "executor.typing_interval_ms",
                "typing_interval_ms is above one second, typing will be very slow",
            ));
        }
    }

    fn check_url(url: &str, path: &str, result: &mut ValidationResult) {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            result.add_error(ValidationError::new(
                path,
                "URL must start with http:// or https://",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
