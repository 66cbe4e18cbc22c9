//! Assistant assembly and the listening loop.

use std::error::Error;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use tracing::{error, info, warn};

use voxnav_config::{AssistantConfig, Config, ConfigLoader, ConfigValidator, ValidationResult};
use voxnav_core::{Collaborators, CommandPipeline};
use voxnav_desktop::{EnigoInputDriver, ScreenshotCapturer, SystemBrowser, TesseractOcr};
use voxnav_notify::notifier_from_config;
use voxnav_protocols::SpeechListener;
use voxnav_provider_openai::OpenAIProvider;
use voxnav_speech::VoiceListener;

/// Wire the desktop, model and notification collaborators into a pipeline.
pub(crate) fn build_pipeline(config: &Config) -> Result<CommandPipeline, Box<dyn Error>> {
    let collaborators = Collaborators {
        capturer: Arc::new(ScreenshotCapturer::new()),
        ocr: Arc::new(TesseractOcr::new(&config.perception)),
        model: Arc::new(OpenAIProvider::new(&config.model)?),
        input: Box::new(EnigoInputDriver::new(&config.executor)),
        browser: Arc::new(SystemBrowser::new(&config.executor)),
        notifier: notifier_from_config(&config.notify),
    };
    Ok(CommandPipeline::new(collaborators, config))
}

/// `voxnav run`: listen until Ctrl-C.
pub(crate) async fn run(config_path: &Path) -> Result<(), Box<dyn Error>> {
    info!("Starting voxnav v{}", env!("CARGO_PKG_VERSION"));
    let config = load_config(config_path)?;

    let pipeline = build_pipeline(&config)?;
    let listener = VoiceListener::new(&config.speech);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl-C");
    };

    run_loop(&pipeline, &listener, &config.assistant, shutdown).await;
    Ok(())
}

/// `voxnav once <text>`: run one typed command.
pub(crate) async fn once(config_path: &Path, command: &str, json: bool) -> Result<(), Box<dyn Error>> {
    let config = load_config(config_path)?;
    let pipeline = build_pipeline(&config)?;

    let report = pipeline.run_cycle(command).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.notification.message);
    }
    Ok(())
}

/// `voxnav check`: report configuration problems.
pub(crate) fn check(config_path: &Path) -> Result<(), Box<dyn Error>> {
    let (config, from_file) = ConfigLoader::load_or_default(config_path)?;
    if from_file {
        println!("Configuration: {}", config_path.display());
    } else {
        println!("Configuration: {} not found, using defaults", config_path.display());
    }

    let result = ConfigValidator::validate(&config)?;
    print!("{}", format_validation(&result));

    if !result.is_valid() {
        return Err(format!("configuration has {} error(s)", result.errors.len()).into());
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<Config, Box<dyn Error>> {
    let (config, from_file) = ConfigLoader::load_or_default(path)?;
    if !from_file {
        warn!(path = %path.display(), "Config file not found, using defaults");
    }

    let result = ConfigValidator::validate(&config)?;
    for warning in &result.warnings {
        warn!(path = %warning.path, "{}", warning.message);
    }
    if !result.is_valid() {
        for e in &result.errors {
            error!(path = %e.path, "{}", e.message);
        }
        return Err(format!("configuration has {} error(s)", result.errors.len()).into());
    }

    Ok(config)
}

fn format_validation(result: &ValidationResult) -> String {
    let mut out = String::new();
    for e in &result.errors {
        out.push_str(&format!("error: {}: {}\n", e.path, e.message));
    }
    for w in &result.warnings {
        out.push_str(&format!("warning: {}: {}\n", w.path, w.message));
    }
    if result.errors.is_empty() && result.warnings.is_empty() {
        out.push_str("OK\n");
    }
    out
}

/// Wake word → command → cycle, until `shutdown` resolves. Returns the number
/// of cycles run.
///
/// Shutdown only interrupts listening and the pause between cycles. A cycle
/// that has started always runs to its notification.
pub(crate) async fn run_loop<S>(
    pipeline: &CommandPipeline,
    listener: &dyn SpeechListener,
    assistant: &AssistantConfig,
    shutdown: S,
) -> usize
where
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut cycles = 0;

    loop {
        let command = tokio::select! {
            _ = &mut shutdown => break,
            command = next_command(listener, &assistant.wake_word) => command,
        };

        if let Some(command) = command {
            pipeline.run_cycle(&command).await;
            cycles += 1;
        }

        tokio::select! {
            _ = &mut shutdown => break,
            _ = tokio::time::sleep(assistant.loop_sleep()) => {}
        }
    }

    info!(cycles, "Shutting down");
    cycles
}

/// Wait for the wake word and record the command that follows it.
async fn next_command(listener: &dyn SpeechListener, wake_word: &str) -> Option<String> {
    if let Err(e) = listener.wait_for_wake_word(wake_word).await {
        warn!(error = %e, "Wake word listening failed");
        return None;
    }

    // An unrecognized command still runs a cycle so the user is told.
    match listener.record_command().await {
        Ok(command) => Some(command),
        Err(e) => {
            warn!(error = %e, "Command recording failed");
            Some(String::new())
        }
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
