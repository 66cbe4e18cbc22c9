//! Per-command pipeline.
//!
//! One call to [`CommandPipeline::run_cycle`] takes a command transcript through
//! perception, the model call, parsing, dispatch and reporting. Every path ends
//! in exactly one notification. Nothing is retained between cycles.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, error, info, warn};
use voxnav_config::Config;
use voxnav_protocols::{
    ActionDescriptor, ActionError, ActionRequest, BrowserLauncher, ExecutionOutcome, InputDriver,
    LanguageModel, Notification, Notifier, OcrEngine, ScreenCapturer, UIElementSummary,
};

use crate::dispatcher::ActionDispatcher;
use crate::error::PipelineError;
use crate::extractor::UIElementExtractor;
use crate::parser::parse_response;
use crate::prompt::ActionRequestBuilder;
use crate::reporter::{CycleOutcome, ResultReporter};

pub const NO_COMMAND_MESSAGE: &str = "No command was recognized.";
pub const CAPTURE_FAILURE_MESSAGE: &str = "Failed to capture the screen.";
pub const MODEL_FAILURE_MESSAGE: &str = "API error occurred.";

/// The external services a pipeline drives.
pub struct Collaborators {
    pub capturer: Arc<dyn ScreenCapturer>,
    pub ocr: Arc<dyn OcrEngine>,
    pub model: Arc<dyn LanguageModel>,
    pub input: Box<dyn InputDriver>,
    pub browser: Arc<dyn BrowserLauncher>,
    pub notifier: Arc<dyn Notifier>,
}

/// What happened during one command cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub command: String,
    pub descriptor: Option<ActionDescriptor>,
    pub outcome: CycleOutcome,
    pub notification: Notification,
}

pub struct CommandPipeline {
    capturer: Arc<dyn ScreenCapturer>,
    ocr: Arc<dyn OcrEngine>,
    model: Arc<dyn LanguageModel>,
    notifier: Arc<dyn Notifier>,
    dispatcher: Arc<Mutex<ActionDispatcher>>,
    extractor: UIElementExtractor,
    builder: ActionRequestBuilder,
    reporter: ResultReporter,
}

impl CommandPipeline {
    pub fn new(collaborators: Collaborators, config: &Config) -> Self {
        let dispatcher = ActionDispatcher::new(
            collaborators.input,
            collaborators.browser,
            &config.executor,
        );

        Self {
            capturer: collaborators.capturer,
            ocr: collaborators.ocr,
            model: collaborators.model,
            notifier: collaborators.notifier,
            dispatcher: Arc::new(Mutex::new(dispatcher)),
            extractor: UIElementExtractor::new(&config.perception),
            builder: ActionRequestBuilder::new(),
            reporter: ResultReporter::new(&config.notify),
        }
    }

    /// Run one command end to end and notify the user of the result.
    pub async fn run_cycle(&self, command: &str) -> CycleReport {
        let command = command.trim().to_string();
        info!(%command, "Processing command");

        let (descriptor, outcome) = self.interpret_and_execute(&command).await;
        let notification = self.reporter.notification(&outcome);
        self.send(&notification).await;

        let report = CycleReport {
            command,
            descriptor,
            outcome,
            notification,
        };
        info!(
            success = report.outcome.is_success(),
            message = %report.notification.message,
            "Cycle complete"
        );
        report
    }

    async fn interpret_and_execute(
        &self,
        command: &str,
    ) -> (Option<ActionDescriptor>, CycleOutcome) {
        if command.is_empty() {
            warn!("Empty command transcript");
            return (None, ActionError::collaborator(NO_COMMAND_MESSAGE).into());
        }

        let ui_summary = match self.perceive().await {
            Ok(summary) => summary,
            Err(e) => {
                error!(error = %e, "Aborting cycle");
                return (None, ActionError::collaborator(CAPTURE_FAILURE_MESSAGE).into());
            }
        };

        let prompt = self.builder.build(&ActionRequest::new(command, ui_summary));
        debug!(model = self.model.id(), prompt_len = prompt.len(), "Requesting action");

        let raw = match self.model.complete(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(model = self.model.id(), error = %e, "Model call failed");
                return (None, ActionError::collaborator(MODEL_FAILURE_MESSAGE).into());
            }
        };
        debug!(response = %raw, "Model response");

        let descriptor = match parse_response(&raw) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                warn!(kind = ?e.kind(), message = %e, "No action to execute");
                return (None, e.into());
            }
        };

        let outcome = self.execute(descriptor.clone()).await;
        (Some(descriptor), outcome.into())
    }

    /// Capture the screen and extract UI elements.
    ///
    /// OCR failure degrades to an empty summary; capture failure aborts.
    async fn perceive(&self) -> Result<UIElementSummary, PipelineError> {
        let capturer = Arc::clone(&self.capturer);
        let screenshot = tokio::task::spawn_blocking(move || capturer.capture()).await??;
        debug!(width = screenshot.width, height = screenshot.height, "Screen captured");

        let ocr = Arc::clone(&self.ocr);
        let extractor = self.extractor;
        let extracted =
            tokio::task::spawn_blocking(move || extractor.extract(ocr.as_ref(), &screenshot))
                .await;

        let summary = match extracted {
            Ok(Ok(summary)) => summary,
            Ok(Err(e)) => {
                warn!(error = %e, "OCR failed, continuing without UI elements");
                UIElementSummary::empty()
            }
            Err(e) => {
                warn!(error = %e, "OCR worker failed, continuing without UI elements");
                UIElementSummary::empty()
            }
        };
        info!(elements = summary.len(), "UI elements extracted");
        Ok(summary)
    }

    async fn execute(&self, descriptor: ActionDescriptor) -> ExecutionOutcome {
        let dispatcher = Arc::clone(&self.dispatcher);
        match tokio::task::spawn_blocking(move || dispatcher.lock().dispatch(&descriptor)).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "Dispatch worker failed");
                ExecutionOutcome::ExecutionFailure { reason: None }
            }
        }
    }

    async fn send(&self, notification: &Notification) {
        let notifier = Arc::clone(&self.notifier);
        let owned = notification.clone();
        match tokio::task::spawn_blocking(move || notifier.notify(&owned)).await {
            Ok(Ok(())) => debug!(channel = self.notifier.id(), "Notification sent"),
            Ok(Err(e)) => warn!(channel = self.notifier.id(), error = %e, "Notification failed"),
            Err(e) => warn!(error = %e, "Notification worker failed"),
        }
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
