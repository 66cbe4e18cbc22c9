use std::sync::atomic::Ordering;

use super::*;
use crate::test_support::{
    CallLog, FailMode, FakeCapturer, FakeOcr, InputCall, RecordingBrowser, RecordingInput,
    RecordingNotifier, ScriptedModel,
};
use voxnav_protocols::{ActionErrorKind, OcrFragment, Position};

struct Harness {
    pipeline: CommandPipeline,
    calls: CallLog,
    capturer: Arc<FakeCapturer>,
    model: Arc<ScriptedModel>,
    notifier: Arc<RecordingNotifier>,
}

struct Options {
    capture_fails: bool,
    ocr: FakeOcr,
    model: ScriptedModel,
    input_fail: FailMode,
    notifier_fails: bool,
}

impl Options {
    fn replying(reply: &str) -> Self {
        Self {
            capture_fails: false,
            ocr: FakeOcr::with_fragments(vec![OcrFragment::new("Login", 480, 390, 40, 20)]),
            model: ScriptedModel::replying(reply),
            input_fail: FailMode::None,
            notifier_fails: false,
        }
    }
}

fn harness(options: Options) -> Harness {
    let calls = CallLog::default();
    let capturer = Arc::new(FakeCapturer::new(options.capture_fails));
    let model = Arc::new(options.model);
    let notifier = Arc::new(RecordingNotifier::new(options.notifier_fails));

    let pipeline = CommandPipeline::new(
        Collaborators {
            capturer: capturer.clone(),
            ocr: Arc::new(options.ocr),
            model: model.clone(),
            input: Box::new(RecordingInput::new(calls.clone(), options.input_fail)),
            browser: Arc::new(RecordingBrowser::new(calls.clone(), false)),
            notifier: notifier.clone(),
        },
        &Config::default(),
    );

    Harness {
        pipeline,
        calls,
        capturer,
        model,
        notifier,
    }
}

const CLICK_REPLY: &str =
    r#"{"action":"click","target":"login button","value":"","position":{"x":500,"y":400}}"#;

#[tokio::test]
async fn test_successful_cycle() {
    let h = harness(Options::replying(CLICK_REPLY));
    let report = h.pipeline.run_cycle("click the login button").await;

    assert!(report.outcome.is_success());
    assert_eq!(report.notification.message, "Task completed successfully.");
    assert_eq!(
        report.descriptor,
        Some(ActionDescriptor::Click {
            target: "login button".to_string(),
            position: Position::new(500, 400),
        })
    );
    assert_eq!(*h.calls.lock(), vec![InputCall::Move(500, 400), InputCall::Click]);
    assert_eq!(h.notifier.sent.lock().len(), 1);
}

#[tokio::test]
async fn test_prompt_contains_command_and_elements() {
    let h = harness(Options::replying(CLICK_REPLY));
    h.pipeline.run_cycle("  click the login button ").await;

    let prompts = h.model.prompts.lock();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("\"click the login button\""));
    assert!(prompts[0].contains("Login at (480, 390, 40x20)"));
}

#[tokio::test]
async fn test_blank_command_skips_everything() {
    let h = harness(Options::replying(CLICK_REPLY));
    let report = h.pipeline.run_cycle("   ").await;

    match &report.outcome {
        CycleOutcome::Rejected { error } => {
            assert_eq!(error.kind(), ActionErrorKind::Collaborator);
            assert_eq!(error.message(), NO_COMMAND_MESSAGE);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(h.capturer.calls.load(Ordering::SeqCst), 0);
    assert!(h.model.prompts.lock().is_empty());
    assert_eq!(h.notifier.sent.lock().len(), 1);
}

#[tokio::test]
async fn test_capture_failure_aborts_cycle() {
    let h = harness(Options {
        capture_fails: true,
        ..Options::replying(CLICK_REPLY)
    });
    let report = h.pipeline.run_cycle("click the login button").await;

    assert_eq!(report.notification.message, CAPTURE_FAILURE_MESSAGE);
    assert!(h.model.prompts.lock().is_empty());
    assert!(h.calls.lock().is_empty());
    assert_eq!(h.notifier.sent.lock().len(), 1);
}

#[tokio::test]
async fn test_ocr_failure_continues_with_empty_summary() {
    let h = harness(Options {
        ocr: FakeOcr::failing(),
        ..Options::replying(r#"{"action":"scroll","target":"up"}"#)
    });
    let report = h.pipeline.run_cycle("scroll up").await;

    assert!(report.outcome.is_success());
    let prompts = h.model.prompts.lock();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].ends_with("UI Elements:\n"));
    assert_eq!(*h.calls.lock(), vec![InputCall::Scroll(-5)]);
}

#[tokio::test]
async fn test_model_failure_reports_api_error() {
    let h = harness(Options {
        model: ScriptedModel::failing(500),
        ..Options::replying("")
    });
    let report = h.pipeline.run_cycle("click the login button").await;

    assert_eq!(report.notification.message, "API error occurred.");
    assert!(report.descriptor.is_none());
    assert!(h.calls.lock().is_empty());
}

#[tokio::test]
async fn test_execution_failure_is_reported() {
    let h = harness(Options {
        input_fail: FailMode::Error,
        ..Options::replying(CLICK_REPLY)
    });
    let report = h.pipeline.run_cycle("click the login button").await;

    assert!(matches!(
        report.outcome,
        CycleOutcome::Executed {
            outcome: ExecutionOutcome::ExecutionFailure { .. }
        }
    ));
    assert!(report.notification.message.contains("simulated failure"));
    assert_eq!(h.notifier.sent.lock().len(), 1);
}

#[tokio::test]
async fn test_input_panic_is_generic_failure() {
    let h = harness(Options {
        input_fail: FailMode::Panic,
        ..Options::replying(CLICK_REPLY)
    });
    let report = h.pipeline.run_cycle("click the login button").await;

    assert_eq!(report.notification.message, "Error: Action could not be executed.");
}

#[tokio::test]
async fn test_notifier_failure_does_not_fail_cycle() {
    let h = harness(Options {
        notifier_fails: true,
        ..Options::replying(CLICK_REPLY)
    });
    let report = h.pipeline.run_cycle("click the login button").await;

    assert!(report.outcome.is_success());
    assert_eq!(h.notifier.sent.lock().len(), 1);
}

#[tokio::test]
async fn test_pipeline_is_reentrant() {
    let h = harness(Options::replying(CLICK_REPLY));

    for _ in 0..3 {
        let report = h.pipeline.run_cycle("click the login button").await;
        assert!(report.outcome.is_success());
    }

    assert_eq!(h.calls.lock().len(), 6);
    assert_eq!(h.notifier.sent.lock().len(), 3);
    assert_eq!(h.capturer.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_report_serializes() {
    let h = harness(Options::replying(r#"{"error":"No matching UI element found."}"#));
    let report = h.pipeline.run_cycle("click the purple button").await;

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["outcome"]["stage"], "rejected");
    assert_eq!(json["notification"]["message"], "No matching UI element found.");
}
