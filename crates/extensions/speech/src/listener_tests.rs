use std::collections::VecDeque;
use std::sync::Mutex;

use super::*;
use crate::detector::StopReason;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

/// Plays back scripted recordings and records the limits it was asked for.
struct ScriptedRecorder {
    script: Mutex<VecDeque<Result<Recording, SpeechError>>>,
    requests: Mutex<Vec<RecordingLimits>>,
}

impl ScriptedRecorder {
    fn new(script: Vec<Result<Recording, SpeechError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl AudioRecorder for ScriptedRecorder {
    fn record(&self, limits: &RecordingLimits) -> Result<Recording, SpeechError> {
        self.requests.lock().unwrap().push(*limits);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SpeechError::Device("script exhausted".to_string())))
    }
}

fn speech() -> Result<Recording, SpeechError> {
    Ok(Recording {
        samples: vec![0.25; 160],
        sample_rate: 16_000,
        stop: StopReason::Silence,
    })
}

fn nothing() -> Result<Recording, SpeechError> {
    Ok(Recording {
        samples: vec![0.0; 160],
        sample_rate: 16_000,
        stop: StopReason::NoSpeech,
    })
}

async fn reply_once(server: &MockServer, status: u16, text: &str) {
    Mock::given(matchers::method("POST"))
        .respond_with(
            ResponseTemplate::new(status).set_body_json(serde_json::json!({ "text": text })),
        )
        .up_to_n_times(1)
        .mount(server)
        .await;
}

fn listener(server: &MockServer, recorder: Arc<ScriptedRecorder>) -> VoiceListener {
    let config = SpeechConfig {
        transcription_url: server.uri(),
        api_key: Some("test-key".to_string()),
        ..Default::default()
    };
    VoiceListener::with_recorder(recorder, &config)
}

#[test]
fn test_contains_wake_word() {
    assert!(contains_wake_word("hey computer open mail", "computer"));
    assert!(contains_wake_word("hey computer", "Computer"));
    assert!(contains_wake_word("HEY COMPUTER", " computer "));
    assert!(!contains_wake_word("hey compute", "computer"));
    assert!(!contains_wake_word("anything", "  "));
}

#[tokio::test]
async fn test_wake_word_skips_silence_and_other_phrases() {
    let server = MockServer::start().await;
    reply_once(&server, 200, "what's the weather").await;
    reply_once(&server, 200, "Hey Computer").await;

    let recorder = ScriptedRecorder::new(vec![nothing(), speech(), speech()]);
    let listener = listener(&server, recorder.clone());

    listener.wait_for_wake_word("computer").await.unwrap();

    assert_eq!(recorder.request_count(), 3);
    let requests = recorder.requests.lock().unwrap();
    assert!(requests.iter().all(|l| l.phrase_limit_secs == 6.0));
}

#[tokio::test]
async fn test_wake_word_continues_after_transcription_error() {
    let server = MockServer::start().await;
    reply_once(&server, 500, "").await;
    reply_once(&server, 200, "computer").await;

    let recorder = ScriptedRecorder::new(vec![speech(), speech()]);
    let listener = listener(&server, recorder.clone());

    listener.wait_for_wake_word("computer").await.unwrap();
    assert_eq!(recorder.request_count(), 2);
}

#[tokio::test]
async fn test_wake_word_stops_on_device_error() {
    let server = MockServer::start().await;
    let recorder = ScriptedRecorder::new(vec![Err(SpeechError::NoInputDevice)]);
    let listener = listener(&server, recorder);

    let result = listener.wait_for_wake_word("computer").await;
    assert!(matches!(result, Err(SpeechError::NoInputDevice)));
}

#[tokio::test]
async fn test_record_command() {
    let server = MockServer::start().await;
    reply_once(&server, 200, " Open GitHub ").await;

    let recorder = ScriptedRecorder::new(vec![speech()]);
    let listener = listener(&server, recorder.clone());

    assert_eq!(listener.record_command().await.unwrap(), "open github");

    let requests = recorder.requests.lock().unwrap();
    assert_eq!(requests[0].pause_secs, 2.0);
    assert_eq!(requests[0].phrase_limit_secs, 30.0);
}

#[tokio::test]
async fn test_record_command_without_speech() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let listener = listener(&server, ScriptedRecorder::new(vec![nothing()]));

    let result = listener.record_command().await;
    assert!(matches!(result, Err(SpeechError::Unintelligible)));
}
