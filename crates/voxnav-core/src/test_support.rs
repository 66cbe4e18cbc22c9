//! In-memory collaborators for unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use voxnav_protocols::{
    BrowserLauncher, CaptureError, InputDriver, InputError, LanguageModel, Notification,
    Notifier, NotifyError, OcrEngine, OcrError, OcrFragment, ProviderError, ScreenCapturer,
    Screenshot,
};

/// One recorded input or browser call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCall {
    Move(i32, i32),
    Click,
    Type(String, Duration),
    Scroll(i32),
    Hotkey(Vec<String>),
    Open(String),
}

pub type CallLog = Arc<Mutex<Vec<InputCall>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailMode {
    None,
    Error,
    Panic,
}

pub struct RecordingInput {
    calls: CallLog,
    fail: FailMode,
}

impl RecordingInput {
    pub fn new(calls: CallLog, fail: FailMode) -> Self {
        Self { calls, fail }
    }

    fn record(&self, call: InputCall) -> Result<(), InputError> {
        match self.fail {
            FailMode::None => {
                self.calls.lock().push(call);
                Ok(())
            }
            FailMode::Error => Err(InputError::Failed("simulated failure".to_string())),
            FailMode::Panic => panic!("simulated panic"),
        }
    }
}

impl InputDriver for RecordingInput {
    fn move_pointer(&mut self, x: i32, y: i32) -> Result<(), InputError> {
        self.record(InputCall::Move(x, y))
    }

    fn primary_click(&mut self) -> Result<(), InputError> {
        self.record(InputCall::Click)
    }

    fn type_text(&mut self, text: &str, interval: Duration) -> Result<(), InputError> {
        self.record(InputCall::Type(text.to_string(), interval))
    }

    fn scroll(&mut self, notches: i32) -> Result<(), InputError> {
        self.record(InputCall::Scroll(notches))
    }

    fn hotkey(&mut self, keys: &[&str]) -> Result<(), InputError> {
        self.record(InputCall::Hotkey(keys.iter().map(|k| k.to_string()).collect()))
    }
}

pub struct RecordingBrowser {
    calls: CallLog,
    fail: bool,
}

impl RecordingBrowser {
    pub fn new(calls: CallLog, fail: bool) -> Self {
        Self { calls, fail }
    }
}

impl BrowserLauncher for RecordingBrowser {
    fn open_url(&self, url: &str) -> Result<(), InputError> {
        if self.fail {
            return Err(InputError::BrowserLaunch("no browser".to_string()));
        }
        self.calls.lock().push(InputCall::Open(url.to_string()));
        Ok(())
    }
}

pub struct FakeCapturer {
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl FakeCapturer {
    pub fn new(fail: bool) -> Self {
        Self {
            fail,
            calls: AtomicUsize::new(0),
        }
    }
}

impl ScreenCapturer for FakeCapturer {
    fn capture(&self) -> Result<Screenshot, CaptureError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CaptureError::NoMonitor);
        }
        Ok(Screenshot::new(vec![0u8; 8], 1920, 1080))
    }
}

pub struct FakeOcr {
    fragments: Option<Vec<OcrFragment>>,
}

impl FakeOcr {
    pub fn with_fragments(fragments: Vec<OcrFragment>) -> Self {
        Self {
            fragments: Some(fragments),
        }
    }

    pub fn failing() -> Self {
        Self { fragments: None }
    }
}

impl OcrEngine for FakeOcr {
    fn id(&self) -> &str {
        "fake"
    }

    fn recognize(&self, _screenshot: &Screenshot) -> Result<Vec<OcrFragment>, OcrError> {
        self.fragments
            .clone()
            .ok_or_else(|| OcrError::EngineNotAvailable("fake".to_string()))
    }
}

/// Returns a canned reply and remembers every prompt.
pub struct ScriptedModel {
    reply: Result<String, u16>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            reply: Err(status),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(ProviderError::ApiError {
                status: *status,
                message: "scripted failure".to_string(),
            }),
        }
    }
}

pub struct RecordingNotifier {
    pub sent: Mutex<Vec<Notification>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new(fail: bool) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail,
        }
    }
}

impl Notifier for RecordingNotifier {
    fn id(&self) -> &str {
        "recording"
    }

    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.sent.lock().push(notification.clone());
        if self.fail {
            return Err(NotifyError::Failed("display unavailable".to_string()));
        }
        Ok(())
    }
}
