//! Energy-based speech segmentation.

use voxnav_config::SpeechConfig;

/// Length of one analysis frame.
const FRAME_MS: u32 = 30;

/// Pause that ends a wake-word phrase.
const PHRASE_PAUSE_SECS: f32 = 0.8;

/// Bounds for one recording.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordingLimits {
    /// Silence after speech that ends the recording.
    pub pause_secs: f32,
    /// Longest stretch of audio kept once speech has started.
    pub phrase_limit_secs: f32,
    /// How long to wait for speech to start.
    pub wait_limit_secs: f32,
}

impl RecordingLimits {
    /// Short phrases, used while listening for the wake word.
    pub fn phrase(config: &SpeechConfig) -> Self {
        Self {
            pause_secs: PHRASE_PAUSE_SECS,
            phrase_limit_secs: config.phrase_time_limit_secs,
            wait_limit_secs: config.phrase_time_limit_secs,
        }
    }

    /// A spoken command, ended by `silence_threshold_secs` of silence.
    pub fn command(config: &SpeechConfig) -> Self {
        Self {
            pause_secs: config.silence_threshold_secs,
            phrase_limit_secs: config.max_command_secs,
            wait_limit_secs: config.max_command_secs,
        }
    }
}

/// Why a recording ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Speech was followed by the configured pause.
    Silence,
    /// Speech ran into the phrase limit.
    PhraseLimit,
    /// Nothing above the threshold was heard before the wait limit.
    NoSpeech,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    Waiting,
    Speaking,
    Done(StopReason),
}

/// Frame-by-frame state machine: waiting → speaking → done.
///
/// Samples are mono `f32`. Partial frames are buffered until complete.
#[derive(Debug)]
pub struct SilenceDetector {
    threshold: f32,
    frame_len: usize,
    pause_samples: usize,
    phrase_samples: usize,
    wait_samples: usize,
    frame: Vec<f32>,
    state: DetectorState,
    waited: usize,
    spoken: usize,
    silent: usize,
}

impl SilenceDetector {
    pub fn new(threshold: f32, sample_rate: u32, limits: &RecordingLimits) -> Self {
        let samples = |secs: f32| (secs.max(0.0) * sample_rate as f32).round() as usize;
        let frame_len = ((sample_rate * FRAME_MS) / 1000).max(1) as usize;

        Self {
            threshold,
            frame_len,
            pause_samples: samples(limits.pause_secs),
            phrase_samples: samples(limits.phrase_limit_secs),
            wait_samples: samples(limits.wait_limit_secs),
            frame: Vec::with_capacity(frame_len),
            state: DetectorState::Waiting,
            waited: 0,
            spoken: 0,
            silent: 0,
        }
    }

    pub fn state(&self) -> DetectorState {
        self.state
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Feed samples and return the resulting state. Input after `Done` is ignored.
    pub fn push(&mut self, samples: &[f32]) -> DetectorState {
        for &sample in samples {
            if matches!(self.state, DetectorState::Done(_)) {
                break;
            }
            self.frame.push(sample);
            if self.frame.len() == self.frame_len {
                let energy = rms(&self.frame);
                self.frame.clear();
                self.step(energy);
            }
        }
        self.state
    }

    fn step(&mut self, energy: f32) {
        let loud = energy >= self.threshold;
        match self.state {
            DetectorState::Waiting => {
                if loud {
                    self.state = DetectorState::Speaking;
                    self.spoken = self.frame_len;
                    self.silent = 0;
                } else {
                    self.waited += self.frame_len;
                    if self.waited >= self.wait_samples {
                        self.state = DetectorState::Done(StopReason::NoSpeech);
                    }
                }
            }
            DetectorState::Speaking => {
                self.spoken += self.frame_len;
                self.silent = if loud { 0 } else { self.silent + self.frame_len };

                if self.silent >= self.pause_samples {
                    self.state = DetectorState::Done(StopReason::Silence);
                } else if self.spoken >= self.phrase_samples {
                    self.state = DetectorState::Done(StopReason::PhraseLimit);
                }
            }
            DetectorState::Done(_) => {}
        }
    }
}

/// Root mean square of `samples`; zero when empty.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

#[cfg(test)]
#[path = "detector_tests.rs"]
mod tests;
