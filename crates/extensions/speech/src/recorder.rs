//! Microphone recording.

use std::sync::mpsc;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Sample, SizedSample};
use tracing::{debug, info, warn};
use voxnav_config::SpeechConfig;
use voxnav_protocols::SpeechError;

use crate::detector::{DetectorState, RecordingLimits, SilenceDetector, StopReason, rms};

/// How long to wait for the next audio buffer before giving up on the device.
const STALL_TIMEOUT: Duration = Duration::from_secs(2);

/// Mono audio captured for one phrase or command.
#[derive(Debug, Clone)]
pub struct Recording {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub stop: StopReason,
}

impl Recording {
    pub fn heard_speech(&self) -> bool {
        self.stop != StopReason::NoSpeech
    }
}

/// Source of recordings. Implementations block until the recording ends.
pub trait AudioRecorder: Send + Sync {
    fn record(&self, limits: &RecordingLimits) -> Result<Recording, SpeechError>;
}

/// Ambient-noise calibration settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    pub window_ms: u64,
    pub energy_multiplier: f32,
    pub min_energy: f32,
}

impl Calibration {
    pub fn new(config: &SpeechConfig) -> Self {
        Self {
            window_ms: config.calibration_ms,
            energy_multiplier: config.energy_multiplier,
            min_energy: config.min_energy,
        }
    }

    /// Speech threshold for the measured ambient energy.
    pub fn threshold(&self, ambient_rms: f32) -> f32 {
        (ambient_rms * self.energy_multiplier).max(self.min_energy)
    }

    fn window_samples(&self, sample_rate: u32) -> usize {
        (sample_rate as u64 * self.window_ms / 1000) as usize
    }
}

/// Records from a cpal input device.
#[derive(Debug, Clone)]
pub struct MicrophoneRecorder {
    device: Option<String>,
    calibration: Calibration,
}

impl MicrophoneRecorder {
    pub fn new(config: &SpeechConfig) -> Self {
        Self {
            device: config.device.clone(),
            calibration: Calibration::new(config),
        }
    }

    fn input_device(&self) -> Result<cpal::Device, SpeechError> {
        let host = cpal::default_host();

        if let Some(name) = &self.device {
            let devices = host
                .input_devices()
                .map_err(|e| SpeechError::Device(e.to_string()))?;
            for device in devices {
                if device.name().map(|n| n == *name).unwrap_or(false) {
                    return Ok(device);
                }
            }
            warn!(device = %name, "Input device not found, using default");
        }

        host.default_input_device().ok_or(SpeechError::NoInputDevice)
    }
}

impl AudioRecorder for MicrophoneRecorder {
    fn record(&self, limits: &RecordingLimits) -> Result<Recording, SpeechError> {
        let device = self.input_device()?;
        let config = device
            .default_input_config()
            .map_err(|e| SpeechError::Device(e.to_string()))?;

        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;
        debug!(
            device = ?device.name().ok(),
            sample_rate,
            channels,
            format = ?config.sample_format(),
            "Opening input stream"
        );

        let (tx, rx) = mpsc::channel();
        let stream_config: cpal::StreamConfig = config.clone().into();
        let stream = match config.sample_format() {
            cpal::SampleFormat::U8 => build_stream::<u8>(&device, &stream_config, tx, channels),
            cpal::SampleFormat::I8 => build_stream::<i8>(&device, &stream_config, tx, channels),
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, tx, channels),
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, tx, channels),
            cpal::SampleFormat::I32 => build_stream::<i32>(&device, &stream_config, tx, channels),
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, tx, channels),
            other => {
                return Err(SpeechError::Device(format!(
                    "unsupported sample format {:?}",
                    other
                )));
            }
        }?;
        stream
            .play()
            .map_err(|e| SpeechError::Stream(e.to_string()))?;

        let buffers = std::iter::from_fn(|| rx.recv_timeout(STALL_TIMEOUT).ok());
        let recording = capture(buffers, sample_rate, &self.calibration, limits);
        drop(stream);

        if let Ok(recording) = &recording {
            info!(
                seconds = recording.samples.len() as f32 / sample_rate as f32,
                stop = ?recording.stop,
                "Recording finished"
            );
        }
        recording
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    tx: mpsc::Sender<Vec<f32>>,
    channels: usize,
) -> Result<cpal::Stream, SpeechError>
where
    T: Sample + SizedSample + Send + 'static,
    f32: cpal::FromSample<T>,
{
    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                let samples: Vec<f32> = data.iter().map(|&s| s.to_sample::<f32>()).collect();
                // The receiver is gone once the recording ends.
                let _ = tx.send(downmix(&samples, channels));
            },
            |err| warn!(error = %err, "Audio stream error"),
            None,
        )
        .map_err(|e| SpeechError::Stream(e.to_string()))
}

/// Average interleaved channels into one.
pub(crate) fn downmix(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// Calibrate on the first `calibration.window_ms` of audio, then record until
/// the detector finishes. Calibration audio is not part of the recording.
pub(crate) fn capture<I>(
    buffers: I,
    sample_rate: u32,
    calibration: &Calibration,
    limits: &RecordingLimits,
) -> Result<Recording, SpeechError>
where
    I: IntoIterator<Item = Vec<f32>>,
{
    let stream_ended = || SpeechError::Stream("audio stream stopped delivering samples".to_string());
    let mut buffers = buffers.into_iter();

    let window = calibration.window_samples(sample_rate);
    let mut ambient = Vec::with_capacity(window);
    let mut leftover = Vec::new();
    while ambient.len() < window {
        let buffer = buffers.next().ok_or_else(stream_ended)?;
        let needed = window - ambient.len();
        if buffer.len() > needed {
            ambient.extend_from_slice(&buffer[..needed]);
            leftover = buffer[needed..].to_vec();
        } else {
            ambient.extend(buffer);
        }
    }

    let threshold = calibration.threshold(rms(&ambient));
    debug!(threshold, "Calibrated for ambient noise");

    let mut detector = SilenceDetector::new(threshold, sample_rate, limits);
    let mut samples = Vec::new();
    for buffer in std::iter::once(leftover).chain(buffers) {
        samples.extend_from_slice(&buffer);
        if let DetectorState::Done(stop) = detector.push(&buffer) {
            return Ok(Recording {
                samples,
                sample_rate,
                stop,
            });
        }
    }

    Err(stream_ended())
}
