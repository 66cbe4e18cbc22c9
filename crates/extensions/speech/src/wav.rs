//! WAV encoding for transcription uploads.

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};
use voxnav_protocols::SpeechError;

/// Encode mono `f32` samples as 16-bit PCM WAV. Samples are clamped to [-1, 1].
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, SpeechError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer =
        WavWriter::new(&mut cursor, spec).map_err(|e| SpeechError::Encoding(e.to_string()))?;
    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer
            .write_sample(value)
            .map_err(|e| SpeechError::Encoding(e.to_string()))?;
    }
    writer
        .finalize()
        .map_err(|e| SpeechError::Encoding(e.to_string()))?;

    Ok(cursor.into_inner())
}
