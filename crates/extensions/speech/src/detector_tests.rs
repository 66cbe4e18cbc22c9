use super::*;

// 1 kHz keeps frame arithmetic simple: one 30 ms frame is 30 samples.
const RATE: u32 = 1000;

fn limits(pause: f32, phrase: f32, wait: f32) -> RecordingLimits {
    RecordingLimits {
        pause_secs: pause,
        phrase_limit_secs: phrase,
        wait_limit_secs: wait,
    }
}

fn frames(level: f32, count: usize) -> Vec<f32> {
    vec![level; 30 * count]
}

#[test]
fn test_rms() {
    assert_eq!(rms(&[]), 0.0);
    assert!((rms(&[0.5, -0.5, 0.5, -0.5]) - 0.5).abs() < 1e-6);
    assert!((rms(&[3.0, 4.0]) - (12.5f32).sqrt()).abs() < 1e-6);
}

#[test]
fn test_starts_waiting() {
    let detector = SilenceDetector::new(0.1, RATE, &limits(0.3, 5.0, 5.0));
    assert_eq!(detector.state(), DetectorState::Waiting);
    assert_eq!(detector.threshold(), 0.1);
}

#[test]
fn test_quiet_input_keeps_waiting() {
    let mut detector = SilenceDetector::new(0.1, RATE, &limits(0.3, 5.0, 5.0));
    assert_eq!(detector.push(&frames(0.01, 10)), DetectorState::Waiting);
}

#[test]
fn test_speech_then_pause_ends_with_silence() {
    let mut detector = SilenceDetector::new(0.1, RATE, &limits(0.3, 5.0, 5.0));

    assert_eq!(detector.push(&frames(0.5, 5)), DetectorState::Speaking);
    // 0.3 s of silence is ten frames; nine is not enough.
    assert_eq!(detector.push(&frames(0.0, 9)), DetectorState::Speaking);
    assert_eq!(
        detector.push(&frames(0.0, 1)),
        DetectorState::Done(StopReason::Silence)
    );
}

#[test]
fn test_short_gap_does_not_end_speech() {
    let mut detector = SilenceDetector::new(0.1, RATE, &limits(0.3, 5.0, 5.0));

    detector.push(&frames(0.5, 5));
    detector.push(&frames(0.0, 5));
    detector.push(&frames(0.5, 1));
    assert_eq!(detector.push(&frames(0.0, 9)), DetectorState::Speaking);
}

#[test]
fn test_phrase_limit() {
    let mut detector = SilenceDetector::new(0.1, RATE, &limits(0.3, 0.6, 5.0));
    assert_eq!(
        detector.push(&frames(0.5, 25)),
        DetectorState::Done(StopReason::PhraseLimit)
    );
}

#[test]
fn test_no_speech_before_wait_limit() {
    let mut detector = SilenceDetector::new(0.1, RATE, &limits(0.3, 5.0, 0.3));
    assert_eq!(
        detector.push(&frames(0.01, 10)),
        DetectorState::Done(StopReason::NoSpeech)
    );
}

#[test]
fn test_partial_frames_are_buffered() {
    let mut detector = SilenceDetector::new(0.1, RATE, &limits(0.3, 5.0, 5.0));

    assert_eq!(detector.push(&[0.5; 20]), DetectorState::Waiting);
    assert_eq!(detector.push(&[0.5; 10]), DetectorState::Speaking);
}

#[test]
fn test_done_is_final() {
    let mut detector = SilenceDetector::new(0.1, RATE, &limits(0.3, 5.0, 0.03));
    assert_eq!(
        detector.push(&frames(0.0, 1)),
        DetectorState::Done(StopReason::NoSpeech)
    );
    assert_eq!(
        detector.push(&frames(0.9, 20)),
        DetectorState::Done(StopReason::NoSpeech)
    );
}

#[test]
fn test_limits_from_config() {
    let config = SpeechConfig::default();

    let phrase = RecordingLimits::phrase(&config);
    assert_eq!(phrase.phrase_limit_secs, 6.0);
    assert!(phrase.pause_secs < config.silence_threshold_secs);

    let command = RecordingLimits::command(&config);
    assert_eq!(command.pause_secs, 2.0);
    assert_eq!(command.phrase_limit_secs, 30.0);
}
