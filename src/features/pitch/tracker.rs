//! Autocorrelation pitch detection
//!
//! Algorithm:
//! 1. Reject quiet buffers (RMS gate)
//! 2. Trim leading/trailing samples above the trim threshold so the analyzed
//!    span starts and ends near zero crossings
//! 3. Autocorrelation via FFT: `ACF = IFFT(|FFT(x)|²)`, zero-padded to avoid
//!    circular wrap-around
//! 4. Skip the initial descent from lag 0, then take the strongest lag inside
//!    the allowed frequency range
//! 5. Refine the lag with parabolic interpolation, `f = sample_rate / lag`

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::config::PitchConfig;
use crate::error::AnalysisError;
use crate::features::pitch_class::{semitones_from_a4, A4_MIDI, NOTE_NAMES};
use crate::io::sample_buffer::SampleBuffer;

/// Sentinel returned when no pitch is detected
pub const NO_PITCH: f32 = -1.0;

/// A peak weaker than this fraction of the zero-lag energy counts as unvoiced
const MIN_PEAK_RATIO: f32 = 0.3;

/// Autocorrelation of a real signal through the FFT
fn compute_autocorrelation_fft(signal: &[f32]) -> Vec<f32> {
    let n = signal.len();
    let fft_size = (2 * n).next_power_of_two();

    let mut buffer: Vec<Complex<f32>> = signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
    buffer.resize(fft_size, Complex::new(0.0, 0.0));

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);
    fft.process(&mut buffer);

    for x in &mut buffer {
        *x = *x * x.conj();
    }

    let ifft = planner.plan_fft_inverse(fft_size);
    ifft.process(&mut buffer);

    let scale = 1.0 / fft_size as f32;
    buffer[..n].iter().map(|x| x.re * scale).collect()
}

/// Detect the fundamental frequency of a monophonic buffer
///
/// Returns `None` for silence, unvoiced input, or a pitch outside
/// `[config.min_frequency, config.max_frequency]`.
pub fn detect_pitch(buffer: &[f32], sample_rate: u32, config: &PitchConfig) -> Option<f32> {
    if buffer.len() < 4 || sample_rate == 0 {
        return None;
    }

    let rms = (buffer.iter().map(|x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
    if rms < config.rms_threshold {
        return None;
    }

    let half = buffer.len() / 2;
    let start = (0..half)
        .find(|&i| buffer[i].abs() < config.trim_threshold)
        .unwrap_or(0);
    let end = (1..half)
        .find(|&i| buffer[buffer.len() - i].abs() < config.trim_threshold)
        .map(|i| buffer.len() - i + 1)
        .unwrap_or(buffer.len());
    let span = &buffer[start..end.max(start)];
    if span.len() < 4 {
        return None;
    }

    let acf = compute_autocorrelation_fft(span);
    if acf[0] <= 0.0 {
        return None;
    }

    let sr = sample_rate as f32;
    let min_lag = ((sr / config.max_frequency).floor() as usize).max(1);
    let max_lag = ((sr / config.min_frequency).ceil() as usize).min(acf.len() - 2);
    if min_lag >= max_lag {
        return None;
    }

    let mut descent_end = 0;
    while descent_end + 1 < acf.len() && acf[descent_end] > acf[descent_end + 1] {
        descent_end += 1;
    }
    let search_from = descent_end.max(min_lag);
    if search_from >= max_lag {
        return None;
    }

    let (peak_lag, peak_value) = (search_from..=max_lag)
        .map(|lag| (lag, acf[lag]))
        .fold((search_from, f32::NEG_INFINITY), |best, cur| {
            if cur.1 > best.1 {
                cur
            } else {
                best
            }
        });

    if peak_value < MIN_PEAK_RATIO * acf[0] {
        return None;
    }

    let (y0, y1, y2) = (acf[peak_lag - 1], acf[peak_lag], acf[peak_lag + 1]);
    let curvature = (y0 + y2 - 2.0 * y1) / 2.0;
    let slope = (y2 - y0) / 2.0;
    let refined_lag = if curvature.abs() > f32::EPSILON {
        peak_lag as f32 - slope / (2.0 * curvature)
    } else {
        peak_lag as f32
    };

    let frequency = sr / refined_lag;
    if frequency.is_finite()
        && frequency >= config.min_frequency
        && frequency <= config.max_frequency
    {
        Some(frequency)
    } else {
        None
    }
}

/// Pitch of one buffer in Hz, or [`NO_PITCH`]
///
/// Uses the default [`PitchConfig`] band (50–2000 Hz).
pub fn pitch_tracker_update(buffer: &[f32], sample_rate: u32) -> f32 {
    detect_pitch(buffer, sample_rate, &PitchConfig::default()).unwrap_or(NO_PITCH)
}

/// Nearest equal-tempered note for a frequency
#[derive(Debug, Clone, PartialEq)]
pub struct NoteReading {
    /// Note name, e.g. "A"
    pub name: &'static str,
    /// Scientific pitch octave (A4 = 440 Hz)
    pub octave: i32,
    /// MIDI note number
    pub midi: i32,
    /// Deviation from the note in cents (-50..50)
    pub cents: f32,
}

/// Convert a frequency to its nearest note and cent offset
pub fn frequency_to_note(frequency: f32) -> Option<NoteReading> {
    let semitones = semitones_from_a4(frequency)?;
    let nearest = semitones.round();
    let midi = nearest as i32 + A4_MIDI;
    Some(NoteReading {
        name: NOTE_NAMES[midi.rem_euclid(12) as usize],
        octave: midi.div_euclid(12) - 1,
        midi,
        cents: (semitones - nearest) * 100.0,
    })
}

/// Streaming pitch tracker for chunked live input
///
/// Buffers incoming chunks, analyzes a frame every `hop_size` samples and
/// remembers the most recent reading.
#[derive(Debug)]
pub struct PitchTracker {
    config: PitchConfig,
    sample_rate: u32,
    buffer: SampleBuffer,
    last_pitch: f32,
}

impl PitchTracker {
    /// Create a tracker for a live stream at `sample_rate`
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::EmptyInput` for a zero sample rate and
    /// `AnalysisError::InvalidConfig` for an unusable frame/hop size or band.
    pub fn new(config: PitchConfig, sample_rate: u32) -> Result<Self, AnalysisError> {
        if sample_rate == 0 {
            return Err(AnalysisError::EmptyInput("Invalid sample rate".to_string()));
        }
        config.validate()?;
        Ok(Self {
            buffer: SampleBuffer::new(config.frame_size * 2),
            config,
            sample_rate,
            last_pitch: NO_PITCH,
        })
    }

    /// Feed a chunk of samples; returns the latest pitch or [`NO_PITCH`]
    ///
    /// Every complete frame in the buffer is analyzed, so a large chunk
    /// advances the tracker by several hops at once.
    pub fn push(&mut self, samples: &[f32]) -> f32 {
        self.buffer.push(samples);
        while let Some(frame) = self
            .buffer
            .next_frame(self.config.frame_size, self.config.hop_size)
        {
            self.last_pitch =
                detect_pitch(&frame, self.sample_rate, &self.config).unwrap_or(NO_PITCH);
        }
        self.last_pitch
    }

    /// Most recent reading
    pub fn last_pitch(&self) -> f32 {
        self.last_pitch
    }

    /// Forget buffered audio and the last reading
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.last_pitch = NO_PITCH;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const SR: u32 = 44100;

    fn sine(freq: f32, len: usize, amplitude: f32) -> Vec<f32> {
        (0..len)
            .map(|i| amplitude * (2.0 * PI * freq * i as f32 / SR as f32).sin())
            .collect()
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() / expected < 0.01,
            "expected ~{} Hz, got {} Hz",
            expected,
            actual
        );
    }

    #[test]
    fn test_detects_a4() {
        assert_close(pitch_tracker_update(&sine(440.0, 2048, 0.8), SR), 440.0);
    }

    #[test]
    fn test_detects_low_and_high_notes() {
        assert_close(pitch_tracker_update(&sine(110.0, 4096, 0.8), SR), 110.0);
        assert_close(pitch_tracker_update(&sine(987.77, 2048, 0.8), SR), 987.77);
    }

    #[test]
    fn test_silence_and_quiet_input() {
        assert_eq!(pitch_tracker_update(&vec![0.0; 2048], SR), NO_PITCH);
        assert_eq!(pitch_tracker_update(&sine(440.0, 2048, 0.001), SR), NO_PITCH);
        assert_eq!(pitch_tracker_update(&[], SR), NO_PITCH);
        assert_eq!(pitch_tracker_update(&sine(440.0, 2048, 0.8), 0), NO_PITCH);
    }

    #[test]
    fn test_out_of_range_pitch() {
        // 30 Hz is below the default 50 Hz floor
        assert_eq!(pitch_tracker_update(&sine(30.0, 8192, 0.8), SR), NO_PITCH);
    }

    #[test]
    fn test_frequency_to_note() {
        let a4 = frequency_to_note(440.0).unwrap();
        assert_eq!((a4.name, a4.octave, a4.midi), ("A", 4, 69));
        assert!(a4.cents.abs() < 1e-3);

        let c4 = frequency_to_note(261.63).unwrap();
        assert_eq!((c4.name, c4.octave), ("C", 4));

        let sharp = frequency_to_note(446.0).unwrap();
        assert_eq!(sharp.name, "A");
        assert!(sharp.cents > 20.0 && sharp.cents < 30.0);

        assert!(frequency_to_note(0.0).is_none());
    }

    #[test]
    fn test_streaming_tracker() {
        let config = PitchConfig::default();
        let mut tracker = PitchTracker::new(config, SR).unwrap();
        let signal = sine(220.0, 8192, 0.5);

        // Not enough samples yet
        assert_eq!(tracker.push(&signal[..1000]), NO_PITCH);

        let mut reading = NO_PITCH;
        for chunk in signal[1000..].chunks(512) {
            reading = tracker.push(chunk);
        }
        assert_close(reading, 220.0);
        assert_close(tracker.last_pitch(), 220.0);

        tracker.reset();
        assert_eq!(tracker.last_pitch(), NO_PITCH);
    }

    #[test]
    fn test_tracker_rejects_bad_setup() {
        assert!(PitchTracker::new(PitchConfig::default(), 0).is_err());
        let config = PitchConfig {
            hop_size: 0,
            ..PitchConfig::default()
        };
        assert!(PitchTracker::new(config, SR).is_err());

        let inverted_band = PitchConfig {
            min_frequency: 2000.0,
            max_frequency: 50.0,
            ..PitchConfig::default()
        };
        assert!(matches!(
            PitchTracker::new(inverted_band, SR),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }
}
