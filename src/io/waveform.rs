//! Borrowed view over a decoded mono waveform
//!
//! Decoding and resampling happen outside this crate; callers hand in `f32`
//! samples in [-1.0, 1.0] together with their sample rate.

use crate::error::AnalysisError;

/// Decoded mono samples plus sample rate
#[derive(Debug, Clone, Copy)]
pub struct Waveform<'a> {
    samples: &'a [f32],
    sample_rate: u32,
}

impl<'a> Waveform<'a> {
    /// Wrap decoded samples
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::EmptyInput` when `samples` is empty or
    /// `sample_rate` is zero.
    pub fn new(samples: &'a [f32], sample_rate: u32) -> Result<Self, AnalysisError> {
        if samples.is_empty() {
            return Err(AnalysisError::EmptyInput("Empty audio samples".to_string()));
        }
        if sample_rate == 0 {
            return Err(AnalysisError::EmptyInput("Invalid sample rate".to_string()));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// All samples
    pub fn samples(&self) -> &'a [f32] {
        self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; construction rejects empty input
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total duration in seconds
    pub fn duration_seconds(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Sample index nearest to `seconds`, clamped to the waveform length
    pub fn sample_index(&self, seconds: f32) -> usize {
        let idx = (seconds.max(0.0) as f64 * self.sample_rate as f64).round() as usize;
        idx.min(self.samples.len())
    }

    /// Samples in `[start, start + length)` seconds, clamped to the waveform
    pub fn slice_seconds(&self, start: f32, length: f32) -> &'a [f32] {
        let begin = self.sample_index(start);
        let end = self.sample_index(start + length).max(begin);
        &self.samples[begin..end]
    }
}
