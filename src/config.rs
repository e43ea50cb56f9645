//! Configuration parameters for chord analysis

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Sliding-window segmentation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Analysis window duration in seconds (default: 2.0)
    pub window_seconds: f32,

    /// Hop between window starts in seconds (default: 1.0, 50% overlap)
    pub hop_seconds: f32,

    /// Minimum template similarity for a window to emit a chord (default: 0.3)
    pub confidence_threshold: f32,

    /// Upper bound on analyzed windows (default: None = unbounded)
    ///
    /// Windows past the bound are skipped and the result is flagged as truncated.
    pub max_windows: Option<usize>,

    /// Analyze windows on the rayon thread pool (default: false)
    pub parallel: bool,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            window_seconds: 2.0,
            hop_seconds: 1.0,
            confidence_threshold: 0.3,
            max_windows: None,
            parallel: false,
        }
    }
}

/// Chroma extraction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromaConfig {
    /// FFT size of each sub-window (default: 4096)
    pub sub_window_size: usize,

    /// Lowest bin center frequency folded into chroma (default: 80 Hz)
    pub min_frequency: f32,

    /// Highest bin center frequency folded into chroma (default: 2000 Hz)
    pub max_frequency: f32,
}

impl Default for ChromaConfig {
    fn default() -> Self {
        Self {
            sub_window_size: 4096,
            min_frequency: 80.0,
            max_frequency: 2000.0,
        }
    }
}

/// Live pitch tracking parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchConfig {
    /// Samples per analysis frame (default: 2048)
    pub frame_size: usize,

    /// Samples consumed between successive frames (default: 1024)
    pub hop_size: usize,

    /// Lowest reported pitch in Hz (default: 50)
    pub min_frequency: f32,

    /// Highest reported pitch in Hz (default: 2000)
    pub max_frequency: f32,

    /// RMS below which a frame counts as silent (default: 0.01)
    pub rms_threshold: f32,

    /// Edge samples below this amplitude are trimmed before correlating (default: 0.2)
    pub trim_threshold: f32,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            frame_size: 2048,
            hop_size: 1024,
            min_frequency: 50.0,
            max_frequency: 2000.0,
            rms_threshold: 0.01,
            trim_threshold: 0.2,
        }
    }
}

/// Analysis configuration parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Sliding-window segmentation
    pub segmenter: SegmenterConfig,

    /// Chroma extraction
    pub chroma: ChromaConfig,

    /// Live pitch tracking
    pub pitch: PitchConfig,
}

impl AnalysisConfig {
    /// Check the segmentation and chroma parameters used by file analysis
    ///
    /// `pitch` is only consumed by the live tracker and is checked there, see
    /// [`PitchConfig::validate`].
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let seg = &self.segmenter;
        if !(seg.window_seconds.is_finite() && seg.window_seconds > 0.0) {
            return Err(invalid(format!(
                "window_seconds must be > 0, got {}",
                seg.window_seconds
            )));
        }
        if !(seg.hop_seconds.is_finite() && seg.hop_seconds > 0.0) {
            return Err(invalid(format!(
                "hop_seconds must be > 0, got {}",
                seg.hop_seconds
            )));
        }
        if seg.hop_seconds > seg.window_seconds {
            return Err(invalid(format!(
                "hop_seconds ({}) must not exceed window_seconds ({})",
                seg.hop_seconds, seg.window_seconds
            )));
        }
        if !(0.0..=1.0).contains(&seg.confidence_threshold) {
            return Err(invalid(format!(
                "confidence_threshold must be within [0, 1], got {}",
                seg.confidence_threshold
            )));
        }
        if seg.max_windows == Some(0) {
            return Err(invalid("max_windows must be > 0 when set".to_string()));
        }

        let chroma = &self.chroma;
        if chroma.sub_window_size < 2 || !chroma.sub_window_size.is_power_of_two() {
            return Err(invalid(format!(
                "sub_window_size must be a power of two >= 2, got {}",
                chroma.sub_window_size
            )));
        }
        if !(chroma.min_frequency > 0.0 && chroma.min_frequency < chroma.max_frequency) {
            return Err(invalid(format!(
                "chroma band must satisfy 0 < min < max, got [{}, {}]",
                chroma.min_frequency, chroma.max_frequency
            )));
        }

        Ok(())
    }
}

impl PitchConfig {
    /// Check that frame, hop and band are usable
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidConfig` naming the offending field.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.frame_size < 4 || self.hop_size == 0 {
            return Err(invalid(format!(
                "pitch frame_size must be >= 4 and hop_size > 0, got {} / {}",
                self.frame_size, self.hop_size
            )));
        }
        if !(self.min_frequency > 0.0 && self.min_frequency < self.max_frequency) {
            return Err(invalid(format!(
                "pitch band must satisfy 0 < min < max, got [{}, {}]",
                self.min_frequency, self.max_frequency
            )));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> AnalysisError {
    AnalysisError::InvalidConfig(msg)
}
