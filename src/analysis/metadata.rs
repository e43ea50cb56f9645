//! Analysis metadata structures

use serde::{Deserialize, Serialize};

/// Analysis metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Audio duration in seconds
    pub duration_seconds: f32,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Processing time in milliseconds
    pub processing_time_ms: f32,

    /// Algorithm version
    pub algorithm_version: String,

    /// Analysis windows evaluated
    pub windows_analyzed: usize,

    /// Windows whose best match fell below the confidence threshold
    pub windows_below_threshold: usize,

    /// Set when `max_windows` cut the analysis short
    pub truncated: bool,

    /// Human-readable warnings (truncation, no confident chords, ...)
    pub warnings: Vec<String>,
}

impl Default for AnalysisMetadata {
    fn default() -> Self {
        Self {
            duration_seconds: 0.0,
            sample_rate: 0,
            processing_time_ms: 0.0,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            windows_analyzed: 0,
            windows_below_threshold: 0,
            truncated: false,
            warnings: vec![],
        }
    }
}
