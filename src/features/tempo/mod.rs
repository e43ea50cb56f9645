//! Tempo estimation modules
//!
//! Convert chord-change onsets to a coarse BPM using:
//! - Outlier-trimmed inter-onset intervals
//! - Median interval to BPM conversion
//! - Octave folding and snapping to common tempos

pub mod estimator;

pub use estimator::{
    estimate_tempo, estimate_tempo_detailed, estimate_tempo_from_segments, snap_to_common_bpm,
    COMMON_BPMS, DEFAULT_BPM,
};

/// Tempo estimate with intermediate values
#[derive(Debug, Clone, PartialEq)]
pub struct TempoEstimate {
    /// Final BPM (snapped to a common value)
    pub bpm: u32,

    /// `60 / median interval`, before octave folding (0.0 when defaulted)
    pub raw_bpm: f32,

    /// BPM after octave folding into [60, 200] (0.0 when defaulted)
    pub folded_bpm: f32,

    /// Intervals that survived outlier removal
    pub intervals_used: usize,

    /// True when too little data forced [`DEFAULT_BPM`]
    pub is_default: bool,
}
