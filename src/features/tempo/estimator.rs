//! Tempo estimation from chord onset times
//!
//! Algorithm:
//! 1. Inter-onset intervals `t[i] - t[i-1]` (needs at least 3 onsets)
//! 2. Drop intervals more than 2 standard deviations from the mean
//! 3. Median of the survivors, `bpm = 60 / median`
//! 4. Fold into [60, 200] by doubling or halving
//! 5. Snap to the nearest entry of [`COMMON_BPMS`]
//!
//! Chord changes are assumed to land on beats or simple multiples of them,
//! so this is a coarse estimate, not a beat tracker.

use super::TempoEstimate;
use crate::analysis::result::ChordSegment;

/// Tempo reported when there is not enough data
pub const DEFAULT_BPM: u32 = 120;

/// Minimum onsets for a real estimate
const MIN_ONSETS: usize = 3;

/// Folding range
const MIN_FOLDED_BPM: f32 = 60.0;
const MAX_FOLDED_BPM: f32 = 200.0;

/// Outlier cutoff in standard deviations
const OUTLIER_STD_DEVS: f32 = 2.0;

/// Snap targets, ascending: multiples of 5 from 60 to 200 plus common
/// non-multiples
pub const COMMON_BPMS: [u32; 36] = [
    60, 65, 70, 72, 75, 80, 84, 85, 90, 95, 96, 100, 105, 110, 115, 120, 125, 126, 128, 130, 132,
    135, 140, 145, 150, 155, 160, 165, 170, 174, 175, 180, 185, 190, 195, 200,
];

/// Nearest entry of [`COMMON_BPMS`]; the lower entry wins an exact tie
pub fn snap_to_common_bpm(bpm: f32) -> u32 {
    let mut best = COMMON_BPMS[0];
    let mut best_diff = f32::INFINITY;
    for &candidate in COMMON_BPMS.iter() {
        let diff = (candidate as f32 - bpm).abs();
        if diff < best_diff {
            best = candidate;
            best_diff = diff;
        }
    }
    best
}

fn default_estimate() -> TempoEstimate {
    TempoEstimate {
        bpm: DEFAULT_BPM,
        raw_bpm: 0.0,
        folded_bpm: 0.0,
        intervals_used: 0,
        is_default: true,
    }
}

fn median(sorted: &[f32]) -> f32 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Estimate tempo from onset times, keeping intermediate values
///
/// # Arguments
///
/// * `start_times` - Chord segment start times in seconds, ascending
///
/// # Returns
///
/// [`TempoEstimate`]; `is_default` is set when fewer than 3 onsets were given
/// or outlier removal left nothing usable.
pub fn estimate_tempo_detailed(start_times: &[f32]) -> TempoEstimate {
    if start_times.len() < MIN_ONSETS {
        log::debug!(
            "Only {} onsets, using default tempo {} BPM",
            start_times.len(),
            DEFAULT_BPM
        );
        return default_estimate();
    }

    let intervals: Vec<f32> = start_times.windows(2).map(|w| w[1] - w[0]).collect();

    let n = intervals.len() as f32;
    let mean = intervals.iter().sum::<f32>() / n;
    let variance = intervals.iter().map(|x| (x - mean).powi(2)).sum::<f32>() / n;
    let std_dev = variance.sqrt();
    let cutoff = OUTLIER_STD_DEVS * std_dev;

    let mut kept: Vec<f32> = intervals
        .iter()
        .copied()
        .filter(|x| x.is_finite() && *x > 0.0 && (x - mean).abs() <= cutoff)
        .collect();

    if kept.is_empty() {
        log::warn!(
            "All {} inter-onset intervals rejected, using default tempo {} BPM",
            intervals.len(),
            DEFAULT_BPM
        );
        return default_estimate();
    }

    kept.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median_interval = median(&kept);
    let raw_bpm = 60.0 / median_interval;

    let mut folded_bpm = raw_bpm;
    while folded_bpm < MIN_FOLDED_BPM {
        folded_bpm *= 2.0;
    }
    while folded_bpm > MAX_FOLDED_BPM {
        folded_bpm /= 2.0;
    }

    let bpm = snap_to_common_bpm(folded_bpm);

    log::debug!(
        "Tempo: {}/{} intervals kept, median {:.3}s, raw {:.1} BPM, folded {:.1}, snapped {}",
        kept.len(),
        intervals.len(),
        median_interval,
        raw_bpm,
        folded_bpm,
        bpm
    );

    TempoEstimate {
        bpm,
        raw_bpm,
        folded_bpm,
        intervals_used: kept.len(),
        is_default: false,
    }
}

/// Estimate tempo (BPM) from onset times
///
/// # Example
///
/// ```
/// use chordsync::features::tempo::estimate_tempo;
///
/// // Two-second chord changes: 30 BPM folds up to 60
/// assert_eq!(estimate_tempo(&[0.0, 2.0, 4.0, 6.0, 8.0]), 60);
/// // Too few onsets
/// assert_eq!(estimate_tempo(&[0.0, 2.0]), 120);
/// ```
pub fn estimate_tempo(start_times: &[f32]) -> u32 {
    estimate_tempo_detailed(start_times).bpm
}

/// Estimate tempo from a chord timeline's segment start times
pub fn estimate_tempo_from_segments(segments: &[ChordSegment]) -> u32 {
    let times: Vec<f32> = segments.iter().map(|s| s.time).collect();
    estimate_tempo(&times)
}
