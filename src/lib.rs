//! # chordsync
//!
//! Chord, key and tempo analysis for play-along applications: turn a mono
//! waveform into a time-stamped chord timeline, a global key and a coarse
//! tempo, plus a lightweight pitch tracker for live input.
//!
//! ## Features
//!
//! - **Chord Timeline**: Sliding-window chroma extraction matched against 24 triad templates
//! - **Key Detection**: Weighted diatonic chord profiles over the detected chord sequence
//! - **Tempo**: Median chord-change interval with octave folding and snapping to common BPMs
//! - **Pitch Tracking**: FFT autocorrelation for monophonic live input
//!
//! ## Quick Start
//!
//! ```no_run
//! use chordsync::analyze_waveform;
//!
//! // Decoded mono samples, f32 in [-1.0, 1.0]
//! let samples: Vec<f32> = vec![0.0; 44100 * 10];
//! let sample_rate = 44100;
//!
//! let result = analyze_waveform(&samples, sample_rate)?;
//!
//! println!("Key: {} / Tempo: {} BPM", result.key, result.tempo);
//! for chord in &result.chords {
//!     println!("{:>6.2}s  {:<3} ({:.2})", chord.time, chord.name, chord.confidence);
//! }
//! # Ok::<(), chordsync::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! The analysis pipeline follows this flow:
//!
//! ```text
//! Waveform → Windows → Spectrum → Chroma → Chord Match → Merge → Key + Tempo → Output
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod preprocessing;

use std::sync::atomic::AtomicBool;
use std::time::Instant;

// Re-export main types
pub use analysis::metadata::AnalysisMetadata;
pub use analysis::result::{AnalysisResult, ChordSegment, Key};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use features::pitch::{pitch_tracker_update, PitchTracker, NO_PITCH};

use features::chords::{segment_chords, segment_chords_cancellable, SegmentationOutput};
use features::key::estimate_key;
use features::tempo::estimate_tempo_from_segments;
use io::waveform::Waveform;

/// Main analysis function
///
/// Analyzes a mono waveform with the default [`AnalysisConfig`] and returns
/// the chord timeline, global key and tempo.
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz (typically 44100 or 48000)
///
/// # Errors
///
/// Returns `AnalysisError::EmptyInput` if `samples` is empty or
/// `sample_rate` is zero. Nothing partial is produced.
///
/// # Example
///
/// ```
/// use chordsync::{analyze_waveform, Key};
///
/// let silence = vec![0.0f32; 44100 * 4];
/// let result = analyze_waveform(&silence, 44100)?;
/// assert!(result.chords.is_empty());
/// assert_eq!(result.key, Key::Major(0));
/// assert_eq!(result.tempo, 120);
/// # Ok::<(), chordsync::AnalysisError>(())
/// ```
pub fn analyze_waveform(samples: &[f32], sample_rate: u32) -> Result<AnalysisResult, AnalysisError> {
    analyze_waveform_with_config(samples, sample_rate, &AnalysisConfig::default())
}

/// Analyze a mono waveform with explicit configuration
///
/// # Errors
///
/// Returns `AnalysisError::EmptyInput` for empty input or a zero sample
/// rate, and `AnalysisError::InvalidConfig` if `config` fails validation.
pub fn analyze_waveform_with_config(
    samples: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
) -> Result<AnalysisResult, AnalysisError> {
    run_analysis(samples, sample_rate, config, None)
}

/// Analyze a mono waveform, aborting once `cancel` is set
///
/// Intended for long files analyzed off the UI thread: another thread stores
/// `true` into `cancel` and the analysis returns `AnalysisError::Cancelled`
/// at the next window boundary.
///
/// # Errors
///
/// Same as [`analyze_waveform_with_config`], plus `AnalysisError::Cancelled`.
pub fn analyze_waveform_cancellable(
    samples: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
    cancel: &AtomicBool,
) -> Result<AnalysisResult, AnalysisError> {
    run_analysis(samples, sample_rate, config, Some(cancel))
}

fn run_analysis(
    samples: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
    cancel: Option<&AtomicBool>,
) -> Result<AnalysisResult, AnalysisError> {
    let start_time = Instant::now();

    log::debug!(
        "Starting chord analysis: {} samples at {} Hz",
        samples.len(),
        sample_rate
    );

    let waveform = Waveform::new(samples, sample_rate)?;

    // Chord timeline
    let SegmentationOutput {
        segments,
        windows_analyzed,
        windows_below_threshold,
        truncated,
    } = match cancel {
        Some(flag) => segment_chords_cancellable(&waveform, config, flag)?,
        None => segment_chords(&waveform, config)?,
    };

    // Key and tempo from the timeline
    let names: Vec<&str> = segments.iter().map(|s| s.name.as_str()).collect();
    let key = estimate_key(&names);
    let tempo = estimate_tempo_from_segments(&segments);

    let mut warnings = Vec::new();
    if truncated {
        warnings.push(format!(
            "Analysis limited to the first {} windows",
            windows_analyzed
        ));
    }
    if segments.is_empty() {
        log::warn!(
            "No window reached confidence {:.2}; key and tempo are defaults",
            config.segmenter.confidence_threshold
        );
        warnings.push("No confident chords detected".to_string());
    }

    let processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;

    log::debug!(
        "Analysis complete: {} chords, key {}, {} BPM in {:.2} ms",
        segments.len(),
        key,
        tempo,
        processing_time_ms
    );

    Ok(AnalysisResult {
        key,
        tempo,
        chords: segments,
        metadata: AnalysisMetadata {
            duration_seconds: waveform.duration_seconds(),
            sample_rate,
            processing_time_ms,
            windows_analyzed,
            windows_below_threshold,
            truncated,
            warnings,
            ..AnalysisMetadata::default()
        },
    })
}
