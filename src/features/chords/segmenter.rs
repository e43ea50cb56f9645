//! Sliding-window chord segmentation
//!
//! Algorithm:
//! 1. Slide a window of `window_seconds` across the waveform in steps of
//!    `hop_seconds`, keeping only windows that fit entirely
//! 2. Compute each window's chroma vector and best triad match
//! 3. Keep matches at or above `confidence_threshold` as provisional segments
//!    (low-confidence windows leave a gap in the timeline)
//! 4. Merge consecutive provisional segments with the same name into one
//!    contiguous segment, clipping where different chords overlap
//!
//! Per-window work is independent and may run on the rayon pool; the merge
//! pass is sequential over segments in start-time order.

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use super::matcher::{match_chord, ChordMatch};
use crate::analysis::result::ChordSegment;
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::features::chroma::ChromaExtractor;
use crate::io::waveform::Waveform;

/// Output of the segmentation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentationOutput {
    /// Merged, time-ordered, non-overlapping chord segments
    pub segments: Vec<ChordSegment>,

    /// Windows evaluated
    pub windows_analyzed: usize,

    /// Windows rejected by the confidence threshold
    pub windows_below_threshold: usize,

    /// True when `max_windows` stopped the scan early
    pub truncated: bool,
}

/// Start times (seconds) of every window that fits inside the waveform
///
/// Times are computed as `i * hop` rather than accumulated, so long inputs do
/// not drift. Returns the (possibly bounded) start list and whether the bound
/// dropped any windows.
pub fn window_starts(waveform: &Waveform<'_>, config: &AnalysisConfig) -> (Vec<f32>, bool) {
    let seg = &config.segmenter;
    // Not clamped to the waveform, so short inputs yield no window at all
    let window_len =
        ((seg.window_seconds as f64 * waveform.sample_rate() as f64).round() as usize).max(1);
    let total = waveform.len();

    let mut starts = Vec::new();
    if !(seg.hop_seconds > 0.0) {
        return (starts, false);
    }
    let mut i = 0usize;
    loop {
        let t = i as f32 * seg.hop_seconds;
        let start = waveform.sample_index(t);
        if start.saturating_add(window_len) > total || start >= total {
            break;
        }
        starts.push(t);
        i += 1;
    }

    let mut truncated = false;
    if let Some(max) = seg.max_windows {
        if starts.len() > max {
            log::warn!(
                "Limiting analysis to {} of {} windows ({:.1}s of {:.1}s)",
                max,
                starts.len(),
                starts[max],
                waveform.duration_seconds()
            );
            starts.truncate(max);
            truncated = true;
        }
    }

    (starts, truncated)
}

/// Merge consecutive same-name segments
///
/// Input must be sorted by start time. A run of identical names collapses to
/// one segment spanning the run, keeping the highest confidence. When the next
/// segment carries a different name and starts before the current one ends,
/// the current one is clipped to end where the next begins, so the output is
/// non-overlapping and no two neighbors share a name.
///
/// # Example
///
/// ```
/// use chordsync::analysis::result::ChordSegment;
/// use chordsync::features::chords::merge_segments;
///
/// let seg = |name: &str, time: f32, confidence: f32| ChordSegment {
///     name: name.to_string(),
///     time,
///     duration: 2.0,
///     confidence,
/// };
/// let merged = merge_segments(vec![seg("C", 0.0, 0.5), seg("C", 1.0, 0.9), seg("G", 2.0, 0.7)]);
/// assert_eq!(merged.len(), 2);
/// assert_eq!(merged[0].duration, 2.0);
/// assert_eq!(merged[0].confidence, 0.9);
/// assert_eq!(merged[1].time, 2.0);
/// ```
pub fn merge_segments(provisional: Vec<ChordSegment>) -> Vec<ChordSegment> {
    let mut merged: Vec<ChordSegment> = Vec::with_capacity(provisional.len());
    let mut iter = provisional.into_iter();

    let mut current = match iter.next() {
        Some(first) => first,
        None => return merged,
    };

    for next in iter {
        if next.name == current.name {
            current.duration = next.end().max(current.end()) - current.time;
            current.confidence = current.confidence.max(next.confidence);
            continue;
        }

        if current.end() > next.time {
            current.duration = next.time - current.time;
        }
        if current.duration > 0.0 {
            merged.push(current);
        }
        current = next;
    }

    // Flush the trailing segment
    if current.duration > 0.0 {
        merged.push(current);
    }
    merged
}

/// Segment a waveform into a chord timeline
///
/// # Errors
///
/// Returns `AnalysisError::InvalidConfig` if the configuration is unusable.
pub fn segment_chords(
    waveform: &Waveform<'_>,
    config: &AnalysisConfig,
) -> Result<SegmentationOutput, AnalysisError> {
    run_segmentation(waveform, config, None)
}

/// Like [`segment_chords`], but stops with `AnalysisError::Cancelled` once
/// `cancel` is set
///
/// The flag is checked before every window, so cancellation latency is one
/// window's worth of FFTs.
pub fn segment_chords_cancellable(
    waveform: &Waveform<'_>,
    config: &AnalysisConfig,
    cancel: &AtomicBool,
) -> Result<SegmentationOutput, AnalysisError> {
    run_segmentation(waveform, config, Some(cancel))
}

fn run_segmentation(
    waveform: &Waveform<'_>,
    config: &AnalysisConfig,
    cancel: Option<&AtomicBool>,
) -> Result<SegmentationOutput, AnalysisError> {
    config.validate()?;

    let seg = &config.segmenter;
    let (starts, truncated) = window_starts(waveform, config);

    log::debug!(
        "Segmenting {:.2}s: {} windows of {:.2}s, hop {:.2}s, threshold {:.2} (parallel={})",
        waveform.duration_seconds(),
        starts.len(),
        seg.window_seconds,
        seg.hop_seconds,
        seg.confidence_threshold,
        seg.parallel
    );

    let is_cancelled = || cancel.is_some_and(|flag| flag.load(Ordering::Relaxed));

    let matches: Vec<Option<(f32, ChordMatch)>> = if seg.parallel {
        starts
            .par_iter()
            .map_init(
                || ChromaExtractor::new(&config.chroma, waveform.sample_rate()),
                |extractor, &t| {
                    if is_cancelled() {
                        return None;
                    }
                    Some((t, analyze_window(extractor, waveform, t, seg.window_seconds)))
                },
            )
            .collect()
    } else {
        let mut extractor = ChromaExtractor::new(&config.chroma, waveform.sample_rate());
        let mut out = Vec::with_capacity(starts.len());
        for &t in &starts {
            if is_cancelled() {
                return Err(AnalysisError::Cancelled);
            }
            out.push(Some((
                t,
                analyze_window(&mut extractor, waveform, t, seg.window_seconds),
            )));
        }
        out
    };

    if is_cancelled() {
        return Err(AnalysisError::Cancelled);
    }

    let windows_analyzed = matches.len();
    let mut provisional = Vec::with_capacity(windows_analyzed);
    let mut windows_below_threshold = 0;

    for (t, best) in matches.into_iter().flatten() {
        if best.confidence >= seg.confidence_threshold {
            provisional.push(ChordSegment {
                name: best.name,
                time: t,
                duration: seg.window_seconds,
                confidence: best.confidence,
            });
        } else {
            windows_below_threshold += 1;
        }
    }

    provisional.sort_by(|a, b| {
        a.time
            .partial_cmp(&b.time)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let provisional_count = provisional.len();
    let segments = merge_segments(provisional);

    log::debug!(
        "Segmentation: {} provisional segments merged into {} ({} windows below threshold)",
        provisional_count,
        segments.len(),
        windows_below_threshold
    );

    Ok(SegmentationOutput {
        segments,
        windows_analyzed,
        windows_below_threshold,
        truncated,
    })
}

fn analyze_window(
    extractor: &mut ChromaExtractor,
    waveform: &Waveform<'_>,
    start: f32,
    length: f32,
) -> ChordMatch {
    let window = waveform.slice_seconds(start, length);
    let chroma = extractor.extract(window);
    match_chord(&chroma)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const SR: u32 = 22050;

    fn triad(freqs: [f32; 3], seconds: f32) -> Vec<f32> {
        let len = (seconds * SR as f32) as usize;
        (0..len)
            .map(|i| {
                let t = i as f32 / SR as f32;
                freqs.iter().map(|f| (2.0 * PI * f * t).sin()).sum::<f32>() / 3.0
            })
            .collect()
    }

    fn seg(name: &str, time: f32, duration: f32, confidence: f32) -> ChordSegment {
        ChordSegment {
            name: name.to_string(),
            time,
            duration,
            confidence,
        }
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge_segments(vec![]).is_empty());
    }

    #[test]
    fn test_merge_same_name_run() {
        let merged = merge_segments(vec![
            seg("C", 0.0, 2.0, 0.6),
            seg("C", 1.0, 2.0, 0.8),
            seg("C", 2.0, 2.0, 0.7),
        ]);
        assert_eq!(merged, vec![seg("C", 0.0, 4.0, 0.8)]);
    }

    #[test]
    fn test_merge_clips_overlap_between_different_chords() {
        let merged = merge_segments(vec![
            seg("C", 0.0, 2.0, 0.9),
            seg("C", 1.0, 2.0, 0.9),
            seg("Am", 2.0, 2.0, 0.8),
            seg("Am", 3.0, 2.0, 0.7),
            seg("F", 4.0, 2.0, 0.6),
        ]);
        let names: Vec<&str> = merged.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["C", "Am", "F"]);
        assert_eq!(merged[0].end(), 2.0);
        assert_eq!(merged[1].time, 2.0);
        assert_eq!(merged[1].end(), 4.0);
        assert_eq!(merged[2].end(), 6.0);
    }

    #[test]
    fn test_merge_keeps_gaps() {
        let merged = merge_segments(vec![seg("C", 0.0, 2.0, 0.9), seg("G", 5.0, 2.0, 0.9)]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].duration, 2.0);
        assert_eq!(merged[1].time, 5.0);
    }

    #[test]
    fn test_window_starts() {
        let samples = vec![0.0f32; SR as usize * 5];
        let waveform = Waveform::new(&samples, SR).unwrap();
        let (starts, truncated) = window_starts(&waveform, &AnalysisConfig::default());
        // t + 2 <= 5
        assert_eq!(starts, vec![0.0, 1.0, 2.0, 3.0]);
        assert!(!truncated);

        let mut config = AnalysisConfig::default();
        config.segmenter.max_windows = Some(2);
        let (starts, truncated) = window_starts(&waveform, &config);
        assert_eq!(starts, vec![0.0, 1.0]);
        assert!(truncated);
    }

    #[test]
    fn test_window_must_fit_entirely() {
        let short = vec![0.0f32; SR as usize * 3 / 2];
        let waveform = Waveform::new(&short, SR).unwrap();
        let (starts, _) = window_starts(&waveform, &AnalysisConfig::default());
        assert!(starts.is_empty(), "1.5s input produced windows {:?}", starts);

        let one_short = vec![0.0f32; SR as usize * 2 - 1];
        let waveform = Waveform::new(&one_short, SR).unwrap();
        assert!(window_starts(&waveform, &AnalysisConfig::default()).0.is_empty());

        let exact = vec![0.0f32; SR as usize * 2];
        let waveform = Waveform::new(&exact, SR).unwrap();
        assert_eq!(window_starts(&waveform, &AnalysisConfig::default()).0, vec![0.0]);
    }

    #[test]
    fn test_shorter_than_one_window_yields_nothing() {
        let samples = triad([261.63, 329.63, 392.0], 1.5);
        let waveform = Waveform::new(&samples, SR).unwrap();
        let output = segment_chords(&waveform, &AnalysisConfig::default()).unwrap();
        assert!(output.segments.is_empty());
        assert_eq!(output.windows_analyzed, 0);
    }

    #[test]
    fn test_sustained_chord_is_one_segment() {
        let samples = triad([261.63, 329.63, 392.0], 6.0);
        let waveform = Waveform::new(&samples, SR).unwrap();
        let output = segment_chords(&waveform, &AnalysisConfig::default()).unwrap();

        assert_eq!(output.windows_analyzed, 5);
        assert_eq!(output.segments.len(), 1);
        let only = &output.segments[0];
        assert_eq!(only.name, "C");
        assert_eq!(only.time, 0.0);
        assert!((only.duration - 6.0).abs() < 1e-4);
        assert!(only.confidence > 0.3 && only.confidence <= 1.0);
    }

    #[test]
    fn test_silence_yields_empty_timeline() {
        let samples = vec![0.0f32; SR as usize * 4];
        let waveform = Waveform::new(&samples, SR).unwrap();
        let output = segment_chords(&waveform, &AnalysisConfig::default()).unwrap();
        assert!(output.segments.is_empty());
        assert_eq!(output.windows_below_threshold, output.windows_analyzed);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut samples = triad([261.63, 329.63, 392.0], 4.0);
        samples.extend(triad([220.0, 261.63, 329.63], 4.0));
        let waveform = Waveform::new(&samples, SR).unwrap();

        let sequential = segment_chords(&waveform, &AnalysisConfig::default()).unwrap();
        let mut config = AnalysisConfig::default();
        config.segmenter.parallel = true;
        let parallel = segment_chords(&waveform, &config).unwrap();

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_cancellation() {
        let samples = triad([261.63, 329.63, 392.0], 4.0);
        let waveform = Waveform::new(&samples, SR).unwrap();
        let cancel = AtomicBool::new(true);
        let result = segment_chords_cancellable(&waveform, &AnalysisConfig::default(), &cancel);
        assert_eq!(result, Err(AnalysisError::Cancelled));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let samples = vec![0.0f32; SR as usize * 4];
        let waveform = Waveform::new(&samples, SR).unwrap();
        let mut config = AnalysisConfig::default();
        config.segmenter.hop_seconds = 0.0;
        assert!(matches!(
            segment_chords(&waveform, &config),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }
}
