//! Key estimation from a chord sequence
//!
//! Counts each distinct chord, then scores every key profile as
//! `Σ count[chord] × weight[key][chord]`. The highest total wins; ties go to
//! the profile enumerated first (majors before minors, C upward).

use std::collections::HashMap;

use super::{compute_key_clarity, templates::KeyTemplates, KeyDetectionResult};
use crate::analysis::result::Key;
use crate::features::chords::{parse_chord_name, ChordQuality};

/// Key returned for an empty chord sequence
pub const DEFAULT_KEY: Key = Key::Major(0);

/// Count occurrences of each recognizable chord
///
/// Labels that do not parse as a major or minor triad are skipped.
fn count_chords<S: AsRef<str>>(names: &[S]) -> HashMap<(u32, ChordQuality), u32> {
    let mut counts = HashMap::new();
    for name in names {
        let label: &str = name.as_ref();
        match parse_chord_name(label) {
            Some(chord) => *counts.entry(chord).or_insert(0) += 1,
            None => log::debug!("Ignoring unrecognized chord label {:?}", label),
        }
    }
    counts
}

/// Score all 24 keys against a chord sequence, in canonical order
pub fn score_keys<S: AsRef<str>>(names: &[S], templates: &KeyTemplates) -> Vec<(Key, u32)> {
    let counts = count_chords(names);
    templates
        .profiles()
        .iter()
        .map(|profile| {
            let score = counts
                .iter()
                .map(|(&(root, quality), &count)| count * profile.weight(root, quality))
                .sum();
            (profile.key, score)
        })
        .collect()
}

/// Detect the key of a chord sequence with full scoring detail
///
/// # Example
///
/// ```
/// use chordsync::features::key::{detect_key, KeyTemplates};
/// use chordsync::Key;
///
/// let result = detect_key(&["Am", "Dm", "E", "Am"], KeyTemplates::shared());
/// assert_eq!(result.key, Key::Minor(9));
/// ```
pub fn detect_key<S: AsRef<str>>(names: &[S], templates: &KeyTemplates) -> KeyDetectionResult {
    if names.is_empty() {
        log::debug!("Empty chord sequence, defaulting to {}", DEFAULT_KEY);
        return KeyDetectionResult {
            key: DEFAULT_KEY,
            score: 0,
            confidence: 0.0,
            all_scores: Vec::new(),
        };
    }

    let all_scores = score_keys(names, templates);

    // Strictly greater keeps the first of equal scores
    let (key, score) = all_scores
        .iter()
        .copied()
        .fold((DEFAULT_KEY, 0u32), |best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        });
    let confidence = compute_key_clarity(&all_scores);

    log::debug!(
        "Key from {} chords: {} (score {}, confidence {:.2})",
        names.len(),
        key,
        score,
        confidence
    );

    KeyDetectionResult {
        key,
        score,
        confidence,
        all_scores,
    }
}

/// Most likely key of a chord sequence, "C major" when empty
pub fn estimate_key<S: AsRef<str>>(names: &[S]) -> Key {
    detect_key(names, KeyTemplates::shared()).key
}
