//! Key detection modules
//!
//! Detect the global key from a chord sequence using:
//! - Diatonic chord profiles (24 keys)
//! - Weighted occurrence scoring
//! - Key clarity scoring

pub mod detector;
pub mod key_clarity;
pub mod templates;

pub use detector::{detect_key, estimate_key, score_keys, DEFAULT_KEY};
pub use key_clarity::compute_key_clarity;
pub use templates::{KeyProfile, KeyTemplates};

use crate::analysis::result::Key;

/// Key detection result
#[derive(Debug, Clone, PartialEq)]
pub struct KeyDetectionResult {
    /// Detected key (best match)
    pub key: Key,

    /// Weighted score of the detected key
    pub score: u32,

    /// Share of the total score held by the detected key (0.0-1.0)
    pub confidence: f32,

    /// All 24 key scores in canonical order (empty for an empty sequence)
    pub all_scores: Vec<(Key, u32)>,
}
