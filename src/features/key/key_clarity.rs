//! Key clarity scoring
//!
//! Estimates how strongly a chord sequence points at one key.

use crate::analysis::result::Key;

/// Share of the total key score held by the best key
///
/// # Arguments
///
/// * `scores` - Key scores (any order)
///
/// # Returns
///
/// Clarity score (0.0-1.0); 0.0 when no key scored at all
pub fn compute_key_clarity(scores: &[(Key, u32)]) -> f32 {
    let total: u32 = scores.iter().map(|&(_, s)| s).sum();
    if total == 0 {
        return 0.0;
    }
    let best = scores.iter().map(|&(_, s)| s).max().unwrap_or(0);
    best as f32 / total as f32
}
