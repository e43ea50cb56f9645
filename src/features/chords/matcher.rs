//! Cosine-similarity chord template matching

use super::templates::{chord_name, chord_templates, ChordQuality};
use crate::features::chroma::ChromaVector;

/// Best-matching template for one chroma vector
#[derive(Debug, Clone, PartialEq)]
pub struct ChordMatch {
    /// Chord label, e.g. "C" or "Am"
    pub name: String,
    /// Root pitch class (0 = C)
    pub root: u32,
    /// Triad quality
    pub quality: ChordQuality,
    /// Cosine similarity clamped to [0, 1]
    pub confidence: f32,
}

/// Cosine similarity `dot(a, b) / (|a| * |b|)`
///
/// Returns 0.0 when either vector has zero norm (silence never matches), and
/// clamps the result into [0, 1].
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0f32, 0.0f32, 0.0f32);
    for (&x, &y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a <= 0.0 || norm_b <= 0.0 {
        return 0.0;
    }
    let score = dot / (norm_a.sqrt() * norm_b.sqrt());
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Score every template, in canonical template order
fn score_all(chroma: &ChromaVector) -> impl Iterator<Item = ChordMatch> + '_ {
    chord_templates().iter().map(move |template| ChordMatch {
        name: template.name(),
        root: template.root,
        quality: template.quality,
        confidence: cosine_similarity(chroma.as_array(), &template.mask),
    })
}

/// Find the best-matching triad for a chroma vector
///
/// Ties keep the template enumerated first (majors C..B, then minors Cm..Bm).
/// A silent chroma vector yields "C" with confidence 0.
///
/// # Example
///
/// ```
/// use chordsync::features::chords::match_chord;
/// use chordsync::features::chroma::ChromaVector;
///
/// let mut energies = [0.0f32; 12];
/// energies[9] = 1.0; // A
/// energies[0] = 1.0; // C
/// energies[4] = 1.0; // E
/// let best = match_chord(&ChromaVector::from_energies(energies));
/// assert_eq!(best.name, "Am");
/// assert!((best.confidence - 1.0).abs() < 1e-6);
/// ```
pub fn match_chord(chroma: &ChromaVector) -> ChordMatch {
    score_all(chroma)
        .reduce(|best, candidate| {
            if candidate.confidence > best.confidence {
                candidate
            } else {
                best
            }
        })
        .unwrap_or_else(|| ChordMatch {
            name: chord_name(0, ChordQuality::Major),
            root: 0,
            quality: ChordQuality::Major,
            confidence: 0.0,
        })
}

/// All 24 templates ranked by similarity, highest first
///
/// The sort is stable, so equal scores keep canonical template order.
pub fn rank_chords(chroma: &ChromaVector) -> Vec<ChordMatch> {
    let mut ranked: Vec<ChordMatch> = score_all(chroma).collect();
    ranked.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chroma_of(pitch_classes: &[usize]) -> ChromaVector {
        let mut energies = [0.0f32; 12];
        for &pc in pitch_classes {
            energies[pc] = 1.0;
        }
        ChromaVector::from_energies(energies)
    }

    #[test]
    fn test_cosine_similarity_bounds() {
        assert_eq!(cosine_similarity(&[0.0; 12], &[1.0; 12]), 0.0);
        assert_eq!(cosine_similarity(&[1.0; 12], &[0.0; 12]), 0.0);
        assert!((cosine_similarity(&[1.0, 2.0], &[2.0, 4.0]) - 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        // Negative correlation is clamped
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_exact_triads() {
        assert_eq!(match_chord(&chroma_of(&[0, 4, 7])).name, "C");
        assert_eq!(match_chord(&chroma_of(&[9, 0, 4])).name, "Am");
        assert_eq!(match_chord(&chroma_of(&[5, 9, 0])).name, "F");
        assert_eq!(match_chord(&chroma_of(&[6, 10, 1])).name, "F#");
        let g = match_chord(&chroma_of(&[7, 11, 2]));
        assert_eq!(g.root, 7);
        assert_eq!(g.quality, ChordQuality::Major);
        assert!((g.confidence - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_silence_matches_nothing() {
        let best = match_chord(&ChromaVector::SILENT);
        assert_eq!(best.confidence, 0.0);
        assert_eq!(best.name, "C");
    }

    #[test]
    fn test_tie_prefers_first_template() {
        // C E G A scores the same against C and Am; C comes first
        let best = match_chord(&chroma_of(&[0, 4, 7, 9]));
        assert_eq!(best.name, "C");
        // A C E F: tie between Am and F, majors come first
        let best = match_chord(&chroma_of(&[9, 0, 4, 5]));
        assert_eq!(best.name, "F");
    }

    #[test]
    fn test_rank_chords_is_sorted() {
        let ranked = rank_chords(&chroma_of(&[0, 4, 7]));
        assert_eq!(ranked.len(), 24);
        assert_eq!(ranked[0].name, "C");
        assert!(ranked
            .windows(2)
            .all(|w| w[0].confidence >= w[1].confidence));
    }
}
