//! Triad templates for chord matching
//!
//! 24 binary pitch-class masks: the 12 major triads C, C#, ..., B followed by
//! the 12 minor triads Cm, C#m, ..., Bm. This order is the tie-break order of
//! the matcher and must not change.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::features::pitch_class::{note_name, parse_note_name};

/// Triad quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordQuality {
    /// Root, major third, perfect fifth
    Major,
    /// Root, minor third, perfect fifth
    Minor,
}

impl ChordQuality {
    /// Semitone offsets of the triad tones above the root
    pub fn intervals(self) -> [u32; 3] {
        match self {
            ChordQuality::Major => [0, 4, 7],
            ChordQuality::Minor => [0, 3, 7],
        }
    }

    /// Suffix appended to the root name ("" or "m")
    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
        }
    }
}

/// Pitch-class mask of one triad
#[derive(Debug, Clone, PartialEq)]
pub struct ChordTemplate {
    /// Root pitch class (0 = C)
    pub root: u32,
    /// Major or minor
    pub quality: ChordQuality,
    /// 1.0 on chord tones, 0.0 elsewhere
    pub mask: [f32; 12],
}

impl ChordTemplate {
    /// Build the template for a root and quality
    pub fn new(root: u32, quality: ChordQuality) -> Self {
        let root = root % 12;
        let mut mask = [0.0f32; 12];
        for interval in quality.intervals() {
            mask[((root + interval) % 12) as usize] = 1.0;
        }
        Self { root, quality, mask }
    }

    /// Chord label, e.g. "C", "F#", "Am"
    pub fn name(&self) -> String {
        chord_name(self.root, self.quality)
    }
}

/// Chord label for a root and quality
pub fn chord_name(root: u32, quality: ChordQuality) -> String {
    format!("{}{}", note_name(root), quality.suffix())
}

/// Parse a chord label ("C", "F#", "Bbm") into root and quality
pub fn parse_chord_name(name: &str) -> Option<(u32, ChordQuality)> {
    match name.strip_suffix('m') {
        Some(root) => parse_note_name(root).map(|r| (r, ChordQuality::Minor)),
        None => parse_note_name(name).map(|r| (r, ChordQuality::Major)),
    }
}

/// The static bank of 24 triad templates in canonical order
pub fn chord_templates() -> &'static [ChordTemplate] {
    static TEMPLATES: OnceLock<Vec<ChordTemplate>> = OnceLock::new();
    TEMPLATES.get_or_init(|| {
        [ChordQuality::Major, ChordQuality::Minor]
            .into_iter()
            .flat_map(|quality| (0..12).map(move |root| ChordTemplate::new(root, quality)))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_order_and_size() {
        let templates = chord_templates();
        assert_eq!(templates.len(), 24);
        assert_eq!(templates[0].name(), "C");
        assert_eq!(templates[11].name(), "B");
        assert_eq!(templates[12].name(), "Cm");
        assert_eq!(templates[21].name(), "Am");
    }

    #[test]
    fn test_masks() {
        let c = ChordTemplate::new(0, ChordQuality::Major);
        assert_eq!(
            c.mask,
            [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]
        );
        // A minor wraps around the octave: A C E
        let am = ChordTemplate::new(9, ChordQuality::Minor);
        let tones: Vec<usize> = (0..12).filter(|&i| am.mask[i] == 1.0).collect();
        assert_eq!(tones, vec![0, 4, 9]);
        assert!(chord_templates()
            .iter()
            .all(|t| t.mask.iter().sum::<f32>() == 3.0));
    }

    #[test]
    fn test_parse_chord_name() {
        assert_eq!(parse_chord_name("C"), Some((0, ChordQuality::Major)));
        assert_eq!(parse_chord_name("Am"), Some((9, ChordQuality::Minor)));
        assert_eq!(parse_chord_name("F#m"), Some((6, ChordQuality::Minor)));
        assert_eq!(parse_chord_name("Bb"), Some((10, ChordQuality::Major)));
        assert_eq!(parse_chord_name("Xm"), None);
        assert_eq!(parse_chord_name("Cmaj7"), None);
    }
}
