//! Analysis result types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use super::metadata::AnalysisMetadata;
use crate::features::pitch_class::{note_name, parse_note_name};

/// Musical key
///
/// Serializes as its display string ("C major", "F# minor").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Key {
    /// Major key (0 = C, 1 = C#, ..., 11 = B)
    Major(u32),
    /// Minor key (0 = C, 1 = C#, ..., 11 = B)
    Minor(u32),
}

impl Key {
    /// Tonic pitch class (0-11)
    pub fn tonic(&self) -> u32 {
        match self {
            Key::Major(i) | Key::Minor(i) => *i % 12,
        }
    }

    /// True for major keys
    pub fn is_major(&self) -> bool {
        matches!(self, Key::Major(_))
    }

    /// Get key name in chord notation (e.g., "C", "Am", "F#", "D#m")
    ///
    /// # Example
    ///
    /// ```
    /// use chordsync::analysis::result::Key;
    ///
    /// assert_eq!(Key::Major(0).name(), "C");
    /// assert_eq!(Key::Major(6).name(), "F#");
    /// assert_eq!(Key::Minor(9).name(), "Am");
    /// ```
    pub fn name(&self) -> String {
        match self {
            Key::Major(i) => note_name(*i).to_string(),
            Key::Minor(i) => format!("{}m", note_name(*i)),
        }
    }

    /// Relative major/minor sharing the same key signature
    pub fn relative(&self) -> Key {
        match self {
            Key::Major(i) => Key::Minor((i + 9) % 12),
            Key::Minor(i) => Key::Major((i + 3) % 12),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Major(i) => write!(f, "{} major", note_name(*i)),
            Key::Minor(i) => write!(f, "{} minor", note_name(*i)),
        }
    }
}

impl FromStr for Key {
    type Err = String;

    /// Parse "C major", "A minor", "F# minor", "Bb major"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (root, mode) = match (parts.next(), parts.next(), parts.next()) {
            (Some(root), Some(mode), None) => (root, mode),
            _ => return Err(format!("expected \"<root> major|minor\", got {:?}", s)),
        };
        let tonic = parse_note_name(root).ok_or_else(|| format!("unknown root {:?}", root))?;
        match mode.to_ascii_lowercase().as_str() {
            "major" => Ok(Key::Major(tonic)),
            "minor" => Ok(Key::Minor(tonic)),
            other => Err(format!("unknown mode {:?}", other)),
        }
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for Key {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One chord on the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordSegment {
    /// Chord label, e.g. "C" or "Am"
    pub name: String,

    /// Start offset in seconds
    pub time: f32,

    /// Length in seconds (> 0)
    pub duration: f32,

    /// Template-match confidence (0.0-1.0)
    pub confidence: f32,
}

impl ChordSegment {
    /// End offset in seconds
    pub fn end(&self) -> f32 {
        self.time + self.duration
    }

    /// True if `t` falls inside `[time, end)`
    ///
    /// Useful for looking up the chord under a playback cursor.
    pub fn contains(&self, t: f32) -> bool {
        t >= self.time && t < self.end()
    }
}

/// Complete analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Estimated global key
    pub key: Key,

    /// Estimated tempo in BPM
    pub tempo: u32,

    /// Time-ordered, non-overlapping chord timeline
    pub chords: Vec<ChordSegment>,

    /// Analysis metadata
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    /// Chord sounding at playback position `t` (seconds), if any
    pub fn chord_at(&self, t: f32) -> Option<&ChordSegment> {
        let idx = self.chords.partition_point(|seg| seg.time <= t);
        idx.checked_sub(1)
            .map(|i| &self.chords[i])
            .filter(|seg| seg.contains(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(name: &str, time: f32, duration: f32) -> ChordSegment {
        ChordSegment {
            name: name.to_string(),
            time,
            duration,
            confidence: 0.8,
        }
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::Major(0).to_string(), "C major");
        assert_eq!(Key::Minor(9).to_string(), "A minor");
        assert_eq!(Key::Major(6).to_string(), "F# major");
    }

    #[test]
    fn test_key_parse() {
        assert_eq!("C major".parse::<Key>(), Ok(Key::Major(0)));
        assert_eq!("A minor".parse::<Key>(), Ok(Key::Minor(9)));
        assert_eq!("Bb Major".parse::<Key>(), Ok(Key::Major(10)));
        assert!("H major".parse::<Key>().is_err());
        assert!("C dorian".parse::<Key>().is_err());
        assert!("C".parse::<Key>().is_err());
    }

    #[test]
    fn test_key_name_and_relative() {
        assert_eq!(Key::Minor(1).name(), "C#m");
        assert_eq!(Key::Major(0).relative(), Key::Minor(9));
        assert_eq!(Key::Minor(9).relative(), Key::Major(0));
        assert_eq!(Key::Minor(9).tonic(), 9);
        assert!(!Key::Minor(9).is_major());
    }

    #[test]
    fn test_key_serializes_as_string() {
        let json = serde_json::to_string(&Key::Minor(4)).unwrap();
        assert_eq!(json, "\"E minor\"");
        let back: Key = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Key::Minor(4));
        assert!(serde_json::from_str::<Key>("\"nonsense\"").is_err());
    }

    #[test]
    fn test_chord_at_lookup() {
        let result = AnalysisResult {
            key: Key::Major(0),
            tempo: 120,
            chords: vec![segment("C", 0.0, 2.0), segment("Am", 3.0, 2.0)],
            metadata: AnalysisMetadata::default(),
        };
        assert_eq!(result.chord_at(1.0).map(|s| s.name.as_str()), Some("C"));
        assert_eq!(result.chord_at(2.5), None);
        assert_eq!(result.chord_at(3.0).map(|s| s.name.as_str()), Some("Am"));
        assert_eq!(result.chord_at(6.0), None);
    }
}
