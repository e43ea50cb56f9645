//! Diatonic chord profiles for 24 keys (12 major + 12 minor)
//!
//! Each profile weights the triads expected in a key by harmonic role. Chords
//! outside a profile weigh 0; they never count against a key.
//!
//! | Major key | I | V | IV | vi | ii | iii |     |
//! |-----------|---|---|----|----|----|-----|-----|
//! | weight    | 3 | 2 | 2  | 2  | 1  | 1   |     |
//!
//! | Minor key | i | V | iv | v | VI | III | VII |
//! |-----------|---|---|----|---|----|-----|-----|
//! | weight    | 3 | 2 | 2  | 1 | 1  | 1   | 1   |

use std::sync::OnceLock;

use crate::analysis::result::Key;
use crate::features::chords::ChordQuality;

/// `(semitones above tonic, quality, weight)` for a major key
const MAJOR_PROFILE: [(u32, ChordQuality, u32); 6] = [
    (0, ChordQuality::Major, 3),
    (7, ChordQuality::Major, 2),
    (5, ChordQuality::Major, 2),
    (9, ChordQuality::Minor, 2),
    (2, ChordQuality::Minor, 1),
    (4, ChordQuality::Minor, 1),
];

/// `(semitones above tonic, quality, weight)` for a minor key
///
/// Includes both the harmonic-minor dominant (V) and the natural-minor v.
const MINOR_PROFILE: [(u32, ChordQuality, u32); 7] = [
    (0, ChordQuality::Minor, 3),
    (7, ChordQuality::Major, 2),
    (5, ChordQuality::Minor, 2),
    (7, ChordQuality::Minor, 1),
    (8, ChordQuality::Major, 1),
    (3, ChordQuality::Major, 1),
    (10, ChordQuality::Major, 1),
];

/// Chord weights for one key, indexed by quality then root
#[derive(Debug, Clone, PartialEq)]
pub struct KeyProfile {
    /// Key this profile scores
    pub key: Key,
    major: [u32; 12],
    minor: [u32; 12],
}

impl KeyProfile {
    fn build(key: Key) -> Self {
        let (tonic, table): (u32, &[(u32, ChordQuality, u32)]) = match key {
            Key::Major(i) => (i % 12, &MAJOR_PROFILE),
            Key::Minor(i) => (i % 12, &MINOR_PROFILE),
        };
        let mut major = [0u32; 12];
        let mut minor = [0u32; 12];
        for &(offset, quality, weight) in table {
            let root = ((tonic + offset) % 12) as usize;
            match quality {
                ChordQuality::Major => major[root] = weight,
                ChordQuality::Minor => minor[root] = weight,
            }
        }
        Self { key, major, minor }
    }

    /// Weight of a triad in this key (0 if not diatonic)
    pub fn weight(&self, root: u32, quality: ChordQuality) -> u32 {
        let root = (root % 12) as usize;
        match quality {
            ChordQuality::Major => self.major[root],
            ChordQuality::Minor => self.minor[root],
        }
    }
}

/// Profiles for all 24 keys in canonical order
///
/// C major … B major, then C minor … B minor. Key ties resolve to the earlier
/// profile.
#[derive(Debug, Clone)]
pub struct KeyTemplates {
    profiles: Vec<KeyProfile>,
}

impl KeyTemplates {
    /// Build the 24 profiles
    pub fn new() -> Self {
        let profiles = (0..12)
            .map(Key::Major)
            .chain((0..12).map(Key::Minor))
            .map(KeyProfile::build)
            .collect();
        Self { profiles }
    }

    /// Shared, lazily built instance
    pub fn shared() -> &'static KeyTemplates {
        static TEMPLATES: OnceLock<KeyTemplates> = OnceLock::new();
        TEMPLATES.get_or_init(KeyTemplates::new)
    }

    /// All profiles in canonical order
    pub fn profiles(&self) -> &[KeyProfile] {
        &self.profiles
    }
}

impl Default for KeyTemplates {
    fn default() -> Self {
        Self::new()
    }
}
