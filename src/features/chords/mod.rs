//! Chord detection modules
//!
//! Turn chroma into a chord timeline:
//! - Triad templates (24: 12 major + 12 minor)
//! - Cosine-similarity template matching
//! - Sliding-window segmentation with same-chord merging

pub mod matcher;
pub mod segmenter;
pub mod templates;

pub use matcher::{cosine_similarity, match_chord, rank_chords, ChordMatch};
pub use segmenter::{
    merge_segments, segment_chords, segment_chords_cancellable, window_starts, SegmentationOutput,
};
pub use templates::{chord_name, chord_templates, parse_chord_name, ChordQuality, ChordTemplate};
