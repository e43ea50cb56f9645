//! Feature extraction modules
//!
//! This module contains all feature extraction algorithms:
//! - Magnitude spectrum and pitch-class mapping
//! - Chroma extraction
//! - Chord matching and segmentation
//! - Key estimation
//! - Tempo estimation
//! - Live pitch tracking

pub mod chords;
pub mod chroma;
pub mod key;
pub mod pitch;
pub mod pitch_class;
pub mod spectrum;
pub mod tempo;
