//! Monophonic pitch tracking for live input
//!
//! Independent of file analysis: an autocorrelation pitch detector over a
//! single buffer, a streaming tracker built on it, and note conversion for
//! tuner-style display.

pub mod tracker;

pub use tracker::{
    detect_pitch, frequency_to_note, pitch_tracker_update, NoteReading, PitchTracker, NO_PITCH,
};
