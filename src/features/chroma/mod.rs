//! Chroma extraction modules
//!
//! Extract pitch-class distribution (12 semitones) from audio:
//! - Chroma vector computation over fixed-size FFT sub-windows
//! - Max-normalization into a [`ChromaVector`]

pub mod extractor;
pub mod normalization;

pub use extractor::{extract_chroma, ChromaExtractor};
pub use normalization::ChromaVector;
