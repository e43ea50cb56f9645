//! Analysis result types
//!
//! - Chord timeline, key and tempo result
//! - Metadata

pub mod metadata;
pub mod result;
