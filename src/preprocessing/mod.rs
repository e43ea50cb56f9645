//! Audio preprocessing modules
//!
//! Preparation of host audio before analysis:
//! - Channel mixing (multichannel to mono)

pub mod channel_mixer;

pub use channel_mixer::{mix_to_mono, stereo_to_mono};
