//! Audio input modules
//!
//! Decoded-sample views and buffering. Decoding itself is left to the caller.

pub mod sample_buffer;
pub mod waveform;

pub use sample_buffer::SampleBuffer;
pub use waveform::Waveform;
