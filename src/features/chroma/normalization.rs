//! Chroma vector type and max-normalization

use serde::{Deserialize, Serialize};

/// Energies at or below this are treated as "no tonal content"
const EPSILON: f32 = 1e-10;

/// 12-bin pitch-class profile, index 0 = C
///
/// Always non-negative. Either the largest entry is exactly 1.0, or every
/// entry is zero (a silent window).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChromaVector([f32; 12]);

impl ChromaVector {
    /// The all-zero vector of a window without tonal energy
    pub const SILENT: ChromaVector = ChromaVector([0.0; 12]);

    /// Normalize accumulated pitch-class energies by their maximum
    ///
    /// Negative or non-finite energies are clamped to zero first. When nothing
    /// exceeds the numerical floor the silent vector is returned unchanged.
    pub fn from_energies(energies: [f32; 12]) -> Self {
        let mut bins = energies.map(|e| if e.is_finite() && e > 0.0 { e } else { 0.0 });
        let max = bins.iter().copied().fold(0.0f32, f32::max);
        if max <= EPSILON {
            return Self::SILENT;
        }
        for bin in bins.iter_mut() {
            *bin /= max;
        }
        Self(bins)
    }

    /// True when the window carried no tonal energy
    pub fn is_silent(&self) -> bool {
        self.0.iter().all(|&v| v == 0.0)
    }

    /// Largest entry (1.0 unless silent)
    pub fn max(&self) -> f32 {
        self.0.iter().copied().fold(0.0f32, f32::max)
    }

    /// Euclidean norm
    pub fn norm(&self) -> f32 {
        self.0.iter().map(|v| v * v).sum::<f32>().sqrt()
    }

    /// Borrow the raw bins
    pub fn as_array(&self) -> &[f32; 12] {
        &self.0
    }

    /// Pitch class with the most energy, `None` when silent
    pub fn dominant_pitch_class(&self) -> Option<u32> {
        if self.is_silent() {
            return None;
        }
        self.0
            .iter()
            .position(|&v| v >= 1.0)
            .map(|i| i as u32)
    }
}

impl AsRef<[f32]> for ChromaVector {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}
