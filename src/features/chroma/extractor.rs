//! Chroma vector extraction
//!
//! Folds FFT magnitudes from fixed-size sub-windows into a 12-bin pitch-class
//! profile. Only bins whose center frequency falls inside the configured band
//! (80–2000 Hz by default) contribute: lower bins are mostly rumble, higher
//! bins mostly overtones.

use super::ChromaVector;
use crate::config::ChromaConfig;
use crate::features::pitch_class::frequency_to_pitch_class;
use crate::features::spectrum::{bin_frequency, SpectralFrontend};

/// Reusable chroma extractor for one sample rate
///
/// The pitch class of every in-band FFT bin is resolved once at construction,
/// so per-window work is FFTs plus table lookups.
pub struct ChromaExtractor {
    frontend: SpectralFrontend,
    /// `(bin index, pitch class)` for each bin inside the band
    bin_classes: Vec<(usize, usize)>,
    magnitudes: Vec<f32>,
}

impl ChromaExtractor {
    /// Build an extractor for `sample_rate`
    pub fn new(config: &ChromaConfig, sample_rate: u32) -> Self {
        let n = config.sub_window_size;
        let frontend = SpectralFrontend::new(n);

        let bin_classes = (0..frontend.num_bins())
            .filter_map(|k| {
                let freq = bin_frequency(k, sample_rate, n);
                if freq < config.min_frequency || freq > config.max_frequency {
                    return None;
                }
                frequency_to_pitch_class(freq).map(|pc| (k, pc as usize))
            })
            .collect::<Vec<_>>();

        log::debug!(
            "Chroma extractor: {} of {} bins in [{:.0}, {:.0}] Hz at {} Hz",
            bin_classes.len(),
            frontend.num_bins(),
            config.min_frequency,
            config.max_frequency,
            sample_rate
        );

        Self {
            magnitudes: vec![0.0; frontend.num_bins()],
            frontend,
            bin_classes,
        }
    }

    /// Sub-window size in samples
    pub fn sub_window_size(&self) -> usize {
        self.frontend.frame_size()
    }

    /// Compute the chroma vector of one analysis window
    ///
    /// The window is cut into consecutive non-overlapping sub-windows. A
    /// trailing partial sub-window is skipped, except when the window is
    /// shorter than a single sub-window; then it is analyzed zero-padded.
    pub fn extract(&mut self, window: &[f32]) -> ChromaVector {
        let size = self.sub_window_size();
        let mut energies = [0.0f32; 12];

        if window.is_empty() || size == 0 {
            return ChromaVector::SILENT;
        }

        if window.len() < size {
            self.accumulate(window, &mut energies);
        } else {
            for sub_window in window.chunks_exact(size) {
                self.accumulate(sub_window, &mut energies);
            }
        }

        ChromaVector::from_energies(energies)
    }

    fn accumulate(&mut self, frame: &[f32], energies: &mut [f32; 12]) {
        self.frontend
            .magnitude_spectrum_into(frame, &mut self.magnitudes);
        for &(bin, pitch_class) in &self.bin_classes {
            energies[pitch_class] += self.magnitudes[bin];
        }
    }
}

/// Extract a single chroma vector from a window of samples
///
/// Convenience wrapper that builds a [`ChromaExtractor`] for one call.
///
/// # Example
///
/// ```
/// use chordsync::config::ChromaConfig;
/// use chordsync::features::chroma::extract_chroma;
///
/// let silence = vec![0.0f32; 44100];
/// let chroma = extract_chroma(&silence, 44100, &ChromaConfig::default());
/// assert!(chroma.is_silent());
/// ```
pub fn extract_chroma(window: &[f32], sample_rate: u32, config: &ChromaConfig) -> ChromaVector {
    ChromaExtractor::new(config, sample_rate).extract(window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const SR: u32 = 44100;

    fn tones(freqs: &[f32], seconds: f32) -> Vec<f32> {
        let len = (seconds * SR as f32) as usize;
        (0..len)
            .map(|i| {
                let t = i as f32 / SR as f32;
                freqs.iter().map(|f| (2.0 * PI * f * t).sin()).sum::<f32>() / freqs.len() as f32
            })
            .collect()
    }

    #[test]
    fn test_single_tone_dominates_its_class() {
        let chroma = extract_chroma(&tones(&[440.0], 1.0), SR, &ChromaConfig::default());
        assert_eq!(chroma.dominant_pitch_class(), Some(9));
        assert_eq!(chroma.max(), 1.0);
    }

    #[test]
    fn test_c_major_triad_energy() {
        let chroma = extract_chroma(
            &tones(&[261.63, 329.63, 392.0], 2.0),
            SR,
            &ChromaConfig::default(),
        );
        let bins = chroma.as_array();
        for pc in [0usize, 4, 7] {
            assert!(bins[pc] > 0.5, "pitch class {} too weak: {:?}", pc, bins);
        }
        assert!(bins[9] < 0.5, "A should be weak: {:?}", bins);
    }

    #[test]
    fn test_out_of_band_tone_is_ignored() {
        // A loud 3 kHz tone (F#) sits above the band; a quiet A4 must still win
        let len = SR as usize;
        let samples: Vec<f32> = (0..len)
            .map(|i| {
                let t = i as f32 / SR as f32;
                0.9 * (2.0 * PI * 3000.0 * t).sin() + 0.1 * (2.0 * PI * 440.0 * t).sin()
            })
            .collect();
        let chroma = extract_chroma(&samples, SR, &ChromaConfig::default());
        assert_eq!(chroma.dominant_pitch_class(), Some(9));
        assert!(chroma.as_array()[6] < 0.1);
    }

    #[test]
    fn test_silence_and_empty_input() {
        let config = ChromaConfig::default();
        assert!(extract_chroma(&vec![0.0; 8192], SR, &config).is_silent());
        assert!(extract_chroma(&[], SR, &config).is_silent());
    }

    #[test]
    fn test_short_window_is_zero_padded() {
        let chroma = extract_chroma(&tones(&[440.0], 0.05), SR, &ChromaConfig::default());
        assert_eq!(chroma.dominant_pitch_class(), Some(9));
    }
}
