//! Spectral frontend: Hamming windowing and FFT magnitude spectra
//!
//! Produces `N/2` magnitudes for a frame of `N` real samples, bin `k` centered
//! at `k * sample_rate / N`. Real input gives a conjugate-symmetric spectrum,
//! so only the non-negative half is kept.
//!
//! # Example
//!
//! ```
//! use chordsync::features::spectrum::SpectralFrontend;
//!
//! let mut frontend = SpectralFrontend::new(1024);
//! let silence = vec![0.0f32; 1024];
//! let magnitudes = frontend.magnitude_spectrum(&silence);
//! assert_eq!(magnitudes.len(), 512);
//! assert!(magnitudes.iter().all(|&m| m == 0.0));
//! ```

use std::f32::consts::PI;
use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

/// Compute a symmetric Hamming window: `0.54 - 0.46 * cos(2πi / (N - 1))`
pub fn hamming_window(n: usize) -> Vec<f32> {
    match n {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => {
            let denom = (n - 1) as f32;
            (0..n)
                .map(|i| 0.54 - 0.46 * (2.0 * PI * i as f32 / denom).cos())
                .collect()
        }
    }
}

/// Center frequency of FFT bin `k` for a transform of size `n`
pub fn bin_frequency(k: usize, sample_rate: u32, n: usize) -> f32 {
    if n == 0 {
        return 0.0;
    }
    k as f32 * sample_rate as f32 / n as f32
}

/// Reusable windowed FFT of fixed size
///
/// Plans the transform and builds the window once so repeated frames only pay
/// for the FFT itself.
pub struct SpectralFrontend {
    frame_size: usize,
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl SpectralFrontend {
    /// Create a frontend for frames of `frame_size` samples
    pub fn new(frame_size: usize) -> Self {
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(frame_size);
        let scratch_len = fft.get_inplace_scratch_len();

        Self {
            frame_size,
            window: hamming_window(frame_size),
            fft,
            buffer: vec![Complex::new(0.0, 0.0); frame_size],
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
        }
    }

    /// Transform size in samples
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Number of magnitude bins returned per frame
    pub fn num_bins(&self) -> usize {
        self.frame_size / 2
    }

    /// Windowed magnitude spectrum of one frame
    ///
    /// Frames shorter than `frame_size` are zero-padded, longer frames are
    /// truncated.
    pub fn magnitude_spectrum(&mut self, frame: &[f32]) -> Vec<f32> {
        let mut magnitudes = vec![0.0f32; self.num_bins()];
        self.magnitude_spectrum_into(frame, &mut magnitudes);
        magnitudes
    }

    /// Same as [`magnitude_spectrum`](Self::magnitude_spectrum) but writes into
    /// a caller-provided buffer of at least `frame_size / 2` entries.
    pub fn magnitude_spectrum_into(&mut self, frame: &[f32], out: &mut [f32]) {
        let n = self.frame_size;
        if n == 0 {
            return;
        }

        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = frame.get(i).copied().unwrap_or(0.0);
            *slot = Complex::new(sample * self.window[i], 0.0);
        }

        self.fft
            .process_with_scratch(&mut self.buffer, &mut self.scratch);

        for (dst, bin) in out.iter_mut().zip(self.buffer.iter().take(n / 2)) {
            *dst = bin.norm();
        }
    }
}

/// One-shot magnitude spectrum using the frame length as transform size
pub fn magnitude_spectrum(frame: &[f32]) -> Vec<f32> {
    if frame.is_empty() {
        return Vec::new();
    }
    SpectralFrontend::new(frame.len()).magnitude_spectrum(frame)
}
