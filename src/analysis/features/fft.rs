// FFT module - Fast Fourier Transform computation
//
// Computes the magnitude spectrum of the full pseudo-sample sequence. The
// spectral feature functions only ever look at positive frequencies.

use rustfft::{num_complex::Complex, FftPlanner};

/// FFT processor that computes magnitude spectra from sample sequences
///
/// Holds no planner state between calls, so one processor can be shared
/// across threads without locking.
#[derive(Debug, Default, Clone, Copy)]
pub struct FftProcessor;

impl FftProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Compute magnitude spectrum using FFT
    ///
    /// Transforms the whole input (no windowing, no padding) and returns the
    /// magnitudes of the first `len / 2` bins, i.e. the positive-frequency
    /// half of the spectrum including DC.
    pub fn compute_magnitude_spectrum(&self, samples: &[f64]) -> Vec<f64> {
        if samples.is_empty() {
            return Vec::new();
        }

        let mut buffer: Vec<Complex<f64>> =
            samples.iter().map(|&s| Complex::new(s, 0.0)).collect();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(buffer.len());
        fft.process(&mut buffer);

        buffer[..samples.len() / 2]
            .iter()
            .map(|c| c.norm())
            .collect()
    }
}
