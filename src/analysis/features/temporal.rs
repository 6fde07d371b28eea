// Temporal module - Time-domain feature extraction
//
// This module computes features directly from the pseudo-sample sequence:
// zero-crossing rate, amplitude spread, frame energy variation, pitch-period
// stability and fine-grained (second difference) variation.
//
// References:
// - Peeters, G. (2004). A large set of audio features for sound description
// - Lerch, A. (2012). An Introduction to Audio Content Analysis

use super::bytes::{mean, variance};

/// Frame length for RMS energy variation
pub const FRAME_SIZE: usize = 256;

/// Largest chunk used for pitch period estimation
const MAX_PITCH_CHUNK: usize = 1000;

/// At most this many chunks contribute pitch periods
const MAX_PITCH_CHUNKS: usize = 5;

/// Shortest lag accepted as a pitch period
const MIN_PERIOD_LAG: usize = 20;

/// Gain applied to second-difference variance before tanh squashing
const MICRO_VARIATION_GAIN: f64 = 100.0;

/// Below this mean frame energy the signal counts as silent
const NEGLIGIBLE_ENERGY: f64 = 1e-10;

/// Value returned when a feature cannot be derived
const NEUTRAL: f64 = 0.5;

/// Temporal feature computation functions
pub struct TemporalFeatures;

impl TemporalFeatures {
    /// Compute zero-crossing rate (ZCR)
    ///
    /// Fraction of adjacent sample pairs whose sign differs, where zero
    /// counts as positive.
    ///
    /// # Returns
    /// Zero-crossing rate (0.0 to 1.0)
    pub fn compute_zcr(samples: &[f64]) -> f64 {
        if samples.len() < 2 {
            return 0.0;
        }

        let crossings = samples
            .windows(2)
            .filter(|pair| (pair[0] >= 0.0) != (pair[1] >= 0.0))
            .count();

        crossings as f64 / (samples.len() - 1) as f64
    }

    /// Variance of absolute sample values
    pub fn compute_amplitude_variance(samples: &[f64]) -> f64 {
        let magnitudes: Vec<f64> = samples.iter().map(|s| s.abs()).collect();
        variance(&magnitudes)
    }

    /// Coefficient of variation of per-frame RMS energy
    ///
    /// Uses complete frames of `FRAME_SIZE` samples. Returns
    /// `min(1, 2 * std / mean)`, or 0.5 with fewer than two frames or no
    /// energy at all.
    pub fn compute_frame_variation(samples: &[f64]) -> f64 {
        let energies: Vec<f64> = samples
            .chunks_exact(FRAME_SIZE)
            .map(|frame| (frame.iter().map(|s| s * s).sum::<f64>() / FRAME_SIZE as f64).sqrt())
            .collect();

        if energies.len() < 2 {
            return NEUTRAL;
        }

        let mean_energy = mean(&energies);
        if mean_energy < NEGLIGIBLE_ENERGY {
            return NEUTRAL;
        }

        (variance(&energies).sqrt() / mean_energy * 2.0).min(1.0)
    }

    /// Stability of autocorrelation pitch periods across chunks
    ///
    /// Chunks of `min(1000, len / 4)` samples are mean-centred and
    /// autocorrelated; the first local maximum at lag >= 20 is taken as the
    /// period. Stability is `1 / (1 + cv)` over the collected periods, or 0.5
    /// when fewer than two periods are found.
    pub fn compute_pitch_stability(samples: &[f64]) -> f64 {
        let chunk_size = MAX_PITCH_CHUNK.min(samples.len() / 4);
        if chunk_size <= MIN_PERIOD_LAG + 1 {
            return NEUTRAL;
        }

        let periods: Vec<f64> = samples
            .chunks_exact(chunk_size)
            .take(MAX_PITCH_CHUNKS)
            .filter_map(estimate_period)
            .map(|lag| lag as f64)
            .collect();

        if periods.len() < 2 {
            return NEUTRAL;
        }

        let mean_period = mean(&periods);
        let cv = variance(&periods).sqrt() / mean_period;
        (1.0 / (1.0 + cv)).min(1.0)
    }

    /// Squashed variance of the second difference
    ///
    /// `tanh(100 * var(x[n+2] - 2x[n+1] + x[n]))`; 0.5 for fewer than three
    /// samples.
    pub fn compute_micro_variation(samples: &[f64]) -> f64 {
        if samples.len() < 3 {
            return NEUTRAL;
        }

        let second_diff: Vec<f64> = samples
            .windows(3)
            .map(|w| w[2] - 2.0 * w[1] + w[0])
            .collect();

        (variance(&second_diff) * MICRO_VARIATION_GAIN).tanh()
    }
}

/// Lag of the first positive autocorrelation peak at or beyond `MIN_PERIOD_LAG`
fn estimate_period(chunk: &[f64]) -> Option<usize> {
    let centre = mean(chunk);
    let centred: Vec<f64> = chunk.iter().map(|s| s - centre).collect();

    // Right half of the full autocorrelation, starting at lag 0
    let autocorr: Vec<f64> = (0..centred.len())
        .map(|lag| {
            centred[..centred.len() - lag]
                .iter()
                .zip(&centred[lag..])
                .map(|(a, b)| a * b)
                .sum()
        })
        .collect();

    (MIN_PERIOD_LAG..autocorr.len() - 1).find(|&lag| {
        autocorr[lag] > 0.0 && autocorr[lag] > autocorr[lag - 1] && autocorr[lag] >= autocorr[lag + 1]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sine(period: f64, len: usize, amplitude: f64) -> Vec<f64> {
        (0..len)
            .map(|i| amplitude * (2.0 * std::f64::consts::PI * i as f64 / period).sin())
            .collect()
    }

    fn white_noise(len: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect()
    }

    #[test]
    fn test_zcr_sine_vs_noise() {
        let sine_zcr = TemporalFeatures::compute_zcr(&sine(200.0, 4000, 0.8));
        let noise_zcr = TemporalFeatures::compute_zcr(&white_noise(4000, 1));

        assert!(sine_zcr < 0.02, "Expected sine ZCR < 0.02, got {}", sine_zcr);
        assert!(noise_zcr > 0.3, "Expected noise ZCR > 0.3, got {}", noise_zcr);
    }

    #[test]
    fn test_zcr_alternating_signal() {
        let samples = [1.0, -1.0, 1.0, -1.0, 1.0];
        assert_eq!(TemporalFeatures::compute_zcr(&samples), 1.0);
        assert_eq!(TemporalFeatures::compute_zcr(&[0.3]), 0.0);
    }

    #[test]
    fn test_amplitude_variance_of_constant_magnitude() {
        let samples = [0.5, -0.5, 0.5, -0.5];
        assert_eq!(TemporalFeatures::compute_amplitude_variance(&samples), 0.0);
    }

    #[test]
    fn test_frame_variation_steady_vs_bursty() {
        let steady = TemporalFeatures::compute_frame_variation(&sine(32.0, FRAME_SIZE * 16, 0.5));
        assert!(steady < 0.05, "got {}", steady);

        let bursty: Vec<f64> = (0..FRAME_SIZE * 16)
            .map(|i| if (i / FRAME_SIZE) % 2 == 0 { 0.9 } else { 0.01 })
            .collect();
        let variation = TemporalFeatures::compute_frame_variation(&bursty);
        assert_eq!(variation, 1.0);
    }

    #[test]
    fn test_frame_variation_neutral_cases() {
        assert_eq!(
            TemporalFeatures::compute_frame_variation(&vec![0.4; FRAME_SIZE + 10]),
            0.5
        );
        assert_eq!(
            TemporalFeatures::compute_frame_variation(&vec![0.0; FRAME_SIZE * 4]),
            0.5
        );
    }

    #[test]
    fn test_pitch_stability_of_pure_tone() {
        let stability = TemporalFeatures::compute_pitch_stability(&sine(100.0, 8000, 0.7));
        assert!((stability - 1.0).abs() < 1e-12, "got {}", stability);
    }

    #[test]
    fn test_pitch_period_estimate() {
        let chunk = sine(100.0, 1000, 0.7);
        assert_eq!(estimate_period(&chunk), Some(100));
    }

    #[test]
    fn test_pitch_stability_neutral_for_short_input() {
        assert_eq!(TemporalFeatures::compute_pitch_stability(&sine(50.0, 80, 0.5)), 0.5);
    }

    #[test]
    fn test_micro_variation_smooth_vs_rough() {
        let smooth = TemporalFeatures::compute_micro_variation(&sine(400.0, 4000, 0.5));
        let rough = TemporalFeatures::compute_micro_variation(&white_noise(4000, 5));

        assert!(smooth < 0.01, "got {}", smooth);
        assert!(rough > 0.99, "got {}", rough);
        assert_eq!(TemporalFeatures::compute_micro_variation(&[0.1, 0.2]), 0.5);
    }
}
