// Spectral module - Frequency-domain feature extraction
//
// All features are computed from the positive-frequency magnitude spectrum.
// There is no real sample rate behind the pseudo-samples, so frequencies are
// expressed in cycles per sample (0.0 to 0.5).
//
// References:
// - Peeters, G. (2004). A large set of audio features for sound description
// - Lerch, A. (2012). An Introduction to Audio Content Analysis

/// Spectral rolloff threshold (85% of spectral energy)
const ROLLOFF_THRESHOLD: f64 = 0.85;

/// Below this total magnitude the spectrum counts as silent
const NEGLIGIBLE_ENERGY: f64 = 1e-10;

/// Epsilon added to magnitudes before taking logarithms
const FLATNESS_EPSILON: f64 = 1e-10;

/// Centroid scale so that typical pseudo-sample spectra spread over 0..1
const CENTROID_SCALE: f64 = 4.0;

/// Value returned when the spectrum carries no energy
const NEUTRAL: f64 = 0.5;

/// Spectral feature computation functions
pub struct SpectralFeatures;

impl SpectralFeatures {
    /// Compute spectral centroid (weighted mean frequency)
    ///
    /// Formula: centroid = Σ(f_i × |X[i]|) / Σ|X[i]|, with f_i = i / (2N)
    /// for a half spectrum of N bins. Scaled by 4 and clamped to 1.0.
    pub fn compute_centroid(spectrum: &[f64]) -> f64 {
        let magnitude_sum: f64 = spectrum.iter().sum();
        if magnitude_sum < NEGLIGIBLE_ENERGY {
            return NEUTRAL;
        }

        let full_len = (spectrum.len() * 2) as f64;
        let weighted_sum: f64 = spectrum
            .iter()
            .enumerate()
            .map(|(i, &mag)| (i as f64 / full_len) * mag)
            .sum();

        ((weighted_sum / magnitude_sum) * CENTROID_SCALE).clamp(0.0, 1.0)
    }

    /// Compute spectral flatness (tonality measure)
    ///
    /// Formula: flatness = geometric_mean(|X[i]| + ε) / arithmetic_mean(|X[i]| + ε)
    ///
    /// Returns value between 0 (tonal) and 1 (noise-like).
    pub fn compute_flatness(spectrum: &[f64]) -> f64 {
        if spectrum.is_empty() || spectrum.iter().sum::<f64>() < NEGLIGIBLE_ENERGY {
            return NEUTRAL;
        }

        let n = spectrum.len() as f64;
        let log_sum: f64 = spectrum
            .iter()
            .map(|&mag| (mag + FLATNESS_EPSILON).ln())
            .sum();
        let geometric_mean = (log_sum / n).exp();
        let arithmetic_mean = spectrum.iter().sum::<f64>() / n + FLATNESS_EPSILON;

        (geometric_mean / arithmetic_mean).min(1.0)
    }

    /// Compute spectral rolloff (85% energy threshold)
    ///
    /// Returns the first bin index at which cumulative energy reaches 85% of
    /// the total, divided by the spectrum length.
    pub fn compute_rolloff(spectrum: &[f64]) -> f64 {
        let total_energy: f64 = spectrum.iter().map(|&mag| mag * mag).sum();
        if total_energy < NEGLIGIBLE_ENERGY {
            return NEUTRAL;
        }

        let threshold = ROLLOFF_THRESHOLD * total_energy;
        let mut cumulative_energy = 0.0;
        for (i, &mag) in spectrum.iter().enumerate() {
            cumulative_energy += mag * mag;
            if cumulative_energy >= threshold {
                return i as f64 / spectrum.len() as f64;
            }
        }

        (spectrum.len() - 1) as f64 / spectrum.len() as f64
    }
}
