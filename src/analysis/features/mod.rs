// FeatureExtractor - feature extraction for synthetic voice detection
//
// This module turns a decoded audio payload into a merged feature vector.
// The payload is never decoded as MP3; bytes act as a proxy signal.
//
// Module organization:
// - types: Data structures (FeatureVector and its two groups)
// - bytes: Byte-domain statistics (entropy, regularity, silence, repetition)
// - fft: FFT magnitude spectrum
// - spectral: Frequency-domain features (centroid, flatness, rolloff)
// - temporal: Time-domain features (ZCR, amplitude, frames, pitch, micro variation)
// - mod.rs: Coordinator (FeatureExtractor)
//
// Byte features are computed on the full payload. Spectral/temporal features
// are computed on the ID3-stripped pseudo-sample sequence, or replaced by
// neutral defaults when that sequence is too short.

mod bytes;
mod fft;
mod spectral;
mod temporal;
mod types;

pub use types::{ByteFeatureSet, FeatureVector, SpectralFeatureSet};

use bytes::ByteStatistics;
use fft::FftProcessor;
use spectral::SpectralFeatures;
use temporal::TemporalFeatures;

use crate::analysis::decode::to_samples;

/// Minimum pseudo-sample count for spectral/temporal analysis
pub const DEFAULT_MIN_SPECTRAL_SAMPLES: usize = 1000;

/// FeatureExtractor coordinates the feature extraction pipeline
///
/// Stateless apart from its configuration, so a single instance can be
/// shared across request handlers.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    fft_processor: FftProcessor,
    min_spectral_samples: usize,
    spectral_enabled: bool,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SPECTRAL_SAMPLES)
    }
}

impl FeatureExtractor {
    /// Create a new FeatureExtractor
    ///
    /// # Arguments
    /// * `min_spectral_samples` - Below this many samples the spectral group
    ///   falls back to `SpectralFeatureSet::neutral()`
    pub fn new(min_spectral_samples: usize) -> Self {
        Self {
            fft_processor: FftProcessor::new(),
            min_spectral_samples,
            spectral_enabled: true,
        }
    }

    /// Enable or skip the spectral/temporal group in `extract`
    ///
    /// When skipped, `extract` fills the group with
    /// `SpectralFeatureSet::neutral()` without running the FFT.
    pub fn with_spectral(mut self, enabled: bool) -> Self {
        self.spectral_enabled = enabled;
        self
    }

    pub fn spectral_enabled(&self) -> bool {
        self.spectral_enabled
    }

    /// Extract features from a decoded payload
    ///
    /// Pure: identical bytes always produce an identical vector.
    pub fn extract(&self, audio: &[u8]) -> FeatureVector {
        self.extract_with(audio, self.spectral_enabled)
    }

    /// Extract every feature, including the spectral group when disabled
    pub fn extract_all(&self, audio: &[u8]) -> FeatureVector {
        self.extract_with(audio, true)
    }

    fn extract_with(&self, audio: &[u8], spectral: bool) -> FeatureVector {
        let byte_features = ByteStatistics::compute(audio);

        let spectral_features = if spectral {
            self.extract_spectral(&to_samples(audio))
        } else {
            SpectralFeatureSet::neutral()
        };

        FeatureVector::from_parts(byte_features, spectral_features)
    }

    /// Extract the spectral/temporal group from pseudo-samples
    pub fn extract_spectral(&self, samples: &[f64]) -> SpectralFeatureSet {
        if samples.len() < self.min_spectral_samples.max(2) {
            tracing::debug!(
                samples = samples.len(),
                minimum = self.min_spectral_samples,
                "Sample sequence too short, using neutral spectral features"
            );
            return SpectralFeatureSet::neutral();
        }

        let spectrum = self.fft_processor.compute_magnitude_spectrum(samples);

        SpectralFeatureSet {
            zero_crossing_rate: TemporalFeatures::compute_zcr(samples),
            amplitude_variance: TemporalFeatures::compute_amplitude_variance(samples),
            spectral_centroid: SpectralFeatures::compute_centroid(&spectrum),
            spectral_flatness: SpectralFeatures::compute_flatness(&spectrum),
            spectral_rolloff: SpectralFeatures::compute_rolloff(&spectrum),
            frame_variation: TemporalFeatures::compute_frame_variation(samples),
            pitch_stability: TemporalFeatures::compute_pitch_stability(samples),
            micro_variation: TemporalFeatures::compute_micro_variation(samples),
        }
    }
}
