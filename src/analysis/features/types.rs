// Types module - Data structures for extracted audio features
//
// The feature vector merges two families: byte-domain statistics computed
// on the raw payload, and spectral/temporal features computed on the
// normalized pseudo-sample sequence.

use serde::{Deserialize, Serialize};

/// Features extracted from one audio payload
///
/// Created per request and discarded after scoring. Serialized field names
/// follow the camelCase keys used in diagnostics output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureVector {
    /// Payload length in bytes
    pub byte_length: usize,

    /// First two bytes carry an MPEG frame sync
    pub has_valid_mp3_header: bool,

    /// Mean byte value (0-255)
    pub byte_mean: f64,

    /// Population standard deviation of byte values
    pub byte_std: f64,

    /// Shannon entropy of the byte histogram divided by 8 (0.0 to 1.0)
    ///
    /// Lower values mean a more predictable payload.
    pub byte_entropy: f64,

    /// Inverse spread of per-chunk statistics (0.0 to 1.0, higher = more regular)
    pub pattern_regularity: f64,

    /// Fraction of bytes below 10
    pub silence_ratio: f64,

    /// Fraction of windows strongly correlated with the opening window
    pub repetition_score: f64,

    /// Fraction of adjacent samples that change sign
    pub zero_crossing_rate: f64,

    /// Variance of absolute sample values
    pub amplitude_variance: f64,

    /// Magnitude-weighted mean frequency, scaled into 0.0 to 1.0
    pub spectral_centroid: f64,

    /// Geometric/arithmetic mean ratio of the magnitude spectrum
    ///
    /// 0.0 = tonal, 1.0 = noise-like
    pub spectral_flatness: f64,

    /// Normalized bin index holding 85% of spectral energy
    pub spectral_rolloff: f64,

    /// Frame RMS coefficient of variation (times 2, capped at 1.0)
    pub frame_variation: f64,

    /// Consistency of autocorrelation pitch periods across chunks
    pub pitch_stability: f64,

    /// Squashed variance of the second difference of the samples
    pub micro_variation: f64,
}

/// Spectral/temporal feature group
///
/// Either fully computed or entirely replaced by `SpectralFeatureSet::neutral()`
/// for short inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralFeatureSet {
    pub zero_crossing_rate: f64,
    pub amplitude_variance: f64,
    pub spectral_centroid: f64,
    pub spectral_flatness: f64,
    pub spectral_rolloff: f64,
    pub frame_variation: f64,
    pub pitch_stability: f64,
    pub micro_variation: f64,
}

impl SpectralFeatureSet {
    /// Documented defaults used when the sample sequence is too short
    pub const fn neutral() -> Self {
        Self {
            zero_crossing_rate: 0.1,
            amplitude_variance: 0.0,
            spectral_centroid: 0.5,
            spectral_flatness: 0.5,
            spectral_rolloff: 0.5,
            frame_variation: 0.5,
            pitch_stability: 0.5,
            micro_variation: 0.5,
        }
    }
}

/// Byte-domain feature group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ByteFeatureSet {
    pub byte_length: usize,
    pub has_valid_mp3_header: bool,
    pub byte_mean: f64,
    pub byte_std: f64,
    pub byte_entropy: f64,
    pub pattern_regularity: f64,
    pub silence_ratio: f64,
    pub repetition_score: f64,
}

impl FeatureVector {
    /// Merge the two feature groups
    pub fn from_parts(bytes: ByteFeatureSet, spectral: SpectralFeatureSet) -> Self {
        Self {
            byte_length: bytes.byte_length,
            has_valid_mp3_header: bytes.has_valid_mp3_header,
            byte_mean: bytes.byte_mean,
            byte_std: bytes.byte_std,
            byte_entropy: bytes.byte_entropy,
            pattern_regularity: bytes.pattern_regularity,
            silence_ratio: bytes.silence_ratio,
            repetition_score: bytes.repetition_score,
            zero_crossing_rate: spectral.zero_crossing_rate,
            amplitude_variance: spectral.amplitude_variance,
            spectral_centroid: spectral.spectral_centroid,
            spectral_flatness: spectral.spectral_flatness,
            spectral_rolloff: spectral.spectral_rolloff,
            frame_variation: spectral.frame_variation,
            pitch_stability: spectral.pitch_stability,
            micro_variation: spectral.micro_variation,
        }
    }

    /// True when every floating-point feature is finite
    pub fn is_finite(&self) -> bool {
        [
            self.byte_mean,
            self.byte_std,
            self.byte_entropy,
            self.pattern_regularity,
            self.silence_ratio,
            self.repetition_score,
            self.zero_crossing_rate,
            self.amplitude_variance,
            self.spectral_centroid,
            self.spectral_flatness,
            self.spectral_rolloff,
            self.frame_variation,
            self.pitch_stability,
            self.micro_variation,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}
