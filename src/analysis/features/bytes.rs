// Bytes module - Byte-domain statistics
//
// These features treat the encoded payload as a sequence of unsigned 8-bit
// values. Compressed MP3 data from real recordings tends to look close to
// random; synthetic or padded payloads show lower entropy and more regular,
// repetitive structure.

use super::types::ByteFeatureSet;

/// Epsilon inside the entropy logarithm
const ENTROPY_EPSILON: f64 = 1e-10;

/// Bytes below this value count as silence
const SILENCE_LEVEL: u8 = 10;

/// Regularity needs at least this many bytes
const MIN_REGULARITY_BYTES: usize = 100;

/// Repetition needs at least this many bytes
const MIN_REPETITION_BYTES: usize = 200;

/// Pearson correlation above which a window counts as a repeat
const REPETITION_CORRELATION: f64 = 0.7;

/// Neutral value for statistics that cannot be derived
const NEUTRAL: f64 = 0.5;

/// Byte statistics computation functions
pub struct ByteStatistics;

impl ByteStatistics {
    /// Compute every byte-domain feature for a payload
    pub fn compute(bytes: &[u8]) -> ByteFeatureSet {
        let values: Vec<f64> = bytes.iter().map(|&b| b as f64).collect();

        ByteFeatureSet {
            byte_length: bytes.len(),
            has_valid_mp3_header: Self::has_frame_sync(bytes),
            byte_mean: mean(&values),
            byte_std: variance(&values).sqrt(),
            byte_entropy: Self::entropy(bytes),
            pattern_regularity: Self::pattern_regularity(&values),
            silence_ratio: Self::silence_ratio(bytes),
            repetition_score: Self::repetition_score(&values),
        }
    }

    /// MPEG frame sync: 0xFF followed by a byte with its top three bits set
    ///
    /// A full frame header is 4 bytes, so shorter payloads never qualify.
    pub fn has_frame_sync(bytes: &[u8]) -> bool {
        bytes.len() >= 4 && bytes[0] == 0xFF && (bytes[1] & 0xE0) == 0xE0
    }

    /// Shannon entropy of the byte histogram, normalized by 8 bits
    pub fn entropy(bytes: &[u8]) -> f64 {
        if bytes.is_empty() {
            return 0.0;
        }

        let mut histogram = [0usize; 256];
        for &b in bytes {
            histogram[b as usize] += 1;
        }

        let total = bytes.len() as f64;
        let entropy: f64 = histogram
            .iter()
            .filter(|&&count| count > 0)
            .map(|&count| {
                let p = count as f64 / total;
                -p * (p + ENTROPY_EPSILON).log2()
            })
            .sum();

        entropy / 8.0
    }

    /// Regularity of per-chunk mean and spread
    ///
    /// `1 / (1 + var(chunk means)/100 + var(chunk stds)/100)`; 0.5 when fewer
    /// than two chunks can be formed.
    pub fn pattern_regularity(values: &[f64]) -> f64 {
        if values.len() < MIN_REGULARITY_BYTES {
            return NEUTRAL;
        }

        let chunk_size = 100.min(values.len() / 10);
        let starts: Vec<usize> = (0..values.len() - chunk_size)
            .step_by(chunk_size)
            .collect();
        if starts.len() < 2 {
            return NEUTRAL;
        }

        let (means, stds): (Vec<f64>, Vec<f64>) = starts
            .iter()
            .map(|&start| {
                let chunk = &values[start..start + chunk_size];
                (mean(chunk), variance(chunk).sqrt())
            })
            .unzip();

        1.0 / (1.0 + variance(&means) / 100.0 + variance(&stds) / 100.0)
    }

    /// Fraction of bytes below the silence level
    pub fn silence_ratio(bytes: &[u8]) -> f64 {
        if bytes.is_empty() {
            return 0.0;
        }
        let quiet = bytes.iter().filter(|&&b| b < SILENCE_LEVEL).count();
        quiet as f64 / bytes.len() as f64
    }

    /// Share of non-overlapping windows correlated with the opening window
    ///
    /// Windows with undefined correlation (constant values) never match.
    pub fn repetition_score(values: &[f64]) -> f64 {
        if values.len() < MIN_REPETITION_BYTES {
            return NEUTRAL;
        }

        let window = 50.min(values.len() / 4);
        let sample = &values[..window];

        let matches = (window..values.len() - window)
            .step_by(window)
            .filter(|&start| {
                pearson(sample, &values[start..start + window])
                    .map(|r| r > REPETITION_CORRELATION)
                    .unwrap_or(false)
            })
            .count();

        let total_windows = ((values.len() - window) / window).max(1);
        matches as f64 / total_windows as f64
    }
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance
pub(crate) fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|&v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64
}

/// Pearson correlation, `None` when either side has zero variance
fn pearson(a: &[f64], b: &[f64]) -> Option<f64> {
    let mean_a = mean(a);
    let mean_b = mean(b);

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        cov += (x - mean_a) * (y - mean_b);
        var_a += (x - mean_a) * (x - mean_a);
        var_b += (y - mean_b) * (y - mean_b);
    }

    let denom = (var_a * var_b).sqrt();
    if denom > 0.0 {
        Some(cov / denom)
    } else {
        None
    }
}
