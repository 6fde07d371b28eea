// Classifier - heuristic weighted scoring for synthetic voice detection
//
// This module maps a feature vector onto an AI-probability score in [0, 1]
// plus the set of indicators that fired. Two scoring models exist:
//
// ByteStatistics: entropy, regularity, repetition and silence of the raw payload
// Spectral: flatness, pitch stability, micro variation, frame variation and ZCR
//
// Exactly one model is active per classifier, chosen by configuration.
// Thresholds, weights and explanation wording are immutable configuration
// injected at construction; the classifier holds no mutable state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::analysis::explanation::ExplanationCatalog;
use crate::analysis::features::FeatureVector;
use crate::analysis::{Classification, ClassificationResult};

/// Scores at or above this boundary are labelled AI_GENERATED
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Upper bound on reported confidence
pub const MAX_CONFIDENCE: f64 = 0.99;

/// Which feature family drives the AI score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringModel {
    /// Byte-domain statistics of the encoded payload
    #[default]
    ByteStatistics,
    /// Spectral/temporal features of the pseudo-sample sequence
    Spectral,
}

/// A feature that crossed its AI-suggestive threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Indicator {
    LowEntropy,
    HighRegularity,
    HighRepetition,
    UnusualSilence,
    LowFlatness,
    HighPitchStability,
    LowMicroVariation,
    LowFrameVariation,
    LowZeroCrossing,
}

/// Indicators that fired for one payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorSet(BTreeSet<Indicator>);

impl IndicatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, indicator: Indicator) {
        self.0.insert(indicator);
    }

    pub fn contains(&self, indicator: Indicator) -> bool {
        self.0.contains(&indicator)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Indicator> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Indicator> for IndicatorSet {
    fn from_iter<I: IntoIterator<Item = Indicator>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Thresholds for the byte-statistics model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ByteThresholds {
    /// Entropy strictly below this is AI-suggestive
    pub entropy_low: f64,
    /// Regularity strictly above this is AI-suggestive
    pub regularity_high: f64,
    /// Repetition strictly above this is AI-suggestive
    pub repetition_high: f64,
    /// Silence ratio strictly above this is unusual
    pub silence_unusual: f64,
    /// Silence ratio strictly below this is also unusual
    pub silence_minimum: f64,
    /// Flat partial score for unusual silence
    pub silence_score: f64,
    /// Byte std below this nudges the score up
    pub std_low: f64,
    /// Byte std above this nudges the score down
    pub std_high: f64,
    /// Size of the std nudge
    pub std_adjustment: f64,
}

impl Default for ByteThresholds {
    fn default() -> Self {
        Self {
            entropy_low: 0.75,
            regularity_high: 0.6,
            repetition_high: 0.3,
            silence_unusual: 0.15,
            silence_minimum: 0.01,
            silence_score: 0.5,
            std_low: 50.0,
            std_high: 85.0,
            std_adjustment: 0.1,
        }
    }
}

/// Weights for the byte-statistics model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ByteWeights {
    pub entropy: f64,
    pub regularity: f64,
    pub repetition: f64,
    pub silence: f64,
}

impl Default for ByteWeights {
    fn default() -> Self {
        Self {
            entropy: 0.35,
            regularity: 0.30,
            repetition: 0.20,
            silence: 0.15,
        }
    }
}

/// Thresholds for the spectral model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectralThresholds {
    /// Flatness strictly below this is AI-suggestive
    pub flatness_low: f64,
    /// Pitch stability strictly above this is AI-suggestive
    pub pitch_stability_high: f64,
    /// Micro variation strictly below this is AI-suggestive
    pub micro_variation_low: f64,
    /// Frame variation strictly below this is AI-suggestive
    pub frame_variation_low: f64,
    /// ZCR strictly below this is AI-suggestive
    pub zcr_low: f64,
    /// Flat partial score for low ZCR
    pub zcr_score: f64,
    /// Residual partial score scale for flatness/micro variation above threshold
    pub residual_scale: f64,
    /// Indicator count that triggers the boost
    pub boost_min_indicators: usize,
    /// Added when at least `boost_min_indicators` fire
    pub boost: f64,
    /// Subtracted when no indicator fires
    pub quiet_penalty: f64,
}

impl Default for SpectralThresholds {
    fn default() -> Self {
        Self {
            flatness_low: 0.3,
            pitch_stability_high: 0.7,
            micro_variation_low: 0.3,
            frame_variation_low: 0.3,
            zcr_low: 0.05,
            zcr_score: 0.6,
            residual_scale: 0.3,
            boost_min_indicators: 3,
            boost: 0.15,
            quiet_penalty: 0.1,
        }
    }
}

/// Weights for the spectral model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectralWeights {
    pub flatness: f64,
    pub pitch_stability: f64,
    pub micro_variation: f64,
    pub frame_variation: f64,
    pub zcr: f64,
}

impl Default for SpectralWeights {
    fn default() -> Self {
        Self {
            flatness: 0.25,
            pitch_stability: 0.25,
            micro_variation: 0.20,
            frame_variation: 0.15,
            zcr: 0.15,
        }
    }
}

/// Complete classifier configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub model: ScoringModel,
    pub byte_thresholds: ByteThresholds,
    pub byte_weights: ByteWeights,
    pub spectral_thresholds: SpectralThresholds,
    pub spectral_weights: SpectralWeights,
    pub explanations: ExplanationCatalog,
}

/// Score, indicators and final result for one payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub ai_score: f64,
    pub indicators: IndicatorSet,
    pub result: ClassificationResult,
}

/// Classifier applies weighted heuristic rules to a feature vector
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    /// Create a new Classifier
    ///
    /// # Arguments
    /// * `config` - Model choice, thresholds, weights and explanation wording
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Score a feature vector with the configured model
    ///
    /// # Returns
    /// Tuple of (AI score 0.0-1.0, indicators that fired)
    pub fn score(&self, features: &FeatureVector) -> (f64, IndicatorSet) {
        match self.config.model {
            ScoringModel::ByteStatistics => self.score_byte_statistics(features),
            ScoringModel::Spectral => self.score_spectral(features),
        }
    }

    /// Score, decide and explain in one step
    pub fn classify(&self, features: &FeatureVector) -> Assessment {
        let (ai_score, indicators) = self.score(features);
        let result = self.decide(ai_score, &indicators);
        Assessment {
            ai_score,
            indicators,
            result,
        }
    }

    /// Turn an AI score into a labelled result
    ///
    /// Confidence is confidence in the chosen label: `score` for AI_GENERATED
    /// and `1 - score` for HUMAN, capped at 0.99 and rounded to 2 decimals.
    pub fn decide(&self, ai_score: f64, indicators: &IndicatorSet) -> ClassificationResult {
        let (classification, confidence) = if ai_score >= DECISION_THRESHOLD {
            (Classification::AiGenerated, ai_score.min(MAX_CONFIDENCE))
        } else {
            (Classification::Human, (1.0 - ai_score).min(MAX_CONFIDENCE))
        };

        ClassificationResult {
            classification,
            confidence_score: round2(confidence),
            explanation: self
                .config
                .explanations
                .select(classification, indicators)
                .to_string(),
        }
    }

    fn score_byte_statistics(&self, features: &FeatureVector) -> (f64, IndicatorSet) {
        let t = &self.config.byte_thresholds;
        let w = &self.config.byte_weights;
        let mut indicators = IndicatorSet::new();

        let entropy_score = if features.byte_entropy < t.entropy_low {
            indicators.insert(Indicator::LowEntropy);
            1.0 - features.byte_entropy / t.entropy_low
        } else {
            0.0
        };

        let regularity_score = if features.pattern_regularity > t.regularity_high {
            indicators.insert(Indicator::HighRegularity);
            above_threshold_score(features.pattern_regularity, t.regularity_high)
        } else {
            0.0
        };

        let repetition_score = if features.repetition_score > t.repetition_high {
            indicators.insert(Indicator::HighRepetition);
            above_threshold_score(features.repetition_score, t.repetition_high)
        } else {
            0.0
        };

        let silence_score = if features.silence_ratio > t.silence_unusual
            || features.silence_ratio < t.silence_minimum
        {
            indicators.insert(Indicator::UnusualSilence);
            t.silence_score
        } else {
            0.0
        };

        let mut score = weighted_average(&[
            (entropy_score, w.entropy),
            (regularity_score, w.regularity),
            (repetition_score, w.repetition),
            (silence_score, w.silence),
        ]);

        if features.byte_std < t.std_low {
            score = (score + t.std_adjustment).clamp(0.0, 1.0);
        } else if features.byte_std > t.std_high {
            score = (score - t.std_adjustment).clamp(0.0, 1.0);
        }

        tracing::debug!(
            score,
            indicators = indicators.len(),
            "Scored payload with byte statistics model"
        );
        (score, indicators)
    }

    fn score_spectral(&self, features: &FeatureVector) -> (f64, IndicatorSet) {
        let t = &self.config.spectral_thresholds;
        let w = &self.config.spectral_weights;
        let mut indicators = IndicatorSet::new();

        let residual = |value: f64| (t.residual_scale - value * t.residual_scale).max(0.0);

        let flatness_score = if features.spectral_flatness < t.flatness_low {
            indicators.insert(Indicator::LowFlatness);
            below_threshold_score(features.spectral_flatness, t.flatness_low)
        } else {
            residual(features.spectral_flatness)
        };

        let stability_score = if features.pitch_stability > t.pitch_stability_high {
            indicators.insert(Indicator::HighPitchStability);
            above_threshold_score(features.pitch_stability, t.pitch_stability_high)
        } else {
            0.0
        };

        let micro_score = if features.micro_variation < t.micro_variation_low {
            indicators.insert(Indicator::LowMicroVariation);
            below_threshold_score(features.micro_variation, t.micro_variation_low)
        } else {
            residual(features.micro_variation)
        };

        let frame_score = if features.frame_variation < t.frame_variation_low {
            indicators.insert(Indicator::LowFrameVariation);
            below_threshold_score(features.frame_variation, t.frame_variation_low)
        } else {
            0.0
        };

        let zcr_score = if features.zero_crossing_rate < t.zcr_low {
            indicators.insert(Indicator::LowZeroCrossing);
            t.zcr_score
        } else {
            0.0
        };

        let mut score = weighted_average(&[
            (flatness_score, w.flatness),
            (stability_score, w.pitch_stability),
            (micro_score, w.micro_variation),
            (frame_score, w.frame_variation),
            (zcr_score, w.zcr),
        ]);

        if indicators.len() >= t.boost_min_indicators {
            score = (score + t.boost).clamp(0.0, 1.0);
        } else if indicators.is_empty() {
            score = (score - t.quiet_penalty).clamp(0.0, 1.0);
        }

        tracing::debug!(
            score,
            indicators = indicators.len(),
            "Scored payload with spectral model"
        );
        (score, indicators)
    }
}

/// Linear partial score for values above a threshold, capped at 1.0
fn above_threshold_score(value: f64, threshold: f64) -> f64 {
    if threshold >= 1.0 {
        return 1.0;
    }
    ((value - threshold) / (1.0 - threshold)).min(1.0)
}

/// Linear partial score for values below a threshold
fn below_threshold_score(value: f64, threshold: f64) -> f64 {
    (1.0 - value / threshold).clamp(0.0, 1.0)
}

fn weighted_average(parts: &[(f64, f64)]) -> f64 {
    let total_weight: f64 = parts.iter().map(|(_, w)| w).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }
    parts.iter().map(|(s, w)| s * w).sum::<f64>() / total_weight
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
