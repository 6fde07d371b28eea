// Analysis module - synthetic voice detection pipeline
//
// This module owns the whole classification path for one payload:
//
// - decode: base64 → bytes, ID3v2 skip, bytes → pseudo-samples
// - features: FeatureExtractor (byte, spectral and temporal features)
// - classifier: weighted heuristic score, indicators, decision rule
// - explanation: catalog of human-readable reasons
//
// Pipeline: decode → extract → score → classify → explain. Every stage is a
// pure function of its input; nothing is shared or mutated across calls, so
// one VoiceDetector can serve any number of concurrent requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DetectionError, ValidationError};

pub mod classifier;
pub mod decode;
pub mod explanation;
pub mod features;

use classifier::{Assessment, Classifier, ClassifierConfig, ScoringModel};
use features::{FeatureExtractor, FeatureVector};

/// Languages accepted by the service
///
/// The language is echoed back to the caller; it does not change scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Tamil,
    English,
    Hindi,
    Malayalam,
    Telugu,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Tamil,
        Language::English,
        Language::Hindi,
        Language::Malayalam,
        Language::Telugu,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Tamil => "Tamil",
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Malayalam => "Malayalam",
            Language::Telugu => "Telugu",
        }
    }

    /// Supported language names in canonical order
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Language::as_str).collect()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    /// Exact, case-sensitive match against the supported names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|language| language.as_str() == s)
            .ok_or_else(|| ValidationError::UnsupportedLanguage {
                given: s.to_string(),
            })
    }
}

/// Binary verdict exposed to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "AI_GENERATED")]
    AiGenerated,
    #[serde(rename = "HUMAN")]
    Human,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::AiGenerated => "AI_GENERATED",
            Classification::Human => "HUMAN",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal result of one classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// Chosen label
    pub classification: Classification,
    /// Confidence in the chosen label (0.5-0.99, two decimals)
    pub confidence_score: f64,
    /// Reason drawn from the explanation catalog
    pub explanation: String,
}

/// Everything the pipeline derived for one payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub language: Language,
    pub features: FeatureVector,
    #[serde(flatten)]
    pub assessment: Assessment,
}

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Pseudo-sample count below which spectral features take neutral defaults
    pub min_spectral_samples: usize,
    pub classifier: ClassifierConfig,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_spectral_samples: features::DEFAULT_MIN_SPECTRAL_SAMPLES,
            classifier: ClassifierConfig::default(),
        }
    }
}

/// VoiceDetector combines feature extraction and classification
#[derive(Debug, Clone)]
pub struct VoiceDetector {
    extractor: FeatureExtractor,
    classifier: Classifier,
}

impl Default for VoiceDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

impl VoiceDetector {
    /// Create a detector
    ///
    /// The spectral/temporal group is only extracted for the spectral model;
    /// the byte-statistics model never reads it.
    pub fn new(config: DetectorConfig) -> Self {
        let spectral = config.classifier.model == ScoringModel::Spectral;
        Self {
            extractor: FeatureExtractor::new(config.min_spectral_samples).with_spectral(spectral),
            classifier: Classifier::new(config.classifier),
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Extract the features the configured model scores
    pub fn extract(&self, audio: &[u8]) -> FeatureVector {
        self.extractor.extract(audio)
    }

    /// Extract every feature regardless of the configured model
    pub fn extract_all(&self, audio: &[u8]) -> FeatureVector {
        self.extractor.extract_all(audio)
    }

    /// Run the full pipeline on decoded bytes, keeping intermediate results
    ///
    /// # Errors
    /// `Validation(EmptyAudio)` for an empty payload; `Internal` if any
    /// feature or the score is not finite.
    pub fn analyze(&self, audio: &[u8], language: Language) -> Result<Analysis, DetectionError> {
        if audio.is_empty() {
            return Err(ValidationError::EmptyAudio.into());
        }

        let features = self.extractor.extract(audio);
        if !features.is_finite() {
            return Err(DetectionError::Internal {
                details: format!("non-finite features: {:?}", features),
            });
        }

        let assessment = self.classifier.classify(&features);
        if !assessment.ai_score.is_finite() {
            return Err(DetectionError::Internal {
                details: format!("non-finite AI score {}", assessment.ai_score),
            });
        }

        tracing::info!(
            %language,
            bytes = audio.len(),
            ai_score = assessment.ai_score,
            classification = %assessment.result.classification,
            confidence = assessment.result.confidence_score,
            "Classified voice sample"
        );

        Ok(Analysis {
            language,
            features,
            assessment,
        })
    }

    /// Classify decoded bytes
    pub fn classify(
        &self,
        audio: &[u8],
        language: Language,
    ) -> Result<ClassificationResult, DetectionError> {
        self.analyze(audio, language)
            .map(|analysis| analysis.assessment.result)
    }

    /// Decode a base64 payload and classify it
    ///
    /// Malformed base64 is a validation error, never an internal one.
    pub fn classify_voice(
        &self,
        audio_base64: &str,
        language: Language,
    ) -> Result<ClassificationResult, DetectionError> {
        let audio = decode::decode_base64(audio_base64).map_err(ValidationError::from)?;
        self.classify(&audio, language)
    }
}
