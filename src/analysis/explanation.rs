// Explanation catalog and selection rules
//
// Wording is configuration (and may be localized); the selection order is
// fixed. For AI_GENERATED results the strongest single cause wins unless
// several indicators fire together. For HUMAN results the message reflects
// whether any AI-leaning indicator was present at all.

use serde::{Deserialize, Serialize};

use crate::analysis::classifier::{Indicator, IndicatorSet};
use crate::analysis::Classification;

/// Indicator count at which the combined message is used
const COMBINED_MIN_INDICATORS: usize = 3;

/// Single-cause priority for AI_GENERATED explanations
const AI_PRIORITY: [Indicator; 8] = [
    Indicator::HighRegularity,
    Indicator::LowEntropy,
    Indicator::HighRepetition,
    Indicator::HighPitchStability,
    Indicator::LowFlatness,
    Indicator::LowMicroVariation,
    Indicator::LowFrameVariation,
    Indicator::LowZeroCrossing,
];

/// Human-readable explanation strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplanationCatalog {
    pub ai_entropy: String,
    pub ai_regularity: String,
    pub ai_repetition: String,
    pub ai_pitch_stability: String,
    pub ai_flatness: String,
    pub ai_micro_variation: String,
    pub ai_frame_variation: String,
    pub ai_zero_crossing: String,
    pub ai_combined: String,
    pub human_natural: String,
    pub human_irregular: String,
    pub human_entropy: String,
}

impl Default for ExplanationCatalog {
    fn default() -> Self {
        Self {
            ai_entropy: "Lower audio entropy indicating synthetic generation patterns".into(),
            ai_regularity: "Unnatural pitch consistency and robotic speech patterns detected"
                .into(),
            ai_repetition: "Repetitive audio patterns typical of AI synthesis".into(),
            ai_pitch_stability: "Unnaturally stable pitch periods typical of synthesized speech"
                .into(),
            ai_flatness: "Overly clean, tonal spectrum lacking natural breath and noise".into(),
            ai_micro_variation: "Missing micro-variations expected from a human vocal tract"
                .into(),
            ai_frame_variation: "Uniform loudness across frames suggesting generated audio"
                .into(),
            ai_zero_crossing: "Smoothed waveform with few zero crossings typical of vocoders"
                .into(),
            ai_combined: "Multiple AI voice indicators detected including pattern regularity and synthetic artifacts".into(),
            human_natural: "Natural speech patterns with expected variation and entropy".into(),
            human_irregular: "Organic voice characteristics with natural irregularities detected"
                .into(),
            human_entropy: "High audio entropy consistent with natural human speech".into(),
        }
    }
}

impl ExplanationCatalog {
    /// Pick the explanation for a classification and its indicators
    pub fn select(&self, classification: Classification, indicators: &IndicatorSet) -> &str {
        match classification {
            Classification::AiGenerated => self.select_ai(indicators),
            Classification::Human => self.select_human(indicators),
        }
    }

    fn select_ai(&self, indicators: &IndicatorSet) -> &str {
        if indicators.len() >= COMBINED_MIN_INDICATORS {
            return self.ai_combined.as_str();
        }

        AI_PRIORITY
            .iter()
            .find(|&&indicator| indicators.contains(indicator))
            .map(|&indicator| self.ai_message(indicator))
            .unwrap_or(self.ai_combined.as_str())
    }

    fn select_human(&self, indicators: &IndicatorSet) -> &str {
        if indicators.is_empty() {
            self.human_natural.as_str()
        } else if !indicators.contains(Indicator::LowEntropy)
            && !indicators.contains(Indicator::LowFlatness)
        {
            self.human_entropy.as_str()
        } else {
            self.human_irregular.as_str()
        }
    }

    fn ai_message(&self, indicator: Indicator) -> &str {
        match indicator {
            Indicator::LowEntropy => self.ai_entropy.as_str(),
            Indicator::HighRegularity => self.ai_regularity.as_str(),
            Indicator::HighRepetition => self.ai_repetition.as_str(),
            Indicator::HighPitchStability => self.ai_pitch_stability.as_str(),
            Indicator::LowFlatness => self.ai_flatness.as_str(),
            Indicator::LowMicroVariation => self.ai_micro_variation.as_str(),
            Indicator::LowFrameVariation => self.ai_frame_variation.as_str(),
            Indicator::LowZeroCrossing => self.ai_zero_crossing.as_str(),
            Indicator::UnusualSilence => self.ai_combined.as_str(),
        }
    }
}
