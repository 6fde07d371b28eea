use super::*;
use crate::analysis::features::SpectralFeatureSet;

/// Helper to create a feature vector that trips no indicator in either model
fn create_features() -> FeatureVector {
    FeatureVector {
        byte_length: 4096,
        has_valid_mp3_header: true,
        byte_mean: 127.0,
        byte_std: 70.0,
        byte_entropy: 0.95,
        pattern_regularity: 0.3,
        repetition_score: 0.0,
        silence_ratio: 0.05,
        zero_crossing_rate: 0.2,
        amplitude_variance: 0.08,
        spectral_centroid: 0.6,
        spectral_flatness: 0.8,
        spectral_rolloff: 0.7,
        frame_variation: 0.6,
        pitch_stability: 0.4,
        micro_variation: 0.9,
    }
}

fn byte_classifier() -> Classifier {
    Classifier::default()
}

fn spectral_classifier() -> Classifier {
    Classifier::new(ClassifierConfig {
        model: ScoringModel::Spectral,
        ..ClassifierConfig::default()
    })
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_default_model_is_byte_statistics() {
    assert_eq!(
        byte_classifier().config().model,
        ScoringModel::ByteStatistics
    );
}

#[test]
fn test_byte_model_clean_payload_is_human() {
    let classifier = byte_classifier();
    let (score, indicators) = classifier.score(&create_features());

    assert_close(score, 0.0);
    assert!(indicators.is_empty());

    let result = classifier.decide(score, &indicators);
    assert_eq!(result.classification, Classification::Human);
    assert_eq!(result.confidence_score, 0.99);
    assert_eq!(
        result.explanation,
        ExplanationCatalog::default().human_natural
    );
}

#[test]
fn test_entropy_exactly_at_threshold_does_not_fire() {
    let classifier = byte_classifier();
    let mut features = create_features();
    features.byte_entropy = 0.75;

    let (_, indicators) = classifier.score(&features);
    assert!(!indicators.contains(Indicator::LowEntropy));
}

#[test]
fn test_entropy_marginally_below_threshold_fires() {
    let classifier = byte_classifier();
    let mut features = create_features();
    features.byte_entropy = 0.75 - 1e-9;

    let (_, indicators) = classifier.score(&features);
    assert!(indicators.contains(Indicator::LowEntropy));
}

#[test]
fn test_byte_model_entropy_partial_score() {
    let classifier = byte_classifier();
    let mut features = create_features();
    features.byte_entropy = 0.15;

    // (1 - 0.15 / 0.75) * 0.35
    let assessment = classifier.classify(&features);
    assert_close(assessment.ai_score, 0.28);
    assert_eq!(assessment.result.classification, Classification::Human);
    assert_eq!(assessment.result.confidence_score, 0.72);
    assert_eq!(
        assessment.result.explanation,
        ExplanationCatalog::default().human_irregular
    );
}

#[test]
fn test_byte_std_adjustments() {
    let classifier = byte_classifier();
    let mut features = create_features();
    features.byte_entropy = 0.15;

    features.byte_std = 40.0;
    assert_close(classifier.score(&features).0, 0.38);

    features.byte_std = 90.0;
    assert_close(classifier.score(&features).0, 0.18);

    // Subtraction never goes below zero
    let mut clean = create_features();
    clean.byte_std = 120.0;
    assert_close(classifier.score(&clean).0, 0.0);
}

#[test]
fn test_byte_model_ai_verdict() {
    let classifier = byte_classifier();
    let mut features = create_features();
    features.byte_entropy = 0.0;
    features.pattern_regularity = 1.0;
    features.repetition_score = 0.1;
    features.byte_std = 40.0;

    // 0.35 + 0.30 + std nudge 0.1
    let assessment = classifier.classify(&features);
    assert_close(assessment.ai_score, 0.75);
    assert_eq!(assessment.indicators.len(), 2);
    assert_eq!(
        assessment.result.classification,
        Classification::AiGenerated
    );
    assert_eq!(assessment.result.confidence_score, 0.75);
    assert_eq!(
        assessment.result.explanation,
        ExplanationCatalog::default().ai_regularity
    );
}

#[test]
fn test_byte_model_confidence_is_capped() {
    let classifier = byte_classifier();
    let mut features = create_features();
    features.byte_entropy = 0.0;
    features.pattern_regularity = 1.0;
    features.repetition_score = 1.0;
    features.silence_ratio = 0.9;
    features.byte_std = 10.0;

    let assessment = classifier.classify(&features);
    assert_close(assessment.ai_score, 1.0);
    assert_eq!(assessment.result.confidence_score, 0.99);
    assert_eq!(
        assessment.result.explanation,
        ExplanationCatalog::default().ai_combined
    );
}

#[test]
fn test_silence_flags_both_extremes() {
    let classifier = byte_classifier();

    let mut loud = create_features();
    loud.silence_ratio = 0.005;
    assert!(classifier
        .score(&loud)
        .1
        .contains(Indicator::UnusualSilence));

    let mut quiet = create_features();
    quiet.silence_ratio = 0.6;
    let (score, indicators) = classifier.score(&quiet);
    assert!(indicators.contains(Indicator::UnusualSilence));
    assert_close(score, 0.075);

    let mut normal = create_features();
    normal.silence_ratio = 0.15;
    assert!(!classifier
        .score(&normal)
        .1
        .contains(Indicator::UnusualSilence));
}

#[test]
fn test_spectral_model_on_neutral_defaults() {
    let classifier = spectral_classifier();
    let neutral = SpectralFeatureSet::neutral();
    let mut features = create_features();
    features.zero_crossing_rate = neutral.zero_crossing_rate;
    features.spectral_flatness = neutral.spectral_flatness;
    features.pitch_stability = neutral.pitch_stability;
    features.micro_variation = neutral.micro_variation;
    features.frame_variation = neutral.frame_variation;

    // Residuals 0.15 * 0.25 + 0.15 * 0.20 = 0.0675, minus the quiet penalty
    let assessment = classifier.classify(&features);
    assert_eq!(assessment.ai_score, 0.0);
    assert!(assessment.indicators.is_empty());
    assert_eq!(assessment.result.classification, Classification::Human);
    assert_eq!(assessment.result.confidence_score, 0.99);
}

#[test]
fn test_spectral_model_all_indicators() {
    let classifier = spectral_classifier();
    let mut features = create_features();
    features.spectral_flatness = 0.06;
    features.pitch_stability = 0.94;
    features.micro_variation = 0.06;
    features.frame_variation = 0.06;
    features.zero_crossing_rate = 0.01;

    // 0.2 + 0.2 + 0.16 + 0.12 + 0.09 = 0.77, boosted by 0.15
    let assessment = classifier.classify(&features);
    assert_close(assessment.ai_score, 0.92);
    assert_eq!(assessment.indicators.len(), 5);
    assert_eq!(
        assessment.result.classification,
        Classification::AiGenerated
    );
    assert_eq!(assessment.result.confidence_score, 0.92);
    assert_eq!(
        assessment.result.explanation,
        ExplanationCatalog::default().ai_combined
    );
}

#[test]
fn test_spectral_model_two_indicators_without_boost() {
    let classifier = spectral_classifier();
    let mut features = create_features();
    features.spectral_flatness = 0.5;
    features.micro_variation = 0.5;
    features.frame_variation = 0.5;
    features.pitch_stability = 0.85;
    features.zero_crossing_rate = 0.01;

    // 0.5 * 0.25 + 0.6 * 0.15 + 0.15 * 0.25 + 0.15 * 0.20
    let assessment = classifier.classify(&features);
    assert_close(assessment.ai_score, 0.2825);
    assert!(assessment.indicators.contains(Indicator::HighPitchStability));
    assert!(assessment.indicators.contains(Indicator::LowZeroCrossing));
    assert_eq!(assessment.result.classification, Classification::Human);
    assert_eq!(assessment.result.confidence_score, 0.72);
    assert_eq!(
        assessment.result.explanation,
        ExplanationCatalog::default().human_entropy
    );
}

#[test]
fn test_spectral_flatness_threshold_is_strict() {
    let classifier = spectral_classifier();
    let mut features = create_features();

    features.spectral_flatness = 0.3;
    assert!(!classifier.score(&features).1.contains(Indicator::LowFlatness));

    features.spectral_flatness = 0.29;
    assert!(classifier.score(&features).1.contains(Indicator::LowFlatness));
}

#[test]
fn test_models_ignore_each_others_features() {
    let mut features = create_features();
    features.byte_entropy = 0.0;
    features.pattern_regularity = 1.0;

    let (_, spectral_indicators) = spectral_classifier().score(&features);
    assert!(spectral_indicators.is_empty());

    let mut features = create_features();
    features.spectral_flatness = 0.0;
    features.zero_crossing_rate = 0.0;
    let (_, byte_indicators) = byte_classifier().score(&features);
    assert!(byte_indicators.is_empty());
}

#[test]
fn test_decide_confidence_always_at_least_half() {
    let classifier = byte_classifier();
    for step in 0..=100 {
        let score = step as f64 / 100.0;
        let result = classifier.decide(score, &IndicatorSet::new());
        assert!(
            (0.5..=0.99).contains(&result.confidence_score),
            "score {} produced confidence {}",
            score,
            result.confidence_score
        );
    }
}

#[test]
fn test_custom_weights_are_normalized() {
    let classifier = Classifier::new(ClassifierConfig {
        byte_weights: ByteWeights {
            entropy: 2.0,
            regularity: 0.0,
            repetition: 0.0,
            silence: 0.0,
        },
        ..ClassifierConfig::default()
    });
    let mut features = create_features();
    features.byte_entropy = 0.15;

    assert_close(classifier.score(&features).0, 0.8);
}

#[test]
fn test_classifier_config_json_roundtrip() {
    let config = ClassifierConfig {
        model: ScoringModel::Spectral,
        ..ClassifierConfig::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"model\":\"spectral\""));

    let parsed: ClassifierConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);
}
