use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use voice_detector::analysis::classifier::IndicatorSet;
use voice_detector::analysis::decode::decode_base64;
use voice_detector::analysis::features::FeatureVector;
use voice_detector::error::{DetectionError, ErrorCode, ValidationError};
use voice_detector::{AppConfig, ClassificationResult, Language, VoiceDetector};

#[derive(Parser, Debug)]
#[command(
    name = "voice_cli",
    about = "Offline AI-voice classification of MP3 payloads"
)]
struct Cli {
    /// JSON configuration file (same format as the server's)
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a payload and print the response envelope
    Classify {
        #[command(flatten)]
        input: Input,
        #[arg(long)]
        language: String,
        /// Include features, AI score and indicators
        #[arg(long)]
        details: bool,
    },
    /// Print the extracted feature vector
    Features {
        #[command(flatten)]
        input: Input,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Input {
    /// Raw MP3 file
    #[arg(long)]
    file: Option<PathBuf>,
    /// Base64-encoded MP3 payload
    #[arg(long)]
    base64: Option<String>,
}

fn main() -> ExitCode {
    voice_detector::init_logging("warn");

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = match cli.config {
        Some(path) => AppConfig::load_from_file(path),
        None => AppConfig::default(),
    };
    let detector = VoiceDetector::new(config.detector);

    match cli.command {
        Commands::Classify {
            input,
            language,
            details,
        } => run_classify(&detector, &input, &language, details),
        Commands::Features { input } => run_features(&detector, &input),
    }
}

fn run_classify(
    detector: &VoiceDetector,
    input: &Input,
    language: &str,
    details: bool,
) -> Result<ExitCode> {
    let language: Language = match language.parse() {
        Ok(language) => language,
        Err(err) => return emit_error(&DetectionError::Validation(err)),
    };
    let audio = match load_audio(input)? {
        Ok(audio) => audio,
        Err(err) => return emit_error(&DetectionError::Validation(err)),
    };

    let analysis = match detector.analyze(&audio, language) {
        Ok(analysis) => analysis,
        Err(err) => return emit_error(&err),
    };

    let payload = ClassifyPayload {
        status: "success",
        language,
        result: &analysis.assessment.result,
        ai_score: details.then_some(analysis.assessment.ai_score),
        indicators: details.then_some(&analysis.assessment.indicators),
        features: details.then_some(&analysis.features),
    };
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(ExitCode::from(0))
}

fn run_features(detector: &VoiceDetector, input: &Input) -> Result<ExitCode> {
    let audio = match load_audio(input)? {
        Ok(audio) if audio.is_empty() => {
            return emit_error(&DetectionError::Validation(ValidationError::EmptyAudio))
        }
        Ok(audio) => audio,
        Err(err) => return emit_error(&DetectionError::Validation(err)),
    };

    let features = detector.extract_all(&audio);
    println!("{}", serde_json::to_string_pretty(&features)?);
    Ok(ExitCode::from(0))
}

/// Read the payload; I/O failures are errors, bad base64 is a validation failure
fn load_audio(input: &Input) -> Result<Result<Vec<u8>, ValidationError>> {
    if let Some(path) = &input.file {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        return Ok(Ok(bytes));
    }
    let encoded = input.base64.as_deref().unwrap_or_default();
    Ok(decode_base64(encoded).map_err(ValidationError::from))
}

/// Print the error envelope to stderr; validation failures exit with 2
fn emit_error(err: &DetectionError) -> Result<ExitCode> {
    let payload = ErrorPayload {
        status: "error",
        message: err.message(),
    };
    eprintln!("{}", serde_json::to_string_pretty(&payload)?);

    match err {
        DetectionError::Validation(_) => Ok(ExitCode::from(2)),
        DetectionError::Internal { details } => {
            eprintln!("Details: {details}");
            Ok(ExitCode::from(1))
        }
        DetectionError::Unauthorized => Ok(ExitCode::from(1)),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassifyPayload<'a> {
    status: &'static str,
    language: Language,
    #[serde(flatten)]
    result: &'a ClassificationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    ai_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    indicators: Option<&'a IndicatorSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    features: Option<&'a FeatureVector>,
}

#[derive(Serialize)]
struct ErrorPayload {
    status: &'static str,
    message: String,
}
