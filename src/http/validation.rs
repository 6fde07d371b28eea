//! Request body parsing and validation.
//!
//! Checks run in a fixed order and stop at the first violation: required
//! fields, language, audio format, base64 payload, non-empty audio.

use serde::Deserialize;

use crate::analysis::decode::decode_base64;
use crate::analysis::Language;
use crate::error::ValidationError;

/// Only accepted value of `audioFormat`
pub const SUPPORTED_FORMAT: &str = "mp3";

/// Raw POST body; every field optional so absence can be reported by name
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceDetectionRequest {
    pub language: Option<String>,
    pub audio_format: Option<String>,
    pub audio_base64: Option<String>,
}

impl VoiceDetectionRequest {
    /// Parse a JSON object body
    pub fn parse(body: &[u8]) -> Result<Self, ValidationError> {
        serde_json::from_slice(body).map_err(|err| ValidationError::MalformedBody {
            reason: err.to_string(),
        })
    }
}

/// A request that passed every check, with its audio already decoded
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub language: Language,
    pub audio: Vec<u8>,
}

/// Validate a parsed request, reporting the first violated constraint
pub fn validate_request(request: &VoiceDetectionRequest) -> Result<ValidatedRequest, ValidationError> {
    let fields = [
        ("language", request.language.as_deref()),
        ("audioFormat", request.audio_format.as_deref()),
        ("audioBase64", request.audio_base64.as_deref()),
    ];
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect();

    let (Some(language), Some(audio_format), Some(audio_base64)) = (
        request.language.as_deref(),
        request.audio_format.as_deref(),
        request.audio_base64.as_deref(),
    ) else {
        return Err(ValidationError::MissingFields { fields: missing });
    };
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields { fields: missing });
    }

    let language: Language = language.parse()?;

    if audio_format != SUPPORTED_FORMAT {
        return Err(ValidationError::UnsupportedFormat {
            given: audio_format.to_string(),
        });
    }

    let audio = decode_base64(audio_base64)?;
    if audio.is_empty() {
        return Err(ValidationError::EmptyAudio);
    }

    Ok(ValidatedRequest { language, audio })
}
