// Validation and decode error types

use crate::error::ErrorCode;
use std::fmt;

/// Validation error code constants
///
/// Error code range: 1001-1006
pub struct ValidationErrorCodes {}

impl ValidationErrorCodes {
    /// One or more required request fields are missing or empty
    pub const MISSING_FIELDS: i32 = 1001;

    /// Request body is not a JSON object
    pub const MALFORMED_BODY: i32 = 1002;

    /// Language is not one of the supported languages
    pub const UNSUPPORTED_LANGUAGE: i32 = 1003;

    /// Audio format is not mp3
    pub const UNSUPPORTED_FORMAT: i32 = 1004;

    /// Audio payload is not valid base64
    pub const INVALID_BASE64: i32 = 1005;

    /// Audio payload decoded to zero bytes
    pub const EMPTY_AUDIO: i32 = 1006;
}

/// Base64 decoding failure for the audio payload
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError {
    pub reason: String,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "base64 decode failed: {}", self.reason)
    }
}

impl std::error::Error for DecodeError {}

impl From<base64::DecodeError> for DecodeError {
    fn from(err: base64::DecodeError) -> Self {
        DecodeError {
            reason: err.to_string(),
        }
    }
}

/// Request validation errors
///
/// Each variant is a client-side mistake and maps onto HTTP 400. Only the
/// first violated constraint is ever reported.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required fields missing or empty (names in request order)
    MissingFields { fields: Vec<&'static str> },

    /// Body could not be parsed as a JSON object
    MalformedBody { reason: String },

    /// Language outside the supported set
    UnsupportedLanguage { given: String },

    /// Audio format other than mp3
    UnsupportedFormat { given: String },

    /// Audio payload is not valid base64
    InvalidBase64 { reason: String },

    /// Audio payload decoded to nothing
    EmptyAudio,
}

impl ErrorCode for ValidationError {
    fn code(&self) -> i32 {
        match self {
            ValidationError::MissingFields { .. } => ValidationErrorCodes::MISSING_FIELDS,
            ValidationError::MalformedBody { .. } => ValidationErrorCodes::MALFORMED_BODY,
            ValidationError::UnsupportedLanguage { .. } => {
                ValidationErrorCodes::UNSUPPORTED_LANGUAGE
            }
            ValidationError::UnsupportedFormat { .. } => ValidationErrorCodes::UNSUPPORTED_FORMAT,
            ValidationError::InvalidBase64 { .. } => ValidationErrorCodes::INVALID_BASE64,
            ValidationError::EmptyAudio => ValidationErrorCodes::EMPTY_AUDIO,
        }
    }

    fn message(&self) -> String {
        match self {
            ValidationError::MissingFields { fields } => {
                format!("Missing required fields: {}", fields.join(", "))
            }
            ValidationError::MalformedBody { .. } => "Invalid request".to_string(),
            ValidationError::UnsupportedLanguage { .. } => format!(
                "Invalid language. Must be one of: {}",
                crate::analysis::Language::names().join(", ")
            ),
            ValidationError::UnsupportedFormat { .. } => "audioFormat must be mp3".to_string(),
            ValidationError::InvalidBase64 { .. } => "Invalid Base64 encoding".to_string(),
            ValidationError::EmptyAudio => "Audio payload is empty".to_string(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ValidationError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for ValidationError {}

impl From<DecodeError> for ValidationError {
    fn from(err: DecodeError) -> Self {
        ValidationError::InvalidBase64 { reason: err.reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_codes() {
        assert_eq!(
            ValidationError::MissingFields {
                fields: vec!["language"]
            }
            .code(),
            1001
        );
        assert_eq!(
            ValidationError::MalformedBody {
                reason: "eof".to_string()
            }
            .code(),
            1002
        );
        assert_eq!(
            ValidationError::UnsupportedLanguage {
                given: "French".to_string()
            }
            .code(),
            1003
        );
        assert_eq!(
            ValidationError::UnsupportedFormat {
                given: "wav".to_string()
            }
            .code(),
            1004
        );
        assert_eq!(
            ValidationError::InvalidBase64 {
                reason: "bad".to_string()
            }
            .code(),
            1005
        );
        assert_eq!(ValidationError::EmptyAudio.code(), 1006);
    }

    #[test]
    fn test_language_message_lists_all_options() {
        let err = ValidationError::UnsupportedLanguage {
            given: "French".to_string(),
        };
        assert_eq!(
            err.message(),
            "Invalid language. Must be one of: Tamil, English, Hindi, Malayalam, Telugu"
        );
    }

    #[test]
    fn test_missing_fields_message() {
        let err = ValidationError::MissingFields {
            fields: vec!["audioFormat", "audioBase64"],
        };
        assert_eq!(
            err.message(),
            "Missing required fields: audioFormat, audioBase64"
        );
    }

    #[test]
    fn test_decode_error_converts_to_invalid_base64() {
        let err: ValidationError = DecodeError {
            reason: "Invalid byte 45, offset 3.".to_string(),
        }
        .into();
        assert_eq!(err.code(), ValidationErrorCodes::INVALID_BASE64);
        assert!(err.message().contains("Invalid Base64 encoding"));
    }
}
