// Detection error types and constants

use crate::error::{ErrorCode, ValidationError};
use log::error;
use std::fmt;

/// Detection error code constants
///
/// Error code range: 2001-2003
pub struct DetectionErrorCodes {}

impl DetectionErrorCodes {
    /// Missing or mismatched API key
    pub const UNAUTHORIZED: i32 = 2001;

    /// Request failed validation (see `ValidationErrorCodes` for detail)
    pub const VALIDATION: i32 = 2002;

    /// Unexpected failure during decoding, extraction, or scoring
    pub const INTERNAL: i32 = 2003;
}

/// Log a detection error with structured context
///
/// Internal details are logged here and never returned to the client.
pub fn log_detection_error(err: &DetectionError, context: &str) {
    match err {
        DetectionError::Internal { details } => error!(
            "Detection error in {}: code={}, component=VoiceDetector, details={}",
            context,
            err.code(),
            details
        ),
        _ => error!(
            "Detection error in {}: code={}, component=VoiceDetector, message={}",
            context,
            err.code(),
            err.message()
        ),
    }
}

/// Top-level error taxonomy for a detection request
///
/// Maps one-to-one onto HTTP status codes: 401, 400 and 500.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionError {
    /// API key missing or wrong
    Unauthorized,

    /// First violated request constraint
    Validation(ValidationError),

    /// Anything unexpected; details stay server-side
    Internal { details: String },
}

impl ErrorCode for DetectionError {
    fn code(&self) -> i32 {
        match self {
            DetectionError::Unauthorized => DetectionErrorCodes::UNAUTHORIZED,
            DetectionError::Validation(_) => DetectionErrorCodes::VALIDATION,
            DetectionError::Internal { .. } => DetectionErrorCodes::INTERNAL,
        }
    }

    fn message(&self) -> String {
        match self {
            DetectionError::Unauthorized => "Invalid API key or malformed request".to_string(),
            DetectionError::Validation(inner) => inner.message(),
            DetectionError::Internal { .. } => "Internal server error".to_string(),
        }
    }
}

impl fmt::Display for DetectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DetectionError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for DetectionError {}

impl From<ValidationError> for DetectionError {
    fn from(err: ValidationError) -> Self {
        DetectionError::Validation(err)
    }
}
