// Error types for the voice detection service
//
// This module defines custom error types for request validation, payload
// decoding, and classification, providing structured error handling with
// error codes that map cleanly onto HTTP responses.

mod detection;
mod validation;

pub use detection::{log_detection_error, DetectionError, DetectionErrorCodes};
pub use validation::{DecodeError, ValidationError, ValidationErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// the HTTP and CLI boundaries.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
