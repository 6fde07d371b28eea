//! JSON HTTP API for voice detection.
//!
//! An Axum router exposing service info on `GET /` and
//! `GET /api/voice-detection`, and classification on
//! `POST /api/voice-detection` guarded by the `x-api-key` header.

mod routes;
mod validation;

pub use routes::{
    build_router, detect_voice, run_http_server, service_info, ApiState, DetectionResponse,
    ErrorResponse, ServiceInfo, DEFAULT_BODY_LIMIT, DETECTION_PATH,
};
pub use validation::{validate_request, ValidatedRequest, VoiceDetectionRequest, SUPPORTED_FORMAT};
