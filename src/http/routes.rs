use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::header::HeaderName;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::analysis::{Classification, Language, VoiceDetector};
use crate::error::{log_detection_error, DetectionError, ErrorCode};

use super::validation::{validate_request, VoiceDetectionRequest};

/// Route serving both service info and detection
pub const DETECTION_PATH: &str = "/api/voice-detection";

/// Default request body ceiling; base64 MP3 clips are large
pub const DEFAULT_BODY_LIMIT: usize = 20 * 1024 * 1024;

static X_API_KEY: HeaderName = HeaderName::from_static("x-api-key");

/// Shared application state for HTTP handlers.
#[derive(Clone)]
pub struct ApiState {
    detector: Arc<VoiceDetector>,
    api_key: Arc<String>,
    body_limit: usize,
}

impl ApiState {
    pub fn new(detector: VoiceDetector, api_key: String) -> Self {
        Self {
            detector: Arc::new(detector),
            api_key: Arc::new(api_key),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Override the maximum accepted request body size in bytes
    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }

    /// First four characters of the key, for log lines
    pub fn key_preview(&self) -> String {
        self.api_key.chars().take(4).collect()
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<(), DetectionError> {
        let provided = headers
            .get(&X_API_KEY)
            .and_then(|value| value.to_str().ok());
        match provided {
            Some(value) if value == self.api_key.as_str() => Ok(()),
            Some(_) => {
                tracing::warn!("Rejected request with mismatched API key");
                Err(DetectionError::Unauthorized)
            }
            None => {
                tracing::warn!("Rejected request without API key");
                Err(DetectionError::Unauthorized)
            }
        }
    }
}

impl IntoResponse for DetectionError {
    fn into_response(self) -> Response {
        let status = match &self {
            DetectionError::Unauthorized => StatusCode::UNAUTHORIZED,
            DetectionError::Validation(_) => StatusCode::BAD_REQUEST,
            DetectionError::Internal { .. } => {
                log_detection_error(&self, "detect_voice");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse {
            status: "error",
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Error envelope
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

/// Success envelope for a classification
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResponse {
    pub status: &'static str,
    pub language: Language,
    pub classification: Classification,
    pub confidence_score: f64,
    pub explanation: String,
}

/// Service info payload.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub detect: &'static str,
    pub info: &'static str,
}

/// Build the Axum router with all handlers.
pub fn build_router(state: ApiState) -> Router {
    let body_limit = state.body_limit;
    Router::new()
        .route("/", get(service_info))
        .route(DETECTION_PATH, get(service_info).post(detect_voice))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server loop until ctrl-c.
pub async fn run_http_server(state: ApiState, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding HTTP listener on {}", addr))?;
    tracing::info!(
        "Voice detection API listening on {} (key prefix {}***)",
        addr,
        state.key_preview()
    );

    let router = build_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP router")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        status: "ok",
        message: "AI-generated voice detection API is running",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            detect: "POST /api/voice-detection",
            info: "GET /api/voice-detection",
        },
    })
}

pub async fn detect_voice(
    State(state): State<ApiState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<DetectionResponse>, DetectionError> {
    state.authorize(&headers)?;

    let request = VoiceDetectionRequest::parse(&body)?;
    let validated = validate_request(&request)?;
    let language = validated.language;

    let detector = Arc::clone(&state.detector);
    let result = tokio::task::spawn_blocking(move || {
        detector.classify(&validated.audio, validated.language)
    })
    .await
    .map_err(|err| DetectionError::Internal {
        details: format!("classification task failed: {}", err),
    })??;

    Ok(Json(DetectionResponse {
        status: "success",
        language,
        classification: result.classification,
        confidence_score: result.confidence_score,
        explanation: result.explanation,
    }))
}
