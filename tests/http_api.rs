use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{json, Value};
use tower::ServiceExt;
use voice_detector::analysis::classifier::{ByteWeights, ClassifierConfig};
use voice_detector::analysis::explanation::ExplanationCatalog;
use voice_detector::http::{build_router, ApiState, DETECTION_PATH};
use voice_detector::{DetectorConfig, VoiceDetector};

const KEY: &str = "sk_test_voice";

fn make_router() -> Router {
    build_router(ApiState::new(VoiceDetector::default(), KEY.to_string()))
}

/// Frame sync followed by 2000 zero bytes
fn near_silent_mp3_base64() -> String {
    let mut bytes = vec![0xFF, 0xFB];
    bytes.extend(vec![0u8; 2000]);
    STANDARD.encode(bytes)
}

fn detect_request(key: Option<&str>, body: impl Into<Body>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(DETECTION_PATH)
        .header("content-type", "application/json");
    if let Some(key) = key {
        builder = builder.header("x-api-key", key);
    }
    builder.body(body.into()).expect("detect request")
}

fn body_for(language: &str, format: &str, audio: &str) -> String {
    json!({
        "language": language,
        "audioFormat": format,
        "audioBase64": audio,
    })
    .to_string()
}

async fn response_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    let json = serde_json::from_slice::<Value>(&bytes).expect("JSON body");
    (status, json)
}

async fn call(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    response_json(router.oneshot(request).await.expect("router call")).await
}

#[tokio::test]
async fn info_endpoint_reports_status() {
    let (status, json) = call(
        make_router(),
        Request::builder()
            .uri(DETECTION_PATH)
            .body(Body::empty())
            .expect("info request"),
    )
    .await;

    println!("[HTTP] GET {DETECTION_PATH} => {json}");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["message"].is_string());
    assert!(json["version"].is_string());
    assert!(json["endpoints"].is_object());
}

#[tokio::test]
async fn missing_key_is_unauthorized_even_with_invalid_body() {
    let (status, json) = call(make_router(), detect_request(None, "not json at all")).await;

    println!("[HTTP] POST (no key) => {json}");
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], "Invalid API key or malformed request");
}

#[tokio::test]
async fn mismatched_key_is_unauthorized() {
    let body = body_for("English", "mp3", &near_silent_mp3_base64());
    let (status, json) = call(make_router(), detect_request(Some("sk_test_voic"), body)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Invalid API key or malformed request");
}

#[tokio::test]
async fn unsupported_language_lists_supported_values() {
    let body = body_for("French", "mp3", &near_silent_mp3_base64());
    let (status, json) = call(make_router(), detect_request(Some(KEY), body)).await;

    println!("[HTTP] POST (French) => {json}");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], "error");
    assert_eq!(
        json["message"],
        "Invalid language. Must be one of: Tamil, English, Hindi, Malayalam, Telugu"
    );
}

#[tokio::test]
async fn missing_fields_are_named() {
    let body = json!({ "language": "Tamil" }).to_string();
    let (status, json) = call(make_router(), detect_request(Some(KEY), body)).await;

    println!("[HTTP] POST (missing fields) => {json}");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = json["message"].as_str().unwrap_or_default();
    assert!(message.contains("audioFormat"), "got {message}");
    assert!(message.contains("audioBase64"), "got {message}");
}

#[tokio::test]
async fn non_mp3_format_is_rejected() {
    let body = body_for("Hindi", "wav", &near_silent_mp3_base64());
    let (status, json) = call(make_router(), detect_request(Some(KEY), body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "audioFormat must be mp3");
}

#[tokio::test]
async fn malformed_base64_is_bad_request_not_internal() {
    let body = body_for("English", "mp3", "not-base64-!!");
    let (status, json) = call(make_router(), detect_request(Some(KEY), body)).await;

    println!("[HTTP] POST (bad base64) => {json}");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["message"]
        .as_str()
        .unwrap_or_default()
        .contains("Invalid Base64 encoding"));
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (status, json) = call(make_router(), detect_request(Some(KEY), "{\"language\":")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid request");
}

#[tokio::test]
async fn near_silent_mp3_is_classified() {
    let body = body_for("English", "mp3", &near_silent_mp3_base64());
    let (status, json) = call(make_router(), detect_request(Some(KEY), body)).await;

    println!("[HTTP] POST (near-silent mp3) => {json}");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
    assert_eq!(json["language"], "English");
    assert_eq!(json["classification"], "AI_GENERATED");
    assert_eq!(json["confidenceScore"], 0.54);
    assert_eq!(
        json["explanation"],
        ExplanationCatalog::default().ai_combined.as_str()
    );
}

#[tokio::test]
async fn identical_requests_get_identical_responses() {
    let body = body_for("Malayalam", "mp3", &near_silent_mp3_base64());
    let (_, first) = call(make_router(), detect_request(Some(KEY), body.clone())).await;
    let (_, second) = call(make_router(), detect_request(Some(KEY), body)).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn non_finite_score_is_sanitized_internal_error() {
    let detector = VoiceDetector::new(DetectorConfig {
        classifier: ClassifierConfig {
            byte_weights: ByteWeights {
                entropy: f64::NAN,
                ..ByteWeights::default()
            },
            ..ClassifierConfig::default()
        },
        ..DetectorConfig::default()
    });
    let router = build_router(ApiState::new(detector, KEY.to_string()));
    let body = body_for("Telugu", "mp3", &near_silent_mp3_base64());
    let (status, json) = call(router, detect_request(Some(KEY), body)).await;

    println!("[HTTP] POST (NaN weights) => {json}");
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], "Internal server error");
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let response = make_router()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri(DETECTION_PATH)
                .header("origin", "https://example.com")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "x-api-key,content-type")
                .body(Body::empty())
                .expect("preflight request"),
        )
        .await
        .expect("preflight call");

    assert!(response.status().is_success());
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let router = build_router(
        ApiState::new(VoiceDetector::default(), KEY.to_string()).with_body_limit(16),
    );
    let body = body_for("English", "mp3", &near_silent_mp3_base64());
    assert!(body.len() > 16);

    let response = router
        .oneshot(detect_request(Some(KEY), body))
        .await
        .expect("router call");

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn body_within_limit_is_accepted() {
    let body = body_for("English", "mp3", &near_silent_mp3_base64());
    let router = build_router(
        ApiState::new(VoiceDetector::default(), KEY.to_string()).with_body_limit(body.len()),
    );
    let (status, json) = call(router, detect_request(Some(KEY), body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
}
