// Voice Detector Core - AI-generated voice detection service
// Heuristic byte and signal statistics behind a JSON HTTP API

// Module declarations
pub mod analysis;
pub mod config;
pub mod error;
pub mod http;

// Re-exports for convenience
pub use analysis::{
    Classification, ClassificationResult, DetectorConfig, Language, VoiceDetector,
};
pub use config::AppConfig;
pub use error::{DetectionError, ValidationError};

use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Initialize the global tracing subscriber
///
/// Honors `RUST_LOG`, falling back to `default_filter`. Output goes to
/// stderr so stdout stays free for JSON. `log` records from the config
/// loader are bridged into the same subscriber. Subsequent calls are no-ops.
pub fn init_logging(default_filter: &str) {
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);
    let subscriber = Registry::default()
        .with(build_env_filter(default_filter))
        .with(stderr_layer);
    if subscriber.try_init().is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

fn build_env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}
