use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use voice_detector::config::{AppConfig, API_KEY_ENV};
use voice_detector::http::{run_http_server, ApiState};
use voice_detector::VoiceDetector;

#[derive(Parser, Debug)]
#[command(
    name = "voice_server",
    about = "HTTP API classifying MP3 voice samples as AI-generated or human"
)]
struct Cli {
    /// JSON configuration file (defaults are used when absent)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Bind address, overriding config and environment
    #[arg(long)]
    addr: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    voice_detector::init_logging("info");

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref());

    let Some(api_key) = config.server.api_key.clone() else {
        bail!(
            "no API key configured; set {} or server.api_key in the config file",
            API_KEY_ENV
        );
    };

    let addr = match cli.addr {
        Some(addr) => addr,
        None => config
            .server
            .bind_addr
            .parse()
            .with_context(|| format!("invalid bind address {:?}", config.server.bind_addr))?,
    };

    tracing::info!(
        model = ?config.detector.classifier.model,
        min_spectral_samples = config.detector.min_spectral_samples,
        "Starting voice detection service"
    );

    let state = ApiState::new(VoiceDetector::new(config.detector), api_key)
        .with_body_limit(config.server.max_body_bytes);
    run_http_server(state, addr).await
}
