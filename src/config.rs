//! Configuration management for the voice detection service
//!
//! This module provides runtime configuration loading from JSON files with
//! environment overrides, so thresholds, weights, explanation wording and
//! the scoring model can be tuned without recompilation.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::analysis::DetectorConfig;
use crate::http::DEFAULT_BODY_LIMIT;

/// Environment variable holding the API key secret
pub const API_KEY_ENV: &str = "API_KEY";

/// Environment variable overriding the bind address
pub const BIND_ADDR_ENV: &str = "VOICE_DETECTION_ADDR";

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub detector: DetectorConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind
    pub bind_addr: String,
    /// Shared secret expected in the `x-api-key` header
    ///
    /// The server refuses to start while this is unset.
    pub api_key: Option<String>,
    /// Maximum accepted request body in bytes
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            api_key: None,
            max_body_bytes: DEFAULT_BODY_LIMIT,
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The parsed configuration, or defaults if the file is missing or the
    /// JSON is invalid
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load from an optional file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Self {
        let config = match path {
            Some(path) => Self::load_from_file(path),
            None => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup (normally the process environment)
    ///
    /// Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = non_empty(API_KEY_ENV) {
            self.server.api_key = Some(key);
        }
        if let Some(addr) = non_empty(BIND_ADDR_ENV) {
            self.server.bind_addr = addr;
        }
        self
    }
}
