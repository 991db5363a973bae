//! Server configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the server can start with zero
//! configuration for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use simpleui_shared::constants::{
    APP_NAME, ARTIFACT_FILE_NAME, ARTIFACT_MIME, DATABASE_FILE_NAME, DEFAULT_HTTP_PORT,
};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address for the HTTP (axum) API server.
    /// Env: `HTTP_ADDR`
    /// Default: `0.0.0.0:8080`
    pub http_addr: SocketAddr,

    /// SQLite database file.
    /// Env: `DATABASE_PATH`
    /// Default: `./downloads.db`
    pub database_path: PathBuf,

    /// How long a write waits on another connection's lock.
    /// Env: `DB_BUSY_TIMEOUT_MS`
    /// Default: 5000 ms
    pub db_busy_timeout: Duration,

    /// File handed out after a successful download registration.
    /// Env: `ARTIFACT_PATH`
    /// Default: `./SimpleUiBeta.apk`
    pub artifact_path: PathBuf,

    /// Content type sent with the artifact.
    /// Env: `ARTIFACT_MIME`
    pub artifact_mime: String,

    /// Human-readable name reported by `/info`.
    /// Env: `INSTANCE_NAME`
    /// Default: `"SimpleUi"`
    pub instance_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([0, 0, 0, 0], DEFAULT_HTTP_PORT).into(),
            database_path: PathBuf::from(".").join(DATABASE_FILE_NAME),
            db_busy_timeout: simpleui_store::database::DEFAULT_BUSY_TIMEOUT,
            artifact_path: PathBuf::from(".").join(ARTIFACT_FILE_NAME),
            artifact_mime: ARTIFACT_MIME.to_string(),
            instance_name: APP_NAME.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = lookup("HTTP_ADDR") {
            if let Ok(parsed) = addr.parse::<SocketAddr>() {
                config.http_addr = parsed;
            } else {
                tracing::warn!(
                    value = %addr,
                    "Invalid HTTP_ADDR, using default"
                );
            }
        }

        if let Some(path) = lookup("DATABASE_PATH").filter(|p| !p.is_empty()) {
            config.database_path = PathBuf::from(path);
        }

        if let Some(val) = lookup("DB_BUSY_TIMEOUT_MS") {
            match val.parse::<u64>() {
                Ok(ms) => config.db_busy_timeout = Duration::from_millis(ms),
                Err(e) => {
                    tracing::warn!(
                        value = %val,
                        error = %e,
                        "Invalid DB_BUSY_TIMEOUT_MS, using default"
                    );
                }
            }
        }

        if let Some(path) = lookup("ARTIFACT_PATH").filter(|p| !p.is_empty()) {
            config.artifact_path = PathBuf::from(path);
        }

        if let Some(mime) = lookup("ARTIFACT_MIME").filter(|m| !m.is_empty()) {
            config.artifact_mime = mime;
        }

        if let Some(name) = lookup("INSTANCE_NAME").filter(|n| !n.is_empty()) {
            config.instance_name = name;
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}
