//! # simpleui-server
//!
//! HTTP front end of the SimpleUi landing page.
//!
//! This binary provides:
//! - **Download registration**: a visitor leaves a name, the download counter
//!   goes up, and the static artifact becomes available
//! - **Feedback**: star-rated free-text messages
//! - **Listing views** of the feedback log and the download log
//! - **REST API** (axum) with JSON bodies; all persistence goes through
//!   `simpleui-store`

mod api;
mod artifact_store;
mod config;
mod error;

use std::sync::{Arc, Mutex};

use anyhow::Context;
use simpleui_store::Database;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::AppState;
use crate::artifact_store::ArtifactStore;
use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("info,simpleui_server=debug,simpleui_store=debug")
            }),
        )
        .init();

    info!("Starting SimpleUi server v{}", env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(?config, "Loaded configuration");

    // -----------------------------------------------------------------------
    // 3. Initialize subsystems
    // -----------------------------------------------------------------------

    // Opening runs the schema migrations; the server does not start without
    // a usable database.
    let database = Database::open_with_timeout(&config.database_path, config.db_busy_timeout)
        .with_context(|| {
            format!("failed to open database at {}", config.database_path.display())
        })?;
    info!(
        downloads = database.download_count()?,
        schema_version = database.schema_version()?,
        "Database ready"
    );

    let artifact =
        ArtifactStore::new(config.artifact_path.clone(), config.artifact_mime.clone()).await;
    info!(
        path = %artifact.path().display(),
        file_name = artifact.file_name(),
        "Serving artifact"
    );

    let http_addr = config.http_addr;
    let app_state = AppState {
        db: Arc::new(Mutex::new(database)),
        artifact: Arc::new(artifact),
        config: Arc::new(config),
    };

    // -----------------------------------------------------------------------
    // 4. Run the HTTP API server (blocks until shutdown)
    // -----------------------------------------------------------------------
    // The database handle lives in `app_state` and is closed when the last
    // clone is dropped on the way out of `main`.
    tokio::select! {
        result = api::serve(app_state, http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
