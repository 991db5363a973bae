use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use simpleui_shared::constants::{ARTIFACT_FILE_NAME, ARTIFACT_MIME};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::error::ServerError;

/// The static file handed out after a successful download registration.
///
/// The contents are opaque: they are read from disk on every request and
/// passed through untouched.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    path: PathBuf,
    file_name: String,
    mime: String,
}

impl ArtifactStore {
    /// Point the store at `path`.  A missing file is not an error here, only
    /// when it is requested.
    pub async fn new(path: PathBuf, mime: String) -> Self {
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) if is_header_safe(name) && !name.contains(['"', '\\']) => name.to_string(),
            other => {
                warn!(
                    file_name = ?other,
                    fallback = ARTIFACT_FILE_NAME,
                    "Artifact file name cannot be sent in Content-Disposition"
                );
                ARTIFACT_FILE_NAME.to_string()
            }
        };

        let mime = if is_header_safe(&mime) {
            mime
        } else {
            warn!(mime = %mime, fallback = ARTIFACT_MIME, "Invalid artifact MIME type");
            ARTIFACT_MIME.to_string()
        };

        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {
                info!(path = %path.display(), size = meta.len(), "Artifact store initialized");
            }
            _ => warn!(path = %path.display(), "Artifact file is missing, downloads will fail"),
        }

        Self {
            path,
            file_name,
            mime,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name offered to the browser.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub async fn read(&self) -> Result<Vec<u8>, ServerError> {
        let data = fs::read(&self.path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => ServerError::ArtifactNotFound,
            _ => ServerError::ArtifactStorage(format!(
                "Failed to read artifact '{}': {}",
                self.path.display(),
                e
            )),
        })?;

        debug!(size = data.len(), "Read artifact");
        Ok(data)
    }
}

/// Non-empty, printable ASCII only: what a header value can carry verbatim.
fn is_header_safe(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c == ' ' || c.is_ascii_graphic())
}
