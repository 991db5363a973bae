use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use simpleui_shared::ValidationError;
use simpleui_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Input rejected by a submission rule; the user can correct and retry.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The database could not be read or written.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Request body missing, not JSON, or of the wrong shape.
    #[error("Invalid request body: {message}")]
    InvalidBody { status: StatusCode, message: String },

    #[error("Artifact not found")]
    ArtifactNotFound,

    #[error("Artifact storage error: {0}")]
    ArtifactStorage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(v) => ServerError::Validation(v),
            other => ServerError::StoreUnavailable(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            ServerError::StoreUnavailable(_) => {
                tracing::error!(error = %self, "store failure");
                (StatusCode::SERVICE_UNAVAILABLE, "Service unavailable".to_string())
            }
            ServerError::InvalidBody { status, .. } => (*status, self.to_string()),
            ServerError::ArtifactNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ServerError::ArtifactStorage(_) => {
                tracing::error!(error = %self, "artifact read failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Artifact storage error".to_string())
            }
            ServerError::Internal(_) => {
                tracing::error!(error = %self, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = serde_json::json!({
            "error": message,
        });

        (status, axum::Json(body)).into_response()
    }
}
