use std::sync::{Arc, Mutex};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use simpleui_shared::constants::DEFAULT_RATING;
use simpleui_store::{Database, DownloadEntry, DownloadReceipt, FeedbackEntry, FeedbackReceipt};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::artifact_store::ArtifactStore;
use crate::config::ServerConfig;
use crate::error::ServerError;

/// Path the artifact is served from.
pub const ARTIFACT_ROUTE: &str = "/artifact";

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
    pub artifact: Arc<ArtifactStore>,
    pub config: Arc<ServerConfig>,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/info", get(server_info))
        .route("/api/downloads/count", get(download_count))
        .route("/api/downloads", get(list_downloads).post(register_download))
        .route("/api/feedback", get(list_feedback).post(submit_feedback))
        .route(ARTIFACT_ROUTE, get(artifact_download))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run a store operation on the blocking pool.
///
/// rusqlite calls are synchronous, so they stay off the async workers.
async fn with_db<T, F>(state: &AppState, op: F) -> Result<T, ServerError>
where
    T: Send + 'static,
    F: FnOnce(&mut Database) -> simpleui_store::Result<T> + Send + 'static,
{
    let db = Arc::clone(&state.db);
    tokio::task::spawn_blocking(move || {
        let mut guard = db
            .lock()
            .map_err(|_| ServerError::StoreUnavailable("database lock poisoned".into()))?;
        op(&mut *guard).map_err(ServerError::from)
    })
    .await
    .map_err(|e| ServerError::Internal(format!("store task failed: {e}")))?
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct ServerInfoResponse {
    name: String,
    version: &'static str,
    artifact: String,
}

#[derive(Serialize)]
struct CountResponse {
    total_downloads: u64,
}

#[derive(Deserialize)]
struct DownloadRequest {
    name: String,
}

#[derive(Serialize)]
struct DownloadResponse {
    #[serde(flatten)]
    receipt: DownloadReceipt,
    artifact_url: &'static str,
}

#[derive(Serialize)]
struct DownloadLogResponse {
    total_downloads: u64,
    entries: Vec<DownloadEntry>,
}

#[derive(Deserialize)]
struct FeedbackRequest {
    #[serde(default)]
    name: String,
    message: String,
    #[serde(default = "default_rating")]
    rating: u8,
}

fn default_rating() -> u8 {
    DEFAULT_RATING
}

#[derive(Serialize)]
struct FeedbackLogResponse {
    entries: Vec<FeedbackEntry>,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn server_info(State(state): State<AppState>) -> Json<ServerInfoResponse> {
    Json(ServerInfoResponse {
        name: state.config.instance_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        artifact: state.artifact.file_name().to_string(),
    })
}

async fn download_count(State(state): State<AppState>) -> Result<Json<CountResponse>, ServerError> {
    let total_downloads = with_db(&state, |db| db.download_count()).await?;
    Ok(Json(CountResponse { total_downloads }))
}

async fn register_download(
    State(state): State<AppState>,
    payload: Result<Json<DownloadRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DownloadResponse>), ServerError> {
    let Json(req) = payload?;
    let receipt = with_db(&state, move |db| db.register_download(&req.name)).await?;

    info!(
        user = %receipt.user,
        total = receipt.total_downloads,
        "Download registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(DownloadResponse {
            receipt,
            artifact_url: ARTIFACT_ROUTE,
        }),
    ))
}

async fn list_downloads(
    State(state): State<AppState>,
) -> Result<Json<DownloadLogResponse>, ServerError> {
    let (total_downloads, entries) = with_db(&state, |db| {
        Ok((db.download_count()?, db.list_downloads()?))
    })
    .await?;

    Ok(Json(DownloadLogResponse {
        total_downloads,
        entries,
    }))
}

async fn submit_feedback(
    State(state): State<AppState>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<FeedbackReceipt>), ServerError> {
    let Json(req) = payload?;
    let receipt = with_db(&state, move |db| {
        db.submit_feedback(&req.name, &req.message, req.rating)
    })
    .await?;

    info!(user = %receipt.user, rating = receipt.rating, "Feedback received");

    Ok((StatusCode::CREATED, Json(receipt)))
}

async fn list_feedback(
    State(state): State<AppState>,
) -> Result<Json<FeedbackLogResponse>, ServerError> {
    let entries = with_db(&state, |db| db.list_feedback()).await?;
    Ok(Json(FeedbackLogResponse { entries }))
}

async fn artifact_download(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServerError> {
    let data = state.artifact.read().await?;

    let headers = [
        (header::CONTENT_TYPE, state.artifact.mime().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", state.artifact.file_name()),
        ),
    ];

    Ok((headers, data))
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;

    async fn test_app() -> (Router, AppState, TempDir) {
        let dir = TempDir::new().unwrap();
        let artifact_path = dir.path().join("SimpleUiBeta.apk");
        std::fs::write(&artifact_path, b"apk-bytes").unwrap();

        let config = ServerConfig {
            database_path: dir.path().join("downloads.db"),
            artifact_path: artifact_path.clone(),
            ..ServerConfig::default()
        };
        let db = Database::open_at(&config.database_path).unwrap();
        let artifact = ArtifactStore::new(artifact_path, config.artifact_mime.clone()).await;

        let state = AppState {
            db: Arc::new(Mutex::new(db)),
            artifact: Arc::new(artifact),
            config: Arc::new(config),
        };
        (build_router(state.clone()), state, dir)
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let req = Request::get(uri).body(Body::empty()).unwrap();
        let (status, body) = send(app, req).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let req = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, body) = send(app, req).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _state, _dir) = test_app().await;
        let (status, body) = get_json(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_info_names_artifact() {
        let (app, _state, _dir) = test_app().await;
        let (_, body) = get_json(&app, "/info").await;
        assert_eq!(body["name"], "SimpleUi");
        assert_eq!(body["artifact"], "SimpleUiBeta.apk");
    }

    #[tokio::test]
    async fn test_register_download_flow() {
        let (app, _state, _dir) = test_app().await;

        let (status, body) = post_json(&app, "/api/downloads", json!({ "name": "  Alice " })).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user"], "Alice");
        assert_eq!(body["total_downloads"], 1);
        assert_eq!(body["artifact_url"], ARTIFACT_ROUTE);

        let (_, body) = get_json(&app, "/api/downloads/count").await;
        assert_eq!(body["total_downloads"], 1);

        let (_, body) = get_json(&app, "/api/downloads").await;
        assert_eq!(body["total_downloads"], 1);
        assert_eq!(body["entries"][0]["user"], "Alice");
    }

    #[tokio::test]
    async fn test_short_name_is_unprocessable() {
        let (app, state, _dir) = test_app().await;

        let (status, body) = post_json(&app, "/api/downloads", json!({ "name": "Al" })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "Please enter a valid name (min 3 characters)");

        assert_eq!(state.db.lock().unwrap().download_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_feedback_flow() {
        let (app, _state, _dir) = test_app().await;

        let (status, body) =
            post_json(&app, "/api/feedback", json!({ "message": "Great job" })).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user"], "Anonymous");
        assert_eq!(body["rating"], 5);

        let (status, _) = post_json(
            &app,
            "/api/feedback",
            json!({ "name": "Cara", "message": "Needs themes", "rating": 3 }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, body) = get_json(&app, "/api/feedback").await;
        let entries = body["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["message"], "Great job");
        assert_eq!(entries[1]["user"], "Cara");
        assert_eq!(entries[1]["rating"], 3);
    }

    #[tokio::test]
    async fn test_feedback_rejections() {
        let (app, _state, _dir) = test_app().await;

        let (status, body) =
            post_json(&app, "/api/feedback", json!({ "name": "Cara", "message": "   " })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "Please share your thoughts before submitting");

        let (status, _) =
            post_json(&app, "/api/feedback", json!({ "message": "Hi", "rating": 9 })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, body) = get_json(&app, "/api/feedback").await;
        assert!(body["entries"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_bodies_get_json_errors() {
        let (app, state, _dir) = test_app().await;

        let (status, body) =
            post_json(&app, "/api/feedback", json!({ "message": "hi", "rating": 300 })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("rating"));

        let (status, body) = post_json(&app, "/api/feedback", json!({ "name": "x" })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("message"));

        let (status, body) = post_json(&app, "/api/downloads", json!({ "name": 42 })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].is_string());

        let req = Request::post("/api/downloads")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, raw) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&raw).unwrap();
        assert!(body["error"].is_string());

        let req = Request::post("/api/feedback")
            .body(Body::from(r#"{"message":"hi"}"#))
            .unwrap();
        let (status, raw) = send(&app, req).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let body: Value = serde_json::from_slice(&raw).unwrap();
        assert!(body["error"].is_string());

        let guard = state.db.lock().unwrap();
        assert!(guard.list_feedback().unwrap().is_empty());
        assert_eq!(guard.download_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_artifact_with_quoted_file_name() {
        let dir = TempDir::new().unwrap();
        let artifact_path = dir.path().join("Simple\"Ui.apk");
        std::fs::write(&artifact_path, b"apk-bytes").unwrap();

        let config = ServerConfig {
            database_path: dir.path().join("downloads.db"),
            artifact_path: artifact_path.clone(),
            ..ServerConfig::default()
        };
        let state = AppState {
            db: Arc::new(Mutex::new(Database::open_at(&config.database_path).unwrap())),
            artifact: Arc::new(ArtifactStore::new(artifact_path, config.artifact_mime.clone()).await),
            config: Arc::new(config),
        };
        let app = build_router(state);

        let req = Request::get(ARTIFACT_ROUTE).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"SimpleUiBeta.apk\""
        );
    }

    #[tokio::test]
    async fn test_artifact_headers_and_bytes() {
        let (app, _state, _dir) = test_app().await;

        let req = Request::get(ARTIFACT_ROUTE).body(Body::empty()).unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "application/vnd.android.package-archive"
        );
        assert_eq!(
            resp.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"SimpleUiBeta.apk\""
        );
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"apk-bytes");
    }

    #[tokio::test]
    async fn test_missing_artifact_is_not_found() {
        let (app, state, _dir) = test_app().await;
        std::fs::remove_file(state.artifact.path()).unwrap();

        let (status, body) = get_json(&app, ARTIFACT_ROUTE).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Artifact not found");
    }
}
