use anyhow::Result;
use axum::{extract::{DefaultBodyLimit, Query, State}, http::StatusCode, response::{IntoResponse, Response}, routing::get, Json, Router};
use parking_lot::RwLock;
use retrieval::{ChatConfig, Session};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer, AllowOrigin};
use tower_http::trace::TraceLayer;

/// Largest accepted document upload.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 200 * 1024 * 1024;

#[derive(Deserialize)]
pub struct AskParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Deserialize)]
pub struct UploadParams {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub query: String,
    pub response: String,
    pub matched: bool,
    pub score: Option<f32>,
    pub sentence_id: Option<usize>,
    pub took_s: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub source: String,
    pub sentences: usize,
    pub terms: usize,
    pub loaded_at: String,
    pub warning: Option<String>,
}

/// Holds the currently loaded document, if any. Uploads replace the whole
/// session; readers take a cheap handle and never block an upload for the
/// duration of a match.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ChatConfig>,
    pub max_upload_bytes: usize,
    session: Arc<RwLock<Option<Arc<Session>>>>,
}

impl AppState {
    pub fn new(config: ChatConfig) -> Self {
        Self { config: Arc::new(config), max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES, session: Arc::new(RwLock::new(None)) }
    }

    pub fn with_max_upload_bytes(mut self, max: usize) -> Self {
        self.max_upload_bytes = max;
        self
    }

    pub fn current(&self) -> Option<Arc<Session>> {
        self.session.read().clone()
    }

    /// Build a session from `text` and install it in place of the old one.
    pub fn load(&self, source: impl Into<String>, text: &str) -> Arc<Session> {
        let session = Arc::new(Session::open(source, text, &self.config));
        *self.session.write() = Some(Arc::clone(&session));
        session
    }

    pub fn clear(&self) -> bool {
        self.session.write().take().is_some()
    }
}

pub fn build_app(state: AppState) -> Result<Router> {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes);
    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/document", axum::routing::put(upload_handler).delete(clear_handler).layer(upload_limit))
        .route("/ask", get(ask_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);
    Ok(app)
}

pub async fn upload_handler(State(state): State<AppState>, Query(params): Query<UploadParams>, body: String) -> Result<Json<UploadResponse>, (StatusCode, String)> {
    let source = params.name.unwrap_or_else(|| "upload.txt".to_string());
    let session = tokio::task::spawn_blocking(move || state.load(source, &body))
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "indexing task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to index document".to_string())
        })?;
    let warning = session.is_empty().then(|| "document contains no sentences; every question gets the fallback answer".to_string());
    tracing::info!(source = session.source(), sentences = session.sentences().len(), "document uploaded");
    Ok(Json(UploadResponse {
        source: session.source().to_string(),
        sentences: session.sentences().len(),
        terms: session.index().num_terms(),
        loaded_at: time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339).unwrap_or_default(),
        warning,
    }))
}

pub async fn clear_handler(State(state): State<AppState>) -> StatusCode {
    if state.clear() { StatusCode::NO_CONTENT } else { StatusCode::NOT_FOUND }
}

pub async fn ask_handler(State(state): State<AppState>, Query(params): Query<AskParams>) -> Response {
    let start = std::time::Instant::now();
    let Some(session) = state.current() else {
        let body = serde_json::json!({ "error": "no document loaded; upload a .txt file first" });
        return (StatusCode::CONFLICT, Json(body)).into_response();
    };
    let reply = session.reply(&params.q);
    let resp = AskResponse {
        response: reply.text.to_string(),
        matched: reply.confident,
        score: reply.best.map(|m| m.score),
        sentence_id: reply.best.filter(|_| reply.confident).map(|m| m.sentence_id),
        took_s: start.elapsed().as_secs_f64(),
        query: params.q,
    };
    Json(resp).into_response()
}
