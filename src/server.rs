//! HTTP chat surface.
//!
//! Serves a single chat session over a small JSON API. The session lives
//! behind one `tokio::sync::Mutex`, so uploads and chat messages are
//! handled strictly one at a time.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (returns version) |
//! | `GET`  | `/session` | Upload state and the full conversation history |
//! | `POST` | `/upload` | Ingest one PDF (`Content-Type: application/pdf`, raw bytes) |
//! | `POST` | `/chat` | Ask a question: `{ "message": "..." }` |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "no_document", "message": "Please upload a PDF document to start chatting." } }
//! ```
//!
//! Error codes: `unsupported_upload` (415), `invalid_pdf` (400),
//! `bad_request` (400), `payload_too_large` (413), `no_document` (409),
//! `embedding_error` (502), `generation_error` (502), `store_error` (500).
//! Requests rejected before reaching a handler (malformed JSON, oversized
//! upload) use the same body.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, JsonRejection},
        DefaultBodyLimit, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::error::ChatError;
use crate::extract::ensure_pdf_content_type;
use crate::ingest::STORED_MESSAGE;
use crate::models::{ConversationTurn, Exchange, IngestReport};
use crate::pipeline::Pipeline;
use crate::session::Session;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
struct AppState {
    pipeline: Arc<Pipeline>,
    session: Arc<Mutex<Session>>,
}

/// Build the router for one session.
pub fn router(pipeline: Arc<Pipeline>, session: Session, max_upload_bytes: usize) -> Router {
    let state = AppState {
        pipeline,
        session: Arc::new(Mutex::new(session)),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/session", get(handle_session))
        .route("/upload", post(handle_upload))
        .route("/chat", post(handle_chat))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .with_state(state)
}

/// Starts the HTTP server on `[server].bind` and runs until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let pipeline = Arc::new(Pipeline::from_config(config).await?);
    let session = pipeline.new_session().await?;
    let app = router(pipeline, session, config.server.max_upload_bytes());

    let bind_addr = &config.server.bind;
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    log::info!("chat server listening on http://{}", bind_addr);
    println!("Chat server listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code.to_string(),
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        let (status, code) = match &err {
            ChatError::UnsupportedUpload(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported_upload")
            }
            ChatError::InvalidPdf(_) => (StatusCode::BAD_REQUEST, "invalid_pdf"),
            ChatError::EmptyMessage => (StatusCode::BAD_REQUEST, "bad_request"),
            ChatError::NoDocument => (StatusCode::CONFLICT, "no_document"),
            ChatError::Embedding(_) => (StatusCode::BAD_GATEWAY, "embedding_error"),
            ChatError::Generation(_) => (StatusCode::BAD_GATEWAY, "generation_error"),
            ChatError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error"),
        };
        if status.is_server_error() {
            log::error!("{}", err);
        }
        AppError {
            status,
            code,
            message: err.to_string(),
        }
    }
}

impl AppError {
    fn rejected(status: StatusCode, message: String) -> Self {
        // 413 keeps its status; every other rejection is a malformed request
        let (status, code) = if status == StatusCode::PAYLOAD_TOO_LARGE {
            (status, "payload_too_large")
        } else {
            (StatusCode::BAD_REQUEST, "bad_request")
        };
        AppError {
            status,
            code,
            message,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        AppError::rejected(rejection.status(), rejection.body_text())
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /session ============

#[derive(Serialize)]
struct SessionResponse {
    document_ready: bool,
    messages: Vec<ConversationTurn>,
}

async fn handle_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.session.lock().await;
    Json(SessionResponse {
        document_ready: session.is_document_ready(),
        messages: session.messages().to_vec(),
    })
}

// ============ POST /upload ============

#[derive(Serialize)]
struct UploadResponse {
    message: &'static str,
    #[serde(flatten)]
    report: IngestReport,
}

async fn handle_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    ensure_pdf_content_type(content_type)?;
    let body = body?;

    let mut session = state.session.lock().await;
    let report = state.pipeline.ingest_pdf(&mut session, &body).await?;

    Ok(Json(UploadResponse {
        message: STORED_MESSAGE,
        report,
    }))
}

// ============ POST /chat ============

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
}

async fn handle_chat(
    State(state): State<AppState>,
    request: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<Exchange>, AppError> {
    let Json(request) = request?;
    let mut session = state.session.lock().await;
    let exchange = state.pipeline.submit(&mut session, &request.message).await?;
    Ok(Json(exchange))
}
