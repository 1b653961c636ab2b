//! HTTP surface for the chat service.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/chat` | Answer the last message of `{ "messages": [...] }` |
//! | `GET`  | `/api/chat` | Liveness text |
//! | `POST` | `/api/upload-pdf` | Store the text of the multipart `file` field |
//! | `GET`  | `/api/upload-pdf` | Liveness text |
//! | `GET`  | `/health` | Health check (returns version) |

use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        rejection::JsonRejection,
        DefaultBodyLimit, State,
    },
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use docchat_core::{
    ChatCoordinator, ChatMessage, CompletionBackend, DocumentIngestor, Upload, WebLookup,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::any::Any as PanicPayload;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, warn};

use crate::error::ApiError;

pub type Coordinator = ChatCoordinator<Box<dyn WebLookup>, Box<dyn CompletionBackend>>;

const UPLOAD_FIELD: &str = "file";

#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<Coordinator>,
    pub ingestor: Arc<DocumentIngestor>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub size: usize,
    pub message: String,
}

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/chat",
            get(chat_status)
                .post(handle_chat)
                .layer(CatchPanicLayer::custom(chat_panic_response)),
        )
        .route("/api/upload-pdf", get(upload_status).post(handle_upload))
        .route("/health", get(handle_health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .with_state(state)
}

pub async fn serve(bind_addr: &str, app: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(addr = %listener.local_addr()?, "docchat listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(error) = tokio::signal::ctrl_c().await {
                warn!(%error, "failed to listen for shutdown signal");
            }
        })
        .await?;

    Ok(())
}

async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!(%rejection, "rejected chat payload");
        ApiError::InvalidChatRequest
    })?;

    let reply = state.chat.respond(&request.messages).await?;
    Ok(Json(ChatResponse {
        message: reply.message,
    }))
}

async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        debug!(%rejection, "rejected upload payload");
        ApiError::NoFile
    })?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| ApiError::UploadFailed(error.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|error| ApiError::UploadFailed(error.to_string()))?;

        upload = Some(Upload {
            filename,
            content_type,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let ingestor = Arc::clone(&state.ingestor);
    let receipt = tokio::task::spawn_blocking(move || ingestor.ingest(upload))
        .await
        .map_err(|error| ApiError::UploadFailed(error.to_string()))??;

    Ok(Json(UploadResponse {
        success: true,
        filename: receipt.filename,
        size: receipt.size,
        message: "PDF uploaded and processed successfully".to_string(),
    }))
}

fn chat_panic_response(panic: Box<dyn PanicPayload + Send + 'static>) -> Response {
    let details = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "handler panicked".to_string()
    };

    ApiError::ChatFailed(details).into_response()
}

async fn chat_status() -> Json<Value> {
    Json(json!({ "message": "Chat API is running. Use POST to send messages." }))
}

async fn upload_status() -> Json<Value> {
    Json(json!({ "message": "Upload PDF API is running. Use POST to upload files." }))
}

async fn handle_health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}
