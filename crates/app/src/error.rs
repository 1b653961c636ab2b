use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use docchat_core::{ChatError, IngestError};
use serde_json::json;
use tracing::error;

/// Errors surfaced by the HTTP handlers.
///
/// Chat errors render as `{ "error": ... }`; upload errors as
/// `{ "success": false, "error": ... }`.
#[derive(Debug)]
pub enum ApiError {
    InvalidChatRequest,
    ChatFailed(String),
    NoFile,
    NotPdf,
    UploadFailed(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidChatRequest | ApiError::NoFile | ApiError::NotPdf => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ChatFailed(_) | ApiError::UploadFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::InvalidChatRequest => json!({ "error": "Invalid request format" }),
            ApiError::ChatFailed(details) => {
                error!(%details, "chat request failed");
                json!({ "error": "Failed to process chat request" })
            }
            ApiError::NoFile => json!({ "success": false, "error": "No file provided" }),
            ApiError::NotPdf => json!({ "success": false, "error": "File must be a PDF" }),
            ApiError::UploadFailed(details) => {
                error!(%details, "upload failed");
                json!({ "success": false, "error": "Failed to process PDF" })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ChatError> for ApiError {
    fn from(value: ChatError) -> Self {
        match value {
            ChatError::EmptyConversation => ApiError::InvalidChatRequest,
        }
    }
}

impl From<IngestError> for ApiError {
    fn from(value: IngestError) -> Self {
        match value {
            IngestError::MissingFile => ApiError::NoFile,
            IngestError::UnsupportedMediaType { .. } => ApiError::NotPdf,
            other => ApiError::UploadFailed(other.to_string()),
        }
    }
}
