//! HTTP routes of the mock backend.
//!
//! ```text
//! GET  /        → {"message": "DocChat API is running"}
//! POST /upload  → multipart field `file`, name must end in ".pdf"
//! POST /chat    → {"message": …} answered with a canned {"response": …}
//! ```

use std::sync::{Arc, Mutex};

use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use docchat_models::{ChatRequest, ChatResponse, HealthStatus, UploadAck};
use tracing::info;

use crate::config::MockConfig;
use crate::error::ApiError;

const UPLOADED: &str = "File uploaded and processed successfully!";

/// State shared across all handlers.
pub struct AppState {
    config: MockConfig,
    /// Names of accepted uploads, oldest first.
    documents: Mutex<Vec<String>>,
}

impl AppState {
    pub fn new(config: MockConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            documents: Mutex::new(Vec::new()),
        })
    }

    fn documents(&self) -> Vec<String> {
        self.documents
            .lock()
            .map(|docs| docs.clone())
            .unwrap_or_default()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/upload", post(upload))
        .route("/chat", post(chat))
        .with_state(state)
}

async fn root() -> Json<HealthStatus> {
    Json(HealthStatus {
        message: "DocChat API is running".to_string(),
    })
}

async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadAck>, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await?;
            upload = Some((filename, bytes.len()));
            break;
        }
    }

    let (filename, size) = upload.ok_or(ApiError::MissingFile)?;
    if !filename.ends_with(".pdf") {
        return Err(ApiError::NotPdf);
    }
    if state.config.fail_uploads {
        return Err(ApiError::Forced("Error processing file: forced failure"));
    }

    info!(file = %filename, size, "document stored");
    if let Ok(mut docs) = state.documents.lock() {
        docs.push(filename.clone());
    }

    let mut extra = serde_json::Map::new();
    extra.insert("size".to_string(), size.into());
    Ok(Json(UploadAck {
        message: Some(UPLOADED.to_string()),
        filename: Some(filename),
        extra,
    }))
}

async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = body?;
    if state.config.fail_chat {
        return Err(ApiError::Forced("Error processing chat: forced failure"));
    }

    let docs = state.documents();
    info!(chars = req.message.chars().count(), documents = docs.len(), "chat turn");

    let response = if docs.is_empty() {
        format!(
            "No document has been uploaded yet, so I cannot answer \"{}\". Upload a PDF first.",
            req.message
        )
    } else {
        format!(
            "Based on {} ({} document(s)): you asked \"{}\".",
            docs.join(", "),
            docs.len(),
            req.message
        )
    };
    Ok(Json(ChatResponse { response }))
}
