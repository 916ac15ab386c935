//! JSON bodies exchanged with the DocChat backend.
//!
//! ```text
//! POST /chat    { "message": "…" }          →  { "response": "…" }
//! POST /upload  multipart, field `file`      →  { "message": "…", "filename": "…", … }
//! GET  /                                     →  { "message": "DocChat API is running" }
//! error bodies                               →  { "detail": "…" }
//! ```

use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// The user's question, already trimmed.
    pub message: String,
}

/// Response of `POST /chat`.
///
/// A body without a `response` field still parses; the reply is then the
/// empty string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatResponse {
    /// The assistant's answer.
    #[serde(default)]
    pub response: String,
}

/// Response of `POST /upload`.
///
/// The shape is not validated beyond being JSON; every known field is
/// optional and unknown fields are kept in `extra`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct UploadAck {
    /// Human-readable status line.
    #[serde(default)]
    pub message: Option<String>,
    /// File name as stored by the backend.
    #[serde(default)]
    pub filename: Option<String>,
    /// Any other fields the backend returned.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Response of `GET /`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    /// Status line, e.g. `"DocChat API is running"`.
    pub message: String,
}

/// Error body returned by the backend on 4xx/5xx.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    /// Human-readable error detail.
    pub detail: String,
}
