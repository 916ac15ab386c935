//! HTTP client for the DocChat backend.
//!
//! [`DocChatClient`] wraps a [`reqwest::Client`] and the configured base
//! URL. It performs exactly one request per call: no retry, no backoff, no
//! client-side timeout beyond what the transport does by default.
//!
//! # Typical usage
//!
//! ```rust,no_run
//! use docchat_sdk::{Backend, ClientConfig, DocChatClient};
//!
//! # async fn run() -> Result<(), docchat_sdk::SdkError> {
//! let client = DocChatClient::new(&ClientConfig::from_env())?;
//! let reply = client.chat("What is this document about?").await?;
//! println!("{}", reply.response);
//! # Ok(())
//! # }
//! ```

use docchat_models::{
    ChatRequest, ChatResponse, ErrorBody, FileCandidate, HealthStatus, UploadAck,
};
use reqwest::multipart::{Form, Part};
use tracing::{debug, info, warn};

use crate::backend::Backend;
use crate::config::ClientConfig;
use crate::endpoints::Endpoints;
use crate::error::SdkError;

/// Name of the multipart field carrying the document.
pub const UPLOAD_FIELD: &str = "file";

/// A handle on one DocChat backend.
#[derive(Debug, Clone)]
pub struct DocChatClient {
    http: reqwest::Client,
    base_url: String,
}

impl DocChatClient {
    /// Build a client for the configured backend.
    pub fn new(config: &ClientConfig) -> Result<Self, SdkError> {
        config.validate()?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config.api_url.clone(),
        })
    }

    /// The base URL every endpoint is derived from.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /`: check that the backend is reachable.
    pub async fn health(&self) -> Result<HealthStatus, SdkError> {
        let url = Endpoints::health(&self.base_url);
        debug!(%url, "health check");
        let res = check_status(self.http.get(&url).send().await?).await?;
        let bytes = res.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl Backend for DocChatClient {
    /// `POST /upload` with the file as multipart field `file`.
    async fn upload(&self, file: &FileCandidate) -> Result<UploadAck, SdkError> {
        let url = Endpoints::upload(&self.base_url);
        let part = Part::bytes(file.content.clone())
            .file_name(file.name.clone())
            .mime_str(file.media_type.as_str())?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        debug!(%url, file = %file.name, size = file.size, "uploading");
        let res = match self.http.post(&url).multipart(form).send().await {
            Ok(res) => res,
            Err(e) => {
                warn!(file = %file.name, error = %e, "upload transport error");
                return Err(e.into());
            }
        };
        let res = check_status(res).await?;

        // Any JSON is an acknowledgment; only a non-JSON body is an error.
        let bytes = res.bytes().await?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        let ack: UploadAck = serde_json::from_value(value).unwrap_or_default();
        info!(file = %file.name, "upload acknowledged");
        Ok(ack)
    }

    /// `POST /chat` with `{ "message": … }`.
    async fn chat(&self, message: &str) -> Result<ChatResponse, SdkError> {
        let url = Endpoints::chat(&self.base_url);
        let body = ChatRequest {
            message: message.to_string(),
        };

        debug!(%url, chars = message.chars().count(), "sending chat turn");
        let res = check_status(self.http.post(&url).json(&body).send().await?).await?;
        let bytes = res.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Turn a non-2xx response into [`SdkError::Status`].
///
/// The error detail is the backend's `{"detail": …}` when present, the raw
/// body text otherwise.
async fn check_status(res: reqwest::Response) -> Result<reqwest::Response, SdkError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let text = res.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorBody>(&text).map_or(text, |body| body.detail);
    warn!(%status, %detail, "backend rejected request");
    Err(SdkError::Status { status, detail })
}
