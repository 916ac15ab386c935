//! Error type for the mock backend.
//!
//! [`ApiError`] implements [`IntoResponse`] so handlers can return
//! `Result<…, ApiError>` directly. Bodies use the backend's
//! `{"detail": …}` shape.

use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use docchat_models::ErrorBody;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The uploaded file name does not end in `.pdf`.
    #[error("Only PDF files are allowed")]
    NotPdf,

    /// No multipart field named `file`.
    #[error("Field required: file")]
    MissingFile,

    /// The multipart stream could not be read.
    #[error("invalid multipart body: {0}")]
    Multipart(#[from] MultipartError),

    /// The chat body is not a `{"message": …}` object.
    #[error("invalid JSON body: {0}")]
    Json(#[from] JsonRejection),

    /// Failure forced through `MOCK_FAIL_*`.
    #[error("{0}")]
    Forced(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotPdf | Self::Multipart(_) => StatusCode::BAD_REQUEST,
            Self::MissingFile | Self::Json(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Forced(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let detail = self.to_string();

        tracing::warn!(%status, %detail, "request failed");
        (status, Json(ErrorBody { detail })).into_response()
    }
}
