//! SDK error types.
//!
//! [`SdkError`] is the single error type returned by every fallible
//! operation in the SDK. Sessions never let it escape: they turn it into an
//! alert (uploads) or a fallback transcript entry (chat).

use reqwest::StatusCode;

/// Error type for all SDK operations.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Invalid configuration (e.g. an unparseable base URL).
    #[error("configuration error: {0}")]
    Config(String),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {detail}")]
    Status {
        /// HTTP status code.
        status: StatusCode,
        /// `detail` from the error body, or the raw body text.
        detail: String,
    },

    /// Transport-level failure (connection refused, reset, bad body...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization / deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SdkError {
    /// HTTP status of a [`SdkError::Status`], if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display() {
        let err = SdkError::Status {
            status: StatusCode::BAD_REQUEST,
            detail: "Only PDF files are allowed".into(),
        };
        assert_eq!(
            err.to_string(),
            "backend returned 400 Bad Request: Only PDF files are allowed"
        );
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn config_error_has_no_status() {
        let err = SdkError::Config("bad url".into());
        assert_eq!(err.to_string(), "configuration error: bad url");
        assert_eq!(err.status(), None);
    }
}
