//! # DocChat SDK
//!
//! Client side of the **DocChat** document-chat service: upload PDFs, then
//! ask questions about them.
//!
//! The SDK provides:
//!
//! * [`DocChatClient`]: HTTP client for `POST /upload`, `POST /chat` and
//!   the `GET /` health check.
//! * [`Backend`]: the trait the sessions are generic over.
//! * [`Endpoints`]: canonical endpoint URLs derived from one base.
//! * [`ClientConfig`]: base URL resolution.
//! * [`UploadSession`], [`DropZone`], [`ChatSession`] and [`AppShell`]:
//!   front-end-agnostic state machines shared by the CLI and the TUI.
//! * [`SdkError`]: unified error type for all SDK operations.
//!
//! Model types from [`docchat_models`] are re-exported for convenience.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use docchat_sdk::{AppShell, ClientConfig, DocChatClient, FileCandidate};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DocChatClient::new(&ClientConfig::from_env())?;
//! let mut shell = AppShell::new();
//!
//! let report = FileCandidate::from_path("report.pdf")?;
//! if let Some(alert) = shell.submit_files(&client, [report]).await {
//!     eprintln!("{}", alert.message);
//! }
//!
//! let answer = shell.send_chat(&client, "Summarize the report").await;
//! # let _ = answer;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod chat_session;
pub mod client;
pub mod config;
pub mod drop_zone;
pub mod endpoints;
pub mod error;
pub mod shell;
pub mod upload_session;

#[cfg(test)]
mod testing;

pub use backend::Backend;
pub use chat_session::{ChatSession, ChatTicket, CHAT_FALLBACK, GREETING};
pub use client::{DocChatClient, UPLOAD_FIELD};
pub use config::{ClientConfig, API_URL_ENV, DEFAULT_API_URL};
pub use drop_zone::{DragPayload, DropZone};
pub use endpoints::Endpoints;
pub use error::SdkError;
pub use shell::AppShell;
pub use upload_session::{
    run_batch, Alert, BatchOutcome, UploadBatch, UploadReport, UploadSession, UPLOAD_ALERT,
};

pub use docchat_models::{ChatResponse, FileCandidate, FileRecord, MediaType, Message, Role};
