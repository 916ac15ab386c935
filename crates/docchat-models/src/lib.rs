#![deny(missing_docs)]

//! # DocChat Models
//!
//! Core data types for the DocChat document-chat client.
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`message`] | Transcript entries (`Role`, `Message`) |
//! | [`file`] | Upload candidates and acknowledged uploads (`FileCandidate`, `FileRecord`, `MediaType`) |
//! | [`wire`] | JSON bodies exchanged with the backend |
//! | [`error`] | `ModelError` |

pub mod error;
pub mod file;
pub mod message;
pub mod wire;

// Re-export all public types at crate root for convenience.
// Downstream crates can use `docchat_models::Message` directly.
pub use error::*;
pub use file::*;
pub use message::*;
pub use wire::*;
