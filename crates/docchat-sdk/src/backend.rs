//! The seam between the sessions and the network.
//!
//! Sessions are generic over [`Backend`] so the state machines can be driven
//! by [`crate::DocChatClient`] in production and by scripted fakes in tests.

use std::future::Future;

use docchat_models::{ChatResponse, FileCandidate, UploadAck};

use crate::error::SdkError;

/// The two operations the backend offers.
pub trait Backend {
    /// Upload one file as the multipart field `file`.
    fn upload(&self, file: &FileCandidate)
        -> impl Future<Output = Result<UploadAck, SdkError>> + Send;

    /// Send one chat turn.
    fn chat(&self, message: &str) -> impl Future<Output = Result<ChatResponse, SdkError>> + Send;
}
