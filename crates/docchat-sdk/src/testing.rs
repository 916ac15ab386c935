//! Scripted in-memory [`Backend`] for session tests.

use std::sync::Mutex;

use docchat_models::{ChatResponse, FileCandidate, MediaType, UploadAck};

use crate::backend::Backend;
use crate::error::SdkError;

pub(crate) fn pdf(name: &str) -> FileCandidate {
    FileCandidate::new(name, MediaType::pdf(), b"%PDF-1.7".to_vec())
}

fn server_error() -> SdkError {
    SdkError::Status {
        status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        detail: "scripted failure".into(),
    }
}

#[derive(Debug, Default)]
pub(crate) struct ScriptedBackend {
    fail_upload: Option<String>,
    fail_chat: bool,
    reply: String,
    events: Mutex<Vec<String>>,
    chats: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub(crate) fn fail_upload_of(mut self, name: &str) -> Self {
        self.fail_upload = Some(name.to_string());
        self
    }

    pub(crate) fn fail_chat(mut self) -> Self {
        self.fail_chat = true;
        self
    }

    pub(crate) fn reply(mut self, text: &str) -> Self {
        self.reply = text.to_string();
        self
    }

    /// Names passed to `upload`, in call order.
    pub(crate) fn uploaded(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| e.strip_prefix("start ").map(str::to_string))
            .collect()
    }

    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn chats(&self) -> Vec<String> {
        self.chats.lock().unwrap().clone()
    }
}

impl Backend for ScriptedBackend {
    async fn upload(&self, file: &FileCandidate) -> Result<UploadAck, SdkError> {
        self.events.lock().unwrap().push(format!("start {}", file.name));
        tokio::task::yield_now().await;
        self.events.lock().unwrap().push(format!("end {}", file.name));

        if self.fail_upload.as_deref() == Some(file.name.as_str()) {
            return Err(server_error());
        }
        Ok(UploadAck {
            filename: Some(file.name.clone()),
            ..UploadAck::default()
        })
    }

    async fn chat(&self, message: &str) -> Result<ChatResponse, SdkError> {
        self.chats.lock().unwrap().push(message.to_string());
        tokio::task::yield_now().await;

        if self.fail_chat {
            return Err(server_error());
        }
        Ok(ChatResponse {
            response: self.reply.clone(),
        })
    }
}
