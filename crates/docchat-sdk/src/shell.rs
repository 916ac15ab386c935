//! Composition root.
//!
//! [`AppShell`] owns the canonical uploaded-file list and the two sessions.
//! The sessions never talk to each other: uploads report into the shell via
//! [`AppShell::on_file_upload`], and chat never sees the file list.

use docchat_models::{FileCandidate, FileRecord};
use tracing::debug;

use crate::backend::Backend;
use crate::chat_session::ChatSession;
use crate::upload_session::{Alert, UploadReport, UploadSession};

/// Application state shared by every front end.
#[derive(Debug, Default)]
pub struct AppShell {
    files: Vec<FileRecord>,
    uploads: UploadSession,
    chat: ChatSession,
}

impl AppShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acknowledged files, oldest first.
    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn uploads(&self) -> &UploadSession {
        &self.uploads
    }

    pub fn uploads_mut(&mut self) -> &mut UploadSession {
        &mut self.uploads
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn chat_mut(&mut self) -> &mut ChatSession {
        &mut self.chat
    }

    /// Append a batch of acknowledged records in one update.
    pub fn on_file_upload(&mut self, records: Vec<FileRecord>) {
        if records.is_empty() {
            return;
        }
        debug!(added = records.len(), total = self.files.len() + records.len(), "files updated");
        self.files.extend(records);
    }

    /// Apply a finished batch; returns the alert to display, if any.
    pub fn apply_upload_report(&mut self, report: UploadReport) -> Option<Alert> {
        self.on_file_upload(report.records);
        report.alert
    }

    /// Upload `candidates` and fold the result into the file list.
    pub async fn submit_files<B: Backend>(
        &mut self,
        backend: &B,
        candidates: impl IntoIterator<Item = FileCandidate>,
    ) -> Option<Alert> {
        let report = self.uploads.submit(backend, candidates).await;
        self.apply_upload_report(report)
    }

    /// Send one chat turn; returns the assistant's reply text if accepted.
    pub async fn send_chat<B: Backend>(&mut self, backend: &B, text: &str) -> Option<String> {
        self.chat
            .send(backend, text)
            .await
            .map(|m| m.content.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat_session::GREETING;
    use crate::testing::{pdf, ScriptedBackend};
    use crate::upload_session::UPLOAD_ALERT;

    #[tokio::test]
    async fn successive_batches_append_in_order() {
        let backend = ScriptedBackend::default();
        let mut shell = AppShell::new();

        assert!(shell.submit_files(&backend, vec![pdf("a.pdf"), pdf("b.pdf")]).await.is_none());
        assert!(shell.submit_files(&backend, vec![pdf("c.pdf")]).await.is_none());

        let names: Vec<_> = shell.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf", "c.pdf"]);
    }

    #[tokio::test]
    async fn failed_batch_surfaces_alert_and_keeps_prefix() {
        let backend = ScriptedBackend::default().fail_upload_of("b.pdf");
        let mut shell = AppShell::new();

        let alert = shell
            .submit_files(&backend, vec![pdf("a.pdf"), pdf("b.pdf"), pdf("c.pdf")])
            .await;

        assert_eq!(alert.map(|a| a.message), Some(UPLOAD_ALERT.to_string()));
        assert_eq!(shell.files().len(), 1);
        assert!(!shell.uploads().is_uploading());
    }

    #[tokio::test]
    async fn chat_does_not_touch_files() {
        let backend = ScriptedBackend::default().reply("It is about cats.");
        let mut shell = AppShell::new();

        let reply = shell.send_chat(&backend, "What is it about?").await;

        assert_eq!(reply.as_deref(), Some("It is about cats."));
        assert!(shell.files().is_empty());
        assert_eq!(shell.chat().transcript()[0].content, GREETING);
    }

    #[test]
    fn empty_batch_is_ignored() {
        let mut shell = AppShell::new();
        shell.on_file_upload(Vec::new());
        assert!(shell.files().is_empty());
    }
}
