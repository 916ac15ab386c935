//! Upload state machine.
//!
//! An upload is two transitions around one asynchronous batch:
//!
//! 1. [`UploadSession::begin`] filters the selection down to PDFs and, if
//!    anything is left, raises the `uploading` flag and returns an
//!    [`UploadBatch`].
//! 2. [`run_batch`] sends the files one after the other, stopping at the
//!    first failure.
//! 3. [`UploadSession::finish`] lowers the flag and turns the
//!    [`BatchOutcome`] into an [`UploadReport`]: the records to append and,
//!    on failure, the alert to show.
//!
//! [`UploadSession::submit`] chains the three for callers that can simply
//! await. Event loops call them separately and run the batch on a task.

use chrono::Utc;
use docchat_models::{retain_pdfs, FileCandidate, FileRecord};
use tracing::{debug, info, warn};

use crate::backend::Backend;
use crate::drop_zone::{DragPayload, DropZone};
use crate::error::SdkError;

/// Text of the alert raised when a batch fails.
pub const UPLOAD_ALERT: &str = "Failed to upload file. Please try again.";

/// A blocking, user-facing notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Text to display.
    pub message: String,
}

impl Alert {
    fn upload_failed() -> Self {
        Self {
            message: UPLOAD_ALERT.to_string(),
        }
    }
}

/// PDFs accepted by [`UploadSession::begin`], in selection order.
#[derive(Debug, Clone)]
pub struct UploadBatch {
    files: Vec<FileCandidate>,
}

impl UploadBatch {
    /// Files in the batch.
    pub fn files(&self) -> &[FileCandidate] {
        &self.files
    }

    /// Number of files in the batch.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Always false: [`UploadSession::begin`] never builds an empty batch.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Result of [`run_batch`].
#[derive(Debug)]
pub struct BatchOutcome {
    /// Records for the files acknowledged before any failure, in order.
    pub acknowledged: Vec<FileRecord>,
    /// The error that stopped the batch, if any.
    pub failure: Option<SdkError>,
}

/// What a finished batch means for the rest of the application.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UploadReport {
    /// Records to append to the uploaded-files list.
    pub records: Vec<FileRecord>,
    /// Alert to show, present only when the batch failed.
    pub alert: Option<Alert>,
}

/// Client-side upload state: the in-flight flag and the drop target.
#[derive(Debug, Default)]
pub struct UploadSession {
    in_flight: usize,
    drop_zone: DropZone,
}

impl UploadSession {
    /// A session with nothing in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while at least one batch is outstanding (drives the spinner).
    pub fn is_uploading(&self) -> bool {
        self.in_flight > 0
    }

    /// The drop target's highlight state.
    pub fn drop_zone(&self) -> DropZone {
        self.drop_zone
    }

    /// Start a batch from a raw selection.
    ///
    /// Non-PDF candidates are dropped silently. Returns `None`, and leaves
    /// the session untouched, when nothing remains.
    pub fn begin(
        &mut self,
        candidates: impl IntoIterator<Item = FileCandidate>,
    ) -> Option<UploadBatch> {
        let files = retain_pdfs(candidates);
        if files.is_empty() {
            debug!("no PDF in selection, nothing to upload");
            return None;
        }

        self.in_flight += 1;
        info!(files = files.len(), "upload batch started");
        Some(UploadBatch { files })
    }

    /// Complete a batch started with [`Self::begin`].
    pub fn finish(&mut self, outcome: BatchOutcome) -> UploadReport {
        self.in_flight = self.in_flight.saturating_sub(1);

        let alert = outcome.failure.map(|e| {
            warn!(
                acknowledged = outcome.acknowledged.len(),
                status = ?e.status(),
                error = %e,
                "upload batch aborted"
            );
            Alert::upload_failed()
        });
        if alert.is_none() {
            info!(files = outcome.acknowledged.len(), "upload batch complete");
        }

        UploadReport {
            records: outcome.acknowledged,
            alert,
        }
    }

    /// Filter, upload sequentially, and report.
    pub async fn submit<B: Backend>(
        &mut self,
        backend: &B,
        candidates: impl IntoIterator<Item = FileCandidate>,
    ) -> UploadReport {
        let Some(batch) = self.begin(candidates) else {
            return UploadReport::default();
        };
        let outcome = run_batch(backend, batch).await;
        self.finish(outcome)
    }

    /// A drag entered the drop target.
    pub fn drag_enter(&mut self, payload: &DragPayload) {
        self.drop_zone.drag_enter(payload);
    }

    /// The drag left the drop target.
    pub fn drag_leave(&mut self) {
        self.drop_zone.drag_leave();
    }

    /// The payload was dropped: same path as a file-picker selection.
    pub fn drop_payload(&mut self, payload: &DragPayload) -> Option<UploadBatch> {
        let candidates = self.drop_zone.drop(payload);
        self.begin(candidates)
    }

    /// Remove an uploaded file.
    ///
    /// Not supported by the backend; always returns `false` and changes
    /// nothing.
    pub fn remove(&mut self, index: usize) -> bool {
        debug!(index, "file removal requested, not supported");
        false
    }
}

/// Upload the batch one file at a time.
///
/// File `i + 1` is sent only after file `i` resolved. The first failure ends
/// the batch; later files are never attempted.
pub async fn run_batch<B: Backend>(backend: &B, batch: UploadBatch) -> BatchOutcome {
    let mut acknowledged = Vec::with_capacity(batch.len());

    for file in &batch.files {
        match backend.upload(file).await {
            Ok(ack) => {
                debug!(file = %file.name, server_name = ?ack.filename, "acknowledged");
                acknowledged.push(FileRecord::acknowledged(file, Utc::now()));
            }
            Err(e) => {
                return BatchOutcome {
                    acknowledged,
                    failure: Some(e),
                };
            }
        }
    }

    BatchOutcome {
        acknowledged,
        failure: None,
    }
}
