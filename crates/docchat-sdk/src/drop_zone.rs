//! Drag-and-drop input adaptation.
//!
//! Terminals deliver a file dropped onto the window as pasted text: one or
//! more paths, quoted or backslash-escaped depending on the emulator,
//! sometimes as `file://` URIs. [`DragPayload::from_pasted_text`] turns that
//! text into paths; [`DropZone`] tracks the "active" highlight between the
//! drag entering and the drop (or the drag leaving).
//!
//! The zone itself never uploads anything: [`DragPayload::pdf_candidates`]
//! hands the PDF subset to [`crate::UploadSession`].

use std::path::PathBuf;

use docchat_models::FileCandidate;
use tracing::{debug, warn};

/// The items carried by one drag gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragPayload {
    items: Vec<PathBuf>,
}

impl DragPayload {
    /// Payload from already-split paths.
    pub fn new(items: Vec<PathBuf>) -> Self {
        Self { items }
    }

    /// Parse text pasted by a terminal drop.
    pub fn from_pasted_text(text: &str) -> Self {
        let items = shlex::Shlex::new(text)
            .filter(|token| !token.is_empty())
            .filter_map(|token| {
                let path = normalize_pasted_token(&token);
                if path.is_none() {
                    debug!(%token, "ignoring non-local file URI");
                }
                path
            })
            .collect();
        Self { items }
    }

    /// Number of advertised items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// The advertised paths.
    pub fn items(&self) -> &[PathBuf] {
        &self.items
    }

    /// Read the items declaring `application/pdf`, in order.
    ///
    /// Other items are never opened. Unreadable PDFs are skipped with a
    /// warning.
    pub fn pdf_candidates(&self) -> Vec<FileCandidate> {
        self.items
            .iter()
            .filter_map(|path| match FileCandidate::pdf_from_path(path) {
                Ok(Some(candidate)) => Some(candidate),
                Ok(None) => {
                    debug!(path = %path.display(), "skipping non-PDF item");
                    None
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping dropped item");
                    None
                }
            })
            .collect()
    }
}

/// Highlight state of the drop target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropZone {
    active: bool,
}

impl DropZone {
    /// Whether a drag with at least one item is hovering.
    pub fn is_active(self) -> bool {
        self.active
    }

    /// A drag entered the zone; activates only if it carries items.
    pub fn drag_enter(&mut self, payload: &DragPayload) {
        if payload.item_count() > 0 {
            self.active = true;
        }
    }

    /// The drag left without dropping.
    pub fn drag_leave(&mut self) {
        self.active = false;
    }

    /// The payload was dropped; returns the PDF candidates to submit.
    pub fn drop(&mut self, payload: &DragPayload) -> Vec<FileCandidate> {
        self.active = false;
        let candidates = payload.pdf_candidates();
        debug!(
            items = payload.item_count(),
            pdfs = candidates.len(),
            "payload dropped"
        );
        candidates
    }
}

/// Turn one shell-split token into a path, decoding `file:` URIs.
fn normalize_pasted_token(token: &str) -> Option<PathBuf> {
    match url::Url::parse(token) {
        Ok(url) if url.scheme() == "file" => url.to_file_path().ok(),
        _ => Some(PathBuf::from(token)),
    }
}
