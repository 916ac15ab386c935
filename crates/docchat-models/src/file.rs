//! Upload candidates and acknowledged uploads.
//!
//! A [`FileCandidate`] is a file the user *selected*; a [`FileRecord`] is a
//! file the backend *acknowledged*. Only the latter ever appears in the
//! uploaded-files list.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

// ---------------------------------------------------------------------------
// MediaType
// ---------------------------------------------------------------------------

/// Declared media type of a candidate file (e.g. `application/pdf`).
///
/// # Examples
///
/// ```
/// use docchat_models::MediaType;
///
/// assert!(MediaType::pdf().is_pdf());
/// assert!(!MediaType::new("text/plain").is_pdf());
/// assert_eq!(MediaType::from_path("slides.pdf").as_str(), "application/pdf");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaType(String);

impl MediaType {
    /// Media type accepted by the upload endpoint.
    pub const PDF: &'static str = "application/pdf";

    /// Fallback when nothing can be inferred from a file name.
    pub const OCTET_STREAM: &'static str = "application/octet-stream";

    /// Create a media type from its string form.
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// The `application/pdf` media type.
    pub fn pdf() -> Self {
        Self::new(Self::PDF)
    }

    /// Infer the media type from a file name's extension.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        mime_guess::from_path(path)
            .first()
            .map_or_else(|| Self::new(Self::OCTET_STREAM), |m| Self::new(m.essence_str()))
    }

    /// Return the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is exactly `application/pdf`.
    pub fn is_pdf(&self) -> bool {
        self.0 == Self::PDF
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// FileCandidate
// ---------------------------------------------------------------------------

/// A raw file handle selected by the user, not yet sent anywhere.
#[derive(Clone, PartialEq, Eq)]
pub struct FileCandidate {
    /// File name (no directory part).
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Declared media type.
    pub media_type: MediaType,
    /// File content.
    pub content: Vec<u8>,
}

impl FileCandidate {
    /// Build a candidate from in-memory content.
    pub fn new(name: impl Into<String>, media_type: MediaType, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: content.len() as u64,
            media_type,
            content,
        }
    }

    /// Read a candidate from disk, declaring its media type from the extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        if !path.is_file() {
            return Err(ModelError::NotAFile { path: display });
        }

        let content = std::fs::read(path).map_err(|e| ModelError::UnreadableFile {
            path: display.clone(),
            reason: e.to_string(),
        })?;

        let name = path
            .file_name()
            .map_or(display, |n| n.to_string_lossy().into_owned());

        Ok(Self::new(name, MediaType::from_path(path), content))
    }

    /// Read `path` only if its extension declares `application/pdf`.
    ///
    /// Returns `Ok(None)` without touching the file system for anything
    /// else, so missing or unreadable non-PDFs never fail the caller.
    pub fn pdf_from_path(path: impl AsRef<Path>) -> Result<Option<Self>, ModelError> {
        let path = path.as_ref();
        if !MediaType::from_path(path).is_pdf() {
            return Ok(None);
        }
        Self::from_path(path).map(Some)
    }

    /// Returns true if the declared media type is `application/pdf`.
    pub fn is_pdf(&self) -> bool {
        self.media_type.is_pdf()
    }
}

impl fmt::Debug for FileCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileCandidate")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("media_type", &self.media_type)
            .finish_non_exhaustive()
    }
}

/// Keep only candidates declaring `application/pdf`, preserving order.
pub fn retain_pdfs(candidates: impl IntoIterator<Item = FileCandidate>) -> Vec<FileCandidate> {
    candidates.into_iter().filter(FileCandidate::is_pdf).collect()
}

// ---------------------------------------------------------------------------
// FileRecord
// ---------------------------------------------------------------------------

/// A file the backend acknowledged.
///
/// Built from the client-side metadata of the uploaded candidate, never
/// from the server's response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// File name as selected.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// When the acknowledgment was recorded.
    pub uploaded_at: DateTime<Utc>,
}

impl FileRecord {
    /// Record an acknowledged upload of `candidate` at `uploaded_at`.
    pub fn acknowledged(candidate: &FileCandidate, uploaded_at: DateTime<Utc>) -> Self {
        Self {
            name: candidate.name.clone(),
            size: candidate.size,
            uploaded_at,
        }
    }

    /// Size rendered in kilobytes with two decimals, e.g. `"12.50 KB"`.
    #[allow(clippy::cast_precision_loss)]
    pub fn size_kb(&self) -> String {
        format!("{:.2} KB", self.size as f64 / 1024.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn candidate(name: &str, media: &str) -> FileCandidate {
        FileCandidate::new(name, MediaType::new(media), b"%PDF-1.4".to_vec())
    }

    #[test]
    fn media_type_from_extension() {
        assert_eq!(MediaType::from_path("a.pdf").as_str(), "application/pdf");
        assert_eq!(MediaType::from_path("a.txt").as_str(), "text/plain");
        assert_eq!(
            MediaType::from_path("no_extension").as_str(),
            MediaType::OCTET_STREAM
        );
    }

    #[test]
    fn pdf_check_is_exact() {
        assert!(MediaType::new("application/pdf").is_pdf());
        assert!(!MediaType::new("application/pdfx").is_pdf());
        assert!(!MediaType::new("application/x-pdf").is_pdf());
    }

    #[test]
    fn retain_pdfs_keeps_order_and_drops_others() {
        let kept = retain_pdfs(vec![
            candidate("a.pdf", "application/pdf"),
            candidate("b.png", "image/png"),
            candidate("c.pdf", "application/pdf"),
        ]);
        let names: Vec<_> = kept.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "c.pdf"]);
    }

    #[test]
    fn candidate_size_tracks_content() {
        let c = FileCandidate::new("x.pdf", MediaType::pdf(), vec![0; 2048]);
        assert_eq!(c.size, 2048);
    }

    #[test]
    fn candidate_debug_omits_content() {
        let c = FileCandidate::new("x.pdf", MediaType::pdf(), vec![7; 4]);
        let dbg = format!("{c:?}");
        assert!(dbg.contains("x.pdf"));
        assert!(!dbg.contains("content"));
    }

    #[test]
    fn candidate_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"%PDF-1.7 fake").unwrap();

        let c = FileCandidate::from_path(&path).unwrap();
        assert_eq!(c.name, "report.pdf");
        assert_eq!(c.size, 13);
        assert!(c.is_pdf());
    }

    #[test]
    fn candidate_from_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileCandidate::from_path(dir.path()).unwrap_err();
        assert!(matches!(err, ModelError::NotAFile { .. }));
    }

    #[test]
    fn pdf_from_path_skips_non_pdfs_unread() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("a.pdf");
        std::fs::write(&pdf, b"%PDF-1.4").unwrap();
        let missing_txt = dir.path().join("missing.txt");

        assert!(FileCandidate::pdf_from_path(&missing_txt).unwrap().is_none());
        assert!(FileCandidate::pdf_from_path(dir.path()).unwrap().is_none());

        let c = FileCandidate::pdf_from_path(&pdf).unwrap().unwrap();
        assert_eq!(c.name, "a.pdf");
    }

    #[test]
    fn pdf_from_path_reports_missing_pdf() {
        let err = FileCandidate::pdf_from_path("/definitely/not/here.pdf").unwrap_err();
        assert!(matches!(err, ModelError::NotAFile { .. }));
    }

    #[test]
    fn record_uses_client_metadata() {
        let c = FileCandidate::new("doc.pdf", MediaType::pdf(), vec![0; 1536]);
        let at = Utc::now();
        let r = FileRecord::acknowledged(&c, at);
        assert_eq!(r.name, "doc.pdf");
        assert_eq!(r.size, 1536);
        assert_eq!(r.uploaded_at, at);
        assert_eq!(r.size_kb(), "1.50 KB");
    }

    #[test]
    fn record_serializes_camel_case() {
        let c = FileCandidate::new("doc.pdf", MediaType::pdf(), vec![]);
        let json = serde_json::to_value(FileRecord::acknowledged(&c, Utc::now())).unwrap();
        assert!(json.get("uploadedAt").is_some());
        assert!(json.get("uploaded_at").is_none());
    }
}
