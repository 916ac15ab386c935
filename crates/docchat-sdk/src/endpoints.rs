//! Canonical endpoint paths of the DocChat backend.
//!
//! Every URL the client calls is built through [`Endpoints`], from one base
//! URL, so uploads and chat can never drift onto different hosts.
//!
//! ```text
//! {base}/          ← health check
//! {base}/upload    ← multipart PDF upload
//! {base}/chat      ← JSON chat turn
//! ```

/// Central authority for backend URLs.
///
/// # Examples
///
/// ```
/// use docchat_sdk::Endpoints;
///
/// let base = "http://localhost:8000";
/// assert_eq!(Endpoints::upload(base), "http://localhost:8000/upload");
/// assert_eq!(Endpoints::chat(base), "http://localhost:8000/chat");
/// assert_eq!(Endpoints::health(base), "http://localhost:8000/");
/// ```
pub struct Endpoints;

impl Endpoints {
    /// Multipart upload endpoint.
    pub fn upload(base: &str) -> String {
        format!("{}/upload", Self::trim(base))
    }

    /// Chat endpoint.
    pub fn chat(base: &str) -> String {
        format!("{}/chat", Self::trim(base))
    }

    /// Health check (the backend root).
    pub fn health(base: &str) -> String {
        format!("{}/", Self::trim(base))
    }

    fn trim(base: &str) -> &str {
        base.trim_end_matches('/')
    }
}
