//! Error types for the `docchat-models` crate.
//!
//! All fallible constructors in this crate return variants of [`ModelError`].

/// Errors produced when constructing model types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A candidate file could not be read from disk.
    #[error("cannot read file \"{path}\": {reason}")]
    UnreadableFile {
        /// The path that failed.
        path: String,
        /// Human-readable explanation.
        reason: String,
    },

    /// A path points at something that is not a regular file.
    #[error("not a regular file: {path}")]
    NotAFile {
        /// The offending path.
        path: String,
    },
}
