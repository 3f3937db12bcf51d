//! Error types for the replay engine.
//!
//! Only conditions a caller can cause are errors. Running off the end of a
//! branch is reported through boolean returns, and tree corruption panics.

use thiserror::Error;

/// Main error type for the crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid coordinate '{value}' for a {size}x{size} board")]
    InvalidCoordinate { value: String, size: usize },

    #[error("invalid value '{value}' for property {name}")]
    InvalidProperty { name: String, value: String },

    #[error("unsupported board size {size}")]
    BoardSize { size: usize },

    #[error("invalid path '{value}' (expected comma separated indices)")]
    InvalidPath { value: String },

    #[error("path {path} does not address a node in this record")]
    PathNotFound { path: String },

    #[error("malformed game record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
