//! Error types for the bundled sinks.

use thiserror::Error;

/// Errors raised by [`MemorySink`](crate::MemorySink) and
/// [`JsonlSink`](crate::JsonlSink).
#[derive(Error, Debug)]
pub enum SinkError {
    /// A record with the same primary key already exists.
    #[error("Duplicate primary key '{key}' for model {model}")]
    DuplicateKey { model: String, key: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
