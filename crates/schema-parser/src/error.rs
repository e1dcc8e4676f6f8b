//! Error types for schema parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal schema errors. Only an unreadable source is fatal; everything the
/// parser does not understand is reported as a [`ParseDiagnostic`].
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Schema source unreadable
    #[error("Failed to read schema file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A declaration the parser skipped.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("line {line}: {message}")]
pub struct ParseDiagnostic {
    pub line: usize,
    pub message: String,
}

impl ParseDiagnostic {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}
