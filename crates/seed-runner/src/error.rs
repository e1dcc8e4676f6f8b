//! Per-record failures of a seeding pass.

use thiserror::Error;

/// Why a single record was not created. The message of the last failure of
/// a model ends up in its `SeedResult::error`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    /// A required foreign key has no parent record to point to.
    #[error("Cannot satisfy required relation {model}.{field}: no {parent} records exist")]
    ReferentialIntegrity {
        model: String,
        field: String,
        parent: String,
    },

    /// Every candidate parent is already taken (unique key or relation `max`).
    #[error("Cannot satisfy relation {model}.{field}: no {parent} record is still available")]
    ParentsExhausted {
        model: String,
        field: String,
        parent: String,
    },

    /// Every regenerated value of a unique field was already used.
    #[error("Cannot generate a unique {model}.{field} after {attempts} attempts")]
    UniqueExhausted {
        model: String,
        field: String,
        attempts: usize,
    },

    /// The record sink rejected the write.
    #[error("Failed to create {model} record {index}: {message}")]
    Sink {
        model: String,
        index: u64,
        message: String,
    },
}
