//! Error type for invalid field overrides.

use thiserror::Error;

/// An override that cannot be honored. Reported per field; the field is
/// skipped and the rest of the record is still generated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// `min` greater than `max`
    #[error("Invalid range for field '{field}': min {min} is greater than max {max}")]
    InvalidRange { field: String, min: f64, max: f64 },

    /// Infinite bound, or a range too wide to sample
    #[error("Range [{min}, {max}] for field '{field}' is not finite")]
    NonFiniteRange { field: String, min: f64, max: f64 },

    /// No configured value lies within `min`/`max`
    #[error("None of the configured values for field '{field}' lie within [{min}, {max}]")]
    NoValueInRange { field: String, min: f64, max: f64 },

    /// Bounds admit no integer, e.g. `min: 1.2, max: 1.8`
    #[error("No integer lies within [{min}, {max}] for field '{field}'")]
    EmptyIntegerRange { field: String, min: f64, max: f64 },

    /// `generator` names no known sub-generator
    #[error("Unknown generator '{generator}' for field '{field}'")]
    UnknownGenerator { field: String, generator: String },
}
