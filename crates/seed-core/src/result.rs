//! Per-model outcome of a seeding run.

use serde::{Deserialize, Serialize};

/// Outcome of seeding one model.
///
/// `count` reflects only records the sink actually created. `error` holds
/// the last failure message even when the model partially succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedResult {
    pub model: String,
    pub count: u64,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SeedResult {
    /// Build a result from the requested and created counts.
    ///
    /// A model with zero requested records always succeeds; otherwise success
    /// means at least one record was created.
    pub fn from_counts(
        model: impl Into<String>,
        requested: u64,
        created: u64,
        error: Option<String>,
    ) -> Self {
        Self {
            model: model.into(),
            count: created,
            success: requested == 0 || created > 0,
            error,
        }
    }

    /// A model that failed before any record was attempted.
    pub fn failed(model: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            count: 0,
            success: false,
            error: Some(error.into()),
        }
    }
}
