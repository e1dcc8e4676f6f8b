//! Run-scoped bookkeeping: parent keys and values of unique fields.

use std::collections::{HashMap, HashSet};

use seed_core::SeedValue;

/// Key values of records created so far, by model and key field.
#[derive(Debug, Default)]
pub(crate) struct ParentPool {
    keys: HashMap<String, HashMap<String, Vec<SeedValue>>>,
}

impl ParentPool {
    pub fn remember(&mut self, model: &str, field: &str, value: SeedValue) {
        self.keys
            .entry(model.to_string())
            .or_default()
            .entry(field.to_string())
            .or_default()
            .push(value);
    }

    /// Values of `model.field` available as foreign-key targets.
    pub fn candidates(&self, model: &str, field: &str) -> &[SeedValue] {
        self.keys
            .get(model)
            .and_then(|fields| fields.get(field))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn forget_model(&mut self, model: &str) {
        self.keys.remove(model);
    }
}

/// Values already used by unique fields, by model and field.
#[derive(Debug, Default)]
pub(crate) struct UniqueValues {
    seen: HashMap<(String, String), HashSet<String>>,
}

impl UniqueValues {
    pub fn contains(&self, model: &str, field: &str, value: &SeedValue) -> bool {
        self.seen
            .get(&(model.to_string(), field.to_string()))
            .is_some_and(|values| values.contains(&value.to_string()))
    }

    /// Record a value; false when it was already used.
    pub fn insert(&mut self, model: &str, field: &str, value: &SeedValue) -> bool {
        self.seen
            .entry((model.to_string(), field.to_string()))
            .or_default()
            .insert(value.to_string())
    }

    pub fn forget_model(&mut self, model: &str) {
        self.seen.retain(|(m, _), _| m != model);
    }
}
