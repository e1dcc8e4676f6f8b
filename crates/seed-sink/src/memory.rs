//! In-memory record sink.

use std::collections::{HashMap, HashSet};
use std::mem::{discriminant, Discriminant};

use anyhow::Result;
use seed_core::{SeedRecord, SeedValue};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::SinkError;
use crate::traits::RecordSink;

/// Primary key identity: `Int(2)` and `String("2")` are different keys.
type Key = (Discriminant<SeedValue>, String);

fn key_of(value: &SeedValue) -> Key {
    (discriminant(value), value.to_string())
}

#[derive(Debug, Default)]
struct Table {
    records: Vec<SeedRecord>,
    keys: HashSet<Key>,
    next_id: i64,
}

impl Table {
    /// Next sequential id not taken by an explicit key.
    fn assign_id(&mut self) -> SeedValue {
        loop {
            self.next_id += 1;
            let id = SeedValue::Int(self.next_id);
            if !self.keys.contains(&key_of(&id)) {
                return id;
            }
        }
    }
}

/// Sink keeping records in memory, per model.
///
/// Rejects a record whose primary key is already present. Records without a
/// primary key value get sequential integer ids starting at 1; when the
/// record names an `id_field` the assigned id is stored under it.
#[derive(Debug, Default)]
pub struct MemorySink {
    tables: Mutex<HashMap<String, Table>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the stored records of `model`, in insertion order.
    pub async fn records(&self, model: &str) -> Vec<SeedRecord> {
        self.tables
            .lock()
            .await
            .get(model)
            .map(|t| t.records.clone())
            .unwrap_or_default()
    }

    /// Number of stored records of `model`.
    pub async fn count(&self, model: &str) -> usize {
        self.tables
            .lock()
            .await
            .get(model)
            .map(|t| t.records.len())
            .unwrap_or(0)
    }

    /// Names of models with at least one stored record, sorted.
    pub async fn models(&self) -> Vec<String> {
        let tables = self.tables.lock().await;
        let mut names: Vec<String> = tables
            .iter()
            .filter(|(_, t)| !t.records.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }
}

#[async_trait::async_trait]
impl RecordSink for MemorySink {
    async fn create(&self, record: &SeedRecord) -> Result<SeedValue> {
        let mut tables = self.tables.lock().await;
        let table = tables.entry(record.model.clone()).or_default();

        let mut stored = record.clone();
        let id = match record.id().filter(|v| !v.is_null()) {
            Some(id) => id.clone(),
            None => {
                let id = table.assign_id();
                if let Some(id_field) = &record.id_field {
                    stored.insert(id_field.clone(), id.clone());
                }
                id
            }
        };

        if record.id_field.is_some() && !table.keys.insert(key_of(&id)) {
            return Err(SinkError::DuplicateKey {
                model: record.model.clone(),
                key: id.to_string(),
            }
            .into());
        }

        table.records.push(stored);
        Ok(id)
    }

    async fn delete_all(&self, model: &str) -> Result<u64> {
        let removed = self
            .tables
            .lock()
            .await
            .remove(model)
            .map(|t| t.records.len() as u64)
            .unwrap_or(0);
        debug!("Deleted {} records of {} from memory", removed, model);
        Ok(removed)
    }

    async fn existing_records(&self, model: &str) -> Result<Vec<SeedRecord>> {
        Ok(self.records(model).await)
    }
}
