//! RecordSink trait definition.

use std::sync::Arc;

use anyhow::Result;
use seed_core::{SeedRecord, SeedValue};

/// Trait for persisting generated records.
///
/// The orchestrator makes no assumption about the storage technology behind
/// a sink beyond these operations. Each call is a single bounded operation.
///
/// # Usage Pattern
///
/// The orchestrator is generic over the sink:
///
/// ```ignore
/// pub struct Seeder<S: RecordSink> { sink: S, /* ... */ }
///
/// let id = self.sink.create(&record).await?;
/// ```
#[async_trait::async_trait]
pub trait RecordSink: Send + Sync {
    /// Persist one record and return its identifier.
    ///
    /// When the record carries a value for its `id_field` that value is the
    /// identifier; otherwise the sink assigns one.
    async fn create(&self, record: &SeedRecord) -> Result<SeedValue>;

    /// Remove every record of `model`, returning how many were removed.
    async fn delete_all(&self, model: &str) -> Result<u64>;

    /// Records of `model` already present in the sink.
    ///
    /// Used by incremental runs to pick parents among existing data. Sinks
    /// that cannot read back return an empty list.
    async fn existing_records(&self, _model: &str) -> Result<Vec<SeedRecord>> {
        Ok(Vec::new())
    }

    /// Flush buffered writes.
    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait::async_trait]
impl<T: RecordSink + ?Sized> RecordSink for Arc<T> {
    async fn create(&self, record: &SeedRecord) -> Result<SeedValue> {
        (**self).create(record).await
    }

    async fn delete_all(&self, model: &str) -> Result<u64> {
        (**self).delete_all(model).await
    }

    async fn existing_records(&self, model: &str) -> Result<Vec<SeedRecord>> {
        (**self).existing_records(model).await
    }

    async fn flush(&self) -> Result<()> {
        (**self).flush().await
    }
}
