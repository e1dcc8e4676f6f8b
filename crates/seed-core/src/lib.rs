//! Core types for the schema-seed framework.
//!
//! This crate provides the foundational types shared by the parser,
//! the generators, the record sinks and the seeding orchestrator:
//!
//! - [`SchemaModel`] / [`SchemaField`] / [`SchemaRelation`] - Normalized model descriptors
//! - [`SchemaCatalog`] - Name-indexed lookup over parsed models
//! - [`SeedValue`] / [`SeedRecord`] - Generated values and records
//! - [`SeederConfig`] - User-supplied overrides, loaded from JSON, YAML or TOML
//! - [`SeedResult`] - Per-model outcome of a seeding run
//!
//! # Architecture
//!
//! ```text
//! seed-core (this crate)
//!    │
//!    ├─── schema-parser   (produces SchemaModel from schema text)
//!    ├─── seed-generator  (produces SeedValue per SchemaField)
//!    ├─── seed-sink       (persists SeedRecord)
//!    └─── seed-runner     (orders models, assembles records, reports SeedResult)
//! ```
//!
//! # Example
//!
//! ```rust
//! use seed_core::{SeedRecord, SeedValue};
//!
//! let record = SeedRecord::builder("User", 0)
//!     .id_field("id")
//!     .field("id", SeedValue::String("u-1".to_string()))
//!     .field("age", SeedValue::Int(42))
//!     .build();
//!
//! assert_eq!(record.id(), Some(&SeedValue::String("u-1".to_string())));
//! ```

pub mod config;
pub mod result;
pub mod schema;
pub mod values;

// Re-exports for convenience
pub use config::{
    ConfigFileError, FieldConfig, FieldKind, GlobalConfig, ModelConfig, RelationConfig,
    SeederConfig, DEFAULT_SEED,
};
pub use result::SeedResult;
pub use schema::{
    DefaultValue, FieldType, RelationType, SchemaCatalog, SchemaField, SchemaModel,
    SchemaRelation,
};
pub use values::{SeedRecord, SeedRecordBuilder, SeedValue};
