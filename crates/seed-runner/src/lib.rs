//! Dependency resolution and seeding orchestration.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ SchemaModel  │───►│  resolver    │───►│   Seeder     │───► RecordSink
//! │  (catalog)   │    │ (SeedOrder)  │    │ (per model)  │
//! └──────────────┘    └──────────────┘    └──────┬───────┘
//!                                                │
//!                                         seed-generator
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use seed_runner::{CancellationToken, Seeder};
//! use seed_sink::MemorySink;
//!
//! let models = schema_parser::parse_schema(&schema_text);
//! let mut seeder = Seeder::new(models, SeederConfig::default(), MemorySink::new());
//! let results = seeder.seed_all(&CancellationToken::new()).await;
//! ```

mod error;
mod pool;
pub mod resolver;
mod seeder;

// Re-exports for convenience
pub use error::RecordError;
pub use resolver::{resolve_order, DependencyGraph, SeedOrder};
pub use seeder::{Seeder, DEFAULT_COUNT, MAX_UNIQUE_ATTEMPTS};
pub use tokio_util::sync::CancellationToken;
