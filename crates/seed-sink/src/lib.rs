//! Record sink abstraction.
//!
//! This crate defines the `RecordSink` trait, the persistence boundary the
//! seeding orchestrator writes generated records to, together with two
//! implementations:
//!
//! - [`MemorySink`]: in-memory tables, used by tests and dry runs
//! - [`JsonlSink`]: one `<Model>.jsonl` file per model in an output directory

mod error;
mod jsonl;
mod memory;
mod traits;

pub use error::SinkError;
pub use jsonl::JsonlSink;
pub use memory::MemorySink;
pub use traits::RecordSink;
