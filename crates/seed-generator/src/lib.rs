//! Value generators for the schema-seed data seeding framework.
//!
//! This crate turns a schema field plus optional user overrides into
//! plausible values. Generation is driven by an RNG supplied by the caller;
//! a seeded `StdRng` reproduces the same values across runs.
//!
//! # Architecture
//!
//! ```text
//! SchemaField + FieldConfig override
//!        │
//!        ▼  effective_field_config (pure merge)
//! ┌──────────────────┐
//! │  EffectiveField  │
//! │  - kind          │
//! │  - config        │
//! │  - list          │
//! └────────┬─────────┘
//!          │  generate_field
//!          ▼
//!   String / Number / Date / Boolean / Enum generator
//!          │
//!          ▼
//!      SeedValue
//! ```
//!
//! # Example
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use seed_core::{FieldConfig, SchemaField};
//! use seed_generator::{effective_field_config, generate_field};
//!
//! let field = SchemaField::declared("age", "Int");
//! let config = FieldConfig::with_range(18.0, 30.0);
//! let effective = effective_field_config(&field, Some(&config)).unwrap().unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let age = generate_field(&effective, &mut rng, 0).unwrap();
//! assert!((18..=30).contains(&age.as_i64().unwrap()));
//! ```
//!
//! # Named generators
//!
//! String fields accept `generator: "<name>"` with one of `internet.email`,
//! `internet.url`, `internet.userName`, `image.url`, `person.firstName`,
//! `person.lastName`, `person.fullName`, `location.streetAddress`,
//! `location.city`, `location.country`, `location.zipCode`, `phone.number`,
//! `company.name`, `lorem.word`, `lorem.slug`, `lorem.sentence`,
//! `lorem.paragraph`, `string.uuid`, `string.alphanumeric`, `color.hex` and
//! `finance.currencyCode`.

pub mod effective;
pub mod error;
pub mod generator;
pub mod generators;

// Re-exports for convenience
pub use effective::{effective_field_config, EffectiveField, GeneratorKind};
pub use error::ConfigError;
pub use generator::{generate_field, MAX_LIST_LEN};
pub use generators::{
    BooleanGenerator, DateGenerator, EnumGenerator, Hint, NamedGenerator, NumberGenerator,
    NumberKind, StringGenerator, ValueGenerator,
};
