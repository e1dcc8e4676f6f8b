//! schema-seed library
//!
//! Seeds a data store with plausible fake records generated from a model
//! schema.
//!
//! # Features
//!
//! - Schema parsing: `model Name { ... }` blocks, enums and relations
//! - Dependency ordering: parents are seeded before the models pointing at them
//! - Configurable generation: per-field generators, ranges, patterns and values
//! - Pluggable sinks: JSONL files per model, or memory for dry runs
//!
//! # Workspace Crates
//!
//! - `seed_core` - shared model descriptors, values, configuration and results
//! - `schema_parser` - schema text to `SchemaModel`s
//! - `seed_generator` - value generators and the effective-configuration merge
//! - `seed_sink` - the `RecordSink` trait with memory and JSONL implementations
//! - `seed_runner` - dependency resolver and seeding orchestrator
//!
//! # CLI Usage
//!
//! ```bash
//! # Seed every model into ./seed-output/<Model>.jsonl
//! schema-seed seed --schema schema.prisma --config seed.yaml
//!
//! # Replace existing output, two specific models only
//! schema-seed seed --schema schema.prisma --models User,Post --reset
//!
//! # Show models in seeding order
//! schema-seed inspect --schema schema.prisma
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use seed_core::SeederConfig;

pub mod inspect;
pub mod seed;

#[derive(Parser, Clone, Debug)]
pub struct SeedArgs {
    /// Path to the schema file
    #[arg(long, short = 's', env = "SCHEMA_SEED_SCHEMA")]
    pub schema: PathBuf,

    /// Configuration file (.json, .yaml, .yml or .toml)
    #[arg(long, short = 'c', env = "SCHEMA_SEED_CONFIG")]
    pub config: Option<PathBuf>,

    /// Records per model when the configuration sets no count
    #[arg(long, default_value = "10")]
    pub count: u64,

    /// Models to seed (comma-separated, empty = all models)
    #[arg(long, value_delimiter = ',')]
    pub models: Vec<String>,

    /// Random seed for deterministic generation (same seed = same data)
    #[arg(long, env = "SCHEMA_SEED_SEED")]
    pub seed: Option<u64>,

    /// Directory receiving one JSONL file per model
    #[arg(long, default_value = "seed-output", env = "SCHEMA_SEED_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Delete existing records before seeding
    #[arg(long)]
    pub reset: bool,

    /// Add to existing records, using them as relation parents
    #[arg(long)]
    pub incremental: bool,

    /// Use a non-deterministic random source
    #[arg(long)]
    pub randomize: bool,

    /// Dry-run mode: generate into memory without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Print results as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl SeedArgs {
    /// Load the configuration file, if any, and apply the command-line
    /// flags on top of it.
    pub fn load_config(&self) -> anyhow::Result<SeederConfig> {
        let mut config = match &self.config {
            Some(path) => SeederConfig::load(path)
                .with_context(|| format!("Failed to load config from {path:?}"))?,
            None => SeederConfig::default(),
        };

        if self.reset {
            config.global.reset = Some(true);
        }
        if self.incremental {
            config.global.incremental = Some(true);
        }
        if self.randomize {
            config.global.randomize = Some(true);
        }
        if let Some(seed) = self.seed {
            config.global.seed = Some(seed);
        }

        Ok(config.with_defaults())
    }
}

#[derive(Parser, Clone, Debug)]
pub struct InspectArgs {
    /// Path to the schema file
    #[arg(long, short = 's', env = "SCHEMA_SEED_SCHEMA")]
    pub schema: PathBuf,

    /// Print the models as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}
