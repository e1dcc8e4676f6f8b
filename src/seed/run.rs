//! Seed command runner.

use anyhow::Context;
use seed_core::{SchemaModel, SeedResult, SeederConfig};
use seed_runner::{CancellationToken, Seeder};
use seed_sink::{JsonlSink, MemorySink, RecordSink};

use crate::SeedArgs;

/// Run the seed command: parse the schema, then seed every selected model in
/// dependency order.
///
/// Only an unreadable schema or configuration is an error. Per-model
/// failures are reported in the returned results.
pub async fn run_seed(
    args: &SeedArgs,
    cancel: &CancellationToken,
) -> anyhow::Result<Vec<SeedResult>> {
    let models = schema_parser::parse_schema_file(&args.schema)
        .with_context(|| format!("Failed to load schema from {:?}", args.schema))?;

    if models.is_empty() {
        tracing::warn!("No models found in {:?}; nothing to seed", args.schema);
        return Ok(Vec::new());
    }

    let config = args.load_config()?;

    tracing::info!(
        "Seeding {} models (seed={}, reset={}, incremental={}, randomize={})",
        models.len(),
        config.global.seed(),
        config.global.reset(),
        config.global.incremental(),
        config.global.randomize()
    );

    if args.dry_run {
        tracing::info!("[DRY-RUN] Records are generated in memory only");
        return Ok(seed_into(models, config, MemorySink::new(), args, cancel).await);
    }

    let sink = JsonlSink::new(&args.output_dir)
        .with_context(|| format!("Failed to open output directory {:?}", args.output_dir))?;
    Ok(seed_into(models, config, sink, args, cancel).await)
}

async fn seed_into<S: RecordSink>(
    models: Vec<SchemaModel>,
    config: SeederConfig,
    sink: S,
    args: &SeedArgs,
    cancel: &CancellationToken,
) -> Vec<SeedResult> {
    let mut seeder = Seeder::new(models, config, sink).with_default_count(args.count);

    if args.models.is_empty() {
        seeder.seed_all(cancel).await
    } else {
        seeder.seed_selected(&args.models, cancel).await
    }
}
