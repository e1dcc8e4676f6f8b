//! Command-line interface for schema-seed
//!
//! # Usage Examples
//!
//! ## Seed
//! ```bash
//! # Seed every model, 10 records each, into ./seed-output
//! schema-seed seed --schema schema.prisma
//!
//! # Per-model counts and field overrides from a config file
//! schema-seed seed --schema schema.prisma --config seed.yaml --output-dir data
//!
//! # Add 50 posts to existing output, linking them to existing users
//! schema-seed seed --schema schema.prisma --models Post --count 50 --incremental
//!
//! # Validate schema and config without writing anything
//! schema-seed seed --schema schema.prisma --dry-run --verbose
//! ```
//!
//! ## Inspect
//! ```bash
//! schema-seed inspect --schema schema.prisma
//! schema-seed inspect --schema schema.prisma --json
//! ```
//!
//! Log verbosity follows `RUST_LOG`; `--verbose` switches the default from
//! `info` to `debug`.

use clap::{Parser, Subcommand};
use schema_seed::inspect::{format_models, inspect_schema};
use schema_seed::seed::{all_succeeded, format_summary, run_seed};
use schema_seed::{InspectArgs, SeedArgs};
use seed_runner::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-seed")]
#[command(about = "Seed a data store with fake records generated from a model schema")]
#[command(long_about = None)]
struct Cli {
    /// Enable debug logging when RUST_LOG is not set
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate records for every model (or a subset) in dependency order
    Seed(SeedArgs),

    /// List the models of a schema in seeding order
    Inspect(InspectArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Seed(args) => {
            let cancel = CancellationToken::new();
            setup_shutdown_handler(cancel.clone());

            let results = run_seed(&args, &cancel).await?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print!("{}", format_summary(&results));
            }

            if !all_succeeded(&results) {
                let failed = results.iter().filter(|r| !r.success).count();
                anyhow::bail!("{} of {} models failed", failed, results.len());
            }
        }
        Commands::Inspect(args) => {
            let summaries = inspect_schema(&args.schema)?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                print!("{}", format_models(&summaries));
            }
        }
    }

    Ok(())
}

/// Cancel `cancel` on Ctrl+C. Seeding stops before the next model.
fn setup_shutdown_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C signal handler: {}", e);
            return;
        }

        tracing::info!("Received interrupt signal (Ctrl+C), stopping after the current model");
        cancel.cancel();
    });
}
