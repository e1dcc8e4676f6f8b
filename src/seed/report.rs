//! Per-model summary of a seeding run.

use std::fmt::Write;

use seed_core::SeedResult;

/// Whether every model succeeded.
pub fn all_succeeded(results: &[SeedResult]) -> bool {
    results.iter().all(|r| r.success)
}

/// Render results as a plain-text table, one row per model in seeding order.
pub fn format_summary(results: &[SeedResult]) -> String {
    if results.is_empty() {
        return "No models seeded\n".to_string();
    }

    let width = results
        .iter()
        .map(|r| r.model.len())
        .max()
        .unwrap_or(0)
        .max("MODEL".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:<width$}  {:>8}  {:<6}  ERROR", "MODEL", "RECORDS", "STATUS");
    for result in results {
        let status = if result.success { "ok" } else { "failed" };
        let _ = writeln!(
            out,
            "{:<width$}  {:>8}  {:<6}  {}",
            result.model,
            result.count,
            status,
            result.error.as_deref().unwrap_or("-")
        );
    }

    let total: u64 = results.iter().map(|r| r.count).sum();
    let failed = results.iter().filter(|r| !r.success).count();
    let _ = writeln!(
        out,
        "\n{} records across {} models ({} failed)",
        total,
        results.len(),
        failed
    );
    out
}
