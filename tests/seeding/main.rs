//! End-to-end seeding tests: schema text in, records out.

use std::path::PathBuf;

mod cli_handlers;
mod jsonl_output;
mod properties;
mod scenarios;

/// Path of a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Schema text of a fixture.
pub fn fixture_text(name: &str) -> String {
    std::fs::read_to_string(fixture(name)).unwrap()
}
