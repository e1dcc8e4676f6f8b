//! Parser for the model-definition language.
//!
//! Converts schema text into normalized [`SchemaModel`] descriptors:
//!
//! ```text
//! schema text ──► Lexer ──► Parser ──► SchemaAst ──► lower ──► Vec<SchemaModel>
//! ```
//!
//! Parsing never fails on malformed input. Declarations that cannot be
//! understood are skipped and reported as [`ParseDiagnostic`]s; input without
//! any model block yields an empty list. Only an unreadable source file is an
//! error ([`SchemaError::Read`]).
//!
//! # Example
//!
//! ```
//! let models = schema_parser::parse_schema(
//!     "model User { id String @id, email String @unique, age Int }",
//! );
//! assert_eq!(models.len(), 1);
//! assert!(models[0].get_field("email").unwrap().is_unique);
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod lower;
pub mod parser;

use std::path::Path;

use seed_core::SchemaModel;
use tracing::{debug, warn};

pub use error::{ParseDiagnostic, SchemaError};
pub use lower::parse_default;
pub use parser::Parser;

/// Parse schema text into models, discarding diagnostics.
pub fn parse_schema(text: &str) -> Vec<SchemaModel> {
    parse_schema_with_diagnostics(text).0
}

/// Parse schema text into models along with the declarations that were
/// skipped.
pub fn parse_schema_with_diagnostics(text: &str) -> (Vec<SchemaModel>, Vec<ParseDiagnostic>) {
    let (ast, diagnostics) = Parser::new(text).parse();

    for diagnostic in &diagnostics {
        debug!("Skipped schema declaration at {}", diagnostic);
    }

    let models = lower::lower(&ast);
    debug!("Parsed {} models from schema", models.len());

    if models.is_empty() && !text.trim().is_empty() {
        warn!("Schema text is not empty but contains no model blocks");
    }

    (models, diagnostics)
}

/// Read and parse a schema file.
pub fn parse_schema_file<P: AsRef<Path>>(path: P) -> Result<Vec<SchemaModel>, SchemaError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_schema(&text))
}
