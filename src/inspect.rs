//! Inspect command handler.
//!
//! Lists the parsed models in seeding order, without touching any store.

use std::fmt::Write;
use std::path::Path;

use anyhow::Context;
use seed_core::SchemaModel;
use seed_runner::resolve_order;
use serde::Serialize;

/// One model as shown by `inspect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    pub name: String,
    pub fields: usize,
    pub relations: usize,
    /// `field -> Model.key`, or `field -> ?` when the target is unresolved
    pub foreign_keys: Vec<String>,
    /// Placed by the cycle fallback rather than by dependency order
    pub cyclic: bool,
}

/// Parse the schema at `path` and summarize its models in seeding order.
pub fn inspect_schema<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ModelSummary>> {
    let path = path.as_ref();
    let models = schema_parser::parse_schema_file(path)
        .with_context(|| format!("Failed to load schema from {path:?}"))?;
    Ok(summarize(&models))
}

/// Summaries of `models`, in seeding order.
pub fn summarize(models: &[SchemaModel]) -> Vec<ModelSummary> {
    let order = resolve_order(models);

    order
        .order
        .iter()
        .filter_map(|name| models.iter().find(|m| &m.name == name))
        .map(|model| ModelSummary {
            name: model.name.clone(),
            fields: model.fields.len(),
            relations: model.relations.len(),
            foreign_keys: model
                .foreign_keys()
                .map(|f| match &f.relation_model {
                    Some(target) => format!(
                        "{} -> {}.{}",
                        f.name,
                        target,
                        f.relation_field.as_deref().unwrap_or("id")
                    ),
                    None => format!("{} -> ?", f.name),
                })
                .collect(),
            cyclic: order.cyclic.contains(&model.name),
        })
        .collect()
}

/// Render summaries as a plain-text table.
pub fn format_models(summaries: &[ModelSummary]) -> String {
    if summaries.is_empty() {
        return "No models found\n".to_string();
    }

    let width = summaries
        .iter()
        .map(|s| s.name.len() + usize::from(s.cyclic))
        .max()
        .unwrap_or(0)
        .max("MODEL".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:<width$}  {:>6}  {:>9}  FOREIGN KEYS",
        "#", "MODEL", "FIELDS", "RELATIONS"
    );
    for (position, summary) in summaries.iter().enumerate() {
        let name = if summary.cyclic {
            format!("{}*", summary.name)
        } else {
            summary.name.clone()
        };
        let foreign_keys = if summary.foreign_keys.is_empty() {
            "-".to_string()
        } else {
            summary.foreign_keys.join(", ")
        };
        let _ = writeln!(
            out,
            "{:>3}  {:<width$}  {:>6}  {:>9}  {}",
            position + 1,
            name,
            summary.fields,
            summary.relations,
            foreign_keys
        );
    }

    if summaries.iter().any(|s| s.cyclic) {
        let _ = writeln!(
            out,
            "\n* cyclic foreign keys; seeded in declaration order"
        );
    }
    out
}
