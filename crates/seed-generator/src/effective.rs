//! Effective field configuration.
//!
//! Schema-derived defaults and user overrides are merged by one pure
//! function, [`effective_field_config`], into the [`EffectiveField`] that
//! drives generation. Precedence, per property:
//!
//! | Property | Override (`FieldConfig`) | Schema (`SchemaField`) |
//! |----------|--------------------------|------------------------|
//! | generator kind | `type`; else `generator`/`pattern` imply string | declared type |
//! | candidate values | `values` | `enumValues` |
//! | `generator`, `pattern`, `min`, `max` | used as given | none |
//! | literal value | `defaultValue` | none (`@default` is left to the store) |
//! | list | none | `isList` |
//! | skipped | `ignore` | `@default(autoincrement())` |
//!
//! An override always wins over the schema.

use seed_core::{FieldConfig, FieldKind, FieldType, SchemaField};

use crate::error::ConfigError;
use crate::generators::{NamedGenerator, NumberKind};

/// Which generator produces a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    String,
    Number(NumberKind),
    Date,
    Boolean,
    Enum,
    /// Filled from parent records by the orchestrator, never generated
    Relation,
}

impl GeneratorKind {
    /// Generator implied by the schema alone.
    ///
    /// The declared type refines the semantic type: `DateTime` is a string
    /// semantically but dates are generated for it, and `Float`/`Decimal`
    /// numbers are not integers.
    pub fn for_field(field: &SchemaField) -> Self {
        match field.declared_type.as_str() {
            "DateTime" | "Date" | "Time" | "Timestamp" => return GeneratorKind::Date,
            "Float" | "Double" => return GeneratorKind::Number(NumberKind::Float),
            "Decimal" => return GeneratorKind::Number(NumberKind::Decimal),
            _ => {}
        }

        match &field.field_type {
            FieldType::Number => GeneratorKind::Number(NumberKind::Integer),
            FieldType::Boolean => GeneratorKind::Boolean,
            FieldType::Date => GeneratorKind::Date,
            FieldType::Enum => GeneratorKind::Enum,
            FieldType::Relation => GeneratorKind::Relation,
            FieldType::String | FieldType::Other(_) => GeneratorKind::String,
        }
    }

    /// Generator forced by a `type` override.
    pub fn from_override(kind: FieldKind, field: &SchemaField) -> Self {
        match kind {
            FieldKind::String => GeneratorKind::String,
            FieldKind::Number => match Self::for_field(field) {
                number @ GeneratorKind::Number(_) => number,
                _ => GeneratorKind::Number(NumberKind::Integer),
            },
            FieldKind::Date => GeneratorKind::Date,
            FieldKind::Boolean => GeneratorKind::Boolean,
            FieldKind::Enum => GeneratorKind::Enum,
            FieldKind::Relation => GeneratorKind::Relation,
        }
    }
}

/// A field ready for generation.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveField {
    pub name: String,
    pub kind: GeneratorKind,
    /// Merged configuration handed to the generator
    pub config: FieldConfig,
    /// Generate an array of values
    pub list: bool,
}

/// Merge schema defaults with an optional override.
///
/// Returns `Ok(None)` when the field must not be generated: it is ignored
/// by configuration or its value is assigned by the store.
pub fn effective_field_config(
    field: &SchemaField,
    overrides: Option<&FieldConfig>,
) -> Result<Option<EffectiveField>, ConfigError> {
    let overrides = overrides.cloned().unwrap_or_default();

    if overrides.ignore {
        return Ok(None);
    }

    let store_assigned = field
        .default_value
        .as_ref()
        .is_some_and(|d| d.is_autoincrement());
    if store_assigned && overrides.default_value.is_none() {
        return Ok(None);
    }

    let kind = match overrides.kind {
        Some(kind) => GeneratorKind::from_override(kind, field),
        None if overrides.generator.is_some() || overrides.pattern.is_some() => {
            GeneratorKind::String
        }
        None => GeneratorKind::for_field(field),
    };

    if let (Some(min), Some(max)) = (overrides.min, overrides.max) {
        if min > max {
            return Err(ConfigError::InvalidRange {
                field: field.name.clone(),
                min,
                max,
            });
        }
    }

    if let Some(name) = &overrides.generator {
        if kind == GeneratorKind::String && NamedGenerator::from_name(name).is_none() {
            return Err(ConfigError::UnknownGenerator {
                field: field.name.clone(),
                generator: name.clone(),
            });
        }
    }

    let mut config = overrides;
    config.kind = None;
    config.ignore = false;
    if config.values.is_none() {
        config.values = field
            .enum_values
            .as_ref()
            .map(|values| values.iter().cloned().map(serde_json::Value::from).collect());
    }

    Ok(Some(EffectiveField {
        name: field.name.clone(),
        kind,
        config,
        list: field.is_list,
    }))
}
