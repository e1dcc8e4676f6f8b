//! Lowering from the syntax tree to normalized [`SchemaModel`]s.
//!
//! Besides the structural translation this pass resolves foreign-key
//! targets. A scalar field is a foreign key when it carries `@relation` or is
//! listed in the `fields: [...]` of a relation field. Its target model is
//! taken, in order, from:
//!
//! 1. the relation field listing it in `fields: [...]`
//! 2. its name (`authorId` / `author_id` to a model named `Author`)
//! 3. the only other model whose primary key is the referenced field
//!
//! Anything still unresolved is kept as a foreign key without a target.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use seed_core::{DefaultValue, RelationType, SchemaField, SchemaModel, SchemaRelation};
use tracing::{debug, warn};

use crate::ast::{Attribute, EnumDecl, Expr, FieldDecl, ModelDecl, SchemaAst};

/// Default-value generator calls whose result must be generated downstream.
const GENERATED_ID_CALLS: &[&str] = &["uuid", "cuid", "ulid", "nanoid"];

pub fn lower(ast: &SchemaAst) -> Vec<SchemaModel> {
    let model_names: HashSet<&str> = ast.models.iter().map(|m| m.name.as_str()).collect();
    let enums: HashMap<&str, &EnumDecl> = ast.enums.iter().map(|e| (e.name.as_str(), e)).collect();

    let mut models: Vec<SchemaModel> = ast
        .models
        .iter()
        .map(|decl| lower_model(decl, &model_names, &enums))
        .collect();

    apply_relation_columns(&mut models);
    resolve_foreign_keys(&mut models);

    models
}

// ============================================================================
// Structural translation
// ============================================================================

/// Columns named by a block attribute such as `@@id([a, b])`.
fn block_columns(attr: &Attribute) -> Vec<String> {
    attr.arg("fields", true)
        .map(Expr::ident_list)
        .unwrap_or_default()
}

fn lower_model(
    decl: &ModelDecl,
    model_names: &HashSet<&str>,
    enums: &HashMap<&str, &EnumDecl>,
) -> SchemaModel {
    let mut pk_columns: Vec<String> = Vec::new();
    let mut unique_columns: Vec<String> = Vec::new();

    for attr in &decl.attributes {
        match attr.name.as_str() {
            "id" => pk_columns.extend(block_columns(attr)),
            "unique" => {
                let columns = block_columns(attr);
                // Compound uniqueness says nothing about a single column
                if columns.len() == 1 {
                    unique_columns.extend(columns);
                }
            }
            _ => {}
        }
    }

    let mut fields = Vec::new();
    let mut relations = Vec::new();

    for field in &decl.fields {
        if model_names.contains(field.field_type.name.as_str()) {
            relations.push(lower_relation(field));
        } else {
            let mut lowered = lower_field(field, enums);
            if pk_columns.contains(&lowered.name) {
                lowered.is_primary_key = true;
            }
            if unique_columns.contains(&lowered.name) {
                lowered.is_unique = true;
            }
            fields.push(lowered);
        }
    }

    SchemaModel::new(decl.name.clone(), fields, relations)
}

fn join_columns(columns: &[String]) -> Option<String> {
    if columns.is_empty() {
        None
    } else {
        Some(columns.join(", "))
    }
}

fn lower_relation(field: &FieldDecl) -> SchemaRelation {
    let attr = field.attribute("relation");
    let fields = attr
        .and_then(|a| a.arg("fields", false))
        .map(Expr::ident_list)
        .unwrap_or_default();
    let references = attr
        .and_then(|a| a.arg("references", false))
        .map(Expr::ident_list)
        .unwrap_or_default();

    SchemaRelation {
        name: field.name.clone(),
        relation_type: RelationType::from_modifiers(
            field.field_type.optional,
            field.field_type.list,
        ),
        model: field.field_type.name.clone(),
        field: field.name.clone(),
        foreign_key: join_columns(&fields),
        references: join_columns(&references),
    }
}

fn lower_field(field: &FieldDecl, enums: &HashMap<&str, &EnumDecl>) -> SchemaField {
    let declared = &field.field_type;
    let mut lowered = SchemaField::declared(field.name.clone(), declared.name.clone());

    lowered.is_required = !declared.optional;
    lowered.is_list = declared.list;
    lowered.is_unique = field.has_attribute("unique");
    lowered.is_primary_key = field.has_attribute("id");

    if let Some(attr) = field.attribute("relation") {
        lowered.is_foreign_key = true;
        apply_references(&mut lowered, attr);
    }

    lowered.default_value = field
        .attribute("default")
        .and_then(Attribute::first)
        .and_then(parse_default);

    if let Some(decl) = enums.get(declared.name.as_str()) {
        lowered.enum_values = Some(decl.values.clone());
    }

    lowered
}

/// `@relation(fields: [a], references: [b])` written on the scalar itself.
fn apply_references(field: &mut SchemaField, attr: &Attribute) {
    let columns = attr
        .arg("fields", false)
        .map(Expr::ident_list)
        .unwrap_or_default();
    let references = attr
        .arg("references", false)
        .map(Expr::ident_list)
        .unwrap_or_default();

    let position = columns.iter().position(|c| *c == field.name).unwrap_or(0);
    let Some(reference) = references.get(position).or_else(|| references.first()) else {
        return;
    };

    // `references: [User.id]` names the target model directly
    match reference.split_once('.') {
        Some((model, column)) => {
            field.relation_model = Some(model.to_string());
            field.relation_field = Some(column.to_string());
        }
        None => field.relation_field = Some(reference.clone()),
    }
}

/// Interpret the literal inside `@default(...)`.
///
/// Generated-id calls (`uuid()`, `cuid()`, ...) yield `None`: those values
/// must be generated, never copied.
pub fn parse_default(expr: &Expr) -> Option<DefaultValue> {
    match expr {
        Expr::Str(s) => Some(DefaultValue::String(s.clone())),
        Expr::Num(n) => {
            if let Ok(i) = n.parse::<i64>() {
                Some(DefaultValue::Int(i))
            } else if let Ok(f) = n.parse::<f64>() {
                Some(DefaultValue::Float(f))
            } else {
                Some(DefaultValue::Raw(n.clone()))
            }
        }
        Expr::Ident(name) if name == "true" => Some(DefaultValue::Bool(true)),
        Expr::Ident(name) if name == "false" => Some(DefaultValue::Bool(false)),
        Expr::Call { name, .. } if name == "now" => Some(DefaultValue::Now(Utc::now())),
        Expr::Call { name, .. } if GENERATED_ID_CALLS.contains(&name.as_str()) => None,
        other => Some(DefaultValue::Raw(other.to_literal())),
    }
}

// ============================================================================
// Foreign-key resolution
// ============================================================================

/// Mark the columns listed in each relation's `fields: [...]` as foreign keys
/// to the relation's target model.
fn apply_relation_columns(models: &mut [SchemaModel]) {
    for model in models.iter_mut() {
        let relations = model.relations.clone();

        for relation in &relations {
            let references: Vec<&str> = relation
                .references
                .as_deref()
                .map(|r| r.split(',').map(str::trim).collect())
                .unwrap_or_default();

            for (position, column) in relation.foreign_key_columns().enumerate() {
                let Some(field) = model.fields.iter_mut().find(|f| f.name == column) else {
                    debug!(
                        "Relation {}.{} lists unknown column '{}'",
                        model.name, relation.name, column
                    );
                    continue;
                };

                field.is_foreign_key = true;
                field.relation_model = Some(relation.model.clone());
                if let Some(reference) = references.get(position).or_else(|| references.first())
                {
                    field.relation_field = Some((*reference).to_string());
                }
            }
        }
    }
}

/// Candidate model name for a field such as `authorId` or `author_id`.
fn name_stem(field: &str) -> Option<&str> {
    ["_id", "Id", "ID"]
        .iter()
        .find_map(|suffix| field.strip_suffix(suffix))
        .filter(|stem| !stem.is_empty())
}

fn resolve_foreign_keys(models: &mut [SchemaModel]) {
    let primary_keys: Vec<(String, Option<String>)> = models
        .iter()
        .map(|m| (m.name.clone(), m.primary_key().map(|f| f.name.clone())))
        .collect();

    for model in models.iter_mut() {
        let owner = model.name.clone();

        for field in model.fields.iter_mut() {
            if !field.is_foreign_key || field.relation_model.is_some() {
                continue;
            }

            let by_name = name_stem(&field.name).and_then(|stem| {
                let stem = stem.replace('_', "");
                primary_keys
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(&stem))
                    .map(|(name, _)| name.clone())
            });

            let target = by_name.or_else(|| {
                let referenced = field.relation_field.as_deref().unwrap_or("id");
                let mut candidates = primary_keys
                    .iter()
                    .filter(|(name, pk)| *name != owner && pk.as_deref() == Some(referenced));
                match (candidates.next(), candidates.next()) {
                    (Some((name, _)), None) => Some(name.clone()),
                    _ => None,
                }
            });

            match target {
                Some(target) => {
                    debug!("Resolved {}.{} -> {}", owner, field.name, target);
                    field.relation_model = Some(target);
                }
                None => warn!(
                    "Could not resolve target model of foreign key {}.{}",
                    owner, field.name
                ),
            }
        }
    }
}
