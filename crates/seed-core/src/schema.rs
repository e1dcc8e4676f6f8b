//! Normalized model descriptors produced by the schema parser.
//!
//! ## Type Hierarchy
//!
//! - `SchemaField` - One declared scalar attribute of a model
//! - `SchemaRelation` - A named edge from one model to another
//! - `SchemaModel` - A named entity type with its fields and relations
//! - `SchemaCatalog` - Name-indexed collection of models for one seeding run
//!
//! Descriptors are created once per parse pass and are treated as immutable
//! afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Field Types
// ============================================================================

/// Semantic type tag of a field.
///
/// Declared schema types are normalized into this small universe by
/// [`FieldType::normalize`]. Unrecognized lowercase types are kept verbatim
/// (lowercased) in [`FieldType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Date,
    Enum,
    Relation,
    Other(String),
}

impl FieldType {
    /// Normalize a declared type such as `String`, `Int?` or `Role[]`.
    ///
    /// | Declared | Semantic |
    /// |----------|----------|
    /// | `String`, `Text`, `DateTime`, `Date`, `Time`, `Json`, `Bytes`, `Blob`, `Uuid` | `string` |
    /// | `Int`, `BigInt`, `SmallInt`, `Integer`, `Float`, `Double`, `Decimal` | `number` |
    /// | `Boolean`, `Bool` | `boolean` |
    /// | `enum...` or any other capitalized identifier | `enum` |
    /// | anything else | lowercased declared type |
    pub fn normalize(declared: &str) -> Self {
        let clean = declared.trim().trim_end_matches('?').trim_end_matches("[]");

        match clean {
            "String" | "Text" | "DateTime" | "Date" | "Time" | "Json" | "Bytes" | "Blob"
            | "Uuid" => FieldType::String,
            "Int" | "BigInt" | "SmallInt" | "Integer" | "Float" | "Double" | "Decimal" => {
                FieldType::Number
            }
            "Boolean" | "Bool" => FieldType::Boolean,
            other
                if other.starts_with("enum")
                    || other.chars().next().is_some_and(|c| c.is_uppercase()) =>
            {
                FieldType::Enum
            }
            other => FieldType::Other(other.to_lowercase()),
        }
    }

    /// Parse a lowercase type tag as written in configuration files.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "string" => FieldType::String,
            "number" => FieldType::Number,
            "boolean" => FieldType::Boolean,
            "date" => FieldType::Date,
            "enum" => FieldType::Enum,
            "relation" => FieldType::Relation,
            other => FieldType::Other(other.to_string()),
        }
    }

    /// The lowercase tag for this type.
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Enum => "enum",
            FieldType::Relation => "relation",
            FieldType::Other(s) => s,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(FieldType::from_tag(&tag))
    }
}

/// Cardinality of a relation.
///
/// This is a syntactic heuristic derived from the modifiers on the relation
/// field only; it does not inspect the opposite side of the relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationType {
    OneToOne,
    OneToMany,
    ManyToMany,
}

impl RelationType {
    /// Optional scalar reference ⇒ one-to-one, list ⇒ many-to-many,
    /// otherwise one-to-many.
    pub fn from_modifiers(optional: bool, list: bool) -> Self {
        if list {
            RelationType::ManyToMany
        } else if optional {
            RelationType::OneToOne
        } else {
            RelationType::OneToMany
        }
    }
}

/// Default value declared on a field with `@default(...)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DefaultValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// `now()`, resolved to the moment the schema was parsed
    Now(DateTime<Utc>),
    /// Any other token, kept verbatim (e.g. `autoincrement()`)
    Raw(String),
}

impl DefaultValue {
    /// Whether the store assigns this value itself.
    pub fn is_autoincrement(&self) -> bool {
        matches!(self, DefaultValue::Raw(raw) if raw.starts_with("autoincrement"))
    }
}

// ============================================================================
// Descriptors
// ============================================================================

/// One declared attribute of a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    /// Field name, unique within its model
    pub name: String,

    /// Normalized semantic type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Declared type name without modifiers (e.g. `DateTime`, `Role`)
    pub declared_type: String,

    pub is_required: bool,
    pub is_unique: bool,
    pub is_primary_key: bool,
    pub is_foreign_key: bool,

    /// Declared with the list modifier (`String[]`)
    #[serde(default)]
    pub is_list: bool,

    /// Name of the referenced model, when resolvable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_model: Option<String>,

    /// Name of the referenced field on the target model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_field: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,

    /// Candidate literals for enum-typed fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl SchemaField {
    /// Create a required, non-unique field. The declared type is derived from
    /// the semantic type.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let declared_type = match &field_type {
            FieldType::String => "String".to_string(),
            FieldType::Number => "Int".to_string(),
            FieldType::Boolean => "Boolean".to_string(),
            FieldType::Date => "DateTime".to_string(),
            other => other.to_string(),
        };
        Self {
            name: name.into(),
            field_type,
            declared_type,
            is_required: true,
            is_unique: false,
            is_primary_key: false,
            is_foreign_key: false,
            is_list: false,
            relation_model: None,
            relation_field: None,
            default_value: None,
            enum_values: None,
        }
    }

    /// Create a field from a declared schema type, normalizing it.
    pub fn declared(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        let declared_type = declared_type.into();
        let mut field = Self::new(name, FieldType::normalize(&declared_type));
        field.declared_type = declared_type;
        field
    }

    pub fn optional(mut self) -> Self {
        self.is_required = false;
        self
    }

    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    /// Mark this field as a foreign key to `model.field`.
    pub fn references(mut self, model: impl Into<String>, field: impl Into<String>) -> Self {
        self.is_foreign_key = true;
        self.relation_model = Some(model.into());
        self.relation_field = Some(field.into());
        self
    }

    pub fn with_default(mut self, value: DefaultValue) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_enum_values(mut self, values: Vec<String>) -> Self {
        self.enum_values = Some(values);
        self
    }
}

/// A named edge between two models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaRelation {
    pub name: String,

    #[serde(rename = "type")]
    pub relation_type: RelationType,

    /// Target model name
    pub model: String,

    /// Source field name
    pub field: String,

    /// Source columns listed in `fields: [...]`, comma-joined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<String>,

    /// Target columns listed in `references: [...]`, comma-joined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
}

impl SchemaRelation {
    /// Iterate the individual source columns of `foreign_key`.
    pub fn foreign_key_columns(&self) -> impl Iterator<Item = &str> {
        self.foreign_key
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// A named entity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaModel {
    /// Model name, used as the lookup key everywhere
    pub name: String,

    /// Scalar fields in declaration order
    pub fields: Vec<SchemaField>,

    /// Relations in declaration order
    pub relations: Vec<SchemaRelation>,
}

impl SchemaModel {
    pub fn new(
        name: impl Into<String>,
        fields: Vec<SchemaField>,
        relations: Vec<SchemaRelation>,
    ) -> Self {
        Self {
            name: name.into(),
            fields,
            relations,
        }
    }

    /// Get a field by name.
    pub fn get_field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The first field marked as primary key, if any.
    pub fn primary_key(&self) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.is_primary_key)
    }

    /// Fields whose values identify a record: the primary key and every
    /// unique field.
    pub fn key_fields(&self) -> impl Iterator<Item = &SchemaField> {
        self.fields
            .iter()
            .filter(|f| f.is_primary_key || f.is_unique)
    }

    /// Fields marked as foreign keys.
    pub fn foreign_keys(&self) -> impl Iterator<Item = &SchemaField> {
        self.fields.iter().filter(|f| f.is_foreign_key)
    }

    /// Get all field names.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Name-indexed collection of models, held for the duration of a run.
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    models: Vec<SchemaModel>,
    model_map: HashMap<String, usize>,
}

impl SchemaCatalog {
    /// Build a catalog. When two models share a name the first wins.
    pub fn new(models: Vec<SchemaModel>) -> Self {
        let mut model_map = HashMap::with_capacity(models.len());
        for (idx, model) in models.iter().enumerate() {
            model_map.entry(model.name.clone()).or_insert(idx);
        }
        Self { models, model_map }
    }

    /// Get a model by name.
    pub fn get_model(&self, name: &str) -> Option<&SchemaModel> {
        self.model_map
            .get(name)
            .and_then(|&idx| self.models.get(idx))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.model_map.contains_key(name)
    }

    /// Models in declaration order.
    pub fn models(&self) -> &[SchemaModel] {
        &self.models
    }

    /// Get all model names in declaration order.
    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
