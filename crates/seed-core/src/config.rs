//! User-supplied generation overrides.
//!
//! A `SeederConfig` is a read-only input to a seeding run. It is usually
//! loaded from a file:
//!
//! ```json
//! {
//!   "models": {
//!     "User": {
//!       "count": 50,
//!       "fields": { "email": { "generator": "internet.email" } }
//!     }
//!   },
//!   "global": { "reset": true }
//! }
//! ```
//!
//! The same shape is accepted as YAML (`.yaml`/`.yml`) or TOML (`.toml`).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Seed used for reproducible runs when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Error type for configuration file loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// Error reading config file
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing JSON
    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Error parsing TOML
    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// File extension not recognized
    #[error("Unsupported config format: {0} (expected .json, .yaml, .yml or .toml)")]
    UnsupportedFormat(String),
}

/// Generator type a field can be forced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Number,
    Date,
    Boolean,
    Enum,
    Relation,
}

/// Per-field override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    /// Force a generator type
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FieldKind>,

    /// Named sub-generator, e.g. `internet.email`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,

    /// Inclusive lower bound for numbers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Inclusive upper bound for numbers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// String pattern with `{index}`, `{uuid}` and `{rand:N}` placeholders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Explicit candidate values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<serde_json::Value>>,

    /// Skip the field entirely
    #[serde(default)]
    pub ignore: bool,

    /// Literal value written for every record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
}

impl FieldConfig {
    pub fn with_range(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..Default::default()
        }
    }

    pub fn with_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<serde_json::Value>,
    {
        Self {
            values: Some(values.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    pub fn with_generator(name: impl Into<String>) -> Self {
        Self {
            generator: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
            ..Default::default()
        }
    }

    /// Whether the override says what to write: `values`, `defaultValue`,
    /// `generator` or `pattern`.
    pub fn supplies_values(&self) -> bool {
        self.values.as_ref().is_some_and(|v| !v.is_empty())
            || self.default_value.is_some()
            || self.generator.is_some()
            || self.pattern.is_some()
    }
}

/// Per-relation override, keyed by the foreign key field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,

    /// Parent model the foreign key points at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cascade: Option<bool>,
}

/// Per-model override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    /// Number of records to create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,

    #[serde(default)]
    pub fields: HashMap<String, FieldConfig>,

    #[serde(default)]
    pub relations: HashMap<String, RelationConfig>,
}

impl ModelConfig {
    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.get(name)
    }

    pub fn relation(&self, name: &str) -> Option<&RelationConfig> {
        self.relations.get(name)
    }
}

/// Run-wide flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalConfig {
    /// Clear existing data before seeding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset: Option<bool>,

    /// Add to existing data rather than replacing it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incremental: Option<bool>,

    /// Use a non-deterministic random source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub randomize: Option<bool>,

    /// Seed for deterministic runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl GlobalConfig {
    pub fn reset(&self) -> bool {
        self.reset.unwrap_or(false)
    }

    pub fn incremental(&self) -> bool {
        self.incremental.unwrap_or(false)
    }

    pub fn randomize(&self) -> bool {
        self.randomize.unwrap_or(false)
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }
}

/// Full seeding configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeederConfig {
    #[serde(default)]
    pub models: HashMap<String, ModelConfig>,

    #[serde(default)]
    pub global: GlobalConfig,
}

impl SeederConfig {
    /// Load configuration from a file, choosing the format by extension.
    ///
    /// A missing file yields an empty configuration.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigFileError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(
                "Config file {} not found, using empty configuration",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let config = match extension.as_str() {
            "json" => Self::from_json(&content)?,
            "yaml" | "yml" => Self::from_yaml(&content)?,
            "toml" => Self::from_toml(&content)?,
            other => return Err(ConfigFileError::UnsupportedFormat(other.to_string())),
        };

        tracing::debug!(
            "Loaded config from {} ({} model overrides)",
            path.display(),
            config.models.len()
        );
        Ok(config)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigFileError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigFileError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigFileError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Fill unset global flags with their defaults.
    pub fn with_defaults(mut self) -> Self {
        self.global.reset.get_or_insert(false);
        self.global.incremental.get_or_insert(false);
        self.global.randomize.get_or_insert(false);
        self.global.seed.get_or_insert(DEFAULT_SEED);
        self
    }

    /// Get the configuration for a model, if any.
    pub fn model_config(&self, name: &str) -> Option<&ModelConfig> {
        self.models.get(name)
    }

    /// Record count for a model, falling back to `default`.
    pub fn model_count(&self, name: &str, default: u64) -> u64 {
        self.model_config(name)
            .and_then(|m| m.count)
            .unwrap_or(default)
    }
}
