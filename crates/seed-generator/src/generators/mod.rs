//! Type-specific value generators.
//!
//! Every generator implements [`ValueGenerator`]: given the RNG, a [`Hint`]
//! (field name and record index) and the field's effective configuration it
//! produces one [`SeedValue`]. Generators specialize their output by matching
//! the field name against known vocabularies, e.g. a string field called
//! `email` yields an e-mail address and a number field called `age` a
//! plausible human age.

pub mod boolean;
pub mod date;
pub mod enumeration;
pub mod number;
pub mod pattern;
pub mod string;
pub mod uuid;
pub mod vocabulary;

use rand::Rng;
use seed_core::{FieldConfig, SeedValue};

use crate::error::ConfigError;

pub use boolean::BooleanGenerator;
pub use date::DateGenerator;
pub use enumeration::EnumGenerator;
pub use number::{NumberGenerator, NumberKind};
pub use string::{NamedGenerator, StringGenerator};

/// What a generator knows about the value it is producing.
#[derive(Debug, Clone, Copy)]
pub struct Hint<'a> {
    /// Field name, matched against vocabularies
    pub field: &'a str,
    /// Index of the record within its model
    pub index: u64,
}

impl<'a> Hint<'a> {
    pub fn new(field: &'a str, index: u64) -> Self {
        Self { field, index }
    }

    /// Lowercased words of the field name: `birthDate` and `birth_date`
    /// both give `["birth", "date"]`.
    pub fn words(&self) -> Vec<String> {
        let mut words = Vec::new();
        let mut current = String::new();
        let mut prev_lower = false;

        for c in self.field.chars() {
            if c == '_' || c == '-' || c == ' ' {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                prev_lower = false;
                continue;
            }
            if c.is_uppercase() && prev_lower && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
            current.extend(c.to_lowercase());
        }
        if !current.is_empty() {
            words.push(current);
        }

        words
    }

    /// Whether any word of the field name is one of `keys`.
    pub fn has_word(&self, keys: &[&str]) -> bool {
        self.words().iter().any(|w| keys.contains(&w.as_str()))
    }

    /// Field name lowercased with separators removed (`first_name` →
    /// `firstname`), for substring matching.
    pub fn compact(&self) -> String {
        self.field
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect()
    }
}

/// Trait for generating values.
pub trait ValueGenerator {
    /// Generate a value for the hinted field.
    fn generate<R: Rng>(
        &self,
        rng: &mut R,
        hint: &Hint<'_>,
        config: &FieldConfig,
    ) -> Result<SeedValue, ConfigError>;
}

/// Pick one of the configured `values`, if any.
pub(crate) fn pick_value<R: Rng>(rng: &mut R, config: &FieldConfig) -> Option<SeedValue> {
    let values = config.values.as_ref().filter(|v| !v.is_empty())?;
    let choice = &values[rng.random_range(0..values.len())];
    Some(SeedValue::from_json(choice))
}
