//! Enum value generator.

use rand::Rng;
use seed_core::{FieldConfig, SeedValue};

use super::{pick_value, Hint, ValueGenerator};
use crate::error::ConfigError;

/// Uniform choice from `config.values`.
///
/// Without candidate values the result is [`SeedValue::Null`], the
/// "unresolvable" marker; the field is then left out of the record.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumGenerator;

impl ValueGenerator for EnumGenerator {
    fn generate<R: Rng>(
        &self,
        rng: &mut R,
        _hint: &Hint<'_>,
        config: &FieldConfig,
    ) -> Result<SeedValue, ConfigError> {
        Ok(pick_value(rng, config).unwrap_or(SeedValue::Null))
    }
}
