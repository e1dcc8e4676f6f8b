//! Boolean value generator.

use rand::Rng;
use seed_core::{FieldConfig, SeedValue};

use super::{Hint, ValueGenerator};
use crate::error::ConfigError;

/// Fair coin.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanGenerator;

impl ValueGenerator for BooleanGenerator {
    fn generate<R: Rng>(
        &self,
        rng: &mut R,
        _hint: &Hint<'_>,
        _config: &FieldConfig,
    ) -> Result<SeedValue, ConfigError> {
        Ok(SeedValue::Bool(rng.random_bool(0.5)))
    }
}
