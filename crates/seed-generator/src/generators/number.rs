//! Numeric value generator.

use chrono::{Datelike, Utc};
use rand::Rng;
use seed_core::{FieldConfig, SeedValue};

use super::{Hint, ValueGenerator};
use crate::error::ConfigError;

/// Representation of the generated number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    /// `Int`, `BigInt`
    Integer,
    /// `Float`, `Double`
    Float,
    /// `Decimal`, rounded to 2 places
    Decimal,
}

/// Ranges inferred from the field name when no bounds are configured.
#[derive(Debug, Clone, Copy, PartialEq)]
struct HintRange {
    min: f64,
    max: f64,
    /// Currency-like: floats are rounded to cents
    money: bool,
}

impl HintRange {
    const fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            money: false,
        }
    }

    fn for_hint(hint: &Hint<'_>) -> Self {
        if hint.has_word(&["age"]) {
            Self::new(18.0, 100.0)
        } else if hint.has_word(&[
            "price", "cost", "amount", "salary", "total", "fee", "balance", "subtotal",
        ]) {
            Self {
                money: true,
                ..Self::new(1.0, 1000.0)
            }
        } else if hint.has_word(&["rating", "stars"]) {
            Self::new(1.0, 5.0)
        } else if hint.has_word(&["score", "percent", "percentage", "progress"]) {
            Self::new(0.0, 100.0)
        } else if hint.has_word(&["quantity", "qty", "stock", "count", "inventory"]) {
            Self::new(0.0, 1000.0)
        } else if hint.has_word(&["year"]) {
            Self::new(1950.0, f64::from(Utc::now().year()))
        } else if hint.has_word(&["lat", "latitude"]) {
            Self::new(-90.0, 90.0)
        } else if hint.has_word(&["lng", "lon", "long", "longitude"]) {
            Self::new(-180.0, 180.0)
        } else if hint.has_word(&["views", "likes", "followers", "clicks", "visits"]) {
            Self::new(0.0, 100_000.0)
        } else {
            Self::new(1.0, 10_000.0)
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Number generator.
///
/// Configured `min`/`max` are inclusive. A missing bound is completed from
/// the range inferred from the field name, so `min: 500` on a field called
/// `price` still produces values in `500..=1000`.
#[derive(Debug, Clone, Copy)]
pub struct NumberGenerator {
    pub kind: NumberKind,
}

impl NumberGenerator {
    pub fn new(kind: NumberKind) -> Self {
        Self { kind }
    }

    pub fn integer() -> Self {
        Self::new(NumberKind::Integer)
    }

    /// Resolve the inclusive bounds for a field.
    fn bounds(
        &self,
        hint: &Hint<'_>,
        config: &FieldConfig,
    ) -> Result<(f64, f64, bool), ConfigError> {
        let inferred = HintRange::for_hint(hint);
        let width = inferred.max - inferred.min;

        let (min, max) = match (config.min, config.max) {
            (Some(min), Some(max)) => (min, max),
            (Some(min), None) if min <= inferred.max => (min, inferred.max),
            (Some(min), None) => (min, min + width),
            (None, Some(max)) if max >= inferred.min => (inferred.min, max),
            (None, Some(max)) => (max - width, max),
            (None, None) => (inferred.min, inferred.max),
        };

        if min > max || min.is_nan() || max.is_nan() {
            return Err(ConfigError::InvalidRange {
                field: hint.field.to_string(),
                min,
                max,
            });
        }

        if !min.is_finite() || !max.is_finite() || !(max - min).is_finite() {
            return Err(ConfigError::NonFiniteRange {
                field: hint.field.to_string(),
                min,
                max,
            });
        }

        Ok((min, max, inferred.money))
    }
}

/// Whether a configured value respects the explicit `min`/`max`.
/// Non-numeric values only pass when no bound is configured.
fn within_configured_bounds(value: &serde_json::Value, config: &FieldConfig) -> bool {
    match value.as_f64() {
        Some(n) => {
            let above_min = !matches!(config.min, Some(min) if n < min);
            let below_max = !matches!(config.max, Some(max) if n > max);
            above_min && below_max
        }
        None => config.min.is_none() && config.max.is_none(),
    }
}

/// Pick one of the configured `values` that lies within the configured bounds.
fn pick_in_range<R: Rng>(
    rng: &mut R,
    hint: &Hint<'_>,
    config: &FieldConfig,
    (min, max): (f64, f64),
) -> Result<Option<SeedValue>, ConfigError> {
    let Some(values) = config.values.as_ref().filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    let allowed: Vec<&serde_json::Value> = values
        .iter()
        .filter(|v| within_configured_bounds(v, config))
        .collect();
    if allowed.is_empty() {
        return Err(ConfigError::NoValueInRange {
            field: hint.field.to_string(),
            min,
            max,
        });
    }

    let choice = allowed[rng.random_range(0..allowed.len())];
    Ok(Some(SeedValue::from_json(choice)))
}

impl Default for NumberGenerator {
    fn default() -> Self {
        Self::integer()
    }
}

impl ValueGenerator for NumberGenerator {
    fn generate<R: Rng>(
        &self,
        rng: &mut R,
        hint: &Hint<'_>,
        config: &FieldConfig,
    ) -> Result<SeedValue, ConfigError> {
        let (min, max, money) = self.bounds(hint, config)?;

        if let Some(value) = pick_in_range(rng, hint, config, (min, max))? {
            return Ok(value);
        }

        match self.kind {
            NumberKind::Integer => {
                let lo = min.ceil();
                let hi = max.floor();
                if lo > hi {
                    return Err(ConfigError::EmptyIntegerRange {
                        field: hint.field.to_string(),
                        min,
                        max,
                    });
                }
                Ok(SeedValue::Int(rng.random_range(lo as i64..=hi as i64)))
            }
            NumberKind::Float | NumberKind::Decimal => {
                let value = rng.random_range(min..=max);
                let round = self.kind == NumberKind::Decimal || money;
                let rounded = round2(value);
                // Rounding must not leave the configured range
                if round && (min..=max).contains(&rounded) {
                    Ok(SeedValue::Float(rounded))
                } else {
                    Ok(SeedValue::Float(value))
                }
            }
        }
    }
}
