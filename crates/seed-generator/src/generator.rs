//! Field-level dispatch to the value generators.

use rand::Rng;
use seed_core::SeedValue;

use crate::effective::{EffectiveField, GeneratorKind};
use crate::error::ConfigError;
use crate::generators::{
    BooleanGenerator, DateGenerator, EnumGenerator, Hint, NumberGenerator, StringGenerator,
    ValueGenerator,
};

/// Maximum number of elements generated for a list field.
pub const MAX_LIST_LEN: usize = 3;

/// Generate the value of one field for the record at `index`.
///
/// A configured `defaultValue` is returned verbatim. List fields get between
/// 1 and [`MAX_LIST_LEN`] elements. [`SeedValue::Null`] means the field could
/// not be resolved and should be left out of the record.
pub fn generate_field<R: Rng>(
    field: &EffectiveField,
    rng: &mut R,
    index: u64,
) -> Result<SeedValue, ConfigError> {
    if let Some(value) = &field.config.default_value {
        return Ok(SeedValue::from_json(value));
    }

    if !field.list {
        return generate_one(field, rng, index);
    }

    let len = rng.random_range(1..=MAX_LIST_LEN);
    let mut items = Vec::with_capacity(len);
    for _ in 0..len {
        let value = generate_one(field, rng, index)?;
        if !value.is_null() {
            items.push(value);
        }
    }

    if items.is_empty() {
        Ok(SeedValue::Null)
    } else {
        Ok(SeedValue::Array(items))
    }
}

fn generate_one<R: Rng>(
    field: &EffectiveField,
    rng: &mut R,
    index: u64,
) -> Result<SeedValue, ConfigError> {
    let hint = Hint::new(&field.name, index);
    let config = &field.config;

    match field.kind {
        GeneratorKind::String => StringGenerator.generate(rng, &hint, config),
        GeneratorKind::Number(kind) => NumberGenerator::new(kind).generate(rng, &hint, config),
        GeneratorKind::Date => DateGenerator.generate(rng, &hint, config),
        GeneratorKind::Boolean => BooleanGenerator.generate(rng, &hint, config),
        GeneratorKind::Enum => EnumGenerator.generate(rng, &hint, config),
        GeneratorKind::Relation => Ok(SeedValue::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effective::effective_field_config;
    use crate::generators::NumberKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use seed_core::{FieldConfig, SchemaField};

    fn effective(field: SchemaField, config: Option<FieldConfig>) -> EffectiveField {
        effective_field_config(&field, config.as_ref())
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_dispatch_by_kind() {
        let mut rng = StdRng::seed_from_u64(42);

        let email = effective(SchemaField::declared("email", "String"), None);
        assert!(generate_field(&email, &mut rng, 0)
            .unwrap()
            .as_str()
            .unwrap()
            .contains('@'));

        let created = effective(SchemaField::declared("createdAt", "DateTime"), None);
        assert!(generate_field(&created, &mut rng, 0)
            .unwrap()
            .as_datetime()
            .is_some());

        let active = effective(SchemaField::declared("active", "Boolean"), None);
        assert!(generate_field(&active, &mut rng, 0)
            .unwrap()
            .as_bool()
            .is_some());

        let ratio = effective(SchemaField::declared("ratio", "Float"), None);
        assert_eq!(ratio.kind, GeneratorKind::Number(NumberKind::Float));
        assert!(matches!(
            generate_field(&ratio, &mut rng, 0).unwrap(),
            SeedValue::Float(_)
        ));
    }

    #[test]
    fn test_default_value_is_literal() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = FieldConfig {
            default_value: Some(serde_json::json!("fixed")),
            ..Default::default()
        };
        let field = effective(SchemaField::declared("status", "String"), Some(config));
        for index in 0..5 {
            assert_eq!(
                generate_field(&field, &mut rng, index).unwrap(),
                SeedValue::String("fixed".into())
            );
        }
    }

    #[test]
    fn test_list_fields() {
        let mut rng = StdRng::seed_from_u64(42);
        let field = effective(SchemaField::declared("tags", "String").list(), None);
        for _ in 0..50 {
            let value = generate_field(&field, &mut rng, 0).unwrap();
            let items = value.as_array().unwrap();
            assert!((1..=MAX_LIST_LEN).contains(&items.len()));
        }
    }

    #[test]
    fn test_unresolvable_enum() {
        let mut rng = StdRng::seed_from_u64(42);
        let field = effective(SchemaField::declared("status", "Status"), None);
        assert!(generate_field(&field, &mut rng, 0).unwrap().is_null());

        let list = effective(SchemaField::declared("statuses", "Status").list(), None);
        assert!(generate_field(&list, &mut rng, 0).unwrap().is_null());
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let field = effective(SchemaField::declared("name", "String"), None);
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);
        for index in 0..10 {
            assert_eq!(
                generate_field(&field, &mut rng1, index).unwrap(),
                generate_field(&field, &mut rng2, index).unwrap()
            );
        }
    }
}
