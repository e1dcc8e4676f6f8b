use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use seed_core::{FieldConfig, FieldType, SeedValue};
use seed_generator::{EnumGenerator, Hint, NumberGenerator, NumberKind, ValueGenerator};
use seed_runner::{resolve_order, DependencyGraph};

use crate::fixture_text;

#[test]
fn test_parsing_is_idempotent() {
    let text = fixture_text("blog.prisma");

    // `@default(now())` captures the parse time, so compare the shape only
    let shape = |text: &str| -> Vec<(String, Vec<(String, FieldType)>, usize)> {
        schema_parser::parse_schema(text)
            .into_iter()
            .map(|m| {
                let fields = m
                    .fields
                    .iter()
                    .map(|f| (f.name.clone(), f.field_type.clone()))
                    .collect();
                (m.name, fields, m.relations.len())
            })
            .collect()
    };

    let first = shape(&text);
    assert_eq!(first.len(), 4);
    assert_eq!(first, shape(&text));
}

#[test]
fn test_type_inference() {
    let models = schema_parser::parse_schema(
        r#"
enum Mood { HAPPY SAD }

model Sample {
  label   String
  total   Int
  active  Boolean
  created DateTime
  mood    Mood
}
"#,
    );

    let types: Vec<&FieldType> = models[0].fields.iter().map(|f| &f.field_type).collect();
    assert_eq!(
        types,
        vec![
            &FieldType::String,
            &FieldType::Number,
            &FieldType::Boolean,
            &FieldType::String,
            &FieldType::Enum,
        ]
    );
}

#[test]
fn test_dependencies_precede_dependents() {
    let models = schema_parser::parse_schema(&fixture_text("blog.prisma"));
    let order = resolve_order(&models);
    let graph = DependencyGraph::from_models(&models);

    assert!(!order.has_cycles());
    for model in &models {
        for parent in graph.dependencies(&model.name) {
            assert!(
                order.position(parent) < order.position(&model.name),
                "{parent} must precede {}",
                model.name
            );
        }
    }
}

#[test]
fn test_numbers_stay_in_configured_range() {
    let mut rng = StdRng::seed_from_u64(42);
    let config = FieldConfig::with_range(-5.0, 17.0);

    for kind in [NumberKind::Integer, NumberKind::Float, NumberKind::Decimal] {
        let generator = NumberGenerator::new(kind);
        for index in 0..1000 {
            let value = generator
                .generate(&mut rng, &Hint::new("quantity", index), &config)
                .unwrap();
            let n = value.as_f64().unwrap();
            assert!((-5.0..=17.0).contains(&n), "{kind:?} produced {n}");
        }
    }
}

#[test]
fn test_configured_values_respect_range() {
    let mut rng = StdRng::seed_from_u64(42);
    let config = FieldConfig {
        values: Some(vec![500.into(), 2.into(), 9.into()]),
        ..FieldConfig::with_range(1.0, 10.0)
    };

    for index in 0..1000 {
        let n = NumberGenerator::integer()
            .generate(&mut rng, &Hint::new("quantity", index), &config)
            .unwrap()
            .as_i64()
            .unwrap();
        assert!((1..=10).contains(&n), "configured value {n} escaped the range");
    }
}

#[test]
fn test_unbounded_range_is_a_config_error() {
    let mut rng = StdRng::seed_from_u64(42);
    for config in [
        FieldConfig::with_range(0.0, f64::INFINITY),
        FieldConfig::with_range(-1.0e308, 1.0e308),
    ] {
        assert!(NumberGenerator::new(NumberKind::Float)
            .generate(&mut rng, &Hint::new("score", 0), &config)
            .is_err());
    }
}

#[test]
fn test_inverted_range_is_a_config_error() {
    let mut rng = StdRng::seed_from_u64(42);
    let config = FieldConfig::with_range(10.0, 1.0);
    assert!(NumberGenerator::integer()
        .generate(&mut rng, &Hint::new("age", 0), &config)
        .is_err());
}

#[test]
fn test_enum_values_are_contained() {
    let mut rng = StdRng::seed_from_u64(42);
    let config = FieldConfig::with_values(["red", "green", "blue"]);

    let mut seen = HashSet::new();
    for index in 0..100 {
        let value = EnumGenerator
            .generate(&mut rng, &Hint::new("color", index), &config)
            .unwrap();
        let color = value.as_str().unwrap().to_string();
        assert!(["red", "green", "blue"].contains(&color.as_str()));
        seen.insert(color);
    }
    assert_eq!(seen.len(), 3);

    let empty = EnumGenerator
        .generate(&mut rng, &Hint::new("color", 0), &FieldConfig::default())
        .unwrap();
    assert_eq!(empty, SeedValue::Null);
}
