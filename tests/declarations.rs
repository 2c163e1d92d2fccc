//! Integration tests for range declarations loaded from JSON fixtures.

// Allow test-specific patterns that are appropriate for test code
#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]

#[path = "common/mod.rs"]
mod common;

use common::init_tracing;
use stepwise::{
    Decimal, GeneratorRegistry, NumericType, RangeDeclaration, RangeError, RawValue,
    RegistryConfig,
};

const FIXTURES: &str = r#"[
    {"start": {"type": "u8", "value": 250}, "end": {"type": "u8", "value": 255}, "step": {"type": "u8", "value": 10}},
    {"start": {"type": "u8", "value": 5}, "end": {"type": "u8", "value": 0}, "step": {"type": "i32", "value": -10}},
    {"start": {"type": "i64", "value": 1}, "end": {"type": "i64", "value": 10}, "step": {"type": "i64", "value": 3}},
    {"start": {"type": "u16", "value": 3}, "end": {"type": "u16", "value": 0}},
    {"start": {"type": "decimal", "value": "0.5"}, "end": {"type": "decimal", "value": "1.5"}, "step": {"type": "decimal", "value": "0.5"}}
]"#;

#[test]
fn test_fixture_expansions() {
    init_tracing();
    let declarations: Vec<RangeDeclaration> = serde_json::from_str(FIXTURES).unwrap();
    let registry = GeneratorRegistry::new();

    let expanded: Vec<Vec<RawValue>> = declarations
        .iter()
        .map(|d| d.expand(&registry).unwrap().collect())
        .collect();

    assert_eq!(expanded[0], vec![RawValue::U8(250)]);
    assert_eq!(expanded[1], vec![RawValue::U8(5)]);
    assert_eq!(expanded[2], [1, 4, 7, 10].map(RawValue::I64).to_vec());
    assert_eq!(expanded[3], [3, 2, 1, 0].map(RawValue::U16).to_vec());
    assert_eq!(
        expanded[4],
        [5_000, 10_000, 15_000]
            .map(|units| RawValue::Decimal(Decimal::from_units(units)))
            .to_vec()
    );
}

#[test]
fn test_float_declaration_is_unsupported() {
    let declaration: RangeDeclaration = serde_json::from_str(
        r#"{"start": {"type": "f64", "value": 0.0}, "end": {"type": "f64", "value": 1.0}}"#,
    )
    .unwrap();
    assert_eq!(
        declaration.expand(&GeneratorRegistry::new()).unwrap_err(),
        RangeError::UnsupportedElementType {
            element: NumericType::F64
        }
    );
}

#[test]
fn test_mismatched_endpoint_types() {
    let declaration = RangeDeclaration::new(RawValue::U8(0), RawValue::U16(4));
    assert!(matches!(
        declaration.expand(&GeneratorRegistry::new()),
        Err(RangeError::MismatchedEndpoints { .. })
    ));
}

#[test]
fn test_invalid_decimal_literal_fails_to_parse() {
    let result: Result<RangeDeclaration, _> = serde_json::from_str(
        r#"{"start": {"type": "decimal", "value": "1.23456"}, "end": {"type": "decimal", "value": "2"}}"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_registry_config_from_json() {
    let config: RegistryConfig =
        serde_json::from_str(r#"{"element_types": ["u8"], "wide_unsigned_steps": false}"#)
            .unwrap();
    let registry = GeneratorRegistry::with_config(config).unwrap();

    let down = RangeDeclaration::new(RawValue::U8(3), RawValue::U8(0));
    assert!(matches!(
        down.expand(&registry),
        Err(RangeError::UnsupportedStep { .. })
    ));

    let up = RangeDeclaration::new(RawValue::U8(0), RawValue::U8(3));
    assert_eq!(up.expand(&registry).unwrap().count(), 4);
}

#[cfg(feature = "json")]
#[test]
fn test_json_helpers_roundtrip_declaration() {
    let declaration =
        RangeDeclaration::new(RawValue::I32(-3), RawValue::I32(3)).with_step(RawValue::I32(2));
    let json = declaration.to_json().unwrap();
    assert_eq!(RangeDeclaration::from_json(&json).unwrap(), declaration);

    let err = RangeDeclaration::from_json("{").unwrap_err();
    assert!(matches!(err, RangeError::SerializationError { .. }));
}
