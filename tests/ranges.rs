//! Integration tests for range generation across every element type.
//!
//! Each element type gets the same battery of checks, generated with
//! `pastey`: degenerate ranges, inclusive ascending and descending ranges,
//! and termination at both ends of the type's domain.

// Allow test-specific patterns that are appropriate for test code
#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]

#[path = "common/mod.rs"]
mod common;

use common::{expand, init_tracing};
use stepwise::{
    Decimal, GeneratorRegistry, NumericType, RangeError, RawValue, ValueGenerator,
};

macro_rules! integer_range_tests {
    ($($ty:ident => $variant:ident, down $down:ident);* $(;)?) => {
        pastey::paste! {
            $(
                #[test]
                fn [<test_ $ty _degenerate_range_is_single_value>]() {
                    init_tracing();
                    for step in [RawValue::$variant(1), RawValue::$down(-1)] {
                        let values = expand(RawValue::$variant(7), RawValue::$variant(7), step).unwrap();
                        assert_eq!(values, vec![RawValue::$variant(7)]);
                    }
                }

                #[test]
                fn [<test_ $ty _ascending_is_inclusive>]() {
                    let values: Vec<$ty> = ValueGenerator::<$ty>::new()
                        .generate(0, 20, RawValue::$variant(5))
                        .unwrap()
                        .collect();
                    assert_eq!(values, vec![0, 5, 10, 15, 20]);
                }

                #[test]
                fn [<test_ $ty _descending_is_inclusive>]() {
                    let values: Vec<$ty> = ValueGenerator::<$ty>::new()
                        .generate(20, 1, RawValue::$down(-5))
                        .unwrap()
                        .collect();
                    assert_eq!(values, vec![20, 15, 10, 5]);
                }

                #[test]
                fn [<test_ $ty _stops_at_max>]() {
                    let start = $ty::MAX - 3;
                    let values: Vec<$ty> = ValueGenerator::<$ty>::new()
                        .generate(start, $ty::MAX, RawValue::$variant(2))
                        .unwrap()
                        .collect();
                    assert_eq!(values, vec![start, start + 2]);
                }

                #[test]
                fn [<test_ $ty _stops_at_min>]() {
                    let start = $ty::MIN + 3;
                    let values: Vec<$ty> = ValueGenerator::<$ty>::new()
                        .generate(start, $ty::MIN, RawValue::$down(-2))
                        .unwrap()
                        .collect();
                    assert_eq!(values, vec![start, start - 2]);
                }

                #[test]
                fn [<test_ $ty _wrong_direction_rejected>]() {
                    let err = ValueGenerator::<$ty>::new()
                        .generate(0, 10, RawValue::$down(-1))
                        .unwrap_err();
                    assert!(matches!(err, RangeError::DirectionMismatch { .. }), "{err}");
                }
            )*
        }
    };
}

integer_range_tests!(
    i8 => I8, down I8;
    i16 => I16, down I16;
    i32 => I32, down I32;
    i64 => I64, down I64;
    u8 => U8, down I32;
    u16 => U16, down I32;
    u32 => U32, down I64;
    u64 => U64, down I64;
);

#[test]
fn test_u8_ascending_wraparound_ends_sequence() {
    let values = expand(RawValue::U8(250), RawValue::U8(255), RawValue::U8(10)).unwrap();
    assert_eq!(values, vec![RawValue::U8(250)]);
}

#[test]
fn test_u8_descending_wraparound_ends_sequence() {
    let values = expand(RawValue::U8(5), RawValue::U8(0), RawValue::I32(-10)).unwrap();
    assert_eq!(values, vec![RawValue::U8(5)]);
}

#[test]
fn test_u8_wrong_direction_produces_nothing() {
    let err = expand(RawValue::U8(0), RawValue::U8(10), RawValue::I32(-1)).unwrap_err();
    assert_eq!(
        err,
        RangeError::DirectionMismatch {
            start: RawValue::U8(0),
            end: RawValue::U8(10),
            direction: stepwise::Direction::Negative,
        }
    );
}

#[test]
fn test_i64_exact_step() {
    let values = expand(RawValue::I64(1), RawValue::I64(10), RawValue::I64(3)).unwrap();
    assert_eq!(values, [1, 4, 7, 10].map(RawValue::I64).to_vec());
}

#[test]
fn test_u64_full_width_step() {
    let values: Vec<u64> = ValueGenerator::<u64>::new()
        .generate(0, u64::MAX, RawValue::U64(u64::MAX / 2 + 1))
        .unwrap()
        .collect();
    assert_eq!(values, vec![0, 1 << 63]);
}

#[test]
fn test_cross_type_steps_convert_losslessly() {
    let values = expand(RawValue::I64(0), RawValue::I64(4), RawValue::U8(2)).unwrap();
    assert_eq!(values, [0, 2, 4].map(RawValue::I64).to_vec());

    let values = expand(RawValue::I8(0), RawValue::I8(-4), RawValue::F64(-2.0)).unwrap();
    assert_eq!(values, [0, -2, -4].map(RawValue::I8).to_vec());

    let err = expand(RawValue::I8(0), RawValue::I8(100), RawValue::I32(1000)).unwrap_err();
    assert_eq!(
        err,
        RangeError::UnsupportedStep {
            element: NumericType::I8,
            step: RawValue::I32(1000),
        }
    );
}

#[test]
fn test_decimal_fractional_step() {
    let start = Decimal::from_units(-5_000);
    let end = Decimal::from_units(5_000);
    let values = expand(
        RawValue::Decimal(start),
        RawValue::Decimal(end),
        RawValue::Decimal("0.25".parse().unwrap()),
    )
    .unwrap();
    let units: Vec<i64> = values
        .into_iter()
        .map(|v| match v {
            RawValue::Decimal(d) => d.units(),
            other => panic!("unexpected {other}"),
        })
        .collect();
    assert_eq!(units, vec![-5_000, -2_500, 0, 2_500, 5_000]);
}

#[test]
fn test_decimal_stops_at_min() {
    let start = Decimal::from_units(i64::MIN + 1);
    let values = expand(
        RawValue::Decimal(start),
        RawValue::Decimal(Decimal::MIN),
        RawValue::Decimal(Decimal::from_units(-1)),
    )
    .unwrap();
    assert_eq!(
        values,
        vec![RawValue::Decimal(start), RawValue::Decimal(Decimal::MIN)]
    );
}

#[test]
fn test_decimal_float_step_converts_exactly() {
    let values = expand(
        RawValue::Decimal(Decimal::ZERO),
        RawValue::Decimal(Decimal::ONE),
        RawValue::F64(0.25),
    )
    .unwrap();
    assert_eq!(
        values,
        [0, 2_500, 5_000, 7_500, 10_000]
            .map(|units| RawValue::Decimal(Decimal::from_units(units)))
            .to_vec()
    );

    let descending = expand(
        RawValue::Decimal(Decimal::ONE),
        RawValue::Decimal(Decimal::ZERO),
        RawValue::F32(-0.5),
    )
    .unwrap();
    assert_eq!(descending.len(), 3);
}

#[test]
fn test_decimal_float_step_with_excess_digits_rejected() {
    let err = expand(
        RawValue::Decimal(Decimal::ZERO),
        RawValue::Decimal(Decimal::ONE),
        RawValue::F64(0.000_01),
    )
    .unwrap_err();
    assert_eq!(
        err,
        RangeError::UnsupportedStep {
            element: NumericType::Decimal,
            step: RawValue::F64(0.000_01),
        }
    );
}

#[test]
fn test_decimal_degenerate_range_yields_start() {
    let point = RawValue::Decimal(Decimal::from_units(12_345));
    for step in [
        RawValue::Decimal(Decimal::ONE),
        RawValue::Decimal(Decimal::from_units(-2_500)),
        RawValue::I32(-3),
    ] {
        assert_eq!(expand(point, point, step).unwrap(), vec![point]);
    }

    let max = RawValue::Decimal(Decimal::MAX);
    assert_eq!(
        expand(max, max, RawValue::Decimal(Decimal::ONE)).unwrap(),
        vec![max]
    );
}

#[test]
fn test_zero_step_rejected_for_every_type() {
    let registry = GeneratorRegistry::new();
    for ty in registry.registered_types().collect::<Vec<_>>() {
        let generator = registry.generator_for(ty).unwrap();
        let err = generator.try_create_step(RawValue::I64(0)).unwrap_err();
        assert_eq!(err, RangeError::ZeroStep { element: ty });
    }
}

#[test]
fn test_same_request_twice_is_identical() {
    let registry = GeneratorRegistry::new();
    let generator = registry.generator_for(NumericType::U16).unwrap();
    let step = generator.try_create_step(RawValue::I32(-7)).unwrap();

    let first = generator
        .generate_range(RawValue::U16(100), RawValue::U16(0), &step)
        .unwrap();
    let second = generator
        .generate_range(RawValue::U16(100), RawValue::U16(0), &step)
        .unwrap();

    // interleave to show the sequences share no state
    let pairs: Vec<(RawValue, RawValue)> = first.zip(second).collect();
    assert_eq!(pairs.len(), 15);
    assert!(pairs.iter().all(|(a, b)| a == b));
}

#[test]
fn test_abandoned_sequence_has_no_effect() {
    let registry = GeneratorRegistry::new();
    let mut abandoned = registry
        .expand(RawValue::I32(0), RawValue::I32(1_000_000), RawValue::I32(1))
        .unwrap();
    assert_eq!(abandoned.next(), Some(RawValue::I32(0)));
    drop(abandoned);

    let fresh: Vec<RawValue> = registry
        .expand(RawValue::I32(0), RawValue::I32(2), RawValue::I32(1))
        .unwrap()
        .collect();
    assert_eq!(fresh, [0, 1, 2].map(RawValue::I32).to_vec());
}
