//! [`RangeElement`] impls for the supported element types.
//!
//! Every type accepts a step of its own type. Unsigned types additionally
//! accept a negative step kept in a wider signed type (`i32` for `u8` and
//! `u16`, `i64` for `u32` and `u64`), so that they can count downwards; the
//! sum is truncated back to the element width. Anything else goes through a
//! lossless conversion.

use num_traits::{Bounded, WrappingAdd};

use super::RangeElement;
use crate::decimal::Decimal;
use crate::step::Step;
use crate::value::RawValue;

/// Returns the value as a whole number if it is one.
///
/// Decimals qualify when they have no fractional part, floats when they are
/// finite and integral.
fn whole_number(raw: RawValue) -> Option<i128> {
    match raw {
        RawValue::Decimal(v) => {
            let units = i128::from(v.units());
            let per_one = 10_i128.pow(Decimal::SCALE);
            (units % per_one == 0).then_some(units / per_one)
        }
        RawValue::F32(v) => integral_float(f64::from(v)),
        RawValue::F64(v) => integral_float(v),
        other => other.as_i128(),
    }
}

fn integral_float(value: f64) -> Option<i128> {
    if value.is_finite() && value.fract() == 0.0 {
        <i128 as num_traits::NumCast>::from(value)
    } else {
        None
    }
}

/// Converts to an integer type only when the value is preserved exactly.
fn lossless<T: num_traits::NumCast>(raw: RawValue) -> Option<T> {
    whole_number(raw).and_then(<T as num_traits::NumCast>::from)
}

/// Accepts a wide step only if its magnitude fits in `T`, so that one
/// truncated addition moves by exactly the step or wraps.
fn fits_magnitude<T, W>(step: W) -> bool
where
    T: Bounded + Into<u128>,
    W: Into<i128>,
{
    Into::<i128>::into(step).unsigned_abs() <= Into::<u128>::into(T::max_value())
}

macro_rules! signed_element {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl RangeElement for $ty {
                #[inline]
                fn wrapping_step(current: Self, step: Self) -> Self {
                    WrappingAdd::wrapping_add(&current, &step)
                }

                fn from_raw(raw: RawValue) -> Option<Self> {
                    match raw {
                        RawValue::$variant(value) => Some(value),
                        _ => None,
                    }
                }

                fn convert(raw: RawValue) -> Option<Self> {
                    lossless(raw)
                }
            }
        )*
    };
}

macro_rules! unsigned_element {
    ($($ty:ident => $variant:ident, wide $wide:ident => $wide_variant:ident, $advance:expr);* $(;)?) => {
        $(
            impl RangeElement for $ty {
                #[inline]
                fn wrapping_step(current: Self, step: Self) -> Self {
                    WrappingAdd::wrapping_add(&current, &step)
                }

                fn from_raw(raw: RawValue) -> Option<Self> {
                    match raw {
                        RawValue::$variant(value) => Some(value),
                        _ => None,
                    }
                }

                fn wide_step(raw: RawValue) -> Option<Step<Self>> {
                    let RawValue::$wide_variant(value) = raw else {
                        return None;
                    };
                    if !fits_magnitude::<$ty, $wide>(value) {
                        return None;
                    }
                    let advance: fn($ty, $wide) -> $ty = $advance;
                    Step::new(value, advance).ok()
                }

                fn convert(raw: RawValue) -> Option<Self> {
                    lossless(raw)
                }
            }
        )*
    };
}

signed_element!(i8 => I8, i16 => I16, i32 => I32, i64 => I64);

unsigned_element!(
    u8 => U8, wide i32 => I32, |current, step| (i32::from(current) + step) as u8;
    u16 => U16, wide i32 => I32, |current, step| (i32::from(current) + step) as u16;
    u32 => U32, wide i64 => I64, |current, step| (i64::from(current) + step) as u32;
    u64 => U64, wide i64 => I64, u64::wrapping_add_signed;
);

impl RangeElement for Decimal {
    #[inline]
    fn wrapping_step(current: Self, step: Self) -> Self {
        current.wrapping_add(step)
    }

    fn from_raw(raw: RawValue) -> Option<Self> {
        match raw {
            RawValue::Decimal(value) => Some(value),
            _ => None,
        }
    }

    fn convert(raw: RawValue) -> Option<Self> {
        match raw {
            RawValue::F32(v) => scaled_float(f64::from(v)),
            RawValue::F64(v) => scaled_float(v),
            other => whole_number(other).and_then(Self::from_integer),
        }
    }
}

/// Converts a float to a decimal when it has at most [`Decimal::SCALE`]
/// fractional digits.
fn scaled_float(value: f64) -> Option<Decimal> {
    let scaled = value * f64::from(10_u32.pow(Decimal::SCALE));
    if scaled.is_finite() && scaled.fract() == 0.0 {
        <i64 as num_traits::NumCast>::from(scaled).map(Decimal::from_units)
    } else {
        None
    }
}

#[cfg(test)]
#[allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use crate::value::NumericType;

    #[test]
    fn test_exact_match_only_for_same_type() {
        assert_eq!(u8::from_raw(RawValue::U8(3)), Some(3));
        assert_eq!(u8::from_raw(RawValue::I32(3)), None);
        assert_eq!(i64::from_raw(RawValue::I64(-9)), Some(-9));
    }

    #[test]
    fn test_lossless_conversion() {
        assert_eq!(i8::convert(RawValue::I64(-128)), Some(-128));
        assert_eq!(i8::convert(RawValue::I64(-129)), None);
        assert_eq!(u16::convert(RawValue::I8(-1)), None);
        assert_eq!(u64::convert(RawValue::U8(200)), Some(200));
        assert_eq!(i32::convert(RawValue::F64(4.0)), Some(4));
        assert_eq!(i32::convert(RawValue::F64(4.5)), None);
        assert_eq!(i32::convert(RawValue::F32(f32::INFINITY)), None);
        assert_eq!(
            i16::convert(RawValue::Decimal(Decimal::from_units(30_000))),
            Some(3)
        );
        assert_eq!(
            i16::convert(RawValue::Decimal(Decimal::from_units(30_001))),
            None
        );
    }

    #[test]
    fn test_decimal_converts_whole_numbers() {
        assert_eq!(
            Decimal::convert(RawValue::I32(-2)),
            Some(Decimal::from_units(-20_000))
        );
        assert_eq!(Decimal::convert(RawValue::U64(u64::MAX)), None);
        assert_eq!(
            Decimal::convert(RawValue::I64(i64::MAX / 10_000 + 1)),
            None
        );
        assert_eq!(Decimal::wide_step(RawValue::I64(-1)).map(|s| s.direction()), None);
    }

    #[test]
    fn test_decimal_converts_floats_with_four_digits() {
        assert_eq!(
            Decimal::convert(RawValue::F64(0.25)),
            Some(Decimal::from_units(2_500))
        );
        assert_eq!(
            Decimal::convert(RawValue::F64(-1.5)),
            Some(Decimal::from_units(-15_000))
        );
        assert_eq!(
            Decimal::convert(RawValue::F32(0.125)),
            Some(Decimal::from_units(1_250))
        );
        assert_eq!(Decimal::convert(RawValue::F64(0.000_01)), None);
        assert_eq!(Decimal::convert(RawValue::F64(f64::NAN)), None);
        assert_eq!(Decimal::convert(RawValue::F64(1e300)), None);
    }

    #[test]
    fn test_wide_step_storage() {
        let step = u8::wide_step(RawValue::I32(-1)).unwrap();
        assert_eq!(step.storage_type(), NumericType::I32);
        assert_eq!(step.apply(0), 255);

        let step = u32::wide_step(RawValue::I64(-5)).unwrap();
        assert_eq!(step.storage_type(), NumericType::I64);
        assert_eq!(step.apply(10), 5);

        let step = u64::wide_step(RawValue::I64(i64::MIN)).unwrap();
        assert_eq!(step.apply(u64::MAX), u64::MAX - (1 << 63));
    }

    #[test]
    fn test_wide_step_rejects_magnitudes_beyond_element() {
        assert!(u8::wide_step(RawValue::I32(255)).is_some());
        assert!(u8::wide_step(RawValue::I32(-255)).is_some());
        assert!(u8::wide_step(RawValue::I32(256)).is_none());
        assert!(u8::wide_step(RawValue::I32(-300)).is_none());
        assert!(u16::wide_step(RawValue::I32(-65_536)).is_none());
        assert!(u32::wide_step(RawValue::I64(i64::from(u32::MAX) + 1)).is_none());
    }

    #[test]
    fn test_wide_step_ignores_other_storage() {
        assert!(u8::wide_step(RawValue::I64(-1)).is_none());
        assert!(u32::wide_step(RawValue::I32(-1)).is_none());
        assert!(i8::wide_step(RawValue::I32(-1)).is_none());
    }
}
