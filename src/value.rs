//! Runtime descriptions of numeric types and values.
//!
//! The declaration layer does not know the element type of a range at compile
//! time. It hands this crate a [`NumericType`] tag and [`RawValue`]s carrying
//! that tag, and the dispatch layer selects the matching typed generator.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::decimal::Decimal;

/// Tag identifying a numeric type a range can be declared over.
///
/// Float tags can be described but have no registered generator.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum NumericType {
    /// 8-bit signed integer.
    I8,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 32-bit unsigned integer.
    U32,
    /// 64-bit unsigned integer.
    U64,
    /// Fixed-point [`Decimal`].
    Decimal,
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
}

impl NumericType {
    /// Every tag, integers first.
    pub const ALL: [Self; 11] = [
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::Decimal,
        Self::F32,
        Self::F64,
    ];

    /// Returns the Rust-style name of the type, suitable for logging.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Decimal => "decimal",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    /// Returns `true` for the signed integer tags.
    #[must_use]
    pub const fn is_signed_integer(&self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    /// Returns `true` for the unsigned integer tags.
    #[must_use]
    pub const fn is_unsigned_integer(&self) -> bool {
        matches!(self, Self::U8 | Self::U16 | Self::U32 | Self::U64)
    }

    /// Returns `true` for the floating-point tags.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl fmt::Display for NumericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An untyped numeric value as supplied by a range declaration.
///
/// Serialized as `{"type": "u8", "value": 5}`; decimals carry their value as
/// a string.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RawValue {
    /// An `i8` value.
    I8(i8),
    /// An `i16` value.
    I16(i16),
    /// An `i32` value.
    I32(i32),
    /// An `i64` value.
    I64(i64),
    /// A `u8` value.
    U8(u8),
    /// A `u16` value.
    U16(u16),
    /// A `u32` value.
    U32(u32),
    /// A `u64` value.
    U64(u64),
    /// A [`Decimal`] value.
    Decimal(Decimal),
    /// An `f32` value.
    F32(f32),
    /// An `f64` value.
    F64(f64),
}

impl RawValue {
    /// Returns the tag of this value's runtime type.
    #[must_use]
    pub const fn numeric_type(&self) -> NumericType {
        match self {
            Self::I8(_) => NumericType::I8,
            Self::I16(_) => NumericType::I16,
            Self::I32(_) => NumericType::I32,
            Self::I64(_) => NumericType::I64,
            Self::U8(_) => NumericType::U8,
            Self::U16(_) => NumericType::U16,
            Self::U32(_) => NumericType::U32,
            Self::U64(_) => NumericType::U64,
            Self::Decimal(_) => NumericType::Decimal,
            Self::F32(_) => NumericType::F32,
            Self::F64(_) => NumericType::F64,
        }
    }

    /// Returns the sign of the value: `1`, `0` or `-1`.
    ///
    /// NaN reports `0`, so it is rejected the same way a zero step is.
    #[must_use]
    pub fn signum(&self) -> i8 {
        match *self {
            Self::I8(v) => v.signum(),
            Self::I16(v) => v.signum() as i8,
            Self::I32(v) => v.signum() as i8,
            Self::I64(v) => v.signum() as i8,
            Self::U8(v) => i8::from(v != 0),
            Self::U16(v) => i8::from(v != 0),
            Self::U32(v) => i8::from(v != 0),
            Self::U64(v) => i8::from(v != 0),
            Self::Decimal(v) => v.units().signum() as i8,
            Self::F32(v) if v > 0.0 => 1,
            Self::F32(v) if v < 0.0 => -1,
            Self::F64(v) if v > 0.0 => 1,
            Self::F64(v) if v < 0.0 => -1,
            Self::F32(_) | Self::F64(_) => 0,
        }
    }

    /// Returns `true` if the value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.signum() == 0
    }

    /// Widens an integer value to `i128`. Returns `None` for decimals and floats.
    #[must_use]
    pub const fn as_i128(&self) -> Option<i128> {
        match *self {
            Self::I8(v) => Some(v as i128),
            Self::I16(v) => Some(v as i128),
            Self::I32(v) => Some(v as i128),
            Self::I64(v) => Some(v as i128),
            Self::U8(v) => Some(v as i128),
            Self::U16(v) => Some(v as i128),
            Self::U32(v) => Some(v as i128),
            Self::U64(v) => Some(v as i128),
            Self::Decimal(_) | Self::F32(_) | Self::F64(_) => None,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I8(v) => write!(f, "{}i8", v),
            Self::I16(v) => write!(f, "{}i16", v),
            Self::I32(v) => write!(f, "{}i32", v),
            Self::I64(v) => write!(f, "{}i64", v),
            Self::U8(v) => write!(f, "{}u8", v),
            Self::U16(v) => write!(f, "{}u16", v),
            Self::U32(v) => write!(f, "{}u32", v),
            Self::U64(v) => write!(f, "{}u64", v),
            Self::Decimal(v) => write!(f, "{}m", v),
            Self::F32(v) => write!(f, "{}f32", v),
            Self::F64(v) => write!(f, "{}f64", v),
        }
    }
}

macro_rules! impl_numeric {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for RawValue {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }

            impl Numeric for $ty {
                const TYPE: NumericType = NumericType::$variant;
            }
        )*
    };
}

/// A concrete Rust numeric type that has a [`NumericType`] tag.
///
/// Implemented for element types and for the storage types steps are kept in.
pub trait Numeric:
    Copy + PartialOrd + fmt::Debug + Send + Sync + Into<RawValue> + 'static
{
    /// The runtime tag of this type.
    const TYPE: NumericType;
}

impl_numeric!(
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    Decimal => Decimal,
    f32 => F32,
    f64 => F64,
);

#[cfg(test)]
#[allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_type_of_each_variant() {
        assert_eq!(RawValue::from(1u8).numeric_type(), NumericType::U8);
        assert_eq!(RawValue::from(-1i32).numeric_type(), NumericType::I32);
        assert_eq!(
            RawValue::from(Decimal::from_units(5)).numeric_type(),
            NumericType::Decimal
        );
        assert_eq!(RawValue::from(0.5f64).numeric_type(), NumericType::F64);
    }

    #[test]
    fn test_signum() {
        assert_eq!(RawValue::I64(-7).signum(), -1);
        assert_eq!(RawValue::U64(7).signum(), 1);
        assert_eq!(RawValue::U8(0).signum(), 0);
        assert_eq!(RawValue::Decimal(Decimal::from_units(-1)).signum(), -1);
        assert_eq!(RawValue::F32(f32::NAN).signum(), 0);
        assert!(RawValue::I16(0).is_zero());
    }

    #[test]
    fn test_as_i128_covers_full_u64_range() {
        assert_eq!(RawValue::U64(u64::MAX).as_i128(), Some(u64::MAX as i128));
        assert_eq!(RawValue::I64(i64::MIN).as_i128(), Some(i64::MIN as i128));
        assert_eq!(RawValue::F32(1.0).as_i128(), None);
    }

    #[test]
    fn test_display_carries_type_suffix() {
        assert_eq!(RawValue::U8(250).to_string(), "250u8");
        assert_eq!(RawValue::I32(-1).to_string(), "-1i32");
        assert_eq!(
            RawValue::Decimal(Decimal::from_units(12_500)).to_string(),
            "1.2500m"
        );
    }

    #[test]
    fn test_float_tags_are_flagged() {
        for ty in NumericType::ALL {
            assert_eq!(
                ty.is_float(),
                matches!(ty, NumericType::F32 | NumericType::F64)
            );
        }
        assert!(NumericType::U16.is_unsigned_integer());
        assert!(NumericType::I8.is_signed_integer());
        assert!(!NumericType::Decimal.is_signed_integer());
    }
}
