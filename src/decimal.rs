//! Fixed-point decimal element type.
//!
//! A [`Decimal`] is an `i64` count of ten-thousandths. Addition wraps in that
//! unit domain exactly like the fixed-width integers do, so ranges over
//! decimals terminate at the representable boundary through the same
//! wraparound comparison.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Fixed-point decimal with [`Decimal::SCALE`] fractional digits.
///
/// # Examples
///
/// ```
/// use stepwise::Decimal;
///
/// let price: Decimal = "1.25".parse().unwrap();
/// assert_eq!(price.units(), 12_500);
/// assert_eq!(price.to_string(), "1.2500");
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Decimal {
    units: i64,
}

/// Units per whole number.
const UNITS_PER_ONE: i64 = 10_000;

impl Decimal {
    /// Number of fractional digits.
    pub const SCALE: u32 = 4;
    /// Zero.
    pub const ZERO: Self = Self { units: 0 };
    /// One whole unit (`1.0000`).
    pub const ONE: Self = Self {
        units: UNITS_PER_ONE,
    };
    /// Smallest representable value.
    pub const MIN: Self = Self { units: i64::MIN };
    /// Largest representable value.
    pub const MAX: Self = Self { units: i64::MAX };

    /// Creates a decimal from a raw count of ten-thousandths.
    #[inline]
    #[must_use]
    pub const fn from_units(units: i64) -> Self {
        Self { units }
    }

    /// Returns the raw count of ten-thousandths.
    #[inline]
    #[must_use]
    pub const fn units(self) -> i64 {
        self.units
    }

    /// Converts a whole number, returning `None` if it does not fit.
    #[must_use]
    pub fn from_integer(value: i128) -> Option<Self> {
        let units = value.checked_mul(i128::from(UNITS_PER_ONE))?;
        i64::try_from(units).ok().map(Self::from_units)
    }

    /// Adds two decimals, wrapping around at the representable boundary.
    #[inline]
    #[must_use]
    pub const fn wrapping_add(self, rhs: Self) -> Self {
        Self {
            units: self.units.wrapping_add(rhs.units),
        }
    }

    /// Returns `true` if strictly greater than zero.
    #[inline]
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.units > 0
    }

    /// Returns `true` if strictly less than zero.
    #[inline]
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.units < 0
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // i64::MIN has no positive counterpart, so split via i128
        let units = i128::from(self.units);
        let sign = if units < 0 { "-" } else { "" };
        let magnitude = units.unsigned_abs();
        let per_one = UNITS_PER_ONE as u128;
        write!(
            f,
            "{}{}.{:04}",
            sign,
            magnitude / per_one,
            magnitude % per_one
        )
    }
}

/// Error returned when parsing a [`Decimal`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDecimalError {
    input: String,
}

impl fmt::Display for ParseDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid decimal literal: {:?}", self.input)
    }
}

impl std::error::Error for ParseDecimalError {}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseDecimalError {
            input: s.to_owned(),
        };

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty()
            || !all_digits(whole)
            || !all_digits(fraction)
            || fraction.len() > Self::SCALE as usize
            || (body.contains('.') && fraction.is_empty())
        {
            return Err(err());
        }

        let whole: i128 = whole.parse().ok().ok_or_else(err)?;
        let mut fraction_units: i128 = 0;
        for (position, digit) in fraction.bytes().enumerate() {
            let weight = 10_i128.pow(Self::SCALE - 1 - position as u32);
            fraction_units += i128::from(digit - b'0') * weight;
        }

        let magnitude = whole
            .checked_mul(i128::from(UNITS_PER_ONE))
            .and_then(|w| w.checked_add(fraction_units))
            .ok_or_else(err)?;
        let units = if negative { -magnitude } else { magnitude };
        i64::try_from(units)
            .ok()
            .map(Self::from_units)
            .ok_or_else(err)
    }
}

impl Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
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

    #[test]
    fn test_display_pads_fraction() {
        assert_eq!(Decimal::from_units(5).to_string(), "0.0005");
        assert_eq!(Decimal::from_units(-12_345).to_string(), "-1.2345");
        assert_eq!(Decimal::ONE.to_string(), "1.0000");
        assert_eq!(Decimal::MIN.to_string(), "-922337203685477.5808");
    }

    #[test]
    fn test_parse_accepts_short_fractions_and_signs() {
        assert_eq!("2".parse::<Decimal>().unwrap().units(), 20_000);
        assert_eq!("+0.5".parse::<Decimal>().unwrap().units(), 5_000);
        assert_eq!("-3.0001".parse::<Decimal>().unwrap().units(), -30_001);
        assert_eq!(
            "-922337203685477.5808".parse::<Decimal>().unwrap(),
            Decimal::MIN
        );
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for input in ["", "-", ".5", "1.", "1.23456", "1e3", "abc", "1.2.3"] {
            assert!(input.parse::<Decimal>().is_err(), "{input:?} parsed");
        }
        assert!("922337203685477.5808".parse::<Decimal>().is_err());
    }

    #[test]
    fn test_from_integer_is_checked() {
        assert_eq!(Decimal::from_integer(-2), Some(Decimal::from_units(-20_000)));
        assert_eq!(Decimal::from_integer(i128::from(i64::MAX)), None);
    }

    #[test]
    fn test_wrapping_add_wraps_at_max() {
        let next = Decimal::MAX.wrapping_add(Decimal::from_units(1));
        assert_eq!(next, Decimal::MIN);
        assert!(next < Decimal::MAX);
    }

    #[test]
    fn test_serde_uses_string_form() {
        let value = Decimal::from_units(-7_500);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"-0.7500\"");
        let back: Decimal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
