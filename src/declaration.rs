//! Range declarations as written by a test author.
//!
//! A [`RangeDeclaration`] is the `(start, end, step)` triple the
//! declaration layer collects for a parameter. The step may be left out, in
//! which case a unit step towards `end` is implied.

use serde::{Deserialize, Serialize};

use crate::decimal::Decimal;
use crate::dispatch::{AnySequence, GeneratorRegistry};
use crate::error::RangeResult;
use crate::value::RawValue;

/// "Every value from `start` to `end`, stepping by `step`."
///
/// # Examples
///
/// ```
/// use stepwise::{GeneratorRegistry, RangeDeclaration, RawValue};
///
/// // no step: counts down by one, the -1 carried as an i32
/// let declaration = RangeDeclaration::new(RawValue::U8(3), RawValue::U8(1));
/// let values: Vec<RawValue> = declaration.expand(&GeneratorRegistry::new()).unwrap().collect();
/// assert_eq!(values, [RawValue::U8(3), RawValue::U8(2), RawValue::U8(1)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeDeclaration {
    /// The first value produced.
    pub start: RawValue,
    /// The inclusive bound.
    pub end: RawValue,
    /// The increment; `None` implies a unit step towards `end`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<RawValue>,
}

impl RangeDeclaration {
    /// Declares a range with an implied unit step.
    #[must_use]
    pub const fn new(start: RawValue, end: RawValue) -> Self {
        Self {
            start,
            end,
            step: None,
        }
    }

    /// Sets an explicit step.
    #[must_use]
    pub const fn with_step(mut self, step: RawValue) -> Self {
        self.step = Some(step);
        self
    }

    /// Returns the explicit step, or the unit step towards `end`.
    ///
    /// Upward unit steps have the element type. Downward unit steps have the
    /// element type when it is signed, and are an `i32` (or `i64` for 32- and
    /// 64-bit unsigned types) otherwise. Endpoints of differing types, or of a
    /// type without a defined unit, get a unit step of the start's type and
    /// are rejected when expanded.
    #[must_use]
    pub fn resolved_step(&self) -> RawValue {
        if let Some(step) = self.step {
            return step;
        }
        let down = raw_less_than(&self.end, &self.start);
        unit_step(self.start, down)
    }

    /// Expands the declaration into its lazy sequence using `registry`.
    pub fn expand(&self, registry: &GeneratorRegistry) -> RangeResult<AnySequence> {
        registry.expand(self.start, self.end, self.resolved_step())
    }
}

fn raw_less_than(lhs: &RawValue, rhs: &RawValue) -> bool {
    match (lhs.as_i128(), rhs.as_i128()) {
        (Some(l), Some(r)) => l < r,
        _ => match (lhs, rhs) {
            (RawValue::Decimal(l), RawValue::Decimal(r)) => l < r,
            (RawValue::F32(l), RawValue::F32(r)) => l < r,
            (RawValue::F64(l), RawValue::F64(r)) => l < r,
            _ => false,
        },
    }
}

fn unit_step(start: RawValue, down: bool) -> RawValue {
    let sign: i8 = if down { -1 } else { 1 };
    match start {
        RawValue::I8(_) => RawValue::I8(sign),
        RawValue::I16(_) => RawValue::I16(sign.into()),
        RawValue::I32(_) => RawValue::I32(sign.into()),
        RawValue::I64(_) => RawValue::I64(sign.into()),
        RawValue::U8(_) if down => RawValue::I32(-1),
        RawValue::U16(_) if down => RawValue::I32(-1),
        RawValue::U32(_) | RawValue::U64(_) if down => RawValue::I64(-1),
        RawValue::U8(_) => RawValue::U8(1),
        RawValue::U16(_) => RawValue::U16(1),
        RawValue::U32(_) => RawValue::U32(1),
        RawValue::U64(_) => RawValue::U64(1),
        RawValue::Decimal(_) => RawValue::Decimal(Decimal::from_units(
            i64::from(sign) * Decimal::ONE.units(),
        )),
        RawValue::F32(_) => RawValue::F32(sign.into()),
        RawValue::F64(_) => RawValue::F64(sign.into()),
    }
}

#[cfg(feature = "json")]
impl RangeDeclaration {
    /// Parses a declaration from JSON.
    ///
    /// ```
    /// use stepwise::{RangeDeclaration, RawValue};
    ///
    /// let declaration = RangeDeclaration::from_json(
    ///     r#"{"start": {"type": "i64", "value": 1}, "end": {"type": "i64", "value": 10}}"#,
    /// ).unwrap();
    /// assert_eq!(declaration.resolved_step(), RawValue::I64(1));
    /// ```
    pub fn from_json(json: &str) -> RangeResult<Self> {
        serde_json::from_str(json).map_err(|e| crate::RangeError::SerializationError {
            context: e.to_string(),
        })
    }

    /// Serializes the declaration to JSON.
    pub fn to_json(&self) -> RangeResult<String> {
        serde_json::to_string(self).map_err(|e| crate::RangeError::SerializationError {
            context: e.to_string(),
        })
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
    use crate::error::RangeError;

    #[test]
    fn test_implied_step_direction() {
        let up = RangeDeclaration::new(RawValue::I16(-2), RawValue::I16(2));
        assert_eq!(up.resolved_step(), RawValue::I16(1));

        let down = RangeDeclaration::new(RawValue::I16(2), RawValue::I16(-2));
        assert_eq!(down.resolved_step(), RawValue::I16(-1));

        let same = RangeDeclaration::new(RawValue::U64(4), RawValue::U64(4));
        assert_eq!(same.resolved_step(), RawValue::U64(1));
    }

    #[test]
    fn test_implied_unsigned_down_step_is_wide() {
        let down = RangeDeclaration::new(RawValue::U8(9), RawValue::U8(0));
        assert_eq!(down.resolved_step(), RawValue::I32(-1));

        let down = RangeDeclaration::new(RawValue::U32(9), RawValue::U32(0));
        assert_eq!(down.resolved_step(), RawValue::I64(-1));
    }

    #[test]
    fn test_implied_decimal_step_is_one() {
        let down = RangeDeclaration::new(
            RawValue::Decimal(Decimal::ONE),
            RawValue::Decimal(Decimal::ZERO),
        );
        assert_eq!(
            down.resolved_step(),
            RawValue::Decimal(Decimal::from_units(-10_000))
        );
        let values: Vec<RawValue> = down.expand(&GeneratorRegistry::new()).unwrap().collect();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_explicit_step_wins() {
        let declaration =
            RangeDeclaration::new(RawValue::I64(1), RawValue::I64(10)).with_step(RawValue::I64(3));
        assert_eq!(declaration.resolved_step(), RawValue::I64(3));
        let values: Vec<RawValue> = declaration
            .expand(&GeneratorRegistry::new())
            .unwrap()
            .collect();
        assert_eq!(values, [1, 4, 7, 10].map(RawValue::I64).to_vec());
    }

    #[test]
    fn test_explicit_wrong_direction_rejected() {
        let declaration =
            RangeDeclaration::new(RawValue::U8(0), RawValue::U8(10)).with_step(RawValue::I32(-1));
        assert!(matches!(
            declaration.expand(&GeneratorRegistry::new()),
            Err(RangeError::DirectionMismatch { .. })
        ));
    }

    #[test]
    fn test_serde_shape() {
        let declaration =
            RangeDeclaration::new(RawValue::U8(250), RawValue::U8(255)).with_step(RawValue::U8(10));
        let json = serde_json::to_value(declaration).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "start": {"type": "u8", "value": 250},
                "end": {"type": "u8", "value": 255},
                "step": {"type": "u8", "value": 10},
            })
        );

        let no_step = serde_json::to_value(RangeDeclaration::new(RawValue::I8(0), RawValue::I8(1)))
            .unwrap();
        assert!(no_step.get("step").is_none());
    }
}
