//! Typed, directional steps.
//!
//! A [`Step<T>`] advances a value of element type `T` by one increment. Its
//! storage type is erased: the increment itself is kept in a
//! [`ComparableStep<T, S>`] where `S` may differ from `T`. This is what lets a
//! `u8` range count downwards, with the negative increment held as an `i32`
//! and the sum truncated back to `u8`.
//!
//! Applying a step never fails and never checks for overflow. The sum wraps at
//! the element type's width, and the range iterator detects the wrap by
//! comparing the result with the value it came from.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{RangeError, RangeResult};
use crate::value::{Numeric, NumericType, RawValue};

/// The sign of a step.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Each step moves to a larger value.
    Positive,
    /// Each step moves to a smaller value.
    Negative,
}

impl Direction {
    /// Returns the direction needed to travel from `start` to `end`, or `None`
    /// if they are equal (or unordered).
    #[must_use]
    pub fn between<T: PartialOrd>(start: &T, end: &T) -> Option<Self> {
        if start < end {
            Some(Self::Positive)
        } else if end < start {
            Some(Self::Negative)
        } else {
            None
        }
    }

    /// Returns a string representation suitable for logging.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that can move an element one step along a range.
pub trait Advance<T>: fmt::Debug + Send + Sync {
    /// Advances `current` by exactly one step using wrapping arithmetic.
    fn apply(&self, current: T) -> T;

    /// The numeric type the increment is stored as.
    fn storage_type(&self) -> NumericType;
}

/// A step increment of storage type `S` applied to elements of type `T`.
#[derive(Debug, Clone, Copy)]
pub struct ComparableStep<T, S> {
    value: S,
    advance: fn(T, S) -> T,
}

impl<T, S: Copy> ComparableStep<T, S> {
    /// Pairs an increment with the function that adds it to an element.
    ///
    /// `advance` must truncate its result to `T`'s width rather than panic.
    #[must_use]
    pub const fn new(value: S, advance: fn(T, S) -> T) -> Self {
        Self { value, advance }
    }

    /// Returns the stored increment.
    #[must_use]
    pub const fn value(&self) -> S {
        self.value
    }
}

impl<T, S> Advance<T> for ComparableStep<T, S>
where
    T: Numeric,
    S: Numeric,
{
    #[inline]
    fn apply(&self, current: T) -> T {
        (self.advance)(current, self.value)
    }

    fn storage_type(&self) -> NumericType {
        S::TYPE
    }
}

/// A validated, nonzero step for ranges over `T`.
///
/// Cloning is cheap; clones share the same increment.
#[derive(Debug, Clone)]
pub struct Step<T> {
    direction: Direction,
    advance: Arc<dyn Advance<T>>,
}

impl<T: Numeric> Step<T> {
    /// Creates a step from an increment and its advance function.
    ///
    /// The direction is taken from the sign of `value`. A zero increment is
    /// rejected with [`RangeError::ZeroStep`].
    pub fn new<S: Numeric>(value: S, advance: fn(T, S) -> T) -> RangeResult<Self> {
        let raw: RawValue = value.into();
        let direction = match raw.signum() {
            1 => Direction::Positive,
            -1 => Direction::Negative,
            _ => return Err(RangeError::ZeroStep { element: T::TYPE }),
        };
        Ok(Self {
            direction,
            advance: Arc::new(ComparableStep::new(value, advance)),
        })
    }

    /// The sign of the step.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns `true` if the step moves towards larger values.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.direction == Direction::Positive
    }

    /// Returns `true` if the step moves towards smaller values.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.direction == Direction::Negative
    }

    /// Advances `current` by one step, wrapping at the element type's width.
    #[inline]
    #[must_use]
    pub fn apply(&self, current: T) -> T {
        self.advance.apply(current)
    }

    /// The numeric type the increment is stored as.
    #[must_use]
    pub fn storage_type(&self) -> NumericType {
        self.advance.storage_type()
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

    fn add_u8_i32(current: u8, step: i32) -> u8 {
        (i32::from(current) + step) as u8
    }

    #[test]
    fn test_direction_between() {
        assert_eq!(Direction::between(&1, &2), Some(Direction::Positive));
        assert_eq!(Direction::between(&2, &1), Some(Direction::Negative));
        assert_eq!(Direction::between(&3, &3), None);
    }

    #[test]
    fn test_step_direction_from_sign() {
        let up = Step::<u8>::new(3u8, u8::wrapping_add).unwrap();
        assert!(up.is_positive());
        assert!(!up.is_negative());

        let down = Step::<u8>::new(-3i32, add_u8_i32).unwrap();
        assert!(down.is_negative());
        assert_eq!(down.direction(), Direction::Negative);
    }

    #[test]
    fn test_zero_step_rejected() {
        let err = Step::<u8>::new(0u8, u8::wrapping_add).unwrap_err();
        assert_eq!(
            err,
            RangeError::ZeroStep {
                element: NumericType::U8
            }
        );
    }

    #[test]
    fn test_storage_type_differs_from_element() {
        let step = Step::<u8>::new(-1i32, add_u8_i32).unwrap();
        assert_eq!(step.storage_type(), NumericType::I32);
        assert_eq!(step.apply(10), 9);
    }

    #[test]
    fn test_apply_truncates() {
        let up = Step::<u8>::new(10u8, u8::wrapping_add).unwrap();
        assert_eq!(up.apply(250), 4);

        let down = Step::<u8>::new(-10i32, add_u8_i32).unwrap();
        assert_eq!(down.apply(5), 251);
    }

    #[test]
    fn test_clones_share_increment() {
        let step = Step::<i64>::new(7i64, i64::wrapping_add).unwrap();
        let clone = step.clone();
        assert_eq!(step.apply(1), clone.apply(1));
    }

    #[test]
    fn test_step_is_send_and_sync() {
        fn assert_send_sync<X: Send + Sync>() {}
        assert_send_sync::<Step<u8>>();
        assert_send_sync::<Step<crate::Decimal>>();
    }
}
