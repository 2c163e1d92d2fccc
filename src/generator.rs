//! Typed range generators.
//!
//! [`ValueGenerator<T>`] is the generator for a single element type. It turns
//! a raw step value into a [`Step<T>`] and produces a lazy [`RangeIter<T>`]
//! over an inclusive range. The type-specific parts (how a step is added, which
//! raw step values are understood) live in the [`RangeElement`] impls in
//! [`elements`].
//!
//! # Termination
//!
//! Given `start != end`, the iterator emits `start` and then keeps applying
//! the step. It stops before emitting a value that lies beyond `end`, or one
//! that did not move away from the previous value in the direction of travel.
//! The latter only happens when the wrapping addition crossed the type's
//! boundary, so overflow ends a sequence instead of corrupting it.

use std::iter::FusedIterator;
use std::marker::PhantomData;

use tracing::{debug, trace};

use crate::error::{RangeError, RangeResult};
use crate::step::{Direction, Step};
use crate::value::{Numeric, NumericType, RawValue};

pub mod elements;

/// An element type ranges can be generated over.
pub trait RangeElement: Numeric {
    /// Adds a same-typed step to `current`, wrapping at the type's width.
    fn wrapping_step(current: Self, step: Self) -> Self;

    /// Extracts the value if `raw` is exactly of this type.
    fn from_raw(raw: RawValue) -> Option<Self>;

    /// Builds a step kept in a wider storage type, for step values this type
    /// cannot hold itself.
    ///
    /// `raw` is known to be nonzero.
    fn wide_step(raw: RawValue) -> Option<Step<Self>> {
        let _ = raw;
        None
    }

    /// Converts `raw` to this type if that is possible without loss.
    fn convert(raw: RawValue) -> Option<Self>;
}

/// The range generator for element type `T`.
///
/// Generators are zero-sized and hold no iteration state; every call to
/// [`generate_range`](Self::generate_range) returns an independent iterator.
#[derive(Debug)]
pub struct ValueGenerator<T> {
    _element: PhantomData<fn() -> T>,
}

impl<T> Clone for ValueGenerator<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ValueGenerator<T> {}

impl<T> Default for ValueGenerator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ValueGenerator<T> {
    /// Creates the generator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _element: PhantomData,
        }
    }
}

impl<T: RangeElement> ValueGenerator<T> {
    /// The element type this generator produces.
    #[must_use]
    pub fn element_type(&self) -> NumericType {
        T::TYPE
    }

    /// Validates a raw step value and wraps it into a [`Step<T>`].
    ///
    /// Tries, in order: an exact type match, the element type's wider storage
    /// fallback, and a lossless conversion into `T`. The step's direction is
    /// the sign of `raw`; whether it fits the range is checked later by
    /// [`generate_range`](Self::generate_range).
    ///
    /// # Errors
    ///
    /// [`RangeError::ZeroStep`] for a zero (or NaN) step,
    /// [`RangeError::UnsupportedStep`] if no path accepts `raw`.
    pub fn try_create_step(&self, raw: RawValue) -> RangeResult<Step<T>> {
        self.try_create_step_with(raw, true)
    }

    pub(crate) fn try_create_step_with(
        &self,
        raw: RawValue,
        wide_steps: bool,
    ) -> RangeResult<Step<T>> {
        if raw.is_zero() {
            debug!(element = %T::TYPE, step = %raw, "rejected zero step");
            return Err(RangeError::ZeroStep { element: T::TYPE });
        }

        if let Some(value) = T::from_raw(raw) {
            trace!(element = %T::TYPE, step = %raw, "step matches element type");
            return Step::new(value, T::wrapping_step);
        }

        if wide_steps {
            if let Some(step) = T::wide_step(raw) {
                trace!(
                    element = %T::TYPE,
                    step = %raw,
                    storage = %step.storage_type(),
                    "step kept in wider storage"
                );
                return Ok(step);
            }
        }

        if let Some(value) = T::convert(raw) {
            trace!(element = %T::TYPE, step = %raw, "step converted to element type");
            return Step::new(value, T::wrapping_step);
        }

        debug!(element = %T::TYPE, step = %raw, "unsupported step");
        Err(RangeError::UnsupportedStep {
            element: T::TYPE,
            step: raw,
        })
    }

    /// Returns a lazy iterator over the inclusive range from `start` to `end`.
    ///
    /// # Errors
    ///
    /// [`RangeError::DirectionMismatch`] if `start != end` and the step points
    /// away from `end`. Nothing is produced in that case.
    pub fn generate_range(&self, start: T, end: T, step: &Step<T>) -> RangeResult<RangeIter<T>> {
        if let Some(needed) = Direction::between(&start, &end) {
            if needed != step.direction() {
                debug!(
                    element = %T::TYPE,
                    start = ?start,
                    end = ?end,
                    direction = %step.direction(),
                    "step points away from the end of the range"
                );
                return Err(RangeError::DirectionMismatch {
                    start: start.into(),
                    end: end.into(),
                    direction: step.direction(),
                });
            }
        }
        Ok(RangeIter::new(start, end, step.clone()))
    }

    /// Creates the step and the range in one call.
    pub fn generate(&self, start: T, end: T, raw_step: RawValue) -> RangeResult<RangeIter<T>> {
        let step = self.try_create_step(raw_step)?;
        self.generate_range(start, end, &step)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor<T> {
    Start,
    At(T),
    Done,
}

/// Lazy iterator over an inclusive, stepped range.
///
/// Each call to `next` computes at most one step. A clone continues
/// independently from the clone's position.
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct RangeIter<T> {
    start: T,
    end: T,
    step: Step<T>,
    cursor: Cursor<T>,
}

impl<T: RangeElement> RangeIter<T> {
    fn new(start: T, end: T, step: Step<T>) -> Self {
        Self {
            start,
            end,
            step,
            cursor: Cursor::Start,
        }
    }

    /// The first value of the range.
    #[must_use]
    pub fn start(&self) -> T {
        self.start
    }

    /// The bound the range stops at.
    #[must_use]
    pub fn end(&self) -> T {
        self.end
    }

    /// The step between consecutive values.
    #[must_use]
    pub fn step(&self) -> &Step<T> {
        &self.step
    }

    fn successor(&self, current: T) -> Option<T> {
        let next = self.step.apply(current);
        let (past_end, wrapped) = if self.start < self.end {
            (self.end < next, next <= current)
        } else {
            (next < self.end, next >= current)
        };

        if past_end || wrapped {
            trace!(
                element = %T::TYPE,
                last = ?current,
                wrapped,
                "range exhausted"
            );
            None
        } else {
            Some(next)
        }
    }
}

impl<T: RangeElement> Iterator for RangeIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self.cursor {
            Cursor::Start => {
                self.cursor = if self.start == self.end {
                    Cursor::Done
                } else {
                    Cursor::At(self.start)
                };
                Some(self.start)
            }
            Cursor::At(current) => {
                let next = self.successor(current);
                self.cursor = next.map_or(Cursor::Done, Cursor::At);
                next
            }
            Cursor::Done => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.cursor {
            Cursor::Start if self.start == self.end => (1, Some(1)),
            Cursor::Start => (1, None),
            Cursor::At(_) => (0, None),
            Cursor::Done => (0, Some(0)),
        }
    }
}

impl<T: RangeElement> FusedIterator for RangeIter<T> {}

#[cfg(test)]
#[allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use crate::Decimal;

    fn collect<T: RangeElement>(start: T, end: T, step: impl Into<RawValue>) -> Vec<T> {
        ValueGenerator::<T>::new()
            .generate(start, end, step.into())
            .unwrap()
            .collect()
    }

    #[test]
    fn test_i64_exact_step() {
        assert_eq!(collect(1i64, 10, 3i64), vec![1, 4, 7, 10]);
    }

    #[test]
    fn test_last_value_is_largest_reachable() {
        assert_eq!(collect(0i32, 10, 4i32), vec![0, 4, 8]);
        assert_eq!(collect(10i32, 0, -4i32), vec![10, 6, 2]);
    }

    #[test]
    fn test_degenerate_range_ignores_step_sign() {
        assert_eq!(collect(7u8, 7, 1u8), vec![7]);
        assert_eq!(collect(7u8, 7, -1i32), vec![7]);
        assert_eq!(collect(-3i16, -3, 5i16), vec![-3]);
    }

    #[test]
    fn test_direction_mismatch_fails_before_iteration() {
        let generator = ValueGenerator::<u8>::new();
        let step = generator.try_create_step(RawValue::I32(-1)).unwrap();
        let err = generator.generate_range(0, 10, &step).unwrap_err();
        assert_eq!(
            err,
            RangeError::DirectionMismatch {
                start: RawValue::U8(0),
                end: RawValue::U8(10),
                direction: Direction::Negative,
            }
        );

        let up = generator.try_create_step(RawValue::U8(1)).unwrap();
        assert!(generator.generate_range(10, 0, &up).is_err());
    }

    #[test]
    fn test_u8_ascending_overflow_stops() {
        // 250 + 10 wraps to 4
        assert_eq!(collect(250u8, 255, 10u8), vec![250]);
        assert_eq!(collect(250u8, 255, 5u8), vec![250, 255]);
    }

    #[test]
    fn test_u8_descending_overflow_stops() {
        // 5 - 10 wraps to 251
        let generator = ValueGenerator::<u8>::new();
        let step = generator.try_create_step(RawValue::I32(-10)).unwrap();
        assert_eq!(step.storage_type(), NumericType::I32);
        let values: Vec<u8> = generator.generate_range(5, 0, &step).unwrap().collect();
        assert_eq!(values, vec![5]);
    }

    #[test]
    fn test_u8_descending_full_range() {
        let values = collect(255u8, 0, -1i32);
        assert_eq!(values.len(), 256);
        assert_eq!(values.first(), Some(&255));
        assert_eq!(values.last(), Some(&0));
    }

    #[test]
    fn test_signed_boundaries() {
        assert_eq!(collect(i64::MAX - 2, i64::MAX, 2i64), vec![i64::MAX - 2, i64::MAX]);
        assert_eq!(collect(i64::MAX - 2, i64::MAX, 3i64), vec![i64::MAX - 2]);
        assert_eq!(collect(i8::MIN + 1, i8::MIN, -1i8), vec![i8::MIN + 1, i8::MIN]);
        assert_eq!(collect(-100i8, i8::MIN, -100i8), vec![-100]);
    }

    #[test]
    fn test_u64_descending_with_i64_storage() {
        assert_eq!(collect(u64::MAX, u64::MAX - 4, -2i64), vec![u64::MAX, u64::MAX - 2, u64::MAX - 4]);
        assert_eq!(collect(3u64, 0, -2i64), vec![3, 1]);
    }

    #[test]
    fn test_decimal_range() {
        let start = Decimal::from_units(0);
        let end = Decimal::ONE;
        let values = collect(start, end, Decimal::from_units(2_500));
        assert_eq!(values.len(), 5);
        assert_eq!(values.last(), Some(&Decimal::ONE));
    }

    #[test]
    fn test_decimal_overflow_stops() {
        let start = Decimal::from_units(i64::MAX - 1);
        let values = collect(start, Decimal::MAX, Decimal::from_units(2));
        assert_eq!(values, vec![start]);
    }

    #[test]
    fn test_fused_after_exhaustion() {
        let mut iter = ValueGenerator::<u16>::new()
            .generate(1, 2, RawValue::U16(1))
            .unwrap();
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next(), Some(2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.size_hint(), (0, Some(0)));
    }

    #[test]
    fn test_clone_resumes_independently() {
        let mut iter = ValueGenerator::<i32>::new()
            .generate(0, 5, RawValue::I32(1))
            .unwrap();
        iter.next();
        iter.next();
        let rest: Vec<i32> = iter.clone().collect();
        assert_eq!(rest, vec![2, 3, 4, 5]);
        assert_eq!(iter.next(), Some(2));
    }

    #[test]
    fn test_zero_step_rejected() {
        let err = ValueGenerator::<u32>::new()
            .try_create_step(RawValue::U32(0))
            .unwrap_err();
        assert_eq!(
            err,
            RangeError::ZeroStep {
                element: NumericType::U32
            }
        );
    }

    #[test]
    fn test_wide_steps_can_be_disabled() {
        let generator = ValueGenerator::<u8>::new();
        assert!(generator.try_create_step_with(RawValue::I32(-1), false).is_err());
        // positive i32 still converts losslessly
        let step = generator.try_create_step_with(RawValue::I32(2), false).unwrap();
        assert_eq!(step.storage_type(), NumericType::U8);
    }
}

#[cfg(test)]
#[allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: a range that cannot overflow has the closed-form length
        /// and consecutive values differ by exactly the step.
        #[test]
        fn prop_length_matches_closed_form(
            start in -10_000i32..10_000,
            span in 0i32..10_000,
            step in 1i32..500,
            descending in any::<bool>(),
        ) {
            let (end, step) = if descending { (start - span, -step) } else { (start + span, step) };
            let values: Vec<i32> = ValueGenerator::<i32>::new()
                .generate(start, end, RawValue::I32(step))
                .unwrap()
                .collect();

            let expected = if span == 0 { 1 } else { (span / step.abs()) as usize + 1 };
            prop_assert_eq!(values.len(), expected);
            prop_assert_eq!(values[0], start);
            for pair in values.windows(2) {
                prop_assert_eq!(pair[1] - pair[0], step);
            }
        }

        /// Property: every emitted u8 lies within the inclusive bounds and the
        /// sequence is strictly monotonic, for any start, end and step.
        #[test]
        fn prop_u8_bounded_and_monotonic(start in any::<u8>(), end in any::<u8>(), magnitude in 1i32..=255) {
            let step = if end < start { -magnitude } else { magnitude };
            let values: Vec<u8> = ValueGenerator::<u8>::new()
                .generate(start, end, RawValue::I32(step))
                .unwrap()
                .collect();

            let (low, high) = (start.min(end), start.max(end));
            prop_assert_eq!(values[0], start);
            prop_assert!(values.iter().all(|v| (low..=high).contains(v)));
            for pair in values.windows(2) {
                if step > 0 {
                    prop_assert!(pair[0] < pair[1]);
                } else {
                    prop_assert!(pair[0] > pair[1]);
                }
                prop_assert_eq!(i32::from(pair[1]) - i32::from(pair[0]), step);
            }
        }

        /// Property: the same request twice yields identical sequences.
        #[test]
        fn prop_repeatable(start in any::<i16>(), end in any::<i16>(), magnitude in 1i16..2000) {
            let step = if end < start { -magnitude } else { magnitude };
            let generator = ValueGenerator::<i16>::new();
            let step = generator.try_create_step(RawValue::I16(step)).unwrap();
            let first: Vec<i16> = generator.generate_range(start, end, &step).unwrap().collect();
            let second: Vec<i16> = generator.generate_range(start, end, &step).unwrap().collect();
            prop_assert_eq!(first, second);
        }
    }
}
