//! Runtime selection of typed generators.
//!
//! The set of element types is closed, so dispatch is a set of enums with one
//! variant per type rather than trait objects:
//!
//! - [`AnyGenerator`] wraps the [`ValueGenerator<T>`] for one type,
//! - [`AnyStep`] wraps the [`Step<T>`] it creates,
//! - [`AnySequence`] wraps the resulting [`RangeIter<T>`] and yields
//!   [`RawValue`]s.
//!
//! [`GeneratorRegistry`] is the registration table mapping a [`NumericType`]
//! to its generator.
//!
//! # Example
//!
//! ```
//! use stepwise::{GeneratorRegistry, RawValue};
//!
//! let registry = GeneratorRegistry::new();
//! let values: Vec<RawValue> = registry
//!     .expand(RawValue::U8(10), RawValue::U8(0), RawValue::I32(-5))
//!     .unwrap()
//!     .collect();
//! assert_eq!(values, [RawValue::U8(10), RawValue::U8(5), RawValue::U8(0)]);
//! ```

use std::iter::FusedIterator;

use smallvec::SmallVec;
use tracing::debug;

use crate::config::RegistryConfig;
use crate::decimal::Decimal;
use crate::error::{RangeError, RangeResult};
use crate::generator::{RangeElement, RangeIter, ValueGenerator};
use crate::step::{Direction, Step};
use crate::value::{NumericType, RawValue};

macro_rules! define_dispatch {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        /// The generator for one runtime-selected element type.
        #[derive(Debug, Clone, Copy)]
        pub enum AnyGenerator {
            $(
                #[doc = concat!("Generator for `", stringify!($ty), "` ranges.")]
                $variant(ValueGenerator<$ty>),
            )*
        }

        /// A validated step for one runtime-selected element type.
        #[derive(Debug, Clone)]
        pub enum AnyStep {
            $(
                #[doc = concat!("Step for `", stringify!($ty), "` ranges.")]
                $variant(Step<$ty>),
            )*
        }

        /// A lazy range over one runtime-selected element type.
        #[derive(Debug, Clone)]
        #[must_use = "iterators are lazy and do nothing unless consumed"]
        pub enum AnySequence {
            $(
                #[doc = concat!("Range of `", stringify!($ty), "` values.")]
                $variant(RangeIter<$ty>),
            )*
        }

        impl AnyGenerator {
            /// Returns the generator for `ty`, or `None` if no generator exists
            /// for that type.
            #[must_use]
            pub fn for_type(ty: NumericType) -> Option<Self> {
                match ty {
                    $(NumericType::$variant => Some(Self::$variant(ValueGenerator::new())),)*
                    _ => None,
                }
            }

            /// The element type this generator produces.
            #[must_use]
            pub fn element_type(&self) -> NumericType {
                match self {
                    $(Self::$variant(generator) => generator.element_type(),)*
                }
            }

            pub(crate) fn try_create_step_with(
                &self,
                raw: RawValue,
                wide_steps: bool,
            ) -> RangeResult<AnyStep> {
                match self {
                    $(
                        Self::$variant(generator) => generator
                            .try_create_step_with(raw, wide_steps)
                            .map(AnyStep::$variant),
                    )*
                }
            }

            /// Returns a lazy sequence over the inclusive range from `start`
            /// to `end`.
            ///
            /// # Errors
            ///
            /// [`RangeError::MismatchedEndpoints`] if an endpoint is not of
            /// this generator's element type, [`RangeError::MismatchedStep`]
            /// if `step` was created for another type, and
            /// [`RangeError::DirectionMismatch`] as for
            /// [`ValueGenerator::generate_range`].
            pub fn generate_range(
                &self,
                start: RawValue,
                end: RawValue,
                step: &AnyStep,
            ) -> RangeResult<AnySequence> {
                match (self, step) {
                    $(
                        (Self::$variant(generator), AnyStep::$variant(step)) => {
                            let (start, end) = endpoints::<$ty>(start, end)?;
                            generator
                                .generate_range(start, end, step)
                                .map(AnySequence::$variant)
                        }
                    )*
                    _ => Err(RangeError::MismatchedStep {
                        element: self.element_type(),
                        step_element: step.element_type(),
                    }),
                }
            }
        }

        impl AnyStep {
            /// The element type this step advances.
            #[must_use]
            pub fn element_type(&self) -> NumericType {
                match self {
                    $(Self::$variant(_) => NumericType::$variant,)*
                }
            }

            /// The sign of the step.
            #[must_use]
            pub fn direction(&self) -> Direction {
                match self {
                    $(Self::$variant(step) => step.direction(),)*
                }
            }

            /// The numeric type the increment is stored as.
            #[must_use]
            pub fn storage_type(&self) -> NumericType {
                match self {
                    $(Self::$variant(step) => step.storage_type(),)*
                }
            }
        }

        impl AnySequence {
            /// The element type of the values produced.
            #[must_use]
            pub fn element_type(&self) -> NumericType {
                match self {
                    $(Self::$variant(_) => NumericType::$variant,)*
                }
            }
        }

        impl Iterator for AnySequence {
            type Item = RawValue;

            fn next(&mut self) -> Option<RawValue> {
                match self {
                    $(Self::$variant(iter) => iter.next().map(RawValue::from),)*
                }
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                match self {
                    $(Self::$variant(iter) => iter.size_hint(),)*
                }
            }
        }
    };
}

define_dispatch!(
    I8 => i8,
    I16 => i16,
    I32 => i32,
    I64 => i64,
    U8 => u8,
    U16 => u16,
    U32 => u32,
    U64 => u64,
    Decimal => Decimal,
);

impl FusedIterator for AnySequence {}

impl AnyGenerator {
    /// Validates a raw step value for this generator's element type.
    ///
    /// See [`ValueGenerator::try_create_step`].
    pub fn try_create_step(&self, raw: RawValue) -> RangeResult<AnyStep> {
        self.try_create_step_with(raw, true)
    }
}

impl AnyStep {
    /// Returns `true` if the step moves towards larger values.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.direction() == Direction::Positive
    }

    /// Returns `true` if the step moves towards smaller values.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.direction() == Direction::Negative
    }
}

fn endpoints<T: RangeElement>(start: RawValue, end: RawValue) -> RangeResult<(T, T)> {
    match (T::from_raw(start), T::from_raw(end)) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(RangeError::MismatchedEndpoints {
            element: T::TYPE,
            start: start.numeric_type(),
            end: end.numeric_type(),
        }),
    }
}

/// The registration table of generators, one per enabled element type.
///
/// Built once from a [`RegistryConfig`] and then only read, so a registry can
/// be shared freely between threads.
#[derive(Debug, Clone)]
pub struct GeneratorRegistry {
    generators: SmallVec<[AnyGenerator; 10]>,
    wide_unsigned_steps: bool,
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorRegistry {
    /// Creates a registry with every supported element type.
    #[must_use]
    pub fn new() -> Self {
        Self::build(&RegistryConfig::default())
    }

    /// Creates a registry from a configuration.
    ///
    /// # Errors
    ///
    /// [`RangeError::InvalidConfig`] if the configuration fails
    /// [`RegistryConfig::validate`].
    pub fn with_config(config: RegistryConfig) -> RangeResult<Self> {
        config.validate()?;
        Ok(Self::build(&config))
    }

    fn build(config: &RegistryConfig) -> Self {
        Self {
            generators: config
                .element_types
                .iter()
                .copied()
                .filter_map(AnyGenerator::for_type)
                .collect(),
            wide_unsigned_steps: config.wide_unsigned_steps,
        }
    }

    /// Looks up the generator for `ty`.
    ///
    /// # Errors
    ///
    /// [`RangeError::UnsupportedElementType`] if `ty` is not registered.
    pub fn generator_for(&self, ty: NumericType) -> RangeResult<AnyGenerator> {
        self.generators
            .iter()
            .find(|generator| generator.element_type() == ty)
            .copied()
            .ok_or_else(|| {
                debug!(element = %ty, "no generator registered");
                RangeError::UnsupportedElementType { element: ty }
            })
    }

    /// Returns `true` if a generator is registered for `ty`.
    #[must_use]
    pub fn supports(&self, ty: NumericType) -> bool {
        self.generators
            .iter()
            .any(|generator| generator.element_type() == ty)
    }

    /// The registered element types, in registration order.
    pub fn registered_types(&self) -> impl Iterator<Item = NumericType> + '_ {
        self.generators.iter().map(AnyGenerator::element_type)
    }

    /// Validates `raw` as a step for ranges of `ty`.
    ///
    /// Honors [`RegistryConfig::wide_unsigned_steps`].
    pub fn try_create_step(&self, ty: NumericType, raw: RawValue) -> RangeResult<AnyStep> {
        self.generator_for(ty)?
            .try_create_step_with(raw, self.wide_unsigned_steps)
    }

    /// Expands a range declaration into its lazy sequence.
    ///
    /// The element type is the runtime type of `start`. This performs the
    /// whole contract: dispatch, step validation, and the direction check.
    /// Every error surfaces here, before any value is produced.
    pub fn expand(
        &self,
        start: RawValue,
        end: RawValue,
        raw_step: RawValue,
    ) -> RangeResult<AnySequence> {
        let element = start.numeric_type();
        if end.numeric_type() != element {
            debug!(start = %start, end = %end, "range endpoints disagree on type");
            return Err(RangeError::MismatchedEndpoints {
                element,
                start: element,
                end: end.numeric_type(),
            });
        }

        let generator = self.generator_for(element)?;
        let step = generator.try_create_step_with(raw_step, self.wide_unsigned_steps)?;
        generator.generate_range(start, end, &step)
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
    fn test_every_generator_type_dispatches() {
        let registry = GeneratorRegistry::new();
        for ty in crate::config::GENERATOR_TYPES {
            assert_eq!(registry.generator_for(ty).unwrap().element_type(), ty);
        }
        assert_eq!(registry.registered_types().count(), 9);
    }

    #[test]
    fn test_floats_are_unsupported() {
        let registry = GeneratorRegistry::new();
        assert_eq!(
            registry.generator_for(NumericType::F32).unwrap_err(),
            RangeError::UnsupportedElementType {
                element: NumericType::F32
            }
        );
        assert!(AnyGenerator::for_type(NumericType::F64).is_none());
        assert!(registry
            .expand(RawValue::F64(0.0), RawValue::F64(1.0), RawValue::F64(0.5))
            .is_err());
    }

    #[test]
    fn test_expand_i64() {
        let values: Vec<RawValue> = GeneratorRegistry::new()
            .expand(RawValue::I64(1), RawValue::I64(10), RawValue::I64(3))
            .unwrap()
            .collect();
        assert_eq!(
            values,
            [1, 4, 7, 10].map(RawValue::I64).to_vec()
        );
    }

    #[test]
    fn test_expand_rejects_mixed_endpoints() {
        let err = GeneratorRegistry::new()
            .expand(RawValue::U8(1), RawValue::I32(10), RawValue::U8(1))
            .unwrap_err();
        assert_eq!(
            err,
            RangeError::MismatchedEndpoints {
                element: NumericType::U8,
                start: NumericType::U8,
                end: NumericType::I32
            }
        );
    }

    #[test]
    fn test_generate_range_checks_endpoint_types() {
        let generator = AnyGenerator::for_type(NumericType::U16).unwrap();
        let step = generator.try_create_step(RawValue::U16(1)).unwrap();
        let err = generator
            .generate_range(RawValue::I32(0), RawValue::I32(5), &step)
            .unwrap_err();
        assert_eq!(
            err,
            RangeError::MismatchedEndpoints {
                element: NumericType::U16,
                start: NumericType::I32,
                end: NumericType::I32
            }
        );
    }

    #[test]
    fn test_mismatched_endpoints_name_generator_type() {
        let generator = AnyGenerator::for_type(NumericType::I8).unwrap();
        let step = generator.try_create_step(RawValue::I8(1)).unwrap();
        let err = generator
            .generate_range(RawValue::I8(0), RawValue::I64(5), &step)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Range endpoints must both be i8, got i8 and i64"
        );
    }

    #[test]
    fn test_step_from_other_generator_rejected() {
        let u8_gen = AnyGenerator::for_type(NumericType::U8).unwrap();
        let i8_gen = AnyGenerator::for_type(NumericType::I8).unwrap();
        let step = i8_gen.try_create_step(RawValue::I8(1)).unwrap();
        let err = u8_gen
            .generate_range(RawValue::U8(0), RawValue::U8(3), &step)
            .unwrap_err();
        assert_eq!(
            err,
            RangeError::MismatchedStep {
                element: NumericType::U8,
                step_element: NumericType::I8
            }
        );
    }

    #[test]
    fn test_restricted_registry() {
        let registry = GeneratorRegistry::with_config(RegistryConfig::signed()).unwrap();
        assert!(!registry.supports(NumericType::U8));
        assert!(registry.supports(NumericType::Decimal));
        assert!(matches!(
            registry.expand(RawValue::U8(0), RawValue::U8(1), RawValue::U8(1)),
            Err(RangeError::UnsupportedElementType { .. })
        ));
    }

    #[test]
    fn test_wide_unsigned_steps_toggle() {
        let config = RegistryConfig {
            wide_unsigned_steps: false,
            ..RegistryConfig::default()
        };
        let registry = GeneratorRegistry::with_config(config).unwrap();
        assert!(matches!(
            registry.expand(RawValue::U8(10), RawValue::U8(0), RawValue::I32(-1)),
            Err(RangeError::UnsupportedStep { .. })
        ));
        assert!(GeneratorRegistry::new()
            .expand(RawValue::U8(10), RawValue::U8(0), RawValue::I32(-1))
            .is_ok());
    }

    #[test]
    fn test_any_step_reports_storage() {
        let step = GeneratorRegistry::new()
            .try_create_step(NumericType::U8, RawValue::I32(-1))
            .unwrap();
        assert_eq!(step.element_type(), NumericType::U8);
        assert_eq!(step.storage_type(), NumericType::I32);
        assert!(step.is_negative());
    }

    #[test]
    fn test_sequence_reports_element_type() {
        let seq = GeneratorRegistry::new()
            .expand(
                RawValue::Decimal(Decimal::ZERO),
                RawValue::Decimal(Decimal::ONE),
                RawValue::I32(1),
            )
            .unwrap();
        assert_eq!(seq.element_type(), NumericType::Decimal);
        assert_eq!(seq.count(), 2);
    }
}
