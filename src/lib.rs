//! # Stepwise
//!
//! Stepwise generates the values of an inclusive, stepped numeric range, for
//! expanding a parameterized test into one case per value ("every value from
//! 0 to 100, step 5").
//!
//! Ranges are produced lazily, one value per call to `next`, and always end:
//! a step that would carry the value past the end of the range, or past the
//! limits of its type, ends the sequence instead of wrapping around. Every
//! error is reported before the first value is produced.
//!
//! # Two calls
//!
//! Generating a range is a two-step contract:
//!
//! 1. [`try_create_step`](ValueGenerator::try_create_step) validates the raw
//!    step value for the element type and returns a [`Step`],
//! 2. [`generate_range`](ValueGenerator::generate_range) checks that the step
//!    points from `start` towards `end` and returns the [`RangeIter`].
//!
//! ```
//! use stepwise::{RawValue, ValueGenerator};
//!
//! let generator = ValueGenerator::<i64>::new();
//! let step = generator.try_create_step(RawValue::I64(3)).unwrap();
//! let values: Vec<i64> = generator.generate_range(1, 10, &step).unwrap().collect();
//! assert_eq!(values, [1, 4, 7, 10]);
//!
//! // 250 + 10 would wrap around to 4, so the range ends after 250
//! let values: Vec<u8> = ValueGenerator::<u8>::new()
//!     .generate(250, 255, RawValue::U8(10))
//!     .unwrap()
//!     .collect();
//! assert_eq!(values, [250]);
//! ```
//!
//! When the element type is only known at runtime, [`GeneratorRegistry`]
//! selects the generator from the [`NumericType`] of the endpoints:
//!
//! ```
//! use stepwise::{GeneratorRegistry, RangeError, RawValue};
//!
//! let registry = GeneratorRegistry::new();
//! let err = registry
//!     .expand(RawValue::U8(0), RawValue::U8(10), RawValue::I32(-1))
//!     .unwrap_err();
//! assert!(matches!(err, RangeError::DirectionMismatch { .. }));
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub use config::RegistryConfig;
pub use decimal::{Decimal, ParseDecimalError};
pub use declaration::RangeDeclaration;
pub use dispatch::{AnyGenerator, AnySequence, AnyStep, GeneratorRegistry};
pub use error::{RangeError, RangeResult};
pub use generator::{RangeElement, RangeIter, ValueGenerator};
pub use step::{Advance, ComparableStep, Direction, Step};
pub use value::{Numeric, NumericType, RawValue};

pub mod config;
pub mod decimal;
pub mod declaration;
pub mod dispatch;
#[doc(hidden)]
pub mod error;
pub mod generator;
pub mod prelude;
pub mod step;
pub mod value;
