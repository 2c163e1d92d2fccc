//! Convenient re-exports for common usage.
//!
//! ```rust
//! use stepwise::prelude::*;
//!
//! let values: Vec<RawValue> = GeneratorRegistry::new()
//!     .expand(RawValue::I32(0), RawValue::I32(10), RawValue::I32(5))
//!     .unwrap()
//!     .collect();
//! assert_eq!(values.len(), 3);
//! ```

// Typed generation
pub use crate::{RangeIter, Step, ValueGenerator};

// Runtime dispatch
pub use crate::{AnySequence, AnyStep, GeneratorRegistry, RegistryConfig};

// Values and declarations
pub use crate::{Decimal, NumericType, RangeDeclaration, RawValue};

// Error handling
pub use crate::{RangeError, RangeResult};
