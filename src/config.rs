//! Configuration for the generator registry.
//!
//! | Preset | Registered types | Wide unsigned steps |
//! |--------|------------------|---------------------|
//! | `all()` / `default()` | all integers and `decimal` | yes |
//! | `integers()` | all integers | yes |
//! | `signed()` | signed integers and `decimal` | n/a |
//!
//! # Example
//!
//! ```
//! use stepwise::{GeneratorRegistry, NumericType, RegistryConfig};
//!
//! let registry = GeneratorRegistry::with_config(RegistryConfig::integers()).unwrap();
//! assert!(registry.supports(NumericType::U8));
//! assert!(!registry.supports(NumericType::Decimal));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{RangeError, RangeResult};
use crate::value::NumericType;

/// Every element type a generator exists for.
pub(crate) const GENERATOR_TYPES: [NumericType; 9] = [
    NumericType::I8,
    NumericType::I16,
    NumericType::I32,
    NumericType::I64,
    NumericType::U8,
    NumericType::U16,
    NumericType::U32,
    NumericType::U64,
    NumericType::Decimal,
];

/// Configuration for a [`GeneratorRegistry`].
///
/// # Forward Compatibility
///
/// New fields may be added in future versions. Use the
/// `..RegistryConfig::default()` pattern when constructing instances.
///
/// [`GeneratorRegistry`]: crate::GeneratorRegistry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use = "RegistryConfig has no effect unless passed to GeneratorRegistry::with_config()"]
#[serde(default)]
pub struct RegistryConfig {
    /// Element types that get a generator. Requests for any other type fail
    /// with [`RangeError::UnsupportedElementType`].
    ///
    /// Default: all integer types and `decimal`
    pub element_types: SmallVec<[NumericType; 10]>,

    /// Whether unsigned types accept negative steps held in a wider signed
    /// type. Without it, unsigned ranges can only count upwards.
    ///
    /// Default: `true`
    pub wide_unsigned_steps: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            element_types: GENERATOR_TYPES.iter().copied().collect(),
            wide_unsigned_steps: true,
        }
    }
}

impl RegistryConfig {
    /// Creates a new `RegistryConfig` with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every supported element type. Same as the default.
    pub fn all() -> Self {
        Self::default()
    }

    /// Only the fixed-width integer types.
    pub fn integers() -> Self {
        Self {
            element_types: GENERATOR_TYPES
                .iter()
                .copied()
                .filter(|ty| *ty != NumericType::Decimal)
                .collect(),
            ..Self::default()
        }
    }

    /// Only the signed types, including `decimal`.
    pub fn signed() -> Self {
        Self {
            element_types: GENERATOR_TYPES
                .iter()
                .copied()
                .filter(|ty| !ty.is_unsigned_integer())
                .collect(),
            ..Self::default()
        }
    }

    /// Checks that the configuration describes a usable registry.
    ///
    /// # Errors
    ///
    /// [`RangeError::InvalidConfig`] if no type is listed, a type is listed
    /// twice, or a type without a generator (a float) is listed.
    pub fn validate(&self) -> RangeResult<()> {
        if self.element_types.is_empty() {
            return Err(RangeError::InvalidConfig {
                info: "element_types must list at least one type".to_owned(),
            });
        }

        for (index, ty) in self.element_types.iter().enumerate() {
            if !GENERATOR_TYPES.contains(ty) {
                return Err(RangeError::InvalidConfig {
                    info: format!("no range generator exists for {}", ty),
                });
            }
            if self.element_types[..index].contains(ty) {
                return Err(RangeError::InvalidConfig {
                    info: format!("{} is listed more than once", ty),
                });
            }
        }

        Ok(())
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
    use smallvec::smallvec;

    #[test]
    fn test_default_lists_every_generator_type() {
        let config = RegistryConfig::default();
        assert_eq!(config.element_types.as_slice(), &GENERATOR_TYPES);
        assert!(config.wide_unsigned_steps);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        for config in [
            RegistryConfig::new(),
            RegistryConfig::all(),
            RegistryConfig::integers(),
            RegistryConfig::signed(),
        ] {
            assert!(config.validate().is_ok(), "{config:?}");
        }
        assert_eq!(RegistryConfig::integers().element_types.len(), 8);
        assert!(!RegistryConfig::signed()
            .element_types
            .contains(&NumericType::U8));
    }

    #[test]
    fn test_validate_rejects_floats() {
        let config = RegistryConfig {
            element_types: smallvec![NumericType::I32, NumericType::F64],
            ..RegistryConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, RangeError::InvalidConfig { ref info } if info.contains("f64")));
    }

    #[test]
    fn test_validate_rejects_duplicates_and_empty() {
        let duplicate = RegistryConfig {
            element_types: smallvec![NumericType::U8, NumericType::U8],
            ..RegistryConfig::default()
        };
        assert!(duplicate.validate().is_err());

        let empty = RegistryConfig {
            element_types: SmallVec::new(),
            ..RegistryConfig::default()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: RegistryConfig =
            serde_json::from_str(r#"{"element_types": ["u8", "i64"]}"#).unwrap();
        assert_eq!(
            config.element_types.as_slice(),
            &[NumericType::U8, NumericType::I64]
        );
        assert!(config.wide_unsigned_steps);
    }
}
