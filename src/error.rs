use std::error::Error;
use std::fmt;
use std::fmt::Display;

use crate::step::Direction;
use crate::value::{NumericType, RawValue};

/// This enum contains all error messages this library can return.
///
/// Every error is raised while a range declaration is validated, before the
/// first element is produced. A sequence that was handed out successfully can
/// always be iterated to completion. Overflow is never an error: it ends the
/// sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeError {
    /// The step points away from the end of the range.
    DirectionMismatch {
        /// The first value of the range.
        start: RawValue,
        /// The last value of the range.
        end: RawValue,
        /// The direction of the rejected step.
        direction: Direction,
    },
    /// The step value cannot be represented as a step for the element type.
    UnsupportedStep {
        /// The element type of the range.
        element: NumericType,
        /// The rejected step value.
        step: RawValue,
    },
    /// No generator is registered for the element type.
    UnsupportedElementType {
        /// The requested element type.
        element: NumericType,
    },
    /// The start and end of a range do not share the generator's element type.
    MismatchedEndpoints {
        /// The element type the endpoints were expected to have.
        element: NumericType,
        /// The type of the start value.
        start: NumericType,
        /// The type of the end value.
        end: NumericType,
    },
    /// A step created for one element type was used with another.
    MismatchedStep {
        /// The element type of the range.
        element: NumericType,
        /// The element type the step was created for.
        step_element: NumericType,
    },
    /// A step of zero has no direction.
    ZeroStep {
        /// The element type of the range.
        element: NumericType,
    },
    /// A [`RegistryConfig`] failed validation.
    ///
    /// [`RegistryConfig`]: crate::RegistryConfig
    InvalidConfig {
        /// Further specifies why the configuration was invalid.
        info: String,
    },
    /// Serialization or deserialization of a declaration failed.
    SerializationError {
        /// A description of what failed to serialize/deserialize.
        context: String,
    },
}

impl Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::DirectionMismatch {
                start,
                end,
                direction,
            } => {
                write!(
                    f,
                    "Step must be in the direction of the end: range {} to {} with a {} step",
                    start, end, direction
                )
            }
            RangeError::UnsupportedStep { element, step } => {
                write!(f, "Step {} is not a valid step for {} ranges", step, element)
            }
            RangeError::UnsupportedElementType { element } => {
                write!(f, "No range generator is registered for {}", element)
            }
            RangeError::MismatchedEndpoints {
                element,
                start,
                end,
            } => {
                write!(
                    f,
                    "Range endpoints must both be {}, got {} and {}",
                    element, start, end
                )
            }
            RangeError::MismatchedStep {
                element,
                step_element,
            } => {
                write!(
                    f,
                    "Step created for {} ranges cannot be used with a {} range",
                    step_element, element
                )
            }
            RangeError::ZeroStep { element } => {
                write!(f, "Step for {} range must not be zero", element)
            }
            RangeError::InvalidConfig { info } => {
                write!(f, "Invalid registry configuration: {}", info)
            }
            RangeError::SerializationError { context } => {
                write!(f, "Serialization error: {}", context)
            }
        }
    }
}

impl Error for RangeError {}

/// Convenience alias for results returned by this crate.
pub type RangeResult<T> = Result<T, RangeError>;

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
    fn test_direction_mismatch_message() {
        let err = RangeError::DirectionMismatch {
            start: RawValue::U8(0),
            end: RawValue::U8(10),
            direction: Direction::Negative,
        };
        assert_eq!(
            err.to_string(),
            "Step must be in the direction of the end: range 0u8 to 10u8 with a negative step"
        );
    }

    #[test]
    fn test_unsupported_messages_name_the_type() {
        let err = RangeError::UnsupportedStep {
            element: NumericType::U8,
            step: RawValue::I64(-1),
        };
        assert!(err.to_string().contains("-1i64"));
        assert!(err.to_string().contains("u8"));

        let err = RangeError::UnsupportedElementType {
            element: NumericType::F64,
        };
        assert!(err.to_string().contains("f64"));
    }

    #[test]
    fn test_mismatched_endpoints_message_names_element() {
        let err = RangeError::MismatchedEndpoints {
            element: NumericType::U16,
            start: NumericType::I32,
            end: NumericType::I32,
        };
        assert_eq!(
            err.to_string(),
            "Range endpoints must both be u16, got i32 and i32"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&RangeError::ZeroStep {
            element: NumericType::I32,
        });
    }
}
