use core::error::Error;
use core::fmt::{self, Display, Formatter};

use crate::StyleValueType;

/// Failure to decode a value handle against a style sheet's pools.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StyleSheetError {
    /// The handle's type does not match what the reader expected.
    InvalidValue {
        expected: StyleValueType,
        found: StyleValueType,
    },
    /// The handle points past the end of its pool.
    IndexOutOfRange {
        value_type: StyleValueType,
        index: usize,
    },
}

impl Display for StyleSheetError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { expected, found } => {
                write!(formatter, "trying to read value of type {expected} while reading a value of type {found}")
            }
            Self::IndexOutOfRange { value_type, index } => {
                write!(formatter, "{value_type} index {index} is out of range")
            }
        }
    }
}

impl Error for StyleSheetError {}
