//! Style values: the raw value handles stored by parsed style sheets and the
//! typed values a cascade resolves them into.
//! Spec: <https://www.w3.org/TR/css-values-4/>
//!
//! A style sheet keeps its values in flat pools (floats, dimensions, colors,
//! strings, asset references) and each declaration refers to them through a
//! [`StyleValueHandle`]. Reading a handle against the wrong pool is a decode
//! error ([`StyleSheetError`]), which callers log and recover from.

#![forbid(unsafe_code)]

mod color;
mod dimension;
mod error;
mod handle;
mod value;

pub use color::Color;
pub use dimension::{Dimension, DimensionUnit, Length, LengthUnit};
pub use error::StyleSheetError;
pub use handle::{StyleValueFunction, StyleValueHandle, StyleValueKeyword, StyleValueType};
pub use value::{Background, Cursor, FontHandle, ImageHandle, StyleKeyword, StyleValue};
