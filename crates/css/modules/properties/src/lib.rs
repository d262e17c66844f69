//! Style property metadata.
//! Spec: <https://www.w3.org/TR/css-cascade-4/#property>
//!
//! Maps authored property names to a closed [`StylePropertyId`] set and
//! records, per property, how its values are stored, whether it inherits,
//! the grammar its substituted values must match and its initial value.
//! [`PropertyCache`] memoizes the per-rule and per-enum lookups the cascade
//! repeats on every traversal.

#![forbid(unsafe_code)]

mod cache;
mod enums;
mod id;
mod initial;

pub use cache::{PropertyCache, enum_ident};
pub use enums::{
    Align, DisplayStyle, EnumKind, FlexDirection, FlexWrap, FontStyle, Justify, NativeCursor,
    Overflow, Position, ScaleMode, StyleEnum, TextAnchor, Visibility, WhiteSpace,
};
pub use id::{LONGHAND_COUNT, StylePropertyId, ValueKind};
pub use initial::{initial_value, is_valid_for};
