//! CSS Cascading and Inheritance: resolved style bundles.
//! Spec: <https://www.w3.org/TR/css-cascade-4/>
//!
//! Declarations of matched rules are applied in ascending specificity into a
//! [`StylesData`] bundle, one [`StyleField`] per longhand. The [`CopyMode`]
//! used for each write is the whole tie-break rule: an equal or higher
//! specificity overwrites, so rules applied later win ties. Inline values
//! carry [`INLINE_SPECIFICITY`] and survive re-cascades.

#![forbid(unsafe_code)]

mod applicator;
mod data;
mod field;
mod projection;
mod reader;
mod resources;

pub use applicator::{ApplyContext, apply_rule, apply_style_property};
pub use data::StylesData;
pub use field::{CopyMode, INLINE_SPECIFICITY, StyleField, UNDEFINED_SPECIFICITY};
pub use projection::{Edges, LayoutLength, LayoutStyle, TextStyle};
pub use reader::StylePropertyReader;
pub use resources::{NoResources, ResourceProvider};

pub use css_variables::StylePropertyValue;
