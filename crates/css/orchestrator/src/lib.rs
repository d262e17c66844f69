//! Cascade driver of the style engine.
//! Spec: <https://www.w3.org/TR/css-cascade-4/#cascading>
//!
//! An [`ElementTree`] holds elements, their attached sheets and the bundles
//! computed for them. [`CascadeEngine::apply_styles`] walks the dirty part of
//! the tree, matches rules, shares identical bundles between elements through
//! a style cache keyed by a rolling hash of the matched rule set, applies
//! inline values and resolves inheritance.

#![forbid(unsafe_code)]

mod config;
mod engine;
mod hash;
mod tree;

pub use config::CascadeConfig;
pub use engine::{CascadeEngine, CascadeStats};
pub use hash::RuleSetHash;
pub use tree::{DirtyFlags, Element, ElementId, ElementTree};
