//! CSS custom properties and `var()` substitution.
//! Spec: <https://www.w3.org/TR/css-variables-1/>
//!
//! Elements collect the `--name` declarations of their matched rules into a
//! [`VariableContext`] layered over their parent's. When a declaration uses
//! `var()`, [`VariableResolver`] substitutes the bound values (or the
//! fallback), guards against cycles and runaway expansion, and validates the
//! result against the target property's grammar.

#![forbid(unsafe_code)]

mod context;
mod matcher;
mod resolver;
mod syntax;

pub use context::{StyleVariable, VariableContext};
pub use matcher::matches;
pub use resolver::{MAX_RESOLVES, ResolveResult, StylePropertyValue, VariableResolver};
pub use syntax::{Component, DataType, Expression, SyntaxCache, SyntaxError, Term, parse_syntax};
