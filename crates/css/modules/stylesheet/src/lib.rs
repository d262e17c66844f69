//! Parsed, immutable style sheets.
//! Spec: <https://www.w3.org/TR/cssom-1/#css-style-sheets>
//!
//! A [`StyleSheet`] owns its rules, the complex selectors pointing at them,
//! and flat value pools addressed by [`StyleValueHandle`]s. Selectors are
//! bucketed by the first simple selector of their rightmost compound so the
//! cascade only tests plausible candidates.

#![forbid(unsafe_code)]

mod builder;
mod read;

use std::collections::HashMap;

use css_selectors::{ComplexSelector, SimpleSelector};
use css_values::{Color, Dimension, StyleValueHandle};

pub use builder::StyleSheetBuilder;

/// Bucket key used for wildcard and pseudo-class-only selectors.
pub const WILDCARD_KEY: &str = "*";

/// Identity of one built style sheet instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SheetId(pub u64);

/// A reference to an external asset (`url(...)`), resolved by the host.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AssetReference {
    pub path: String,
}

/// One `name: values` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleProperty {
    /// Property name as authored (deprecated aliases are rewritten at lookup).
    pub name: String,
    pub values: Vec<StyleValueHandle>,
    /// True if any value is a `var()` call.
    pub requires_variable_resolution: bool,
    /// Source line, for diagnostics.
    pub line: u32,
}

impl StyleProperty {
    pub fn new(name: impl Into<String>, values: Vec<StyleValueHandle>, line: u32) -> Self {
        let requires_variable_resolution = values.iter().any(StyleValueHandle::is_var_function);
        Self {
            name: name.into(),
            values,
            requires_variable_resolution,
            line,
        }
    }

    /// `--name` properties declare variables rather than styles.
    #[inline]
    pub fn is_custom_property(&self) -> bool {
        self.name.starts_with("--")
    }
}

/// A declaration block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleRule {
    pub properties: Vec<StyleProperty>,
    pub line: u32,
}

impl StyleRule {
    /// Number of custom property declarations in the block.
    pub fn custom_property_count(&self) -> usize {
        self.properties
            .iter()
            .filter(|property| property.is_custom_property())
            .count()
    }
}

/// A complex selector bound to the rule it selects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetSelector {
    pub selector: ComplexSelector,
    pub rule_index: usize,
    /// Position among the sheet's selectors, i.e. source order.
    pub order_in_sheet: usize,
}

/// Which bucket a selector lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectorBucket {
    Class,
    Id,
    Type,
}

/// An immutable, parsed style sheet.
#[derive(Clone, Debug)]
pub struct StyleSheet {
    id: SheetId,
    rules: Vec<StyleRule>,
    selectors: Vec<SheetSelector>,
    floats: Vec<f32>,
    dimensions: Vec<Dimension>,
    colors: Vec<Color>,
    strings: Vec<String>,
    assets: Vec<AssetReference>,
    class_selectors: HashMap<String, Vec<usize>>,
    id_selectors: HashMap<String, Vec<usize>>,
    type_selectors: HashMap<String, Vec<usize>>,
    content_hash: u64,
}

impl StyleSheet {
    #[inline]
    pub fn id(&self) -> SheetId {
        self.id
    }

    /// Hash of the sheet's rules, selectors and pools. Two sheets with the
    /// same content hash produce the same cascade.
    #[inline]
    pub fn content_hash(&self) -> u64 {
        self.content_hash
    }

    #[inline]
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    #[inline]
    pub fn rule(&self, index: usize) -> Option<&StyleRule> {
        self.rules.get(index)
    }

    #[inline]
    pub fn selectors(&self) -> &[SheetSelector] {
        &self.selectors
    }

    #[inline]
    pub fn selector(&self, index: usize) -> Option<&SheetSelector> {
        self.selectors.get(index)
    }

    /// Indices of selectors whose rightmost compound starts with `key` in `bucket`.
    pub fn bucket(&self, bucket: SelectorBucket, key: &str) -> &[usize] {
        let map = match bucket {
            SelectorBucket::Class => &self.class_selectors,
            SelectorBucket::Id => &self.id_selectors,
            SelectorBucket::Type => &self.type_selectors,
        };
        map.get(key).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Bucket and key for a selector: the first simple selector of the rightmost
/// compound decides. Pseudo-classes cannot be bucketed statically and go with
/// the wildcard.
pub fn bucket_for(selector: &ComplexSelector) -> (SelectorBucket, String) {
    match selector.rightmost().simples.first() {
        Some(SimpleSelector::Class(name)) => (SelectorBucket::Class, name.clone()),
        Some(SimpleSelector::Id(name)) => (SelectorBucket::Id, name.clone()),
        Some(SimpleSelector::Type(name)) => (SelectorBucket::Type, name.clone()),
        Some(SimpleSelector::Wildcard | SimpleSelector::PseudoClass(_)) | None => {
            (SelectorBucket::Type, WILDCARD_KEY.to_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_selectors::parse_complex_selector;

    fn bucket_of(text: &str) -> (SelectorBucket, String) {
        bucket_for(&parse_complex_selector(text).unwrap_or_default())
    }

    #[test]
    fn buckets_use_rightmost_compound() {
        assert_eq!(bucket_of("#root .row"), (SelectorBucket::Class, "row".to_owned()));
        assert_eq!(bucket_of(".row > #ok"), (SelectorBucket::Id, "ok".to_owned()));
        assert_eq!(bucket_of("Button.primary"), (SelectorBucket::Type, "Button".to_owned()));
    }

    #[test]
    fn pseudo_and_wildcard_share_the_wildcard_bucket() {
        assert_eq!(bucket_of(":hover"), (SelectorBucket::Type, WILDCARD_KEY.to_owned()));
        assert_eq!(bucket_of("*"), (SelectorBucket::Type, WILDCARD_KEY.to_owned()));
    }
}
