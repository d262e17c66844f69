//! Incremental construction of a [`StyleSheet`].

use core::hash::{Hash, Hasher};
use core::sync::atomic::{AtomicU64, Ordering};
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;

use css_selectors::{Combinator, ComplexSelector};
use css_values::{
    Color, Dimension, StyleValueFunction, StyleValueHandle, StyleValueKeyword, StyleValueType,
};

use crate::{
    AssetReference, SelectorBucket, SheetId, SheetSelector, StyleProperty, StyleRule, StyleSheet,
    bucket_for,
};

static NEXT_SHEET_ID: AtomicU64 = AtomicU64::new(1);

/// Collects rules, selectors and pooled values, then freezes them into a sheet.
#[derive(Debug, Default)]
pub struct StyleSheetBuilder {
    rules: Vec<StyleRule>,
    selectors: Vec<SheetSelector>,
    floats: Vec<f32>,
    dimensions: Vec<Dimension>,
    colors: Vec<Color>,
    strings: Vec<String>,
    string_indices: HashMap<String, usize>,
    assets: Vec<AssetReference>,
}

impl StyleSheetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyword(&self, keyword: StyleValueKeyword) -> StyleValueHandle {
        StyleValueHandle::keyword(keyword)
    }

    pub fn function(&self, function: StyleValueFunction) -> StyleValueHandle {
        StyleValueHandle::function(function)
    }

    pub fn float(&mut self, value: f32) -> StyleValueHandle {
        self.floats.push(value);
        StyleValueHandle::new(StyleValueType::Float, self.floats.len() - 1)
    }

    pub fn dimension(&mut self, value: Dimension) -> StyleValueHandle {
        self.dimensions.push(value);
        StyleValueHandle::new(StyleValueType::Dimension, self.dimensions.len() - 1)
    }

    pub fn color(&mut self, value: Color) -> StyleValueHandle {
        self.colors.push(value);
        StyleValueHandle::new(StyleValueType::Color, self.colors.len() - 1)
    }

    /// Intern a string for one of the string-pooled types (`Enum`,
    /// `Variable`, `String`, `ResourcePath`, `MissingAssetReference`).
    pub fn string(&mut self, value_type: StyleValueType, value: &str) -> StyleValueHandle {
        let index = if let Some(&index) = self.string_indices.get(value) {
            index
        } else {
            self.strings.push(value.to_owned());
            let index = self.strings.len() - 1;
            self.string_indices.insert(value.to_owned(), index);
            index
        };
        StyleValueHandle::new(value_type, index)
    }

    pub fn asset(&mut self, path: &str) -> StyleValueHandle {
        self.assets.push(AssetReference {
            path: path.to_owned(),
        });
        StyleValueHandle::new(StyleValueType::AssetReference, self.assets.len() - 1)
    }

    /// Append a declaration block and return its index.
    pub fn add_rule(&mut self, properties: Vec<StyleProperty>, line: u32) -> usize {
        self.rules.push(StyleRule { properties, line });
        self.rules.len() - 1
    }

    /// Bind a selector to a previously added rule.
    pub fn add_selector(&mut self, rule_index: usize, selector: ComplexSelector) {
        let order_in_sheet = self.selectors.len();
        self.selectors.push(SheetSelector {
            selector,
            rule_index,
            order_in_sheet,
        });
    }

    /// Freeze into an immutable sheet with a fresh identity.
    pub fn build(self) -> StyleSheet {
        let mut class_selectors: HashMap<String, Vec<usize>> = HashMap::new();
        let mut id_selectors: HashMap<String, Vec<usize>> = HashMap::new();
        let mut type_selectors: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, entry) in self.selectors.iter().enumerate() {
            let (bucket, key) = bucket_for(&entry.selector);
            let map = match bucket {
                SelectorBucket::Class => &mut class_selectors,
                SelectorBucket::Id => &mut id_selectors,
                SelectorBucket::Type => &mut type_selectors,
            };
            map.entry(key).or_default().push(index);
        }

        let content_hash = self.content_hash();
        StyleSheet {
            id: SheetId(NEXT_SHEET_ID.fetch_add(1, Ordering::Relaxed)),
            rules: self.rules,
            selectors: self.selectors,
            floats: self.floats,
            dimensions: self.dimensions,
            colors: self.colors,
            strings: self.strings,
            assets: self.assets,
            class_selectors,
            id_selectors,
            type_selectors,
            content_hash,
        }
    }

    fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for rule in &self.rules {
            rule.properties.len().hash(&mut hasher);
            for property in &rule.properties {
                property.name.hash(&mut hasher);
                property.values.hash(&mut hasher);
            }
        }
        for entry in &self.selectors {
            entry.rule_index.hash(&mut hasher);
            entry.selector.specificity.hash(&mut hasher);
            entry.selector.first.simples.hash(&mut hasher);
            for (combinator, compound) in &entry.selector.rest {
                matches!(combinator, Combinator::Child).hash(&mut hasher);
                compound.simples.hash(&mut hasher);
            }
        }
        for value in &self.floats {
            value.to_bits().hash(&mut hasher);
        }
        for dimension in &self.dimensions {
            dimension.value.to_bits().hash(&mut hasher);
            dimension.unit.hash(&mut hasher);
        }
        self.colors.hash(&mut hasher);
        self.strings.hash(&mut hasher);
        self.assets.hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_selectors::parse_complex_selector;
    use css_values::DimensionUnit;

    fn sample(width: f32) -> StyleSheet {
        let mut builder = StyleSheetBuilder::new();
        let value = builder.dimension(Dimension::new(width, DimensionUnit::Pixel));
        let rule = builder.add_rule(vec![StyleProperty::new("width", vec![value], 1)], 1);
        builder.add_selector(rule, parse_complex_selector(".box").unwrap_or_default());
        builder.build()
    }

    #[test]
    fn each_build_gets_a_new_identity() {
        assert_ne!(sample(10.0).id(), sample(10.0).id());
    }

    #[test]
    fn content_hash_tracks_content() {
        assert_eq!(sample(10.0).content_hash(), sample(10.0).content_hash());
        assert_ne!(sample(10.0).content_hash(), sample(11.0).content_hash());
    }

    #[test]
    fn strings_are_interned() {
        let mut builder = StyleSheetBuilder::new();
        let first = builder.string(StyleValueType::Enum, "flex-start");
        let second = builder.string(StyleValueType::Enum, "flex-start");
        assert_eq!(first.index, second.index);
    }

    #[test]
    fn selectors_land_in_buckets() {
        let sheet = sample(10.0);
        assert_eq!(sheet.bucket(SelectorBucket::Class, "box"), &[0]);
        assert!(sheet.bucket(SelectorBucket::Type, "box").is_empty());
    }
}
