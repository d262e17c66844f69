//! Memoized property lookups per style sheet.

use core::any::TypeId;
use std::collections::HashMap;
use std::rc::Rc;

use css_stylesheet::{SheetId, StyleSheet};
use css_values::{StyleValueHandle, StyleValueKeyword, StyleValueType};
use log::trace;

use crate::{EnumKind, StyleEnum, StylePropertyId};

/// Identifier text of a handle usable as an enum keyword: an `Enum` string or
/// one of the non CSS-wide keywords (`auto`, `none`, ...).
pub fn enum_ident(sheet: &StyleSheet, handle: StyleValueHandle) -> Option<&str> {
    match handle.value_type {
        StyleValueType::Enum => sheet.read_enum(handle).ok(),
        StyleValueType::Keyword => sheet
            .read_keyword(handle)
            .ok()
            .filter(|keyword| !keyword.is_css_wide())
            .map(StyleValueKeyword::as_str),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum EnumKey {
    Type(TypeId),
    Kind(EnumKind),
}

/// Per-sheet caches of rule property ids and parsed enum values.
///
/// Entries are keyed by sheet identity, so a reloaded sheet never sees stale
/// data; [`PropertyCache::clear`] drops everything.
#[derive(Debug, Default)]
pub struct PropertyCache {
    rule_property_ids: HashMap<(SheetId, usize), Rc<[StylePropertyId]>>,
    enum_values: HashMap<(SheetId, StyleValueHandle, EnumKey), Option<i32>>,
}

impl PropertyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Property ids of every declaration in a rule, in declaration order.
    pub fn property_ids(&mut self, sheet: &StyleSheet, rule_index: usize) -> Rc<[StylePropertyId]> {
        let ids = self
            .rule_property_ids
            .entry((sheet.id(), rule_index))
            .or_insert_with(|| {
                trace!("Resolving property ids for rule {rule_index} of {:?}", sheet.id());
                sheet
                    .rule(rule_index)
                    .map(|rule| {
                        rule.properties
                            .iter()
                            .map(|property| StylePropertyId::resolve(&property.name))
                            .collect()
                    })
                    .unwrap_or_default()
            });
        Rc::clone(ids)
    }

    /// Integer value of an enum keyword, or `None` if the handle does not
    /// name a value of `T`.
    pub fn enum_value<T: StyleEnum>(
        &mut self,
        sheet: &StyleSheet,
        handle: StyleValueHandle,
    ) -> Option<i32> {
        *self
            .enum_values
            .entry((sheet.id(), handle, EnumKey::Type(TypeId::of::<T>())))
            .or_insert_with(|| enum_ident(sheet, handle).and_then(T::from_ident).map(T::to_int))
    }

    /// [`PropertyCache::enum_value`] for an enum chosen at run time.
    pub fn enum_value_of(
        &mut self,
        kind: EnumKind,
        sheet: &StyleSheet,
        handle: StyleValueHandle,
    ) -> Option<i32> {
        *self
            .enum_values
            .entry((sheet.id(), handle, EnumKey::Kind(kind)))
            .or_insert_with(|| enum_ident(sheet, handle).and_then(|ident| kind.parse(ident)))
    }

    /// Number of rules with cached property ids.
    pub fn cached_rules(&self) -> usize {
        self.rule_property_ids.len()
    }

    pub fn clear(&mut self) {
        self.rule_property_ids.clear();
        self.enum_values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Align, FlexDirection};
    use css_stylesheet::{StyleProperty, StyleSheetBuilder};

    fn sample() -> (StyleSheet, StyleValueHandle, StyleValueHandle) {
        let mut builder = StyleSheetBuilder::new();
        let row = builder.string(StyleValueType::Enum, "row");
        let auto = builder.keyword(StyleValueKeyword::Auto);
        builder.add_rule(
            vec![
                StyleProperty::new("flex-direction", vec![row], 1),
                StyleProperty::new("position-left", vec![auto], 2),
                StyleProperty::new("--gap", vec![auto], 3),
            ],
            1,
        );
        (builder.build(), row, auto)
    }

    #[test]
    fn property_ids_are_resolved_once_per_rule() {
        let (sheet, _, _) = sample();
        let mut cache = PropertyCache::new();
        let ids = cache.property_ids(&sheet, 0);
        assert_eq!(
            &*ids,
            &[StylePropertyId::FlexDirection, StylePropertyId::Left, StylePropertyId::Custom]
        );
        let again = cache.property_ids(&sheet, 0);
        assert!(Rc::ptr_eq(&ids, &again));
        assert!(cache.property_ids(&sheet, 7).is_empty());
        cache.clear();
        assert_eq!(cache.cached_rules(), 0);
    }

    #[test]
    fn enum_values_accept_plain_keywords() {
        let (sheet, row, auto) = sample();
        let mut cache = PropertyCache::new();
        assert_eq!(
            cache.enum_value::<FlexDirection>(&sheet, row),
            Some(FlexDirection::Row.to_int())
        );
        assert_eq!(cache.enum_value::<Align>(&sheet, row), None);
        assert_eq!(cache.enum_value_of(EnumKind::Align, &sheet, auto), Some(Align::Auto.to_int()));
    }
}
