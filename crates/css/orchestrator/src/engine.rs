use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{Context as _, Result};
use css_cascade::{
    ApplyContext, CopyMode, INLINE_SPECIFICITY, NoResources, ResourceProvider, StylesData, apply_rule,
};
use css_properties::PropertyCache;
use css_selectors::{PseudoMatchInfo, matches_complex};
use css_stylesheet::{SelectorBucket, StyleSheet, WILDCARD_KEY};
use css_syntax::{parse_inline_style, parse_stylesheet};
use css_variables::{StyleVariable, SyntaxCache, VariableContext};
use log::{debug, trace};

use crate::hash::RuleSetHash;
use crate::tree::{DirtyFlags, Element};
use crate::{CascadeConfig, ElementId, ElementTree};

/// Counters accumulated over every [`CascadeEngine::apply_styles`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CascadeStats {
    /// Elements matched and styled.
    pub elements_processed: usize,
    /// Bundles taken from the style cache.
    pub cache_hits: usize,
    /// Bundles built from matched rules.
    pub cache_misses: usize,
}

/// A rule selected for the element being styled.
struct MatchedRule {
    sheet: Rc<StyleSheet>,
    sheet_index: usize,
    rule_index: usize,
    specificity: i32,
    order_in_sheet: usize,
}

type ObservedPseudo = Vec<(ElementId, PseudoMatchInfo)>;

/// Drives the cascade over an [`ElementTree`].
///
/// The engine owns every cache the cascade needs, so separate engines never
/// share state. Elements keep their own `Rc` to the bundles they use, which
/// makes clearing the caches between traversals safe.
pub struct CascadeEngine {
    /// Tunables; the DPI scale is also part of the style cache key.
    config: CascadeConfig,
    /// Property ids per rule and decoded enum values.
    properties: PropertyCache,
    /// Parsed property grammars for `var()` validation.
    syntax: SyntaxCache,
    /// Shared bundles keyed by [`RuleSetHash`].
    style_cache: HashMap<u64, Rc<StylesData>>,
    /// Loads fonts and images named by declarations.
    resources: Box<dyn ResourceProvider>,
    stats: CascadeStats,
}

impl Default for CascadeEngine {
    fn default() -> Self {
        Self::new(CascadeConfig::default())
    }
}

impl CascadeEngine {
    /// Create an engine without resources: fonts stay unset and images
    /// become [`css_values::ImageHandle::MISSING`].
    pub fn new(config: CascadeConfig) -> Self {
        Self {
            config,
            properties: PropertyCache::new(),
            syntax: SyntaxCache::new(),
            style_cache: HashMap::new(),
            resources: Box::new(NoResources),
            stats: CascadeStats::default(),
        }
    }

    /// Load fonts and images through `resources` instead of treating them all
    /// as missing.
    #[must_use]
    pub fn with_resources(mut self, resources: impl ResourceProvider + 'static) -> Self {
        self.resources = Box::new(resources);
        self
    }

    #[inline]
    pub fn config(&self) -> CascadeConfig {
        self.config
    }

    /// Counters accumulated since creation or the last [`Self::reset_stats`].
    #[inline]
    pub fn stats(&self) -> CascadeStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = CascadeStats::default();
    }

    /// Number of bundles in the style cache.
    #[inline]
    pub fn cached_style_count(&self) -> usize {
        self.style_cache.len()
    }

    /// Import a style sheet from CSS text.
    ///
    /// # Errors
    /// Returns an error if a selector, value or the syntax is invalid.
    pub fn load_style_sheet(text: &str) -> Result<Rc<StyleSheet>> {
        let sheet = parse_stylesheet(text).context("failed to import style sheet")?;
        Ok(Rc::new(sheet))
    }

    /// Import the text of an inline `style` attribute.
    ///
    /// # Errors
    /// Returns an error if a value or the syntax is invalid.
    pub fn load_inline_style(text: &str) -> Result<Rc<StyleSheet>> {
        let sheet = parse_inline_style(text).context("failed to import inline style")?;
        Ok(Rc::new(sheet))
    }

    /// Drop every shared bundle. Elements keep the ones they hold.
    pub fn clear_style_cache(&mut self) {
        self.style_cache.clear();
    }

    /// Drop the style cache and every per-sheet cache.
    pub fn clear_caches(&mut self) {
        self.clear_style_cache();
        self.properties.clear();
        self.syntax.clear();
    }

    /// Change the DPI scale and schedule a full restyle.
    pub fn set_dpi_scale(&mut self, tree: &mut ElementTree, dpi_scale: f32) {
        self.config.dpi_scale = dpi_scale;
        tree.mark_all_dirty();
    }

    /// Restyle the dirty elements under `root`, `root` included.
    ///
    /// Sheets attached to ancestors of `root` apply as well.
    pub fn apply_styles(&mut self, tree: &mut ElementTree, root: ElementId) {
        let mut ancestors: Vec<ElementId> = tree.ancestors(root).collect();
        ancestors.reverse();
        let mut stack: Vec<Rc<StyleSheet>> = ancestors
            .iter()
            .filter_map(|&ancestor| tree.get(ancestor))
            .flat_map(|ancestor| ancestor.style_sheets().iter().map(Rc::clone))
            .collect();

        let before = self.stats;
        self.visit(tree, root, &mut stack, false);
        debug!(
            "Applied styles from {root:?}: {} elements, {} cache hits, {} cache misses",
            self.stats.elements_processed - before.elements_processed,
            self.stats.cache_hits - before.cache_hits,
            self.stats.cache_misses - before.cache_misses,
        );
    }

    /// Depth-first pass. Clean subtrees are skipped unless their parent was
    /// restyled, since children inherit from it.
    fn visit(
        &mut self,
        tree: &mut ElementTree,
        id: ElementId,
        stack: &mut Vec<Rc<StyleSheet>>,
        parent_restyled: bool,
    ) {
        let Some(element) = tree.get(id) else {
            return;
        };
        let dirty = element.dirty_flags();
        let restyle = parent_restyled || dirty.contains(DirtyFlags::STYLES);
        if !restyle && !dirty.contains(DirtyFlags::DESCENDANT_DIRTY) {
            return;
        }

        let pushed = element.style_sheets().len();
        stack.extend(element.style_sheets().iter().map(Rc::clone));
        let children = element.children().to_vec();

        if restyle {
            self.restyle(tree, id, stack);
        }
        tree.clear_dirty(id);
        for child in children {
            self.visit(tree, child, stack, restyle);
        }
        stack.truncate(stack.len().saturating_sub(pushed));
    }

    fn restyle(&mut self, tree: &mut ElementTree, id: ElementId, stack: &[Rc<StyleSheet>]) {
        let Some(element) = tree.get(id) else {
            return;
        };
        let parent = element.parent().and_then(|parent| tree.get(parent));
        let parent_variables = parent.map_or_else(VariableContext::empty, |found| Rc::clone(found.variables()));
        let parent_computed = parent.and_then(|found| found.computed_styles().map(Rc::clone));

        let (matched, observed) = collect_matches(tree, element, id, stack);

        let mut hash = RuleSetHash::default();
        hash.fold_str(element.type_name());
        hash.fold(u64::from(self.config.dpi_scale.to_bits()));
        hash.fold(parent_variables.variable_hash());
        for rule in &matched {
            hash.fold(rule.sheet.content_hash());
            hash.fold(rule.rule_index as u64);
            hash.fold(u64::from(rule.specificity as u32));
        }
        // Inline bindings change how the shared rules resolve.
        let inline_bindings = element.inline_style().filter(|sheet| declares_variables(sheet));
        if let Some(sheet) = inline_bindings {
            hash.fold(sheet.content_hash());
        }

        let variables = VariableContext::with_parent(
            &parent_variables,
            collect_variables(&matched, inline_bindings),
        );
        let shared = self.shared_styles(hash.finish(), &matched, &variables);
        let styles = if element.has_inline_styles() {
            Rc::new(self.instance_styles(element, &shared, &variables))
        } else {
            Rc::clone(&shared)
        };
        let computed = Rc::new(styles.compute(parent_computed.as_deref()));

        for (handle, info) in observed {
            if let Some(observer) = tree.get_mut(handle) {
                observer.pseudo.trigger |= info.trigger;
                observer.pseudo.dependency |= info.dependency;
            }
        }
        if let Some(styled) = tree.get_mut(id) {
            styled.shared_styles = Some(shared);
            styled.styles = Some(styles);
            styled.computed_styles = Some(computed);
            styled.variables = variables;
        }
        self.stats.elements_processed += 1;
    }

    /// The bundle for a rule set, from the cache when sharing is enabled.
    fn shared_styles(
        &mut self,
        key: u64,
        matched: &[MatchedRule],
        variables: &VariableContext,
    ) -> Rc<StylesData> {
        if self.config.share_styles
            && let Some(cached) = self.style_cache.get(&key)
        {
            trace!("Style cache hit for {key:#018x}");
            self.stats.cache_hits += 1;
            return Rc::clone(cached);
        }
        trace!("Style cache miss for {key:#018x}, applying {} rules", matched.len());
        self.stats.cache_misses += 1;

        let mut data = if self.config.share_styles {
            StylesData::shared()
        } else {
            StylesData::new()
        };
        let mut ctx = ApplyContext::new(
            &mut self.properties,
            &mut self.syntax,
            variables,
            self.resources.as_ref(),
        )
        .with_dpi_scale(self.config.dpi_scale)
        .with_max_variable_resolves(self.config.max_variable_resolves);
        for rule in matched {
            apply_rule(&mut ctx, &rule.sheet, rule.rule_index, rule.specificity, &mut data);
        }

        let data = Rc::new(data);
        if self.config.share_styles {
            self.style_cache.insert(key, Rc::clone(&data));
        }
        data
    }

    /// The element's own bundle: inline declarations first, then every field
    /// of `shared` that is not inline.
    fn instance_styles(
        &mut self,
        element: &Element,
        shared: &StylesData,
        variables: &VariableContext,
    ) -> StylesData {
        let mut instance = StylesData::new();
        if let Some(sheet) = element.inline_style() {
            let mut ctx = ApplyContext::new(
                &mut self.properties,
                &mut self.syntax,
                variables,
                self.resources.as_ref(),
            )
            .with_dpi_scale(self.config.dpi_scale)
            .with_max_variable_resolves(self.config.max_variable_resolves);
            for rule_index in 0..sheet.rules().len() {
                apply_rule(&mut ctx, sheet, rule_index, INLINE_SPECIFICITY, &mut instance);
            }
        }
        for &(property, value) in element.inline_values() {
            instance.set_inline(property, value);
        }
        instance.apply(shared, CopyMode::CopyIfNotInline);
        instance
    }
}

/// Rules of every sheet on the stack whose selector matches `id`, in cascade
/// order, with the pseudo states observed while matching.
fn collect_matches(
    tree: &ElementTree,
    element: &Element,
    id: ElementId,
    stack: &[Rc<StyleSheet>],
) -> (Vec<MatchedRule>, ObservedPseudo) {
    let mut keys = vec![
        (SelectorBucket::Type, element.type_name()),
        (SelectorBucket::Type, WILDCARD_KEY),
    ];
    if let Some(name) = element.name() {
        keys.push((SelectorBucket::Id, name));
    }
    keys.extend(
        element
            .classes()
            .iter()
            .map(|class| (SelectorBucket::Class, class.as_str())),
    );

    let mut matched = Vec::new();
    let mut observed = Vec::new();
    let mut record = |handle: ElementId, info: PseudoMatchInfo| observed.push((handle, info));
    for (sheet_index, sheet) in stack.iter().enumerate() {
        for &(bucket, key) in &keys {
            for &selector_index in sheet.bucket(bucket, key) {
                let Some(candidate) = sheet.selector(selector_index) else {
                    continue;
                };
                if matches_complex(tree, id, &candidate.selector, &mut record) {
                    matched.push(MatchedRule {
                        sheet: Rc::clone(sheet),
                        sheet_index,
                        rule_index: candidate.rule_index,
                        specificity: candidate.selector.specificity,
                        order_in_sheet: candidate.order_in_sheet,
                    });
                }
            }
        }
    }
    matched.sort_by_key(|rule| (rule.specificity, rule.sheet_index, rule.order_in_sheet));
    (matched, observed)
}

/// Custom properties declared by the matched rules, lowest priority first,
/// followed by the inline ones which shadow them.
fn collect_variables(matched: &[MatchedRule], inline: Option<&Rc<StyleSheet>>) -> Vec<StyleVariable> {
    let mut variables = Vec::new();
    for rule in matched {
        push_variables(&rule.sheet, rule.rule_index, &mut variables);
    }
    if let Some(sheet) = inline {
        for rule_index in 0..sheet.rules().len() {
            push_variables(sheet, rule_index, &mut variables);
        }
    }
    variables
}

fn declares_variables(sheet: &StyleSheet) -> bool {
    sheet.rules().iter().any(|rule| rule.custom_property_count() > 0)
}

fn push_variables(sheet: &Rc<StyleSheet>, rule_index: usize, variables: &mut Vec<StyleVariable>) {
    let Some(style_rule) = sheet.rule(rule_index) else {
        return;
    };
    for property in style_rule.properties.iter().filter(|property| property.is_custom_property()) {
        variables.push(StyleVariable::new(property.name.clone(), sheet, property.values.clone()));
    }
}
