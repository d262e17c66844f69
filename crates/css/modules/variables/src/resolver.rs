//! `var()` substitution.

use std::rc::Rc;

use css_properties::StylePropertyId;
use css_stylesheet::StyleSheet;
use css_values::{StyleValueHandle, StyleValueType};
use log::{debug, error, warn};

use crate::{SyntaxCache, VariableContext, matches};

/// Upper bound on `var()` lookups while resolving one declaration.
pub const MAX_RESOLVES: usize = 100;

/// Outcome of resolving a declaration's values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    Valid,
    /// Too many lookups, a malformed call, or values that do not fit the
    /// property's grammar.
    Invalid,
    /// A referenced variable is unbound (or cyclic) and had no fallback.
    NotFound,
}

/// A value handle together with the sheet whose pools it indexes.
#[derive(Clone, Debug)]
pub struct StylePropertyValue {
    pub sheet: Rc<StyleSheet>,
    pub handle: StyleValueHandle,
}

impl StylePropertyValue {
    pub fn new(sheet: &Rc<StyleSheet>, handle: StyleValueHandle) -> Self {
        Self {
            sheet: Rc::clone(sheet),
            handle,
        }
    }
}

/// Substitutes `var(--name [, fallback])` calls using a [`VariableContext`].
///
/// Values of a call are encoded as `[Function(Var), Float(argc), args...]`
/// where `args` is the variable name, optionally followed by a comma and
/// the fallback values. Variables currently being expanded are kept on a
/// stack; meeting one of them again is a cycle and reads as unbound.
pub struct VariableResolver<'ctx> {
    context: &'ctx VariableContext,
    syntax: &'ctx mut SyntaxCache,
    max_resolves: usize,
    resolved: Vec<StylePropertyValue>,
    stack: Vec<String>,
    resolves: usize,
}

impl<'ctx> VariableResolver<'ctx> {
    pub fn new(context: &'ctx VariableContext, syntax: &'ctx mut SyntaxCache) -> Self {
        Self {
            context,
            syntax,
            max_resolves: MAX_RESOLVES,
            resolved: Vec::new(),
            stack: Vec::new(),
            resolves: 0,
        }
    }

    #[must_use]
    pub fn with_max_resolves(mut self, max_resolves: usize) -> Self {
        self.max_resolves = max_resolves;
        self
    }

    /// Resolve the values of one declaration of `property`.
    ///
    /// On [`ResolveResult::Valid`] the substituted values are available from
    /// [`Self::resolved_values`]. Values of custom properties are not checked
    /// against a grammar.
    pub fn resolve(
        &mut self,
        property: StylePropertyId,
        sheet: &Rc<StyleSheet>,
        handles: &[StyleValueHandle],
    ) -> ResolveResult {
        self.resolved.clear();
        self.stack.clear();
        self.resolves = 0;

        let result = self.resolve_handles(sheet, handles);
        if result != ResolveResult::Valid || property == StylePropertyId::Custom {
            return result;
        }
        let Some(expression) = self.syntax.expression(property) else {
            return result;
        };
        if matches(&expression, &self.resolved) {
            ResolveResult::Valid
        } else {
            debug!(
                "Resolved values of '{}' do not match '{}'",
                property.name(),
                property.syntax()
            );
            ResolveResult::Invalid
        }
    }

    #[inline]
    pub fn resolved_values(&self) -> &[StylePropertyValue] {
        &self.resolved
    }

    pub fn into_values(self) -> Vec<StylePropertyValue> {
        self.resolved
    }

    fn resolve_handles(&mut self, sheet: &Rc<StyleSheet>, handles: &[StyleValueHandle]) -> ResolveResult {
        let mut index = 0;
        while let Some(&handle) = handles.get(index) {
            if !handle.is_var_function() {
                self.resolved.push(StylePropertyValue::new(sheet, handle));
                index += 1;
                continue;
            }
            let argc = match handles.get(index + 1).map(|&count| sheet.read_float(count)) {
                Some(Ok(count)) => count as usize,
                Some(Err(err)) => {
                    error!("Invalid var() argument count: {err}");
                    return ResolveResult::Invalid;
                }
                None => return ResolveResult::Invalid,
            };
            let start = index + 2;
            let end = start.saturating_add(argc);
            let Some(arguments) = handles.get(start..end) else {
                error!(
                    "var() declares {argc} arguments but only {} follow",
                    handles.len().saturating_sub(start)
                );
                return ResolveResult::Invalid;
            };
            let result = self.resolve_var_call(sheet, arguments);
            if result != ResolveResult::Valid {
                return result;
            }
            index = end;
        }
        ResolveResult::Valid
    }

    fn resolve_var_call(&mut self, sheet: &Rc<StyleSheet>, arguments: &[StyleValueHandle]) -> ResolveResult {
        self.resolves += 1;
        if self.resolves > self.max_resolves {
            warn!("Gave up resolving var() after {} lookups", self.max_resolves);
            return ResolveResult::Invalid;
        }
        let Some(&name_handle) = arguments.first() else {
            return ResolveResult::Invalid;
        };
        let name = match sheet.read_variable(name_handle) {
            Ok(name) => name,
            Err(err) => {
                error!("Invalid var() name: {err}");
                return ResolveResult::Invalid;
            }
        };
        let fallback = match arguments.get(1) {
            Some(separator) if separator.value_type == StyleValueType::CommaSeparator => arguments.get(2..),
            _ => None,
        };

        let mark = self.resolved.len();
        let result = self.resolve_variable(name);
        match (result, fallback) {
            (ResolveResult::NotFound, Some(fallback)) => {
                self.resolved.truncate(mark);
                self.resolve_handles(sheet, fallback)
            }
            _ => result,
        }
    }

    fn resolve_variable(&mut self, name: &str) -> ResolveResult {
        if self.stack.iter().any(|entry| entry == name) {
            debug!("Cyclic reference to variable '{name}'");
            return ResolveResult::NotFound;
        }
        let context = self.context;
        let Some(variable) = context.find(name) else {
            return ResolveResult::NotFound;
        };
        self.stack.push(name.to_owned());
        let result = self.resolve_handles(&variable.sheet, &variable.handles);
        self.stack.pop();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StyleVariable;
    use css_stylesheet::StyleSheetBuilder;
    use css_values::{Dimension, DimensionUnit, StyleValueFunction};

    fn var_call(builder: &mut StyleSheetBuilder, name: &str, fallback: &[StyleValueHandle]) -> Vec<StyleValueHandle> {
        let mut arguments = vec![builder.string(StyleValueType::Variable, name)];
        if !fallback.is_empty() {
            arguments.push(StyleValueHandle::comma());
            arguments.extend_from_slice(fallback);
        }
        let mut handles = vec![
            builder.function(StyleValueFunction::Var),
            builder.float(arguments.len() as f32),
        ];
        handles.extend(arguments);
        handles
    }

    fn px(builder: &mut StyleSheetBuilder, value: f32) -> StyleValueHandle {
        builder.dimension(Dimension::new(value, DimensionUnit::Pixel))
    }

    fn pixels(resolver: &VariableResolver<'_>) -> Vec<f32> {
        resolver
            .resolved_values()
            .iter()
            .filter_map(|value| value.sheet.read_dimension(value.handle).ok())
            .map(|dimension| dimension.value)
            .collect()
    }

    #[test]
    fn bound_variable_is_substituted() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut builder = StyleSheetBuilder::new();
        let ten = px(&mut builder, 10.0);
        let width = var_call(&mut builder, "--x", &[]);
        let sheet = Rc::new(builder.build());
        let context = VariableContext::with_parent(
            &VariableContext::empty(),
            vec![StyleVariable::new("--x", &sheet, vec![ten])],
        );
        let mut syntax = SyntaxCache::new();
        let mut resolver = VariableResolver::new(&context, &mut syntax);
        assert_eq!(resolver.resolve(StylePropertyId::Width, &sheet, &width), ResolveResult::Valid);
        assert_eq!(pixels(&resolver), vec![10.0]);
    }

    #[test]
    fn fallback_is_used_for_unbound_names() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut builder = StyleSheetBuilder::new();
        let five = px(&mut builder, 5.0);
        let width = var_call(&mut builder, "--undefined", &[five]);
        let bare = var_call(&mut builder, "--undefined", &[]);
        let sheet = Rc::new(builder.build());
        let context = VariableContext::empty();
        let mut syntax = SyntaxCache::new();
        let mut resolver = VariableResolver::new(&context, &mut syntax);
        assert_eq!(resolver.resolve(StylePropertyId::Width, &sheet, &width), ResolveResult::Valid);
        assert_eq!(pixels(&resolver), vec![5.0]);
        assert_eq!(resolver.resolve(StylePropertyId::Width, &sheet, &bare), ResolveResult::NotFound);
    }

    #[test]
    fn nested_fallbacks_resolve_through_variables() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut builder = StyleSheetBuilder::new();
        let seven = px(&mut builder, 7.0);
        let inner = var_call(&mut builder, "--b", &[]);
        let outer = var_call(&mut builder, "--a", &inner);
        let sheet = Rc::new(builder.build());
        let context = VariableContext::with_parent(
            &VariableContext::empty(),
            vec![StyleVariable::new("--b", &sheet, vec![seven])],
        );
        let mut syntax = SyntaxCache::new();
        let mut resolver = VariableResolver::new(&context, &mut syntax);
        assert_eq!(resolver.resolve(StylePropertyId::Height, &sheet, &outer), ResolveResult::Valid);
        assert_eq!(pixels(&resolver), vec![7.0]);
    }

    #[test]
    fn self_reference_is_not_found() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut builder = StyleSheetBuilder::new();
        let cyclic = var_call(&mut builder, "--a", &[]);
        let sheet = Rc::new(builder.build());
        let context = VariableContext::with_parent(
            &VariableContext::empty(),
            vec![StyleVariable::new("--a", &sheet, cyclic.clone())],
        );
        let mut syntax = SyntaxCache::new();
        let mut resolver = VariableResolver::new(&context, &mut syntax);
        assert_eq!(resolver.resolve(StylePropertyId::Width, &sheet, &cyclic), ResolveResult::NotFound);
    }

    #[test]
    fn lookup_budget_yields_invalid() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut builder = StyleSheetBuilder::new();
        let one = px(&mut builder, 1.0);
        let to_b = var_call(&mut builder, "--b", &[]);
        let to_c = var_call(&mut builder, "--c", &[]);
        let width = var_call(&mut builder, "--a", &[]);
        let sheet = Rc::new(builder.build());
        let context = VariableContext::with_parent(
            &VariableContext::empty(),
            vec![
                StyleVariable::new("--a", &sheet, to_b),
                StyleVariable::new("--b", &sheet, to_c),
                StyleVariable::new("--c", &sheet, vec![one]),
            ],
        );
        let mut syntax = SyntaxCache::new();
        let mut resolver = VariableResolver::new(&context, &mut syntax).with_max_resolves(2);
        assert_eq!(resolver.resolve(StylePropertyId::Width, &sheet, &width), ResolveResult::Invalid);

        let mut unbounded = VariableResolver::new(&context, &mut syntax);
        assert_eq!(unbounded.resolve(StylePropertyId::Width, &sheet, &width), ResolveResult::Valid);
    }

    #[test]
    fn values_must_fit_the_property_grammar() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut builder = StyleSheetBuilder::new();
        let row = builder.string(StyleValueType::Enum, "row");
        let call = var_call(&mut builder, "--dir", &[]);
        let sheet = Rc::new(builder.build());
        let context = VariableContext::with_parent(
            &VariableContext::empty(),
            vec![StyleVariable::new("--dir", &sheet, vec![row])],
        );
        let mut syntax = SyntaxCache::new();
        let mut resolver = VariableResolver::new(&context, &mut syntax);
        assert_eq!(resolver.resolve(StylePropertyId::Width, &sheet, &call), ResolveResult::Invalid);
        assert_eq!(
            resolver.resolve(StylePropertyId::FlexDirection, &sheet, &call),
            ResolveResult::Valid
        );
        assert_eq!(resolver.resolve(StylePropertyId::Custom, &sheet, &call), ResolveResult::Valid);
        assert_eq!(resolver.into_values().len(), 1);
    }
}
