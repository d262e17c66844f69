//! Custom property bindings visible to an element.

use core::hash::{Hash, Hasher};
use std::collections::hash_map::DefaultHasher;
use std::rc::Rc;

use css_stylesheet::StyleSheet;
use css_values::StyleValueHandle;

/// One `--name: values` binding, with the sheet its handles index into.
#[derive(Clone, Debug)]
pub struct StyleVariable {
    pub name: String,
    pub sheet: Rc<StyleSheet>,
    pub handles: Vec<StyleValueHandle>,
}

impl StyleVariable {
    pub fn new(name: impl Into<String>, sheet: &Rc<StyleSheet>, handles: Vec<StyleValueHandle>) -> Self {
        Self {
            name: name.into(),
            sheet: Rc::clone(sheet),
            handles,
        }
    }
}

/// Persistent chain of variable scopes.
///
/// Each element that declares custom properties gets a context layered on
/// its parent's; elements that declare none share their parent's context.
/// Lookups search the newest binding first, so later declarations and
/// deeper scopes shadow earlier ones.
#[derive(Debug, Default)]
pub struct VariableContext {
    parent: Option<Rc<VariableContext>>,
    variables: Vec<StyleVariable>,
    hash: u64,
}

impl VariableContext {
    /// A context with no bindings.
    pub fn empty() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Layer `variables` (in declaration order) over `parent`.
    pub fn with_parent(parent: &Rc<Self>, variables: Vec<StyleVariable>) -> Rc<Self> {
        if variables.is_empty() {
            return Rc::clone(parent);
        }
        let mut hasher = DefaultHasher::new();
        parent.hash.hash(&mut hasher);
        for variable in &variables {
            variable.name.hash(&mut hasher);
            variable.sheet.content_hash().hash(&mut hasher);
            variable.handles.hash(&mut hasher);
        }
        Rc::new(Self {
            parent: Some(Rc::clone(parent)),
            variables,
            hash: hasher.finish(),
        })
    }

    /// The binding for `name` visible from this scope.
    pub fn find(&self, name: &str) -> Option<&StyleVariable> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some(variable) = current.variables.iter().rev().find(|variable| variable.name == name) {
                return Some(variable);
            }
            scope = current.parent.as_deref();
        }
        None
    }

    /// Hash of every binding in the chain; zero for an empty chain.
    #[inline]
    pub fn variable_hash(&self) -> u64 {
        self.hash
    }

    /// True if no scope in the chain binds anything.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && self.parent.as_ref().is_none_or(|parent| parent.is_empty())
    }

    /// Bindings declared in this scope only.
    #[inline]
    pub fn local_variables(&self) -> &[StyleVariable] {
        &self.variables
    }
}
