//! Style selectors: element matching, pseudo states and specificity.
//! Spec: <https://www.w3.org/TR/selectors-4/>
//!
//! The supported subset is the one a retained-mode UI style sheet needs:
//! - Type, class, name (`#id`) and wildcard selectors
//! - Pseudo-classes backed by element state bits (`:hover`, `:checked`, ...)
//! - Descendant and child combinators
//! - Integer specificity (name = 100, class/pseudo = 10, type = 1)
//!
//! Matching runs right-to-left, starting from the candidate element and
//! walking up the ancestor chain.

#![forbid(unsafe_code)]

mod matcher;
mod parser;
mod pseudo;
mod specificity;

pub use matcher::{CompoundMatch, matches_complex, matches_compound};
pub use parser::{SelectorParseError, parse_complex_selector, parse_selector_list};
pub use pseudo::{PseudoMatchInfo, PseudoStates, pseudo_state_for};
pub use specificity::{specificity_of_complex, specificity_of_compound};

/// An adapter that abstracts element-tree access for selector matching.
pub trait ElementAdapter {
    type Handle: Copy + Eq;

    /// Parent element if any.
    fn parent(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Declared type name of the element (matched by type selectors).
    fn type_name(&self, element: Self::Handle) -> &str;

    /// The element's name, matched by `#name` selectors.
    fn element_name(&self, element: Self::Handle) -> Option<&str>;

    /// True if the element carries the given class.
    fn has_class(&self, element: Self::Handle, class: &str) -> bool;

    /// Current interaction state bits.
    fn pseudo_states(&self, element: Self::Handle) -> PseudoStates;
}

/// Simple selectors.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SimpleSelector {
    /// `*`
    Wildcard,
    Type(String),
    Class(String),
    /// `#name`
    Id(String),
    /// `:name`, kept by name; the owning compound folds it into its masks.
    PseudoClass(String),
}

/// A sequence of simple selectors with no combinator in between.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    pub simples: Vec<SimpleSelector>,
    /// States that must be present.
    pub pseudo_mask: PseudoStates,
    /// States that must be absent (`:enabled`).
    pub negated_pseudo_mask: PseudoStates,
    /// Set when the compound uses a pseudo-class we cannot evaluate; such a
    /// compound never matches.
    pub unmatchable: bool,
}

impl CompoundSelector {
    /// Build a compound and derive its pseudo masks.
    pub fn new(simples: Vec<SimpleSelector>) -> Self {
        let mut compound = Self {
            simples,
            ..Self::default()
        };
        for simple in &compound.simples {
            if let SimpleSelector::PseudoClass(name) = simple {
                match pseudo_state_for(name) {
                    Some((state, false)) => compound.pseudo_mask |= state,
                    Some((state, true)) => compound.negated_pseudo_mask |= state,
                    None => compound.unmatchable = true,
                }
            }
        }
        compound
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
}

/// One or more compounds separated by combinators, with its specificity.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ComplexSelector {
    pub first: CompoundSelector,
    pub rest: Vec<(Combinator, CompoundSelector)>,
    pub specificity: i32,
}

impl ComplexSelector {
    /// Assemble a selector and compute its specificity.
    pub fn new(first: CompoundSelector, rest: Vec<(Combinator, CompoundSelector)>) -> Self {
        let mut selector = Self {
            first,
            rest,
            specificity: 0,
        };
        selector.specificity = specificity_of_complex(&selector);
        selector
    }

    /// Number of compounds.
    #[inline]
    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first.simples.is_empty() && self.rest.is_empty()
    }

    /// Compound at `index`, counted from the left.
    pub fn compound(&self, index: usize) -> Option<&CompoundSelector> {
        if index == 0 {
            Some(&self.first)
        } else {
            self.rest.get(index - 1).map(|pair| &pair.1)
        }
    }

    /// Combinator joining compound `index - 1` to compound `index`.
    pub fn combinator_before(&self, index: usize) -> Option<Combinator> {
        index
            .checked_sub(1)
            .and_then(|rest_index| self.rest.get(rest_index))
            .map(|pair| pair.0)
    }

    /// The compound the matched element itself must satisfy.
    pub fn rightmost(&self) -> &CompoundSelector {
        self.rest.last().map_or(&self.first, |pair| &pair.1)
    }
}
