//! Right-to-left selector matching.

use crate::{
    Combinator, ComplexSelector, CompoundSelector, ElementAdapter, PseudoMatchInfo, PseudoStates,
    SimpleSelector,
};

/// Outcome of testing one compound against one element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompoundMatch {
    pub matched: bool,
    /// Pseudo-state bits relevant to the outcome; empty when the element was
    /// rejected before its state was looked at.
    pub pseudo: PseudoMatchInfo,
}

/// Match a compound selector against a single element.
pub fn matches_compound<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    compound: &CompoundSelector,
) -> CompoundMatch {
    if compound.unmatchable {
        return CompoundMatch::default();
    }
    for simple in &compound.simples {
        let matched = match simple {
            SimpleSelector::Wildcard | SimpleSelector::PseudoClass(_) => true,
            SimpleSelector::Type(type_name) => adapter.type_name(element) == type_name.as_str(),
            SimpleSelector::Class(class_name) => adapter.has_class(element, class_name),
            SimpleSelector::Id(name) => adapter
                .element_name(element)
                .is_some_and(|value| value == name.as_str()),
        };
        if !matched {
            return CompoundMatch::default();
        }
    }

    let states = adapter.pseudo_states(element);
    let mut outcome = CompoundMatch {
        matched: true,
        pseudo: PseudoMatchInfo::default(),
    };
    if states.contains(compound.pseudo_mask) {
        outcome.pseudo.dependency |= compound.pseudo_mask;
    } else {
        outcome.pseudo.trigger |= compound.pseudo_mask;
        outcome.matched = false;
    }
    if states.intersects(compound.negated_pseudo_mask) {
        outcome.pseudo.trigger |= compound.negated_pseudo_mask;
        outcome.matched = false;
    } else {
        outcome.pseudo.dependency |= compound.negated_pseudo_mask;
    }
    outcome
}

/// Match a complex selector against an element, right to left.
///
/// `record` receives the pseudo-state bits observed on every element a
/// compound was tested against (the element itself and visited ancestors), so
/// callers can restyle when those states change.
pub fn matches_complex<A, F>(
    adapter: &A,
    element: A::Handle,
    sel: &ComplexSelector,
    record: &mut F,
) -> bool
where
    A: ElementAdapter,
    F: FnMut(A::Handle, PseudoMatchInfo),
{
    if sel.is_empty() {
        return false;
    }
    match_from(adapter, element, sel, sel.len() - 1, record)
}

/// Match compound `index` against `element`, then relate the compounds to its
/// left through the combinator. Descendant combinators backtrack over every
/// matching ancestor.
fn match_from<A, F>(
    adapter: &A,
    element: A::Handle,
    sel: &ComplexSelector,
    index: usize,
    record: &mut F,
) -> bool
where
    A: ElementAdapter,
    F: FnMut(A::Handle, PseudoMatchInfo),
{
    let Some(compound) = sel.compound(index) else {
        return false;
    };
    let outcome = matches_compound(adapter, element, compound);
    if outcome.pseudo != PseudoMatchInfo::default() {
        record(element, outcome.pseudo);
    }
    if !outcome.matched {
        return false;
    }
    let Some(combinator) = sel.combinator_before(index) else {
        return true;
    };
    let left = index - 1;
    match combinator {
        Combinator::Child => adapter
            .parent(element)
            .is_some_and(|parent| match_from(adapter, parent, sel, left, record)),
        Combinator::Descendant => {
            let mut current = adapter.parent(element);
            while let Some(ancestor) = current {
                if match_from(adapter, ancestor, sel, left, record) {
                    return true;
                }
                current = adapter.parent(ancestor);
            }
            false
        }
    }
}
