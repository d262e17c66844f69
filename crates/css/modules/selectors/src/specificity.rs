//! Selector specificity as a single integer.

use crate::{ComplexSelector, CompoundSelector, SimpleSelector};

const NAME_WEIGHT: i32 = 100;
const CLASS_WEIGHT: i32 = 10;
const TYPE_WEIGHT: i32 = 1;

/// Specificity of one compound: names weigh 100, classes and pseudo-classes
/// 10, types 1; the wildcard adds nothing.
pub fn specificity_of_compound(compound: &CompoundSelector) -> i32 {
    compound
        .simples
        .iter()
        .map(|simple| match simple {
            SimpleSelector::Id(_) => NAME_WEIGHT,
            SimpleSelector::Class(_) | SimpleSelector::PseudoClass(_) => CLASS_WEIGHT,
            SimpleSelector::Type(_) => TYPE_WEIGHT,
            SimpleSelector::Wildcard => 0,
        })
        .fold(0_i32, i32::saturating_add)
}

/// Specificity of a complex selector (sum of its compounds).
pub fn specificity_of_complex(sel: &ComplexSelector) -> i32 {
    sel.rest
        .iter()
        .map(|pair| specificity_of_compound(&pair.1))
        .fold(specificity_of_compound(&sel.first), i32::saturating_add)
}
