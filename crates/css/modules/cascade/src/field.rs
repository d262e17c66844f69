//! One style field and the rules for overwriting it.

use css_values::StyleValue;

/// Specificity of a field no declaration has reached.
pub const UNDEFINED_SPECIFICITY: i32 = 0;

/// Specificity of values set directly on an element.
pub const INLINE_SPECIFICITY: i32 = i32::MAX;

/// When [`StyleField::apply`] overwrites a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CopyMode {
    /// Always.
    Copy,
    /// When the incoming specificity is at least the current one, so later
    /// declarations of equal specificity win.
    CopyIfEqualOrGreaterSpecificity,
    /// Unless the current value was set inline.
    CopyIfNotInline,
}

/// A resolved value and the specificity of the declaration that set it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StyleField {
    pub value: StyleValue,
    pub specificity: i32,
}

impl StyleField {
    #[inline]
    pub const fn new(value: StyleValue, specificity: i32) -> Self {
        Self { value, specificity }
    }

    /// Overwrite this field with `other` if `mode` allows it. Returns whether
    /// the field was written.
    pub fn apply(&mut self, other: &Self, mode: CopyMode) -> bool {
        let copy = match mode {
            CopyMode::Copy => true,
            CopyMode::CopyIfEqualOrGreaterSpecificity => other.specificity >= self.specificity,
            CopyMode::CopyIfNotInline => self.specificity != INLINE_SPECIFICITY,
        };
        if copy {
            *self = *other;
        }
        copy
    }

    #[inline]
    pub fn is_inline(&self) -> bool {
        self.specificity == INLINE_SPECIFICITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specificity_decides_cascade_copies() {
        let mut field = StyleField::new(StyleValue::Float(1.0), 10);
        assert!(!field.apply(&StyleField::new(StyleValue::Float(2.0), 1), CopyMode::CopyIfEqualOrGreaterSpecificity));
        assert_eq!(field.value, StyleValue::Float(1.0));
        assert!(field.apply(&StyleField::new(StyleValue::Float(3.0), 10), CopyMode::CopyIfEqualOrGreaterSpecificity));
        assert_eq!(field.value, StyleValue::Float(3.0));
        assert!(field.apply(&StyleField::default(), CopyMode::Copy));
        assert_eq!(field.specificity, UNDEFINED_SPECIFICITY);
    }

    #[test]
    fn inline_values_survive_overlays() {
        let mut field = StyleField::new(StyleValue::Int(4), INLINE_SPECIFICITY);
        assert!(field.is_inline());
        assert!(!field.apply(&StyleField::new(StyleValue::Int(9), 100), CopyMode::CopyIfNotInline));
        assert_eq!(field.value, StyleValue::Int(4));

        let mut plain = StyleField::new(StyleValue::Int(1), 100);
        assert!(plain.apply(&StyleField::new(StyleValue::Int(2), 1), CopyMode::CopyIfNotInline));
        assert_eq!(plain.value, StyleValue::Int(2));
    }
}
