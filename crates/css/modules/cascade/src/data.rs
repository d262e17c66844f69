//! Resolved style bundles.

use css_properties::{
    DisplayStyle, LONGHAND_COUNT, StyleEnum, StylePropertyId, Visibility, initial_value,
};
use css_values::{
    Background, Color, Cursor, FontHandle, Length, StyleKeyword, StyleValue,
};

use crate::{CopyMode, INLINE_SPECIFICITY, StyleField};

/// One [`StyleField`] per longhand property.
///
/// Bundles built by the cascade are marked shared: they are filled once from
/// the matched rules, then handed out by reference to every element with the
/// same cascade. Per-element bundles (inline overlays, computed styles) are
/// not shared.
#[derive(Clone, Debug, PartialEq)]
pub struct StylesData {
    fields: [StyleField; LONGHAND_COUNT],
    is_shared: bool,
}

impl Default for StylesData {
    fn default() -> Self {
        Self {
            fields: [StyleField::default(); LONGHAND_COUNT],
            is_shared: false,
        }
    }
}

impl StylesData {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty bundle destined for the style cache.
    pub fn shared() -> Self {
        Self {
            is_shared: true,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_shared(&self) -> bool {
        self.is_shared
    }

    #[inline]
    pub fn fields(&self) -> &[StyleField] {
        &self.fields
    }

    #[inline]
    pub fn field(&self, id: StylePropertyId) -> Option<&StyleField> {
        id.longhand_index().and_then(|index| self.fields.get(index))
    }

    /// Stored value of a longhand; undefined for anything else.
    #[inline]
    pub fn value(&self, id: StylePropertyId) -> StyleValue {
        self.field(id).map(|field| field.value).unwrap_or_default()
    }

    #[inline]
    pub fn specificity(&self, id: StylePropertyId) -> i32 {
        self.field(id).map_or(0, |field| field.specificity)
    }

    /// Write one longhand under `mode`. Returns whether it was written.
    pub fn set(
        &mut self,
        id: StylePropertyId,
        value: StyleValue,
        specificity: i32,
        mode: CopyMode,
    ) -> bool {
        id.longhand_index()
            .and_then(|index| self.fields.get_mut(index))
            .is_some_and(|field| field.apply(&StyleField::new(value, specificity), mode))
    }

    /// Set a value that later cascades will not overwrite.
    pub fn set_inline(&mut self, id: StylePropertyId, value: StyleValue) -> bool {
        self.set(id, value, INLINE_SPECIFICITY, CopyMode::Copy)
    }

    /// Overlay every field of `other` under `mode`.
    pub fn apply(&mut self, other: &Self, mode: CopyMode) {
        for (field, incoming) in self.fields.iter_mut().zip(other.fields.iter()) {
            field.apply(incoming, mode);
        }
    }

    /// Resolve keywords against the parent's computed bundle.
    ///
    /// Unset and undefined fields inherit when the property is inherited and
    /// take the initial value otherwise; `inherit` copies the parent's value
    /// and `initial` the initial one. Without a parent, inheriting yields the
    /// initial value.
    pub fn compute(&self, parent: Option<&Self>) -> Self {
        let mut computed = Self::default();
        for ((&id, field), target) in StylePropertyId::LONGHANDS
            .iter()
            .zip(self.fields.iter())
            .zip(computed.fields.iter_mut())
        {
            let inherited = || parent.map_or_else(|| initial_value(id), |style| style.value(id));
            let value = match field.value {
                StyleValue::Keyword(StyleKeyword::Undefined | StyleKeyword::Unset) => {
                    if id.is_inherited() {
                        inherited()
                    } else {
                        initial_value(id)
                    }
                }
                StyleValue::Keyword(StyleKeyword::Inherit) => inherited(),
                StyleValue::Keyword(StyleKeyword::Initial | StyleKeyword::Null) => initial_value(id),
                value => value,
            };
            *target = StyleField::new(value, field.specificity);
        }
        computed
    }

    /// Number held by a property, `0.0` for anything else.
    pub fn float_value(&self, id: StylePropertyId) -> f32 {
        self.value(id).as_float().unwrap_or_default()
    }

    /// Integer held by a property, `0` for anything else.
    pub fn int_value(&self, id: StylePropertyId) -> i32 {
        self.value(id).as_int().unwrap_or_default()
    }

    /// Color of a property; non-colors read as [`Color::CLEAR`].
    pub fn color_value(&self, id: StylePropertyId) -> Color {
        self.value(id).as_color().unwrap_or(Color::CLEAR)
    }

    /// Length of a property; `None` while it holds a keyword (`auto`, `none`).
    pub fn length_value(&self, id: StylePropertyId) -> Option<Length> {
        self.value(id).as_length()
    }

    /// Keyword of an enum property, or `T::default()` if the stored value
    /// does not name a variant of `T`.
    pub fn enum_value<T: StyleEnum + Default>(&self, id: StylePropertyId) -> T {
        self.value(id)
            .as_enum()
            .and_then(T::from_int)
            .unwrap_or_default()
    }

    /// `None` for `none` and for fonts the provider could not load.
    pub fn font_value(&self, id: StylePropertyId) -> Option<FontHandle> {
        self.value(id).as_font()
    }

    pub fn cursor_value(&self, id: StylePropertyId) -> Cursor {
        self.value(id).as_cursor().unwrap_or_default()
    }

    /// Background image of a property; the default background has no image.
    pub fn background_value(&self, id: StylePropertyId) -> Background {
        self.value(id).as_background().unwrap_or_default()
    }

    /// `width` as stored, keyword or length.
    pub fn width(&self) -> StyleValue {
        self.value(StylePropertyId::Width)
    }

    pub fn height(&self) -> StyleValue {
        self.value(StylePropertyId::Height)
    }

    pub fn color(&self) -> Color {
        self.color_value(StylePropertyId::Color)
    }

    pub fn background_color(&self) -> Color {
        self.color_value(StylePropertyId::BackgroundColor)
    }

    pub fn opacity(&self) -> f32 {
        self.float_value(StylePropertyId::Opacity)
    }

    pub fn display(&self) -> DisplayStyle {
        self.enum_value(StylePropertyId::Display)
    }

    pub fn visibility(&self) -> Visibility {
        self.enum_value(StylePropertyId::Visibility)
    }

    /// `None` while `font-size` is still a keyword.
    pub fn font_size(&self) -> Option<Length> {
        self.length_value(StylePropertyId::FontSize)
    }
}
