//! Initial values, typed the way the applicator stores them.

use css_values::{Background, Color, Cursor, Length, StyleKeyword, StyleValue};

use crate::{
    Align, DisplayStyle, FlexDirection, FlexWrap, FontStyle, Justify, Overflow, Position,
    ScaleMode, StyleEnum, StylePropertyId, TextAnchor, ValueKind, Visibility, WhiteSpace,
};

fn keyword<T: StyleEnum>(value: T) -> StyleValue {
    StyleValue::Enum(value.to_int())
}

const AUTO: StyleValue = StyleValue::Keyword(StyleKeyword::Auto);
const NONE: StyleValue = StyleValue::Keyword(StyleKeyword::None);
const ZERO: StyleValue = StyleValue::Length(Length::zero());

/// The value a property takes when nothing sets it and it does not inherit.
///
/// `font-size` starts at `0px`, which text rendering reads as "use the
/// font's own size".
pub fn initial_value(id: StylePropertyId) -> StyleValue {
    use StylePropertyId as Id;
    match id {
        Id::AlignContent => keyword(Align::FlexStart),
        Id::AlignItems => keyword(Align::Stretch),
        Id::AlignSelf => keyword(Align::Auto),
        Id::JustifyContent => keyword(Justify::FlexStart),
        Id::FlexDirection => keyword(FlexDirection::Column),
        Id::FlexWrap => keyword(FlexWrap::NoWrap),
        Id::Display => keyword(DisplayStyle::Flex),
        Id::Overflow => keyword(Overflow::Visible),
        Id::Position => keyword(Position::Relative),
        Id::UnityBackgroundScaleMode => keyword(ScaleMode::StretchToFill),
        Id::UnityFontStyle => keyword(FontStyle::Normal),
        Id::UnityTextAlign => keyword(TextAnchor::UpperLeft),
        Id::Visibility => keyword(Visibility::Visible),
        Id::WhiteSpace => keyword(WhiteSpace::Normal),

        Id::BackgroundColor
        | Id::BorderBottomColor
        | Id::BorderLeftColor
        | Id::BorderRightColor
        | Id::BorderTopColor => StyleValue::Color(Color::CLEAR),
        Id::Color => StyleValue::Color(Color::BLACK),
        Id::UnityBackgroundImageTintColor => StyleValue::Color(Color::WHITE),

        Id::Width
        | Id::Height
        | Id::Left
        | Id::Top
        | Id::Right
        | Id::Bottom
        | Id::FlexBasis
        | Id::MinWidth
        | Id::MinHeight => AUTO,
        Id::MaxWidth | Id::MaxHeight => NONE,
        Id::MarginBottom
        | Id::MarginLeft
        | Id::MarginRight
        | Id::MarginTop
        | Id::PaddingBottom
        | Id::PaddingLeft
        | Id::PaddingRight
        | Id::PaddingTop
        | Id::BorderBottomLeftRadius
        | Id::BorderBottomRightRadius
        | Id::BorderTopLeftRadius
        | Id::BorderTopRightRadius
        | Id::FontSize => ZERO,

        Id::BorderBottomWidth
        | Id::BorderLeftWidth
        | Id::BorderRightWidth
        | Id::BorderTopWidth
        | Id::FlexGrow => StyleValue::Float(0.0),
        Id::FlexShrink | Id::Opacity => StyleValue::Float(1.0),
        Id::UnitySliceBottom | Id::UnitySliceLeft | Id::UnitySliceRight | Id::UnitySliceTop => {
            StyleValue::Int(0)
        }

        Id::UnityFont => NONE,
        Id::BackgroundImage => StyleValue::Background(Background::default()),
        Id::Cursor => StyleValue::Cursor(Cursor::default()),

        Id::BorderColor
        | Id::BorderRadius
        | Id::BorderWidth
        | Id::Flex
        | Id::Margin
        | Id::Padding
        | Id::Custom
        | Id::Unknown => StyleValue::default(),
    }
}

/// Whether `value` has the representation the applicator writes for `id`.
/// Keywords are accepted for every property.
pub fn is_valid_for(id: StylePropertyId, value: &StyleValue) -> bool {
    match (id.value_kind(), value) {
        (_, StyleValue::Keyword(_))
        | (ValueKind::Float, StyleValue::Float(_))
        | (ValueKind::Int, StyleValue::Int(_))
        | (ValueKind::Length, StyleValue::Length(_))
        | (ValueKind::Color, StyleValue::Color(_))
        | (ValueKind::Enum(_), StyleValue::Enum(_))
        | (ValueKind::Font, StyleValue::Font(_))
        | (ValueKind::Background, StyleValue::Background(_))
        | (ValueKind::Cursor, StyleValue::Cursor(_)) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_values_match_value_kinds() {
        for &id in StylePropertyId::LONGHANDS {
            let value = initial_value(id);
            assert!(is_valid_for(id, &value), "{id:?} -> {value:?}");
            assert!(!value.is_undefined(), "{id:?} has no initial value");
        }
    }

    #[test]
    fn selected_initial_values() {
        assert_eq!(initial_value(StylePropertyId::FlexShrink), StyleValue::Float(1.0));
        assert_eq!(initial_value(StylePropertyId::Width), AUTO);
        assert_eq!(
            initial_value(StylePropertyId::AlignItems),
            StyleValue::Enum(Align::Stretch.to_int())
        );
        assert_eq!(initial_value(StylePropertyId::Color), StyleValue::Color(Color::BLACK));
    }
}
