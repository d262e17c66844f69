//! Views of a computed bundle for layout and text drawing.

use css_properties::{
    Align, DisplayStyle, FlexDirection, FlexWrap, FontStyle, Justify, Overflow, Position,
    StylePropertyId, TextAnchor, Visibility, WhiteSpace,
};
use css_values::{Color, FontHandle, LengthUnit, StyleKeyword, StyleValue};

use crate::StylesData;

/// A size as the layout engine takes it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LayoutLength {
    Auto,
    /// No constraint (`none`, or nothing set).
    #[default]
    Undefined,
    Points(f32),
    Percent(f32),
}

impl From<StyleValue> for LayoutLength {
    fn from(value: StyleValue) -> Self {
        match value {
            StyleValue::Length(length) => match length.unit {
                LengthUnit::Pixel => Self::Points(length.value),
                LengthUnit::Percent => Self::Percent(length.value),
            },
            StyleValue::Float(points) => Self::Points(points),
            StyleValue::Keyword(StyleKeyword::Auto) => Self::Auto,
            _ => Self::Undefined,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Edges<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T> Edges<T> {
    fn from_fn(mut side: impl FnMut(StylePropertyId) -> T, ids: [StylePropertyId; 4]) -> Self {
        let [top, right, bottom, left] = ids;
        Self {
            top: side(top),
            right: side(right),
            bottom: side(bottom),
            left: side(left),
        }
    }
}

/// Flex layout inputs of one element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutStyle {
    pub display: DisplayStyle,
    pub position: Position,
    pub overflow: Overflow,
    pub flex_direction: FlexDirection,
    pub flex_wrap: FlexWrap,
    pub align_content: Align,
    pub align_items: Align,
    pub align_self: Align,
    pub justify_content: Justify,
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub flex_basis: LayoutLength,
    pub width: LayoutLength,
    pub height: LayoutLength,
    pub min_width: LayoutLength,
    pub min_height: LayoutLength,
    pub max_width: LayoutLength,
    pub max_height: LayoutLength,
    pub inset: Edges<LayoutLength>,
    pub margin: Edges<LayoutLength>,
    pub padding: Edges<LayoutLength>,
    pub border: Edges<f32>,
}

/// Text drawing inputs of one element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub font: Option<FontHandle>,
    /// Zero means the font's own size.
    pub font_size: f32,
    pub font_style: FontStyle,
    pub text_align: TextAnchor,
    pub white_space: WhiteSpace,
    pub visibility: Visibility,
    pub opacity: f32,
}

impl StylesData {
    /// Read the layout properties. Meant for computed bundles.
    pub fn to_layout_style(&self) -> LayoutStyle {
        use StylePropertyId as Id;
        let length = |id: Id| LayoutLength::from(self.value(id));
        LayoutStyle {
            display: self.enum_value(Id::Display),
            position: self.enum_value(Id::Position),
            overflow: self.enum_value(Id::Overflow),
            flex_direction: self.enum_value(Id::FlexDirection),
            flex_wrap: self.enum_value(Id::FlexWrap),
            align_content: self.enum_value(Id::AlignContent),
            align_items: self.enum_value(Id::AlignItems),
            align_self: self.enum_value(Id::AlignSelf),
            justify_content: self.enum_value(Id::JustifyContent),
            flex_grow: self.float_value(Id::FlexGrow),
            flex_shrink: self.float_value(Id::FlexShrink),
            flex_basis: length(Id::FlexBasis),
            width: length(Id::Width),
            height: length(Id::Height),
            min_width: length(Id::MinWidth),
            min_height: length(Id::MinHeight),
            max_width: length(Id::MaxWidth),
            max_height: length(Id::MaxHeight),
            inset: Edges::from_fn(length, [Id::Top, Id::Right, Id::Bottom, Id::Left]),
            margin: Edges::from_fn(length, [Id::MarginTop, Id::MarginRight, Id::MarginBottom, Id::MarginLeft]),
            padding: Edges::from_fn(
                length,
                [Id::PaddingTop, Id::PaddingRight, Id::PaddingBottom, Id::PaddingLeft],
            ),
            border: Edges::from_fn(
                |id| self.float_value(id),
                [Id::BorderTopWidth, Id::BorderRightWidth, Id::BorderBottomWidth, Id::BorderLeftWidth],
            ),
        }
    }

    /// Read the text properties. Meant for computed bundles.
    pub fn to_text_style(&self) -> TextStyle {
        TextStyle {
            color: self.color(),
            font: self.font_value(StylePropertyId::UnityFont),
            font_size: self.font_size().map_or(0.0, |size| size.value),
            font_style: self.enum_value(StylePropertyId::UnityFontStyle),
            text_align: self.enum_value(StylePropertyId::UnityTextAlign),
            white_space: self.enum_value(StylePropertyId::WhiteSpace),
            visibility: self.visibility(),
            opacity: self.opacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CopyMode;
    use css_values::Length;

    #[test]
    fn initial_layout_is_a_column() {
        let layout = StylesData::new().compute(None).to_layout_style();
        assert_eq!(layout.flex_direction, FlexDirection::Column);
        assert_eq!(layout.align_items, Align::Stretch);
        assert_eq!(layout.width, LayoutLength::Auto);
        assert_eq!(layout.max_width, LayoutLength::Undefined);
        assert_eq!(layout.margin.left, LayoutLength::Points(0.0));
        assert!((layout.flex_shrink - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn text_style_reads_inherited_fields() {
        let mut data = StylesData::new();
        data.set(
            StylePropertyId::FontSize,
            StyleValue::Length(Length::pixels(14.0)),
            1,
            CopyMode::Copy,
        );
        data.set(StylePropertyId::Width, StyleValue::Length(Length::percent(50.0)), 1, CopyMode::Copy);
        let computed = data.compute(None);
        let text = computed.to_text_style();
        assert!((text.font_size - 14.0).abs() < f32::EPSILON);
        assert_eq!(text.color, Color::BLACK);
        assert_eq!(text.font, None);
        assert_eq!(computed.to_layout_style().width, LayoutLength::Percent(50.0));
    }
}
