//! The closed set of style properties.

use log::warn;

use crate::EnumKind;

/// How a property's values are decoded and stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Float,
    Int,
    Length,
    Color,
    Enum(EnumKind),
    Font,
    Background,
    Cursor,
    /// Expands into longhands.
    Shorthand,
    /// `--name` declarations.
    Custom,
    Unknown,
}

const LENGTH: &str = "<length> | <percentage>";
const LENGTH_AUTO: &str = "<length> | <percentage> | auto";
const LENGTH_NONE: &str = "<length> | <percentage> | none";
const COLOR: &str = "<color>";
const NUMBER: &str = "<number>";
const INTEGER: &str = "<integer>";
const ALIGN: &str = "auto | flex-start | center | flex-end | stretch";
const FONT: &str = "<resource> | <url>";
const IMAGE: &str = "<resource> | <url> | none";

macro_rules! style_properties {
    ($( $variant:ident => $name:literal, $kind:expr, $inherited:literal, $syntax:expr; )+) => {
        /// Style property identifiers. Longhands come first, in CSS name order,
        /// so a longhand's discriminant is its field index.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum StylePropertyId {
            $($variant,)+
            BorderColor,
            BorderRadius,
            BorderWidth,
            Flex,
            Margin,
            Padding,
            Custom,
            Unknown,
        }

        impl StylePropertyId {
            /// Every longhand, indexed by [`Self::longhand_index`].
            pub const LONGHANDS: &'static [Self] = &[$(Self::$variant,)+];

            const SHORTHANDS: [Self; 6] = [
                Self::BorderColor,
                Self::BorderRadius,
                Self::BorderWidth,
                Self::Flex,
                Self::Margin,
                Self::Padding,
            ];

            /// CSS name; empty for [`Self::Custom`] and [`Self::Unknown`].
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                    Self::BorderColor => "border-color",
                    Self::BorderRadius => "border-radius",
                    Self::BorderWidth => "border-width",
                    Self::Flex => "flex",
                    Self::Margin => "margin",
                    Self::Padding => "padding",
                    Self::Custom | Self::Unknown => "",
                }
            }

            pub fn value_kind(self) -> ValueKind {
                match self {
                    $(Self::$variant => $kind,)+
                    Self::BorderColor
                    | Self::BorderRadius
                    | Self::BorderWidth
                    | Self::Flex
                    | Self::Margin
                    | Self::Padding => ValueKind::Shorthand,
                    Self::Custom => ValueKind::Custom,
                    Self::Unknown => ValueKind::Unknown,
                }
            }

            /// Whether an unset value is taken from the parent.
            pub const fn is_inherited(self) -> bool {
                match self {
                    $(Self::$variant => $inherited,)+
                    _ => false,
                }
            }

            /// Value grammar used to validate substituted `var()` values.
            pub const fn syntax(self) -> &'static str {
                match self {
                    $(Self::$variant => $syntax,)+
                    Self::BorderColor => "<color>{1,4}",
                    Self::BorderRadius => "[ <length> | <percentage> ]{1,4}",
                    Self::BorderWidth => "<length>{1,4}",
                    Self::Flex => "none | auto | <number> <number>? [ <length> | <percentage> | auto ]? | <length> | <percentage>",
                    Self::Margin => "[ <length> | <percentage> | auto ]{1,4}",
                    Self::Padding => "[ <length> | <percentage> ]{1,4}",
                    Self::Custom | Self::Unknown => "",
                }
            }
        }
    };
}

style_properties! {
    AlignContent => "align-content", ValueKind::Enum(EnumKind::Align), false, ALIGN;
    AlignItems => "align-items", ValueKind::Enum(EnumKind::Align), false, ALIGN;
    AlignSelf => "align-self", ValueKind::Enum(EnumKind::Align), false, ALIGN;
    BackgroundColor => "background-color", ValueKind::Color, false, COLOR;
    BackgroundImage => "background-image", ValueKind::Background, false, IMAGE;
    BorderBottomColor => "border-bottom-color", ValueKind::Color, false, COLOR;
    BorderBottomLeftRadius => "border-bottom-left-radius", ValueKind::Length, false, LENGTH;
    BorderBottomRightRadius => "border-bottom-right-radius", ValueKind::Length, false, LENGTH;
    BorderBottomWidth => "border-bottom-width", ValueKind::Float, false, "<length>";
    BorderLeftColor => "border-left-color", ValueKind::Color, false, COLOR;
    BorderLeftWidth => "border-left-width", ValueKind::Float, false, "<length>";
    BorderRightColor => "border-right-color", ValueKind::Color, false, COLOR;
    BorderRightWidth => "border-right-width", ValueKind::Float, false, "<length>";
    BorderTopColor => "border-top-color", ValueKind::Color, false, COLOR;
    BorderTopLeftRadius => "border-top-left-radius", ValueKind::Length, false, LENGTH;
    BorderTopRightRadius => "border-top-right-radius", ValueKind::Length, false, LENGTH;
    BorderTopWidth => "border-top-width", ValueKind::Float, false, "<length>";
    Bottom => "bottom", ValueKind::Length, false, LENGTH_AUTO;
    Color => "color", ValueKind::Color, true, COLOR;
    Cursor => "cursor", ValueKind::Cursor, false,
        "[ <resource> | <url> ] [ <integer> <integer> ]? | <custom-ident>";
    Display => "display", ValueKind::Enum(EnumKind::DisplayStyle), false, "flex | none";
    FlexBasis => "flex-basis", ValueKind::Length, false, LENGTH_AUTO;
    FlexDirection => "flex-direction", ValueKind::Enum(EnumKind::FlexDirection), false,
        "column | column-reverse | row | row-reverse";
    FlexGrow => "flex-grow", ValueKind::Float, false, NUMBER;
    FlexShrink => "flex-shrink", ValueKind::Float, false, NUMBER;
    FlexWrap => "flex-wrap", ValueKind::Enum(EnumKind::FlexWrap), false, "nowrap | wrap | wrap-reverse";
    FontSize => "font-size", ValueKind::Length, true, LENGTH;
    Height => "height", ValueKind::Length, false, LENGTH_AUTO;
    JustifyContent => "justify-content", ValueKind::Enum(EnumKind::Justify), false,
        "flex-start | center | flex-end | space-between | space-around";
    Left => "left", ValueKind::Length, false, LENGTH_AUTO;
    MarginBottom => "margin-bottom", ValueKind::Length, false, LENGTH_AUTO;
    MarginLeft => "margin-left", ValueKind::Length, false, LENGTH_AUTO;
    MarginRight => "margin-right", ValueKind::Length, false, LENGTH_AUTO;
    MarginTop => "margin-top", ValueKind::Length, false, LENGTH_AUTO;
    MaxHeight => "max-height", ValueKind::Length, false, LENGTH_NONE;
    MaxWidth => "max-width", ValueKind::Length, false, LENGTH_NONE;
    MinHeight => "min-height", ValueKind::Length, false, LENGTH_AUTO;
    MinWidth => "min-width", ValueKind::Length, false, LENGTH_AUTO;
    Opacity => "opacity", ValueKind::Float, false, NUMBER;
    Overflow => "overflow", ValueKind::Enum(EnumKind::Overflow), false, "visible | hidden | scroll";
    PaddingBottom => "padding-bottom", ValueKind::Length, false, LENGTH;
    PaddingLeft => "padding-left", ValueKind::Length, false, LENGTH;
    PaddingRight => "padding-right", ValueKind::Length, false, LENGTH;
    PaddingTop => "padding-top", ValueKind::Length, false, LENGTH;
    Position => "position", ValueKind::Enum(EnumKind::Position), false, "relative | absolute";
    Right => "right", ValueKind::Length, false, LENGTH_AUTO;
    Top => "top", ValueKind::Length, false, LENGTH_AUTO;
    UnityBackgroundImageTintColor => "-unity-background-image-tint-color", ValueKind::Color, false, COLOR;
    UnityBackgroundScaleMode => "-unity-background-scale-mode", ValueKind::Enum(EnumKind::ScaleMode), false,
        "stretch-to-fill | scale-and-crop | scale-to-fit";
    UnityFont => "-unity-font", ValueKind::Font, true, FONT;
    UnityFontStyle => "-unity-font-style", ValueKind::Enum(EnumKind::FontStyle), true,
        "normal | bold | italic | bold-and-italic";
    UnitySliceBottom => "-unity-slice-bottom", ValueKind::Int, false, INTEGER;
    UnitySliceLeft => "-unity-slice-left", ValueKind::Int, false, INTEGER;
    UnitySliceRight => "-unity-slice-right", ValueKind::Int, false, INTEGER;
    UnitySliceTop => "-unity-slice-top", ValueKind::Int, false, INTEGER;
    UnityTextAlign => "-unity-text-align", ValueKind::Enum(EnumKind::TextAnchor), true,
        "upper-left | upper-center | upper-right | middle-left | middle-center | middle-right | lower-left | lower-center | lower-right";
    Visibility => "visibility", ValueKind::Enum(EnumKind::Visibility), true, "visible | hidden";
    WhiteSpace => "white-space", ValueKind::Enum(EnumKind::WhiteSpace), true, "normal | nowrap";
    Width => "width", ValueKind::Length, false, LENGTH_AUTO;
}

/// Number of longhand fields in a resolved style bundle.
pub const LONGHAND_COUNT: usize = StylePropertyId::LONGHANDS.len();

/// Old property names still accepted, with their replacements.
const DEPRECATED_ALIASES: [(&str, StylePropertyId); 18] = [
    ("position-left", StylePropertyId::Left),
    ("position-top", StylePropertyId::Top),
    ("position-right", StylePropertyId::Right),
    ("position-bottom", StylePropertyId::Bottom),
    ("position-type", StylePropertyId::Position),
    ("text-color", StylePropertyId::Color),
    ("font", StylePropertyId::UnityFont),
    ("text-alignment", StylePropertyId::UnityTextAlign),
    ("word-wrap", StylePropertyId::WhiteSpace),
    ("slice-left", StylePropertyId::UnitySliceLeft),
    ("slice-top", StylePropertyId::UnitySliceTop),
    ("slice-right", StylePropertyId::UnitySliceRight),
    ("slice-bottom", StylePropertyId::UnitySliceBottom),
    ("border-left", StylePropertyId::BorderLeftWidth),
    ("border-top", StylePropertyId::BorderTopWidth),
    ("border-right", StylePropertyId::BorderRightWidth),
    ("border-bottom", StylePropertyId::BorderBottomWidth),
    ("background-size", StylePropertyId::UnityBackgroundScaleMode),
];

impl StylePropertyId {
    /// Exact lookup of a current CSS name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::LONGHANDS
            .iter()
            .chain(Self::SHORTHANDS.iter())
            .copied()
            .find(|id| id.name() == name)
    }

    /// Replacement for a deprecated name.
    pub fn from_deprecated_name(name: &str) -> Option<Self> {
        DEPRECATED_ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map(|&(_, id)| id)
    }

    /// Identify an authored property name. Deprecated names are rewritten
    /// with a warning; custom properties map to [`Self::Custom`] and anything
    /// else unrecognized to [`Self::Unknown`].
    pub fn resolve(name: &str) -> Self {
        if name.starts_with("--") {
            return Self::Custom;
        }
        if let Some(id) = Self::from_name(name) {
            return id;
        }
        if let Some(id) = Self::from_deprecated_name(name) {
            warn!("Style property '{name}' is deprecated, use '{}' instead", id.name());
            return id;
        }
        Self::Unknown
    }

    /// Field index of a longhand; `None` for shorthands and custom properties.
    #[inline]
    pub fn longhand_index(self) -> Option<usize> {
        let index = self as usize;
        (index < LONGHAND_COUNT).then_some(index)
    }

    #[inline]
    pub fn is_shorthand(self) -> bool {
        self.value_kind() == ValueKind::Shorthand
    }

    /// Longhands written by this property: the expansion for shorthands, the
    /// property itself for longhands, nothing otherwise. Four-side shorthands
    /// list their sides top, right, bottom, left (corners clockwise from
    /// top-left).
    pub fn longhands(self) -> &'static [Self] {
        match self {
            Self::BorderColor => &[
                Self::BorderTopColor,
                Self::BorderRightColor,
                Self::BorderBottomColor,
                Self::BorderLeftColor,
            ],
            Self::BorderRadius => &[
                Self::BorderTopLeftRadius,
                Self::BorderTopRightRadius,
                Self::BorderBottomRightRadius,
                Self::BorderBottomLeftRadius,
            ],
            Self::BorderWidth => &[
                Self::BorderTopWidth,
                Self::BorderRightWidth,
                Self::BorderBottomWidth,
                Self::BorderLeftWidth,
            ],
            Self::Flex => &[Self::FlexGrow, Self::FlexShrink, Self::FlexBasis],
            Self::Margin => &[
                Self::MarginTop,
                Self::MarginRight,
                Self::MarginBottom,
                Self::MarginLeft,
            ],
            Self::Padding => &[
                Self::PaddingTop,
                Self::PaddingRight,
                Self::PaddingBottom,
                Self::PaddingLeft,
            ],
            Self::Custom | Self::Unknown => &[],
            longhand => {
                let index = longhand as usize;
                Self::LONGHANDS.get(index..=index).unwrap_or_default()
            }
        }
    }
}
