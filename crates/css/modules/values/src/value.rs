//! Typed values held by a resolved style bundle.

use crate::{Color, Length, StyleValueKeyword};

/// Keyword state of a resolved style value.
///
/// `Undefined` means no declaration reached the property; the other variants
/// are authored keywords that the computed-style pass resolves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StyleKeyword {
    #[default]
    Undefined,
    Null,
    Auto,
    None,
    Initial,
    Inherit,
    Unset,
}

impl From<StyleValueKeyword> for StyleKeyword {
    fn from(keyword: StyleValueKeyword) -> Self {
        match keyword {
            StyleValueKeyword::Inherit => Self::Inherit,
            StyleValueKeyword::Initial => Self::Initial,
            StyleValueKeyword::Auto => Self::Auto,
            StyleValueKeyword::Unset => Self::Unset,
            StyleValueKeyword::None => Self::None,
            StyleValueKeyword::True | StyleValueKeyword::False => Self::Null,
        }
    }
}

/// Opaque font resource handed out by the host's resource provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u32);

/// Opaque image resource handed out by the host's resource provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

impl ImageHandle {
    /// Placeholder drawn when an image reference cannot be resolved.
    pub const MISSING: Self = Self(u32::MAX);
}

/// Mouse cursor: a texture with a hotspot, or one of the host's built-in cursors.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cursor {
    pub texture: Option<ImageHandle>,
    pub hotspot: (f32, f32),
    pub default_cursor_id: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Background {
    pub image: Option<ImageHandle>,
}

/// Resolved value of one style property.
///
/// Exactly one interpretation is valid per property; the property id decides
/// which variant is authoritative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StyleValue {
    Keyword(StyleKeyword),
    Float(f32),
    Int(i32),
    Enum(i32),
    Color(Color),
    Length(Length),
    Font(FontHandle),
    Cursor(Cursor),
    Background(Background),
}

impl Default for StyleValue {
    #[inline]
    fn default() -> Self {
        Self::Keyword(StyleKeyword::Undefined)
    }
}

impl StyleValue {
    #[inline]
    pub fn keyword(&self) -> Option<StyleKeyword> {
        match *self {
            Self::Keyword(keyword) => Some(keyword),
            _ => None,
        }
    }

    #[inline]
    pub fn is_undefined(&self) -> bool {
        self.keyword() == Some(StyleKeyword::Undefined)
    }

    pub fn as_float(&self) -> Option<f32> {
        match *self {
            Self::Float(value) => Some(value),
            Self::Int(value) => Some(value as f32),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match *self {
            Self::Int(value) => Some(value),
            Self::Float(value) => Some(value as i32),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<i32> {
        match *self {
            Self::Enum(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match *self {
            Self::Color(color) => Some(color),
            _ => None,
        }
    }

    pub fn as_length(&self) -> Option<Length> {
        match *self {
            Self::Length(length) => Some(length),
            _ => None,
        }
    }

    pub fn as_font(&self) -> Option<FontHandle> {
        match *self {
            Self::Font(font) => Some(font),
            _ => None,
        }
    }

    pub fn as_cursor(&self) -> Option<Cursor> {
        match *self {
            Self::Cursor(cursor) => Some(cursor),
            _ => None,
        }
    }

    pub fn as_background(&self) -> Option<Background> {
        match *self {
            Self::Background(background) => Some(background),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_value_is_undefined() {
        assert!(StyleValue::default().is_undefined());
        assert!(!StyleValue::Float(0.0).is_undefined());
    }

    #[test]
    fn accessors_only_answer_for_their_variant() {
        let value = StyleValue::Length(Length::percent(50.0));
        assert_eq!(value.as_length(), Some(Length::percent(50.0)));
        assert_eq!(value.as_color(), None);
        assert_eq!(StyleValue::Int(3).as_float(), Some(3.0));
    }
}
