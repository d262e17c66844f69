//! Colors with floating point channels.

use core::hash::{Hash, Hasher};

/// Linear RGBA color, each channel in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    pub const CLEAR: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn rgba(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Parse any CSS color syntax: names, hex forms and functional notations.
    pub fn parse(input: &str) -> Option<Self> {
        let parsed: csscolorparser::Color = input.trim().parse().ok()?;
        let [red, green, blue, alpha] = parsed.to_rgba8().map(|channel| f32::from(channel) / 255.0);
        Some(Self::rgba(red, green, blue, alpha))
    }

    /// Resolve a bare identifier as a named color. Hex and functional forms
    /// are rejected so that arbitrary keywords never turn into colors.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.is_empty() || !name.chars().all(|character| character.is_ascii_alphabetic()) {
            return None;
        }
        Self::parse(name)
    }

    /// 8-bit channels, rounded.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
            .map(|channel| (channel.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.red.to_bits().hash(state);
        self.green.to_bits().hash(state);
        self.blue.to_bits().hash(state);
        self.alpha.to_bits().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_names() {
        assert_eq!(Color::parse("#ff0000").map(Color::to_rgba8), Some([255, 0, 0, 255]));
        assert_eq!(Color::from_name("blue").map(Color::to_rgba8), Some([0, 0, 255, 255]));
    }

    #[test]
    fn keywords_are_not_named_colors() {
        assert_eq!(Color::from_name("flex-start"), None);
        assert_eq!(Color::from_name("#fff"), None);
    }
}
