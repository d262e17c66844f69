//! Dimensions as written in a sheet, and lengths as stored in resolved styles.

/// Units a sheet dimension can carry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DimensionUnit {
    #[default]
    Unitless,
    Pixel,
    Percent,
    Second,
    Millisecond,
    Degree,
}

impl DimensionUnit {
    /// Unit for a CSS unit suffix (`px`, `%`, ...).
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        let unit = match suffix.to_ascii_lowercase().as_str() {
            "" => Self::Unitless,
            "px" => Self::Pixel,
            "%" => Self::Percent,
            "s" => Self::Second,
            "ms" => Self::Millisecond,
            "deg" => Self::Degree,
            _ => return None,
        };
        Some(unit)
    }
}

/// A number with a unit, as imported.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Dimension {
    pub value: f32,
    pub unit: DimensionUnit,
}

impl Dimension {
    #[inline]
    pub const fn new(value: f32, unit: DimensionUnit) -> Self {
        Self { value, unit }
    }

    /// Convert to a layout length. Unitless numbers are taken as pixels;
    /// units that are not lengths yield `None`.
    pub fn to_length(self) -> Option<Length> {
        match self.unit {
            DimensionUnit::Unitless | DimensionUnit::Pixel => Some(Length::pixels(self.value)),
            DimensionUnit::Percent => Some(Length::percent(self.value)),
            DimensionUnit::Second | DimensionUnit::Millisecond | DimensionUnit::Degree => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    #[default]
    Pixel,
    Percent,
}

/// A resolved length. `auto`/`none` are keywords, not lengths.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Length {
    pub value: f32,
    pub unit: LengthUnit,
}

impl Length {
    #[inline]
    pub const fn pixels(value: f32) -> Self {
        Self {
            value,
            unit: LengthUnit::Pixel,
        }
    }

    #[inline]
    pub const fn percent(value: f32) -> Self {
        Self {
            value,
            unit: LengthUnit::Percent,
        }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::pixels(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unitless_dimensions_become_pixels() {
        let dimension = Dimension::new(12.0, DimensionUnit::Unitless);
        assert_eq!(dimension.to_length(), Some(Length::pixels(12.0)));
    }

    #[test]
    fn time_units_are_not_lengths() {
        assert_eq!(Dimension::new(1.0, DimensionUnit::Second).to_length(), None);
        assert_eq!(DimensionUnit::from_suffix("MS"), Some(DimensionUnit::Millisecond));
        assert_eq!(DimensionUnit::from_suffix("em"), None);
    }
}
