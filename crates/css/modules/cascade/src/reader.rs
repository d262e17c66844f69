//! Typed reads over a declaration's resolved values.

use css_properties::{StylePropertyId, enum_ident};
use css_values::{
    Color, Length, StyleKeyword, StyleSheetError, StyleValue, StyleValueKeyword, StyleValueType,
};
use css_variables::StylePropertyValue;
use log::error;

/// Reads the values of one declaration by position.
///
/// Decode failures are logged and replaced by a default so a bad value never
/// aborts a cascade.
pub struct StylePropertyReader<'values> {
    property: StylePropertyId,
    values: &'values [StylePropertyValue],
}

impl<'values> StylePropertyReader<'values> {
    pub fn new(property: StylePropertyId, values: &'values [StylePropertyValue]) -> Self {
        Self { property, values }
    }

    #[inline]
    pub fn property(&self) -> StylePropertyId {
        self.property
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&'values StylePropertyValue> {
        self.values.get(index)
    }

    /// Type of the value at `index`; [`StyleValueType::Invalid`] past the end.
    pub fn value_type(&self, index: usize) -> StyleValueType {
        self.get(index)
            .map_or(StyleValueType::Invalid, |value| value.handle.value_type)
    }

    /// Keyword at `index`, if that value is one.
    pub fn keyword(&self, index: usize) -> Option<StyleValueKeyword> {
        self.get(index)
            .filter(|value| value.handle.value_type == StyleValueType::Keyword)
            .and_then(|value| self.decoded(value.sheet.read_keyword(value.handle)))
    }

    /// The CSS-wide keyword making up the whole declaration, if any.
    pub fn css_wide_keyword(&self) -> Option<StyleValueKeyword> {
        match self.values {
            [_] => self.keyword(0).filter(|keyword| keyword.is_css_wide()),
            _ => None,
        }
    }

    /// Identifier text at `index`: an enum string or a plain keyword.
    pub fn ident(&self, index: usize) -> Option<&'values str> {
        self.get(index)
            .and_then(|value| enum_ident(&value.sheet, value.handle))
    }

    pub fn read_float(&self, index: usize) -> f32 {
        self.read(index, |value| value.sheet.read_float(value.handle))
            .unwrap_or_default()
    }

    pub fn read_int(&self, index: usize) -> i32 {
        self.read_float(index) as i32
    }

    pub fn read_color(&self, index: usize) -> Color {
        self.read(index, |value| value.sheet.read_color(value.handle))
            .unwrap_or(Color::CLEAR)
    }

    /// A length, or the `auto`/`none` keyword stored as a keyword value.
    pub fn read_length(&self, index: usize) -> StyleValue {
        if let Some(keyword @ (StyleValueKeyword::Auto | StyleValueKeyword::None)) =
            self.keyword(index)
        {
            return StyleValue::Keyword(StyleKeyword::from(keyword));
        }
        let Some(dimension) = self.read(index, |value| value.sheet.read_dimension(value.handle))
        else {
            return StyleValue::Length(Length::zero());
        };
        if let Some(length) = dimension.to_length() {
            StyleValue::Length(length)
        } else {
            error!(
                "'{}' expects a length, got {:?}",
                self.property.name(),
                dimension.unit
            );
            StyleValue::Length(Length::zero())
        }
    }

    /// Path of a resource or asset reference at `index`.
    pub fn read_path(&self, index: usize) -> Option<&'values str> {
        let value = self.get(index)?;
        let sheet = &value.sheet;
        let path = match value.handle.value_type {
            StyleValueType::ResourcePath => sheet.read_resource_path(value.handle),
            StyleValueType::AssetReference => sheet
                .read_asset(value.handle)
                .map(|asset| asset.path.as_str()),
            StyleValueType::MissingAssetReference => sheet.read_missing_asset(value.handle),
            found => Err(StyleSheetError::InvalidValue {
                expected: StyleValueType::ResourcePath,
                found,
            }),
        };
        self.decoded(path)
    }

    fn read<T>(
        &self,
        index: usize,
        decode: impl FnOnce(&StylePropertyValue) -> Result<T, StyleSheetError>,
    ) -> Option<T> {
        let Some(value) = self.get(index) else {
            error!(
                "'{}' has no value at position {index}",
                self.property.name()
            );
            return None;
        };
        self.decoded(decode(value))
    }

    fn decoded<T>(&self, result: Result<T, StyleSheetError>) -> Option<T> {
        result
            .inspect_err(|err| error!("Invalid value for '{}': {err}", self.property.name()))
            .ok()
    }
}
