//! Typed reads from the value pools.

use css_values::{
    Color, Dimension, DimensionUnit, StyleSheetError, StyleValueFunction, StyleValueHandle,
    StyleValueKeyword, StyleValueType,
};

use crate::{AssetReference, StyleSheet};

fn check_type(
    handle: StyleValueHandle,
    expected: StyleValueType,
) -> Result<(), StyleSheetError> {
    if handle.value_type == expected {
        Ok(())
    } else {
        Err(StyleSheetError::InvalidValue {
            expected,
            found: handle.value_type,
        })
    }
}

fn pool_get<T>(pool: &[T], handle: StyleValueHandle) -> Result<&T, StyleSheetError> {
    pool.get(handle.index)
        .ok_or(StyleSheetError::IndexOutOfRange {
            value_type: handle.value_type,
            index: handle.index,
        })
}

impl StyleSheet {
    /// # Errors
    /// Fails if the handle is not a keyword or its index is not a keyword.
    pub fn read_keyword(
        &self,
        handle: StyleValueHandle,
    ) -> Result<StyleValueKeyword, StyleSheetError> {
        check_type(handle, StyleValueType::Keyword)?;
        StyleValueKeyword::from_index(handle.index).ok_or(StyleSheetError::IndexOutOfRange {
            value_type: handle.value_type,
            index: handle.index,
        })
    }

    /// Read a number. Dimensions are accepted and read without their unit.
    ///
    /// # Errors
    /// Fails for any other value type or an out-of-range index.
    pub fn read_float(&self, handle: StyleValueHandle) -> Result<f32, StyleSheetError> {
        match handle.value_type {
            StyleValueType::Dimension => {
                pool_get(&self.dimensions, handle).map(|dimension| dimension.value)
            }
            _ => {
                check_type(handle, StyleValueType::Float)?;
                pool_get(&self.floats, handle).copied()
            }
        }
    }

    /// Read a dimension. Plain numbers are accepted as unitless dimensions.
    ///
    /// # Errors
    /// Fails for any other value type or an out-of-range index.
    pub fn read_dimension(&self, handle: StyleValueHandle) -> Result<Dimension, StyleSheetError> {
        match handle.value_type {
            StyleValueType::Float => pool_get(&self.floats, handle)
                .map(|&value| Dimension::new(value, DimensionUnit::Unitless)),
            _ => {
                check_type(handle, StyleValueType::Dimension)?;
                pool_get(&self.dimensions, handle).copied()
            }
        }
    }

    /// Read a color. Identifiers naming a CSS color are accepted.
    ///
    /// # Errors
    /// Fails for other value types, unknown color names, or an out-of-range index.
    pub fn read_color(&self, handle: StyleValueHandle) -> Result<Color, StyleSheetError> {
        match handle.value_type {
            StyleValueType::Enum => {
                let name = pool_get(&self.strings, handle)?;
                Color::from_name(name).ok_or(StyleSheetError::InvalidValue {
                    expected: StyleValueType::Color,
                    found: StyleValueType::Enum,
                })
            }
            _ => {
                check_type(handle, StyleValueType::Color)?;
                pool_get(&self.colors, handle).copied()
            }
        }
    }

    /// # Errors
    /// Fails if the handle is not a string or its index is out of range.
    pub fn read_string(&self, handle: StyleValueHandle) -> Result<&str, StyleSheetError> {
        check_type(handle, StyleValueType::String)?;
        pool_get(&self.strings, handle).map(String::as_str)
    }

    /// Read an identifier.
    ///
    /// # Errors
    /// Fails if the handle is not an enum or its index is out of range.
    pub fn read_enum(&self, handle: StyleValueHandle) -> Result<&str, StyleSheetError> {
        check_type(handle, StyleValueType::Enum)?;
        pool_get(&self.strings, handle).map(String::as_str)
    }

    /// Read a `--custom` property name.
    ///
    /// # Errors
    /// Fails if the handle is not a variable or its index is out of range.
    pub fn read_variable(&self, handle: StyleValueHandle) -> Result<&str, StyleSheetError> {
        check_type(handle, StyleValueType::Variable)?;
        pool_get(&self.strings, handle).map(String::as_str)
    }

    /// # Errors
    /// Fails if the handle is not a resource path or its index is out of range.
    pub fn read_resource_path(&self, handle: StyleValueHandle) -> Result<&str, StyleSheetError> {
        check_type(handle, StyleValueType::ResourcePath)?;
        pool_get(&self.strings, handle).map(String::as_str)
    }

    /// # Errors
    /// Fails if the handle is not an asset reference or its index is out of range.
    pub fn read_asset(&self, handle: StyleValueHandle) -> Result<&AssetReference, StyleSheetError> {
        check_type(handle, StyleValueType::AssetReference)?;
        pool_get(&self.assets, handle)
    }

    /// Path of an asset the importer could not resolve.
    ///
    /// # Errors
    /// Fails if the handle is not a missing asset reference or its index is out of range.
    pub fn read_missing_asset(&self, handle: StyleValueHandle) -> Result<&str, StyleSheetError> {
        check_type(handle, StyleValueType::MissingAssetReference)?;
        pool_get(&self.strings, handle).map(String::as_str)
    }

    /// # Errors
    /// Fails if the handle is not a function.
    pub fn read_function(
        &self,
        handle: StyleValueHandle,
    ) -> Result<StyleValueFunction, StyleSheetError> {
        check_type(handle, StyleValueType::Function)?;
        Ok(StyleValueFunction::from_index(handle.index))
    }

    /// Text of a value for diagnostics.
    pub fn describe(&self, handle: StyleValueHandle) -> String {
        let text = match handle.value_type {
            StyleValueType::Keyword => self.read_keyword(handle).map(|keyword| keyword.as_str().to_owned()),
            StyleValueType::Float => self.read_float(handle).map(|value| value.to_string()),
            StyleValueType::Dimension => self
                .read_dimension(handle)
                .map(|dimension| format!("{}{:?}", dimension.value, dimension.unit)),
            StyleValueType::Color => self.read_color(handle).map(|color| format!("{color:?}")),
            StyleValueType::AssetReference => self.read_asset(handle).map(|asset| asset.path.clone()),
            StyleValueType::String => self.read_string(handle).map(|text| format!("\"{text}\"")),
            StyleValueType::Enum
            | StyleValueType::Variable
            | StyleValueType::ResourcePath
            | StyleValueType::MissingAssetReference => {
                pool_get(&self.strings, handle).map(Clone::clone)
            }
            StyleValueType::Function => self.read_function(handle).map(|function| format!("{function:?}(")),
            StyleValueType::CommaSeparator => Ok(",".to_owned()),
            StyleValueType::Invalid => Ok("<invalid>".to_owned()),
        };
        text.unwrap_or_else(|err| format!("<{err}>"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StyleSheetBuilder;

    #[test]
    fn float_reader_accepts_dimensions() {
        let mut builder = StyleSheetBuilder::new();
        let dimension = builder.dimension(Dimension::new(4.0, DimensionUnit::Pixel));
        let float = builder.float(2.0);
        let sheet = builder.build();
        assert_eq!(sheet.read_float(dimension), Ok(4.0));
        assert_eq!(
            sheet.read_dimension(float),
            Ok(Dimension::new(2.0, DimensionUnit::Unitless))
        );
    }

    #[test]
    fn mismatched_type_is_a_decode_error() {
        let mut builder = StyleSheetBuilder::new();
        let float = builder.float(2.0);
        let sheet = builder.build();
        assert_eq!(
            sheet.read_color(float),
            Err(StyleSheetError::InvalidValue {
                expected: StyleValueType::Color,
                found: StyleValueType::Float,
            })
        );
    }

    #[test]
    fn out_of_range_index_is_reported() {
        let sheet = StyleSheetBuilder::new().build();
        let handle = StyleValueHandle::new(StyleValueType::Float, 3);
        assert_eq!(
            sheet.read_float(handle),
            Err(StyleSheetError::IndexOutOfRange {
                value_type: StyleValueType::Float,
                index: 3,
            })
        );
    }

    #[test]
    fn named_colors_read_as_colors() {
        let mut builder = StyleSheetBuilder::new();
        let red = builder.string(StyleValueType::Enum, "red");
        let sheet = builder.build();
        assert_eq!(sheet.read_color(red).map(Color::to_rgba8), Ok([255, 0, 0, 255]));
    }

    #[test]
    fn strings_read_and_describe_quoted() {
        let mut builder = StyleSheetBuilder::new();
        let text = builder.string(StyleValueType::String, "hello");
        let ident = builder.string(StyleValueType::Enum, "row");
        let sheet = builder.build();
        assert_eq!(sheet.read_string(text), Ok("hello"));
        assert_eq!(sheet.describe(text), "\"hello\"");
        assert_eq!(sheet.describe(ident), "row");
        assert_eq!(
            sheet.read_string(ident),
            Err(StyleSheetError::InvalidValue {
                expected: StyleValueType::String,
                found: StyleValueType::Enum,
            })
        );
    }
}
