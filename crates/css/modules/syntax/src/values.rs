//! Declaration value tokens to pooled value handles.

use cssparser::{ParseError, Parser, SourceLocation, Token};
use css_stylesheet::StyleSheetBuilder;
use css_values::{
    Color, Dimension, DimensionUnit, StyleValueFunction, StyleValueHandle, StyleValueKeyword,
    StyleValueType,
};
use log::warn;

use crate::ImportError;

/// Consume the rest of the input and return its raw text.
pub(crate) fn consume_rest<'input>(
    input: &mut Parser<'input, '_>,
) -> Result<&'input str, ParseError<'input, ImportError>> {
    let start = input.position();
    while input.next_including_whitespace_and_comments().is_ok() {}
    Ok(input.slice_from(start))
}

fn invalid<'input>(location: SourceLocation, property: &str, reason: String) -> ParseError<'input, ImportError> {
    location.new_custom_error(ImportError::InvalidValue {
        line: location.line + 1,
        property: property.to_owned(),
        reason,
    })
}

fn ident_value(builder: &mut StyleSheetBuilder, ident: &str) -> StyleValueHandle {
    if ident.starts_with("--") {
        builder.string(StyleValueType::Variable, ident)
    } else if let Some(keyword) = StyleValueKeyword::from_ident(ident) {
        StyleValueHandle::keyword(keyword)
    } else {
        builder.string(StyleValueType::Enum, ident)
    }
}

/// Read a declaration value into handles.
///
/// Function calls other than colors and paths are stored as the function
/// handle, a float holding the number of handles that follow for its
/// arguments, then the arguments themselves. Commas become separators.
pub(crate) fn parse_values<'input>(
    builder: &mut StyleSheetBuilder,
    property: &str,
    input: &mut Parser<'input, '_>,
) -> Result<Vec<StyleValueHandle>, ParseError<'input, ImportError>> {
    let mut values = Vec::new();
    loop {
        let start = input.position();
        let location = input.current_source_location();
        let Ok(token) = input.next().cloned() else {
            break;
        };
        match token {
            Token::Number { value, .. } => values.push(builder.float(value)),
            Token::Percentage { unit_value, .. } => values.push(
                builder.dimension(Dimension::new(unit_value * 100.0, DimensionUnit::Percent)),
            ),
            Token::Dimension {
                value, ref unit, ..
            } => {
                let Some(dimension_unit) = DimensionUnit::from_suffix(unit) else {
                    return Err(invalid(location, property, format!("unsupported unit '{}'", &**unit)));
                };
                values.push(builder.dimension(Dimension::new(value, dimension_unit)));
            }
            Token::Ident(ref ident) => values.push(ident_value(builder, ident)),
            Token::Hash(ref hex) | Token::IDHash(ref hex) => {
                let Some(color) = Color::parse(&format!("#{}", &**hex)) else {
                    return Err(invalid(location, property, format!("invalid color '#{}'", &**hex)));
                };
                values.push(builder.color(color));
            }
            Token::QuotedString(ref text) => values.push(builder.string(StyleValueType::String, text)),
            Token::UnquotedUrl(ref path) => values.push(builder.asset(path)),
            Token::Comma => values.push(StyleValueHandle::comma()),
            Token::Delim('!') => {
                if input.try_parse(|next| next.expect_ident_matching("important")).is_ok() {
                    warn!("Ignoring !important on '{property}' at line {}", location.line + 1);
                    break;
                }
                return Err(invalid(location, property, "unexpected '!'".to_owned()));
            }
            Token::Function(ref name) => {
                let lowered = name.to_ascii_lowercase();
                match lowered.as_str() {
                    "rgb" | "rgba" | "hsl" | "hsla" | "hwb" => {
                        input.parse_nested_block(consume_rest)?;
                        let text = input.slice_from(start);
                        let Some(color) = Color::parse(text) else {
                            return Err(invalid(location, property, format!("invalid color '{}'", text.trim())));
                        };
                        values.push(builder.color(color));
                    }
                    "url" | "resource" => {
                        let raw = input.parse_nested_block(consume_rest)?;
                        let path = raw.trim().trim_matches(['"', '\'']);
                        if path.is_empty() {
                            return Err(invalid(location, property, format!("empty {lowered}()")));
                        }
                        let handle = if lowered == "url" {
                            builder.asset(path)
                        } else {
                            builder.string(StyleValueType::ResourcePath, path)
                        };
                        values.push(handle);
                    }
                    _ => {
                        let arguments =
                            input.parse_nested_block(|nested| parse_values(builder, property, nested))?;
                        values.push(StyleValueHandle::function(StyleValueFunction::from_name(&lowered)));
                        values.push(builder.float(arguments.len() as f32));
                        values.extend(arguments);
                    }
                }
            }
            other => {
                return Err(invalid(location, property, format!("unexpected token {other:?}")));
            }
        }
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cssparser::ParserInput;
    use css_stylesheet::StyleSheet;

    fn handles(text: &str) -> (Vec<StyleValueType>, StyleSheet) {
        let mut input = ParserInput::new(text);
        let mut parser = Parser::new(&mut input);
        let mut builder = StyleSheetBuilder::new();
        let values = parse_values(&mut builder, "test", &mut parser).unwrap_or_default();
        (
            values.iter().map(|value| value.value_type).collect(),
            builder.build(),
        )
    }

    #[test]
    fn nested_var_fallback_is_counted_by_the_outer_call() {
        let (types, _) = handles("var(--a, var(--b, 1px))");
        assert_eq!(types.len(), 9);
        assert_eq!(types.first(), Some(&StyleValueType::Function));
        assert_eq!(types.get(4), Some(&StyleValueType::Function));
    }

    #[test]
    fn idents_split_into_keywords_variables_and_enums() {
        let (types, _) = handles("none --x flex-start");
        assert_eq!(
            types,
            vec![StyleValueType::Keyword, StyleValueType::Variable, StyleValueType::Enum]
        );
    }

    #[test]
    fn unknown_functions_keep_their_arguments() {
        let (types, sheet) = handles("linear-gradient(red, blue)");
        assert_eq!(types.len(), 5);
        let count = StyleValueHandle::new(StyleValueType::Float, 0);
        assert_eq!(sheet.read_float(count), Ok(3.0));
    }
}
