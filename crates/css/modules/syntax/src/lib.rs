//! Style sheet import: CSS text to [`StyleSheet`].
//! Spec: <https://www.w3.org/TR/css-syntax-3/>
//!
//! Tokenization is done by `cssparser`. Qualified rules become
//! [`StyleRule`](css_stylesheet::StyleRule)s bound to their selector lists,
//! declaration values are stored in the sheet's value pools as they are read.
//! At-rules are skipped. Any other malformed input fails the import.

#![forbid(unsafe_code)]

mod values;

use core::error::Error;
use core::fmt::{self, Display, Formatter};

use cssparser::{
    AtRuleParser, BasicParseErrorKind, CowRcStr, DeclarationParser, ParseError, ParseErrorKind,
    Parser, ParserInput, ParserState, QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser,
    StyleSheetParser,
};
use css_selectors::{ComplexSelector, SelectorParseError, parse_selector_list};
use css_stylesheet::{StyleProperty, StyleSheet, StyleSheetBuilder};
use log::{debug, warn};

use values::{consume_rest, parse_values};

/// Why a style sheet could not be imported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportError {
    /// A rule prelude is not a valid selector list.
    InvalidSelector {
        line: u32,
        selector: String,
        reason: SelectorParseError,
    },
    /// A declaration value could not be stored.
    InvalidValue {
        line: u32,
        property: String,
        reason: String,
    },
    /// Tokens that do not form a rule or declaration.
    Syntax {
        line: u32,
        column: u32,
        reason: String,
    },
}

impl Display for ImportError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSelector {
                line,
                selector,
                reason,
            } => write!(formatter, "line {line}: invalid selector '{selector}': {reason}"),
            Self::InvalidValue {
                line,
                property,
                reason,
            } => write!(formatter, "line {line}: invalid value for '{property}': {reason}"),
            Self::Syntax {
                line,
                column,
                reason,
            } => write!(formatter, "line {line}, column {column}: {reason}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidSelector { reason, .. } => Some(reason),
            Self::InvalidValue { .. } | Self::Syntax { .. } => None,
        }
    }
}

fn is_at_rule(error: &ParseError<'_, ImportError>) -> bool {
    matches!(
        error.kind,
        ParseErrorKind::Basic(
            BasicParseErrorKind::AtRuleInvalid(_) | BasicParseErrorKind::AtRuleBodyInvalid
        )
    )
}

fn into_import_error(error: ParseError<'_, ImportError>) -> ImportError {
    match error.kind {
        ParseErrorKind::Custom(custom) => custom,
        ParseErrorKind::Basic(kind) => ImportError::Syntax {
            line: error.location.line + 1,
            column: error.location.column,
            reason: format!("{kind:?}"),
        },
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default().trim()
}

/// A declaration parser that stores each value into the sheet being built.
struct BodyDeclParser<'builder> {
    builder: &'builder mut StyleSheetBuilder,
}

impl<'input> DeclarationParser<'input> for BodyDeclParser<'_> {
    type Declaration = StyleProperty;
    type Error = ImportError;

    fn parse_value<'tokens>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, 'tokens>,
        declaration_start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'input, Self::Error>> {
        let line = declaration_start.source_location().line + 1;
        let raw_name: &str = &name;
        // Custom property names are case-sensitive.
        let name = if raw_name.starts_with("--") {
            raw_name.to_owned()
        } else {
            raw_name.to_ascii_lowercase()
        };
        let values = parse_values(self.builder, &name, input)?;
        // An empty custom property is a valid, empty binding.
        if values.is_empty() && !name.starts_with("--") {
            return Err(input.new_custom_error(ImportError::InvalidValue {
                line,
                property: name,
                reason: "missing value".to_owned(),
            }));
        }
        Ok(StyleProperty::new(name, values, line))
    }
}

impl<'input> AtRuleParser<'input> for BodyDeclParser<'_> {
    type Prelude = ();
    type AtRule = StyleProperty;
    type Error = ImportError;
}

impl<'input> QualifiedRuleParser<'input> for BodyDeclParser<'_> {
    type Prelude = ();
    type QualifiedRule = StyleProperty;
    type Error = ImportError;
}

impl<'input> RuleBodyItemParser<'input, StyleProperty, ImportError> for BodyDeclParser<'_> {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Top-level parser that adds one rule per qualified rule.
struct TopLevelParser<'builder> {
    builder: &'builder mut StyleSheetBuilder,
}

impl<'input> AtRuleParser<'input> for TopLevelParser<'_> {
    type Prelude = ();
    type AtRule = ();
    type Error = ImportError;
}

impl<'input> QualifiedRuleParser<'input> for TopLevelParser<'_> {
    type Prelude = Vec<ComplexSelector>;
    type QualifiedRule = ();
    type Error = ImportError;

    fn parse_prelude<'tokens>(
        &mut self,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        let location = input.current_source_location();
        let text = consume_rest(input)?.trim();
        parse_selector_list(text).map_err(|reason| {
            location.new_custom_error(ImportError::InvalidSelector {
                line: location.line + 1,
                selector: text.to_owned(),
                reason,
            })
        })
    }

    fn parse_block<'tokens>(
        &mut self,
        prelude: Self::Prelude,
        start: &ParserState,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::QualifiedRule, ParseError<'input, Self::Error>> {
        let line = start.source_location().line + 1;
        let properties = parse_declarations(self.builder, input)?;
        let rule_index = self.builder.add_rule(properties, line);
        for selector in prelude {
            self.builder.add_selector(rule_index, selector);
        }
        Ok(())
    }
}

/// Parse declarations from a rule block using the `cssparser` body parser.
fn parse_declarations<'input>(
    builder: &mut StyleSheetBuilder,
    input: &mut Parser<'input, '_>,
) -> Result<Vec<StyleProperty>, ParseError<'input, ImportError>> {
    let mut body = BodyDeclParser { builder };
    let mut properties = Vec::new();
    for item in RuleBodyParser::new(input, &mut body) {
        match item {
            Ok(property) => properties.push(property),
            Err((error, slice)) if is_at_rule(&error) => {
                warn!("Skipping at-rule inside declaration block: {}", first_line(slice));
            }
            Err((error, _)) => return Err(error),
        }
    }
    Ok(properties)
}

/// Parse a full style sheet.
///
/// # Errors
/// Returns the first invalid selector, value or syntax error. At-rules are
/// skipped with a warning rather than reported.
pub fn parse_stylesheet(css: &str) -> Result<StyleSheet, ImportError> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut builder = StyleSheetBuilder::new();
    let mut top = TopLevelParser {
        builder: &mut builder,
    };
    for item in StyleSheetParser::new(&mut parser, &mut top) {
        match item {
            Ok(()) => {}
            Err((error, slice)) if is_at_rule(&error) => {
                warn!("Skipping unsupported at-rule: {}", first_line(slice));
            }
            Err((error, _)) => return Err(into_import_error(error)),
        }
    }
    let sheet = builder.build();
    debug!(
        "Imported style sheet {:?}: {} rules, {} selectors",
        sheet.id(),
        sheet.rules().len(),
        sheet.selectors().len()
    );
    Ok(sheet)
}

/// Parse the text of an inline `style` attribute (`a: b; c: d`) into a sheet
/// holding a single rule and no selectors.
///
/// # Errors
/// Returns the first invalid value or syntax error.
pub fn parse_inline_style(text: &str) -> Result<StyleSheet, ImportError> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut builder = StyleSheetBuilder::new();
    let properties = parse_declarations(&mut builder, &mut parser).map_err(into_import_error)?;
    builder.add_rule(properties, 1);
    Ok(builder.build())
}
