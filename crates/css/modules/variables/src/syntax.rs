//! Property value grammars.
//!
//! A small subset of the CSS value definition syntax: `|` alternatives,
//! juxtaposition, `[ ]` groups, the multipliers `? * + {m} {m,} {m,n}`,
//! `<data-type>` references and literal identifiers.

use core::error::Error;
use core::fmt::{self, Display, Formatter};
use std::collections::HashMap;
use std::rc::Rc;

use css_properties::StylePropertyId;
use log::error;

/// Data types a grammar can reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    Length,
    Percentage,
    Number,
    Integer,
    Color,
    Resource,
    Url,
    CustomIdent,
    String,
}

impl DataType {
    fn from_name(name: &str) -> Option<Self> {
        let data_type = match name {
            "length" => Self::Length,
            "percentage" => Self::Percentage,
            "number" => Self::Number,
            "integer" => Self::Integer,
            "color" => Self::Color,
            "resource" => Self::Resource,
            "url" => Self::Url,
            "custom-ident" => Self::CustomIdent,
            "string" => Self::String,
            _ => return None,
        };
        Some(data_type)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
    Keyword(String),
    Type(DataType),
    Group(Expression),
}

/// A term repeated between `min` and `max` times (`None` is unbounded).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    pub term: Term,
    pub min: usize,
    pub max: Option<usize>,
}

/// Alternatives, each a juxtaposed sequence of components.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Expression {
    pub alternatives: Vec<Vec<Component>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyntaxError {
    UnexpectedEnd,
    UnexpectedCharacter(char),
    UnknownDataType(String),
    EmptyAlternative,
    InvalidMultiplier,
}

impl Display for SyntaxError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEnd => formatter.write_str("unexpected end of grammar"),
            Self::UnexpectedCharacter(character) => {
                write!(formatter, "unexpected '{character}' in grammar")
            }
            Self::UnknownDataType(name) => write!(formatter, "unknown data type <{name}>"),
            Self::EmptyAlternative => formatter.write_str("empty alternative"),
            Self::InvalidMultiplier => formatter.write_str("invalid multiplier"),
        }
    }
}

impl Error for SyntaxError {}

struct GrammarParser<'src> {
    input: &'src str,
    index: usize,
}

impl<'src> GrammarParser<'src> {
    fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.input.get(self.index..).and_then(|rest| rest.chars().next())
    }

    fn skip_whitespace(&mut self) {
        while let Some(current) = self.input.get(self.index..).and_then(|rest| rest.chars().next()) {
            if !current.is_whitespace() {
                break;
            }
            self.index += current.len_utf8();
        }
    }

    fn bump(&mut self, character: char) {
        self.index += character.len_utf8();
    }

    fn expect(&mut self, expected: char) -> Result<(), SyntaxError> {
        match self.peek() {
            Some(current) if current == expected => {
                self.bump(current);
                Ok(())
            }
            Some(current) => Err(SyntaxError::UnexpectedCharacter(current)),
            None => Err(SyntaxError::UnexpectedEnd),
        }
    }

    fn take_while(&mut self, accept: impl Fn(char) -> bool) -> &'src str {
        let start = self.index;
        while let Some(current) = self.input.get(self.index..).and_then(|rest| rest.chars().next()) {
            if !accept(current) {
                break;
            }
            self.index += current.len_utf8();
        }
        self.input.get(start..self.index).unwrap_or_default()
    }

    fn parse_expression(&mut self) -> Result<Expression, SyntaxError> {
        let mut alternatives = vec![self.parse_sequence()?];
        while self.peek() == Some('|') {
            self.bump('|');
            alternatives.push(self.parse_sequence()?);
        }
        Ok(Expression { alternatives })
    }

    fn parse_sequence(&mut self) -> Result<Vec<Component>, SyntaxError> {
        let mut components = Vec::new();
        while let Some(current) = self.peek() {
            let term = match current {
                '[' => {
                    self.bump(current);
                    let group = self.parse_expression()?;
                    self.expect(']')?;
                    Term::Group(group)
                }
                '<' => {
                    self.bump(current);
                    let name = self.take_while(|character| character != '>');
                    self.expect('>')?;
                    let data_type = DataType::from_name(name.trim())
                        .ok_or_else(|| SyntaxError::UnknownDataType(name.trim().to_owned()))?;
                    Term::Type(data_type)
                }
                '|' | ']' => break,
                _ if is_ident_char(current) => Term::Keyword(self.take_while(is_ident_char).to_owned()),
                other => return Err(SyntaxError::UnexpectedCharacter(other)),
            };
            let (min, max) = self.parse_multiplier()?;
            components.push(Component { term, min, max });
        }
        if components.is_empty() {
            return Err(SyntaxError::EmptyAlternative);
        }
        Ok(components)
    }

    fn parse_multiplier(&mut self) -> Result<(usize, Option<usize>), SyntaxError> {
        // A multiplier must follow its term directly.
        let Some(current) = self.input.get(self.index..).and_then(|rest| rest.chars().next()) else {
            return Ok((1, Some(1)));
        };
        let bounds = match current {
            '?' => (0, Some(1)),
            '*' => (0, None),
            '+' => (1, None),
            '{' => {
                self.bump(current);
                let body = self.take_while(|character| character != '}');
                self.expect('}')?;
                return parse_range(body);
            }
            _ => return Ok((1, Some(1))),
        };
        self.bump(current);
        Ok(bounds)
    }
}

fn parse_range(body: &str) -> Result<(usize, Option<usize>), SyntaxError> {
    let number = |text: &str| text.trim().parse::<usize>().map_err(|_| SyntaxError::InvalidMultiplier);
    let bounds = match body.split_once(',') {
        None => {
            let count = number(body)?;
            (count, Some(count))
        }
        Some((min, max)) if max.trim().is_empty() => (number(min)?, None),
        Some((min, max)) => (number(min)?, Some(number(max)?)),
    };
    if bounds.1.is_some_and(|max| max < bounds.0) {
        return Err(SyntaxError::InvalidMultiplier);
    }
    Ok(bounds)
}

fn is_ident_char(character: char) -> bool {
    character.is_alphanumeric() || character == '-' || character == '_'
}

/// Parse a value grammar.
///
/// # Errors
/// Returns the first structural problem in the grammar text.
pub fn parse_syntax(text: &str) -> Result<Expression, SyntaxError> {
    let mut parser = GrammarParser {
        input: text,
        index: 0,
    };
    let expression = parser.parse_expression()?;
    match parser.peek() {
        None => Ok(expression),
        Some(other) => Err(SyntaxError::UnexpectedCharacter(other)),
    }
}

/// Parsed grammars per property.
#[derive(Debug, Default)]
pub struct SyntaxCache {
    expressions: HashMap<StylePropertyId, Option<Rc<Expression>>>,
}

impl SyntaxCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grammar of a property, or `None` if it has none (custom properties).
    pub fn expression(&mut self, id: StylePropertyId) -> Option<Rc<Expression>> {
        self.expressions
            .entry(id)
            .or_insert_with(|| {
                let text = id.syntax();
                if text.is_empty() {
                    return None;
                }
                match parse_syntax(text) {
                    Ok(expression) => Some(Rc::new(expression)),
                    Err(err) => {
                        error!("Invalid grammar for '{}': {err}", id.name());
                        None
                    }
                }
            })
            .clone()
    }

    pub fn clear(&mut self) {
        self.expressions.clear();
    }
}
