//! Selector text parsing.

use core::error::Error;
use core::fmt::{self, Display, Formatter};
use core::mem::take;

use crate::{Combinator, ComplexSelector, CompoundSelector, SimpleSelector};

/// Why a selector could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorParseError {
    /// The selector (or one item of a list) is empty.
    Empty,
    /// A character we do not support, such as `+`, `~` or `[`.
    UnexpectedCharacter(char),
    /// `.`, `#` or `:` not followed by an identifier.
    MissingIdentifier,
    /// A combinator with nothing on one of its sides.
    DanglingCombinator,
}

impl Display for SelectorParseError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => formatter.write_str("empty selector"),
            Self::UnexpectedCharacter(character) => {
                write!(formatter, "unsupported character '{character}' in selector")
            }
            Self::MissingIdentifier => formatter.write_str("expected an identifier"),
            Self::DanglingCombinator => formatter.write_str("combinator without a selector"),
        }
    }
}

impl Error for SelectorParseError {}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Tok {
    /// Explicit `>`.
    Child,
    /// Whitespace that implies a descendant combinator.
    DescendantWS,
    Simple(SimpleSelector),
}

/// Tokenizer over one complex selector.
struct SelectorTokenizer<'src> {
    input: &'src str,
    index: usize,
}

impl<'src> SelectorTokenizer<'src> {
    fn new(input: &'src str) -> Self {
        Self { input, index: 0 }
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.index..).and_then(|rest| rest.chars().next())
    }

    fn bump(&mut self, character: char) {
        self.index = self.index.saturating_add(character.len_utf8());
    }

    fn next_token(&mut self) -> Result<Option<Tok>, SelectorParseError> {
        if self.skip_whitespace() {
            return Ok(Some(Tok::DescendantWS));
        }
        let Some(current) = self.peek_char() else {
            return Ok(None);
        };
        let token = match current {
            '*' => {
                self.bump(current);
                Tok::Simple(SimpleSelector::Wildcard)
            }
            '.' => {
                self.bump(current);
                Tok::Simple(SimpleSelector::Class(self.consume_required_ident()?))
            }
            '#' => {
                self.bump(current);
                Tok::Simple(SimpleSelector::Id(self.consume_required_ident()?))
            }
            ':' => {
                self.bump(current);
                Tok::Simple(SimpleSelector::PseudoClass(self.consume_required_ident()?))
            }
            '>' => {
                self.bump(current);
                Tok::Child
            }
            _ if is_ident_char(current) => Tok::Simple(SimpleSelector::Type(self.consume_ident())),
            other => return Err(SelectorParseError::UnexpectedCharacter(other)),
        };
        Ok(Some(token))
    }

    /// Skip whitespace; returns whether any was skipped.
    fn skip_whitespace(&mut self) -> bool {
        let mut saw = false;
        while let Some(current) = self.peek_char() {
            if !current.is_whitespace() {
                break;
            }
            saw = true;
            self.bump(current);
        }
        saw
    }

    fn consume_ident(&mut self) -> String {
        let start = self.index;
        while let Some(current) = self.peek_char() {
            if !is_ident_char(current) {
                break;
            }
            self.bump(current);
        }
        self.input.get(start..self.index).unwrap_or_default().to_owned()
    }

    fn consume_required_ident(&mut self) -> Result<String, SelectorParseError> {
        let ident = self.consume_ident();
        if ident.is_empty() {
            return Err(SelectorParseError::MissingIdentifier);
        }
        Ok(ident)
    }
}

fn is_ident_char(character: char) -> bool {
    character.is_alphanumeric() || character == '-' || character == '_'
}

/// Parse a comma separated selector list. Any invalid item invalidates the
/// whole list, as for a CSS rule prelude.
///
/// # Errors
/// Returns the first item's parse error.
pub fn parse_selector_list(input: &str) -> Result<Vec<ComplexSelector>, SelectorParseError> {
    input.split(',').map(|part| parse_complex_selector(part.trim())).collect()
}

/// Parse one complex selector.
///
/// # Errors
/// Returns an error for empty input, unsupported syntax, or dangling combinators.
pub fn parse_complex_selector(input: &str) -> Result<ComplexSelector, SelectorParseError> {
    let mut tokens = SelectorTokenizer::new(input.trim());
    let mut current: Vec<SimpleSelector> = Vec::new();
    let mut compounds: Vec<CompoundSelector> = Vec::new();
    let mut combinators: Vec<Combinator> = Vec::new();
    let mut pending_combinator: Option<Combinator> = None;

    while let Some(token) = tokens.next_token()? {
        match token {
            Tok::Child => {
                if current.is_empty() && compounds.is_empty() {
                    return Err(SelectorParseError::DanglingCombinator);
                }
                if matches!(pending_combinator, Some(Combinator::Child)) {
                    return Err(SelectorParseError::DanglingCombinator);
                }
                if !current.is_empty() {
                    compounds.push(CompoundSelector::new(take(&mut current)));
                }
                pending_combinator = Some(Combinator::Child);
            }
            Tok::DescendantWS => {
                if !current.is_empty() {
                    compounds.push(CompoundSelector::new(take(&mut current)));
                    pending_combinator.get_or_insert(Combinator::Descendant);
                }
            }
            Tok::Simple(simple) => {
                if let Some(combinator) = pending_combinator.take() {
                    combinators.push(combinator);
                }
                current.push(simple);
            }
        }
    }

    if matches!(pending_combinator, Some(Combinator::Child)) {
        return Err(SelectorParseError::DanglingCombinator);
    }
    if !current.is_empty() {
        compounds.push(CompoundSelector::new(current));
    }

    let mut compounds = compounds.into_iter();
    let Some(first) = compounds.next() else {
        return Err(SelectorParseError::Empty);
    };
    let rest: Vec<(Combinator, CompoundSelector)> = combinators.into_iter().zip(compounds).collect();
    Ok(ComplexSelector::new(first, rest))
}
