//! Parse error type with source positions.

use thiserror::Error;

/// What went wrong while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("unexpected character {found:?}, expected {expected}")]
    UnexpectedChar { found: char, expected: &'static str },

    #[error("unterminated string")]
    UnterminatedString,

    #[error("invalid number")]
    InvalidNumber,

    #[error("trailing characters after the top-level object")]
    TrailingCharacters,

    #[error("duplicate key {0:?}")]
    DuplicateKey(String),

    #[error("nesting deeper than {0} levels")]
    DepthLimitExceeded(usize),
}

/// A parse failure and where it happened.
///
/// `offset` is a byte offset into the input; `line` and `column` are
/// 1-based, with the column counted in characters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at line {line}, column {column}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub(crate) fn new(input: &str, offset: usize, kind: ParseErrorKind) -> Self {
        let before = input.get(..offset).unwrap_or(input);
        let line = before.matches('\n').count() + 1;
        let column = before
            .rsplit('\n')
            .next()
            .map_or(0, |current| current.chars().count())
            + 1;
        Self {
            kind,
            offset,
            line,
            column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_one_based() {
        let err = ParseError::new("{\n  x", 4, ParseErrorKind::InvalidNumber);
        assert_eq!((err.line, err.column), (2, 3));
        assert_eq!(err.to_string(), "invalid number at line 2, column 3");
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        let err = ParseError::new("{\"é\"x", 5, ParseErrorKind::TrailingCharacters);
        assert_eq!(err.column, 5);
    }
}
