//! Error types for every stage of the compile pipeline.
//!
//! Each stage has its own thin, named-variant error enum (in the style of the
//! table-format parse errors this crate grew out of); [`CompileError`] is the
//! umbrella a caller actually matches on or displays.

use thiserror::Error;

/// A failure while turning the raw pattern into tokens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("trailing backslash at end of pattern")]
    TrailingBackslash,
    #[error("unknown escape sequence '\\{0}' at index {1}")]
    UnknownEscape(char, usize),
    #[error("unbalanced '{0}' at index {1}")]
    UnbalancedBracket(char, usize),
    #[error("incomplete \\x escape at index {0}: expected two hex digits")]
    IncompleteHexEscape(usize),
}

/// A failure while turning the token stream into a syntax tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("{message} at index {index:?}")]
    Syntax {
        message: String,
        index: Option<usize>,
    },
    #[error("invalid range '{0}-{1}' in character class: left endpoint must be less than right endpoint")]
    BadRange(char, char),
    #[error("quantifier {{{0},{1}}} is invalid: lower bound must not exceed upper bound")]
    BadQuantifier(u32, u32),
}

impl ParseError {
    pub(crate) fn syntax(message: impl Into<String>, index: Option<usize>) -> Self {
        ParseError::Syntax {
            message: message.into(),
            index,
        }
    }
}

/// A failure while building the automaton from a syntax tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error(
        "quantifier would require {requested} copies of a sub-expression, exceeding the limit of {limit}"
    )]
    ExactTooLarge { requested: u64, limit: u64 },
}

/// Any failure that can occur while compiling a pattern into a [`crate::regex::Regex`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// A failure while reconstructing a compiled regex from a serialized blob.
#[derive(Debug, Error)]
pub enum DeserializeError {
    #[error("malformed serialized regex: {0}")]
    Malformed(#[from] postcard::Error),
}
