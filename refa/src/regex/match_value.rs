//! The value type returned by [`Regex`](super::Regex)'s four match
//! operations.

use super::Regex;

/// A single match: a half-open byte span `[begin, end)` into the text it was
/// found in, plus a back-reference to the regex that produced it.
///
/// Two matches compare equal when their text and span are equal; the
/// back-referenced regex is not part of the comparison.
#[derive(Debug, Clone, Copy)]
pub struct Match<'t, 'r> {
    text: &'t str,
    span: (usize, usize),
    regex: &'r Regex,
}

impl<'t, 'r> Match<'t, 'r> {
    pub(super) fn new(text: &'t str, span: (usize, usize), regex: &'r Regex) -> Self {
        Match { text, span, regex }
    }

    pub fn begin(&self) -> usize {
        self.span.0
    }

    pub fn end(&self) -> usize {
        self.span.1
    }

    pub fn span(&self) -> (usize, usize) {
        self.span
    }

    pub fn as_str(&self) -> &'t str {
        &self.text[self.span.0..self.span.1]
    }

    pub fn regex(&self) -> &'r Regex {
        self.regex
    }
}

impl PartialEq for Match<'_, '_> {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.span == other.span
    }
}

impl Eq for Match<'_, '_> {}
