//! Recursive-descent parser: token sequence → [`Node`](crate::ast::Node) syntax tree.
//!
//! The entry point treats the whole token stream as the body of an implicit
//! top-level group, so `group`, `altset`, `concat` and the quantifier suffix
//! are the only non-terminals needed (see the grammar in the crate's design
//! notes).

use crate::ast::{Node, Quantifier, SpecialClass};
use crate::error::ParseError;
use crate::lexer::{Token, TokenKind};

struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Cursor { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + offset)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    /// Single-step rewind, used after a lookahead that turned out not to apply.
    fn back(&mut self) {
        debug_assert!(self.pos > 0);
        self.pos -= 1;
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn source_index(&self) -> Option<usize> {
        self.peek().map(|t| t.index).or_else(|| {
            self.tokens.last().map(|t| t.index + 1)
        })
    }
}

pub fn parse(tokens: &[Token]) -> Result<Node, ParseError> {
    let mut cursor = Cursor::new(tokens);
    let tree = parse_alternation(&mut cursor)?;
    if !cursor.at_end() {
        let tok = cursor.peek().expect("not at end");
        return Err(ParseError::syntax(
            format!("unexpected '{}'", tok.symbol as char),
            Some(tok.index),
        ));
    }
    Ok(tree)
}

fn parse_alternation(cursor: &mut Cursor) -> Result<Node, ParseError> {
    let mut branches = vec![parse_concatenation(cursor)?];
    while let Some(tok) = cursor.peek() {
        if tok.kind == TokenKind::Token && tok.symbol == b'|' {
            cursor.advance();
            branches.push(parse_concatenation(cursor)?);
        } else {
            break;
        }
    }
    Ok(Node::collapse_singleton(branches, |c| {
        Node::Alternative(c, None)
    }))
}

fn is_group_terminator(tok: &Token) -> bool {
    tok.kind == TokenKind::Token && (tok.symbol == b')' || tok.symbol == b'|')
}

fn parse_concatenation(cursor: &mut Cursor) -> Result<Node, ParseError> {
    let mut children = Vec::new();
    while let Some(tok) = cursor.peek() {
        if is_group_terminator(tok) {
            break;
        }
        children.push(parse_atom(cursor)?);
    }
    Ok(Node::collapse_singleton(children, |c| {
        Node::Concatenation(c, None)
    }))
}

const QUANT_STARTERS: &[u8] = b"*+?{";

fn parse_atom(cursor: &mut Cursor) -> Result<Node, ParseError> {
    let tok = cursor
        .peek()
        .ok_or_else(|| ParseError::syntax("expected an atom but found end of pattern", None))?;

    if tok.kind == TokenKind::Token {
        if QUANT_STARTERS.contains(&tok.symbol) || tok.symbol == b'}' {
            return Err(ParseError::syntax(
                format!("stray quantifier '{}' with no preceding atom", tok.symbol as char),
                Some(tok.index),
            ));
        }
        if tok.symbol == b'(' {
            cursor.advance();
            let inner = parse_alternation(cursor)?;
            match cursor.advance() {
                Some(close) if close.kind == TokenKind::Token && close.symbol == b')' => {}
                _ => {
                    return Err(ParseError::syntax(
                        "unterminated group: expected ')'",
                        cursor.source_index(),
                    ));
                }
            }
            return finish_atom(cursor, inner);
        }
        if tok.symbol == b'[' {
            cursor.advance();
            let set = parse_altset(cursor)?;
            return finish_atom(cursor, set);
        }
        return Err(ParseError::syntax(
            format!("unexpected '{}'", tok.symbol as char),
            Some(tok.index),
        ));
    }

    let tok = cursor.advance().expect("peeked above");
    let base = match tok.kind {
        TokenKind::Normal => Node::Symbol(tok.symbol, None),
        TokenKind::Special => Node::SpecialSymbol(special_class(tok.symbol), None),
        TokenKind::Token => unreachable!("handled above"),
    };
    finish_atom(cursor, base)
}

fn finish_atom(cursor: &mut Cursor, mut node: Node) -> Result<Node, ParseError> {
    if let Some(q) = try_parse_quantifier(cursor)? {
        node.set_quantifier(Some(q));
    }
    Ok(node)
}

fn try_parse_quantifier(cursor: &mut Cursor) -> Result<Option<Quantifier>, ParseError> {
    let Some(tok) = cursor.peek() else {
        return Ok(None);
    };
    if tok.kind != TokenKind::Token {
        return Ok(None);
    }
    match tok.symbol {
        b'*' => {
            cursor.advance();
            Ok(Some(Quantifier::Star))
        }
        b'+' => {
            cursor.advance();
            Ok(Some(Quantifier::Plus))
        }
        b'?' => {
            cursor.advance();
            Ok(Some(Quantifier::Exact(0, 1)))
        }
        b'{' => {
            cursor.advance();
            parse_exact_quantifier(cursor).map(Some)
        }
        _ => Ok(None),
    }
}

fn parse_decimal(cursor: &mut Cursor) -> Result<u32, ParseError> {
    let start_index = cursor.source_index();
    let mut value: u32 = 0;
    let mut saw_digit = false;
    while let Some(tok) = cursor.peek() {
        if tok.kind == TokenKind::Normal && tok.symbol.is_ascii_digit() {
            saw_digit = true;
            value = value
                .saturating_mul(10)
                .saturating_add((tok.symbol - b'0') as u32);
            cursor.advance();
        } else {
            break;
        }
    }
    if !saw_digit {
        return Err(ParseError::syntax(
            "expected a number in quantifier bounds",
            start_index,
        ));
    }
    Ok(value)
}

fn parse_exact_quantifier(cursor: &mut Cursor) -> Result<Quantifier, ParseError> {
    let m = parse_decimal(cursor)?;

    let has_comma = matches!(
        cursor.peek(),
        Some(tok) if tok.kind == TokenKind::Normal && tok.symbol == b','
    );

    let n = if has_comma {
        cursor.advance();
        parse_decimal(cursor)?
    } else {
        m
    };

    match cursor.advance() {
        Some(tok) if tok.kind == TokenKind::Token && tok.symbol == b'}' => {}
        _ => {
            return Err(ParseError::syntax(
                "unterminated quantifier: expected '}'",
                cursor.source_index(),
            ));
        }
    }

    if m > n {
        return Err(ParseError::BadQuantifier(m, n));
    }
    Ok(Quantifier::Exact(m, n))
}

fn special_class(symbol: u8) -> SpecialClass {
    match symbol {
        b'.' => SpecialClass::Any,
        b'd' => SpecialClass::Digit,
        b'D' => SpecialClass::NotDigit,
        b'w' => SpecialClass::Word,
        b'W' => SpecialClass::NotWord,
        b's' => SpecialClass::Space,
        b'S' => SpecialClass::NotSpace,
        other => unreachable!("lexer only ever emits SPECIAL for s/S/d/D/w/W/. (got {other})"),
    }
}

/// `altset ::= '[' item+ ']'`. The opening `[` has already been consumed.
fn parse_altset(cursor: &mut Cursor) -> Result<Node, ParseError> {
    let mut items = Vec::new();

    loop {
        let tok = cursor.peek().ok_or_else(|| {
            ParseError::syntax("unterminated character class: expected ']'", cursor.source_index())
        })?;

        if tok.kind == TokenKind::Token && tok.symbol == b']' {
            cursor.advance();
            break;
        }

        match tok.kind {
            TokenKind::Token => {
                return Err(ParseError::syntax(
                    format!(
                        "'{}' is not allowed inside a character class",
                        tok.symbol as char
                    ),
                    Some(tok.index),
                ));
            }
            TokenKind::Special => {
                cursor.advance();
                // A bare '.' keeps its special-lexer identity but means a
                // literal dot once inside a character class.
                if tok.symbol == b'.' {
                    items.push(Node::Symbol(b'.', None));
                } else {
                    items.push(Node::SpecialSymbol(special_class(tok.symbol), None));
                }
            }
            TokenKind::Normal => {
                let a = tok.symbol;
                cursor.advance();

                if a == b'-' {
                    // Position 0 or right after a SPECIAL: always a literal
                    // dash, since any '-' that could close a NORMAL-NORMAL
                    // range was already consumed below by the previous
                    // iteration's lookahead.
                    items.push(Node::Symbol(b'-', None));
                    continue;
                }

                items.push(Node::Symbol(a, None));

                let is_dash = matches!(
                    cursor.peek(),
                    Some(t) if t.kind == TokenKind::Normal && t.symbol == b'-'
                );
                if !is_dash {
                    continue;
                }
                let Some(b_tok) = cursor.peek_at(1) else {
                    continue;
                };
                if b_tok.kind != TokenKind::Normal {
                    continue;
                }
                let b = b_tok.symbol;
                if b == b'-' {
                    continue;
                }
                if a >= b {
                    return Err(ParseError::BadRange(a as char, b as char));
                }
                // Consume the '-' and the right endpoint, then insert
                // a+1..=b; `a` itself is already in `items` above, so the
                // net effect is the fully inclusive range [a, b].
                cursor.advance();
                cursor.advance();
                for byte in (a + 1)..=b {
                    items.push(Node::Symbol(byte, None));
                }
            }
        }
    }

    if items.is_empty() {
        return Err(ParseError::syntax(
            "character class must contain at least one item",
            cursor.source_index(),
        ));
    }

    Ok(Node::collapse_singleton(items, |c| {
        Node::Alternative(c, None)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_str(pattern: &str) -> Node {
        let tokens = tokenize(pattern).unwrap();
        parse(&tokens).unwrap()
    }

    #[test]
    fn single_symbol() {
        assert_eq!(parse_str("a"), Node::Symbol(b'a', None));
    }

    #[test]
    fn star_quantifier() {
        assert_eq!(
            parse_str("a*"),
            Node::Symbol(b'a', Some(Quantifier::Star))
        );
    }

    #[test]
    fn question_is_exact_0_1() {
        assert_eq!(
            parse_str("a?"),
            Node::Symbol(b'a', Some(Quantifier::Exact(0, 1)))
        );
    }

    #[test]
    fn braces_exact() {
        assert_eq!(
            parse_str("a{3}"),
            Node::Symbol(b'a', Some(Quantifier::Exact(3, 3)))
        );
    }

    #[test]
    fn braces_range() {
        assert_eq!(
            parse_str("a{2,4}"),
            Node::Symbol(b'a', Some(Quantifier::Exact(2, 4)))
        );
    }

    #[test]
    fn bad_braces_range_errors() {
        let tokens = tokenize("a{4,2}").unwrap();
        assert_eq!(parse(&tokens), Err(ParseError::BadQuantifier(4, 2)));
    }

    #[test]
    fn empty_alternation_is_two_empty_concatenations() {
        let tree = parse_str("|");
        assert_eq!(
            tree,
            Node::Alternative(
                vec![Node::Concatenation(vec![], None), Node::Concatenation(vec![], None)],
                None
            )
        );
    }

    #[test]
    fn collapsing_group_around_single_atom() {
        // (a) collapses to the plain symbol, so a following quantifier
        // attaches directly to it.
        assert_eq!(parse_str("(a)*"), Node::Symbol(b'a', Some(Quantifier::Star)));
    }

    #[test]
    fn char_class_range_is_inclusive() {
        let tree = parse_str("[a-c]");
        assert_eq!(
            tree,
            Node::Alternative(
                vec![
                    Node::Symbol(b'a', None),
                    Node::Symbol(b'b', None),
                    Node::Symbol(b'c', None),
                ],
                None
            )
        );
    }

    #[test]
    fn char_class_leading_dash_is_literal() {
        let tree = parse_str("[-a]");
        assert_eq!(
            tree,
            Node::Alternative(vec![Node::Symbol(b'-', None), Node::Symbol(b'a', None)], None)
        );
    }

    #[test]
    fn char_class_bad_range_errors() {
        let tokens = tokenize("[c-a]").unwrap();
        assert_eq!(parse(&tokens), Err(ParseError::BadRange('c', 'a')));
    }

    #[test]
    fn stray_quantifier_errors() {
        let tokens = tokenize("*a").unwrap();
        assert!(parse(&tokens).is_err());
    }

    #[test]
    fn forbidden_token_in_class_errors() {
        let tokens = tokenize("[a(b)]").unwrap();
        assert!(parse(&tokens).is_err());
    }
}
