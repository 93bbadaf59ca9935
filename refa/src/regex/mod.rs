//! Compiling a pattern string down to a minimal DFA, and matching text
//! against the result.
//!
//! A [`Regex`] is built once, via [`Regex::new`] or [`Regex::with_options`],
//! and is read-only afterwards: the four match operations only ever step a
//! fresh [`DfaEvaluator`](crate::dfa::eval::DfaEvaluator) over the compiled
//! automaton, so a single `Regex` can be shared across threads.

mod match_value;

pub use match_value::Match;

use crate::ast::Node;
use crate::dfa::Dfa;
use crate::enfa::{EpsilonNfa, DEFAULT_EXACT_LIMIT};
use crate::error::{CompileError, DeserializeError};
use crate::lexer::tokenize;
use crate::nfa::Nfa;
use crate::parser::parse;
use serde::{Deserialize, Serialize};

/// Knobs for [`Regex::with_options`]. The only knob today is the ceiling on
/// the ε-NFA size a nested `{m,n}` quantifier is allowed to request; see
/// [`crate::enfa::EpsilonNfa::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    pub exact_limit: u64,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            exact_limit: DEFAULT_EXACT_LIMIT,
        }
    }
}

/// A pattern compiled to a minimal DFA.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Regex {
    pattern: String,
    dfa: Dfa,
}

impl Regex {
    /// Compiles `pattern` with the default [`CompileOptions`].
    pub fn new(pattern: &str) -> Result<Regex, CompileError> {
        Regex::with_options(pattern, CompileOptions::default())
    }

    /// Compiles `pattern`, running the lexer, parser and automaton builder in
    /// sequence: any stage's error aborts the pipeline and is returned as-is.
    pub fn with_options(pattern: &str, options: CompileOptions) -> Result<Regex, CompileError> {
        log::debug!("compiling pattern {pattern:?}");
        let tokens = tokenize(pattern)?;
        log::trace!("lexing complete: {} tokens", tokens.len());
        let tree: Node = parse(&tokens)?;
        log::trace!("parsing complete");
        let enfa = EpsilonNfa::build(&tree, options.exact_limit)?;
        log::trace!("built epsilon-nfa with {} states", enfa.state_count());
        let nfa = Nfa::from_epsilon_nfa(&enfa);
        log::trace!("built nfa with {} states", nfa.states().len());
        let mut dfa = Dfa::from_nfa(&nfa);
        let unminimized = dfa.states().len();
        dfa.minimize();
        log::debug!(
            "minimized dfa from {unminimized} to {} states{}",
            dfa.states().len(),
            if dfa.sink().is_some() { ", sink detected" } else { "" }
        );
        Ok(Regex {
            pattern: pattern.to_owned(),
            dfa,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    /// Serializes this compiled regex to a compact binary form.
    pub fn pack(&self) -> Vec<u8> {
        postcard::to_allocvec(self).expect("Regex always serializes")
    }

    /// Reconstructs a compiled regex from the output of [`Regex::pack`].
    pub fn unpack(bytes: &[u8]) -> Result<Regex, DeserializeError> {
        postcard::from_bytes(bytes).map_err(DeserializeError::Malformed)
    }

    /// Runs the DFA over every byte of `text`; accepts iff the whole input is
    /// consumed and the final state is accepting.
    pub fn full_match<'t>(&self, text: &'t str) -> Option<Match<'t, '_>> {
        let mut eval = self.dfa.evaluator();
        for &byte in text.as_bytes() {
            eval.step(byte);
            if eval.is_dead() {
                return None;
            }
        }
        eval.is_accepting().then(|| Match::new(text, (0, text.len()), self))
    }

    /// Runs the DFA from the start of `text`, tracking the rightmost index at
    /// which the state was accepting. Returns the longest accepting prefix,
    /// named `prefix_match` to avoid shadowing the `match` keyword.
    pub fn prefix_match<'t>(&self, text: &'t str) -> Option<Match<'t, '_>> {
        run_from(&self.dfa, text.as_bytes(), 0).map(|end| Match::new(text, (0, end), self))
    }

    /// Returns the leftmost match of this pattern anywhere in `text`.
    pub fn search<'t>(&self, text: &'t str) -> Option<Match<'t, '_>> {
        let bytes = text.as_bytes();
        (0..=bytes.len())
            .find_map(|start| run_from(&self.dfa, bytes, start).map(|end| Match::new(text, (start, end), self)))
    }

    /// Returns every maximal, non-overlapping match of this pattern in
    /// `text`, scanning left to right. Empty matches advance the scan by one
    /// byte so they don't loop forever; the final byte position (`text.len()`)
    /// is never itself used as a scan start.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<Match<'t, '_>> {
        let bytes = text.as_bytes();
        let mut matches = Vec::new();
        let mut pos = 0;
        while pos < bytes.len() {
            match run_from(&self.dfa, bytes, pos) {
                Some(end) => {
                    matches.push(Match::new(text, (pos, end), self));
                    pos = if end > pos { end } else { pos + 1 };
                }
                None => pos += 1,
            }
        }
        matches
    }
}

/// Runs the DFA starting at `start`, tracking the rightmost index at which
/// the state was accepting. Stops on sink or an out-of-alphabet byte, but
/// does not stop merely because the state happened to be accepting: a
/// self-looping accepting state (e.g. under `.*`) keeps extending until the
/// input truly ends or a dead transition is hit.
fn run_from(dfa: &Dfa, bytes: &[u8], start: usize) -> Option<usize> {
    let mut eval = dfa.evaluator();
    let mut last_accept = eval.is_accepting().then_some(start);
    for (offset, &byte) in bytes[start..].iter().enumerate() {
        eval.step(byte);
        if eval.is_dead() {
            break;
        }
        if eval.is_accepting() {
            last_accept = Some(start + offset + 1);
        }
    }
    last_accept
}
