//! `refa` is a regular-expression engine that compiles a textual pattern down
//! to a minimal deterministic finite automaton and then exposes four
//! text-matching operations against the compiled automaton.
//!
//! ## Usage
//!
//! ```rust
//! use refa::regex::Regex;
//!
//! fn main() {
//!     let re = Regex::new(r"[a-z0-9_]+@[-a-z0-9.]+\.[a-z]{2,6}").unwrap();
//!     assert!(re.full_match("adam.kowalski@gmail.pl").is_some());
//!     assert!(re.full_match("not-an-email").is_none());
//!
//!     let re = Regex::new("a+b+").unwrap();
//!     let m = re.prefix_match("aaabbbccc").unwrap();
//!     assert_eq!(m.as_str(), "aaabbb");
//! }
//! ```
//!
//! ## Pipeline
//!
//! Compilation is a strictly linear pipeline; each stage consumes the
//! previous stage's output as an immutable value and produces a fresh one:
//!
//! 1. [`lexer`] turns the pattern string into a token sequence, handling
//!    escapes and checking bracket balance.
//! 2. [`parser`] is a recursive-descent parser that turns the token sequence
//!    into an [`ast::Node`] syntax tree with quantifiers attached.
//! 3. [`enfa`] builds a Thompson-style ε-NFA from the syntax tree.
//! 4. [`nfa`] eliminates ε-moves via ε-closure precomputation, pruning
//!    unreachable states.
//! 5. [`dfa`] performs subset construction over the observed alphabet, then
//!    minimizes the result by partition refinement and marks a sink state
//!    (a dead, non-accepting, self-looping state) if one exists.
//!
//! [`regex::Regex`] ties the pipeline together: [`regex::Regex::new`] runs
//! all five stages and stores the resulting minimal DFA, and its four match
//! operations ([`regex::Regex::full_match`], [`regex::Regex::prefix_match`],
//! [`regex::Regex::search`], [`regex::Regex::find_all`]) are thin dispatchers
//! over that DFA. A compiled [`regex::Regex`] is read-only and safely shared
//! across threads.
//!
//! ## Supported syntax
//!
//! Literal characters, `.` (any byte but `\n`), character classes `[...]`
//! with ranges and negation-free membership, the `\d \D \w \W \s \S` escape
//! classes, grouping with `(...)`, alternation `|`, and the quantifiers
//! `* + ? {m} {m,n}`. Parentheses are grouping-only: there are no capturing
//! groups, no backreferences, no anchors, and no lookaround. The alphabet is
//! 8-bit bytes (0..=127), with `\D`/`\W` extending one byte past ASCII for
//! implementation-historical reasons documented on [`enfa`].
//!
//! ## Operations
//!
//! This crate currently supports:
//!
//! * Compiling a pattern to a minimal DFA via [`regex::Regex::new`]
//! * [Full-string matching](regex::Regex::full_match)
//! * [Longest-prefix matching](regex::Regex::prefix_match)
//! * [Leftmost search](regex::Regex::search)
//! * [Finding all non-overlapping matches](regex::Regex::find_all)
//! * [Serializing](regex::Regex::pack) and [deserializing](regex::Regex::unpack)
//!   a compiled regex to a compact binary blob

pub mod ast;
pub mod dfa;
pub mod enfa;
pub mod error;
pub mod lexer;
pub mod nfa;
pub mod parser;
pub mod regex;
