//! JavaScript tokens and the mutable token stream formatters work on.
//!
//! This module provides:
//! - [`Token`] / [`TokenKind`]: Atomic lexical units, including whitespace runs
//!   and line breaks, so that the concatenation of all token values is the
//!   source text
//! - [`tokenize`]: Regex-driven lexer producing a [`TokenStream`]
//! - [`TokenStream`]: Arena-backed doubly linked token sequence addressed by
//!   stable [`TokenId`]s, with search (`find_next`, `find_prev`, ...) and bulk
//!   removal (`remove_in_between`, ...) primitives
//!
//! Removing a token tombstones its slot; ids of live tokens never change, so
//! syntax nodes can anchor into the stream while formatters mutate it. An id of
//! a removed token must not be navigated from.

pub mod edit;
pub mod lexer;
pub mod patterns;
pub mod search;
pub mod stream;

pub use lexer::tokenize;
pub use stream::{TokenId, TokenStream};

/// Lexical category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Keyword,
    Punctuator,
    Numeric,
    String,
    LineComment,
    BlockComment,
    /// A run of horizontal whitespace
    WhiteSpace,
    /// A single `\n`, `\r\n` or `\r`
    LineBreak,
}

impl TokenKind {
    /// Whitespace runs and line breaks carry no meaning and may be edited freely
    #[must_use]
    pub fn is_empty(self) -> bool {
        matches!(self, TokenKind::WhiteSpace | TokenKind::LineBreak)
    }

    #[must_use]
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }
}

/// A single lexical unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn whitespace(amount: usize) -> Self {
        Self::new(TokenKind::WhiteSpace, " ".repeat(amount))
    }

    #[must_use]
    pub fn line_break() -> Self {
        Self::new(TokenKind::LineBreak, "\n")
    }

    /// True for tokens that are neither whitespace nor line break
    #[must_use]
    pub fn is_significant(&self) -> bool {
        !self.kind.is_empty()
    }

    #[must_use]
    pub fn is_punctuator(&self, value: &str) -> bool {
        self.kind == TokenKind::Punctuator && self.value == value
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Whether `left` immediately followed by `right` would lex differently
///
/// Identifiers, keywords and numbers fuse into one word, `+ +` / `- -` fuse into
/// an update operator and `/` followed by `/` or `*` opens a comment.
#[must_use]
pub fn would_merge(left: &Token, right: &Token) -> bool {
    let (Some(last), Some(first)) = (left.value.chars().last(), right.value.chars().next()) else {
        return false;
    };
    if left.kind == TokenKind::LineComment {
        return false;
    }
    match (last, first) {
        ('+', '+') | ('-', '-') | ('/', '/' | '*') => true,
        ('.', c) if c.is_ascii_digit() => left.kind == TokenKind::Numeric || left.value == ".",
        (a, b) => is_word_char(a) && is_word_char(b),
    }
}
