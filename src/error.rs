//! Error types and result aliases for esfmt.
//!
//! This module defines the error handling infrastructure:
//! - [`Result<T>`]: Type alias for `anyhow::Result<T>` used throughout the crate
//! - [`FormatError`]: Typed failures raised by the lexer, the parser, the token
//!   stream and the node formatters. They travel inside `anyhow::Error` and can
//!   be recovered with `downcast_ref`.

use std::fmt;

use anyhow::Result as AnyhowResult;
use thiserror::Error;

use crate::syntax::SyntaxKind;

pub type Result<T> = AnyhowResult<T>;

/// Direction of a token search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => f.write_str("end"),
            Direction::Backward => f.write_str("start"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FormatError {
    /// A structurally required token is missing from the stream.
    #[error("expected `{expected}` but reached the {direction} of the token stream")]
    NotFound {
        expected: String,
        direction: Direction,
    },

    /// Only whitespace and line break tokens may leave the stream.
    #[error("refusing to remove significant token `{0}`")]
    ProtectedToken(String),

    /// A formatter was handed a node of another kind.
    #[error("formatter for {expected:?} received a {found:?} node")]
    UnexpectedNode {
        expected: SyntaxKind,
        found: SyntaxKind,
    },

    #[error("unknown rule name `{0}`")]
    UnknownRule(String),

    #[error("line {line}: {message}")]
    Lex { line: usize, message: String },

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
}

impl FormatError {
    pub(crate) fn not_found(expected: &str, direction: Direction) -> Self {
        FormatError::NotFound {
            expected: expected.to_string(),
            direction,
        }
    }
}
