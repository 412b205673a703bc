//! Navigation over a [`TokenStream`].
//!
//! `find_next` / `find_prev` scan strictly after / before the given token for a
//! token with the requested literal value, hopping over everything else. They
//! fail with [`FormatError::NotFound`] when the stream ends first: formatters
//! only search for tokens the grammar guarantees, so a miss means the syntax
//! tree and the stream disagree.

use super::{TokenId, TokenKind, TokenStream};
use crate::error::{Direction, FormatError, Result};

impl TokenStream {
    /// First token after `from` whose value is `value`
    pub fn find_next(&self, from: TokenId, value: &str) -> Result<TokenId> {
        let mut cursor = self.next(from);
        while let Some(id) = cursor {
            if self.value(id) == value {
                return Ok(id);
            }
            cursor = self.next(id);
        }
        Err(FormatError::not_found(value, Direction::Forward).into())
    }

    /// Last token before `from` whose value is `value`
    pub fn find_prev(&self, from: TokenId, value: &str) -> Result<TokenId> {
        let mut cursor = self.prev(from);
        while let Some(id) = cursor {
            if self.value(id) == value {
                return Ok(id);
            }
            cursor = self.prev(id);
        }
        Err(FormatError::not_found(value, Direction::Backward).into())
    }

    /// Nearest token before `from` that is neither whitespace nor line break
    pub fn find_prev_non_empty(&self, from: TokenId) -> Result<TokenId> {
        self.prev_non_empty(from)
            .ok_or_else(|| FormatError::not_found("non-empty token", Direction::Backward).into())
    }

    #[must_use]
    pub fn prev_non_empty(&self, from: TokenId) -> Option<TokenId> {
        let mut cursor = self.prev(from);
        while let Some(id) = cursor {
            if !self.kind(id).is_empty() {
                return Some(id);
            }
            cursor = self.prev(id);
        }
        None
    }

    #[must_use]
    pub fn next_non_empty(&self, from: TokenId) -> Option<TokenId> {
        let mut cursor = self.next(from);
        while let Some(id) = cursor {
            if !self.kind(id).is_empty() {
                return Some(id);
            }
            cursor = self.next(id);
        }
        None
    }

    /// Number of line breaks strictly between two tokens
    #[must_use]
    pub fn count_between(&self, start: TokenId, end: TokenId, kind: TokenKind) -> usize {
        let mut count = 0;
        let mut cursor = self.next(start);
        while let Some(id) = cursor {
            if id == end {
                break;
            }
            if self.kind(id) == kind {
                count += 1;
            }
            cursor = self.next(id);
        }
        count
    }

    /// Whether `id` is the first significant token of its line
    #[must_use]
    pub fn starts_line(&self, id: TokenId) -> bool {
        match self.prev(id) {
            None => true,
            Some(prev) => match self.kind(prev) {
                TokenKind::LineBreak => true,
                TokenKind::WhiteSpace => self
                    .prev(prev)
                    .map_or(true, |before| self.kind(before) == TokenKind::LineBreak),
                _ => false,
            },
        }
    }
}
