//! Bulk removal of whitespace runs and line breaks.
//!
//! A line break that ends a line comment is never removed by these helpers:
//! joining the next line onto the comment would turn code into commentary.

use super::{TokenId, TokenKind, TokenStream};
use crate::error::Result;

impl TokenStream {
    /// Whether a line break is the terminator of a `//` comment
    fn ends_line_comment(&self, id: TokenId) -> bool {
        if self.kind(id) != TokenKind::LineBreak {
            return false;
        }
        let mut cursor = self.prev(id);
        while let Some(prev) = cursor {
            match self.kind(prev) {
                TokenKind::WhiteSpace => cursor = self.prev(prev),
                TokenKind::LineComment => return true,
                _ => return false,
            }
        }
        false
    }

    /// Remove every token of `kind` strictly between `start` and `end`
    pub fn remove_in_between(
        &mut self,
        start: TokenId,
        end: TokenId,
        kind: TokenKind,
    ) -> Result<()> {
        let mut cursor = self.next(start);
        while let Some(id) = cursor {
            if id == end {
                break;
            }
            cursor = self.next(id);
            if self.kind(id) == kind && !self.ends_line_comment(id) {
                self.remove(id)?;
            }
        }
        Ok(())
    }

    /// Remove the line breaks strictly between `start` and `end` that are not
    /// nested inside braces
    ///
    /// Statements of a nested function body rely on their line breaks for
    /// semicolon insertion, and object literals keep their own layout.
    pub fn remove_line_breaks_outside_braces(
        &mut self,
        start: TokenId,
        end: TokenId,
    ) -> Result<()> {
        let mut depth = 0usize;
        let mut cursor = self.next(start);
        while let Some(id) = cursor {
            if id == end {
                break;
            }
            cursor = self.next(id);
            match (self.kind(id), self.value(id)) {
                (TokenKind::Punctuator, "{") => depth += 1,
                (TokenKind::Punctuator, "}") => depth = depth.saturating_sub(1),
                (TokenKind::LineBreak, _) if depth == 0 && !self.ends_line_comment(id) => {
                    self.remove(id)?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Remove every whitespace run and line break strictly between two tokens
    pub fn remove_ws_br_in_between(&mut self, start: TokenId, end: TokenId) -> Result<()> {
        let mut cursor = self.next(start);
        while let Some(id) = cursor {
            if id == end {
                break;
            }
            cursor = self.next(id);
            if self.kind(id).is_empty() && !self.ends_line_comment(id) {
                self.remove(id)?;
            }
        }
        Ok(())
    }

    /// Remove the token right before `token` if it is of `kind`
    pub fn remove_adjacent_before(&mut self, token: TokenId, kind: TokenKind) -> Result<()> {
        if let Some(prev) = self.prev(token) {
            if self.kind(prev) == kind && !self.ends_line_comment(prev) {
                self.remove(prev)?;
            }
        }
        Ok(())
    }

    /// Remove the token right after `token` if it is of `kind`
    pub fn remove_adjacent_after(&mut self, token: TokenId, kind: TokenKind) -> Result<()> {
        if let Some(next) = self.next(token) {
            if self.kind(next) == kind && !self.ends_line_comment(next) {
                self.remove(next)?;
            }
        }
        Ok(())
    }
}
