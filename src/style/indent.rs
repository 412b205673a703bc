//! Indentation of line-starting tokens.

use crate::error::Result;
use crate::token::{Token, TokenId, TokenKind, TokenStream};

pub struct Indent<'a> {
    tokens: &'a mut TokenStream,
    unit: &'a str,
}

impl<'a> Indent<'a> {
    pub fn new(tokens: &'a mut TokenStream, unit: &'a str) -> Self {
        Self { tokens, unit }
    }

    /// Set the indentation of `token` to `level` units if it differs
    ///
    /// Tokens that do not start a line are left alone.
    pub fn if_needed(&mut self, token: TokenId, level: usize) -> Result<()> {
        if !self.tokens.starts_line(token) {
            return Ok(());
        }
        let wanted = self.unit.repeat(level);
        match self.current_run(token) {
            Some(run) if wanted.is_empty() => self.tokens.remove(run),
            Some(run) => {
                if self.tokens.value(run) != wanted {
                    self.tokens.set_value(run, wanted);
                }
                Ok(())
            }
            None if wanted.is_empty() => Ok(()),
            None => {
                self.tokens
                    .insert_before(token, Token::new(TokenKind::WhiteSpace, wanted));
                Ok(())
            }
        }
    }

    /// Replace the indentation of `token` with `level` units
    pub fn before(&mut self, token: TokenId, level: usize) -> Result<()> {
        if !self.tokens.starts_line(token) {
            return Ok(());
        }
        if let Some(run) = self.current_run(token) {
            self.tokens.remove(run)?;
        }
        if level > 0 {
            self.tokens.insert_before(
                token,
                Token::new(TokenKind::WhiteSpace, self.unit.repeat(level)),
            );
        }
        Ok(())
    }

    fn current_run(&self, token: TokenId) -> Option<TokenId> {
        self.tokens
            .prev(token)
            .filter(|&prev| self.tokens.kind(prev) == TokenKind::WhiteSpace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokenize;

    fn indent(source: &str, target: &str, unit: &str, level: usize, force: bool) -> String {
        let mut tokens = tokenize(source).unwrap();
        let id = tokens
            .significant()
            .find(|&id| tokens.value(id) == target)
            .unwrap();
        let mut indent = Indent::new(&mut tokens, unit);
        if force {
            indent.before(id, level).unwrap();
        } else {
            indent.if_needed(id, level).unwrap();
        }
        tokens.to_source()
    }

    #[test]
    fn test_adds_missing_indentation() {
        assert_eq!(indent("{\nx\n}", "x", "  ", 2, false), "{\n    x\n}");
    }

    #[test]
    fn test_replaces_wrong_indentation() {
        assert_eq!(indent("{\n\t x\n}", "x", "  ", 1, false), "{\n  x\n}");
        assert_eq!(indent("{\n\t x\n}", "x", "\t", 1, true), "{\n\tx\n}");
    }

    #[test]
    fn test_level_zero_removes_indentation() {
        assert_eq!(indent("a\n   }", "}", "  ", 0, false), "a\n}");
        assert_eq!(indent("a\n   }", "}", "  ", 0, true), "a\n}");
    }

    #[test]
    fn test_mid_line_token_untouched() {
        assert_eq!(indent("a  b", "b", "  ", 3, true), "a  b");
    }
}
