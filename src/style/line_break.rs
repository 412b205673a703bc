//! Line breaks between a token and its significant neighbour.
//!
//! The gap is every whitespace and line break token between the two. When the
//! number of line breaks in it deviates from the policy the gap is rebuilt:
//! `n` line breaks followed by the indentation the right-hand token already
//! had, or a single space when no break is wanted.

use super::rule::{Amount, Rule, Rules};
use crate::error::Result;
use crate::token::{Token, TokenId, TokenKind, TokenStream};

pub struct LineBreak<'a> {
    tokens: &'a mut TokenStream,
    rules: &'a Rules,
}

impl<'a> LineBreak<'a> {
    pub fn new(tokens: &'a mut TokenStream, rules: &'a Rules) -> Self {
        Self { tokens, rules }
    }

    pub fn before_if_needed(&mut self, token: TokenId, rule: Rule) -> Result<()> {
        match self.rules.line_break_before(rule) {
            Amount::Preserve => Ok(()),
            Amount::Exactly(amount) => match self.tokens.prev_non_empty(token) {
                Some(prev) => self.reconcile(prev, token, amount),
                None => Ok(()),
            },
        }
    }

    pub fn after_if_needed(&mut self, token: TokenId, rule: Rule) -> Result<()> {
        match self.rules.line_break_after(rule) {
            Amount::Preserve => Ok(()),
            Amount::Exactly(amount) => match self.tokens.next_non_empty(token) {
                Some(next) => self.reconcile(token, next, amount),
                None => Ok(()),
            },
        }
    }

    pub fn around_if_needed(&mut self, token: TokenId, rule: Rule) -> Result<()> {
        self.before_if_needed(token, rule)?;
        self.after_if_needed(token, rule)
    }

    /// Whether `rule` demands at least one line break before its token
    #[must_use]
    pub fn needs_before(&self, rule: Rule) -> bool {
        matches!(self.rules.line_break_before(rule), Amount::Exactly(n) if n > 0)
    }

    fn reconcile(&mut self, left: TokenId, right: TokenId, amount: usize) -> Result<()> {
        let amount = if self.tokens.kind(left) == TokenKind::LineComment {
            amount.max(1)
        } else {
            amount
        };
        if self.tokens.count_between(left, right, TokenKind::LineBreak) == amount {
            return Ok(());
        }

        let indentation = self.tokens.prev(right).and_then(|prev| {
            let is_indent = self.tokens.kind(prev) == TokenKind::WhiteSpace
                && self
                    .tokens
                    .prev(prev)
                    .is_some_and(|before| self.tokens.kind(before) == TokenKind::LineBreak);
            is_indent.then(|| self.tokens.value(prev).to_string())
        });

        let mut cursor = self.tokens.next(left);
        while let Some(id) = cursor {
            if id == right {
                break;
            }
            cursor = self.tokens.next(id);
            self.tokens.remove(id)?;
        }

        if amount == 0 {
            self.tokens.insert_before(right, Token::whitespace(1));
            return Ok(());
        }
        for _ in 0..amount {
            self.tokens.insert_before(right, Token::line_break());
        }
        if let Some(indentation) = indentation {
            self.tokens
                .insert_before(right, Token::new(TokenKind::WhiteSpace, indentation));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::token::tokenize;

    fn rules_with(before: &[(Rule, i8)], after: &[(Rule, i8)]) -> Rules {
        let mut config = Config::default();
        config.line_break.before = before.iter().copied().collect();
        config.line_break.after = after.iter().copied().collect();
        Rules::from_config(&config)
    }

    fn apply(rules: &Rules, source: &str, target: &str, rule: Rule) -> String {
        let mut tokens = tokenize(source).unwrap();
        let id = tokens
            .significant()
            .find(|&id| tokens.value(id) == target)
            .unwrap();
        LineBreak::new(&mut tokens, rules)
            .around_if_needed(id, rule)
            .unwrap();
        tokens.to_source()
    }

    #[test]
    fn test_inserts_breaks() {
        let rules = rules_with(&[(Rule::Property, 1)], &[(Rule::Property, 1)]);
        assert_eq!(apply(&rules, "{a,b}", "a", Rule::Property), "{\na\n,b}");
    }

    #[test]
    fn test_collapses_extra_breaks_keeping_indentation() {
        let rules = rules_with(&[(Rule::Property, 1)], &[]);
        assert_eq!(
            apply(&rules, "{\n\n\n    a}", "a", Rule::Property),
            "{\n    a}"
        );
    }

    #[test]
    fn test_zero_joins_with_a_space() {
        let rules = rules_with(&[(Rule::IfStatementOpeningBrace, 0)], &[]);
        assert_eq!(
            apply(&rules, "if (x)\n  {}", "{", Rule::IfStatementOpeningBrace),
            "if (x) {}"
        );
    }

    #[test]
    fn test_conformant_gap_untouched() {
        let rules = rules_with(&[(Rule::Property, 1)], &[(Rule::Property, 1)]);
        let source = "{\n  a  \n}";
        assert_eq!(apply(&rules, source, "a", Rule::Property), source);
    }

    #[test]
    fn test_line_comment_keeps_a_break() {
        let rules = rules_with(&[(Rule::IfStatementOpeningBrace, 0)], &[]);
        let source = "x // note\n{}";
        assert_eq!(
            apply(&rules, source, "{", Rule::IfStatementOpeningBrace),
            source
        );
    }

    #[test]
    fn test_needs_before() {
        let rules = rules_with(
            &[(Rule::WhileStatementOpeningBrace, 0), (Rule::ElseStatementClosingBrace, 1)],
            &[],
        );
        let mut tokens = TokenStream::new();
        let br = LineBreak::new(&mut tokens, &rules);
        assert!(!br.needs_before(Rule::WhileStatementOpeningBrace));
        assert!(br.needs_before(Rule::ElseStatementClosingBrace));
        assert!(!br.needs_before(Rule::ForStatementOpeningBrace));
    }
}
