//! Horizontal spacing next to a token.
//!
//! The whitespace before a token is the run of whitespace tokens between it
//! and the previous token on the same line. A run that starts a line is
//! indentation and one that ends a line is trailing; neither is touched here.

use super::rule::{Amount, Rule, Rules};
use crate::error::Result;
use crate::token::{would_merge, Token, TokenId, TokenKind, TokenStream};

pub struct Whitespace<'a> {
    tokens: &'a mut TokenStream,
    rules: &'a Rules,
}

impl<'a> Whitespace<'a> {
    pub fn new(tokens: &'a mut TokenStream, rules: &'a Rules) -> Self {
        Self { tokens, rules }
    }

    pub fn before_if_needed(&mut self, token: TokenId, rule: Rule) -> Result<()> {
        match self.rules.whitespace_before(rule) {
            Amount::Preserve => Ok(()),
            Amount::Exactly(amount) => self.set_before(token, amount),
        }
    }

    pub fn after_if_needed(&mut self, token: TokenId, rule: Rule) -> Result<()> {
        match self.rules.whitespace_after(rule) {
            Amount::Preserve => Ok(()),
            Amount::Exactly(amount) => self.set_after(token, amount),
        }
    }

    pub fn around_if_needed(&mut self, token: TokenId, rule: Rule) -> Result<()> {
        self.before_if_needed(token, rule)?;
        self.after_if_needed(token, rule)
    }

    /// Force a single space before `token`
    pub fn before(&mut self, token: TokenId) -> Result<()> {
        self.set_before(token, 1)
    }

    /// Force a single space after `token`
    pub fn after(&mut self, token: TokenId) -> Result<()> {
        self.set_after(token, 1)
    }

    /// Whether the token following `token` would fuse with it without a space
    #[must_use]
    pub fn needs_after_token(&self, token: TokenId) -> bool {
        self.tokens.next(token).is_some_and(|next| {
            let next = &self.tokens[next];
            next.is_significant() && would_merge(&self.tokens[token], next)
        })
    }

    fn set_before(&mut self, token: TokenId, amount: usize) -> Result<()> {
        let run = self.run_before(token);
        let Some(&nearest) = run.first() else {
            // glued to a significant neighbour, or at the very start
            return match self.tokens.prev(token) {
                Some(prev) if amount > 0 && self.tokens.kind(prev) != TokenKind::LineBreak => {
                    self.tokens.insert_before(token, Token::whitespace(amount));
                    Ok(())
                }
                _ => Ok(()),
            };
        };
        let farthest = run[run.len() - 1];
        match self.tokens.prev(farthest) {
            Some(left) if self.tokens.kind(left) != TokenKind::LineBreak => {
                self.reconcile(&run, nearest, left, token, amount)
            }
            _ => Ok(()),
        }
    }

    fn set_after(&mut self, token: TokenId, amount: usize) -> Result<()> {
        let run = self.run_after(token);
        let Some(&nearest) = run.first() else {
            return match self.tokens.next(token) {
                Some(next) if amount > 0 && self.tokens.kind(next) != TokenKind::LineBreak => {
                    self.tokens.insert_after(token, Token::whitespace(amount));
                    Ok(())
                }
                _ => Ok(()),
            };
        };
        let farthest = run[run.len() - 1];
        match self.tokens.next(farthest) {
            Some(right) if self.tokens.kind(right) != TokenKind::LineBreak => {
                self.reconcile(&run, nearest, token, right, amount)
            }
            _ => Ok(()),
        }
    }

    /// Collapse a mid-line run into `keep` and size it, or drop it for 0
    fn reconcile(
        &mut self,
        run: &[TokenId],
        keep: TokenId,
        left: TokenId,
        right: TokenId,
        amount: usize,
    ) -> Result<()> {
        for &extra in run.iter().filter(|&&id| id != keep) {
            self.tokens.remove(extra)?;
        }
        let amount = if amount == 0 && would_merge(&self.tokens[left], &self.tokens[right]) {
            1
        } else {
            amount
        };
        if amount == 0 {
            return self.tokens.remove(keep);
        }
        let wanted = " ".repeat(amount);
        if self.tokens.value(keep) != wanted {
            self.tokens.set_value(keep, wanted);
        }
        Ok(())
    }

    /// Consecutive whitespace tokens before `token`, nearest first
    fn run_before(&self, token: TokenId) -> Vec<TokenId> {
        let mut run = Vec::new();
        let mut cursor = self.tokens.prev(token);
        while let Some(id) = cursor {
            if self.tokens.kind(id) != TokenKind::WhiteSpace {
                break;
            }
            run.push(id);
            cursor = self.tokens.prev(id);
        }
        run
    }

    /// Consecutive whitespace tokens after `token`, nearest first
    fn run_after(&self, token: TokenId) -> Vec<TokenId> {
        let mut run = Vec::new();
        let mut cursor = self.tokens.next(token);
        while let Some(id) = cursor {
            if self.tokens.kind(id) != TokenKind::WhiteSpace {
                break;
            }
            run.push(id);
            cursor = self.tokens.next(id);
        }
        run
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::token::tokenize;

    fn rules_with(before: &[(Rule, i8)], after: &[(Rule, i8)]) -> Rules {
        let mut config = Config::default();
        config.whitespace.before = before.iter().copied().collect();
        config.whitespace.after = after.iter().copied().collect();
        Rules::from_config(&config)
    }

    fn apply(source: &str, target: &str, edit: impl Fn(&mut Whitespace<'_>, TokenId)) -> String {
        let rules = rules_with(
            &[(Rule::BinaryExpressionOperator, 1), (Rule::ArgumentList, 0)],
            &[(Rule::BinaryExpressionOperator, 1), (Rule::ArgumentList, 0)],
        );
        let mut tokens = tokenize(source).unwrap();
        let id = tokens
            .significant()
            .find(|&id| tokens.value(id) == target)
            .unwrap();
        edit(&mut Whitespace::new(&mut tokens, &rules), id);
        tokens.to_source()
    }

    fn around(rule: Rule) -> impl Fn(&mut Whitespace<'_>, TokenId) {
        move |ws, id| ws.around_if_needed(id, rule).unwrap()
    }

    #[test]
    fn test_inserts_missing_spaces() {
        let out = apply("a+b", "+", around(Rule::BinaryExpressionOperator));
        assert_eq!(out, "a + b");
    }

    #[test]
    fn test_collapses_wide_runs() {
        let out = apply("a   +\t b", "+", around(Rule::BinaryExpressionOperator));
        assert_eq!(out, "a + b");
    }

    #[test]
    fn test_removes_for_zero() {
        let out = apply("f( x )", "x", around(Rule::ArgumentList));
        assert_eq!(out, "f(x)");
    }

    #[test]
    fn test_zero_keeps_tokens_apart() {
        let out = apply("a - -b", "-", |ws, id| {
            ws.after(id).and_then(|()| ws.set_after(id, 0)).unwrap();
        });
        assert_eq!(out, "a - -b");
    }

    #[test]
    fn test_indentation_and_trailing_runs_untouched() {
        let out = apply("x(\n    y  \n)", "y", around(Rule::ArgumentList));
        assert_eq!(out, "x(\n    y  \n)");
    }

    #[test]
    fn test_unconfigured_rule_preserves() {
        let out = apply("a  ,b", ",", around(Rule::CommaOperator));
        assert_eq!(out, "a  ,b");
    }

    #[test]
    fn test_needs_after_token() {
        let rules = Rules::default();
        let mut tokens = tokenize("var\tx;").unwrap();
        let var = tokens.first().unwrap();
        let tab = tokens.next(var).unwrap();
        tokens.remove(tab).unwrap();
        let ws = Whitespace::new(&mut tokens, &rules);
        assert!(ws.needs_after_token(var));
        let x = ws.tokens.next(var).unwrap();
        assert!(!ws.needs_after_token(x));
    }
}
