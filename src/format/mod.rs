//! Node formatters and the dispatch table.
//!
//! This module contains the per-construct layout logic organized into submodules:
//! - [`function`]: Function declarations and call argument lists
//! - [`expression`]: Binary, logical, assignment and sequence operators
//! - [`object`]: Object literals, one property per line
//! - [`variable`]: `var`/`let`/`const` declaration lists
//! - [`loops`]: `while` and `for` statements
//! - [`conditional`]: `if` / `else if` / `else` chains
//! - [`traverse`]: Post-order driver and the final layout pass
//!
//! A formatter receives one node and mutates the shared token stream through
//! the style appliers. It may touch tokens outside its own span, so it never
//! keeps a token id of a neighbour across calls; every anchor is re-derived
//! from the node and relative navigation.

pub mod conditional;
pub mod expression;
pub mod function;
pub mod loops;
pub mod object;
pub mod traverse;
pub mod variable;

pub use traverse::format_ast;

use crate::error::{FormatError, Result};
use crate::style::{Indent, LineBreak, Rules, Whitespace};
use crate::syntax::{Ast, NodeId, SyntaxKind};
use crate::token::TokenStream;

/// Everything a formatter reads or mutates
pub struct FormatContext<'a> {
    pub ast: &'a Ast,
    pub tokens: &'a mut TokenStream,
    pub rules: &'a Rules,
}

impl<'a> FormatContext<'a> {
    pub fn new(ast: &'a Ast, tokens: &'a mut TokenStream, rules: &'a Rules) -> Self {
        Self { ast, tokens, rules }
    }

    pub fn ws(&mut self) -> Whitespace<'_> {
        Whitespace::new(self.tokens, self.rules)
    }

    pub fn br(&mut self) -> LineBreak<'_> {
        LineBreak::new(self.tokens, self.rules)
    }

    pub fn indent(&mut self) -> Indent<'_> {
        Indent::new(self.tokens, self.rules.indent_unit())
    }
}

/// Layout procedure for one kind of node
pub type NodeFormatter = fn(&mut FormatContext<'_>, NodeId) -> Result<()>;

/// Formatter registered for `kind`, if that kind is formatted at all
#[must_use]
pub fn formatter_for(kind: SyntaxKind) -> Option<NodeFormatter> {
    let formatter: NodeFormatter = match kind {
        SyntaxKind::FunctionDeclaration => function::function_declaration,
        SyntaxKind::CallExpression => function::call_expression,
        SyntaxKind::BinaryExpression => expression::binary_expression,
        SyntaxKind::LogicalExpression => expression::logical_expression,
        SyntaxKind::AssignmentExpression => expression::assignment_expression,
        SyntaxKind::SequenceExpression => expression::sequence_expression,
        SyntaxKind::ObjectExpression => object::object_expression,
        SyntaxKind::VariableDeclaration => variable::variable_declaration,
        SyntaxKind::WhileStatement => loops::while_statement,
        SyntaxKind::ForStatement => loops::for_statement,
        SyntaxKind::IfStatement => conditional::if_statement,
        SyntaxKind::Program
        | SyntaxKind::FunctionExpression
        | SyntaxKind::BlockStatement
        | SyntaxKind::ExpressionStatement
        | SyntaxKind::ReturnStatement
        | SyntaxKind::BreakStatement
        | SyntaxKind::ContinueStatement
        | SyntaxKind::EmptyStatement
        | SyntaxKind::VariableDeclarator
        | SyntaxKind::ConditionalExpression
        | SyntaxKind::UnaryExpression
        | SyntaxKind::UpdateExpression
        | SyntaxKind::NewExpression
        | SyntaxKind::MemberExpression
        | SyntaxKind::Property
        | SyntaxKind::ArrayExpression
        | SyntaxKind::Identifier
        | SyntaxKind::Literal
        | SyntaxKind::ThisExpression => return None,
    };
    Some(formatter)
}

fn unexpected(expected: SyntaxKind, ast: &Ast, id: NodeId) -> anyhow::Error {
    FormatError::UnexpectedNode {
        expected,
        found: ast.kind(id),
    }
    .into()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::Config;
    use crate::style::{Rule, RuleTable, Rules};
    use crate::syntax::{assign_indent_levels, parse};
    use crate::token::tokenize;

    use super::format_ast;

    pub(crate) type Entries<'a> = &'a [(Rule, i8)];

    fn table(entries: Entries<'_>) -> RuleTable {
        entries.iter().copied().collect()
    }

    /// Config whose rule tables only hold the given entries
    pub(crate) fn config_with(
        ws_before: Entries<'_>,
        ws_after: Entries<'_>,
        br_before: Entries<'_>,
        br_after: Entries<'_>,
    ) -> Config {
        let mut config = Config::default();
        config.whitespace.before = table(ws_before);
        config.whitespace.after = table(ws_after);
        config.line_break.before = table(br_before);
        config.line_break.after = table(br_after);
        config
    }

    /// Run the whole formatting pass over `source`
    pub(crate) fn format_with(source: &str, config: &Config) -> String {
        let mut tokens = tokenize(source).unwrap();
        let mut ast = parse(&tokens).unwrap();
        assign_indent_levels(&mut ast);
        let rules = Rules::from_config(config);
        format_ast(&ast, &mut tokens, &rules).unwrap();
        tokens.to_source()
    }
}
