//! `var` / `let` / `const` declaration lists.
//!
//! Outside a `for` header every declarator after the first goes on its own
//! line, one level deeper than the keyword. Inside a header the list stays on
//! one line.

use super::{unexpected, FormatContext};
use crate::error::{Direction, FormatError, Result};
use crate::style::Rule;
use crate::syntax::{NodeId, NodeKind, SyntaxKind};
use crate::token::TokenKind;

pub fn variable_declaration(ctx: &mut FormatContext<'_>, id: NodeId) -> Result<()> {
    let ast = ctx.ast;
    let node = ast.node(id);
    let NodeKind::VariableDeclaration { declarations, .. } = &node.kind else {
        return Err(unexpected(SyntaxKind::VariableDeclaration, ast, id));
    };
    let in_for_header = ast
        .parent(id)
        .is_some_and(|parent| ast.kind(parent) == SyntaxKind::ForStatement);
    if in_for_header {
        ctx.tokens
            .remove_in_between(node.start, node.end, TokenKind::LineBreak)?;
    }

    for (index, &declarator_id) in declarations.iter().enumerate() {
        let NodeKind::VariableDeclarator { id: name, init } = &ast.node(declarator_id).kind else {
            return Err(unexpected(SyntaxKind::VariableDeclarator, ast, declarator_id));
        };
        let name = ast.node(*name);
        if index == 0 {
            ctx.tokens
                .remove_adjacent_before(name.start, TokenKind::LineBreak)?;
        } else if in_for_header {
            ctx.ws().before_if_needed(name.start, Rule::VariableName)?;
        } else {
            ctx.br().before_if_needed(name.start, Rule::VariableName)?;
            ctx.indent().before(name.start, node.indent_level + 1)?;
        }

        if init.is_some() {
            let equals = ctx.tokens.find_next(name.end, "=")?;
            ctx.tokens
                .remove_in_between(name.end, equals, TokenKind::LineBreak)?;
            ctx.ws().after(name.end)?;
            let value_first = ctx
                .tokens
                .next_non_empty(equals)
                .ok_or_else(|| FormatError::not_found("initializer", Direction::Forward))?;
            ctx.tokens
                .remove_adjacent_before(value_first, TokenKind::LineBreak)?;
            ctx.br().before_if_needed(value_first, Rule::VariableValue)?;
            ctx.ws().before(value_first)?;
        }
    }

    let mut ws = ctx.ws();
    if ws.needs_after_token(node.start) {
        ws.after(node.start)?;
    }
    Ok(())
}
