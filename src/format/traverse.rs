//! Post-order driver.
//!
//! Every node is visited after its children and handed to the formatter of
//! its kind. A layout pass then sets the indentation of line-starting
//! statements, properties and closing braces, and drops trailing whitespace.

use tracing::{debug, trace};

use super::{formatter_for, FormatContext};
use crate::error::Result;
use crate::style::Rules;
use crate::syntax::{Ast, NodeId, SyntaxKind};
use crate::token::{TokenId, TokenKind, TokenStream};

/// Format every node of `ast`, mutating `tokens` in place
pub fn format_ast(ast: &Ast, tokens: &mut TokenStream, rules: &Rules) -> Result<()> {
    let mut ctx = FormatContext::new(ast, tokens, rules);
    let mut visited = 0usize;
    for id in ast.post_order() {
        let kind = ast.kind(id);
        if let Some(formatter) = formatter_for(kind) {
            trace!(?kind, "formatting node");
            formatter(&mut ctx, id)?;
            visited += 1;
        }
    }
    debug!(formatted = visited, nodes = ast.len(), "node formatters done");

    layout(&mut ctx)?;
    remove_trailing_whitespace(ctx.tokens)
}

/// Whether the layout pass owns the indentation of `id`
fn is_line_item(ast: &Ast, id: NodeId) -> bool {
    if ast.kind(id) == SyntaxKind::Property {
        return true;
    }
    ast.parent(id).is_some_and(|parent| {
        matches!(
            ast.kind(parent),
            SyntaxKind::Program | SyntaxKind::BlockStatement
        )
    })
}

fn layout(ctx: &mut FormatContext<'_>) -> Result<()> {
    let ast = ctx.ast;
    for id in ast.pre_order() {
        let node = ast.node(id);
        if is_line_item(ast, id) {
            ctx.indent().if_needed(node.start, node.indent_level)?;
        }
        if node.syntax_kind() == SyntaxKind::BlockStatement {
            ctx.indent().if_needed(node.end, node.indent_level)?;
        }
    }
    Ok(())
}

fn remove_trailing_whitespace(tokens: &mut TokenStream) -> Result<()> {
    let trailing: Vec<TokenId> = tokens
        .iter()
        .filter(|&id| tokens.kind(id) == TokenKind::WhiteSpace && ends_line(tokens, id))
        .collect();
    trace!(count = trailing.len(), "removing trailing whitespace");
    for id in trailing {
        tokens.remove(id)?;
    }
    Ok(())
}

/// Whether only whitespace follows `id` up to the next line break
fn ends_line(tokens: &TokenStream, id: TokenId) -> bool {
    let mut cursor = tokens.next(id);
    while let Some(next) = cursor {
        match tokens.kind(next) {
            TokenKind::WhiteSpace => cursor = tokens.next(next),
            TokenKind::LineBreak => return true,
            _ => return false,
        }
    }
    true
}
