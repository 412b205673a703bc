//! Object literal layout.

use super::{unexpected, FormatContext};
use crate::error::{Direction, FormatError, Result};
use crate::style::Rule;
use crate::syntax::{NodeId, NodeKind, SyntaxKind};
use crate::token::{TokenId, TokenKind};

pub fn object_expression(ctx: &mut FormatContext<'_>, id: NodeId) -> Result<()> {
    let ast = ctx.ast;
    let node = ast.node(id);
    let NodeKind::ObjectExpression { properties } = &node.kind else {
        return Err(unexpected(SyntaxKind::ObjectExpression, ast, id));
    };
    if properties.is_empty() {
        return Ok(());
    }

    ctx.br()
        .around_if_needed(node.start, Rule::ObjectExpressionOpeningBrace)?;

    for &property_id in properties {
        let property = ast.node(property_id);
        let NodeKind::Property { key, .. } = &property.kind else {
            return Err(unexpected(SyntaxKind::Property, ast, property_id));
        };
        ctx.br().before_if_needed(property.start, Rule::Property)?;
        ctx.ws()
            .after_if_needed(ast.node(*key).end, Rule::PropertyName)?;

        // the terminating `,` or `}` stays on the value's line
        let terminator = terminator_after(ctx, property.end)?;
        ctx.tokens
            .remove_in_between(property.end, terminator, TokenKind::LineBreak)?;

        let colon = ctx.tokens.find_next(ast.node(*key).end, ":")?;
        let value_first = ctx
            .tokens
            .next_non_empty(colon)
            .ok_or_else(|| FormatError::not_found("property value", Direction::Forward))?;
        ctx.ws().before_if_needed(value_first, Rule::PropertyValue)?;

        let anchor = if ctx.tokens.value(terminator) == "," {
            terminator
        } else {
            property.end
        };
        ctx.br().after_if_needed(anchor, Rule::Property)?;
    }

    ctx.br()
        .around_if_needed(node.end, Rule::ObjectExpressionClosingBrace)?;
    ctx.indent().before(node.end, node.closing_indent_level)
}

/// The `,` or `}` closing a property
fn terminator_after(ctx: &FormatContext<'_>, property_end: TokenId) -> Result<TokenId> {
    let mut cursor = ctx.tokens.next(property_end);
    while let Some(id) = cursor {
        if matches!(ctx.tokens.value(id), "," | "}") {
            return Ok(id);
        }
        cursor = ctx.tokens.next(id);
    }
    Err(FormatError::not_found("}", Direction::Forward).into())
}
