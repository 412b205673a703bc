//! `while` and `for` statements.

use super::{unexpected, FormatContext};
use crate::error::Result;
use crate::style::Rule;
use crate::syntax::{Node, NodeId, NodeKind, SyntaxKind};
use crate::token::{TokenId, TokenKind};

/// Brace rules of a loop body
struct BodyRules {
    opening: Rule,
    closing: Rule,
    /// Spacing between the header's `)` and the body
    header: Rule,
}

/// Header parentheses: the first `(` after the keyword and the last `)`
/// before the body
fn header_parens(ctx: &FormatContext<'_>, node: &Node, body: &Node) -> Result<(TokenId, TokenId)> {
    let open = ctx.tokens.find_next(node.start, "(")?;
    let close = ctx.tokens.find_prev(body.start, ")")?;
    Ok((open, close))
}

fn format_body(
    ctx: &mut FormatContext<'_>,
    node: &Node,
    body: &Node,
    close: TokenId,
    rules: &BodyRules,
    strip_inner_space: bool,
) -> Result<()> {
    if body.syntax_kind() != SyntaxKind::BlockStatement {
        // `while (x);` keeps its semicolon glued to the header
        let next = ctx.tokens.next(close);
        if next.is_some_and(|next| ctx.tokens.value(next) != ";") {
            ctx.ws().after_if_needed(close, rules.header)?;
        }
        return Ok(());
    }

    if !ctx.br().needs_before(rules.opening) {
        ctx.tokens
            .remove_adjacent_before(body.start, TokenKind::LineBreak)?;
    }
    if strip_inner_space {
        ctx.tokens
            .remove_adjacent_after(body.start, TokenKind::WhiteSpace)?;
    }
    ctx.br().around_if_needed(body.start, rules.opening)?;
    ctx.ws().around_if_needed(body.start, rules.opening)?;
    ctx.br().around_if_needed(body.end, rules.closing)?;
    ctx.ws().around_if_needed(body.end, rules.closing)?;
    ctx.indent().before(body.end, node.indent_level)?;
    ctx.ws().after_if_needed(close, rules.header)
}

pub fn while_statement(ctx: &mut FormatContext<'_>, id: NodeId) -> Result<()> {
    let ast = ctx.ast;
    let node = ast.node(id);
    let NodeKind::WhileStatement { body, .. } = &node.kind else {
        return Err(unexpected(SyntaxKind::WhileStatement, ast, id));
    };
    let body = ast.node(*body);
    let (open, close) = header_parens(ctx, node, body)?;

    ctx.tokens
        .remove_in_between(node.start, close, TokenKind::LineBreak)?;
    ctx.ws()
        .before_if_needed(open, Rule::WhileStatementConditional)?;

    let rules = BodyRules {
        opening: Rule::WhileStatementOpeningBrace,
        closing: Rule::WhileStatementClosingBrace,
        header: Rule::WhileStatementConditional,
    };
    format_body(ctx, node, body, close, &rules, false)
}

pub fn for_statement(ctx: &mut FormatContext<'_>, id: NodeId) -> Result<()> {
    let ast = ctx.ast;
    let node = ast.node(id);
    let NodeKind::ForStatement {
        init,
        test,
        update,
        body,
    } = &node.kind
    else {
        return Err(unexpected(SyntaxKind::ForStatement, ast, id));
    };
    let body = ast.node(*body);
    let (open, close) = header_parens(ctx, node, body)?;

    ctx.tokens
        .remove_in_between(node.start, close, TokenKind::LineBreak)?;
    ctx.ws()
        .before_if_needed(open, Rule::ForStatementExpression)?;

    let (first_semi, second_semi) = if let Some(test) = test {
        let test = ast.node(*test);
        (
            Some(ctx.tokens.find_prev(test.start, ";")?),
            Some(ctx.tokens.find_next(test.end, ";")?),
        )
    } else {
        let first = match init {
            Some(init) => Some(ctx.tokens.find_next(ast.node(*init).end, ";")?),
            None => None,
        };
        let second = match update {
            Some(update) => Some(ctx.tokens.find_prev(ast.node(*update).start, ";")?),
            None => None,
        };
        (first, second)
    };
    // the second one first, so an empty middle clause keeps its `; ;`
    for semi in [second_semi, first_semi].into_iter().flatten() {
        ctx.ws()
            .around_if_needed(semi, Rule::ForStatementSemicolon)?;
    }

    let rules = BodyRules {
        opening: Rule::ForStatementOpeningBrace,
        closing: Rule::ForStatementClosingBrace,
        header: Rule::ForStatementExpression,
    };
    format_body(ctx, node, body, close, &rules, true)
}
