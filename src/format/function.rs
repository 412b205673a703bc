//! Function declarations and call argument lists.

use super::{unexpected, FormatContext};
use crate::error::Result;
use crate::style::Rule;
use crate::syntax::{Ast, NodeId, NodeKind, SyntaxKind};

/// Space `list` as a comma-separated list: `edge` inside the parentheses and
/// `comma` around each separator
fn list_spacing(
    ctx: &mut FormatContext<'_>,
    ast: &Ast,
    list: &[NodeId],
    edge: Rule,
    comma: Rule,
) -> Result<()> {
    let (Some(&first), Some(&last)) = (list.first(), list.last()) else {
        return Ok(());
    };
    ctx.ws().before_if_needed(ast.node(first).start, edge)?;
    // the separator may sit behind closing parentheses of the item
    for pair in list.windows(2) {
        let separator = ctx.tokens.find_next(ast.node(pair[0]).end, ",")?;
        ctx.ws().around_if_needed(separator, comma)?;
    }
    ctx.ws().after_if_needed(ast.node(last).end, edge)
}

pub fn function_declaration(ctx: &mut FormatContext<'_>, id: NodeId) -> Result<()> {
    let ast = ctx.ast;
    let node = ast.node(id);
    let NodeKind::FunctionDeclaration {
        id: name,
        params,
        body,
    } = &node.kind
    else {
        return Err(unexpected(SyntaxKind::FunctionDeclaration, ast, id));
    };

    ctx.ws()
        .after_if_needed(ast.node(*name).end, Rule::FunctionName)?;
    list_spacing(ctx, ast, params, Rule::ParameterList, Rule::ParameterComma)?;

    let body = ast.node(*body);
    ctx.br()
        .around_if_needed(body.start, Rule::FunctionDeclarationOpeningBrace)?;
    ctx.br()
        .around_if_needed(body.end, Rule::FunctionDeclarationClosingBrace)?;
    ctx.ws()
        .around_if_needed(body.start, Rule::FunctionDeclarationOpeningBrace)?;
    ctx.ws()
        .around_if_needed(body.end, Rule::FunctionDeclarationClosingBrace)?;

    ctx.indent().if_needed(body.start, node.indent_level)?;
    ctx.indent().if_needed(body.end, node.indent_level)
}

pub fn call_expression(ctx: &mut FormatContext<'_>, id: NodeId) -> Result<()> {
    let ast = ctx.ast;
    let NodeKind::CallExpression { arguments, .. } = &ast.node(id).kind else {
        return Err(unexpected(SyntaxKind::CallExpression, ast, id));
    };
    list_spacing(ctx, ast, arguments, Rule::ArgumentList, Rule::ArgumentComma)
}
