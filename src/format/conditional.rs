//! `if` statements and their `else if` / `else` chains.
//!
//! The chain is formatted from the inside out: a nested `else if` statement
//! has already been visited when its parent joins it onto the `else` keyword,
//! so the parent's decisions about the join win.

use super::{unexpected, FormatContext};
use crate::error::Result;
use crate::style::Rule;
use crate::syntax::{Node, NodeId, NodeKind, SyntaxKind};
use crate::token::{TokenId, TokenKind};

pub fn if_statement(ctx: &mut FormatContext<'_>, id: NodeId) -> Result<()> {
    let ast = ctx.ast;
    let node = ast.node(id);
    let NodeKind::IfStatement {
        consequent,
        alternate,
        ..
    } = &node.kind
    else {
        return Err(unexpected(SyntaxKind::IfStatement, ast, id));
    };
    let consequent = ast.node(*consequent);
    let (start_body, end_body) = (consequent.start, consequent.end);

    let open = ctx.tokens.find_next(node.start, "(")?;
    let close = ctx.tokens.find_prev(start_body, ")")?;
    ctx.tokens.remove_ws_br_in_between(node.start, open)?;
    ctx.tokens.remove_ws_br_in_between(close, start_body)?;
    ctx.ws()
        .before_if_needed(open, Rule::IfStatementConditional)?;
    ctx.ws()
        .after_if_needed(close, Rule::IfStatementConditional)?;

    if let Some(alternate) = alternate {
        let alternate = ast.node(*alternate);
        let else_keyword = ctx.tokens.find_prev(alternate.start, "else")?;
        // only a `}` before `else` is pulled onto the `else` line
        let before_else = ctx.tokens.find_prev_non_empty(else_keyword)?;
        let strip_from = if ctx.tokens[before_else].is_punctuator("}") {
            before_else
        } else {
            else_keyword
        };
        ctx.tokens
            .remove_ws_br_in_between(strip_from, alternate.start)?;
        // a consequent ended by a line break instead of `;` must keep it
        let joinable = matches!(ctx.tokens.value(end_body), ";" | "}");
        let clause = ElseClause {
            else_keyword,
            joinable,
        };

        match &alternate.kind {
            NodeKind::IfStatement { consequent, .. } => {
                else_if_clause(ctx, node, ast.node(*consequent), &clause, alternate.start)?;
            }
            NodeKind::BlockStatement { .. } => {
                else_clause(ctx, node, alternate, &clause)?;
            }
            // without braces the space is what keeps `else` apart from the statement
            _ => ctx.ws().after(else_keyword)?,
        }
    }

    if consequent.syntax_kind() == SyntaxKind::BlockStatement {
        let last_inside = ctx.tokens.find_prev_non_empty(end_body)?;
        ctx.tokens.remove_ws_br_in_between(last_inside, end_body)?;

        ctx.br()
            .around_if_needed(start_body, Rule::IfStatementOpeningBrace)?;
        ctx.ws()
            .around_if_needed(start_body, Rule::IfStatementOpeningBrace)?;
        if alternate.is_some() {
            ctx.br()
                .before_if_needed(end_body, Rule::IfStatementClosingBrace)?;
        } else {
            ctx.br()
                .around_if_needed(end_body, Rule::IfStatementClosingBrace)?;
        }
        ctx.indent().if_needed(start_body, node.indent_level)?;
        ctx.indent().if_needed(end_body, node.indent_level)?;
        ctx.ws()
            .around_if_needed(end_body, Rule::IfStatementClosingBrace)?;
    }
    Ok(())
}

/// The `else` keyword of a chain link
struct ElseClause {
    else_keyword: TokenId,
    /// Whether `else` may be pulled onto the consequent's last line
    joinable: bool,
}

fn else_if_clause(
    ctx: &mut FormatContext<'_>,
    node: &Node,
    consequent: &Node,
    clause: &ElseClause,
    if_keyword: TokenId,
) -> Result<()> {
    let else_keyword = clause.else_keyword;
    ctx.ws().before(if_keyword)?;
    if consequent.syntax_kind() == SyntaxKind::BlockStatement {
        ctx.br()
            .before_if_needed(consequent.start, Rule::ElseIfStatementOpeningBrace)?;
        ctx.indent().if_needed(consequent.start, node.indent_level)?;
        ctx.br()
            .before_if_needed(consequent.end, Rule::ElseIfStatementClosingBrace)?;
    }
    if clause.joinable {
        ctx.br()
            .before_if_needed(else_keyword, Rule::ElseIfStatement)?;
    }
    ctx.br()
        .after_if_needed(consequent.end, Rule::ElseIfStatement)
}

fn else_clause(
    ctx: &mut FormatContext<'_>,
    node: &Node,
    block: &Node,
    clause: &ElseClause,
) -> Result<()> {
    let else_keyword = clause.else_keyword;
    ctx.ws().before(else_keyword)?;
    ctx.br()
        .around_if_needed(block.start, Rule::ElseStatementOpeningBrace)?;
    ctx.ws()
        .around_if_needed(block.start, Rule::ElseStatementOpeningBrace)?;

    if ctx.br().needs_before(Rule::ElseStatementClosingBrace) {
        let last_inside = ctx.tokens.find_prev_non_empty(block.end)?;
        ctx.tokens
            .remove_in_between(last_inside, block.end, TokenKind::WhiteSpace)?;
        ctx.br()
            .around_if_needed(block.end, Rule::ElseStatementClosingBrace)?;
        ctx.indent().if_needed(block.end, node.indent_level)?;
    } else {
        ctx.ws()
            .around_if_needed(block.end, Rule::ElseStatementClosingBrace)?;
    }

    if clause.joinable {
        ctx.br()
            .before_if_needed(else_keyword, Rule::ElseStatement)?;
    }
    ctx.br().after_if_needed(block.end, Rule::ElseStatement)?;
    ctx.indent().if_needed(else_keyword, node.indent_level)?;
    ctx.indent().if_needed(block.start, node.indent_level)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::config::Config;
    use crate::format::test_support::{config_with, format_with};
    use crate::style::Rule;

    #[test]
    fn test_bare_else_gets_one_space() {
        let out = format_with("if(x)y();else z();", &Config::default());
        assert_eq!(out, "if (x) y();else z();");
    }

    #[test]
    fn test_bare_else_space_ignores_brace_rules() {
        let config = config_with(
            &[],
            &[],
            &[(Rule::ElseStatementOpeningBrace, 1), (Rule::ElseStatement, 1)],
            &[(Rule::ElseStatementOpeningBrace, 1)],
        );
        assert_eq!(
            format_with("if(x)y();else\n\nz();", &config),
            "if(x)y();else z();"
        );
    }

    #[test]
    fn test_else_block_joins_closing_brace() {
        let source = "if (x) {\n  y();\n}\nelse\n{\n  z();\n}";
        let out = format_with(source, &Config::default());
        assert_eq!(out, "if (x) {\n  y();\n} else {\n  z();\n}");
    }

    #[test]
    fn test_else_if_chain() {
        let source = "if(a){x()}\nelse if(b){y()}\nelse{z()}";
        let out = format_with(source, &Config::default());
        assert_eq!(
            out,
            "if (a) {\n  x()\n} else if (b) {\n  y()\n} else {\n  z()\n}"
        );
        assert_eq!(format_with(&out, &Config::default()), out);
    }

    #[test]
    fn test_nested_if_indentation() {
        let source = "function f() {\nif (a) {\nb()\n} else {\nc()\n}\n}";
        let out = format_with(source, &Config::default());
        assert_eq!(
            out,
            "function f() {\n  if (a) {\n    b()\n  } else {\n    c()\n  }\n}"
        );
    }

    #[test]
    fn test_else_after_non_brace_keeps_its_line() {
        let source = "if (a) b()\nelse {\n  c()\n}";
        let out = format_with(source, &Config::default());
        assert_eq!(out, "if (a) b()\nelse {\n  c()\n}");
    }
}
