//! Operator spacing of binary, logical, assignment and sequence expressions.

use super::{unexpected, FormatContext};
use crate::error::{Direction, FormatError, Result};
use crate::style::Rule;
use crate::syntax::{NodeId, NodeKind, SyntaxKind};
use crate::token::TokenKind;

/// Binary expressions never wrap: the span is joined onto one line, except
/// for braced parts such as function bodies and object literals.
pub fn binary_expression(ctx: &mut FormatContext<'_>, id: NodeId) -> Result<()> {
    let ast = ctx.ast;
    let node = ast.node(id);
    let NodeKind::BinaryExpression { operator, left, .. } = &node.kind else {
        return Err(unexpected(SyntaxKind::BinaryExpression, ast, id));
    };
    ctx.tokens
        .remove_line_breaks_outside_braces(node.start, node.end)?;
    let operator = ctx.tokens.find_next(ast.node(*left).end, operator)?;
    ctx.ws()
        .around_if_needed(operator, Rule::BinaryExpressionOperator)
}

/// The operator is found by scanning forward from the left operand, which
/// steps over the closing parentheses of a parenthesized left side.
pub fn logical_expression(ctx: &mut FormatContext<'_>, id: NodeId) -> Result<()> {
    let ast = ctx.ast;
    let NodeKind::LogicalExpression { operator, left, .. } = &ast.node(id).kind else {
        return Err(unexpected(SyntaxKind::LogicalExpression, ast, id));
    };
    let operator = ctx.tokens.find_next(ast.node(*left).end, operator)?;
    ctx.ws()
        .around_if_needed(operator, Rule::LogicalExpressionOperator)
}

/// Spacing after the left side and before the right side are separate
/// lookups: the `after` table spaces the left side and the `before` table
/// spaces the right side.
pub fn assignment_expression(ctx: &mut FormatContext<'_>, id: NodeId) -> Result<()> {
    let ast = ctx.ast;
    let NodeKind::AssignmentExpression {
        operator,
        left,
        right,
    } = &ast.node(id).kind
    else {
        return Err(unexpected(SyntaxKind::AssignmentExpression, ast, id));
    };
    let (left_end, right_start) = (ast.node(*left).end, ast.node(*right).start);
    ctx.tokens
        .remove_in_between(left_end, right_start, TokenKind::LineBreak)?;

    // anchor on the operator so parentheses around either side stay tight
    let operator = ctx.tokens.find_next(left_end, operator)?;
    let left_last = ctx.tokens.find_prev_non_empty(operator)?;
    let right_first = ctx
        .tokens
        .next_non_empty(operator)
        .ok_or_else(|| FormatError::not_found("assignment value", Direction::Forward))?;
    ctx.ws()
        .after_if_needed(left_last, Rule::AssignmentOperator)?;
    ctx.ws()
        .before_if_needed(right_first, Rule::AssignmentOperator)
}

pub fn sequence_expression(ctx: &mut FormatContext<'_>, id: NodeId) -> Result<()> {
    let ast = ctx.ast;
    let NodeKind::SequenceExpression { expressions } = &ast.node(id).kind else {
        return Err(unexpected(SyntaxKind::SequenceExpression, ast, id));
    };
    for &expression in expressions.iter().skip(1) {
        let comma = ctx.tokens.find_prev(ast.node(expression).start, ",")?;
        ctx.ws().around_if_needed(comma, Rule::CommaOperator)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::config::Config;
    use crate::format::test_support::{config_with, format_with};
    use crate::style::Rule;

    fn operator_rules(rule: Rule, before: i8, after: i8) -> Config {
        config_with(&[(rule, before)], &[(rule, after)], &[], &[])
    }

    #[test]
    fn test_binary_joins_lines() {
        let config = operator_rules(Rule::BinaryExpressionOperator, 1, 1);
        assert_eq!(format_with("1+\n2;", &config), "1 + 2;");
        assert_eq!(
            format_with("x = 1 +\n    2 *\n3;", &config),
            "x = 1 + 2 * 3;"
        );
    }

    #[test]
    fn test_binary_keeps_comment_line_break() {
        let config = operator_rules(Rule::BinaryExpressionOperator, 1, 1);
        let source = "a + // why\n  b;";
        assert_eq!(format_with(source, &config), source);
    }

    #[test]
    fn test_binary_keeps_nested_function_body_lines() {
        let config = operator_rules(Rule::BinaryExpressionOperator, 1, 1);
        let once = format_with("x = 1 + function(){\na()\nb()\n}();", &config);
        assert_eq!(once, "x = 1 + function(){\n  a()\n  b()\n}();");
        assert_eq!(format_with(&once, &config), once);
    }

    #[test]
    fn test_binary_without_spaces() {
        let config = operator_rules(Rule::BinaryExpressionOperator, 0, 0);
        assert_eq!(format_with("a * b - c;", &config), "a*b-c;");
        assert_eq!(format_with("a - -b;", &config), "a- -b;");
        assert_eq!(format_with("a in b;", &config), "a in b;");
    }

    #[test]
    fn test_logical_after_parenthesized_left() {
        let config = operator_rules(Rule::LogicalExpressionOperator, 1, 1);
        assert_eq!(format_with("((a))||b;", &config), "((a)) || b;");
        assert_eq!(format_with("a&&b||c;", &config), "a && b || c;");
    }

    #[test]
    fn test_assignment_asymmetric() {
        // the after table spaces the left side, the before table the right side
        let config = operator_rules(Rule::AssignmentOperator, 1, 0);
        assert_eq!(format_with("a = b;", &config), "a= b;");
        assert_eq!(format_with("a\n+=\n(b);", &config), "a+= (b);");
    }

    #[test]
    fn test_sequence_commas() {
        let config = operator_rules(Rule::CommaOperator, 0, 1);
        assert_eq!(format_with("a=1 ,b=2,(c);", &config), "a=1, b=2, (c);");
    }

    #[test]
    fn test_idempotent_with_defaults() {
        let config = Config::default();
        let once = format_with("x=a*(b+c)&&d||e,y=f;", &config);
        assert_eq!(once, "x = a * (b + c) && d || e, y = f;");
        assert_eq!(format_with(&once, &config), once);
    }
}
