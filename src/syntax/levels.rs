//! Indentation depth of syntax nodes.
//!
//! A node sits one level deeper for every block statement and object literal
//! strictly enclosing it. Declarators after the first one of a declaration
//! list outside a `for` header are continuation lines and sit one level deeper
//! as well. The closing brace of an object is written at the object's own
//! level.

use super::ast::{Ast, NodeId, SyntaxKind};

fn opens_level(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::BlockStatement | SyntaxKind::ObjectExpression)
}

/// Whether `id` is a later declarator of a list laid out one per line
fn is_continued_declarator(ast: &Ast, parent: NodeId, id: NodeId) -> bool {
    if ast.kind(parent) != SyntaxKind::VariableDeclaration {
        return false;
    }
    let in_for_header = ast
        .parent(parent)
        .is_some_and(|grandparent| ast.kind(grandparent) == SyntaxKind::ForStatement);
    !in_for_header && ast.children(parent).first() != Some(&id)
}

/// Fill `indent_level` and `closing_indent_level` of every reachable node
pub fn assign_indent_levels(ast: &mut Ast) {
    for id in ast.pre_order() {
        let level = match ast.parent(id) {
            Some(parent) => {
                let parent_level = ast.node(parent).indent_level;
                if opens_level(ast.kind(parent)) || is_continued_declarator(ast, parent, id) {
                    parent_level + 1
                } else {
                    parent_level
                }
            }
            None => 0,
        };
        let node = ast.node_mut(id);
        node.indent_level = level;
        node.closing_indent_level = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;
    use crate::token::tokenize;

    fn levels_of(source: &str, kind: SyntaxKind) -> Vec<usize> {
        let tokens = tokenize(source).unwrap();
        let mut ast = parse(&tokens).unwrap();
        assign_indent_levels(&mut ast);
        ast.pre_order()
            .into_iter()
            .filter(|&id| ast.kind(id) == kind)
            .map(|id| ast.node(id).indent_level)
            .collect()
    }

    #[test]
    fn test_top_level_statements_are_at_zero() {
        assert_eq!(
            levels_of("a();\nb();", SyntaxKind::ExpressionStatement),
            vec![0, 0]
        );
    }

    #[test]
    fn test_nested_blocks() {
        let source = "function f() { if (a) { b(); } }";
        assert_eq!(levels_of(source, SyntaxKind::IfStatement), vec![1]);
        assert_eq!(levels_of(source, SyntaxKind::ExpressionStatement), vec![2]);
        assert_eq!(levels_of(source, SyntaxKind::BlockStatement), vec![0, 1]);
    }

    #[test]
    fn test_continued_declarators() {
        let source = "var a = {x: 1}, b = {y: 2};";
        assert_eq!(
            levels_of(source, SyntaxKind::VariableDeclarator),
            vec![0, 1]
        );
        assert_eq!(levels_of(source, SyntaxKind::Property), vec![1, 2]);
        let header = "for (var i = 0, j = {z: 1};;) {}";
        assert_eq!(
            levels_of(header, SyntaxKind::VariableDeclarator),
            vec![0, 0]
        );
    }

    #[test]
    fn test_object_properties() {
        let source = "x = { a: { b: 1 } };";
        assert_eq!(levels_of(source, SyntaxKind::Property), vec![1, 2]);
        assert_eq!(levels_of(source, SyntaxKind::ObjectExpression), vec![0, 1]);
    }
}
