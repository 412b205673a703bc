//! Recursive-descent parser for the supported JavaScript subset.
//!
//! The parser walks the significant, non-comment tokens of a [`TokenStream`]
//! and records for every node the first and last token it spans. A
//! parenthesized expression keeps the span of its inner expression; the
//! enclosing node spans from the opening to the closing parenthesis.

use super::ast::{Ast, AstBuilder, NodeId, NodeKind};
use crate::error::{FormatError, Result};
use crate::token::{TokenId, TokenKind, TokenStream};

const ASSIGNMENT_OPERATORS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "**=", "<<=", ">>=", ">>>=", "&=", "|=", "^=", "&&=",
    "||=", "??=",
];

const UNARY_OPERATORS: &[&str] = &["!", "-", "+", "~", "typeof", "void", "delete"];

/// Binding power of a binary or logical operator
fn binary_precedence(operator: &str) -> Option<u8> {
    let precedence = match operator {
        "??" | "||" => 1,
        "&&" => 2,
        "|" => 3,
        "^" => 4,
        "&" => 5,
        "==" | "!=" | "===" | "!==" => 6,
        "<" | ">" | "<=" | ">=" | "instanceof" | "in" => 7,
        "<<" | ">>" | ">>>" => 8,
        "+" | "-" => 9,
        "*" | "/" | "%" => 10,
        "**" => 11,
        _ => return None,
    };
    Some(precedence)
}

fn is_logical(operator: &str) -> bool {
    matches!(operator, "||" | "&&" | "??")
}

/// A parsed operand together with its outermost tokens
///
/// `first`/`last` include enclosing parentheses, the node's own anchors do
/// not.
#[derive(Debug, Clone, Copy)]
struct Parsed {
    id: NodeId,
    first: TokenId,
    last: TokenId,
}

/// Parse a whole token stream into an [`Ast`]
pub fn parse(stream: &TokenStream) -> Result<Ast> {
    let mut parser = Parser::new(stream);
    let root = parser.program()?;
    Ok(parser.builder.finish(root))
}

struct Parser<'a> {
    stream: &'a TokenStream,
    tokens: Vec<TokenId>,
    pos: usize,
    builder: AstBuilder,
}

impl<'a> Parser<'a> {
    fn new(stream: &'a TokenStream) -> Self {
        let tokens = stream
            .iter()
            .filter(|&id| {
                let kind = stream.kind(id);
                !kind.is_empty() && !kind.is_comment()
            })
            .collect();
        Self {
            stream,
            tokens,
            pos: 0,
            builder: AstBuilder::default(),
        }
    }

    // ---- token cursor ----

    fn peek(&self) -> Option<TokenId> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_value(&self) -> &'a str {
        self.peek().map_or("", |id| self.stream.value(id))
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|id| self.stream.kind(id))
    }

    fn at(&self, value: &str) -> bool {
        self.peek_value() == value
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn bump(&mut self) -> Result<TokenId> {
        let id = self
            .peek()
            .ok_or_else(|| self.error("unexpected end of input"))?;
        self.pos += 1;
        Ok(id)
    }

    fn expect(&mut self, value: &str) -> Result<TokenId> {
        if self.at(value) {
            self.bump()
        } else if self.at_end() {
            Err(self.error(&format!("expected `{value}` but found end of input")))
        } else {
            Err(self.expected(&format!("`{value}`")))
        }
    }

    fn expected(&self, what: &str) -> anyhow::Error {
        let found = self.peek_value();
        self.error(&format!("expected {what} but found `{found}`"))
    }

    /// Whether a line break separates the current token from the previous one
    fn line_break_before(&self) -> bool {
        let stream = self.stream;
        match (self.pos.checked_sub(1).map(|i| self.tokens[i]), self.peek()) {
            (Some(prev), Some(current)) => {
                stream.count_between(prev, current, TokenKind::LineBreak) > 0
            }
            _ => false,
        }
    }

    fn error(&self, message: &str) -> anyhow::Error {
        let line = self
            .peek()
            .or_else(|| self.tokens.last().copied())
            .map_or(1, |id| self.stream.line_of(id));
        FormatError::Syntax {
            line,
            message: message.to_string(),
        }
        .into()
    }

    fn push(&mut self, kind: NodeKind, first: TokenId, last: TokenId) -> Parsed {
        let id = self.builder.push(kind, first, last);
        Parsed { id, first, last }
    }

    /// Consume a statement terminator, tolerating its omission before `}`, a
    /// line break or the end of input
    fn semicolon(&mut self, last: TokenId) -> Result<TokenId> {
        if self.at(";") {
            return self.bump();
        }
        if self.at_end() || self.at("}") || self.line_break_before() {
            return Ok(last);
        }
        Err(self.expected("`;`"))
    }

    // ---- statements ----

    fn program(&mut self) -> Result<NodeId> {
        let (Some(&first), Some(&last)) = (self.tokens.first(), self.tokens.last()) else {
            return Err(self.error("empty program"));
        };
        let mut body = Vec::new();
        while !self.at_end() {
            body.push(self.statement()?.id);
        }
        Ok(self.push(NodeKind::Program { body }, first, last).id)
    }

    fn statement(&mut self) -> Result<Parsed> {
        match self.peek_value() {
            "function" => self.function(true),
            "var" | "let" | "const" => {
                let declaration = self.variable_declaration()?;
                let end = self.semicolon(declaration.last)?;
                self.builder.set_end(declaration.id, end);
                Ok(Parsed {
                    last: end,
                    ..declaration
                })
            }
            "if" => self.if_statement(),
            "while" => self.while_statement(),
            "for" => self.for_statement(),
            "{" => self.block(),
            "return" => self.return_statement(),
            "break" | "continue" => self.jump_statement(),
            ";" => {
                let semi = self.bump()?;
                Ok(self.push(NodeKind::EmptyStatement, semi, semi))
            }
            _ => {
                let expression = self.expression()?;
                let end = self.semicolon(expression.last)?;
                Ok(self.push(
                    NodeKind::ExpressionStatement {
                        expression: expression.id,
                    },
                    expression.first,
                    end,
                ))
            }
        }
    }

    fn block(&mut self) -> Result<Parsed> {
        let open = self.expect("{")?;
        let mut body = Vec::new();
        while !self.at("}") {
            if self.at_end() {
                return Err(self.error("expected `}` but found end of input"));
            }
            body.push(self.statement()?.id);
        }
        let close = self.bump()?;
        Ok(self.push(NodeKind::BlockStatement { body }, open, close))
    }

    fn identifier(&mut self) -> Result<Parsed> {
        if self.peek_kind() != Some(TokenKind::Identifier) {
            return Err(self.expected("identifier"));
        }
        let token = self.bump()?;
        let name = self.stream.value(token).to_string();
        Ok(self.push(NodeKind::Identifier { name }, token, token))
    }

    fn function(&mut self, declaration: bool) -> Result<Parsed> {
        let keyword = self.expect("function")?;
        let id = if declaration || self.peek_kind() == Some(TokenKind::Identifier) {
            Some(self.identifier()?.id)
        } else {
            None
        };
        self.expect("(")?;
        let mut params = Vec::new();
        while !self.at(")") {
            params.push(self.identifier()?.id);
            if !self.at(")") {
                self.expect(",")?;
            }
        }
        self.expect(")")?;
        let body = self.block()?;
        let kind = match (declaration, id) {
            (true, Some(id)) => NodeKind::FunctionDeclaration {
                id,
                params,
                body: body.id,
            },
            _ => NodeKind::FunctionExpression {
                id,
                params,
                body: body.id,
            },
        };
        Ok(self.push(kind, keyword, body.last))
    }

    fn variable_declaration(&mut self) -> Result<Parsed> {
        let keyword_token = self.bump()?;
        let keyword = self.stream.value(keyword_token).to_string();
        let mut declarations = Vec::new();
        let last = loop {
            let id = self.identifier()?;
            let init = if self.at("=") {
                self.bump()?;
                Some(self.assignment()?)
            } else {
                None
            };
            let end = init.map_or(id.last, |init| init.last);
            let declarator = self.push(
                NodeKind::VariableDeclarator {
                    id: id.id,
                    init: init.map(|init| init.id),
                },
                id.first,
                end,
            );
            declarations.push(declarator.id);
            if !self.at(",") {
                break declarator.last;
            }
            self.bump()?;
        };
        Ok(self.push(
            NodeKind::VariableDeclaration {
                keyword,
                declarations,
            },
            keyword_token,
            last,
        ))
    }

    fn parenthesized_test(&mut self) -> Result<Parsed> {
        self.expect("(")?;
        let test = self.expression()?;
        self.expect(")")?;
        Ok(test)
    }

    fn if_statement(&mut self) -> Result<Parsed> {
        let keyword = self.expect("if")?;
        let test = self.parenthesized_test()?;
        let consequent = self.statement()?;
        let alternate = if self.at("else") {
            self.bump()?;
            Some(self.statement()?)
        } else {
            None
        };
        let last = alternate.map_or(consequent.last, |alt| alt.last);
        Ok(self.push(
            NodeKind::IfStatement {
                test: test.id,
                consequent: consequent.id,
                alternate: alternate.map(|alt| alt.id),
            },
            keyword,
            last,
        ))
    }

    fn while_statement(&mut self) -> Result<Parsed> {
        let keyword = self.expect("while")?;
        let test = self.parenthesized_test()?;
        let body = self.statement()?;
        Ok(self.push(
            NodeKind::WhileStatement {
                test: test.id,
                body: body.id,
            },
            keyword,
            body.last,
        ))
    }

    fn for_statement(&mut self) -> Result<Parsed> {
        let keyword = self.expect("for")?;
        self.expect("(")?;
        let init = match self.peek_value() {
            ";" => None,
            "var" | "let" | "const" => Some(self.variable_declaration()?.id),
            _ => Some(self.expression()?.id),
        };
        self.expect(";")?;
        let test = if self.at(";") {
            None
        } else {
            Some(self.expression()?.id)
        };
        self.expect(";")?;
        let update = if self.at(")") {
            None
        } else {
            Some(self.expression()?.id)
        };
        self.expect(")")?;
        let body = self.statement()?;
        Ok(self.push(
            NodeKind::ForStatement {
                init,
                test,
                update,
                body: body.id,
            },
            keyword,
            body.last,
        ))
    }

    fn return_statement(&mut self) -> Result<Parsed> {
        let keyword = self.expect("return")?;
        let bare = self.at(";") || self.at("}") || self.at_end() || self.line_break_before();
        let argument = if bare {
            None
        } else {
            Some(self.expression()?)
        };
        let last = argument.map_or(keyword, |arg| arg.last);
        let end = self.semicolon(last)?;
        Ok(self.push(
            NodeKind::ReturnStatement {
                argument: argument.map(|arg| arg.id),
            },
            keyword,
            end,
        ))
    }

    fn jump_statement(&mut self) -> Result<Parsed> {
        let keyword = self.bump()?;
        let labelled =
            self.peek_kind() == Some(TokenKind::Identifier) && !self.line_break_before();
        let label = if labelled {
            Some(self.identifier()?)
        } else {
            None
        };
        let last = label.map_or(keyword, |label| label.last);
        let end = self.semicolon(last)?;
        let label = label.map(|label| label.id);
        let kind = if self.stream.value(keyword) == "break" {
            NodeKind::BreakStatement { label }
        } else {
            NodeKind::ContinueStatement { label }
        };
        Ok(self.push(kind, keyword, end))
    }

    // ---- expressions ----

    fn expression(&mut self) -> Result<Parsed> {
        let first = self.assignment()?;
        if !self.at(",") {
            return Ok(first);
        }
        let mut expressions = vec![first.id];
        let mut last = first.last;
        while self.at(",") {
            self.bump()?;
            let next = self.assignment()?;
            expressions.push(next.id);
            last = next.last;
        }
        Ok(self.push(NodeKind::SequenceExpression { expressions }, first.first, last))
    }

    fn assignment(&mut self) -> Result<Parsed> {
        let left = self.conditional()?;
        if !ASSIGNMENT_OPERATORS.contains(&self.peek_value()) {
            return Ok(left);
        }
        let operator_token = self.bump()?;
        let operator = self.stream.value(operator_token).to_string();
        let right = self.assignment()?;
        Ok(self.push(
            NodeKind::AssignmentExpression {
                operator,
                left: left.id,
                right: right.id,
            },
            left.first,
            right.last,
        ))
    }

    fn conditional(&mut self) -> Result<Parsed> {
        let test = self.binary(1)?;
        if !self.at("?") {
            return Ok(test);
        }
        self.bump()?;
        let consequent = self.assignment()?;
        self.expect(":")?;
        let alternate = self.assignment()?;
        Ok(self.push(
            NodeKind::ConditionalExpression {
                test: test.id,
                consequent: consequent.id,
                alternate: alternate.id,
            },
            test.first,
            alternate.last,
        ))
    }

    fn binary(&mut self, min_precedence: u8) -> Result<Parsed> {
        let mut left = self.unary()?;
        while let Some(precedence) = binary_precedence(self.peek_value()) {
            if precedence < min_precedence {
                break;
            }
            let operator_token = self.bump()?;
        let operator = self.stream.value(operator_token).to_string();
            // `**` is right-associative
            let next_min = if operator == "**" {
                precedence
            } else {
                precedence + 1
            };
            let right = self.binary(next_min)?;
            let kind = if is_logical(&operator) {
                NodeKind::LogicalExpression {
                    operator,
                    left: left.id,
                    right: right.id,
                }
            } else {
                NodeKind::BinaryExpression {
                    operator,
                    left: left.id,
                    right: right.id,
                }
            };
            left = self.push(kind, left.first, right.last);
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Parsed> {
        let value = self.peek_value();
        let is_punctuator = self.peek_kind() == Some(TokenKind::Punctuator)
            || self.peek_kind() == Some(TokenKind::Keyword);
        if is_punctuator && UNARY_OPERATORS.contains(&value) {
            let operator_token = self.bump()?;
            let operator = self.stream.value(operator_token).to_string();
            let argument = self.unary()?;
            return Ok(self.push(
                NodeKind::UnaryExpression {
                    operator,
                    argument: argument.id,
                },
                operator_token,
                argument.last,
            ));
        }
        if value == "++" || value == "--" {
            let operator_token = self.bump()?;
            let operator = self.stream.value(operator_token).to_string();
            let argument = self.unary()?;
            return Ok(self.push(
                NodeKind::UpdateExpression {
                    operator,
                    prefix: true,
                    argument: argument.id,
                },
                operator_token,
                argument.last,
            ));
        }
        let expression = self.call_member()?;
        if (self.at("++") || self.at("--")) && !self.line_break_before() {
            let operator_token = self.bump()?;
            let operator = self.stream.value(operator_token).to_string();
            return Ok(self.push(
                NodeKind::UpdateExpression {
                    operator,
                    prefix: false,
                    argument: expression.id,
                },
                expression.first,
                operator_token,
            ));
        }
        Ok(expression)
    }

    fn call_member(&mut self) -> Result<Parsed> {
        let mut expression = if self.at("new") {
            self.new_expression()?
        } else {
            self.primary()?
        };
        loop {
            match self.peek_value() {
                "." | "[" => expression = self.member(expression)?,
                "(" => {
                    let (arguments, close) = self.arguments()?;
                    expression = self.push(
                        NodeKind::CallExpression {
                            callee: expression.id,
                            arguments,
                        },
                        expression.first,
                        close,
                    );
                }
                _ => return Ok(expression),
            }
        }
    }

    fn member(&mut self, object: Parsed) -> Result<Parsed> {
        let punctuator = self.bump()?;
        if self.stream.value(punctuator) == "[" {
            let property = self.expression()?;
            let close = self.expect("]")?;
            return Ok(self.push(
                NodeKind::MemberExpression {
                    object: object.id,
                    property: property.id,
                    computed: true,
                },
                object.first,
                close,
            ));
        }
        let property = self.property_name()?;
        Ok(self.push(
            NodeKind::MemberExpression {
                object: object.id,
                property: property.id,
                computed: false,
            },
            object.first,
            property.last,
        ))
    }

    /// Identifier after `.`, where reserved words are allowed
    fn property_name(&mut self) -> Result<Parsed> {
        match self.peek_kind() {
            Some(TokenKind::Identifier | TokenKind::Keyword) => {
                let token = self.bump()?;
                let name = self.stream.value(token).to_string();
                Ok(self.push(NodeKind::Identifier { name }, token, token))
            }
            _ => Err(self.expected("property name")),
        }
    }

    fn new_expression(&mut self) -> Result<Parsed> {
        let keyword = self.expect("new")?;
        let mut callee = if self.at("new") {
            self.new_expression()?
        } else {
            self.primary()?
        };
        while self.at(".") || self.at("[") {
            callee = self.member(callee)?;
        }
        let (arguments, last) = if self.at("(") {
            self.arguments()?
        } else {
            (Vec::new(), callee.last)
        };
        Ok(self.push(
            NodeKind::NewExpression {
                callee: callee.id,
                arguments,
            },
            keyword,
            last,
        ))
    }

    fn arguments(&mut self) -> Result<(Vec<NodeId>, TokenId)> {
        self.expect("(")?;
        let mut arguments = Vec::new();
        while !self.at(")") {
            arguments.push(self.assignment()?.id);
            if !self.at(")") {
                self.expect(",")?;
            }
        }
        let close = self.bump()?;
        Ok((arguments, close))
    }

    fn primary(&mut self) -> Result<Parsed> {
        let Some(kind) = self.peek_kind() else {
            return Err(self.error("unexpected end of input"));
        };
        match (kind, self.peek_value()) {
            (TokenKind::Identifier, _) => self.identifier(),
            (TokenKind::Numeric | TokenKind::String, _)
            | (TokenKind::Keyword, "true" | "false" | "null") => {
                let token = self.bump()?;
                let raw = self.stream.value(token).to_string();
                Ok(self.push(NodeKind::Literal { raw }, token, token))
            }
            (TokenKind::Keyword, "this") => {
                let token = self.bump()?;
                Ok(self.push(NodeKind::ThisExpression, token, token))
            }
            (TokenKind::Keyword, "function") => self.function(false),
            (TokenKind::Punctuator, "(") => {
                let open = self.bump()?;
                let inner = self.expression()?;
                let close = self.expect(")")?;
                Ok(Parsed {
                    id: inner.id,
                    first: open,
                    last: close,
                })
            }
            (TokenKind::Punctuator, "[") => self.array(),
            (TokenKind::Punctuator, "{") => self.object(),
            (_, value) => Err(self.error(&format!("unexpected token `{value}`"))),
        }
    }

    fn array(&mut self) -> Result<Parsed> {
        let open = self.expect("[")?;
        let mut elements = Vec::new();
        while !self.at("]") {
            if self.at(",") {
                self.bump()?;
                elements.push(None);
                continue;
            }
            elements.push(Some(self.assignment()?.id));
            if !self.at("]") {
                self.expect(",")?;
            }
        }
        let close = self.bump()?;
        Ok(self.push(NodeKind::ArrayExpression { elements }, open, close))
    }

    fn object(&mut self) -> Result<Parsed> {
        let open = self.expect("{")?;
        let mut properties = Vec::new();
        while !self.at("}") {
            let key = match self.peek_kind() {
                Some(TokenKind::String | TokenKind::Numeric) => {
                    let token = self.bump()?;
                    let raw = self.stream.value(token).to_string();
                    self.push(NodeKind::Literal { raw }, token, token)
                }
                _ => self.property_name()?,
            };
            self.expect(":")?;
            let value = self.assignment()?;
            let property = self.push(
                NodeKind::Property {
                    key: key.id,
                    value: value.id,
                },
                key.first,
                value.last,
            );
            properties.push(property.id);
            if !self.at("}") {
                self.expect(",")?;
            }
        }
        let close = self.bump()?;
        Ok(self.push(NodeKind::ObjectExpression { properties }, open, close))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SyntaxKind;
    use crate::token::tokenize;

    fn parse_source(source: &str) -> (TokenStream, Ast) {
        let tokens = tokenize(source).unwrap();
        let ast = parse(&tokens).unwrap();
        (tokens, ast)
    }

    fn span(tokens: &TokenStream, ast: &Ast, id: NodeId) -> (String, String) {
        let node = ast.node(id);
        (
            tokens.value(node.start).to_string(),
            tokens.value(node.end).to_string(),
        )
    }

    fn first_statement(ast: &Ast) -> NodeId {
        ast.children(ast.root())[0]
    }

    #[test]
    fn test_function_declaration() {
        let (tokens, ast) = parse_source("function foo(a, b) { return a }");
        let func = first_statement(&ast);
        assert_eq!(ast.kind(func), SyntaxKind::FunctionDeclaration);
        let NodeKind::FunctionDeclaration { params, body, .. } = &ast.node(func).kind else {
            panic!("not a function declaration");
        };
        assert_eq!(params.len(), 2);
        assert_eq!(
            span(&tokens, &ast, *body),
            ("{".to_string(), "}".to_string())
        );
    }

    #[test]
    fn test_binary_precedence() {
        let (_, ast) = parse_source("a + b * c;");
        let statement = first_statement(&ast);
        let expression = ast.children(statement)[0];
        let NodeKind::BinaryExpression { operator, right, .. } = &ast.node(expression).kind else {
            panic!("not a binary expression");
        };
        assert_eq!(operator, "+");
        assert_eq!(ast.kind(*right), SyntaxKind::BinaryExpression);
    }

    #[test]
    fn test_parenthesized_span_excludes_parens() {
        let (tokens, ast) = parse_source("(a || b) && c;");
        let statement = first_statement(&ast);
        let logical = ast.children(statement)[0];
        assert_eq!(
            span(&tokens, &ast, logical),
            ("(".to_string(), "c".to_string())
        );
        let left = ast.children(logical)[0];
        assert_eq!(
            span(&tokens, &ast, left),
            ("a".to_string(), "b".to_string())
        );
    }

    #[test]
    fn test_declaration_includes_semicolon() {
        let (tokens, ast) = parse_source("var a = 1, b;\n");
        let declaration = first_statement(&ast);
        assert_eq!(
            span(&tokens, &ast, declaration),
            ("var".to_string(), ";".to_string())
        );
        assert_eq!(ast.children(declaration).len(), 2);
    }

    #[test]
    fn test_for_header_declaration_has_for_parent() {
        let (_, ast) = parse_source("for (var i = 0; i < n; i++) {}");
        let for_statement = first_statement(&ast);
        let NodeKind::ForStatement { init, test, update, .. } = &ast.node(for_statement).kind else {
            panic!("not a for statement");
        };
        let init = init.unwrap();
        assert!(test.is_some() && update.is_some());
        assert_eq!(ast.kind(init), SyntaxKind::VariableDeclaration);
        assert_eq!(ast.parent(init), Some(for_statement));
    }

    #[test]
    fn test_for_without_clauses() {
        let (_, ast) = parse_source("for (;;) x();");
        let for_statement = first_statement(&ast);
        let NodeKind::ForStatement { init, test, update, .. } = &ast.node(for_statement).kind else {
            panic!("not a for statement");
        };
        assert!(init.is_none() && test.is_none() && update.is_none());
    }

    #[test]
    fn test_else_if_chain() {
        let (_, ast) = parse_source("if (a) { x() } else if (b) { y() } else { z() }");
        let outer = first_statement(&ast);
        let NodeKind::IfStatement { alternate, .. } = &ast.node(outer).kind else {
            panic!("not an if statement");
        };
        let inner = alternate.unwrap();
        assert_eq!(ast.kind(inner), SyntaxKind::IfStatement);
        let NodeKind::IfStatement { alternate, .. } = &ast.node(inner).kind else {
            panic!("not an if statement");
        };
        assert_eq!(ast.kind(alternate.unwrap()), SyntaxKind::BlockStatement);
    }

    #[test]
    fn test_object_and_call() {
        let (_, ast) = parse_source("foo({a: 1, 'b': [2, 3]}, function () {});");
        let call = ast.children(first_statement(&ast))[0];
        let NodeKind::CallExpression { arguments, .. } = &ast.node(call).kind else {
            panic!("not a call expression");
        };
        assert_eq!(ast.kind(arguments[0]), SyntaxKind::ObjectExpression);
        assert_eq!(ast.kind(arguments[1]), SyntaxKind::FunctionExpression);
        assert_eq!(ast.children(arguments[0]).len(), 2);
    }

    #[test]
    fn test_missing_semicolon_on_same_line_fails() {
        let tokens = tokenize("a b").unwrap();
        let err = parse(&tokens).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FormatError>(),
            Some(FormatError::Syntax { line: 1, .. })
        ));
    }

    #[test]
    fn test_newline_terminates_statement() {
        let (_, ast) = parse_source("a = 1\nb = 2\n");
        assert_eq!(ast.children(ast.root()).len(), 2);
    }

    #[test]
    fn test_post_order_visits_children_first() {
        let (_, ast) = parse_source("x = a + b;");
        let order: Vec<SyntaxKind> = ast
            .post_order()
            .into_iter()
            .map(|id| ast.kind(id))
            .collect();
        assert_eq!(
            order,
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::Identifier,
                SyntaxKind::Identifier,
                SyntaxKind::BinaryExpression,
                SyntaxKind::AssignmentExpression,
                SyntaxKind::ExpressionStatement,
                SyntaxKind::Program,
            ]
        );
    }
}
