/// Syntax tree over a token stream
///
/// Nodes live in an arena indexed by [`NodeId`]. Each node anchors its first
/// and last significant token; parent links are kept in a side table built
/// once the tree is complete.
use crate::token::TokenId;

/// Handle to a node of an [`Ast`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Tag of a node, without its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Program,
    FunctionDeclaration,
    FunctionExpression,
    BlockStatement,
    ExpressionStatement,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    EmptyStatement,
    VariableDeclaration,
    VariableDeclarator,
    IfStatement,
    WhileStatement,
    ForStatement,
    SequenceExpression,
    AssignmentExpression,
    ConditionalExpression,
    LogicalExpression,
    BinaryExpression,
    UnaryExpression,
    UpdateExpression,
    CallExpression,
    NewExpression,
    MemberExpression,
    ObjectExpression,
    Property,
    ArrayExpression,
    Identifier,
    Literal,
    ThisExpression,
}

/// Node payload, one variant per syntax kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Program {
        body: Vec<NodeId>,
    },
    FunctionDeclaration {
        id: NodeId,
        params: Vec<NodeId>,
        body: NodeId,
    },
    FunctionExpression {
        id: Option<NodeId>,
        params: Vec<NodeId>,
        body: NodeId,
    },
    BlockStatement {
        body: Vec<NodeId>,
    },
    ExpressionStatement {
        expression: NodeId,
    },
    ReturnStatement {
        argument: Option<NodeId>,
    },
    BreakStatement {
        label: Option<NodeId>,
    },
    ContinueStatement {
        label: Option<NodeId>,
    },
    EmptyStatement,
    VariableDeclaration {
        /// `var`, `let` or `const`
        keyword: String,
        declarations: Vec<NodeId>,
    },
    VariableDeclarator {
        id: NodeId,
        init: Option<NodeId>,
    },
    IfStatement {
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
    },
    WhileStatement {
        test: NodeId,
        body: NodeId,
    },
    ForStatement {
        init: Option<NodeId>,
        test: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    },
    SequenceExpression {
        expressions: Vec<NodeId>,
    },
    AssignmentExpression {
        operator: String,
        left: NodeId,
        right: NodeId,
    },
    ConditionalExpression {
        test: NodeId,
        consequent: NodeId,
        alternate: NodeId,
    },
    LogicalExpression {
        operator: String,
        left: NodeId,
        right: NodeId,
    },
    BinaryExpression {
        operator: String,
        left: NodeId,
        right: NodeId,
    },
    UnaryExpression {
        operator: String,
        argument: NodeId,
    },
    UpdateExpression {
        operator: String,
        prefix: bool,
        argument: NodeId,
    },
    CallExpression {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    NewExpression {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    MemberExpression {
        object: NodeId,
        property: NodeId,
        computed: bool,
    },
    ObjectExpression {
        properties: Vec<NodeId>,
    },
    Property {
        key: NodeId,
        value: NodeId,
    },
    ArrayExpression {
        /// `None` marks a hole (`[a, , b]`)
        elements: Vec<Option<NodeId>>,
    },
    Identifier {
        name: String,
    },
    Literal {
        raw: String,
    },
    ThisExpression,
}

impl NodeKind {
    #[must_use]
    pub fn syntax_kind(&self) -> SyntaxKind {
        match self {
            NodeKind::Program { .. } => SyntaxKind::Program,
            NodeKind::FunctionDeclaration { .. } => SyntaxKind::FunctionDeclaration,
            NodeKind::FunctionExpression { .. } => SyntaxKind::FunctionExpression,
            NodeKind::BlockStatement { .. } => SyntaxKind::BlockStatement,
            NodeKind::ExpressionStatement { .. } => SyntaxKind::ExpressionStatement,
            NodeKind::ReturnStatement { .. } => SyntaxKind::ReturnStatement,
            NodeKind::BreakStatement { .. } => SyntaxKind::BreakStatement,
            NodeKind::ContinueStatement { .. } => SyntaxKind::ContinueStatement,
            NodeKind::EmptyStatement => SyntaxKind::EmptyStatement,
            NodeKind::VariableDeclaration { .. } => SyntaxKind::VariableDeclaration,
            NodeKind::VariableDeclarator { .. } => SyntaxKind::VariableDeclarator,
            NodeKind::IfStatement { .. } => SyntaxKind::IfStatement,
            NodeKind::WhileStatement { .. } => SyntaxKind::WhileStatement,
            NodeKind::ForStatement { .. } => SyntaxKind::ForStatement,
            NodeKind::SequenceExpression { .. } => SyntaxKind::SequenceExpression,
            NodeKind::AssignmentExpression { .. } => SyntaxKind::AssignmentExpression,
            NodeKind::ConditionalExpression { .. } => SyntaxKind::ConditionalExpression,
            NodeKind::LogicalExpression { .. } => SyntaxKind::LogicalExpression,
            NodeKind::BinaryExpression { .. } => SyntaxKind::BinaryExpression,
            NodeKind::UnaryExpression { .. } => SyntaxKind::UnaryExpression,
            NodeKind::UpdateExpression { .. } => SyntaxKind::UpdateExpression,
            NodeKind::CallExpression { .. } => SyntaxKind::CallExpression,
            NodeKind::NewExpression { .. } => SyntaxKind::NewExpression,
            NodeKind::MemberExpression { .. } => SyntaxKind::MemberExpression,
            NodeKind::ObjectExpression { .. } => SyntaxKind::ObjectExpression,
            NodeKind::Property { .. } => SyntaxKind::Property,
            NodeKind::ArrayExpression { .. } => SyntaxKind::ArrayExpression,
            NodeKind::Identifier { .. } => SyntaxKind::Identifier,
            NodeKind::Literal { .. } => SyntaxKind::Literal,
            NodeKind::ThisExpression => SyntaxKind::ThisExpression,
        }
    }

    /// Direct children in source order
    #[must_use]
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            NodeKind::Program { body } | NodeKind::BlockStatement { body } => body.clone(),
            NodeKind::FunctionDeclaration { id, params, body } => {
                let mut children = vec![*id];
                children.extend(params);
                children.push(*body);
                children
            }
            NodeKind::FunctionExpression { id, params, body } => {
                let mut children: Vec<NodeId> = id.iter().copied().collect();
                children.extend(params);
                children.push(*body);
                children
            }
            NodeKind::ExpressionStatement { expression } => vec![*expression],
            NodeKind::ReturnStatement { argument: child }
            | NodeKind::BreakStatement { label: child }
            | NodeKind::ContinueStatement { label: child } => child.iter().copied().collect(),
            NodeKind::VariableDeclaration { declarations, .. } => declarations.clone(),
            NodeKind::VariableDeclarator { id, init } => {
                std::iter::once(*id).chain(init.iter().copied()).collect()
            }
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            } => [Some(*test), Some(*consequent), *alternate]
                .into_iter()
                .flatten()
                .collect(),
            NodeKind::WhileStatement { test, body } => vec![*test, *body],
            NodeKind::ForStatement {
                init,
                test,
                update,
                body,
            } => [*init, *test, *update, Some(*body)]
                .into_iter()
                .flatten()
                .collect(),
            NodeKind::SequenceExpression { expressions } => expressions.clone(),
            NodeKind::AssignmentExpression { left, right, .. }
            | NodeKind::LogicalExpression { left, right, .. }
            | NodeKind::BinaryExpression { left, right, .. } => vec![*left, *right],
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => vec![*test, *consequent, *alternate],
            NodeKind::UnaryExpression { argument, .. }
            | NodeKind::UpdateExpression { argument, .. } => vec![*argument],
            NodeKind::CallExpression { callee, arguments }
            | NodeKind::NewExpression { callee, arguments } => {
                std::iter::once(*callee).chain(arguments.iter().copied()).collect()
            }
            NodeKind::MemberExpression {
                object, property, ..
            } => vec![*object, *property],
            NodeKind::ObjectExpression { properties } => properties.clone(),
            NodeKind::Property { key, value } => vec![*key, *value],
            NodeKind::ArrayExpression { elements } => elements.iter().flatten().copied().collect(),
            NodeKind::EmptyStatement
            | NodeKind::Identifier { .. }
            | NodeKind::Literal { .. }
            | NodeKind::ThisExpression => Vec::new(),
        }
    }
}

/// A syntax node anchored into the token stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    /// First significant token of the node
    pub start: TokenId,
    /// Last significant token of the node
    pub end: TokenId,
    pub indent_level: usize,
    /// Indentation of the closing brace of an object literal
    pub closing_indent_level: usize,
}

impl Node {
    #[must_use]
    pub fn new(kind: NodeKind, start: TokenId, end: TokenId) -> Self {
        Self {
            kind,
            start,
            end,
            indent_level: 0,
            closing_indent_level: 0,
        }
    }

    #[must_use]
    pub fn syntax_kind(&self) -> SyntaxKind {
        self.kind.syntax_kind()
    }
}

/// Arena of nodes plus the child-to-parent lookup
#[derive(Debug, Clone)]
pub struct Ast {
    nodes: Vec<Node>,
    parents: Vec<Option<NodeId>>,
    root: NodeId,
}

impl Ast {
    /// Assemble a tree from its nodes and compute parent links
    #[must_use]
    pub fn new(nodes: Vec<Node>, root: NodeId) -> Self {
        let mut parents = vec![None; nodes.len()];
        for (index, node) in nodes.iter().enumerate() {
            let parent = NodeId(u32::try_from(index).unwrap_or(u32::MAX));
            for child in node.kind.children() {
                parents[child.index()] = Some(parent);
            }
        }
        Self {
            nodes,
            parents,
            root,
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[must_use]
    pub fn kind(&self, id: NodeId) -> SyntaxKind {
        self.node(id).syntax_kind()
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id.index()]
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).kind.children()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes with children before their parents, siblings in source order
    #[must_use]
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(self.root, false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
                continue;
            }
            stack.push((id, true));
            for child in self.children(id).into_iter().rev() {
                stack.push((child, false));
            }
        }
        order
    }

    /// Nodes with parents before their children, siblings in source order
    #[must_use]
    pub fn pre_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).into_iter().rev());
        }
        order
    }
}

/// Allocator used by the parser while building a tree
#[derive(Debug, Default)]
pub(crate) struct AstBuilder {
    nodes: Vec<Node>,
}

impl AstBuilder {
    pub(crate) fn push(&mut self, kind: NodeKind, start: TokenId, end: TokenId) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(Node::new(kind, start, end));
        id
    }

    /// Move the last anchor of an already built node
    pub(crate) fn set_end(&mut self, id: NodeId, end: TokenId) {
        self.nodes[id.index()].end = end;
    }

    pub(crate) fn finish(self, root: NodeId) -> Ast {
        Ast::new(self.nodes, root)
    }
}
