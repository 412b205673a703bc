//! Syntax tree for the JavaScript subset esfmt understands.
//!
//! - [`ast`]: Arena tree whose nodes anchor their first and last significant
//!   token in the [`TokenStream`](crate::token::TokenStream)
//! - [`parser`]: Recursive-descent parser building the tree
//! - [`levels`]: Nesting depth of every node, used by the indent rules

pub mod ast;
pub mod levels;
pub mod parser;

pub use ast::{Ast, Node, NodeId, NodeKind, SyntaxKind};
pub use levels::assign_indent_levels;
pub use parser::parse;
