//! Abstract syntax tree
//!
//! A program is a flat sequence of [`Node`]s; nesting only happens inside
//! `{ ... }` function literals. Function bodies are shared (`Arc<[Node]>`) so
//! that pushing a function value or entering a call never copies the tree.

use crate::span::Span;
use serde::Serialize;
use std::sync::Arc;

/// A body of nodes, shared between the AST, stack values and frames
pub type Body = Arc<[Node]>;

/// A parsed syntax node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node")]
pub enum Node {
    /// Number literal
    Number { value: f64, span: Span },
    /// String literal
    Str { value: String, span: Span },
    /// Builtin invocation (arithmetic symbols are desugared to these)
    Identifier { name: String, span: Span },
    /// `{ ... }` block, kept unevaluated
    Function { body: Body, span: Span },
}

impl Node {
    /// Source span of this node
    pub fn span(&self) -> Span {
        match self {
            Node::Number { span, .. }
            | Node::Str { span, .. }
            | Node::Identifier { span, .. }
            | Node::Function { span, .. } => *span,
        }
    }

    pub fn identifier(name: impl Into<String>, span: Span) -> Self {
        Node::Identifier {
            name: name.into(),
            span,
        }
    }

    /// Name of the builtin this node invokes, if it is an identifier
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Node::Identifier { name, .. } => Some(name),
            _ => None,
        }
    }
}
