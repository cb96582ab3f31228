//! Parser (tokens to AST)
//!
//! Blocks are collected with an explicit stack of open accumulators instead
//! of recursion, so nesting depth is bounded only by memory.

use crate::ast::Node;
use crate::error::PclError;
use crate::lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};
use std::sync::Arc;

/// Nodes collected for one open block
struct OpenBlock {
    body: Vec<Node>,
    start: usize,
}

/// Parser state
pub struct Parser {
    tokens: Vec<Token>,
}

impl Parser {
    /// Create a new parser for the given tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Parse the token stream into a node sequence
    pub fn parse(self) -> Result<Vec<Node>, PclError> {
        let end = self.tokens.last().map(|token| token.span.end).unwrap_or(0);
        let mut blocks = vec![OpenBlock {
            body: Vec::new(),
            start: 0,
        }];

        for token in self.tokens {
            let node = match token.kind {
                TokenKind::Number(value) => Node::Number {
                    value,
                    span: token.span,
                },
                TokenKind::Str(value) => Node::Str {
                    value,
                    span: token.span,
                },
                TokenKind::Identifier(name) => Node::Identifier {
                    name,
                    span: token.span,
                },
                TokenKind::Symbol(symbol) => Node::identifier(symbol.builtin_name(), token.span),
                TokenKind::OpenBlock => {
                    blocks.push(OpenBlock {
                        body: Vec::new(),
                        start: token.span.start,
                    });
                    continue;
                }
                TokenKind::CloseBlock => match blocks.pop() {
                    Some(block) if !blocks.is_empty() => Node::Function {
                        body: Arc::from(block.body),
                        span: Span::new(block.start, token.span.end),
                    },
                    _ => return Err(PclError::parse("Unmatched closing bracket", token.span)),
                },
                TokenKind::Whitespace => continue,
                TokenKind::Error(message) => return Err(PclError::parse(message, token.span)),
            };

            if let Some(innermost) = blocks.last_mut() {
                innermost.body.push(node);
            }
        }

        match blocks.pop() {
            Some(root) if blocks.is_empty() => Ok(root.body),
            Some(unclosed) => Err(PclError::parse(
                "Unclosed bracket",
                Span::new(unclosed.start, end),
            )),
            None => Ok(Vec::new()),
        }
    }
}

/// Parse a token stream in one call
pub fn parse(tokens: Vec<Token>) -> Result<Vec<Node>, PclError> {
    Parser::new(tokens).parse()
}

/// Tokenize and parse source text
pub fn parse_source(source: &str) -> Result<Vec<Node>, PclError> {
    parse(lexer::tokenize(source))
}
