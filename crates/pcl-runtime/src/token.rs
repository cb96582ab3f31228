//! Token types for lexical analysis

use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token produced by the lexer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The kind of token, with its decoded payload
    pub kind: TokenKind,
    /// Source location
    pub span: Span,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, TokenKind::Error(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.kind, self.span)
    }
}

/// Classification of token types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum TokenKind {
    /// Number literal (`42`, `-3.5`)
    Number(f64),
    /// String literal with escapes already decoded
    Str(String),
    /// Bare word, possibly ending in `?`
    Identifier(String),
    /// One of `+ - * / %`
    Symbol(Symbol),
    /// `{`
    OpenBlock,
    /// `}`
    CloseBlock,
    /// A run of spaces, tabs and newlines
    Whitespace,
    /// Malformed input, with a description of the problem
    Error(String),
}

impl TokenKind {
    /// Short name of the token kind
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Number(_) => "Number",
            TokenKind::Str(_) => "Str",
            TokenKind::Identifier(_) => "Identifier",
            TokenKind::Symbol(_) => "Symbol",
            TokenKind::OpenBlock => "OpenBlock",
            TokenKind::CloseBlock => "CloseBlock",
            TokenKind::Whitespace => "Whitespace",
            TokenKind::Error(_) => "Error",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "Number({})", n),
            TokenKind::Str(s) => write!(f, "Str({:?})", s),
            TokenKind::Identifier(name) => write!(f, "Identifier({})", name),
            TokenKind::Symbol(symbol) => write!(f, "Symbol({})", symbol.builtin_name()),
            TokenKind::Error(message) => write!(f, "Error({})", message),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// Arithmetic shorthand symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `/`
    Div,
    /// `*`
    Mul,
    /// `%`
    Mod,
}

impl Symbol {
    /// Symbol for a single source character, if it is one
    pub fn from_char(c: char) -> Option<Symbol> {
        match c {
            '+' => Some(Symbol::Add),
            '-' => Some(Symbol::Sub),
            '/' => Some(Symbol::Div),
            '*' => Some(Symbol::Mul),
            '%' => Some(Symbol::Mod),
            _ => None,
        }
    }

    /// Name of the builtin this symbol is sugar for
    pub fn builtin_name(&self) -> &'static str {
        match self {
            Symbol::Add => "add",
            Symbol::Sub => "sub",
            Symbol::Div => "div",
            Symbol::Mul => "mul",
            Symbol::Mod => "mod",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_names() {
        for (c, name) in [('+', "add"), ('-', "sub"), ('/', "div"), ('*', "mul"), ('%', "mod")] {
            assert_eq!(Symbol::from_char(c).map(|s| s.builtin_name()), Some(name));
        }
        assert_eq!(Symbol::from_char('^'), None);
    }

    #[test]
    fn test_display() {
        let token = Token::new(TokenKind::Identifier("dup".into()), Span::new(0, 3));
        assert_eq!(token.to_string(), "Identifier(dup) @ 0..3");
        assert_eq!(TokenKind::OpenBlock.to_string(), "OpenBlock");
    }
}
