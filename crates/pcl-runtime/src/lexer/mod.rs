//! Lexical analysis (tokenization)
//!
//! The lexer converts PCL source into a flat stream of tokens with accurate
//! span information. It never fails: malformed input becomes a
//! [`TokenKind::Error`] token that the parser reports.
//!
//! Whitespace is kept as a token so that the concatenated token spans always
//! reproduce the original source (used by the highlighter).

use crate::span::Span;
use crate::token::{Symbol, Token, TokenKind};

mod literals;

/// Characters that separate tokens
pub(crate) fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Characters allowed inside a builtin name
pub fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '?'
}

/// Tokenize `source` in one call
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

/// Lexer state for tokenizing source code
pub struct Lexer {
    /// Characters of source code
    pub(super) chars: Vec<char>,
    /// Current position in chars
    pub(super) current: usize,
    /// Start position of current token
    pub(super) start_pos: usize,
}

impl Lexer {
    /// Create a new lexer for the given source code
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            current: 0,
            start_pos: 0,
        }
    }

    /// Tokenize the whole source
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while !self.is_at_end() {
            tokens.push(self.next_token());
        }
        tracing::trace!(count = tokens.len(), "tokenized source");
        tokens
    }

    /// Scan the next token
    fn next_token(&mut self) -> Token {
        self.start_pos = self.current;
        let c = self.advance();

        match c {
            '\'' | '"' => self.string(c),
            c if c.is_ascii_digit() => self.number(),
            '-' if self.peek().is_some_and(|next| next.is_ascii_digit()) => self.number(),
            '{' => self.make_token(TokenKind::OpenBlock),
            '}' => self.make_token(TokenKind::CloseBlock),
            c if is_whitespace(c) => {
                while self.peek().is_some_and(is_whitespace) {
                    self.advance();
                }
                self.make_token(TokenKind::Whitespace)
            }
            c if is_identifier_char(c) => self.identifier(),
            c => match Symbol::from_char(c) {
                Some(symbol) => self.make_token(TokenKind::Symbol(symbol)),
                None => self.error_token(format!("Unknown token {}", c)),
            },
        }
    }

    // === Character navigation ===

    /// Advance to next character and return it
    pub(super) fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        c
    }

    /// Peek at current character without advancing
    pub(super) fn peek(&self) -> Option<char> {
        self.chars.get(self.current).copied()
    }

    /// Check if we've reached the end of source
    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    // === Token creation ===

    /// Create a token spanning from the token start to the current position
    pub(super) fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(self.start_pos, self.current))
    }

    /// Create an error token spanning the current token
    pub(super) fn error_token(&self, message: impl Into<String>) -> Token {
        self.make_token(TokenKind::Error(message.into()))
    }
}
