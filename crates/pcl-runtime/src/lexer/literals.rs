//! Literal scanning for the lexer

use crate::lexer::{is_identifier_char, Lexer};
use crate::token::{Token, TokenKind};

impl Lexer {
    /// Scan a string literal opened by `quote` (already consumed).
    ///
    /// `\` copies the following character verbatim, including the quote.
    pub(super) fn string(&mut self, quote: char) -> Token {
        let mut value = String::new();

        loop {
            if self.is_at_end() {
                return self.error_token("Unterminated string");
            }
            match self.advance() {
                c if c == quote => break,
                '\\' => {
                    if self.is_at_end() {
                        return self.error_token("Unterminated string");
                    }
                    value.push(self.advance());
                }
                c => value.push(c),
            }
        }

        self.make_token(TokenKind::Str(value))
    }

    /// Scan a number literal: an optional leading `-` (already consumed,
    /// as is the first character), then digits and `.` only.
    pub(super) fn number(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || c == '.')
        {
            self.advance();
        }

        let lexeme: String = self.chars[self.start_pos..self.current].iter().collect();
        match lexeme.parse::<f64>() {
            Ok(value) => self.make_token(TokenKind::Number(value)),
            Err(err) => self.error_token(format!("Malformed number: {}", err)),
        }
    }

    /// Scan a builtin name (first character already consumed)
    pub(super) fn identifier(&mut self) -> Token {
        while self.peek().is_some_and(is_identifier_char) {
            self.advance();
        }

        let name: String = self.chars[self.start_pos..self.current].iter().collect();
        self.make_token(TokenKind::Identifier(name))
    }
}
