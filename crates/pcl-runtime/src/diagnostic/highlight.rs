//! Syntax highlighting for source text and stack values
//!
//! Highlighting re-lexes the text and colors each token; the lexer covers
//! every character, so writing the tokens back in order reproduces the input.

use crate::lexer::tokenize;
use crate::token::TokenKind;
use crate::value::StackValue;
use std::io;
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

/// Color for one token
pub fn token_style(kind: &TokenKind) -> ColorSpec {
    let mut spec = ColorSpec::new();
    match kind {
        TokenKind::Number(_) => {
            spec.set_fg(Some(Color::Blue));
        }
        TokenKind::Str(_) => {
            spec.set_fg(Some(Color::Green));
        }
        TokenKind::Identifier(name) => {
            spec.set_fg(Some(Color::Cyan))
                .set_intense(true)
                .set_italic(name.ends_with('?'));
        }
        TokenKind::Symbol(_) => {
            spec.set_fg(Some(Color::Cyan)).set_intense(true);
        }
        TokenKind::OpenBlock | TokenKind::CloseBlock => {
            spec.set_fg(Some(Color::Yellow)).set_bold(true);
        }
        TokenKind::Error(_) => {
            spec.set_fg(Some(Color::Red)).set_intense(true);
        }
        TokenKind::Whitespace => {}
    }
    spec
}

/// Write `source` with each token in its color
pub fn write_highlighted(w: &mut impl WriteColor, source: &str) -> io::Result<()> {
    let chars: Vec<char> = source.chars().collect();
    for token in tokenize(source) {
        let end = token.span.end.min(chars.len());
        let start = token.span.start.min(end);
        let text: String = chars[start..end].iter().collect();
        w.set_color(&token_style(&token.kind))?;
        write!(w, "{}", text)?;
    }
    w.reset()
}

/// Write a stack value in literal form, colored by type
pub fn write_value(w: &mut impl WriteColor, value: &StackValue) -> io::Result<()> {
    let mut spec = ColorSpec::new();
    match value {
        StackValue::Number(_) => spec.set_fg(Some(Color::Blue)),
        StackValue::Str(_) => spec.set_fg(Some(Color::Green)),
        StackValue::Function(_) => spec.set_fg(Some(Color::Yellow)).set_bold(true),
    };
    w.set_color(&spec)?;
    write!(w, "{}", value.to_literal_string())?;
    w.reset()
}

/// `source` with ANSI color escapes, for line editors
pub fn highlight_ansi(source: &str) -> String {
    let mut buffer = Buffer::ansi();
    if write_highlighted(&mut buffer, source).is_err() {
        return source.to_string();
    }
    String::from_utf8(buffer.into_inner()).unwrap_or_else(|_| source.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_highlight_reproduces_source() {
        let source = "1 'two' { dup? } -3 + ~";
        let mut buffer = Buffer::no_color();
        write_highlighted(&mut buffer, source).unwrap();
        assert_eq!(String::from_utf8(buffer.into_inner()).unwrap(), source);
    }

    #[test]
    fn test_ansi_highlight_colors_tokens() {
        let highlighted = highlight_ansi("42 add");
        assert!(highlighted.contains("\x1b["));
        assert!(highlighted.contains("42"));
        assert!(highlighted.contains("add"));
    }

    #[test]
    fn test_conditional_identifier_italic() {
        let spec = token_style(&TokenKind::Identifier("dup?".into()));
        assert!(spec.italic());
        let spec = token_style(&TokenKind::Identifier("dup".into()));
        assert!(!spec.italic());
    }
}
