//! Color-aware report formatter
//!
//! Formats reports with the traceback, highlighted source snippets, caret
//! indicators, and optional terminal colors. Respects the NO_COLOR
//! environment variable and auto-detects terminal capabilities.

use super::highlight::{write_highlighted, write_value};
use super::{extract_snippet, offset_to_line_col, Report, Traceback};
use crate::span::Span;
use std::io;
use termcolor::{Buffer, Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Color mode for report output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Always use colors
    Always,
    /// Never use colors
    Never,
    /// Auto-detect terminal capabilities
    Auto,
}

impl ColorMode {
    /// Resolve to a termcolor ColorChoice
    pub fn to_color_choice(self) -> ColorChoice {
        // Always respect NO_COLOR (https://no-color.org)
        if std::env::var_os("NO_COLOR").is_some() {
            return ColorChoice::Never;
        }
        match self {
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto => ColorChoice::Auto,
        }
    }
}

/// Report formatter with color support
pub struct DiagnosticFormatter {
    color_mode: ColorMode,
}

impl DiagnosticFormatter {
    /// Create a new formatter with the given color mode
    pub fn new(color_mode: ColorMode) -> Self {
        Self { color_mode }
    }

    /// Create a formatter that auto-detects color support
    pub fn auto() -> Self {
        Self::new(ColorMode::Auto)
    }

    /// Create a plain (no color) formatter
    pub fn plain() -> Self {
        Self::new(ColorMode::Never)
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    /// Write a report to stderr
    pub fn emit(&self, report: &Report, source: &str) -> io::Result<()> {
        let mut stream = StandardStream::stderr(self.color_mode.to_color_choice());
        self.write_report(&mut stream, report, source)
    }

    /// Format a report to a string (without colors)
    pub fn format_to_string(&self, report: &Report, source: &str) -> String {
        let mut buffer = Buffer::no_color();
        if self.write_report(&mut buffer, report, source).is_err() {
            return report.terminal_message();
        }
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }

    /// Format a report to a buffer, with ANSI colors unless the mode is `Never`
    pub fn format_to_buffer(&self, report: &Report, source: &str) -> Vec<u8> {
        let mut buffer = match self.color_mode.to_color_choice() {
            ColorChoice::Never => Buffer::no_color(),
            _ => Buffer::ansi(),
        };
        if self.write_report(&mut buffer, report, source).is_err() {
            return report.terminal_message().into_bytes();
        }
        buffer.into_inner()
    }

    /// Format a report to a WriteColor sink
    pub fn write_report(
        &self,
        w: &mut impl WriteColor,
        report: &Report,
        source: &str,
    ) -> io::Result<()> {
        if let Some(traceback) = &report.traceback {
            self.write_traceback(w, traceback, source)?;
        }

        w.set_color(ColorSpec::new().set_bold(true))?;
        write!(w, "At position {}:", report.position)?;
        w.reset()?;
        writeln!(w)?;
        self.write_snippet(w, source, report.span, 2)?;

        w.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(w, "{}", report.terminal_message())?;
        w.reset()?;
        writeln!(w)?;
        Ok(())
    }

    fn write_traceback(
        &self,
        w: &mut impl WriteColor,
        traceback: &Traceback,
        source: &str,
    ) -> io::Result<()> {
        w.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        write!(w, "Traceback:")?;
        w.reset()?;
        writeln!(w)?;

        for frame in &traceback.frames {
            w.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
            write!(w, "  [{}] stack:", frame.depth)?;
            w.reset()?;
            writeln!(w)?;

            if frame.stack.is_empty() {
                w.set_color(ColorSpec::new().set_dimmed(true))?;
                write!(w, "    empty stack")?;
                w.reset()?;
                writeln!(w)?;
            }
            for value in &frame.stack {
                write!(w, "    ")?;
                write_value(w, value)?;
                writeln!(w)?;
            }

            if let Some(span) = frame.called_from {
                writeln!(w, "    Called from:")?;
                self.write_snippet(w, source, span, 6)?;
            }
        }
        Ok(())
    }

    /// Source line containing `span.start`, highlighted, with carets under
    /// the span (clipped to that line)
    fn write_snippet(
        &self,
        w: &mut impl WriteColor,
        source: &str,
        span: Span,
        indent: usize,
    ) -> io::Result<()> {
        let (line, column) = offset_to_line_col(source, span.start);
        let Some(snippet) = extract_snippet(source, line) else {
            return Ok(());
        };
        let line_num = line.to_string();
        let pad = " ".repeat(indent);

        w.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(w, "{}{} | ", pad, line_num)?;
        w.reset()?;
        write_highlighted(w, snippet)?;
        writeln!(w)?;

        let col = column - 1;
        let remaining = snippet.chars().count().saturating_sub(col);
        let caret_len = span.len().min(remaining).max(1);

        w.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(w, "{}{} | ", pad, " ".repeat(line_num.len()))?;
        w.reset()?;
        write!(w, "{}", " ".repeat(col))?;
        w.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(w, "{}", "^".repeat(caret_len))?;
        w.reset()?;
        writeln!(w)?;
        Ok(())
    }
}

impl Default for DiagnosticFormatter {
    fn default() -> Self {
        Self::auto()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PclError;
    use crate::interpreter::{Exception, Frame, FrameId};
    use crate::value::StackValue;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn root_exception(stack: Vec<StackValue>, error: PclError) -> Exception {
        Exception::new(error, vec![Frame::root(Arc::from(Vec::new()), stack)])
    }

    #[test]
    fn test_plain_layout() {
        let source = "1 'a' foo";
        let exception = root_exception(
            vec![StackValue::Number(1.0), StackValue::string("a")],
            PclError::BuiltinUnknown {
                name: "foo".into(),
                span: Span::new(6, 9),
                frame: FrameId::ROOT,
            },
        );
        let report = Report::new(&exception, source);
        let output = DiagnosticFormatter::plain().format_to_string(&report, source);
        let expected = "\
Traceback:
  [0] stack:
    1
    \"a\"
At position 7:
  1 | 1 'a' foo
    |       ^^^
BuiltinUnknown: Cannot call unknown builtin foo!
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_empty_stack_and_multiline_source() {
        let source = "1\n  bar";
        let exception = root_exception(
            vec![],
            PclError::BuiltinUnknown {
                name: "bar".into(),
                span: Span::new(4, 7),
                frame: FrameId::ROOT,
            },
        );
        let output = Report::new(&exception, source).to_human_string(source);
        assert!(output.contains("    empty stack\n"));
        assert!(output.contains("  2 |   bar\n"));
        assert!(output.contains("    |   ^^^\n"));
    }

    #[test]
    fn test_parse_error_without_traceback() {
        let source = "1 }";
        let report = Report::from_error(&PclError::parse("Unmatched closing bracket", Span::new(2, 3)), source);
        let output = report.to_human_string(source);
        assert!(!output.contains("Traceback:"));
        assert!(output.starts_with("At position 3:"));
        assert!(output.ends_with("ParseError: Unmatched closing bracket\n"));
    }

    #[test]
    fn test_buffer_matches_string_without_color() {
        let source = "1 }";
        let report = Report::from_error(
            &PclError::parse("Unmatched closing bracket", Span::new(2, 3)),
            source,
        );
        let formatter = DiagnosticFormatter::plain();
        let bytes = formatter.format_to_buffer(&report, source);
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            formatter.format_to_string(&report, source)
        );
    }

    #[test]
    fn test_color_mode_no_color() {
        let no_color = std::env::var_os("NO_COLOR").is_some();
        let expected_always = if no_color {
            ColorChoice::Never
        } else {
            ColorChoice::Always
        };
        assert_eq!(ColorMode::Always.to_color_choice(), expected_always);
        assert_eq!(ColorMode::Never.to_color_choice(), ColorChoice::Never);
    }
}
