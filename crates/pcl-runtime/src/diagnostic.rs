//! Error reports
//!
//! A [`Report`] is the presentation form of an [`Exception`]: the error
//! category and message, where in the source it happened, and the traceback
//! of frame stacks. It renders as plain text, colored text (see
//! [`formatter`]) or JSON.

pub mod formatter;
pub mod highlight;

use crate::error::PclError;
use crate::interpreter::Exception;
use crate::span::Span;
use crate::value::StackValue;
use serde::Serialize;

/// One frame of a traceback
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TracebackFrame {
    /// Nesting depth, 0 for the program's top level
    pub depth: usize,
    /// Stack contents when the error reached the top, bottom first
    pub stack: Vec<StackValue>,
    /// Span of the identifier that created this frame
    pub called_from: Option<Span>,
}

/// Frames from the outermost to the one the error was raised in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Traceback {
    pub frames: Vec<TracebackFrame>,
}

impl Traceback {
    /// Build a traceback from an exception, `None` for parse errors
    pub fn from_exception(exception: &Exception) -> Option<Self> {
        exception.error().frame()?;
        let frames = exception
            .call_chain()
            .into_iter()
            .enumerate()
            .map(|(depth, frame)| TracebackFrame {
                depth,
                stack: frame.stack.clone(),
                called_from: frame.parent.as_ref().map(|parent| parent.invoked_at.span()),
            })
            .collect();
        Some(Self { frames })
    }
}

/// Everything needed to show an exception to a user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Error category name, e.g. `BuiltinRuntimeError`
    pub category: String,
    pub message: String,
    pub span: Span,
    /// 1-based character position of the span start
    pub position: usize,
    /// 1-based line of the span start
    pub line: usize,
    /// 1-based column of the span start
    pub column: usize,
    pub traceback: Option<Traceback>,
    /// Full cause chain, only for internal builtin faults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault_detail: Option<String>,
}

impl Report {
    pub fn new(exception: &Exception, source: &str) -> Self {
        let error = exception.error();
        let span = error.span();
        let (line, column) = offset_to_line_col(source, span.start);
        Self {
            category: error.kind().to_string(),
            message: error.to_string(),
            span,
            position: span.start + 1,
            line,
            column,
            traceback: Traceback::from_exception(exception),
            fault_detail: error.fault_detail(),
        }
    }

    /// Report for an error that has no frames attached
    pub fn from_error(error: &PclError, source: &str) -> Self {
        Self::new(&Exception::from(error.clone()), source)
    }

    /// Last line of the report: the fault chain for internal faults,
    /// otherwise `Category: message`
    pub fn terminal_message(&self) -> String {
        match &self.fault_detail {
            Some(detail) => detail.clone(),
            None => format!("{}: {}", self.category, self.message),
        }
    }

    /// Render without colors
    pub fn to_human_string(&self, source: &str) -> String {
        formatter::DiagnosticFormatter::plain().format_to_string(self, source)
    }

    /// Format as JSON string
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Format as compact JSON string
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Line and column (both 1-based) of a character offset
pub fn offset_to_line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for ch in source.chars().take(offset) {
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// Text of a 1-based line
pub fn extract_snippet(source: &str, line: usize) -> Option<&str> {
    source.split('\n').nth(line.saturating_sub(1))
}
