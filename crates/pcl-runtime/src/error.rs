//! Error types
//!
//! [`PclError`] is the structured exception raised while parsing or running
//! a program. Every runtime variant records the frame it was raised in, so
//! diagnostics can rebuild the call chain from the frame arena.
//!
//! [`BuiltinFailure`] is what builtin implementations return; the evaluator
//! turns it into a `PclError` at the call site.

use crate::interpreter::FrameId;
use crate::span::Span;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Shared handle to the original cause of an internal builtin fault
pub type FaultCause = Arc<dyn StdError + Send + Sync + 'static>;

/// Error category, used for display and for matching in tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Parse,
    BuiltinUnknown,
    BuiltinArity,
    BuiltinNoOverload,
    BuiltinRuntime,
    InternalBuiltinFault,
    RecursionLimit,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Parse => "ParseError",
            ErrorKind::BuiltinUnknown => "BuiltinUnknown",
            ErrorKind::BuiltinArity => "BuiltinArity",
            ErrorKind::BuiltinNoOverload => "BuiltinNoOverload",
            ErrorKind::BuiltinRuntime => "BuiltinRuntimeError",
            ErrorKind::InternalBuiltinFault => "InternalBuiltinFault",
            ErrorKind::RecursionLimit => "RecursionLimit",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured exception with source span information
#[derive(Debug, Error, Clone)]
pub enum PclError {
    /// Lexing or parsing failed
    #[error("{message}")]
    Parse { message: String, span: Span },
    /// Identifier names no registered builtin
    #[error("Cannot call unknown builtin {name}!")]
    BuiltinUnknown {
        name: String,
        span: Span,
        frame: FrameId,
    },
    /// Not enough values on the stack for the call
    #[error("{message}")]
    BuiltinArity {
        message: String,
        span: Span,
        frame: FrameId,
    },
    /// No overload (or more than one) accepts the popped argument types
    #[error("{message}")]
    BuiltinNoOverload {
        message: String,
        span: Span,
        frame: FrameId,
    },
    /// The builtin reported a domain failure
    #[error("{message}")]
    BuiltinRuntime {
        message: String,
        span: Span,
        frame: FrameId,
    },
    /// The builtin failed for a reason unrelated to the program
    #[error("An internal exception occurred in builtin {name}!")]
    InternalBuiltinFault {
        name: String,
        span: Span,
        frame: FrameId,
        #[source]
        cause: FaultCause,
    },
    /// Call nesting exceeded the interpreter's depth limit
    #[error("Maximum call depth of {limit} exceeded")]
    RecursionLimit {
        limit: usize,
        span: Span,
        frame: FrameId,
    },
}

impl PclError {
    pub fn parse(message: impl Into<String>, span: Span) -> Self {
        PclError::Parse {
            message: message.into(),
            span,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PclError::Parse { .. } => ErrorKind::Parse,
            PclError::BuiltinUnknown { .. } => ErrorKind::BuiltinUnknown,
            PclError::BuiltinArity { .. } => ErrorKind::BuiltinArity,
            PclError::BuiltinNoOverload { .. } => ErrorKind::BuiltinNoOverload,
            PclError::BuiltinRuntime { .. } => ErrorKind::BuiltinRuntime,
            PclError::InternalBuiltinFault { .. } => ErrorKind::InternalBuiltinFault,
            PclError::RecursionLimit { .. } => ErrorKind::RecursionLimit,
        }
    }

    /// Get the source span for this error
    pub fn span(&self) -> Span {
        match self {
            PclError::Parse { span, .. }
            | PclError::BuiltinUnknown { span, .. }
            | PclError::BuiltinArity { span, .. }
            | PclError::BuiltinNoOverload { span, .. }
            | PclError::BuiltinRuntime { span, .. }
            | PclError::InternalBuiltinFault { span, .. }
            | PclError::RecursionLimit { span, .. } => *span,
        }
    }

    /// Frame the error was raised in; `None` for parse errors
    pub fn frame(&self) -> Option<FrameId> {
        match self {
            PclError::Parse { .. } => None,
            PclError::BuiltinUnknown { frame, .. }
            | PclError::BuiltinArity { frame, .. }
            | PclError::BuiltinNoOverload { frame, .. }
            | PclError::BuiltinRuntime { frame, .. }
            | PclError::InternalBuiltinFault { frame, .. }
            | PclError::RecursionLimit { frame, .. } => Some(*frame),
        }
    }

    /// Full cause chain of an internal fault, for debugging output
    pub fn fault_detail(&self) -> Option<String> {
        let PclError::InternalBuiltinFault { cause, .. } = self else {
            return None;
        };
        let mut detail = format!("{}: {}\nCaused by: {:?}", self.kind(), self, cause);
        let mut source = cause.source();
        while let Some(err) = source {
            detail.push_str(&format!("\nCaused by: {:?}", err));
            source = err.source();
        }
        Some(detail)
    }
}

/// Failure returned by a builtin implementation
#[derive(Debug, Error)]
pub enum BuiltinFailure {
    /// Domain-level failure, reported to the user as a runtime error
    #[error("{0}")]
    Runtime(String),
    /// Structured error from a nested call, passed through unchanged
    #[error(transparent)]
    Propagated(#[from] PclError),
    /// Unexpected failure, kept with its cause for debugging
    #[error("{0}")]
    Fault(Box<dyn StdError + Send + Sync + 'static>),
}

impl BuiltinFailure {
    pub fn runtime(message: impl Into<String>) -> Self {
        BuiltinFailure::Runtime(message.into())
    }

    pub fn fault(cause: impl Into<Box<dyn StdError + Send + Sync + 'static>>) -> Self {
        BuiltinFailure::Fault(cause.into())
    }
}

impl From<std::io::Error> for BuiltinFailure {
    fn from(err: std::io::Error) -> Self {
        BuiltinFailure::Fault(Box::new(err))
    }
}

/// Result type returned by builtin implementations
pub type BuiltinResult = Result<Vec<crate::value::StackValue>, BuiltinFailure>;
