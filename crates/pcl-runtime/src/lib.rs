//! PCL Runtime - Core language implementation
//!
//! This library provides the complete PCL runtime including:
//! - Lexical analysis and parsing
//! - Stack-based evaluation with nested call frames
//! - The builtin registry and standard builtins
//! - Error reports with tracebacks and syntax highlighting

/// PCL runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Public API modules
pub mod ast;
pub mod diagnostic;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod runtime;
pub mod span;
pub mod stdlib;
pub mod token;
pub mod value;

// Re-export commonly used types
pub use ast::{Body, Node};
pub use diagnostic::formatter::{ColorMode, DiagnosticFormatter};
pub use diagnostic::{Report, Traceback, TracebackFrame};
pub use environment::{BufferedEnvironment, Environment, StdEnvironment};
pub use error::{BuiltinFailure, BuiltinResult, ErrorKind, PclError};
pub use interpreter::{CallContext, Exception, Frame, FrameId, Interpreter, DEFAULT_MAX_DEPTH};
pub use lexer::{tokenize, Lexer};
pub use parser::{parse, parse_source, Parser};
pub use runtime::{Pcl, RuntimeResult};
pub use span::Span;
pub use stdlib::{Args, BuiltinDescriptor, Implementation, Overload, Registry, RegistryError};
pub use token::{Symbol, Token, TokenKind};
pub use value::{ParamType, StackValue, ValueType};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoke() {
        assert_eq!(VERSION, "0.1.0");
    }
}
