//! PCL runtime API for embedding

use crate::environment::{Environment, StdEnvironment};
use crate::interpreter::{Exception, Interpreter};
use crate::lexer;
use crate::parser::Parser;
use crate::stdlib::Registry;
use crate::token::Token;
use crate::value::StackValue;
use std::cell::RefCell;
use std::sync::Arc;

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, Exception>;

/// PCL runtime instance
///
/// Provides a high-level API for embedding PCL in host applications.
///
/// # Examples
///
/// ```
/// use pcl_runtime::{Pcl, StackValue};
///
/// let runtime = Pcl::new();
/// let stack = runtime.eval("3 4 +").unwrap();
/// assert_eq!(stack, vec![StackValue::Number(7.0)]);
/// ```
pub struct Pcl {
    /// Interpreter for executing code (using interior mutability)
    interpreter: RefCell<Interpreter>,
}

impl Pcl {
    /// Create a runtime with the standard builtins, using stdin and stdout
    pub fn new() -> Self {
        Self::with_environment(StdEnvironment)
    }

    /// Create a runtime whose `print` and `input` go through `environment`
    ///
    /// # Examples
    ///
    /// ```
    /// use pcl_runtime::{BufferedEnvironment, Pcl};
    ///
    /// let env = BufferedEnvironment::new();
    /// let runtime = Pcl::with_environment(env.clone());
    /// runtime.eval("'hi' print").unwrap();
    /// assert_eq!(env.output(), vec!["hi".to_string()]);
    /// ```
    pub fn with_environment(environment: impl Environment + 'static) -> Self {
        Self::with_registry(Arc::new(Registry::standard()), environment)
    }

    /// Create a runtime with a custom builtin table
    pub fn with_registry(registry: Arc<Registry>, environment: impl Environment + 'static) -> Self {
        Self {
            interpreter: RefCell::new(Interpreter::new(registry, Box::new(environment))),
        }
    }

    /// Limit how deeply function calls may nest
    pub fn with_max_depth(self, max_depth: usize) -> Self {
        Self {
            interpreter: RefCell::new(self.interpreter.into_inner().with_max_depth(max_depth)),
        }
    }

    /// Tokenize, parse and run `source` on an empty stack, returning the
    /// final stack
    pub fn eval(&self, source: &str) -> RuntimeResult<Vec<StackValue>> {
        let nodes = Parser::new(lexer::tokenize(source)).parse()?;
        self.interpreter.borrow_mut().run(nodes)
    }

    /// Token stream for `source`, including whitespace and error tokens
    pub fn tokenize(&self, source: &str) -> Vec<Token> {
        lexer::tokenize(source)
    }

    pub fn registry(&self) -> Arc<Registry> {
        self.interpreter.borrow().registry_handle()
    }
}

impl Default for Pcl {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::BufferedEnvironment;
    use crate::error::ErrorKind;

    #[test]
    fn test_eval_arithmetic() {
        let runtime = Pcl::with_environment(BufferedEnvironment::new());
        assert_eq!(
            runtime.eval("10 3 %").unwrap(),
            vec![StackValue::Number(1.0)]
        );
    }

    #[test]
    fn test_eval_parse_error() {
        let runtime = Pcl::with_environment(BufferedEnvironment::new());
        let exc = runtime.eval("{ 1").unwrap_err();
        assert_eq!(exc.error().kind(), ErrorKind::Parse);
        assert!(exc.frames().is_empty());
    }

    #[test]
    fn test_runtime_is_reusable_after_error() {
        let runtime = Pcl::with_environment(BufferedEnvironment::new());
        assert!(runtime.eval("drop").is_err());
        assert_eq!(runtime.eval("1").unwrap(), vec![StackValue::Number(1.0)]);
    }

    #[test]
    fn test_registry_shared() {
        let runtime = Pcl::with_environment(BufferedEnvironment::new());
        assert!(runtime.registry().contains("map"));
    }
}
