//! Tree-walking evaluator
//!
//! Executes a node sequence against a frame's operand stack:
//! - literals push values
//! - `{ ... }` pushes an unevaluated function value
//! - identifiers invoke builtins (see `dispatch`)
//!
//! Builtins that run function values re-enter the evaluator through
//! [`CallContext::call`], so language-level call nesting maps onto host
//! recursion. Depth is capped by [`Interpreter::with_max_depth`], and child
//! frames run under `stacker` so the cap, not the host stack, is the limit.

mod context;
mod dispatch;
mod frame;

pub use context::CallContext;
pub use frame::{unwind, Frame, FrameId, Parent};

use crate::ast::{Body, Node};
use crate::environment::{Environment, StdEnvironment};
use crate::error::PclError;
use crate::stdlib::Registry;
use crate::value::StackValue;
use std::fmt;
use std::sync::Arc;

/// Default limit on nested frames, the root frame included
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Remaining host stack below which a child call grows the stack
const RED_ZONE: usize = 100 * 1024;

/// Host stack allocated per growth step
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// A failed run: the error plus the frame arena as it stood when the error
/// reached the top, with every popped argument already restored
#[derive(Debug, Clone)]
pub struct Exception {
    error: PclError,
    frames: Vec<Frame>,
}

impl Exception {
    pub fn new(error: PclError, frames: Vec<Frame>) -> Self {
        Self { error, frames }
    }

    pub fn error(&self) -> &PclError {
        &self.error
    }

    pub fn into_error(self) -> PclError {
        self.error
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frame the error was raised in, if it was a runtime error
    pub fn failing_frame(&self) -> Option<&Frame> {
        self.error
            .frame()
            .and_then(|id| self.frames.get(id.index()))
    }

    /// Frames from the root to the failing frame
    pub fn call_chain(&self) -> Vec<&Frame> {
        match self.error.frame() {
            Some(id) => unwind(&self.frames, id)
                .into_iter()
                .filter_map(|id| self.frames.get(id.index()))
                .collect(),
            None => Vec::new(),
        }
    }
}

impl From<PclError> for Exception {
    fn from(error: PclError) -> Self {
        Self::new(error, Vec::new())
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error.kind(), self.error)
    }
}

impl std::error::Error for Exception {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Interpreter state
pub struct Interpreter {
    /// Builtin lookup table
    registry: Arc<Registry>,
    /// Host capabilities handed to I/O builtins
    environment: Box<dyn Environment>,
    /// Frame arena; index 0 is the root while a program runs
    frames: Vec<Frame>,
    /// Maximum number of live frames
    max_depth: usize,
}

impl Interpreter {
    /// Create a new interpreter
    pub fn new(registry: Arc<Registry>, environment: Box<dyn Environment>) -> Self {
        Self {
            registry,
            environment,
            frames: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Interpreter with the standard builtins, talking to stdin/stdout
    pub fn standard() -> Self {
        Self::new(Arc::new(Registry::standard()), Box::new(StdEnvironment))
    }

    /// Set the maximum number of nested frames (at least 1)
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Shared handle to the builtin table
    pub fn registry_handle(&self) -> Arc<Registry> {
        Arc::clone(&self.registry)
    }

    /// Run a program on an empty stack and return the final stack
    pub fn run(&mut self, body: impl Into<Body>) -> Result<Vec<StackValue>, Exception> {
        self.run_with_stack(body, Vec::new())
    }

    /// Run a program on top of an initial stack
    pub fn run_with_stack(
        &mut self,
        body: impl Into<Body>,
        stack: Vec<StackValue>,
    ) -> Result<Vec<StackValue>, Exception> {
        self.frames.clear();
        self.frames.push(Frame::root(body.into(), stack));

        match self.run_frame(FrameId::ROOT) {
            Ok(()) => {
                let root = std::mem::take(&mut self.frames).into_iter().next();
                Ok(root.map(|frame| frame.stack).unwrap_or_default())
            }
            Err(error) => {
                tracing::debug!(kind = %error.kind(), %error, "program failed");
                Err(Exception::new(error, std::mem::take(&mut self.frames)))
            }
        }
    }

    /// Execute a frame's body against its stack
    #[tracing::instrument(level = "trace", skip(self))]
    fn run_frame(&mut self, id: FrameId) -> Result<(), PclError> {
        let body = Arc::clone(&self.frames[id.0].body);

        for node in body.iter() {
            match node {
                Node::Number { value, .. } => self.push(id, StackValue::Number(*value)),
                Node::Str { value, .. } => self.push(id, StackValue::Str(value.clone())),
                Node::Function { body, .. } => {
                    self.push(id, StackValue::Function(Arc::clone(body)))
                }
                Node::Identifier { name, span } => self.invoke(id, node, name, *span)?,
            }
        }

        Ok(())
    }

    /// Run `body` in a new child frame of `parent` and return its final stack
    fn call_child(
        &mut self,
        parent: FrameId,
        invoked_at: &Node,
        body: Body,
        stack: Vec<StackValue>,
    ) -> Result<Vec<StackValue>, PclError> {
        if self.frames.len() >= self.max_depth {
            tracing::warn!(limit = self.max_depth, "call depth limit reached");
            return Err(PclError::RecursionLimit {
                limit: self.max_depth,
                span: invoked_at.span(),
                frame: parent,
            });
        }

        let id = FrameId(self.frames.len());
        self.frames
            .push(Frame::child(body, stack, parent, invoked_at.clone()));
        tracing::debug!(frame = %id, parent = %parent, "entering child frame");

        stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, || self.run_frame(id))?;

        tracing::debug!(frame = %id, "leaving child frame");
        Ok(self.frames.pop().map(|frame| frame.stack).unwrap_or_default())
    }

    fn push(&mut self, id: FrameId, value: StackValue) {
        self.frames[id.0].stack.push(value);
    }
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("builtins", &self.registry.len())
            .field("frames", &self.frames.len())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::BufferedEnvironment;
    use crate::error::ErrorKind;
    use crate::parser::parse_source;
    use pretty_assertions::assert_eq;

    fn interpreter() -> Interpreter {
        Interpreter::new(
            Arc::new(Registry::standard()),
            Box::new(BufferedEnvironment::new()),
        )
    }

    fn run(source: &str) -> Result<Vec<StackValue>, Exception> {
        interpreter().run(parse_source(source).unwrap())
    }

    #[test]
    fn test_literals_push_in_order() {
        let stack = run("1 'two' {3}").unwrap();
        assert_eq!(stack.len(), 3);
        assert_eq!(
            stack[..2].to_vec(),
            vec![StackValue::Number(1.0), StackValue::string("two")]
        );
    }

    #[test]
    fn test_function_literal_is_not_evaluated() {
        let stack = run("{ unknownbuiltin }").unwrap();
        assert!(matches!(&stack[..], [StackValue::Function(body)] if body.len() == 1));
    }

    #[test]
    fn test_run_with_initial_stack() {
        let stack = interpreter()
            .run_with_stack(parse_source("add").unwrap(), vec![
                StackValue::Number(2.0),
                StackValue::Number(3.0),
            ])
            .unwrap();
        assert_eq!(stack, vec![StackValue::Number(5.0)]);
    }

    #[test]
    fn test_depth_limit() {
        let mut interp = interpreter().with_max_depth(8);
        let exc = interp
            .run(parse_source("{ take dup call } dup call").unwrap())
            .unwrap_err();
        assert_eq!(exc.error().kind(), ErrorKind::RecursionLimit);
        assert_eq!(exc.call_chain().len(), 8);
    }

    #[test]
    fn test_frames_released_after_success() {
        let mut interp = interpreter();
        interp.run(parse_source("{ 1 } call").unwrap()).unwrap();
        assert!(interp.frames.is_empty());
    }
}
