use super::{FrameId, Interpreter};
use crate::ast::{Body, Node};
use crate::environment::Environment;
use crate::error::PclError;
use crate::value::StackValue;

/// What a contextual builtin can see while it runs: the calling frame's stack
/// (with the builtin's arguments already popped), the parent frame's stack,
/// the host environment, and a way to run function values.
pub struct CallContext<'a> {
    interpreter: &'a mut Interpreter,
    frame: FrameId,
    node: &'a Node,
}

impl<'a> CallContext<'a> {
    pub(super) fn new(interpreter: &'a mut Interpreter, frame: FrameId, node: &'a Node) -> Self {
        Self {
            interpreter,
            frame,
            node,
        }
    }

    /// Frame the builtin was invoked from
    pub fn frame_id(&self) -> FrameId {
        self.frame
    }

    /// Identifier node being executed
    pub fn node(&self) -> &Node {
        self.node
    }

    pub fn stack(&self) -> &[StackValue] {
        &self.interpreter.frames[self.frame.0].stack
    }

    pub fn stack_mut(&mut self) -> &mut Vec<StackValue> {
        &mut self.interpreter.frames[self.frame.0].stack
    }

    /// Stack of the frame that called this one, `None` at the root
    pub fn parent_stack_mut(&mut self) -> Option<&mut Vec<StackValue>> {
        let parent = self.interpreter.frames[self.frame.0].parent.as_ref()?.frame;
        Some(&mut self.interpreter.frames[parent.0].stack)
    }

    /// Run `body` in a child frame seeded with `stack` and return the child's
    /// final stack
    pub fn call(&mut self, body: Body, stack: Vec<StackValue>) -> Result<Vec<StackValue>, PclError> {
        self.interpreter
            .call_child(self.frame, self.node, body, stack)
    }

    pub fn environment(&mut self) -> &mut dyn Environment {
        self.interpreter.environment.as_mut()
    }

    pub fn max_depth(&self) -> usize {
        self.interpreter.max_depth
    }
}
