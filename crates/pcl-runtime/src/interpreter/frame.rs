//! Call frames
//!
//! Frames live in an arena owned by the interpreter and refer to their parent
//! by index. Frame lifetimes are strictly nested, so the arena behaves like a
//! call stack: a child is pushed when a builtin calls a function value and
//! popped when that call returns normally. When an error propagates the
//! frames are left in place so the chain can be walked for a traceback.

use crate::ast::{Body, Node};
use crate::value::StackValue;
use serde::Serialize;
use std::fmt;

/// Index of a frame in the interpreter's frame arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FrameId(pub(crate) usize);

impl FrameId {
    /// The program's top-level frame
    pub const ROOT: FrameId = FrameId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Link from a child frame back to the frame that invoked it
#[derive(Debug, Clone, PartialEq)]
pub struct Parent {
    /// The calling frame
    pub frame: FrameId,
    /// The identifier node whose builtin created this frame
    pub invoked_at: Node,
}

/// One activation of a node body
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub body: Body,
    pub stack: Vec<StackValue>,
    pub parent: Option<Parent>,
}

impl Frame {
    pub fn root(body: Body, stack: Vec<StackValue>) -> Self {
        Self {
            body,
            stack,
            parent: None,
        }
    }

    pub fn child(body: Body, stack: Vec<StackValue>, parent: FrameId, invoked_at: Node) -> Self {
        Self {
            body,
            stack,
            parent: Some(Parent {
                frame: parent,
                invoked_at,
            }),
        }
    }
}

/// Follow parent links from `id` to the root.
///
/// Returns the chain ordered from the outermost frame to `id` itself.
pub fn unwind(frames: &[Frame], id: FrameId) -> Vec<FrameId> {
    let mut chain = Vec::new();
    let mut current = Some(id);
    while let Some(frame_id) = current {
        let Some(frame) = frames.get(frame_id.0) else {
            break;
        };
        chain.push(frame_id);
        current = frame.parent.as_ref().map(|parent| parent.frame);
    }
    chain.reverse();
    chain
}
