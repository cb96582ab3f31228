//! Builtin invocation
//!
//! An identifier ending in `?` is a conditional call: the value directly
//! beneath the builtin's arguments decides whether the builtin runs. A falsy
//! condition is consumed and the arguments stay where they are, so
//! `0 5 dup?` leaves `[5]` and `1 5 dup?` leaves `[5, 5]`.
//!
//! Whenever a call fails after values were popped, the condition and then
//! the arguments are pushed back so the stack reads as it did before the
//! call.

use super::{CallContext, FrameId, Interpreter};
use crate::ast::Node;
use crate::error::{BuiltinFailure, PclError};
use crate::span::Span;
use crate::stdlib::{Args, BuiltinDescriptor, Implementation, Overload};
use crate::value::StackValue;
use std::sync::Arc;

impl Interpreter {
    /// Invoke the builtin named by an identifier node in frame `frame`
    pub(super) fn invoke(
        &mut self,
        frame: FrameId,
        node: &Node,
        name: &str,
        span: Span,
    ) -> Result<(), PclError> {
        let (builtin_name, conditional) = split_conditional(name);

        let registry = Arc::clone(&self.registry);
        let Some(builtin) = registry.get(builtin_name) else {
            return Err(PclError::BuiltinUnknown {
                name: builtin_name.to_string(),
                span,
                frame,
            });
        };

        let arity = builtin.arity();
        let required = arity + usize::from(conditional);
        let stack = &mut self.frames[frame.0].stack;
        if stack.len() < required {
            return Err(PclError::BuiltinArity {
                message: arity_message(builtin.name(), arity, conditional, stack.len()),
                span,
                frame,
            });
        }

        let args = stack.split_off(stack.len() - arity);
        let condition = if conditional { stack.pop() } else { None };

        if let Some(condition) = &condition {
            if !condition.is_truthy() {
                tracing::trace!(builtin = builtin.name(), "condition falsy, skipping call");
                stack.extend(args);
                return Ok(());
            }
        }

        match self.call_overload(builtin, frame, node, span, &args) {
            Ok(results) => {
                self.frames[frame.0].stack.extend(results);
                Ok(())
            }
            Err(error) => {
                let stack = &mut self.frames[frame.0].stack;
                stack.extend(condition);
                stack.extend(args);
                Err(error)
            }
        }
    }

    fn call_overload(
        &mut self,
        builtin: &BuiltinDescriptor,
        frame: FrameId,
        node: &Node,
        span: Span,
        args: &[StackValue],
    ) -> Result<Vec<StackValue>, PclError> {
        let overload = resolve_overload(builtin, args).map_err(|message| {
            PclError::BuiltinNoOverload {
                message,
                span,
                frame,
            }
        })?;
        tracing::debug!(
            builtin = builtin.name(),
            signature = %overload.signature(builtin.name()),
            "calling builtin"
        );

        let marshalled = Args::marshal(overload.params(), args);
        let outcome = match overload.implementation() {
            Implementation::Pure(f) => f(marshalled),
            Implementation::Contextual(f) => {
                let mut ctx = CallContext::new(self, frame, node);
                f(&mut ctx, marshalled)
            }
        };

        outcome.map_err(|failure| match failure {
            BuiltinFailure::Runtime(message) => PclError::BuiltinRuntime {
                message,
                span,
                frame,
            },
            BuiltinFailure::Propagated(error) => error,
            BuiltinFailure::Fault(cause) => {
                tracing::warn!(builtin = builtin.name(), %cause, "builtin fault");
                PclError::InternalBuiltinFault {
                    name: builtin.name().to_string(),
                    span,
                    frame,
                    cause: Arc::from(cause),
                }
            }
        })
    }
}

/// Split a trailing `?` off an identifier
fn split_conditional(name: &str) -> (&str, bool) {
    match name.strip_suffix('?') {
        Some(stripped) => (stripped, true),
        None => (name, false),
    }
}

/// Pick the single overload that accepts `args`.
/// Zero or several matches both fail with the same message shape.
fn resolve_overload<'b>(
    builtin: &'b BuiltinDescriptor,
    args: &[StackValue],
) -> Result<&'b Overload, String> {
    let mut matching = builtin
        .overloads()
        .iter()
        .filter(|overload| overload.accepts(args));

    match (matching.next(), matching.next()) {
        (Some(overload), None) => Ok(overload),
        (found, _) => {
            let types = args
                .iter()
                .map(|arg| arg.value_type().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            let noun = if args.len() == 1 {
                "argument"
            } else {
                "arguments"
            };
            let problem = if found.is_some() {
                "is ambiguous"
            } else {
                "has no overload"
            };
            Err(format!(
                "Builtin {} {} for {} of type ({})!",
                builtin.name(),
                problem,
                noun,
                types
            ))
        }
    }
}

fn arity_message(name: &str, arity: usize, conditional: bool, depth: usize) -> String {
    let noun = if depth == 1 { "argument" } else { "arguments" };
    if conditional {
        format!(
            "Cannot call conditional builtin {} with {} {} on the stack! (needs at least {}, plus a value to check for truthiness)",
            name, depth, noun, arity
        )
    } else {
        format!(
            "Cannot call builtin {} with {} {} on the stack! (needs at least {})",
            name, depth, noun, arity
        )
    }
}
