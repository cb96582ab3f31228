//! Builtins that run function values

use super::{Args, Implementation, Registry, RegistryError};
use crate::ast::Body;
use crate::error::{BuiltinFailure, BuiltinResult};
use crate::interpreter::CallContext;
use crate::value::{ParamType, StackValue};
use std::sync::Arc;

pub(super) fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry
        .define(
            "call",
            &[ParamType::FUNCTION],
            "Run a function in a new frame and push its final stack",
            Implementation::contextual(call),
        )?
        .define(
            "map",
            &[ParamType::FUNCTION],
            "Replace every stack value with the result of the function on it",
            Implementation::contextual(map),
        )?;
    Ok(())
}

/// call(f: Function) -> Any...
pub fn call(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let body = args.function(0)?;
    Ok(ctx.call(body, Vec::new())?)
}

/// map(f: Function) -> Any...
///
/// Each run starts with one stack element and must finish with exactly one
/// value. The values are moved out of the frame while the runs happen, so a
/// transform that takes from its parent sees an empty stack. On failure the
/// frame gets its values back untouched.
pub fn map(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let body = args.function(0)?;
    let items = std::mem::take(ctx.stack_mut());

    match transform_each(ctx, &body, &items) {
        Ok(results) => Ok(results),
        Err(failure) => {
            *ctx.stack_mut() = items;
            Err(failure)
        }
    }
}

fn transform_each(
    ctx: &mut CallContext<'_>,
    body: &Body,
    items: &[StackValue],
) -> BuiltinResult {
    let mut results = Vec::with_capacity(items.len());
    for item in items {
        let mut output = ctx.call(Arc::clone(body), vec![item.clone()])?;
        match output.len() {
            1 => results.extend(output.pop()),
            0 => {
                return Err(BuiltinFailure::runtime(
                    "No values returned from map transform",
                ))
            }
            _ => {
                let listed = output
                    .iter()
                    .map(StackValue::to_literal_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(BuiltinFailure::runtime(format!(
                    "Multiple values returned from map transform: [{}]",
                    listed
                )));
            }
        }
    }
    Ok(results)
}
