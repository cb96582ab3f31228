//! Stack manipulation builtins

use super::{Args, Implementation, Registry, RegistryError};
use crate::error::{BuiltinFailure, BuiltinResult};
use crate::interpreter::CallContext;
use crate::value::{ParamType, StackValue};

pub(super) fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry
        .define("dup", &[ParamType::ANY], "Duplicate the top value", Implementation::pure(dup))?
        .define("drop", &[ParamType::ANY], "Discard the top value", Implementation::pure(drop))?
        .define(
            "swap",
            &[ParamType::ANY, ParamType::ANY],
            "Exchange the top two values",
            Implementation::pure(swap),
        )?
        .define(
            "over",
            &[ParamType::ANY, ParamType::ANY],
            "Copy the second value to the top: a b -> a b a",
            Implementation::pure(over),
        )?
        .define(
            "rot",
            &[ParamType::NUMBER],
            "Rotate the whole stack left by n (right when negative)",
            Implementation::contextual(rot),
        )?
        .define(
            "keeplast",
            &[],
            "Discard everything but the top value",
            Implementation::contextual(keeplast),
        )?
        .define(
            "take",
            &[],
            "Move the top value of the calling frame's stack onto this one",
            Implementation::contextual(take),
        )?;
    Ok(())
}

/// dup(a: Any) -> Any, Any
pub fn dup(args: Args) -> BuiltinResult {
    let value = args.value(0)?;
    Ok(vec![value.clone(), value])
}

/// drop(a: Any)
pub fn drop(_args: Args) -> BuiltinResult {
    Ok(Vec::new())
}

/// swap(a: Any, b: Any) -> b, a
pub fn swap(args: Args) -> BuiltinResult {
    Ok(vec![args.value(1)?, args.value(0)?])
}

/// over(a: Any, b: Any) -> a, b, a
pub fn over(args: Args) -> BuiltinResult {
    let a = args.value(0)?;
    Ok(vec![a.clone(), args.value(1)?, a])
}

/// rot(n: Number)
///
/// Rotates what is left of the stack after popping `n`. The amount is
/// truncated toward zero and taken modulo the stack size.
pub fn rot(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let amount = args.number(0)? as i64;
    rotate(ctx.stack_mut(), amount);
    Ok(Vec::new())
}

/// keeplast()
pub fn keeplast(ctx: &mut CallContext<'_>, _args: Args) -> BuiltinResult {
    let stack = ctx.stack_mut();
    let last = stack.pop();
    stack.clear();
    Ok(last.into_iter().collect())
}

/// take() -> Any
pub fn take(ctx: &mut CallContext<'_>, _args: Args) -> BuiltinResult {
    let parent = ctx
        .parent_stack_mut()
        .ok_or_else(|| BuiltinFailure::runtime("Cannot call take without a parent function"))?;
    let value = parent
        .pop()
        .ok_or_else(|| BuiltinFailure::runtime("Parent stack is empty"))?;
    Ok(vec![value])
}

/// Rotate left by `amount`, right when negative. The bottom of the stack is
/// the front of the slice, so a left rotation by one moves the bottom value
/// to the top.
pub fn rotate(values: &mut [StackValue], amount: i64) {
    let len = values.len();
    if len < 2 {
        return;
    }
    let shift = amount.rem_euclid(len as i64) as usize;
    values.rotate_left(shift);
}
