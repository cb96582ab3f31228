//! String builtins
//!
//! These share names with the arithmetic builtins and are picked by
//! overload resolution on the argument types.

use super::{Args, Implementation, Registry, RegistryError};
use crate::error::{BuiltinFailure, BuiltinResult};
use crate::value::{ParamType, StackValue};

pub(super) fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry
        .define(
            "add",
            &[ParamType::STR, ParamType::STR],
            "Concatenation of two strings",
            Implementation::pure(concat),
        )?
        .define(
            "mul",
            &[ParamType::STR, ParamType::NUMBER],
            "String repeated n times",
            Implementation::pure(repeat),
        )?
        .define(
            "length",
            &[ParamType::STR],
            "Number of characters in a string",
            Implementation::pure(length),
        )?;
    Ok(())
}

/// add(a: Str, b: Str) -> Str
pub fn concat(args: Args) -> BuiltinResult {
    let mut result = args.string(0)?.to_string();
    result.push_str(args.string(1)?);
    Ok(vec![StackValue::Str(result)])
}

/// mul(s: Str, n: Number) -> Str
///
/// `n` is truncated toward zero. A negative or non-finite count is an error,
/// and a result too large to allocate is a fault.
pub fn repeat(args: Args) -> BuiltinResult {
    let text = args.string(0)?;
    let count = args.number(1)?;
    if !count.is_finite() {
        return Err(BuiltinFailure::runtime(format!(
            "Cannot repeat a string {} times",
            StackValue::Number(count)
        )));
    }
    if count < 0.0 {
        return Err(BuiltinFailure::runtime(format!(
            "Cannot repeat a string a negative number of times ({})",
            StackValue::Number(count)
        )));
    }

    let count = count as usize;
    let total = text.len().checked_mul(count).ok_or_else(|| {
        BuiltinFailure::runtime(format!(
            "Repeated string would be too long ({} bytes, {} times)",
            text.len(),
            count
        ))
    })?;
    if total == 0 {
        return Ok(vec![StackValue::string("")]);
    }

    let mut result = String::new();
    result.try_reserve_exact(total).map_err(BuiltinFailure::fault)?;
    for _ in 0..count {
        result.push_str(text);
    }
    Ok(vec![StackValue::Str(result)])
}

/// length(s: Str) -> Number
pub fn length(args: Args) -> BuiltinResult {
    Ok(vec![StackValue::Number(args.string(0)?.chars().count() as f64)])
}
