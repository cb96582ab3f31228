//! Arithmetic builtins
//!
//! All arithmetic is IEEE 754 `f64`: division by zero yields an infinity or
//! NaN instead of an error. `mod` is floored, so the result takes the sign
//! of the divisor.

use super::{Args, Implementation, Registry, RegistryError};
use crate::error::{BuiltinFailure, BuiltinResult};
use crate::value::{ParamType, StackValue};

const BINARY: &[ParamType] = &[ParamType::NUMBER, ParamType::NUMBER];

pub(super) fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry
        .define("add", BINARY, "Sum of two numbers", Implementation::pure(add))?
        .define("sub", BINARY, "Difference a - b", Implementation::pure(sub))?
        .define("mul", BINARY, "Product of two numbers", Implementation::pure(mul))?
        .define("div", BINARY, "Quotient a / b", Implementation::pure(div))?
        .define("mod", BINARY, "Floored remainder of a / b", Implementation::pure(modulo))?
        .define(
            "range",
            BINARY,
            "Integers from a to b inclusive",
            Implementation::pure(range),
        )?;
    Ok(())
}

/// add(a: Number, b: Number) -> Number
pub fn add(args: Args) -> BuiltinResult {
    Ok(vec![StackValue::Number(args.number(0)? + args.number(1)?)])
}

/// sub(a: Number, b: Number) -> Number
pub fn sub(args: Args) -> BuiltinResult {
    Ok(vec![StackValue::Number(args.number(0)? - args.number(1)?)])
}

/// mul(a: Number, b: Number) -> Number
pub fn mul(args: Args) -> BuiltinResult {
    Ok(vec![StackValue::Number(args.number(0)? * args.number(1)?)])
}

/// div(a: Number, b: Number) -> Number
pub fn div(args: Args) -> BuiltinResult {
    Ok(vec![StackValue::Number(args.number(0)? / args.number(1)?)])
}

/// mod(a: Number, b: Number) -> Number
///
/// mod(-1, 3) = 2, mod(1, -3) = -2
pub fn modulo(args: Args) -> BuiltinResult {
    Ok(vec![StackValue::Number(floored_mod(
        args.number(0)?,
        args.number(1)?,
    ))])
}

/// range(from: Number, to: Number) -> Number...
///
/// Both bounds are truncated toward zero. Pushes nothing when `to < from`.
/// Non-finite bounds are an error, and a range too large to allocate is a
/// fault.
pub fn range(args: Args) -> BuiltinResult {
    let (from, to) = (args.number(0)?, args.number(1)?);
    if !from.is_finite() || !to.is_finite() {
        return Err(BuiltinFailure::runtime(format!(
            "Cannot build a range from {} to {}",
            StackValue::Number(from),
            StackValue::Number(to)
        )));
    }

    let (from, to) = (from as i64, to as i64);
    let len = (i128::from(to) - i128::from(from) + 1).max(0);
    let len = usize::try_from(len).map_err(|_| {
        BuiltinFailure::runtime(format!("Range from {} to {} is too large", from, to))
    })?;

    let mut values = Vec::new();
    values.try_reserve_exact(len).map_err(BuiltinFailure::fault)?;
    values.extend((from..=to).map(|n| StackValue::Number(n as f64)));
    Ok(values)
}

pub(crate) fn floored_mod(a: f64, b: f64) -> f64 {
    let remainder = a % b;
    if remainder != 0.0 && (remainder < 0.0) != (b < 0.0) {
        remainder + b
    } else {
        remainder
    }
}
