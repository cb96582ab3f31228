//! Truthiness and comparison builtins
//!
//! Booleans are represented as the numbers 1 and 0.

use super::{Args, Implementation, Registry, RegistryError};
use crate::error::BuiltinResult;
use crate::value::{ParamType, StackValue};

pub(super) fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry
        .define(
            "not",
            &[ParamType::ANY],
            "1 if the value is falsy, otherwise 0",
            Implementation::pure(not),
        )?
        .define(
            "truthify",
            &[ParamType::ANY],
            "1 if the value is truthy, otherwise 0",
            Implementation::pure(truthify),
        )?
        .define(
            "min",
            &[ParamType::NUMBER, ParamType::NUMBER],
            "Smaller of two numbers",
            Implementation::pure(min),
        )?
        .define(
            "max",
            &[ParamType::NUMBER, ParamType::NUMBER],
            "Larger of two numbers",
            Implementation::pure(max),
        )?
        .define(
            "switchpush",
            &[ParamType::ANY, ParamType::ANY, ParamType::ANY],
            "Push a if the first value is truthy, otherwise b",
            Implementation::pure(switchpush),
        )?;
    Ok(())
}

/// not(value: Any) -> Number
pub fn not(args: Args) -> BuiltinResult {
    Ok(vec![StackValue::flag(!args.value(0)?.is_truthy())])
}

/// truthify(value: Any) -> Number
pub fn truthify(args: Args) -> BuiltinResult {
    Ok(vec![StackValue::flag(args.value(0)?.is_truthy())])
}

/// min(a: Number, b: Number) -> Number
pub fn min(args: Args) -> BuiltinResult {
    Ok(vec![StackValue::Number(args.number(0)?.min(args.number(1)?))])
}

/// max(a: Number, b: Number) -> Number
pub fn max(args: Args) -> BuiltinResult {
    Ok(vec![StackValue::Number(args.number(0)?.max(args.number(1)?))])
}

/// switchpush(which: Any, a: Any, b: Any) -> Any
pub fn switchpush(args: Args) -> BuiltinResult {
    let chosen = if args.value(0)?.is_truthy() {
        args.value(1)?
    } else {
        args.value(2)?
    };
    Ok(vec![chosen])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn any(values: &[StackValue]) -> Args {
        Args::marshal(&vec![ParamType::ANY; values.len()], values)
    }

    #[test]
    fn test_not_and_truthify() {
        let empty = any(&[StackValue::string("")]);
        assert_eq!(not(empty.clone()).unwrap(), vec![StackValue::Number(1.0)]);
        assert_eq!(truthify(empty).unwrap(), vec![StackValue::Number(0.0)]);
    }

    #[test]
    fn test_min_max() {
        let args = Args::marshal(
            &[ParamType::NUMBER, ParamType::NUMBER],
            &[StackValue::Number(2.0), StackValue::Number(-3.0)],
        );
        assert_eq!(min(args.clone()).unwrap(), vec![StackValue::Number(-3.0)]);
        assert_eq!(max(args).unwrap(), vec![StackValue::Number(2.0)]);
    }

    #[test]
    fn test_switchpush() {
        let a = StackValue::string("a");
        let b = StackValue::string("b");
        assert_eq!(
            switchpush(any(&[StackValue::Number(1.0), a.clone(), b.clone()])).unwrap(),
            vec![a.clone()]
        );
        assert_eq!(
            switchpush(any(&[StackValue::Number(0.0), a, b.clone()])).unwrap(),
            vec![b]
        );
    }
}
