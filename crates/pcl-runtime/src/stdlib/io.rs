//! Console builtins, routed through the host [`Environment`](crate::environment::Environment)

use super::{Args, Implementation, Registry, RegistryError};
use crate::error::{BuiltinFailure, BuiltinResult};
use crate::interpreter::CallContext;
use crate::value::{ParamType, StackValue};

pub(super) fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry
        .define(
            "print",
            &[ParamType::ANY],
            "Write a value's display text as one line",
            Implementation::contextual(print),
        )?
        .define(
            "input",
            &[],
            "Push one line read from input",
            Implementation::contextual(input),
        )?;
    Ok(())
}

/// print(value: Any)
pub fn print(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let text = args.value(0)?.to_string();
    ctx.environment().print(&text)?;
    Ok(Vec::new())
}

/// input() -> Str
pub fn input(ctx: &mut CallContext<'_>, _args: Args) -> BuiltinResult {
    match ctx.environment().input()? {
        Some(line) => Ok(vec![StackValue::Str(line)]),
        None => Err(BuiltinFailure::runtime("End of input reached")),
    }
}
