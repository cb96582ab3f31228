//! Builtin registry and standard library
//!
//! A builtin is a name plus one or more overloads. All overloads of a name
//! share the same arity and the same context requirement; both are checked
//! when an overload is defined.

pub mod control;
pub mod io;
pub mod logic;
pub mod math;
pub mod stack;
pub mod string;

use crate::ast::Body;
use crate::error::{BuiltinFailure, BuiltinResult};
use crate::interpreter::CallContext;
use crate::value::{ParamType, StackValue};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Implementation that only sees its arguments
pub type PureFn = Arc<dyn Fn(Args) -> BuiltinResult + Send + Sync>;

/// Implementation that also receives the call context
pub type ContextualFn =
    Arc<dyn for<'a> Fn(&mut CallContext<'a>, Args) -> BuiltinResult + Send + Sync>;

/// Body of one overload
#[derive(Clone)]
pub enum Implementation {
    Pure(PureFn),
    Contextual(ContextualFn),
}

impl Implementation {
    pub fn pure<F>(f: F) -> Self
    where
        F: Fn(Args) -> BuiltinResult + Send + Sync + 'static,
    {
        Implementation::Pure(Arc::new(f))
    }

    pub fn contextual<F>(f: F) -> Self
    where
        F: for<'a> Fn(&mut CallContext<'a>, Args) -> BuiltinResult + Send + Sync + 'static,
    {
        Implementation::Contextual(Arc::new(f))
    }

    pub fn takes_context(&self) -> bool {
        matches!(self, Implementation::Contextual(_))
    }
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Implementation::Pure(_) => f.write_str("Pure(<fn>)"),
            Implementation::Contextual(_) => f.write_str("Contextual(<fn>)"),
        }
    }
}

/// One typed signature of a builtin
#[derive(Debug, Clone)]
pub struct Overload {
    params: Vec<ParamType>,
    implementation: Implementation,
    doc: String,
}

impl Overload {
    pub fn params(&self) -> &[ParamType] {
        &self.params
    }

    pub fn implementation(&self) -> &Implementation {
        &self.implementation
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    /// True when every popped argument matches its parameter
    pub fn accepts(&self, args: &[StackValue]) -> bool {
        self.params.len() == args.len()
            && self
                .params
                .iter()
                .zip(args)
                .all(|(param, arg)| param.accepts(arg))
    }

    /// `name(Number, Str)` form, for logs and help text
    pub fn signature(&self, name: &str) -> String {
        let params = self
            .params
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", name, params)
    }
}

/// Everything the dispatcher needs to know about one builtin name
#[derive(Debug, Clone)]
pub struct BuiltinDescriptor {
    name: String,
    arity: usize,
    takes_context: bool,
    overloads: Vec<Overload>,
}

impl BuiltinDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn takes_context(&self) -> bool {
        self.takes_context
    }

    pub fn overloads(&self) -> &[Overload] {
        &self.overloads
    }
}

/// Invalid builtin definition
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("builtin {name} takes {expected} argument(s), but the new overload takes {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("builtin {name} mixes overloads with and without a call context")]
    ContextMismatch { name: String },
    #[error("builtin name {0:?} is not a valid identifier")]
    InvalidName(String),
}

/// Name to builtin lookup table
#[derive(Debug, Clone, Default)]
pub struct Registry {
    builtins: HashMap<String, BuiltinDescriptor>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every standard builtin defined
    ///
    /// # Panics
    ///
    /// Panics if the standard table is inconsistent. See [`Registry::try_standard`].
    pub fn standard() -> Self {
        Self::try_standard().expect("standard builtins are consistent")
    }

    /// Registry with every standard builtin defined, or the first
    /// definition the table rejected
    pub fn try_standard() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        register_standard(&mut registry)?;
        Ok(registry)
    }

    /// Add an overload, creating the builtin on first use
    pub fn define(
        &mut self,
        name: &str,
        params: &[ParamType],
        doc: &str,
        implementation: Implementation,
    ) -> Result<&mut Self, RegistryError> {
        let valid = !name.is_empty()
            && name.chars().all(crate::lexer::is_identifier_char)
            && !name.ends_with('?');
        if !valid {
            return Err(RegistryError::InvalidName(name.to_string()));
        }

        let takes_context = implementation.takes_context();
        let overload = Overload {
            params: params.to_vec(),
            implementation,
            doc: doc.to_string(),
        };

        match self.builtins.get_mut(name) {
            Some(builtin) => {
                if builtin.arity != params.len() {
                    return Err(RegistryError::ArityMismatch {
                        name: name.to_string(),
                        expected: builtin.arity,
                        found: params.len(),
                    });
                }
                if builtin.takes_context != takes_context {
                    return Err(RegistryError::ContextMismatch {
                        name: name.to_string(),
                    });
                }
                builtin.overloads.push(overload);
            }
            None => {
                self.builtins.insert(
                    name.to_string(),
                    BuiltinDescriptor {
                        name: name.to_string(),
                        arity: params.len(),
                        takes_context,
                        overloads: vec![overload],
                    },
                );
            }
        }

        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&BuiltinDescriptor> {
        self.builtins.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builtins.contains_key(name)
    }

    /// Builtin names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.builtins.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Builtins in name order
    pub fn iter(&self) -> impl Iterator<Item = &BuiltinDescriptor> {
        let mut builtins: Vec<&BuiltinDescriptor> = self.builtins.values().collect();
        builtins.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        builtins.into_iter()
    }

    pub fn len(&self) -> usize {
        self.builtins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builtins.is_empty()
    }
}

fn register_standard(registry: &mut Registry) -> Result<(), RegistryError> {
    math::register(registry)?;
    logic::register(registry)?;
    string::register(registry)?;
    control::register(registry)?;
    stack::register(registry)?;
    io::register(registry)?;
    Ok(())
}

/// One marshalled argument: exact parameters are unwrapped to their
/// payload, `Any` parameters keep the whole value
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Number(f64),
    Str(String),
    Function(Body),
    Value(StackValue),
}

/// Arguments handed to a builtin, in stack order (deepest first)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args(Vec<Arg>);

impl Args {
    /// Convert popped values according to the chosen overload's parameters
    pub fn marshal(params: &[ParamType], values: &[StackValue]) -> Self {
        let args = params
            .iter()
            .zip(values)
            .map(|(param, value)| match (param, value) {
                (ParamType::Any, value) => Arg::Value(value.clone()),
                (ParamType::Exact(_), StackValue::Number(n)) => Arg::Number(*n),
                (ParamType::Exact(_), StackValue::Str(s)) => Arg::Str(s.clone()),
                (ParamType::Exact(_), StackValue::Function(body)) => {
                    Arg::Function(Arc::clone(body))
                }
            })
            .collect();
        Args(args)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn number(&self, index: usize) -> Result<f64, BuiltinFailure> {
        match self.0.get(index) {
            Some(Arg::Number(n)) | Some(Arg::Value(StackValue::Number(n))) => Ok(*n),
            other => Err(mismatch(index, "number", other)),
        }
    }

    pub fn string(&self, index: usize) -> Result<&str, BuiltinFailure> {
        match self.0.get(index) {
            Some(Arg::Str(s)) | Some(Arg::Value(StackValue::Str(s))) => Ok(s),
            other => Err(mismatch(index, "string", other)),
        }
    }

    pub fn function(&self, index: usize) -> Result<Body, BuiltinFailure> {
        match self.0.get(index) {
            Some(Arg::Function(body)) | Some(Arg::Value(StackValue::Function(body))) => {
                Ok(Arc::clone(body))
            }
            other => Err(mismatch(index, "function", other)),
        }
    }

    /// Argument as a full stack value, whatever its parameter type
    pub fn value(&self, index: usize) -> Result<StackValue, BuiltinFailure> {
        match self.0.get(index) {
            Some(Arg::Value(value)) => Ok(value.clone()),
            Some(Arg::Number(n)) => Ok(StackValue::Number(*n)),
            Some(Arg::Str(s)) => Ok(StackValue::Str(s.clone())),
            Some(Arg::Function(body)) => Ok(StackValue::Function(Arc::clone(body))),
            None => Err(mismatch(index, "value", None)),
        }
    }
}

fn mismatch(index: usize, expected: &str, found: Option<&Arg>) -> BuiltinFailure {
    match found {
        Some(arg) => BuiltinFailure::fault(format!(
            "argument {} should be a {}, found {:?}",
            index, expected, arg
        )),
        None => BuiltinFailure::fault(format!("missing argument {}", index)),
    }
}
