//! Runtime value representation
//!
//! - Numbers: `f64`
//! - Strings: owned `String`
//! - Functions: an unevaluated, shared node body. A function value captures no
//!   environment; the only context it sees at call time is the frame parent
//!   chain.

use crate::ast::{Body, Node};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A value on an operand stack
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum StackValue {
    Number(f64),
    Str(String),
    Function(Body),
}

impl StackValue {
    pub fn string(s: impl Into<String>) -> Self {
        StackValue::Str(s.into())
    }

    pub fn function(body: Vec<Node>) -> Self {
        StackValue::Function(Arc::from(body))
    }

    /// Number 1 or 0 for a boolean result
    pub fn flag(value: bool) -> Self {
        StackValue::Number(if value { 1.0 } else { 0.0 })
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            StackValue::Number(_) => ValueType::Number,
            StackValue::Str(_) => ValueType::Str,
            StackValue::Function(_) => ValueType::Function,
        }
    }

    /// Boolean reading of a value: nonzero numbers, non-empty strings and
    /// every function are truthy
    pub fn is_truthy(&self) -> bool {
        match self {
            StackValue::Number(n) => *n != 0.0,
            StackValue::Str(s) => !s.is_empty(),
            StackValue::Function(_) => true,
        }
    }

    /// Display form with strings quoted and escaped
    pub fn to_literal_string(&self) -> String {
        match self {
            StackValue::Str(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for StackValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackValue::Number(n) => {
                // No trailing .0 for whole numbers
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{:.0}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            StackValue::Str(s) => f.write_str(s),
            StackValue::Function(_) => f.write_str("{ function }"),
        }
    }
}

/// Runtime type tag of a [`StackValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValueType {
    Number,
    Str,
    Function,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Number => "Number",
            ValueType::Str => "Str",
            ValueType::Function => "Function",
        };
        f.write_str(name)
    }
}

/// Expected type of one builtin parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParamType {
    /// Only values of this type match; the payload is unwrapped
    Exact(ValueType),
    /// Every value matches; the whole value is passed through
    Any,
}

impl ParamType {
    pub const NUMBER: ParamType = ParamType::Exact(ValueType::Number);
    pub const STR: ParamType = ParamType::Exact(ValueType::Str);
    pub const FUNCTION: ParamType = ParamType::Exact(ValueType::Function);
    pub const ANY: ParamType = ParamType::Any;

    pub fn accepts(&self, value: &StackValue) -> bool {
        match self {
            ParamType::Exact(expected) => *expected == value.value_type(),
            ParamType::Any => true,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Exact(ty) => write!(f, "{}", ty),
            ParamType::Any => f.write_str("Any"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StackValue::Number(0.0), false)]
    #[case(StackValue::Number(-0.5), true)]
    #[case(StackValue::string(""), false)]
    #[case(StackValue::string("0"), true)]
    #[case(StackValue::function(vec![]), true)]
    fn test_truthiness(#[case] value: StackValue, #[case] expected: bool) {
        assert_eq!(value.is_truthy(), expected);
    }

    #[test]
    fn test_number_display() {
        assert_eq!(StackValue::Number(7.0).to_string(), "7");
        assert_eq!(StackValue::Number(-1.5).to_string(), "-1.5");
        assert_eq!(StackValue::Number(f64::INFINITY).to_string(), "inf");
    }

    #[test]
    fn test_literal_string_escapes() {
        assert_eq!(StackValue::string(r#"a"b"#).to_literal_string(), r#""a\"b""#);
        assert_eq!(StackValue::function(vec![]).to_literal_string(), "{ function }");
    }

    #[test]
    fn test_param_accepts() {
        assert!(ParamType::ANY.accepts(&StackValue::string("x")));
        assert!(ParamType::NUMBER.accepts(&StackValue::Number(1.0)));
        assert!(!ParamType::NUMBER.accepts(&StackValue::string("1")));
    }
}
