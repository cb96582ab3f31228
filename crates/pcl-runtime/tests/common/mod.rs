//! Shared test utilities
//!
//! Helpers for running PCL source against a runtime with a buffered
//! environment and checking the resulting stack or exception.

#![allow(dead_code)]

use pcl_runtime::{BufferedEnvironment, ErrorKind, Exception, Pcl, StackValue};

// Re-export testing utilities
pub use pretty_assertions::{assert_eq, assert_ne};

/// Runtime whose I/O goes to a buffer
pub fn runtime() -> Pcl {
    Pcl::with_environment(BufferedEnvironment::new())
}

/// Evaluate and return the final stack, panicking with the report on error
pub fn eval(source: &str) -> Vec<StackValue> {
    match runtime().eval(source) {
        Ok(stack) => stack,
        Err(exception) => panic!(
            "{:?} failed:\n{}",
            source,
            pcl_runtime::Report::new(&exception, source).to_human_string(source)
        ),
    }
}

/// Evaluate source that is expected to fail
pub fn eval_err(source: &str) -> Exception {
    match runtime().eval(source) {
        Ok(stack) => panic!("{:?} should fail, got stack {:?}", source, stack),
        Err(exception) => exception,
    }
}

pub fn num(n: f64) -> StackValue {
    StackValue::Number(n)
}

pub fn s(text: &str) -> StackValue {
    StackValue::string(text)
}

pub fn numbers(values: &[f64]) -> Vec<StackValue> {
    values.iter().copied().map(StackValue::Number).collect()
}

/// Assert that source code leaves exactly these numbers on the stack
///
/// # Example
/// ```
/// assert_numbers("3 4 add", &[7.0]);
/// ```
pub fn assert_numbers(source: &str, expected: &[f64]) {
    assert_eq!(eval(source), numbers(expected), "stack after {:?}", source);
}

/// Assert that source code leaves exactly these values on the stack
pub fn assert_stack(source: &str, expected: Vec<StackValue>) {
    assert_eq!(eval(source), expected, "stack after {:?}", source);
}

/// Assert the error kind and message of a failing program
pub fn assert_error(source: &str, kind: ErrorKind, message: &str) -> Exception {
    let exception = eval_err(source);
    assert_eq!(exception.error().kind(), kind, "error kind for {:?}", source);
    assert_eq!(exception.error().to_string(), message, "message for {:?}", source);
    exception
}

/// Stack of the frame the error was raised in
pub fn failing_stack(exception: &Exception) -> Vec<StackValue> {
    exception
        .failing_frame()
        .map(|frame| frame.stack.clone())
        .unwrap_or_default()
}
