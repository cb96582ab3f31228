// Standard builtin tests: stack shuffling, frames, map, logic, strings,
// and console I/O through a buffered environment.

mod common;

use common::*;
use common::assert_eq;
use pcl_runtime::{BufferedEnvironment, ErrorKind, Pcl, Registry, StackValue};
use rstest::rstest;

fn letters(text: &str) -> Vec<StackValue> {
    text.chars().map(|c| s(&c.to_string())).collect()
}

// ============================================================================
// Stack manipulation
// ============================================================================

#[rstest]
#[case("1 dup", &[1.0, 1.0])]
#[case("1 2 drop", &[1.0])]
#[case("1 2 swap", &[2.0, 1.0])]
#[case("1 2 over", &[1.0, 2.0, 1.0])]
#[case("1 2 3 keeplast", &[3.0])]
#[case("keeplast", &[])]
fn test_stack_shuffles(#[case] source: &str, #[case] expected: &[f64]) {
    assert_numbers(source, expected);
}

#[rstest]
#[case("2", "cdeab")]
#[case("-1", "eabcd")]
#[case("5", "abcde")]
#[case("2.9", "cdeab")]
fn test_rot(#[case] amount: &str, #[case] expected: &str) {
    let source = format!("'a' 'b' 'c' 'd' 'e' {} rot", amount);
    assert_stack(&source, letters(expected));
}

#[test]
fn test_rot_on_empty_stack() {
    assert_numbers("3 rot", &[]);
}

// ============================================================================
// Frames
// ============================================================================

#[test]
fn test_call_pushes_child_stack() {
    assert_numbers("{ 1 2 } call", &[1.0, 2.0]);
    assert_numbers("{ } call", &[]);
}

#[test]
fn test_take_moves_value_from_parent() {
    assert_numbers("1 { take 2 add } call", &[3.0]);
    assert_numbers("5 6 { take } call", &[5.0, 6.0]);
}

#[test]
fn test_take_without_parent() {
    assert_error(
        "take",
        ErrorKind::BuiltinRuntime,
        "Cannot call take without a parent function",
    );
}

#[test]
fn test_take_from_empty_parent() {
    let exc = assert_error("{ take } call", ErrorKind::BuiltinRuntime, "Parent stack is empty");
    let chain = exc.call_chain();
    assert_eq!(chain.len(), 2);
    assert!(matches!(&chain[0].stack[..], [StackValue::Function(_)]));
    assert!(chain[1].stack.is_empty());
}

#[test]
fn test_functions_are_values() {
    let stack = eval("{ 1 } dup");
    assert_eq!(stack.len(), 2);
    assert_eq!(stack[0], stack[1]);
    assert_eq!(stack[0].to_string(), "{ function }");
}

// ============================================================================
// map
// ============================================================================

#[test]
fn test_map_transforms_each_value() {
    assert_numbers("1 2 3 { 2 mul } map", &[2.0, 4.0, 6.0]);
    assert_stack("'a' 'bc' { length } map", numbers(&[1.0, 2.0]));
}

#[test]
fn test_map_on_empty_stack() {
    assert_numbers("{ 1 } map", &[]);
}

#[test]
fn test_map_with_no_result() {
    let exc = assert_error(
        "1 2 { drop } map",
        ErrorKind::BuiltinRuntime,
        "No values returned from map transform",
    );
    let stack = failing_stack(&exc);
    assert_eq!(stack.len(), 3);
    assert_eq!(stack[..2].to_vec(), numbers(&[1.0, 2.0]));
}

#[test]
fn test_map_with_many_results() {
    assert_error(
        "1 { dup } map",
        ErrorKind::BuiltinRuntime,
        "Multiple values returned from map transform: [1, 1]",
    );
    assert_error(
        "'x' { 'y' } map",
        ErrorKind::BuiltinRuntime,
        "Multiple values returned from map transform: [\"x\", \"y\"]",
    );
}

#[test]
fn test_map_moves_values_out_of_the_frame() {
    let exc = assert_error(
        "1 2 { take } map",
        ErrorKind::BuiltinRuntime,
        "Parent stack is empty",
    );
    let root = &exc.frames()[0].stack;
    assert_eq!(root.len(), 3);
    assert_eq!(root[..2].to_vec(), numbers(&[1.0, 2.0]));
    assert!(matches!(root[2], StackValue::Function(_)));
}

#[test]
fn test_map_transform_cannot_consume_mapped_values() {
    let exc = eval_err("1 2 { take add } map");
    assert_eq!(exc.error().to_string(), "Parent stack is empty");
    assert_eq!(exc.frames()[0].stack[..2].to_vec(), numbers(&[1.0, 2.0]));
}

// ============================================================================
// Logic and math
// ============================================================================

#[rstest]
#[case("0 not", &[1.0])]
#[case("'x' not", &[0.0])]
#[case("'' truthify", &[0.0])]
#[case("{ } truthify", &[1.0])]
#[case("-2 truthify", &[1.0])]
#[case("3 5 min", &[3.0])]
#[case("3 5 max", &[5.0])]
#[case("1 4 range", &[1.0, 2.0, 3.0, 4.0])]
#[case("3 1 range", &[])]
#[case("-1.5 1 range", &[-1.0, 0.0, 1.0])]
#[case("1 -3 mod", &[-2.0])]
fn test_logic_and_math(#[case] source: &str, #[case] expected: &[f64]) {
    assert_numbers(source, expected);
}

#[test]
fn test_range_with_infinite_bound() {
    let exc = assert_error(
        "0 1 0 / range",
        ErrorKind::BuiltinRuntime,
        "Cannot build a range from 0 to inf",
    );
    assert_eq!(failing_stack(&exc), numbers(&[0.0, f64::INFINITY]));
}

#[test]
fn test_switchpush() {
    assert_stack("1 'a' 'b' switchpush", vec![s("a")]);
    assert_stack("0 'a' 'b' switchpush", vec![s("b")]);
    assert_stack("'' 1 'b' switchpush", vec![s("b")]);
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_string_builtins() {
    assert_stack("'foo' 'bar' +", vec![s("foobar")]);
    assert_stack("'ab' 0 mul", vec![s("")]);
    assert_stack("'ab' 2.7 mul", vec![s("abab")]);
    assert_numbers("'héllo' length", &[5.0]);
}

#[test]
fn test_repeat_infinite_times() {
    let exc = assert_error(
        "'a' 1 0 / mul",
        ErrorKind::BuiltinRuntime,
        "Cannot repeat a string inf times",
    );
    assert_eq!(failing_stack(&exc), vec![s("a"), num(f64::INFINITY)]);
}

// ============================================================================
// Console I/O
// ============================================================================

#[test]
fn test_print_writes_display_text() {
    let env = BufferedEnvironment::new();
    let runtime = Pcl::with_environment(env.clone());

    let stack = runtime.eval("1.5 print 'hi' print { } print 7").unwrap();

    assert_eq!(stack, numbers(&[7.0]));
    assert_eq!(env.output(), vec!["1.5", "hi", "{ function }"]);
}

#[test]
fn test_input_reads_lines_in_order() {
    let env = BufferedEnvironment::with_input(["alice", "bob"]);
    let runtime = Pcl::with_environment(env);

    let stack = runtime.eval("'hi ' input add input").unwrap();
    assert_eq!(stack, vec![s("hi alice"), s("bob")]);
}

#[test]
fn test_input_at_end_of_input() {
    let runtime = Pcl::with_environment(BufferedEnvironment::new());
    let exc = runtime.eval("1 input").unwrap_err();
    assert_eq!(exc.error().kind(), ErrorKind::BuiltinRuntime);
    assert_eq!(exc.error().to_string(), "End of input reached");
    assert_eq!(failing_stack(&exc), numbers(&[1.0]));
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_standard_registry_contents() {
    let registry = Registry::standard();
    for name in [
        "add", "sub", "mul", "div", "mod", "range", "not", "truthify", "min", "max",
        "switchpush", "length", "dup", "drop", "swap", "over", "rot", "keeplast", "take", "call",
        "map", "print", "input",
    ] {
        assert!(registry.contains(name), "missing builtin {}", name);
    }

    let add = registry.get("add").unwrap();
    assert_eq!(add.arity(), 2);
    assert_eq!(add.overloads().len(), 2);
    assert!(!add.takes_context());
    assert!(registry.get("take").unwrap().takes_context());
}
