use emo_ir::{InfixOp, PrefixOp};
use pretty_assertions::assert_eq;

use super::{run_display, run_error, run_in};
use crate::{Environment, EvalErrorKind, Value};

#[test]
fn test_operator_errors() {
    assert_eq!(
        run_error(r#"1 + "s""#),
        EvalErrorKind::TypeMismatch {
            left: "INTEGER",
            op: InfixOp::Add,
            right: "STRING"
        }
    );
    assert_eq!(
        run_error(r#""a" - "b""#),
        EvalErrorKind::UnknownInfixOperator {
            left: "STRING",
            op: InfixOp::Sub,
            right: "STRING"
        }
    );
    assert_eq!(
        run_error("true + false"),
        EvalErrorKind::UnknownInfixOperator {
            left: "BOOLEAN",
            op: InfixOp::Add,
            right: "BOOLEAN"
        }
    );
    assert_eq!(
        run_error("-true"),
        EvalErrorKind::UnknownPrefixOperator {
            op: PrefixOp::Neg,
            operand: "BOOLEAN"
        }
    );
    assert_eq!(run_error("10 / (5 - 5)"), EvalErrorKind::DivisionByZero);
}

#[test]
fn test_error_display() {
    assert_eq!(run_display("foobar"), "ERROR: identifier not found: foobar");
    assert_eq!(
        run_display(r#"5 + true; 5"#),
        "ERROR: type mismatch: INTEGER + BOOLEAN"
    );
}

#[test]
fn test_errors_short_circuit_enclosing_expressions() {
    assert_eq!(
        run_display("if (10 > 1) { true + false; 10 }"),
        "ERROR: unknown operator: BOOLEAN + BOOLEAN"
    );
    assert_eq!(
        run_display("-true + 5"),
        "ERROR: unknown operator: -BOOLEAN"
    );
    assert_eq!(
        run_display("[1, 1 + true, 3]"),
        "ERROR: type mismatch: INTEGER + BOOLEAN"
    );
    assert_eq!(
        run_display("func f() { 1 + true }\nf() + 1"),
        "ERROR: type mismatch: INTEGER + BOOLEAN"
    );
}

#[test]
fn test_argument_error_skips_the_call() {
    let env = Environment::new();
    let source = "\
var calls = 0
func f(x: Int) { calls = calls + 1; x }
f(1 + \"s\")";
    assert!(run_in(source, &env).is_error());
    assert!(matches!(env.lookup("calls"), Some(Value::Integer(0))));
}

#[test]
fn test_arguments_stop_at_the_first_error() {
    let env = Environment::new();
    let source = "\
var hits = 0
func hit() { hits = hits + 1; hits }
func pair(a: Int, b: Int) { a }
pair(missing, hit())";
    match run_in(source, &env) {
        Value::Error(error) => assert_eq!(
            error.kind,
            EvalErrorKind::UndefinedVariable {
                name: "missing".to_string()
            }
        ),
        other => panic!("expected error, got {other}"),
    }
    assert!(matches!(env.lookup("hits"), Some(Value::Integer(0))));
}

#[test]
fn test_error_stops_the_block() {
    let env = Environment::new();
    let source = "var after = 0\nif (true) { 1 + true; after = 1 }\nafter = 2";
    assert!(run_in(source, &env).is_error());
    assert!(matches!(env.lookup("after"), Some(Value::Integer(0))));
}

#[test]
fn test_self_outside_a_method() {
    assert_eq!(
        run_error("self"),
        EvalErrorKind::UndefinedVariable {
            name: "self".to_string()
        }
    );
}
