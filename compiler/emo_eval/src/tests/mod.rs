//! End-to-end language tests: source text in, runtime value out.
//!
//! - `expressions`: operators, conditionals, statement sequencing
//! - `bindings`: `var`, `define`, assignment, imports
//! - `functions`: calls, closures, recursion, `return`
//! - `collections`: arrays, hashes, indexing
//! - `classes`: instantiation, members, visibility
//! - `errors`: runtime error propagation
//! - `nesting`: deep input at and beyond the parser's nesting limit

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

mod bindings;
mod classes;
mod errors;
mod expressions;

use emo_ir::Program;

use crate::{evaluate, Environment, EvalErrorKind, Value};

/// Parse `source`, failing the test on any syntax error.
fn parse_program(source: &str) -> Program {
    let output = emo_parse::parse(source);
    assert!(
        !output.has_errors(),
        "unexpected parse errors for {source:?}: {:?}",
        output.errors
    );
    output.program
}

/// Evaluate `source` in `env`.
fn run_in(source: &str, env: &Environment) -> Value {
    evaluate(&parse_program(source), env)
}

/// Evaluate `source` in a fresh environment.
fn run(source: &str) -> Value {
    run_in(source, &Environment::new())
}

/// Display form of the result of `source`.
fn run_display(source: &str) -> String {
    run(source).to_string()
}

/// The runtime error `source` fails with.
fn run_error(source: &str) -> EvalErrorKind {
    match run(source) {
        Value::Error(error) => error.kind,
        other => panic!("expected a runtime error for {source:?}, got {other}"),
    }
}

fn assert_displays(cases: &[(&str, &str)]) {
    for (source, expected) in cases {
        pretty_assertions::assert_eq!(run_display(source), *expected, "source: {source:?}");
    }
}
