//! Parser tests.
//!
//! - `expressions`: precedence and canonical rendering of expressions
//! - `statements`: statement productions and assignment
//! - `classes`: class bodies, visibility defaults and `new`
//! - `errors`: diagnostics and recovery

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

mod classes;
mod errors;

use emo_ir::Program;

use crate::parse;

/// Parse `source`, failing the test on any syntax error.
fn parse_ok(source: &str) -> Program {
    let output = parse(source);
    assert!(
        !output.has_errors(),
        "unexpected errors for {source:?}: {:?}",
        output.errors
    );
    output.program
}

/// Rendered error messages for `source`.
fn error_messages(source: &str) -> Vec<String> {
    parse(source).errors.iter().map(ToString::to_string).collect()
}
