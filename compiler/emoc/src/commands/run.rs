//! `emo run <file>`.

use std::io::{self, Write};

use emo_eval::{evaluate, Environment, Value};

use super::{read_file, CommandError, RunStatus};

/// Run a script file, writing results to stdout and problems to stderr.
pub fn run_file(path: &str) -> Result<RunStatus, CommandError> {
    let source = read_file(path)?;
    let stdout = io::stdout();
    let stderr = io::stderr();
    run_source(&source, &mut stdout.lock(), &mut stderr.lock())
}

/// Parse and evaluate `source` in a fresh environment.
///
/// Parse errors are written to `err` as `Err: <message>` and nothing is
/// evaluated. Otherwise the final value goes to `out` unless it is null;
/// a runtime error goes to `err`.
pub fn run_source(
    source: &str,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<RunStatus, CommandError> {
    let output = emo_parse::parse(source);
    if output.has_errors() {
        for error in &output.errors {
            writeln!(err, "Err: {error}")?;
        }
        return Ok(RunStatus::ParseFailed);
    }

    let env = Environment::new();
    match evaluate(&output.program, &env) {
        Value::Null => Ok(RunStatus::Success),
        value @ Value::Error(_) => {
            writeln!(err, "{value}")?;
            Ok(RunStatus::RuntimeError)
        }
        value => {
            writeln!(out, "{value}")?;
            Ok(RunStatus::Success)
        }
    }
}
