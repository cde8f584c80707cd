//! `emo repl`: one persistent environment, one line at a time.

use std::io::{BufRead, Write};

use emo_eval::{evaluate, Environment, Value};

use super::CommandError;

const PROMPT: &str = ">> ";

/// Read lines from `input` until end of input, evaluating each one.
///
/// Bindings made on one line are visible on the next. A line with parse
/// errors is reported and skipped. Null results print nothing.
pub fn repl(input: &mut impl BufRead, output: &mut impl Write) -> Result<(), CommandError> {
    let env = Environment::new();
    let mut line = String::new();

    loop {
        output.write_all(PROMPT.as_bytes())?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(());
        }

        let parsed = emo_parse::parse(&line);
        if parsed.has_errors() {
            for error in &parsed.errors {
                writeln!(output, "Err: {error}")?;
            }
            continue;
        }

        let value = evaluate(&parsed.program, &env);
        if !matches!(value, Value::Null) {
            writeln!(output, "{value}")?;
        }
    }
}
