//! Tree-walking evaluator for Emo.
//!
//! - [`Value`]: the runtime object model
//! - [`Environment`]: shared, chained scopes
//! - [`EvalError`] / [`ControlAction`]: runtime errors and `return` unwinding
//! - [`Interpreter`]: the evaluator itself
//!
//! Most callers only need [`evaluate`]:
//!
//! ```text
//! let output = emo_parse::parse(source);
//! let env = Environment::new();
//! let value = emo_eval::evaluate(&output.program, &env);
//! ```
//!
//! Runtime errors come back as [`Value::Error`]. A program with parse
//! errors must not be evaluated.

mod environment;
pub mod errors;
mod interpreter;
mod operators;
mod value;

pub use environment::{AssignError, Environment, Mutability};
pub use errors::{ControlAction, EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{EvalOptions, Interpreter};
pub use operators::{evaluate_infix, evaluate_prefix};
pub use value::{ClassValue, FunctionValue, HashKey, HashValue, InstanceValue, Value};

use emo_ir::Program;

/// Evaluate `program` in `env` with default options.
pub fn evaluate(program: &Program, env: &Environment) -> Value {
    evaluate_with(EvalOptions::default(), program, env)
}

/// Evaluate `program` in `env` with explicit options.
pub fn evaluate_with(options: EvalOptions, program: &Program, env: &Environment) -> Value {
    Interpreter::new(options).eval_program(program, env)
}

#[cfg(test)]
mod tests;
