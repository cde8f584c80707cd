//! Function calls.

use emo_ir::CallExpr;
use tracing::debug;

use super::{bind, Interpreter};
use crate::errors::{not_callable, recursion_limit_exceeded, wrong_function_args};
use crate::{ControlAction, Environment, EvalResult, Mutability, Value};

impl Interpreter {
    /// Evaluate the callee, then the arguments left to right, then call.
    pub(super) fn eval_call(&mut self, call: &CallExpr, env: &Environment) -> EvalResult {
        let function = self.eval_expr(&call.function, env)?;
        let arguments = self.eval_expressions(&call.arguments, env)?;
        self.apply_function(&function, arguments)
    }

    /// Call `function` with already evaluated arguments.
    ///
    /// The body runs in a new scope enclosed by the function's captured
    /// environment. A `return` inside the body stops here.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn apply_function(&mut self, function: &Value, arguments: Vec<Value>) -> EvalResult {
        let Value::Function(function) = function else {
            return Err(not_callable(function.type_name()).into());
        };

        let expected = function.decl.arity();
        if arguments.len() != expected {
            return Err(wrong_function_args(expected, arguments.len()).into());
        }
        let limit = self.options.max_call_depth();
        if self.call_depth >= limit {
            return Err(recursion_limit_exceeded(limit).into());
        }

        let call_env = Environment::new_enclosed(&function.env);
        for (param, argument) in function.decl.parameters.iter().zip(arguments) {
            bind(&call_env, param.name.as_str(), argument, Mutability::Mutable)?;
        }

        debug!(
            function = function.name.as_deref().unwrap_or("<anonymous>"),
            depth = self.call_depth,
            "call"
        );
        self.call_depth += 1;
        let result = self.eval_block(&function.decl.body, &call_env);
        self.call_depth -= 1;

        match result {
            Err(ControlAction::Return(value)) => Ok(value),
            other => other,
        }
    }
}
