//! Tree-walking interpreter.
//!
//! The interpreter threads an [`Environment`] handle through every node.
//! Blocks evaluate in the environment they are given; only function calls
//! and class instantiation open new scopes. Non-local exits (`return` and
//! runtime errors) travel on the `Err` side of [`EvalResult`] so `?`
//! short-circuits every composite expression.

mod call;
mod class;
mod collections;

use std::rc::Rc;

use emo_ir::{AssignExpr, BlockStmt, Expr, IfExpr, Program, Stmt};
use emo_stack::ensure_sufficient_stack;
use tracing::{debug, trace};

use crate::errors::{
    cannot_assign_immutable, constant_redefinition, invalid_assign_target, undefined_variable,
};
use crate::operators::{evaluate_infix, evaluate_prefix};
use crate::{
    AssignError, ControlAction, Environment, EvalError, EvalResult, FunctionValue, Mutability,
    Value,
};

/// Embedder-facing evaluation limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvalOptions {
    max_call_depth: usize,
}

impl EvalOptions {
    pub const DEFAULT_MAX_CALL_DEPTH: usize = 2048;

    pub fn new() -> Self {
        EvalOptions {
            max_call_depth: Self::DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Limit on nested function calls before evaluation fails.
    #[must_use]
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }
}

impl Default for EvalOptions {
    fn default() -> Self {
        EvalOptions::new()
    }
}

/// Evaluation state for one program run.
pub struct Interpreter {
    options: EvalOptions,
    call_depth: usize,
}

impl Interpreter {
    pub fn new(options: EvalOptions) -> Self {
        Interpreter {
            options,
            call_depth: 0,
        }
    }

    /// Evaluate a whole program and surface its outcome as a value.
    ///
    /// The result is the value of the last statement. A `return` outside
    /// any function stops the program with the returned value; a runtime
    /// error stops it with [`Value::Error`].
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.statements.len()))]
    pub fn eval_program(&mut self, program: &Program, env: &Environment) -> Value {
        let mut result = Value::Null;
        for stmt in &program.statements {
            match self.eval_statement(stmt, env) {
                Ok(value) => result = value,
                Err(ControlAction::Return(value)) => return value,
                Err(ControlAction::Error(error)) => {
                    debug!(%error, "evaluation failed");
                    return Value::Error(error);
                }
            }
        }
        result
    }

    // Statements

    fn eval_statement(&mut self, stmt: &Stmt, env: &Environment) -> EvalResult {
        trace!(%stmt, "eval statement");
        match stmt {
            Stmt::Define(define) => {
                let value = self.eval_expr(&define.value, env)?;
                bind(env, define.name.as_str(), value, Mutability::Immutable)?;
                Ok(Value::Null)
            }
            Stmt::Var(var) => {
                let value = self.eval_expr(&var.value, env)?;
                bind(env, var.name.as_str(), value, Mutability::Mutable)?;
                Ok(Value::Null)
            }
            Stmt::Return(ret) => {
                let value = match &ret.value {
                    Some(value) => self.eval_expr(value, env)?,
                    None => Value::Null,
                };
                Err(ControlAction::Return(value))
            }
            Stmt::Import(import) => {
                debug!(import = %import.target, "import skipped");
                Ok(Value::Null)
            }
            Stmt::Block(block) => self.eval_block(block, env),
            Stmt::Expression(stmt) => self.eval_expr(&stmt.expression, env),
        }
    }

    /// Evaluate statements in order; the block's value is the last one's.
    pub(crate) fn eval_block(&mut self, block: &BlockStmt, env: &Environment) -> EvalResult {
        let mut result = Value::Null;
        for stmt in &block.statements {
            result = self.eval_statement(stmt, env)?;
        }
        Ok(result)
    }

    // Expressions

    pub(crate) fn eval_expr(&mut self, expr: &Expr, env: &Environment) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr, env))
    }

    fn eval_expr_inner(&mut self, expr: &Expr, env: &Environment) -> EvalResult {
        match expr {
            Expr::Identifier(ident) => env
                .lookup(ident.as_str())
                .ok_or_else(|| undefined_variable(ident.as_str()).into()),
            Expr::Integer(literal) => Ok(Value::Integer(literal.value)),
            Expr::Str(literal) => Ok(Value::string(&literal.value)),
            Expr::Boolean(literal) => Ok(Value::Boolean(literal.value)),
            Expr::Prefix(prefix) => {
                let operand = self.eval_expr(&prefix.right, env)?;
                Ok(evaluate_prefix(prefix.op, operand)?)
            }
            Expr::Infix(infix) => {
                let left = self.eval_expr(&infix.left, env)?;
                let right = self.eval_expr(&infix.right, env)?;
                Ok(evaluate_infix(infix.op, left, right)?)
            }
            Expr::If(if_expr) => self.eval_if(if_expr, env),
            Expr::FunctionLiteral(literal) => Ok(Value::Function(Rc::new(FunctionValue {
                name: None,
                decl: Rc::clone(&literal.decl),
                env: env.clone(),
            }))),
            Expr::FunctionDefinition(definition) => {
                let name = definition.name.as_str();
                let function = Value::Function(Rc::new(FunctionValue {
                    name: Some(name.to_string()),
                    decl: Rc::clone(&definition.decl),
                    env: env.clone(),
                }));
                bind(env, name, function.clone(), Mutability::Mutable)?;
                Ok(function)
            }
            Expr::Call(call) => self.eval_call(call, env),
            Expr::Index(index) => self.eval_index(index, env),
            Expr::Dot(dot) => self.eval_member(dot, env),
            Expr::Array(array) => self.eval_array(array, env),
            Expr::Hash(hash) => self.eval_hash(hash, env),
            Expr::Class(class) => self.eval_class(class, env),
            Expr::New(new) => self.eval_new(new, env),
            Expr::Assign(assign) => self.eval_assign(assign, env),
        }
    }

    fn eval_if(&mut self, if_expr: &IfExpr, env: &Environment) -> EvalResult {
        let condition = self.eval_expr(&if_expr.condition, env)?;
        if condition.is_truthy() {
            self.eval_block(&if_expr.consequence, env)
        } else if let Some(alternative) = &if_expr.alternative {
            self.eval_block(alternative, env)
        } else {
            Ok(Value::Null)
        }
    }

    fn eval_assign(&mut self, assign: &AssignExpr, env: &Environment) -> EvalResult {
        match &*assign.target {
            Expr::Identifier(ident) => {
                let name = ident.as_str();
                let value = self.eval_expr(&assign.value, env)?;
                env.assign(name, value.clone()).map_err(|error| match error {
                    AssignError::Undefined => undefined_variable(name),
                    AssignError::Immutable => cannot_assign_immutable(name),
                })?;
                Ok(value)
            }
            Expr::Dot(dot) => self.eval_member_assign(dot, &assign.value, env),
            other => Err(invalid_assign_target(&other.to_string()).into()),
        }
    }
}

/// Define `name` in `env`, failing if a constant already holds the name.
fn bind(
    env: &Environment,
    name: &str,
    value: Value,
    mutability: Mutability,
) -> Result<(), EvalError> {
    env.define(name, value, mutability)
        .map_err(|_| constant_redefinition(name))
}
