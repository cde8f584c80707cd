//! Prefix and infix operator semantics.
//!
//! The operand kinds are fixed, so dispatch is a plain `match` over value
//! pairs. Operators never see `ControlAction`: they either produce a value
//! or fail with an [`EvalError`].

use std::rc::Rc;

use emo_ir::{InfixOp, PrefixOp};

use crate::errors::{
    binary_type_mismatch, division_by_zero, integer_overflow, invalid_binary_op,
    invalid_unary_op,
};
use crate::{EvalError, Value};

/// Checked integer arithmetic: `None` from the checked op is an overflow.
#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> Result<Value, EvalError> {
    result.map(Value::Integer).ok_or_else(|| integer_overflow(op_name))
}

/// Evaluate `op operand`.
#[expect(
    clippy::needless_pass_by_value,
    reason = "operands arrive as owned values from the evaluator"
)]
pub fn evaluate_prefix(op: PrefixOp, operand: Value) -> Result<Value, EvalError> {
    match (op, &operand) {
        (PrefixOp::Not, _) => Ok(Value::Boolean(!operand.is_truthy())),
        (PrefixOp::Neg, Value::Integer(n)) => checked_arith(n.checked_neg(), "negation"),
        (PrefixOp::Neg, _) => Err(invalid_unary_op(op, operand.type_name())),
    }
}

/// Evaluate `left op right`.
#[expect(
    clippy::needless_pass_by_value,
    reason = "operands arrive as owned values from the evaluator"
)]
pub fn evaluate_infix(op: InfixOp, left: Value, right: Value) -> Result<Value, EvalError> {
    match (&left, &right) {
        (Value::Integer(a), Value::Integer(b)) => eval_int_infix(*a, *b, op),
        (Value::Str(a), Value::Str(b)) => eval_string_infix(a, b, op),
        (Value::Boolean(a), Value::Boolean(b)) => match op {
            InfixOp::Eq => Ok(Value::Boolean(a == b)),
            InfixOp::NotEq => Ok(Value::Boolean(a != b)),
            _ => Err(invalid_binary_op(left.type_name(), op, right.type_name())),
        },
        _ => match op {
            InfixOp::Eq => Ok(Value::Boolean(left.equals(&right))),
            InfixOp::NotEq => Ok(Value::Boolean(!left.equals(&right))),
            _ if left.type_name() == right.type_name() => {
                Err(invalid_binary_op(left.type_name(), op, right.type_name()))
            }
            _ => Err(binary_type_mismatch(left.type_name(), op, right.type_name())),
        },
    }
}

fn eval_int_infix(a: i64, b: i64, op: InfixOp) -> Result<Value, EvalError> {
    match op {
        InfixOp::Add => checked_arith(a.checked_add(b), "addition"),
        InfixOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        InfixOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        InfixOp::Div => {
            if b == 0 {
                Err(division_by_zero())
            } else {
                checked_arith(a.checked_div(b), "division")
            }
        }
        InfixOp::Lt => Ok(Value::Boolean(a < b)),
        InfixOp::Gt => Ok(Value::Boolean(a > b)),
        InfixOp::Eq => Ok(Value::Boolean(a == b)),
        InfixOp::NotEq => Ok(Value::Boolean(a != b)),
    }
}

fn eval_string_infix(a: &Rc<str>, b: &Rc<str>, op: InfixOp) -> Result<Value, EvalError> {
    match op {
        InfixOp::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::Str(Rc::from(joined)))
        }
        InfixOp::Eq => Ok(Value::Boolean(a == b)),
        InfixOp::NotEq => Ok(Value::Boolean(a != b)),
        _ => Err(invalid_binary_op("STRING", op, "STRING")),
    }
}
