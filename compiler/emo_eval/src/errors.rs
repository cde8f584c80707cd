//! Runtime errors and the evaluation control channel.
//!
//! `EvalErrorKind` gives each failure a structured category; the factory
//! functions below are the way the evaluator builds errors, and they fill
//! in both `kind` and the rendered `message`.

use emo_ir::{InfixOp, PrefixOp};

use crate::Value;

/// Result of evaluating a node.
///
/// The error side carries both runtime errors and `return` unwinding, so
/// `?` propagates either one to the nearest function-call boundary.
pub type EvalResult<T = Value> = Result<T, ControlAction>;

/// Non-local exits from a block.
#[derive(Clone, Debug)]
pub enum ControlAction {
    /// A `return` statement unwinding to its call boundary.
    Return(Value),
    /// A runtime error unwinding to the top of the program.
    Error(EvalError),
}

impl From<EvalError> for ControlAction {
    #[inline]
    fn from(error: EvalError) -> Self {
        ControlAction::Error(error)
    }
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Bindings
    #[error("identifier not found: {name}")]
    UndefinedVariable { name: String },
    #[error("cannot assign to constant: {name}")]
    ImmutableBinding { name: String },
    #[error("cannot redefine constant: {name}")]
    ConstantRedefinition { name: String },
    #[error("invalid assignment target: {target}")]
    InvalidAssignTarget { target: String },

    // Operators
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: &'static str },
    #[error("type mismatch: {left} {op} {right}")]
    TypeMismatch {
        left: &'static str,
        op: InfixOp,
        right: &'static str,
    },
    #[error("unknown operator: {left} {op} {right}")]
    UnknownInfixOperator {
        left: &'static str,
        op: InfixOp,
        right: &'static str,
    },
    #[error("unknown operator: {op}{operand}")]
    UnknownPrefixOperator { op: PrefixOp, operand: &'static str },

    // Calls
    #[error("not a function: {type_name}")]
    NotCallable { type_name: &'static str },
    #[error("wrong number of arguments: expected {expected}, got {got}")]
    ArityMismatch { expected: usize, got: usize },
    #[error("maximum recursion depth exceeded (limit: {limit})")]
    RecursionLimit { limit: usize },

    // Indexing
    #[error("index out of bounds: {index} (length {len})")]
    IndexOutOfBounds { index: i64, len: usize },
    #[error("index operator not supported: {receiver}[{index}]")]
    CannotIndex {
        receiver: &'static str,
        index: &'static str,
    },
    #[error("unusable as hash key: {type_name}")]
    UnhashableKey { type_name: &'static str },

    // Classes
    #[error("member access on non-instance: {type_name}")]
    NotAnInstance { type_name: &'static str },
    #[error("undefined member `{member}` on {class}")]
    UndefinedMember { member: String, class: String },
    #[error("cannot access private member `{member}` of {class}")]
    PrivateMember { member: String, class: String },
    #[error("cannot assign to method `{member}` of {class}")]
    MethodAssignment { member: String, class: String },
    #[error("not a class: {type_name}")]
    NotAClass { type_name: &'static str },
    #[error("new expects a HASH initializer, got {type_name}")]
    InvalidInitializer { type_name: &'static str },
    #[error("field names in new must be STRING, got {type_name}")]
    InvalidFieldKey { type_name: &'static str },
    #[error("unknown field `{field}` for class {class}")]
    UnknownField { field: String, class: String },
}

/// A runtime error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()`.
    pub message: String,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError { kind, message }
    }
}

// Bindings

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn cannot_assign_immutable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ImmutableBinding {
        name: name.to_string(),
    })
}

#[cold]
pub fn constant_redefinition(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConstantRedefinition {
        name: name.to_string(),
    })
}

#[cold]
pub fn invalid_assign_target(target: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidAssignTarget {
        target: target.to_string(),
    })
}

// Operators

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { operation })
}

/// Operands of different kinds.
#[cold]
pub fn binary_type_mismatch(left: &'static str, op: InfixOp, right: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch { left, op, right })
}

/// Operands of one kind that do not support `op`.
#[cold]
pub fn invalid_binary_op(left: &'static str, op: InfixOp, right: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownInfixOperator { left, op, right })
}

#[cold]
pub fn invalid_unary_op(op: PrefixOp, operand: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownPrefixOperator { op, operand })
}

// Calls

#[cold]
pub fn not_callable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable { type_name })
}

#[cold]
pub fn wrong_function_args(expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch { expected, got })
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { limit })
}

// Indexing

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn cannot_index(receiver: &'static str, index: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CannotIndex { receiver, index })
}

#[cold]
pub fn unhashable_key(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnhashableKey { type_name })
}

// Classes

#[cold]
pub fn not_an_instance(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAnInstance { type_name })
}

#[cold]
pub fn undefined_member(member: &str, class: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedMember {
        member: member.to_string(),
        class: class.to_string(),
    })
}

#[cold]
pub fn private_member(member: &str, class: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::PrivateMember {
        member: member.to_string(),
        class: class.to_string(),
    })
}

#[cold]
pub fn method_assignment(member: &str, class: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MethodAssignment {
        member: member.to_string(),
        class: class.to_string(),
    })
}

#[cold]
pub fn not_a_class(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAClass { type_name })
}

#[cold]
pub fn invalid_initializer(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidInitializer { type_name })
}

#[cold]
pub fn invalid_field_key(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidFieldKey { type_name })
}

#[cold]
pub fn unknown_field(field: &str, class: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownField {
        field: field.to_string(),
        class: class.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_matches_kind_display() {
        let error = division_by_zero();
        assert_eq!(error.kind, EvalErrorKind::DivisionByZero);
        assert_eq!(error.message, "division by zero");
        assert_eq!(error.to_string(), error.message);
    }

    #[test]
    fn operator_messages() {
        assert_eq!(
            binary_type_mismatch("INTEGER", InfixOp::Add, "STRING").message,
            "type mismatch: INTEGER + STRING"
        );
        assert_eq!(
            invalid_binary_op("STRING", InfixOp::Sub, "STRING").message,
            "unknown operator: STRING - STRING"
        );
        assert_eq!(
            invalid_unary_op(PrefixOp::Neg, "BOOLEAN").message,
            "unknown operator: -BOOLEAN"
        );
        assert_eq!(
            integer_overflow("negation").message,
            "integer overflow in negation"
        );
    }

    #[test]
    fn class_messages() {
        assert_eq!(
            private_member("secret", "Point").message,
            "cannot access private member `secret` of Point"
        );
        assert_eq!(
            unknown_field("z", "Point").message,
            "unknown field `z` for class Point"
        );
    }

    #[test]
    fn eval_error_converts_to_control_action() {
        let action: ControlAction = undefined_variable("x").into();
        assert!(matches!(
            action,
            ControlAction::Error(EvalError {
                kind: EvalErrorKind::UndefinedVariable { .. },
                ..
            })
        ));
    }
}
