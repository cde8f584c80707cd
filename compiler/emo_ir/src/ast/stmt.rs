//! Statement nodes.

use std::fmt;

use super::expr::{Expr, Identifier};
use crate::Token;

/// A statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    /// `define(NAME, value)`: immutable binding.
    Define(DefineStmt),
    /// `var name = value`: mutable binding.
    Var(VarStmt),
    /// `return value`
    Return(ReturnStmt),
    /// `import target`
    Import(ImportStmt),
    /// `{ ... }`
    Block(BlockStmt),
    /// A bare expression.
    Expression(ExpressionStmt),
}

impl Stmt {
    /// The token that started this statement.
    pub fn token(&self) -> &Token {
        match self {
            Stmt::Define(s) => &s.token,
            Stmt::Var(s) => &s.token,
            Stmt::Return(s) => &s.token,
            Stmt::Import(s) => &s.token,
            Stmt::Block(s) => &s.token,
            Stmt::Expression(s) => &s.token,
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Define(s) => fmt::Display::fmt(s, f),
            Stmt::Var(s) => fmt::Display::fmt(s, f),
            Stmt::Return(s) => fmt::Display::fmt(s, f),
            Stmt::Import(s) => fmt::Display::fmt(s, f),
            Stmt::Block(s) => fmt::Display::fmt(s, f),
            Stmt::Expression(s) => fmt::Display::fmt(s, f),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DefineStmt {
    pub token: Token,
    pub name: Identifier,
    pub value: Expr,
}

impl fmt::Display for DefineStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} = {};", self.token.literal, self.name, self.value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VarStmt {
    pub token: Token,
    pub name: Identifier,
    pub value: Expr,
}

impl fmt::Display for VarStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} = {};", self.token.literal, self.name, self.value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReturnStmt {
    pub token: Token,
    /// `None` for a bare `return`.
    pub value: Option<Expr>,
}

impl fmt::Display for ReturnStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} {value};", self.token.literal),
            None => write!(f, "{};", self.token.literal),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImportStmt {
    pub token: Token,
    pub target: Expr,
}

impl fmt::Display for ImportStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {};", self.token.literal, self.target)
    }
}

/// A brace-delimited statement sequence.
///
/// Blocks carry no scope of their own; the evaluator decides where new
/// environments begin.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockStmt {
    pub token: Token,
    pub statements: Vec<Stmt>,
}

impl fmt::Display for BlockStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return f.write_str("{ }");
        }
        f.write_str("{ ")?;
        super::write_joined(f, &self.statements, " ")?;
        f.write_str(" }")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExpressionStmt {
    pub token: Token,
    pub expression: Expr,
}

impl fmt::Display for ExpressionStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.expression, f)
    }
}
