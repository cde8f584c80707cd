//! Emo IR - shared front-end types for the Emo language.
//!
//! This crate holds the pieces every pipeline stage agrees on:
//! - [`Token`] / [`TokenKind`]: the lexical alphabet and the keyword table
//! - [`Program`], [`Stmt`], [`Expr`]: the abstract syntax tree
//!
//! Every AST node keeps the token it was built from, and every node
//! renders a canonical textual form through `Display`. Parser tests
//! compare against that form, so it must stay stable.

pub mod ast;
mod keywords;
mod token;

pub use ast::{
    ArrayLiteral, AssignExpr, BlockStmt, BooleanLiteral, CallExpr, ClassExpr, ClassField,
    ClassMethod, DefineStmt, DotExpr, Expr, ExpressionStmt, FunctionDecl, FunctionDefinition,
    FunctionLiteral, HashLiteral, Identifier, IfExpr, ImportStmt, IndexExpr, InfixExpr, InfixOp,
    IntegerLiteral, NewExpr, PrefixExpr, PrefixOp, Program, ReturnStmt, Stmt, StringLiteral,
    TypedField, VarStmt,
};
pub use keywords::{is_constant_name, lookup_ident};
pub use token::{Token, TokenKind};
