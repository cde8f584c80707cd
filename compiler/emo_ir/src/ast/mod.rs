//! Abstract syntax tree for Emo.
//!
//! The tree is a closed set of sum types: [`Stmt`] for statements and
//! [`Expr`] for expressions. Nodes own their children exclusively; the
//! only shared pieces are function declarations ([`FunctionDecl`]),
//! held behind `Rc` so that runtime function values can keep a body alive
//! after the program that defined it has been dropped (the REPL relies on
//! this).
//!
//! `Display` renders the canonical textual form:
//! - infix and prefix expressions are fully parenthesised,
//!   `1 + 2 * 3` renders as `(1 + (2 * 3))`
//! - `define`/`var`/`return` statements end with `;`
//! - statement keywords echo the literal stored in the node's token

mod expr;
mod stmt;

use std::fmt;

pub use expr::{
    ArrayLiteral, AssignExpr, BooleanLiteral, CallExpr, ClassExpr, ClassField, ClassMethod,
    DotExpr, Expr, FunctionDecl, FunctionDefinition, FunctionLiteral, HashLiteral, Identifier,
    IfExpr, IndexExpr, InfixExpr, InfixOp, IntegerLiteral, NewExpr, PrefixExpr, PrefixOp,
    StringLiteral, TypedField,
};
pub use stmt::{BlockStmt, DefineStmt, ExpressionStmt, ImportStmt, ReturnStmt, Stmt, VarStmt};

/// Root of a parsed source file or REPL line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Program { statements }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}

/// Write `items` separated by `sep`.
fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = T>,
    sep: &str,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
