//! Grammar productions, split by construct.

mod class;
mod expr;
mod function;
mod stmt;
