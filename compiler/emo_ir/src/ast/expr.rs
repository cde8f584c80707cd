//! Expression nodes.

use std::fmt;
use std::rc::Rc;

use super::stmt::BlockStmt;
use super::write_joined;
use crate::Token;

/// An expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Str(StringLiteral),
    Boolean(BooleanLiteral),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
    If(IfExpr),
    FunctionLiteral(FunctionLiteral),
    FunctionDefinition(FunctionDefinition),
    Call(CallExpr),
    Index(IndexExpr),
    Dot(DotExpr),
    Array(ArrayLiteral),
    Hash(HashLiteral),
    Class(ClassExpr),
    New(NewExpr),
    Assign(AssignExpr),
}

impl Expr {
    /// The token that started this expression (the operator token for
    /// infix-built nodes).
    pub fn token(&self) -> &Token {
        match self {
            Expr::Identifier(e) => &e.token,
            Expr::Integer(e) => &e.token,
            Expr::Str(e) => &e.token,
            Expr::Boolean(e) => &e.token,
            Expr::Prefix(e) => &e.token,
            Expr::Infix(e) => &e.token,
            Expr::If(e) => &e.token,
            Expr::FunctionLiteral(e) => &e.token,
            Expr::FunctionDefinition(e) => &e.token,
            Expr::Call(e) => &e.token,
            Expr::Index(e) => &e.token,
            Expr::Dot(e) => &e.token,
            Expr::Array(e) => &e.token,
            Expr::Hash(e) => &e.token,
            Expr::Class(e) => &e.token,
            Expr::New(e) => &e.token,
            Expr::Assign(e) => &e.token,
        }
    }

    /// Returns the identifier if this expression is a bare name.
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Expr::Identifier(ident) => Some(ident),
            _ => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(e) => fmt::Display::fmt(e, f),
            Expr::Integer(e) => fmt::Display::fmt(e, f),
            Expr::Str(e) => fmt::Display::fmt(e, f),
            Expr::Boolean(e) => fmt::Display::fmt(e, f),
            Expr::Prefix(e) => fmt::Display::fmt(e, f),
            Expr::Infix(e) => fmt::Display::fmt(e, f),
            Expr::If(e) => fmt::Display::fmt(e, f),
            Expr::FunctionLiteral(e) => fmt::Display::fmt(e, f),
            Expr::FunctionDefinition(e) => fmt::Display::fmt(e, f),
            Expr::Call(e) => fmt::Display::fmt(e, f),
            Expr::Index(e) => fmt::Display::fmt(e, f),
            Expr::Dot(e) => fmt::Display::fmt(e, f),
            Expr::Array(e) => fmt::Display::fmt(e, f),
            Expr::Hash(e) => fmt::Display::fmt(e, f),
            Expr::Class(e) => fmt::Display::fmt(e, f),
            Expr::New(e) => fmt::Display::fmt(e, f),
            Expr::Assign(e) => fmt::Display::fmt(e, f),
        }
    }
}

// Leaves

/// A name. Also produced for `self`, whose value is the keyword text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl Identifier {
    pub fn new(token: Token) -> Self {
        let value = token.literal.clone();
        Identifier { token, value }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

impl fmt::Display for IntegerLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token.literal)
    }
}

/// A string literal; `value` is the text between the quotes.
#[derive(Clone, Debug, PartialEq)]
pub struct StringLiteral {
    pub token: Token,
    pub value: String,
}

impl fmt::Display for StringLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

impl fmt::Display for BooleanLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token.literal)
    }
}

// Operators

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrefixOp {
    /// `!`
    Not,
    /// `-`
    Neg,
}

impl PrefixOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            PrefixOp::Not => "!",
            PrefixOp::Neg => "-",
        }
    }
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Gt,
    Eq,
    NotEq,
}

impl InfixOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            InfixOp::Add => "+",
            InfixOp::Sub => "-",
            InfixOp::Mul => "*",
            InfixOp::Div => "/",
            InfixOp::Lt => "<",
            InfixOp::Gt => ">",
            InfixOp::Eq => "==",
            InfixOp::NotEq => "!=",
        }
    }
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PrefixExpr {
    pub token: Token,
    pub op: PrefixOp,
    pub right: Box<Expr>,
}

impl fmt::Display for PrefixExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{})", self.op, self.right)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InfixExpr {
    pub token: Token,
    pub op: InfixOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

impl fmt::Display for InfixExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.op, self.right)
    }
}

// Control flow

/// `if cond { ... } else { ... }`: evaluates to the taken branch.
#[derive(Clone, Debug, PartialEq)]
pub struct IfExpr {
    pub token: Token,
    pub condition: Box<Expr>,
    pub consequence: BlockStmt,
    pub alternative: Option<BlockStmt>,
}

impl fmt::Display for IfExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if {} {}", self.condition, self.consequence)?;
        if let Some(alternative) = &self.alternative {
            write!(f, " else {alternative}")?;
        }
        Ok(())
    }
}

// Functions

/// `name: Type`, used for parameters and class fields.
///
/// The declared type is recorded but never checked.
#[derive(Clone, Debug, PartialEq)]
pub struct TypedField {
    pub name: Identifier,
    pub type_name: Identifier,
}

impl fmt::Display for TypedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.type_name)
    }
}

/// Parameters, declared return types and body shared by function
/// literals, function definitions and class methods.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    pub parameters: Vec<TypedField>,
    /// Empty when no `->` clause was written.
    pub return_types: Vec<Identifier>,
    pub body: BlockStmt,
}

impl FunctionDecl {
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

impl fmt::Display for FunctionDecl {
    /// Renders `(a: Int, b: Int) -> Int { body }`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        write_joined(f, &self.parameters, ", ")?;
        f.write_str(")")?;
        match self.return_types.as_slice() {
            [] => {}
            [single] => write!(f, " -> {single}")?,
            many => {
                f.write_str(" -> (")?;
                write_joined(f, many, ", ")?;
                f.write_str(")")?;
            }
        }
        write!(f, " {}", self.body)
    }
}

/// Anonymous function: `func(a: Int) -> Int { ... }`.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionLiteral {
    pub token: Token,
    pub decl: Rc<FunctionDecl>,
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.token.literal, self.decl)
    }
}

/// Named function: `func add(a: Int, b: Int) -> Int { ... }`.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDefinition {
    pub token: Token,
    pub name: Identifier,
    pub decl: Rc<FunctionDecl>,
}

impl fmt::Display for FunctionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{}", self.token.literal, self.name, self.decl)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CallExpr {
    /// The `(` token.
    pub token: Token,
    pub function: Box<Expr>,
    pub arguments: Vec<Expr>,
}

impl fmt::Display for CallExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.function)?;
        write_joined(f, &self.arguments, ", ")?;
        f.write_str(")")
    }
}

// Access

#[derive(Clone, Debug, PartialEq)]
pub struct IndexExpr {
    /// The `[` token.
    pub token: Token,
    pub left: Box<Expr>,
    pub index: Box<Expr>,
}

impl fmt::Display for IndexExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}[{}])", self.left, self.index)
    }
}

/// Member access: `left.right`.
#[derive(Clone, Debug, PartialEq)]
pub struct DotExpr {
    /// The `.` token.
    pub token: Token,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

impl DotExpr {
    /// The member name, when the right-hand side is a plain identifier.
    pub fn member(&self) -> Option<&Identifier> {
        self.right.as_identifier()
    }

    /// Returns `true` when the receiver is written as `self`.
    pub fn is_self_access(&self) -> bool {
        matches!(&*self.left, Expr::Identifier(ident) if ident.token.kind == crate::TokenKind::SelfLower)
    }
}

impl fmt::Display for DotExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}.{})", self.left, self.right)
    }
}

// Collections

#[derive(Clone, Debug, PartialEq)]
pub struct ArrayLiteral {
    pub token: Token,
    pub elements: Vec<Expr>,
}

impl fmt::Display for ArrayLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        write_joined(f, &self.elements, ", ")?;
        f.write_str("]")
    }
}

/// `{key: value, ...}`. Pair order is kept for display only.
#[derive(Clone, Debug, PartialEq)]
pub struct HashLiteral {
    pub token: Token,
    pub pairs: Vec<(Expr, Expr)>,
}

impl fmt::Display for HashLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        write_joined(
            f,
            self.pairs.iter().map(|(key, value)| format!("{key}: {value}")),
            ", ",
        )?;
        f.write_str("}")
    }
}

// Classes

#[derive(Clone, Debug, PartialEq)]
pub struct ClassField {
    pub public: bool,
    pub field: TypedField,
}

impl ClassField {
    pub fn name(&self) -> &str {
        self.field.name.as_str()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassMethod {
    pub public: bool,
    pub function: FunctionDefinition,
}

impl ClassMethod {
    pub fn name(&self) -> &str {
        self.function.name.as_str()
    }
}

/// `class Name { var x: Int  func get() -> Int { ... } }`.
///
/// Member names are unique across fields and methods; the parser rejects
/// duplicates.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassExpr {
    pub token: Token,
    pub name: Identifier,
    pub fields: Vec<ClassField>,
    pub methods: Vec<ClassMethod>,
}

impl ClassExpr {
    pub fn field(&self, name: &str) -> Option<&ClassField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn method(&self, name: &str) -> Option<&ClassMethod> {
        self.methods.iter().find(|m| m.name() == name)
    }

    /// Returns `true` if a field or method with this name is declared.
    pub fn declares(&self, name: &str) -> bool {
        self.field(name).is_some() || self.method(name).is_some()
    }
}

impl fmt::Display for ClassExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {}>", self.token.literal, self.name)
    }
}

/// `new(Class)` or `new(Class, data)`.
#[derive(Clone, Debug, PartialEq)]
pub struct NewExpr {
    pub token: Token,
    pub class: Identifier,
    pub data: Option<Box<Expr>>,
}

impl fmt::Display for NewExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}", self.token.literal, self.class)?;
        if let Some(data) = &self.data {
            write!(f, ", {data}")?;
        }
        f.write_str(")")
    }
}

/// `target = value`, where the target is an identifier or member access.
#[derive(Clone, Debug, PartialEq)]
pub struct AssignExpr {
    /// The `=` token.
    pub token: Token,
    pub target: Box<Expr>,
    pub value: Box<Expr>,
}

impl fmt::Display for AssignExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.target, self.value)
    }
}
