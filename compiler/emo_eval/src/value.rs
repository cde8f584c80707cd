//! Runtime values.
//!
//! `Value` is cheap to clone: scalars are copied and every compound
//! payload sits behind an `Rc`. Functions, classes and instances are
//! reference values; arrays, hashes and strings are immutable once built,
//! so sharing them is unobservable.

use std::fmt;
use std::rc::Rc;

use emo_ir::{ClassField, ClassMethod, FunctionDecl};
use rustc_hash::FxHashMap;

use crate::{Environment, EvalError};

/// A runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Str(Rc<str>),
    Array(Rc<Vec<Value>>),
    Hash(Rc<HashValue>),
    Function(Rc<FunctionValue>),
    Class(Rc<ClassValue>),
    Instance(Rc<InstanceValue>),
    Null,
    /// A runtime error surfaced as the result of a program.
    Error(EvalError),
}

impl Value {
    /// Kind name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::Str(_) => "STRING",
            Value::Array(_) => "ARRAY",
            Value::Hash(_) => "HASH",
            Value::Function(_) => "FUNCTION",
            Value::Class(_) => "CLASS",
            Value::Instance(_) => "INSTANCE",
            Value::Null => "NULL",
            Value::Error(_) => "ERROR",
        }
    }

    /// `false` and `null` are falsy; everything else is truthy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false) | Value::Null)
    }

    pub fn string(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Value equality for `==` and `!=`.
    ///
    /// Scalars, arrays and hashes compare by contents. Functions, classes
    /// and instances compare by identity. Values of different kinds are
    /// never equal.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y))
            }
            (Value::Hash(a), Value::Hash(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(key, value)| b.get(key).is_some_and(|other| value.equals(other)))
            }
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Display form used inside arrays and hashes, where strings are quoted.
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "\"{s}\""),
            other => fmt::Display::fmt(other, f),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Str(s) => f.write_str(s),
            Value::Array(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    element.fmt_nested(f)?;
                }
                f.write_str("]")
            }
            Value::Hash(hash) => fmt::Display::fmt(hash, f),
            Value::Function(function) => fmt::Display::fmt(function, f),
            Value::Class(class) => fmt::Display::fmt(class, f),
            Value::Instance(instance) => fmt::Display::fmt(instance, f),
            Value::Null => f.write_str("null"),
            Value::Error(error) => write!(f, "ERROR: {error}"),
        }
    }
}

// Hashes

/// A value usable as a hash key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    Str(Rc<str>),
}

impl HashKey {
    /// Returns `None` for kinds that cannot be hashed.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(n) => Some(HashKey::Integer(*n)),
            Value::Boolean(b) => Some(HashKey::Boolean(*b)),
            Value::Str(s) => Some(HashKey::Str(Rc::clone(s))),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            HashKey::Integer(_) => "INTEGER",
            HashKey::Boolean(_) => "BOOLEAN",
            HashKey::Str(_) => "STRING",
        }
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashKey::Integer(n) => write!(f, "{n}"),
            HashKey::Boolean(b) => write!(f, "{b}"),
            HashKey::Str(s) => write!(f, "\"{s}\""),
        }
    }
}

/// Hash contents. Lookup is by key; iteration and display follow
/// first-insertion order.
#[derive(Clone, Debug, Default)]
pub struct HashValue {
    entries: Vec<(HashKey, Value)>,
    index: FxHashMap<HashKey, usize>,
}

impl HashValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. An overwritten key keeps its original position.
    pub fn insert(&mut self, key: HashKey, value: Value) {
        if let Some(&slot) = self.index.get(&key) {
            self.entries[slot].1 = value;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &HashKey) -> Option<&Value> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HashKey, &Value)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }
}

impl fmt::Display for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: ")?;
            value.fmt_nested(f)?;
        }
        f.write_str("}")
    }
}

// Functions and classes

/// A closure: declaration plus the environment it was created in.
#[derive(Debug)]
pub struct FunctionValue {
    /// `None` for anonymous function literals.
    pub name: Option<String>,
    pub decl: Rc<FunctionDecl>,
    pub env: Environment,
}

impl fmt::Display for FunctionValue {
    /// `func name(a, b) { body }`; declared types are omitted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("func")?;
        if let Some(name) = &self.name {
            write!(f, " {name}")?;
        }
        f.write_str("(")?;
        for (i, param) in self.decl.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", param.name)?;
        }
        write!(f, ") {}", self.decl.body)
    }
}

/// A class declaration evaluated in some environment.
#[derive(Debug)]
pub struct ClassValue {
    pub name: String,
    pub fields: Vec<ClassField>,
    pub methods: Vec<ClassMethod>,
    /// Environment the class was declared in. Instances enclose it.
    pub env: Environment,
}

impl ClassValue {
    pub fn field(&self, name: &str) -> Option<&ClassField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn method(&self, name: &str) -> Option<&ClassMethod> {
        self.methods.iter().find(|method| method.name() == name)
    }
}

impl fmt::Display for ClassValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class {} {{}}", self.name)
    }
}

/// An object created by `new`.
///
/// Field values live in `env`, whose parent is the class's environment.
#[derive(Debug)]
pub struct InstanceValue {
    pub class: Rc<ClassValue>,
    pub env: Environment,
}

impl fmt::Display for InstanceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<object:{}>({})", self.class.name, self.class)
    }
}

#[cfg(test)]
mod tests;
