//! Lexically chained environments.
//!
//! An [`Environment`] is a handle to one scope. Scopes are shared: a
//! closure, an instance or an active call frame each hold a handle, and
//! a scope lives as long as any handle does. Every handle observes every
//! mutation, which is what lets closures see later assignments to the
//! variables they captured.
//!
//! A closure stored in the scope it captures forms a reference cycle.
//! Every scope created from one top-level environment is registered with
//! a shared `Heap`, which finds and breaks such cycles (see `collect`).

mod collect;

use std::cell::{BorrowError, BorrowMutError, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

use crate::Value;

use self::collect::Heap;

/// Whether a binding can be reassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    /// `var x = ...`, parameters, fields, named functions and classes.
    Mutable,
    /// `define(X, ...)`.
    Immutable,
}

impl Mutability {
    #[inline]
    pub fn is_mutable(self) -> bool {
        matches!(self, Mutability::Mutable)
    }
}

/// Why a binding could not be written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// The binding is a constant.
    Immutable,
    /// No binding with this name is in reach.
    Undefined,
}

/// Single-threaded shared scope: `Rc<RefCell<T>>` behind one constructor.
#[repr(transparent)]
pub(crate) struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn try_borrow(&self) -> Result<Ref<'_, T>, BorrowError> {
        self.0.try_borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    #[inline]
    pub fn try_borrow_mut(&self) -> Result<RefMut<'_, T>, BorrowMutError> {
        self.0.try_borrow_mut()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Address identifying the shared cell.
    #[inline]
    pub fn as_ptr(&self) -> *const () {
        Rc::as_ptr(&self.0).cast()
    }

    #[inline]
    pub fn strong_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    #[inline]
    pub fn downgrade(&self) -> Weak<RefCell<T>> {
        Rc::downgrade(&self.0)
    }

    #[inline]
    pub fn upgrade(weak: &Weak<RefCell<T>>) -> Option<Self> {
        weak.upgrade().map(LocalScope)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

#[derive(Clone, Debug)]
struct Binding {
    value: Value,
    mutability: Mutability,
}

/// One scope's bindings plus its parent.
pub(crate) struct Scope {
    bindings: FxHashMap<String, Binding>,
    parent: Option<LocalScope<Scope>>,
    heap: Rc<Heap>,
}

impl Scope {
    pub fn new(heap: Rc<Heap>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: None,
            heap,
        }
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        let heap = Rc::clone(&parent.borrow().heap);
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
            heap,
        }
    }

    /// Bind `name` in this scope, replacing any mutable binding of the
    /// same name. Fails if this scope already holds it as a constant.
    pub fn define(
        &mut self,
        name: &str,
        value: Value,
        mutability: Mutability,
    ) -> Result<(), AssignError> {
        if let Some(existing) = self.bindings.get(name) {
            if !existing.mutability.is_mutable() {
                return Err(AssignError::Immutable);
            }
        }
        self.bindings
            .insert(name.to_string(), Binding { value, mutability });
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(binding) = self.bindings.get(name) {
            return Some(binding.value.clone());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow().lookup(name);
        }
        None
    }

    /// Rebind the nearest existing `name` in the chain.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        if let Some(binding) = self.bindings.get_mut(name) {
            if !binding.mutability.is_mutable() {
                return Err(AssignError::Immutable);
            }
            binding.value = value;
            return Ok(());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow_mut().assign(name, value);
        }
        Err(AssignError::Undefined)
    }
}

/// Handle to a scope and, through it, its ancestors.
#[derive(Clone)]
pub struct Environment(LocalScope<Scope>);

impl Environment {
    /// A fresh top-level environment with no parent.
    pub fn new() -> Self {
        let heap = Rc::new(Heap::new());
        let scope = LocalScope::new(Scope::new(Rc::clone(&heap)));
        heap.register(&scope);
        Environment(scope)
    }

    /// A new empty scope whose parent is `parent`.
    pub fn new_enclosed(parent: &Environment) -> Self {
        let scope = LocalScope::new(Scope::with_parent(parent.0.clone()));
        scope.borrow().heap.register(&scope);
        Environment(scope)
    }

    pub fn define(
        &self,
        name: &str,
        value: Value,
        mutability: Mutability,
    ) -> Result<(), AssignError> {
        self.0.borrow_mut().define(name, value, mutability)
    }

    /// Look `name` up here, then outward through the parents.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.0.borrow().lookup(name)
    }

    pub fn assign(&self, name: &str, value: Value) -> Result<(), AssignError> {
        self.0.borrow_mut().assign(name, value)
    }

    /// Look `name` up in this scope only.
    pub fn get_own(&self, name: &str) -> Option<Value> {
        self.0
            .borrow()
            .bindings
            .get(name)
            .map(|binding| binding.value.clone())
    }

    /// Rebind `name` in this scope only; it must already exist here.
    pub fn set_own(&self, name: &str, value: Value) -> Result<(), AssignError> {
        let mut scope = self.0.borrow_mut();
        let binding = scope.bindings.get_mut(name).ok_or(AssignError::Undefined)?;
        if !binding.mutability.is_mutable() {
            return Err(AssignError::Immutable);
        }
        binding.value = value;
        Ok(())
    }

    /// Returns `true` if both handles point at the same scope.
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        self.0.ptr_eq(&other.0)
    }

    /// Free every scope of this environment's tree that is reachable only
    /// through reference cycles.
    ///
    /// Collection also runs on its own once enough scopes have been
    /// created, and when a handle to a top-level scope is dropped.
    pub fn collect_garbage(&self) {
        let heap = Rc::clone(&self.0.borrow().heap);
        heap.collect(None);
    }
}

impl Drop for Environment {
    fn drop(&mut self) {
        let Ok(scope) = self.0.try_borrow() else {
            return;
        };
        let heap = Rc::clone(&scope.heap);
        let top_level = scope.parent.is_none();
        drop(scope);

        if top_level || heap.is_due() {
            heap.collect(Some(&self.0));
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

impl fmt::Debug for Environment {
    /// Opaque: scopes may hold closures that capture the same scope.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(scope) = self.0.try_borrow() else {
            return f.write_str("Environment(<borrowed>)");
        };
        let mut names: Vec<_> = scope.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("has_parent", &scope.parent.is_some())
            .finish()
    }
}
