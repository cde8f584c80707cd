//! Cycle collection for scopes.
//!
//! Scopes are reference counted, and a scope that holds a closure over
//! itself (a named function, a class and its instances, a method stored
//! in a field) keeps itself alive. Counting alone never frees it.
//!
//! Collection is trial deletion over every registered scope:
//!
//! 1. Walk each scope's bindings and parent link, and every array, hash,
//!    function, class and instance reachable from them. Count how many of
//!    each node's strong references come from inside that graph.
//! 2. A node with more strong references than internal ones is held from
//!    outside: by the host, by an active call frame, or by a value on the
//!    Rust stack. Those nodes, and everything reachable from them, live.
//! 3. Every other scope is garbage. Clearing its bindings and parent
//!    breaks the cycles, and plain reference counting frees the rest.
//!
//! A scope that is borrowed while collection runs is treated as live.

use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;
use tracing::debug;

use super::{LocalScope, Scope};
use crate::Value;

/// Registered scope count below which no automatic collection runs.
const MIN_THRESHOLD: usize = 1024;

/// Registry of the scopes created from one top-level environment.
pub(crate) struct Heap {
    scopes: RefCell<Vec<Weak<RefCell<Scope>>>>,
    /// Registry size that makes the next collection due.
    threshold: Cell<usize>,
    collecting: Cell<bool>,
}

impl Heap {
    pub(crate) fn new() -> Self {
        Heap {
            scopes: RefCell::new(Vec::new()),
            threshold: Cell::new(MIN_THRESHOLD),
            collecting: Cell::new(false),
        }
    }

    pub(crate) fn register(&self, scope: &LocalScope<Scope>) {
        self.scopes.borrow_mut().push(scope.downgrade());
    }

    /// Registered scopes that are still allocated.
    #[cfg(test)]
    pub(crate) fn live_scopes(&self) -> usize {
        self.scopes
            .borrow()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    pub(crate) fn is_due(&self) -> bool {
        self.scopes
            .try_borrow()
            .is_ok_and(|scopes| scopes.len() >= self.threshold.get())
    }

    /// Free every scope reachable only through cycles. `releasing` is a
    /// handle about to be dropped; its reference does not keep anything
    /// alive.
    pub(crate) fn collect(&self, releasing: Option<&LocalScope<Scope>>) {
        if self.collecting.replace(true) {
            return;
        }

        let scopes: Vec<LocalScope<Scope>> = match self.scopes.try_borrow_mut() {
            Ok(mut registry) => {
                registry.retain(|weak| weak.strong_count() > 0);
                registry.iter().filter_map(LocalScope::upgrade).collect()
            }
            Err(_) => Vec::new(),
        };

        let garbage = find_garbage(&scopes, releasing);
        let live = scopes.len() - garbage.len();
        debug!(scopes = scopes.len(), freed = garbage.len(), "collected scopes");

        for &index in &garbage {
            let Ok(mut scope) = scopes[index].try_borrow_mut() else {
                continue;
            };
            let bindings = std::mem::take(&mut scope.bindings);
            let parent = scope.parent.take();
            drop(scope);
            // Dropping these runs destructors that may re-enter `collect`;
            // the `collecting` flag turns those calls into no-ops.
            drop(bindings);
            drop(parent);
        }
        drop(scopes);

        self.threshold.set((live * 2).max(MIN_THRESHOLD));
        self.collecting.set(false);
    }
}

/// Indices into `scopes` of the scopes nothing outside the graph reaches.
fn find_garbage(
    scopes: &[LocalScope<Scope>],
    releasing: Option<&LocalScope<Scope>>,
) -> Vec<usize> {
    let guards: Vec<Option<Ref<'_, Scope>>> =
        scopes.iter().map(|scope| scope.try_borrow().ok()).collect();

    let mut graph = Graph::default();
    for scope in scopes {
        // `scopes` itself holds one reference to each.
        let mut strong = scope.strong_count().saturating_sub(1);
        if releasing.is_some_and(|handle| handle.ptr_eq(scope)) {
            strong = strong.saturating_sub(1);
        }
        graph.add_node(scope.as_ptr(), strong);
    }

    for (index, guard) in guards.iter().enumerate() {
        let Some(scope) = guard else {
            graph.nodes[index].pinned = true;
            continue;
        };
        if let Some(parent) = &scope.parent {
            graph.edge(index, parent.as_ptr());
        }
        for binding in scope.bindings.values() {
            graph.scan(index, &binding.value);
        }
    }

    let marked = graph.mark();
    (0..scopes.len()).filter(|&index| !marked[index]).collect()
}

struct Node {
    strong: usize,
    internal: usize,
    edges: Vec<usize>,
    pinned: bool,
}

#[derive(Default)]
struct Graph {
    index: FxHashMap<*const (), usize>,
    nodes: Vec<Node>,
}

impl Graph {
    fn add_node(&mut self, ptr: *const (), strong: usize) -> usize {
        let index = self.nodes.len();
        self.index.insert(ptr, index);
        self.nodes.push(Node {
            strong,
            internal: 0,
            edges: Vec::new(),
            pinned: false,
        });
        index
    }

    /// Record a reference from `from` to a node that already exists.
    /// References into other heaps are ignored.
    fn edge(&mut self, from: usize, to: *const ()) {
        if let Some(&target) = self.index.get(&to) {
            self.nodes[from].edges.push(target);
            self.nodes[target].internal += 1;
        }
    }

    /// Record a reference from `from` to a value node. Returns the new
    /// node's index the first time the node is seen, so its contents get
    /// scanned exactly once.
    fn visit(&mut self, from: usize, to: *const (), strong: usize) -> Option<usize> {
        if self.index.contains_key(&to) {
            self.edge(from, to);
            return None;
        }
        let target = self.add_node(to, strong);
        self.edge(from, to);
        Some(target)
    }

    /// Record every reference `value` holds, owned by node `owner`.
    fn scan<'v>(&mut self, owner: usize, value: &'v Value) {
        let mut pending: Vec<(usize, &'v Value)> = vec![(owner, value)];
        while let Some((owner, value)) = pending.pop() {
            match value {
                Value::Array(items) => {
                    let ptr = Rc::as_ptr(items).cast();
                    let strong = Rc::strong_count(items);
                    if let Some(node) = self.visit(owner, ptr, strong) {
                        pending.extend(items.iter().map(|item| (node, item)));
                    }
                }
                Value::Hash(hash) => {
                    let ptr = Rc::as_ptr(hash).cast();
                    let strong = Rc::strong_count(hash);
                    if let Some(node) = self.visit(owner, ptr, strong) {
                        pending.extend(hash.iter().map(|(_, item)| (node, item)));
                    }
                }
                Value::Function(function) => {
                    let ptr = Rc::as_ptr(function).cast();
                    let strong = Rc::strong_count(function);
                    if let Some(node) = self.visit(owner, ptr, strong) {
                        self.edge(node, function.env.0.as_ptr());
                    }
                }
                Value::Class(class) => {
                    let ptr = Rc::as_ptr(class).cast();
                    let strong = Rc::strong_count(class);
                    if let Some(node) = self.visit(owner, ptr, strong) {
                        self.edge(node, class.env.0.as_ptr());
                    }
                }
                Value::Instance(instance) => {
                    let ptr = Rc::as_ptr(instance).cast();
                    let strong = Rc::strong_count(instance);
                    if let Some(node) = self.visit(owner, ptr, strong) {
                        self.edge(node, instance.env.0.as_ptr());
                        let class = &instance.class;
                        let class_ptr = Rc::as_ptr(class).cast();
                        let class_strong = Rc::strong_count(class);
                        if let Some(class_node) = self.visit(node, class_ptr, class_strong) {
                            self.edge(class_node, class.env.0.as_ptr());
                        }
                    }
                }
                Value::Integer(_)
                | Value::Boolean(_)
                | Value::Str(_)
                | Value::Null
                | Value::Error(_) => {}
            }
        }
    }

    /// Nodes reachable from a node held outside the graph.
    fn mark(&self) -> Vec<bool> {
        let mut marked = vec![false; self.nodes.len()];
        let mut pending: Vec<usize> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.pinned || node.strong > node.internal)
            .map(|(index, _)| index)
            .collect();
        while let Some(index) = pending.pop() {
            if std::mem::replace(&mut marked[index], true) {
                continue;
            }
            pending.extend(self.nodes[index].edges.iter().copied());
        }
        marked
    }
}
