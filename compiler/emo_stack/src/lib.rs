//! Stack growth for the recursive parts of the Emo pipeline.
//!
//! Both the Pratt parser and the tree-walking evaluator recurse once per
//! nesting level of the source. A script like `((((((...))))))` or a long
//! chain of nested calls would otherwise overflow the native stack long
//! before the evaluator's call-depth limit kicks in.
//!
//! The guard only covers code that calls it. Dropping or displaying a
//! syntax tree recurses without it, so the parser also caps nesting depth
//! (`emo_parse::MAX_NESTING_DEPTH`) to keep those walks shallow.
//!
//! On native targets the stack is extended on demand with `stacker`. On
//! `wasm32` the guard is a plain call.

/// Grow when less than this much stack remains (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if the remaining space is below the red zone.
///
/// Wrap the body of every function that recurses on user-controlled depth:
///
/// ```text
/// fn eval_expr(&mut self, expr: &Expr, env: &Environment) -> EvalResult {
///     ensure_sufficient_stack(|| self.eval_expr_inner(expr, env))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// `wasm32` manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
