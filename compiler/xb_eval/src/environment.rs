//! Variable scopes.
//!
//! Scopes form a stack that mirrors the call stack: the global scope sits at
//! the bottom and each procedure invocation pushes one scope for its frame.
//! A scope's parent is the scope below it, so resolution is dynamic: a callee
//! sees its caller's variables (xBase PRIVATE semantics).

use rustc_hash::FxHashMap;
use xb_ir::Ident;

use crate::value::Value;

/// A single scope containing variable bindings.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<Ident, Value>,
}

impl Scope {
    /// An empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` here, replacing any binding this scope already has.
    #[inline]
    pub fn define(&mut self, name: Ident, value: Value) {
        self.bindings.insert(name, value);
    }

    /// The value bound to `name` in this scope only.
    #[inline]
    pub fn get(&self, name: &Ident) -> Option<&Value> {
        self.bindings.get(name)
    }

    #[inline]
    fn get_mut(&mut self, name: &Ident) -> Option<&mut Value> {
        self.bindings.get_mut(name)
    }

    #[inline]
    fn remove(&mut self, name: &Ident) -> Option<Value> {
        self.bindings.remove(name)
    }

    /// Number of bindings in this scope.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Stack of scopes, innermost last. Never empty: index 0 is the global scope.
#[derive(Debug)]
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Environment {
    /// Create an environment holding only the global scope.
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope::new()],
        }
    }

    /// Number of live scopes, including the global scope.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    #[inline]
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
    }

    /// Pop the innermost scope. The global scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Discard every scope above `depth`. Used when a call frame unwinds.
    pub fn truncate(&mut self, depth: usize) {
        self.scopes.truncate(depth.max(1));
    }

    fn current_mut(&mut self) -> &mut Scope {
        let top = self.scopes.len() - 1;
        &mut self.scopes[top]
    }

    /// Bind `name` in the innermost scope, shadowing outer bindings.
    #[inline]
    pub fn define(&mut self, name: Ident, value: Value) {
        self.current_mut().define(name, value);
    }

    /// Bind `name` in the global scope.
    pub fn define_global(&mut self, name: Ident, value: Value) {
        self.scopes[0].define(name, value);
    }

    /// Resolve `name`, innermost scope first.
    pub fn lookup(&self, name: &Ident) -> Option<Value> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .cloned()
    }

    /// `SET_NAME` semantics: assign to the nearest binding, or create one in
    /// the innermost scope.
    pub fn set(&mut self, name: Ident, value: Value) {
        match self
            .scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.get_mut(&name))
        {
            Some(slot) => *slot = value,
            None => self.define(name, value),
        }
    }

    /// Remove the nearest binding of `name`, returning its value.
    pub fn remove(&mut self, name: &Ident) -> Option<Value> {
        self.scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.remove(name))
    }

    /// Returns `true` if `name` is bound in any live scope (even to Null).
    pub fn is_bound(&self, name: &Ident) -> bool {
        self.scopes.iter().any(|scope| scope.get(name).is_some())
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
