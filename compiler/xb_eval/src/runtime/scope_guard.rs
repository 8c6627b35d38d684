//! RAII guard for `WITH` blocks.
//!
//! [`WithScope`] pushes a receiver on creation and restores the `WITH` stack
//! to its previous depth when dropped, including during unwinding. It
//! derefs to the runtime, so the block body uses it like the runtime itself:
//!
//! ```text
//! let mut scoped = rt.with_scope(&obj)?;
//! scoped.with_set("x", Value::from(1))?;
//! // receiver popped here
//! ```

use std::ops::{Deref, DerefMut};

use super::Runtime;
use crate::errors::EvalError;
use crate::value::Value;

pub struct WithScope<'rt> {
    runtime: &'rt mut Runtime,
    depth: usize,
}

impl Drop for WithScope<'_> {
    fn drop(&mut self) {
        self.runtime.with_stack.truncate(self.depth);
    }
}

impl Deref for WithScope<'_> {
    type Target = Runtime;

    fn deref(&self) -> &Runtime {
        self.runtime
    }
}

impl DerefMut for WithScope<'_> {
    fn deref_mut(&mut self) -> &mut Runtime {
        self.runtime
    }
}

impl Runtime {
    /// Enter a `WITH base` block; the block ends when the guard drops.
    pub fn with_scope(&mut self, base: &Value) -> Result<WithScope<'_>, EvalError> {
        let depth = self.with_stack.depth();
        self.with_stack.push(base)?;
        Ok(WithScope {
            runtime: self,
            depth,
        })
    }

    /// Run `body` with `base` as the implicit receiver.
    pub fn with_receiver<T, F>(&mut self, base: &Value, body: F) -> Result<T, EvalError>
    where
        F: FnOnce(&mut Runtime) -> T,
    {
        let mut scoped = self.with_scope(base)?;
        Ok(body(&mut *scoped))
    }
}
