//! Implicit receivers for `WITH` blocks.
//!
//! `WITH obj ... ENDWITH` makes `obj` the target of leading-dot member access
//! (`.x := 1`). Blocks nest; the innermost receiver wins and leaving a block
//! restores exactly the receiver that was active when it was entered.

use crate::errors::{empty_with_stack, with_target_not_object, EvalError};
use crate::value::{ObjectRef, Value};

/// Receivers of the active `WITH` blocks, innermost last.
#[derive(Debug, Default)]
pub struct WithStack {
    receivers: Vec<ObjectRef>,
}

impl WithStack {
    /// A stack with no active block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `base` the implicit receiver. Only objects can be receivers.
    pub fn push(&mut self, base: &Value) -> Result<(), EvalError> {
        match base {
            Value::Object(obj) => {
                self.receivers.push(obj.clone());
                Ok(())
            }
            other => Err(with_target_not_object(other.type_name())),
        }
    }

    /// Leave the innermost block, returning its receiver.
    pub fn pop(&mut self) -> Result<ObjectRef, EvalError> {
        self.receivers.pop().ok_or_else(empty_with_stack)
    }

    /// The active receiver.
    pub fn top(&self) -> Result<&ObjectRef, EvalError> {
        self.receivers.last().ok_or_else(empty_with_stack)
    }

    /// Number of active blocks.
    pub fn depth(&self) -> usize {
        self.receivers.len()
    }

    /// Returns `true` outside every `WITH` block.
    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty()
    }

    /// Drop receivers pushed after the stack had `depth` entries.
    pub fn truncate(&mut self, depth: usize) {
        self.receivers.truncate(depth);
    }
}
