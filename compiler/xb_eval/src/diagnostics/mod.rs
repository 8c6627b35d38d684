//! Call frames and the live call stack.
//!
//! Every invocation, script or native, pushes a `CallFrame`. The frame owns
//! the call's arguments until `PARAMETER` binds them, and records how deep
//! the environment and `WITH` stacks were on entry so that leaving the frame
//! restores both exactly, whatever path the body took out.
//!
//! `CallStack` enforces the call-depth limit and snapshots itself into an
//! `EvalBacktrace` when an error leaves a frame.

use xb_ir::Ident;

use crate::errors::{stack_overflow, BacktraceFrame, EvalBacktrace, EvalError};
use crate::value::{ObjectRef, Value};

/// A single live invocation.
#[derive(Clone, Debug)]
pub struct CallFrame {
    /// Routine name.
    pub name: Ident,
    /// Receiver for method calls.
    pub receiver: Option<ObjectRef>,
    /// Arguments, consumed by `PARAMETER`.
    pub args: Vec<Value>,
    /// Set once `PARAMETER` has run in this frame.
    pub params_bound: bool,
    /// Environment depth before the frame's scope was pushed.
    pub env_depth: usize,
    /// `WITH` stack depth on entry.
    pub with_depth: usize,
}

impl CallFrame {
    /// `CLASS.METHOD` for methods, the bare name otherwise.
    pub fn display_name(&self) -> String {
        match &self.receiver {
            Some(receiver) => format!("{}.{}", receiver.class_name(), self.name),
            None => self.name.to_string(),
        }
    }
}

/// Live call stack with an optional depth limit.
#[derive(Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `max_depth: None` leaves recursion bounded only by the host stack,
    /// which `stacker` grows on demand.
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame, checking the depth limit. The frame is not pushed on
    /// overflow.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(stack_overflow(max));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<CallFrame> {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[inline]
    pub fn current_frame(&self) -> Option<&CallFrame> {
        self.frames.last()
    }

    #[inline]
    pub fn current_frame_mut(&mut self) -> Option<&mut CallFrame> {
        self.frames.last_mut()
    }

    /// Snapshot the stack, most recent call first.
    pub fn capture(&self) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|f| BacktraceFrame {
                name: f.display_name(),
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a backtrace unless the error already carries one from a deeper
    /// frame.
    pub fn attach_backtrace(&self, err: EvalError) -> EvalError {
        if self.frames.is_empty() || err.backtrace.is_some() {
            return err;
        }
        err.with_backtrace(self.capture())
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;
