//! Callable values: procedures, functions and bound methods.

use std::fmt;
use std::sync::Arc;

use xb_ir::Ident;

use crate::errors::{EvalResult, ExecResult};
use crate::runtime::Runtime;
use crate::value::{ObjectRef, Value};

/// Host function signature. Arguments are already evaluated.
pub type NativeFn = fn(&mut Runtime, &[Value]) -> EvalResult;

/// Compiled script body. Binds its own parameters with `PARAMETER` and
/// produces its result with `RETURN`.
pub type ScriptBody = dyn Fn(&mut Runtime) -> ExecResult + Send + Sync;

#[derive(Clone)]
pub enum RoutineKind {
    /// Host function. `arity: None` accepts any argument count.
    Native { arity: Option<usize>, func: NativeFn },
    /// Script body. With `arity: Some(n)` the call is rejected before the
    /// body runs unless exactly `n` arguments are passed; with `None` the
    /// count is checked by `PARAMETER`, or after the body if it never binds.
    Script {
        arity: Option<usize>,
        body: Arc<ScriptBody>,
    },
}

/// A named callable.
#[derive(Clone)]
pub struct Routine {
    name: Ident,
    kind: RoutineKind,
}

impl Routine {
    /// Host function taking exactly `arity` arguments.
    pub fn native(name: impl Into<Ident>, arity: usize, func: NativeFn) -> Self {
        Routine {
            name: name.into(),
            kind: RoutineKind::Native {
                arity: Some(arity),
                func,
            },
        }
    }

    /// Host function taking any number of arguments.
    pub fn variadic(name: impl Into<Ident>, func: NativeFn) -> Self {
        Routine {
            name: name.into(),
            kind: RoutineKind::Native { arity: None, func },
        }
    }

    /// Script procedure or function whose parameter count is only known
    /// once its `PARAMETER` statement runs.
    pub fn script<F>(name: impl Into<Ident>, body: F) -> Self
    where
        F: Fn(&mut Runtime) -> ExecResult + Send + Sync + 'static,
    {
        Routine {
            name: name.into(),
            kind: RoutineKind::Script {
                arity: None,
                body: Arc::new(body),
            },
        }
    }

    /// Script procedure or function declared with `arity` parameters.
    pub fn script_with_arity<F>(name: impl Into<Ident>, arity: usize, body: F) -> Self
    where
        F: Fn(&mut Runtime) -> ExecResult + Send + Sync + 'static,
    {
        Routine {
            name: name.into(),
            kind: RoutineKind::Script {
                arity: Some(arity),
                body: Arc::new(body),
            },
        }
    }

    /// Declared argument count, if fixed ahead of the call.
    #[inline]
    pub fn arity(&self) -> Option<usize> {
        match &self.kind {
            RoutineKind::Native { arity, .. } | RoutineKind::Script { arity, .. } => *arity,
        }
    }

    #[inline]
    pub fn name(&self) -> &Ident {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> &RoutineKind {
        &self.kind
    }

    /// Identity comparison: same script body, or same native name and arity.
    pub fn ptr_eq(&self, other: &Routine) -> bool {
        match (&self.kind, &other.kind) {
            (RoutineKind::Script { body: a, .. }, RoutineKind::Script { body: b, .. }) => {
                Arc::ptr_eq(a, b)
            }
            (RoutineKind::Native { arity: a, .. }, RoutineKind::Native { arity: b, .. }) => {
                self.name == other.name && a == b
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            RoutineKind::Native { .. } => "native",
            RoutineKind::Script { .. } => "script",
        };
        write!(f, "Routine({} {kind})", self.name)
    }
}

/// A method together with the object it was looked up on.
#[derive(Clone, Debug)]
pub struct BoundMethod {
    pub receiver: ObjectRef,
    pub routine: Routine,
}
