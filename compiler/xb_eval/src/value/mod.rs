//! Runtime values.
//!
//! `Value` is a closed tagged union: the six data kinds of the language
//! (Null, Boolean, Number, String, Object, Array) plus the two callable kinds a
//! dynamic object model needs (free routines and bound methods).
//!
//! Strings and arrays are immutable and shared through [`Heap`]; objects are
//! the only mutable values and compare by identity.

mod heap;
mod object;
mod routine;

use std::fmt;

pub use heap::Heap;
pub use object::ObjectRef;
pub use routine::{BoundMethod, NativeFn, Routine, RoutineKind, ScriptBody};

/// A dynamically-typed runtime value.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    /// All numbers are IEEE doubles; integral values print without a fraction.
    Number(f64),
    Str(Heap<String>),
    Array(Heap<Vec<Value>>),
    Object(ObjectRef),
    /// A free procedure or function.
    Routine(Routine),
    /// A method bound to its receiver.
    Method(BoundMethod),
}

impl Value {
    /// Create a string value.
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create an array value.
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(items))
    }

    /// Kind name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Routine(_) => "function",
            Value::Method(_) => "method",
        }
    }

    /// Boolean coercion used by `IF`, `DO WHILE`, `AND`, `OR` and `NOT`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(_) | Value::Routine(_) | Value::Method(_) => true,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Returns `true` for values `CALL_ANY` can invoke.
    #[inline]
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Routine(_) | Value::Method(_))
    }

    /// Structural equality for data kinds, identity for objects and callables.
    ///
    /// This is the host-side equality (`PartialEq`); the language's `=`
    /// operator additionally rejects mismatched kinds (see `operators`).
    #[allow(clippy::float_cmp, reason = "host equality is exact")]
    fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.same(y))
            }
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Routine(a), Value::Routine(b)) => a.ptr_eq(b),
            (Value::Method(a), Value::Method(b)) => {
                a.receiver.ptr_eq(&b.receiver) && a.routine.ptr_eq(&b.routine)
            }
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    #[expect(
        clippy::cast_precision_loss,
        reason = "the language has a single double-precision number kind"
    )]
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

/// Format a number the way `WRITE` prints it: `3`, `2.5`, `-0.125`.
pub(crate) fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n == 0.0 {
        // Covers -0.0.
        f.write_str("0")
    } else {
        write!(f, "{n}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(true) => f.write_str("TRUE"),
            Value::Bool(false) => f.write_str("FALSE"),
            Value::Number(n) => fmt_number(*n, f),
            Value::Str(s) => f.write_str(s),
            Value::Array(items) => {
                f.write_str("{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("}")
            }
            Value::Object(obj) => write!(f, "Object({})", obj.class_name()),
            Value::Routine(routine) => write!(f, "Function({})", routine.name()),
            Value::Method(method) => write!(
                f,
                "Method({}.{})",
                method.receiver.class_name(),
                method.routine.name()
            ),
        }
    }
}
