//! Runtime error types.
//!
//! Every failure the runtime can report is an `EvalErrorKind` variant carrying
//! its structured data. Each variant belongs to one `ErrorCategory`, the coarse
//! taxonomy a driver reports to the user. All errors are fatal to the current
//! execution; the only non-error unwind is `Flow::Return` (see `control`).
//!
//! Factory functions (`undefined_name()`, `arity_mismatch()`, ...) are the
//! public construction API. They populate both `kind` and `message`.

use std::fmt;

use xb_ir::{BinaryOp, Ident, UnaryOp};

use crate::control::Flow;
use crate::value::Value;

/// Result of evaluating an expression-like runtime call.
pub type EvalResult = Result<Value, EvalError>;

/// Result of executing a statement: either a control signal or a fatal error.
pub type ExecResult = Result<Flow, EvalError>;

/// Coarse error taxonomy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    NameResolution,
    Arity,
    NullReference,
    MemberNotFound,
    ImmutableTarget,
    NotCallable,
    ClassNotFound,
    TypeCoercion,
    WithContext,
    InfiniteLoopGuard,
    StackOverflow,
    UnmatchedReturn,
    /// Division or modulo by zero, non-finite results.
    Arithmetic,
    /// Misuse of the runtime API by the front-end (unknown operator, empty path, ...).
    Usage,
}

impl ErrorCategory {
    /// Name reported to the user, e.g. `NameResolutionError`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NameResolution => "NameResolutionError",
            Self::Arity => "ArityError",
            Self::NullReference => "NullReferenceError",
            Self::MemberNotFound => "MemberNotFoundError",
            Self::ImmutableTarget => "ImmutableTargetError",
            Self::NotCallable => "NotCallableError",
            Self::ClassNotFound => "ClassNotFoundError",
            Self::TypeCoercion => "TypeCoercionError",
            Self::WithContext => "WithContextError",
            Self::InfiniteLoopGuard => "InfiniteLoopGuardError",
            Self::StackOverflow => "StackOverflowError",
            Self::UnmatchedReturn => "UnmatchedReturnError",
            Self::Arithmetic => "ArithmeticError",
            Self::Usage => "UsageError",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed error category with structured data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Names
    UndefinedName {
        name: String,
    },
    ThisOutsideMethod,

    // Calls
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    ParametersAlreadyBound {
        name: String,
    },
    NotCallable {
        type_name: String,
    },
    StackOverflow {
        depth: usize,
    },

    // Members
    NullReference {
        member: String,
    },
    MemberNotFound {
        member: String,
        type_name: String,
    },
    ImmutableTarget {
        member: String,
        type_name: String,
    },
    EmptyMemberPath,
    ClassNotFound {
        name: String,
    },

    // Operators
    BinaryTypeMismatch {
        op: BinaryOp,
        left: String,
        right: String,
    },
    UnaryTypeMismatch {
        op: UnaryOp,
        operand: String,
    },
    ExpectedNumber {
        context: String,
        got: String,
    },
    InvalidArgument {
        function: String,
        expected: &'static str,
        got: String,
    },
    UnknownOperator {
        symbol: String,
    },
    DivisionByZero,
    ModuloByZero,
    NumericOverflow {
        operation: String,
    },

    // WITH
    EmptyWithStack,
    WithTargetNotObject {
        type_name: String,
    },

    // Loops / control
    ZeroStep,
    IterationLimit {
        limit: u64,
    },
    UnmatchedReturn,
    UnmatchedExit,

    /// Failure raised by host code (native routines) that has no structured kind.
    Custom {
        message: String,
    },
}

impl EvalErrorKind {
    /// The taxonomy entry this error belongs to.
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::UndefinedName { .. } | Self::ThisOutsideMethod => ErrorCategory::NameResolution,
            Self::ArityMismatch { .. } | Self::ParametersAlreadyBound { .. } => {
                ErrorCategory::Arity
            }
            Self::NotCallable { .. } => ErrorCategory::NotCallable,
            Self::StackOverflow { .. } => ErrorCategory::StackOverflow,
            Self::NullReference { .. } => ErrorCategory::NullReference,
            Self::MemberNotFound { .. } => ErrorCategory::MemberNotFound,
            Self::ImmutableTarget { .. } => ErrorCategory::ImmutableTarget,
            Self::ClassNotFound { .. } => ErrorCategory::ClassNotFound,
            Self::BinaryTypeMismatch { .. }
            | Self::UnaryTypeMismatch { .. }
            | Self::ExpectedNumber { .. }
            | Self::InvalidArgument { .. } => ErrorCategory::TypeCoercion,
            Self::DivisionByZero | Self::ModuloByZero | Self::NumericOverflow { .. } => {
                ErrorCategory::Arithmetic
            }
            Self::EmptyWithStack | Self::WithTargetNotObject { .. } => ErrorCategory::WithContext,
            Self::ZeroStep | Self::IterationLimit { .. } => ErrorCategory::InfiniteLoopGuard,
            Self::UnmatchedReturn => ErrorCategory::UnmatchedReturn,
            Self::EmptyMemberPath
            | Self::UnknownOperator { .. }
            | Self::UnmatchedExit
            | Self::Custom { .. } => ErrorCategory::Usage,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedName { name } => write!(f, "variable '{name}' is not defined"),
            Self::ThisOutsideMethod => write!(f, "THIS is only available inside a method"),

            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{name} expects {expected} {arg_word}, got {got}")
            }
            Self::ParametersAlreadyBound { name } => {
                write!(f, "PARAMETER already executed in {name}")
            }
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),
            Self::StackOverflow { depth } => {
                write!(f, "maximum call depth exceeded (limit: {depth})")
            }

            Self::NullReference { member } => {
                write!(f, "cannot access member '{member}' of NULL")
            }
            Self::MemberNotFound { member, type_name } => {
                write!(f, "member '{member}' not found in {type_name}")
            }
            Self::ImmutableTarget { member, type_name } => {
                write!(f, "cannot assign member '{member}' on {type_name}")
            }
            Self::EmptyMemberPath => write!(f, "member path must not be empty"),
            Self::ClassNotFound { name } => write!(f, "class '{name}' is not defined"),

            Self::BinaryTypeMismatch { op, left, right } => {
                write!(f, "operator `{op}` cannot be applied to {left} and {right}")
            }
            Self::UnaryTypeMismatch { op, operand } => {
                write!(f, "operator `{op}` cannot be applied to {operand}")
            }
            Self::ExpectedNumber { context, got } => {
                write!(f, "{context} expects a number, got {got}")
            }
            Self::InvalidArgument {
                function,
                expected,
                got,
            } => write!(f, "{function} expects {expected}, got {got}"),
            Self::UnknownOperator { symbol } => write!(f, "unknown operator `{symbol}`"),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ModuloByZero => write!(f, "modulo by zero"),
            Self::NumericOverflow { operation } => {
                write!(f, "numeric overflow in {operation}")
            }

            Self::EmptyWithStack => write!(f, "no active WITH block"),
            Self::WithTargetNotObject { type_name } => {
                write!(f, "WITH target must be an object, got {type_name}")
            }

            Self::ZeroStep => write!(f, "FOR loop STEP must not be 0"),
            Self::IterationLimit { limit } => {
                write!(f, "loop exceeded {limit} iterations")
            }
            Self::UnmatchedReturn => write!(f, "RETURN outside of a procedure or function"),
            Self::UnmatchedExit => write!(f, "EXIT outside of a loop"),

            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Additional context attached to an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalNote {
    pub message: String,
}

impl EvalNote {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Routine name; methods are shown as `CLASS.METHOD`.
    pub name: String,
}

/// Snapshot of the call stack at an error site.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    /// Frames, most recent call first.
    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "call stack:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {}", frame.name)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory-built errors.
    pub message: String,
    /// Call stack at the error site, attached by the innermost failing frame.
    pub backtrace: Option<EvalBacktrace>,
    /// Secondary information.
    pub notes: Vec<EvalNote>,
}

impl EvalError {
    /// Create a `Custom` error. Native routines use this for host failures.
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Custom {
            message: message.into(),
        })
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            backtrace: None,
            notes: Vec::new(),
        }
    }

    #[inline]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: EvalNote) -> Self {
        self.notes.push(note);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category(), self.message)?;
        for note in &self.notes {
            write!(f, "\n  note: {}", note.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

// Name errors

#[cold]
pub fn undefined_name(name: &Ident) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedName {
        name: name.to_string(),
    })
}

#[cold]
pub fn this_outside_method() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ThisOutsideMethod)
}

// Call errors

#[cold]
pub fn arity_mismatch(name: &Ident, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn parameters_already_bound(name: &Ident) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ParametersAlreadyBound {
        name: name.to_string(),
    })
}

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

// Member errors

#[cold]
pub fn null_reference(member: &Ident) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NullReference {
        member: member.to_string(),
    })
}

#[cold]
pub fn member_not_found(member: &Ident, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MemberNotFound {
        member: member.to_string(),
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn immutable_target(member: &Ident, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ImmutableTarget {
        member: member.to_string(),
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn empty_member_path() -> EvalError {
    EvalError::from_kind(EvalErrorKind::EmptyMemberPath)
}

#[cold]
pub fn class_not_found(name: &Ident) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ClassNotFound {
        name: name.to_string(),
    })
}

// Operator errors

#[cold]
pub fn binary_type_mismatch(op: BinaryOp, left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch {
        op,
        left: left.to_string(),
        right: right.to_string(),
    })
}

#[cold]
pub fn unary_type_mismatch(op: UnaryOp, operand: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnaryTypeMismatch {
        op,
        operand: operand.to_string(),
    })
}

#[cold]
pub fn expected_number(context: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ExpectedNumber {
        context: context.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn invalid_argument(function: &Ident, expected: &'static str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidArgument {
        function: function.to_string(),
        expected,
        got: got.to_string(),
    })
}

#[cold]
pub fn unknown_operator(symbol: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownOperator {
        symbol: symbol.to_string(),
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn numeric_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NumericOverflow {
        operation: operation.to_string(),
    })
}

// WITH errors

#[cold]
pub fn empty_with_stack() -> EvalError {
    EvalError::from_kind(EvalErrorKind::EmptyWithStack)
}

#[cold]
pub fn with_target_not_object(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::WithTargetNotObject {
        type_name: type_name.to_string(),
    })
}

// Loop and control errors

#[cold]
pub fn zero_step() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ZeroStep)
}

#[cold]
pub fn iteration_limit(limit: u64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IterationLimit { limit })
}

#[cold]
pub fn unmatched_return() -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnmatchedReturn)
}

#[cold]
pub fn unmatched_exit() -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnmatchedExit)
}
