//! xBase evaluation runtime.
//!
//! A front-end compiles an xBase/dBase script into a sequence of calls on a
//! [`Runtime`]: name lookup and assignment, member access along dotted paths,
//! class instantiation, `WITH` blocks, loops and operator evaluation.
//!
//! # Architecture
//!
//! - `Environment`: dynamically scoped variables on a scope stack
//! - `WithStack`: implicit receivers of nested `WITH` blocks
//! - `CallStack`: call frames with a depth limit and backtraces
//! - `ClassRegistry`: class definitions with single inheritance
//! - `evaluate_binary` / `evaluate_unary`: enum-based operator dispatch
//! - `Flow`: `RETURN` and `EXIT` travel as values, errors as `EvalError`
//!
//! ```text
//! let mut rt = Runtime::builder().mode(EvalMode::TestRun).build();
//! rt.set_name("x", Value::from(1));
//! let y = rt.binop(&rt.get_name("X")?, "+", &Value::from(2))?;
//! rt.write(&y);
//! assert_eq!(rt.output(), "3\n");
//! ```

mod builtins;
pub mod classes;
pub mod control;
pub mod diagnostics;
pub mod environment;
pub mod errors;
mod eval_mode;
pub mod loops;
pub mod members;
mod operators;
mod print_handler;
pub mod runtime;
mod shared;
mod stack;
mod unary_operators;
pub mod value;
mod with_context;

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;

use std::sync::Once;

pub use xb_ir::{BinaryOp, Ident, UnaryOp};

pub use classes::{
    ClassBuilder, ClassDef, ClassRegistry, Constant, CONSTRUCTOR, DESTRUCTOR, OBJECT_CLASS,
};
pub use control::Flow;
pub use diagnostics::{CallFrame, CallStack};
pub use environment::{Environment, Scope};
pub use eval_mode::{EvalMode, DEFAULT_WHILE_LIMIT};
pub use members::MemberPath;
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandlerImpl, SharedPrintHandler,
};
pub use runtime::{Runtime, RuntimeBuilder, WithScope};
pub use shared::SharedMutableRegistry;
pub use unary_operators::evaluate_unary;
pub use value::{BoundMethod, Heap, NativeFn, ObjectRef, Routine, RoutineKind, Value};
pub use with_context::WithStack;

// Re-export error constructors for convenience (canonical path is xb_eval::errors::*)
pub use errors::{
    // Names and calls
    arity_mismatch, not_callable, parameters_already_bound, stack_overflow, this_outside_method,
    undefined_name,
    // Members and classes
    class_not_found, empty_member_path, immutable_target, member_not_found, null_reference,
    // Types and operators
    binary_type_mismatch, expected_number, invalid_argument, unary_type_mismatch,
    unknown_operator,
    // Arithmetic
    division_by_zero, modulo_by_zero, numeric_overflow,
    // WITH
    empty_with_stack, with_target_not_object,
    // Loops and control flow
    iteration_limit, unmatched_exit, unmatched_return, zero_step,
};
pub use errors::{
    BacktraceFrame, ErrorCategory, EvalBacktrace, EvalError, EvalErrorKind, EvalNote,
    EvalResult, ExecResult,
};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=xb_eval=debug`, or
/// `RUST_LOG=xb_eval=trace` to also see every assignment.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // A host may already have installed a subscriber.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
