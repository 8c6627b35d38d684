//! Statement control signals.
//!
//! Every statement-level runtime operation returns an [`ExecResult`]: `Ok(Flow)`
//! for normal or abrupt completion, `Err` for a fatal error. `RETURN` and `EXIT`
//! are values, never errors, so they cannot be swallowed by error handling.
//!
//! [`ExecResult`]: crate::ExecResult

use crate::value::Value;

/// How a statement completed.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub enum Flow {
    /// Continue with the next statement.
    Next,
    /// `EXIT`: leave the innermost loop.
    Exit,
    /// `RETURN v`: unwind to the nearest call frame.
    Return(Value),
}

impl Flow {
    /// Returns `true` if the enclosing construct must stop executing its body.
    #[inline]
    pub fn is_abrupt(&self) -> bool {
        !matches!(self, Flow::Next)
    }
}

/// Execute a statement and propagate any abrupt completion to the caller.
///
/// Expands to an early `return Ok(flow)` for `Exit`/`Return`, and to `?` for
/// errors, so script bodies read as straight-line code:
///
/// ```text
/// Routine::script("F", |rt| {
///     exec!(rt.parameter(&["n"]));
///     exec!(rt.for_loop("i", 1, 10, None, |rt| { ... }));
///     rt.ret(Value::Null)
/// })
/// ```
#[macro_export]
macro_rules! exec {
    ($stmt:expr) => {
        match $stmt? {
            $crate::Flow::Next => {}
            abrupt => return ::core::result::Result::Ok(abrupt),
        }
    };
}
