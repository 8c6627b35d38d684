//! Evaluation modes.
//!
//! The same runtime serves a script host and a test harness. `EvalMode`
//! selects the policies that differ between them; `RuntimeBuilder` can still
//! override each one individually.

use crate::print_handler::{buffer_handler, stdout_handler, SharedPrintHandler};

/// Iteration guard for `DO WHILE` loops.
pub const DEFAULT_WHILE_LIMIT: u64 = 1_000_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Running a script for a host: output to stdout.
    #[default]
    Interpret,
    /// Running under a test harness: output captured, tighter call depth so
    /// runaway recursion fails fast.
    TestRun,
}

impl EvalMode {
    /// Whether `WRITE` reaches the process's standard output.
    #[inline]
    pub fn allows_io(self) -> bool {
        matches!(self, Self::Interpret)
    }

    /// Maximum call depth before `StackOverflowError`.
    ///
    /// - `Interpret`: 1000
    /// - `TestRun`: 200
    #[inline]
    pub fn max_call_depth(self) -> Option<usize> {
        match self {
            Self::Interpret => Some(1000),
            Self::TestRun => Some(200),
        }
    }

    /// `DO WHILE` iteration guard. `None` disables it.
    #[inline]
    pub fn max_while_iterations(self) -> Option<u64> {
        match self {
            Self::Interpret | Self::TestRun => Some(DEFAULT_WHILE_LIMIT),
        }
    }

    /// Print sink used when the host does not supply one.
    pub fn default_print_handler(self) -> SharedPrintHandler {
        if self.allows_io() {
            stdout_handler()
        } else {
            buffer_handler()
        }
    }
}
