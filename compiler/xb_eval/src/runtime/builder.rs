//! `RuntimeBuilder` for creating runtimes with non-default configuration.

use super::Runtime;
use crate::builtins;
use crate::classes::ClassRegistry;
use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::eval_mode::EvalMode;
use crate::print_handler::SharedPrintHandler;
use crate::shared::SharedMutableRegistry;
use crate::with_context::WithStack;

/// Builder for [`Runtime`].
///
/// Every setting defaults from the [`EvalMode`]; explicit settings override
/// the mode's policy regardless of call order.
#[allow(clippy::option_option, reason = "outer None selects the mode's default")]
pub struct RuntimeBuilder {
    mode: EvalMode,
    print_handler: Option<SharedPrintHandler>,
    classes: Option<SharedMutableRegistry<ClassRegistry>>,
    max_call_depth: Option<Option<usize>>,
    max_while_iterations: Option<Option<u64>>,
    builtins: bool,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self {
            mode: EvalMode::default(),
            print_handler: None,
            classes: None,
            max_call_depth: None,
            max_while_iterations: None,
            builtins: true,
        }
    }

    #[must_use]
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Where `WRITE` output goes. Default: stdout for `Interpret`, a buffer
    /// for `TestRun`.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Share an existing class registry instead of creating a fresh one.
    #[must_use]
    pub fn classes(mut self, classes: SharedMutableRegistry<ClassRegistry>) -> Self {
        self.classes = Some(classes);
        self
    }

    /// Call-depth limit; `None` removes it.
    #[must_use]
    pub fn max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    /// `DO WHILE` iteration guard; `None` removes it.
    #[must_use]
    pub fn max_while_iterations(mut self, limit: Option<u64>) -> Self {
        self.max_while_iterations = Some(limit);
        self
    }

    /// Skip binding `VAL`, `STR`, `IIF` and `LEN` in the global scope.
    #[must_use]
    pub fn without_builtins(mut self) -> Self {
        self.builtins = false;
        self
    }

    pub fn build(self) -> Runtime {
        let mode = self.mode;
        let mut env = Environment::new();
        if self.builtins {
            builtins::register(&mut env);
        }
        let max_call_depth = self
            .max_call_depth
            .unwrap_or_else(|| mode.max_call_depth());
        tracing::debug!(?mode, ?max_call_depth, "building runtime");
        Runtime {
            env,
            with_stack: WithStack::new(),
            call_stack: CallStack::new(max_call_depth),
            classes: self.classes.unwrap_or_default(),
            print: self
                .print_handler
                .unwrap_or_else(|| mode.default_print_handler()),
            mode,
            max_while_iterations: self
                .max_while_iterations
                .unwrap_or_else(|| mode.max_while_iterations()),
        }
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
