//! The `Runtime`: one execution's state and the operations a front-end emits.
//!
//! A compiled script is a sequence of calls on a `Runtime`, in program order.
//! The runtime owns the environment stack, the `WITH` stack and the call
//! stack; member access and operators are stateless services it forwards to.
//!
//! Operations come in two shapes:
//! - expression operations return [`EvalResult`] (`get_name`, `binop`, `call_any`, ...)
//! - statement operations return [`ExecResult`] so that `RETURN` and `EXIT`
//!   travel as [`Flow`] values (`parameter`, `ret`, `for_loop`, ...)
//!
//! [`Flow`]: crate::Flow

mod builder;
mod call;
mod control_flow;
mod scope_guard;

use std::sync::Arc;

use xb_ir::{BinaryOp, Ident, UnaryOp};

use crate::classes::{ClassBuilder, ClassDef, ClassRegistry};
use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::errors::{
    empty_with_stack, undefined_name, unknown_operator, EvalError, EvalResult, ExecResult,
};
use crate::eval_mode::EvalMode;
use crate::members::{self, MemberPath};
use crate::print_handler::SharedPrintHandler;
use crate::shared::SharedMutableRegistry;
use crate::value::{NativeFn, Routine, Value};
use crate::with_context::WithStack;
use crate::{loops, operators, unary_operators};

pub use builder::RuntimeBuilder;
pub use scope_guard::WithScope;

/// One execution of a script.
///
/// Not shared between concurrently running programs; create one runtime per
/// execution. Class registries may be shared (see [`RuntimeBuilder::classes`]).
pub struct Runtime {
    env: Environment,
    with_stack: WithStack,
    call_stack: CallStack,
    classes: SharedMutableRegistry<ClassRegistry>,
    print: SharedPrintHandler,
    mode: EvalMode,
    max_while_iterations: Option<u64>,
}

impl Runtime {
    /// Runtime in `Interpret` mode with a fresh class registry.
    pub fn new() -> Self {
        RuntimeBuilder::new().build()
    }

    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    #[inline]
    pub fn mode(&self) -> EvalMode {
        self.mode
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    /// Output captured by a buffer print handler.
    pub fn output(&self) -> String {
        self.print.get_output()
    }

    pub fn classes(&self) -> &SharedMutableRegistry<ClassRegistry> {
        &self.classes
    }

    pub fn define_class(&self, class: ClassBuilder) -> Result<Arc<ClassDef>, EvalError> {
        self.classes.write().define(class)
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Number of live call frames.
    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    /// Number of active `WITH` blocks.
    pub fn with_depth(&self) -> usize {
        self.with_stack.depth()
    }

    // Output

    /// `WRITE v`: print the value followed by a newline.
    pub fn write(&self, value: &Value) {
        self.print.println(&value.to_string());
    }

    /// `WRITE a, b, ...`: print the values back to back, then a newline.
    pub fn write_all(&self, values: &[Value]) {
        let line: String = values.iter().map(ToString::to_string).collect();
        self.print.println(&line);
    }

    // Names

    /// `GET_NAME`: resolve a variable, innermost scope first.
    pub fn get_name(&self, name: &str) -> EvalResult {
        let name = Ident::new(name);
        self.env.lookup(&name).ok_or_else(|| undefined_name(&name))
    }

    /// `SET_NAME`: assign the nearest binding, or create one in the
    /// innermost scope.
    pub fn set_name(&mut self, name: &str, value: Value) {
        let name = Ident::new(name);
        tracing::trace!(%name, %value, "set_name");
        self.env.set(name, value);
    }

    /// `DELETE_NAME` (`RELEASE`): remove the nearest binding.
    ///
    /// If the bound value is an object whose class chain defines `DESTROY`,
    /// that method runs first. A failing `DESTROY` leaves the binding in place.
    pub fn delete_name(&mut self, name: &str) -> Result<(), EvalError> {
        let name = Ident::new(name);
        let value = self.env.lookup(&name).ok_or_else(|| undefined_name(&name))?;
        if let Value::Object(object) = &value {
            self.run_destructor(object)?;
        }
        self.env.remove(&name);
        Ok(())
    }

    /// Bind a value in the global scope regardless of the current frame.
    pub fn define_global(&mut self, name: &str, value: Value) {
        self.env.define_global(Ident::new(name), value);
    }

    /// Bind a script procedure or function globally under `name`.
    pub fn define_procedure<F>(&mut self, name: &str, body: F)
    where
        F: Fn(&mut Runtime) -> ExecResult + Send + Sync + 'static,
    {
        self.define_routine(Routine::script(name, body));
    }

    /// Bind a host function with a fixed arity globally under `name`.
    pub fn define_native(&mut self, name: &str, arity: usize, func: NativeFn) {
        self.define_routine(Routine::native(name, arity, func));
    }

    /// Bind any routine globally under its own name.
    pub fn define_routine(&mut self, routine: Routine) {
        self.env
            .define_global(routine.name().clone(), Value::Routine(routine));
    }

    // Members

    /// `GET(base, path)` with a dotted path (`"a.b.c"`).
    pub fn get(&self, base: &Value, path: &str) -> EvalResult {
        members::get_path(base, &MemberPath::parse(path)?)
    }

    /// `SET(base, path, value)` with a dotted path.
    pub fn set(&self, base: &Value, path: &str, value: Value) -> Result<(), EvalError> {
        members::set_path(base, &MemberPath::parse(path)?, value)
    }

    pub fn get_path(&self, base: &Value, path: &MemberPath) -> EvalResult {
        members::get_path(base, path)
    }

    pub fn set_path(&self, base: &Value, path: &MemberPath, value: Value) -> Result<(), EvalError> {
        members::set_path(base, path, value)
    }

    /// `GET_ATTR(base, name)`: single-step member lookup.
    pub fn get_attr(&self, base: &Value, name: &str) -> EvalResult {
        members::get_attr(base, &Ident::new(name))
    }

    // WITH

    /// `PUSH_WITH(base)`. Prefer [`with_receiver`](Self::with_receiver) or
    /// [`with_scope`](Self::with_scope), which pop on every exit path.
    pub fn push_with(&mut self, base: &Value) -> Result<(), EvalError> {
        self.with_stack.push(base)
    }

    /// `POP_WITH()`.
    ///
    /// Only receivers pushed by the current call frame can be popped; a
    /// callee that pops its caller's receiver gets a `WithContextError`.
    pub fn pop_with(&mut self) -> Result<(), EvalError> {
        let floor = self
            .call_stack
            .current_frame()
            .map_or(0, |frame| frame.with_depth);
        if self.with_stack.depth() <= floor {
            return Err(empty_with_stack());
        }
        self.with_stack.pop().map(drop)
    }

    /// `WITH_SET(path, value)`: `SET` on the innermost receiver.
    pub fn with_set(&self, path: &str, value: Value) -> Result<(), EvalError> {
        let receiver = Value::Object(self.with_stack.top()?.clone());
        self.set(&receiver, path, value)
    }

    /// `WITH_GET(path)`: `GET` on the innermost receiver.
    pub fn with_get(&self, path: &str) -> EvalResult {
        let receiver = Value::Object(self.with_stack.top()?.clone());
        self.get(&receiver, path)
    }

    // Operators

    /// `BINOP(a, op, b)` with the operator's source spelling.
    pub fn binop(&self, a: &Value, op: &str, b: &Value) -> EvalResult {
        let op = BinaryOp::from_symbol(op).ok_or_else(|| unknown_operator(op))?;
        self.binary(a, op, b)
    }

    #[expect(
        clippy::unused_self,
        reason = "operators are runtime calls like every other emitted operation"
    )]
    pub fn binary(&self, a: &Value, op: BinaryOp, b: &Value) -> EvalResult {
        operators::evaluate_binary(a, op, b)
    }

    /// `UNOP(op, a)` with the operator's source spelling.
    pub fn unop(&self, op: &str, a: &Value) -> EvalResult {
        let op = UnaryOp::from_symbol(op).ok_or_else(|| unknown_operator(op))?;
        self.unary(op, a)
    }

    #[expect(
        clippy::unused_self,
        reason = "operators are runtime calls like every other emitted operation"
    )]
    pub fn unary(&self, op: UnaryOp, a: &Value) -> EvalResult {
        unary_operators::evaluate_unary(op, a)
    }

    /// `TRUE(v)`.
    #[expect(
        clippy::unused_self,
        reason = "operators are runtime calls like every other emitted operation"
    )]
    pub fn truthy(&self, value: &Value) -> bool {
        value.is_truthy()
    }

    /// `FOR_COND(i, end, step)`.
    #[expect(
        clippy::unused_self,
        reason = "operators are runtime calls like every other emitted operation"
    )]
    pub fn for_cond(&self, i: &Value, end: &Value, step: &Value) -> Result<bool, EvalError> {
        loops::for_cond(i, end, step)
    }

    /// `RANGE_INCL(start, end, step)`.
    #[expect(
        clippy::unused_self,
        reason = "operators are runtime calls like every other emitted operation"
    )]
    pub fn range_incl(&self, start: &Value, end: &Value, step: &Value) -> EvalResult {
        loops::range_incl(start, end, step)
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
