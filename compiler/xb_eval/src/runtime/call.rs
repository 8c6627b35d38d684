//! Invocation: `CALL_ANY`, `NEW`, `PARAMETER`, `RETURN` and `THIS`.
//!
//! Frame protocol for one call:
//! 1. push a `CallFrame` (depth check) holding the arguments
//! 2. push the frame's scope; methods get `THIS`/`SELF` bound there
//! 3. run the body; a script body binds its arguments with `PARAMETER`
//! 4. convert the body's `Flow` into the call's value
//! 5. truncate the environment and `WITH` stacks back to their entry depth
//!
//! Step 5 runs on every path, so a `RETURN` from inside nested loops and
//! `WITH` blocks leaves no scope or receiver behind.

use std::sync::Arc;

use xb_ir::Ident;

use super::Runtime;
use crate::classes::CONSTRUCTOR;
use crate::control::Flow;
use crate::diagnostics::CallFrame;
use crate::errors::{
    arity_mismatch, not_callable, parameters_already_bound, this_outside_method,
    unmatched_exit, unmatched_return, EvalError, EvalResult, ExecResult,
};
use crate::stack::with_stack_headroom;
use crate::value::{ObjectRef, Routine, RoutineKind, Value};

/// Names bound to the receiver inside a method.
const RECEIVER_NAMES: [&str; 2] = ["THIS", "SELF"];

/// Frame name used for `PARAMETER` at program level.
const PROGRAM_FRAME: &str = "PROGRAM";

impl Runtime {
    /// `CALL_ANY(callee, args)`: invoke a routine or bound method.
    #[tracing::instrument(level = "debug", skip_all, fields(callee = %callee, argc = args.len()))]
    pub fn call_any(&mut self, callee: &Value, args: Vec<Value>) -> EvalResult {
        match callee {
            Value::Routine(routine) => self.invoke(routine, None, args),
            Value::Method(method) => {
                self.invoke(&method.routine, Some(method.receiver.clone()), args)
            }
            other => Err(not_callable(other.type_name())),
        }
    }

    /// `CALL(base, path, args)`: `GET` then `CALL_ANY`.
    pub fn call(&mut self, base: &Value, path: &str, args: Vec<Value>) -> EvalResult {
        let callee = self.get(base, path)?;
        self.call_any(&callee, args)
    }

    /// Call the routine bound to `name` (`DO name WITH args`, `name(args)`).
    pub fn call_name(&mut self, name: &str, args: Vec<Value>) -> EvalResult {
        let callee = self.get_name(name)?;
        self.call_any(&callee, args)
    }

    /// `NEW(className, args)`: allocate an instance, apply field defaults
    /// (ancestors first), then run `INIT` with `args` if the class has one.
    #[tracing::instrument(level = "debug", skip(self, args), fields(argc = args.len()))]
    pub fn new_object(&mut self, class_name: &str, args: Vec<Value>) -> EvalResult {
        let name = Ident::new(class_name);
        let class = self.classes.read().lookup(&name)?;
        let object = ObjectRef::new(Arc::clone(&class));
        class.apply_defaults(&object);
        match class.constructor() {
            Some(init) => {
                self.invoke(&init, Some(object.clone()), args)?;
            }
            None if !args.is_empty() => {
                return Err(arity_mismatch(
                    &Ident::new(&format!("{}.{CONSTRUCTOR}", class.name())),
                    0,
                    args.len(),
                ));
            }
            None => {}
        }
        Ok(Value::Object(object))
    }

    /// Run the `DESTROY` method of `object`'s class chain, if any, with no
    /// arguments. Called by `DELETE_NAME` before the binding goes away.
    pub(super) fn run_destructor(&mut self, object: &ObjectRef) -> Result<(), EvalError> {
        let Some(destroy) = object.class().destructor() else {
            return Ok(());
        };
        tracing::debug!(class = %object.class_name(), "running destructor");
        self.invoke(&destroy, Some(object.clone()), Vec::new())
            .map(drop)
    }

    /// `PARAMETER(names)`: bind the current call's arguments, in order.
    ///
    /// Runs at most once per frame. At program level there are no
    /// arguments, so only an empty list is accepted.
    pub fn parameter(&mut self, names: &[&str]) -> ExecResult {
        let Some(frame) = self.call_stack.current_frame_mut() else {
            if names.is_empty() {
                return Ok(Flow::Next);
            }
            return Err(arity_mismatch(&Ident::new(PROGRAM_FRAME), names.len(), 0));
        };
        if frame.params_bound {
            return Err(parameters_already_bound(&frame.name));
        }
        if frame.args.len() != names.len() {
            return Err(arity_mismatch(&frame.name, names.len(), frame.args.len()));
        }
        frame.params_bound = true;
        let args = std::mem::take(&mut frame.args);
        for (name, value) in names.iter().zip(args) {
            self.env.define(Ident::new(name), value);
        }
        Ok(Flow::Next)
    }

    /// `RETURN(value)`: unwind to the nearest call frame.
    pub fn ret(&self, value: Value) -> ExecResult {
        if self.call_stack.is_empty() {
            return Err(unmatched_return());
        }
        Ok(Flow::Return(value))
    }

    /// `GET_THIS()`: receiver of the current method call.
    pub fn get_this(&self) -> EvalResult {
        self.call_stack
            .current_frame()
            .and_then(|frame| frame.receiver.clone())
            .map(Value::Object)
            .ok_or_else(this_outside_method)
    }

    fn invoke(
        &mut self,
        routine: &Routine,
        receiver: Option<ObjectRef>,
        args: Vec<Value>,
    ) -> EvalResult {
        if let Some(arity) = routine.arity() {
            if args.len() != arity {
                return Err(arity_mismatch(routine.name(), arity, args.len()));
            }
        }
        self.enter_frame(routine.name().clone(), receiver, args)?;
        let result = with_stack_headroom(|| self.run_body(routine))
            .map_err(|err| self.call_stack.attach_backtrace(err));
        self.leave_frame();
        result
    }

    fn run_body(&mut self, routine: &Routine) -> EvalResult {
        match routine.kind() {
            RoutineKind::Native { func, .. } => {
                let args = self
                    .call_stack
                    .current_frame_mut()
                    .map(|frame| std::mem::take(&mut frame.args))
                    .unwrap_or_default();
                func(self, &args)
            }
            RoutineKind::Script { body, .. } => {
                let body = Arc::clone(body);
                let value = match body(self)? {
                    Flow::Return(value) => value,
                    Flow::Next => Value::Null,
                    Flow::Exit => return Err(unmatched_exit()),
                };
                self.check_unbound_args()?;
                Ok(value)
            }
        }
    }

    /// A script that never ran `PARAMETER` takes no arguments. Scripts
    /// without a declared arity can only be checked here, after the body.
    fn check_unbound_args(&self) -> Result<(), EvalError> {
        match self.call_stack.current_frame() {
            Some(frame) if !frame.params_bound && !frame.args.is_empty() => {
                Err(arity_mismatch(&frame.name, 0, frame.args.len()))
            }
            _ => Ok(()),
        }
    }

    fn enter_frame(
        &mut self,
        name: Ident,
        receiver: Option<ObjectRef>,
        args: Vec<Value>,
    ) -> Result<(), EvalError> {
        let frame = CallFrame {
            name,
            receiver: receiver.clone(),
            args,
            params_bound: false,
            env_depth: self.env.depth(),
            with_depth: self.with_stack.depth(),
        };
        tracing::debug!(frame = %frame.display_name(), depth = self.call_stack.depth() + 1, "enter frame");
        self.call_stack.push(frame)?;
        self.env.push_scope();
        if let Some(receiver) = receiver {
            for name in RECEIVER_NAMES {
                self.env
                    .define(Ident::new(name), Value::Object(receiver.clone()));
            }
        }
        Ok(())
    }

    fn leave_frame(&mut self) {
        if let Some(frame) = self.call_stack.pop() {
            tracing::debug!(frame = %frame.display_name(), "leave frame");
            self.env.truncate(frame.env_depth);
            self.with_stack.truncate(frame.with_depth);
        }
    }
}
