//! Structured statements: `IF`, `FOR`, `DO WHILE`, `EXIT` and the program
//! boundary.
//!
//! Loops consume `Flow::Exit` and pass `Flow::Return` through untouched, so
//! `RETURN` inside any nesting of loops reaches the enclosing call frame.

use xb_ir::Ident;

use super::Runtime;
use crate::control::Flow;
use crate::errors::{
    iteration_limit, unmatched_exit, unmatched_return, zero_step, EvalError, EvalResult,
    ExecResult,
};
use crate::loops::{continues, default_step, expect_number};
use crate::value::Value;

impl Runtime {
    /// `EXIT`: leave the innermost loop.
    #[expect(clippy::unused_self, reason = "statement calls share the runtime receiver")]
    pub fn exit_loop(&self) -> ExecResult {
        Ok(Flow::Exit)
    }

    /// `IF cond ... ELSE ... ENDIF`.
    pub fn if_else<T, E>(&mut self, cond: &Value, then: T, otherwise: E) -> ExecResult
    where
        T: FnOnce(&mut Runtime) -> ExecResult,
        E: FnOnce(&mut Runtime) -> ExecResult,
    {
        if cond.is_truthy() {
            then(self)
        } else {
            otherwise(self)
        }
    }

    /// `FOR var = start TO end [STEP step] ... NEXT`.
    ///
    /// Without `STEP` the loop counts towards `end`: `+1` if `end >= start`,
    /// `-1` otherwise. The counter is kept apart from `var`, so assigning
    /// `var` in the body does not change the iteration sequence.
    pub fn for_loop<F>(
        &mut self,
        var: &str,
        start: &Value,
        end: &Value,
        step: Option<&Value>,
        mut body: F,
    ) -> ExecResult
    where
        F: FnMut(&mut Runtime) -> ExecResult,
    {
        let start = expect_number(start, "FOR start")?;
        let end = expect_number(end, "FOR bound")?;
        let step = match step {
            Some(step) => expect_number(step, "FOR step")?,
            None => default_step(start, end),
        };
        if step == 0.0 {
            return Err(zero_step());
        }
        let var = Ident::new(var);
        let mut k = 0.0_f64;
        loop {
            let i = start + k * step;
            if !continues(i, end, step)? {
                break;
            }
            self.env.set(var.clone(), Value::Number(i));
            match body(self)? {
                Flow::Next => {}
                Flow::Exit => break,
                ret @ Flow::Return(_) => return Ok(ret),
            }
            k += 1.0;
        }
        Ok(Flow::Next)
    }

    /// `DO WHILE cond ... ENDDO`, bounded by the runtime's iteration guard.
    pub fn do_while<C, F>(&mut self, mut cond: C, mut body: F) -> ExecResult
    where
        C: FnMut(&mut Runtime) -> EvalResult,
        F: FnMut(&mut Runtime) -> ExecResult,
    {
        let mut iterations: u64 = 0;
        while cond(self)?.is_truthy() {
            if let Some(limit) = self.max_while_iterations {
                if iterations >= limit {
                    return Err(iteration_limit(limit));
                }
            }
            iterations += 1;
            match body(self)? {
                Flow::Next => {}
                Flow::Exit => break,
                ret @ Flow::Return(_) => return Ok(ret),
            }
        }
        Ok(Flow::Next)
    }

    /// Run a whole program body. `RETURN` and `EXIT` that escape it are errors.
    pub fn run_program<F>(&mut self, body: F) -> Result<(), EvalError>
    where
        F: FnOnce(&mut Runtime) -> ExecResult,
    {
        tracing::debug!(mode = ?self.mode, "run program");
        match body(self)? {
            Flow::Next => Ok(()),
            Flow::Return(_) => Err(unmatched_return()),
            Flow::Exit => Err(unmatched_exit()),
        }
    }
}
