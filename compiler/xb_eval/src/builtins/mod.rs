//! Builtin functions bound in the global scope.
//!
//! | Name | Arity | Result |
//! |---|---|---|
//! | `VAL(s)` | 1 | leading numeric prefix of `s` (`"12ab"` → 12, no digits → 0); Null → 0 |
//! | `STR(v)` | 1 | `v` formatted like `WRITE`; Null → `""` |
//! | `IIF(c, a, b)` | 3 | `a` if `c` is truthy, else `b` |
//! | `LEN(v)` | 1 | characters in a string, elements in an array |
//!
//! Builtins are ordinary global bindings, so a script may shadow them.

use xb_ir::Ident;

use crate::environment::Environment;
use crate::errors::{invalid_argument, EvalResult};
use crate::runtime::Runtime;
use crate::value::{Routine, Value};

pub(crate) fn register(env: &mut Environment) {
    let builtins = [
        Routine::native("VAL", 1, val),
        Routine::native("STR", 1, to_str),
        Routine::native("IIF", 3, iif),
        Routine::native("LEN", 1, len),
    ];
    for routine in builtins {
        env.define_global(routine.name().clone(), Value::Routine(routine));
    }
}

fn val(_rt: &mut Runtime, args: &[Value]) -> EvalResult {
    match &args[0] {
        Value::Null => Ok(Value::Number(0.0)),
        Value::Number(n) => Ok(Value::Number(*n)),
        Value::Str(s) => Ok(Value::Number(parse_numeric_prefix(s))),
        other => Err(invalid_argument(
            &Ident::new("VAL"),
            "a string",
            other.type_name(),
        )),
    }
}

/// Parse `[ws][+-]digits[.digits]`, ignoring whatever follows.
pub(crate) fn parse_numeric_prefix(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return 0.0;
    }
    text[..end].parse().unwrap_or(0.0)
}

fn to_str(_rt: &mut Runtime, args: &[Value]) -> EvalResult {
    match &args[0] {
        Value::Null => Ok(Value::string("")),
        other => Ok(Value::string(other.to_string())),
    }
}

fn iif(_rt: &mut Runtime, args: &[Value]) -> EvalResult {
    if args[0].is_truthy() {
        Ok(args[1].clone())
    } else {
        Ok(args[2].clone())
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "lengths are reported as language numbers"
)]
fn len(_rt: &mut Runtime, args: &[Value]) -> EvalResult {
    match &args[0] {
        Value::Str(s) => Ok(Value::Number(s.chars().count() as f64)),
        Value::Array(items) => Ok(Value::Number(items.len() as f64)),
        other => Err(invalid_argument(
            &Ident::new("LEN"),
            "a string or array",
            other.type_name(),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;
