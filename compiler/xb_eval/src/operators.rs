//! Binary operator implementations.
//!
//! Dispatch is a match over the operand kinds. There is no implicit coercion
//! between kinds: `1 + "x"` is a `TypeCoercionError`, not `"1x"`. The only
//! cross-kind rules are equality against Null and the logical operators,
//! which work on truthiness.

use xb_ir::BinaryOp;

use crate::errors::{
    binary_type_mismatch, division_by_zero, modulo_by_zero, numeric_overflow, EvalError,
    EvalResult,
};
use crate::value::Value;

/// Reject results that left the finite range (overflow, `0 ^ -1`, ...).
#[inline]
fn checked_arith(result: f64, op_name: &'static str) -> EvalResult {
    if result.is_finite() {
        Ok(Value::Number(result))
    } else {
        Err(numeric_overflow(op_name))
    }
}

#[inline]
fn checked_div(a: f64, b: f64) -> EvalResult {
    if b == 0.0 {
        Err(division_by_zero())
    } else {
        checked_arith(a / b, "division")
    }
}

/// Floored modulo: the result takes the sign of the divisor (`-7 % 3 = 2`).
#[inline]
fn checked_mod(a: f64, b: f64) -> EvalResult {
    if b == 0.0 {
        return Err(modulo_by_zero());
    }
    let r = a % b;
    let r = if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    };
    checked_arith(r, "modulo")
}

/// Evaluate `left op right`.
pub fn evaluate_binary(left: &Value, op: BinaryOp, right: &Value) -> EvalResult {
    if op.is_logical() {
        return Ok(eval_logical(left.is_truthy(), op, right.is_truthy()));
    }
    if matches!(op, BinaryOp::Eq | BinaryOp::NotEq) {
        let eq = values_equal(left, op, right)?;
        return Ok(Value::Bool(if op == BinaryOp::Eq { eq } else { !eq }));
    }
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => eval_number_binary(*a, op, *b),
        (Value::Str(a), Value::Str(b)) => eval_string_binary(a, op, b, left, right),
        _ => Err(mismatch(left, op, right)),
    }
}

#[cold]
fn mismatch(left: &Value, op: BinaryOp, right: &Value) -> EvalError {
    binary_type_mismatch(op, left.type_name(), right.type_name())
}

fn eval_logical(a: bool, op: BinaryOp, b: bool) -> Value {
    Value::Bool(match op {
        BinaryOp::And => a && b,
        _ => a || b,
    })
}

/// Language equality.
///
/// Null equals only Null, and compares unequal to every other kind. Objects
/// and callables compare by identity; arrays element by element. Any other
/// kind mismatch is an error.
#[allow(clippy::float_cmp, reason = "language equality is exact")]
fn values_equal(left: &Value, op: BinaryOp, right: &Value) -> Result<bool, EvalError> {
    match (left, right) {
        (Value::Null, Value::Null) => Ok(true),
        (Value::Null, _) | (_, Value::Null) => Ok(false),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        (Value::Number(a), Value::Number(b)) => Ok(a == b),
        (Value::Str(a), Value::Str(b)) => Ok(a == b),
        (Value::Array(a), Value::Array(b)) => {
            if a.len() != b.len() {
                return Ok(false);
            }
            for (x, y) in a.iter().zip(b.iter()) {
                if !values_equal(x, op, y)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        (Value::Object(a), Value::Object(b)) => Ok(a.ptr_eq(b)),
        (
            Value::Routine(_) | Value::Method(_),
            Value::Routine(_) | Value::Method(_),
        ) => Ok(left == right),
        _ => Err(mismatch(left, op, right)),
    }
}

fn eval_number_binary(a: f64, op: BinaryOp, b: f64) -> EvalResult {
    match op {
        BinaryOp::Add => checked_arith(a + b, "addition"),
        BinaryOp::Sub => checked_arith(a - b, "subtraction"),
        BinaryOp::Mul => checked_arith(a * b, "multiplication"),
        BinaryOp::Div => checked_div(a, b),
        BinaryOp::Mod => checked_mod(a, b),
        BinaryOp::Pow => checked_arith(a.powf(b), "exponentiation"),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        _ => Err(binary_type_mismatch(op, "number", "number")),
    }
}

fn eval_string_binary(a: &str, op: BinaryOp, b: &str, left: &Value, right: &Value) -> EvalResult {
    match op {
        BinaryOp::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::string(joined))
        }
        // `needle $ haystack`
        BinaryOp::Contains => Ok(Value::Bool(b.contains(a))),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        _ => Err(mismatch(left, op, right)),
    }
}
