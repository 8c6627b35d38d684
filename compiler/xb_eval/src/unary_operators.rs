//! Unary operator implementations.

use xb_ir::UnaryOp;

use crate::errors::{unary_type_mismatch, EvalResult};
use crate::value::Value;

/// Evaluate `op value`.
///
/// `-` and `+` take numbers only; `NOT` works on the truthiness of any value.
pub fn evaluate_unary(op: UnaryOp, value: &Value) -> EvalResult {
    match (op, value) {
        (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
        (UnaryOp::Plus, Value::Number(n)) => Ok(Value::Number(*n)),
        (UnaryOp::Not, v) => Ok(Value::Bool(!v.is_truthy())),
        (op, v) => Err(unary_type_mismatch(op, v.type_name())),
    }
}
