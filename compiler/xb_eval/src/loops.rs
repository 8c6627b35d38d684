//! Counted-loop evaluation: `FOR_COND` and inclusive ranges.
//!
//! Bounds are inclusive in both directions. The step's sign picks the
//! direction; a zero step can never terminate and is rejected up front.

use crate::errors::{expected_number, iteration_limit, zero_step, EvalError, EvalResult};
use crate::value::Value;

/// Longest array `RANGE_INCL` will build.
pub const MAX_RANGE_LEN: u64 = 1_000_000;

pub(crate) fn expect_number(value: &Value, context: &str) -> Result<f64, EvalError> {
    value
        .as_number()
        .ok_or_else(|| expected_number(context, value.type_name()))
}

/// Continuation test for `FOR i = start TO end STEP step`.
///
/// Positive step: continue while `i <= end`. Negative: while `i >= end`.
pub fn for_cond(i: &Value, end: &Value, step: &Value) -> Result<bool, EvalError> {
    let i = expect_number(i, "FOR counter")?;
    let end = expect_number(end, "FOR bound")?;
    let step = expect_number(step, "FOR step")?;
    continues(i, end, step)
}

#[inline]
pub(crate) fn continues(i: f64, end: f64, step: f64) -> Result<bool, EvalError> {
    if step > 0.0 {
        Ok(i <= end)
    } else if step < 0.0 {
        Ok(i >= end)
    } else {
        Err(zero_step())
    }
}

/// Step used when `STEP` is omitted: `+1` counting up, `-1` counting down.
pub fn default_step(start: f64, end: f64) -> f64 {
    if end >= start {
        1.0
    } else {
        -1.0
    }
}

/// `RANGE_INCL(start, end, step)`: the values a `FOR` loop would visit.
///
/// Elements are computed as `start + k * step` so long float ranges do not
/// accumulate rounding drift.
pub fn range_incl(start: &Value, end: &Value, step: &Value) -> EvalResult {
    let start = expect_number(start, "RANGE_INCL start")?;
    let end = expect_number(end, "RANGE_INCL end")?;
    let step = expect_number(step, "RANGE_INCL step")?;
    let mut items = Vec::new();
    let mut k = 0.0_f64;
    loop {
        let value = start + k * step;
        if !continues(value, end, step)? {
            break;
        }
        if items.len() as u64 >= MAX_RANGE_LEN {
            return Err(iteration_limit(MAX_RANGE_LEN));
        }
        items.push(Value::Number(value));
        k += 1.0;
    }
    Ok(Value::array(items))
}
