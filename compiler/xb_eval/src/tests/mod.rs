//! Tests for the stateless services.
//!
//! - `operators_tests`: binary operator semantics and type errors
//! - `loops_tests`: `FOR_COND`, default steps and `RANGE_INCL`
