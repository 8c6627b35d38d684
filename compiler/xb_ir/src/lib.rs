//! xBase IR - identifiers and operators shared by the runtime and its front-ends.
//!
//! - [`Ident`]: case-folded identifier used for variables, members and classes
//! - [`BinaryOp`] / [`UnaryOp`]: operator enums with source-spelling parsers

mod ident;
mod operators;

pub use ident::Ident;
pub use operators::{BinaryOp, UnaryOp, UnknownOperator};
