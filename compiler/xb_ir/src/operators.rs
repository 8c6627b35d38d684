//! Binary and unary operators.
//!
//! The front-end hands operators to the runtime by their source spelling
//! (`"+"`, `"<>"`, `".AND."`). Parsing folds the accepted spellings onto one
//! enum variant each, so the evaluator only ever matches on the enum.

use std::fmt;
use std::str::FromStr;

/// Error returned when an operator spelling is not recognised.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown operator `{symbol}`")]
pub struct UnknownOperator {
    pub symbol: String,
}

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    /// Substring containment (`"b" $ "abc"`).
    Contains,

    // Logical
    And,
    Or,
}

impl BinaryOp {
    /// Parse an operator spelling. Keyword operators are case-insensitive.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol.trim() {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Mod,
            "^" | "**" => Self::Pow,
            "=" | "==" => Self::Eq,
            "<>" | "#" | "!=" => Self::NotEq,
            "<" => Self::Lt,
            "<=" => Self::LtEq,
            ">" => Self::Gt,
            ">=" => Self::GtEq,
            "$" => Self::Contains,
            other if other.eq_ignore_ascii_case("AND") || other.eq_ignore_ascii_case(".AND.") => {
                Self::And
            }
            other if other.eq_ignore_ascii_case("OR") || other.eq_ignore_ascii_case(".OR.") => {
                Self::Or
            }
            _ => return None,
        };
        Some(op)
    }

    /// Canonical source spelling, used in error messages.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Contains => "$",
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    /// Returns `true` for `+ - * / % ^`.
    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod | Self::Pow
        )
    }

    /// Returns `true` for the six relational operators.
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq
        )
    }

    /// Returns `true` for `AND` / `OR`.
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}

impl FromStr for BinaryOp {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s).ok_or_else(|| UnknownOperator {
            symbol: s.to_string(),
        })
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
}

impl UnaryOp {
    /// Parse an operator spelling. `NOT` is case-insensitive.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol.trim() {
            "-" => Self::Neg,
            "+" => Self::Plus,
            "!" => Self::Not,
            other if other.eq_ignore_ascii_case("NOT") || other.eq_ignore_ascii_case(".NOT.") => {
                Self::Not
            }
            _ => return None,
        };
        Some(op)
    }

    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Plus => "+",
            Self::Not => "NOT",
        }
    }
}

impl FromStr for UnaryOp {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s).ok_or_else(|| UnknownOperator {
            symbol: s.to_string(),
        })
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;
