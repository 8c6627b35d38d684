//! Dotted member access: `GET`, `SET` and `GET_ATTR`.
//!
//! Member access is a stateless walk over values. Only objects have members;
//! fields and methods share one namespace, fields first. A method found by
//! `GET_ATTR` is returned bound to its receiver and is never invoked here.

use std::fmt;

use smallvec::SmallVec;
use xb_ir::Ident;

use crate::errors::{
    empty_member_path, immutable_target, member_not_found, null_reference, EvalError, EvalResult,
};
use crate::value::{BoundMethod, Value};

/// Non-empty sequence of member names (`a.b.c`).
///
/// The last segment is stored apart from the rest, so a path with no
/// segments cannot be represented.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberPath {
    init: SmallVec<[Ident; 3]>,
    last: Ident,
}

impl MemberPath {
    /// Build a path from its segments. Fails on an empty sequence.
    pub fn new<I>(segments: I) -> Result<Self, EvalError>
    where
        I: IntoIterator,
        I::Item: Into<Ident>,
    {
        let mut init: SmallVec<[Ident; 3]> = segments.into_iter().map(Into::into).collect();
        let last = init.pop().ok_or_else(empty_member_path)?;
        Ok(MemberPath { init, last })
    }

    /// Parse `a.b.c`. Empty segments (`a..b`, trailing dot) are rejected.
    pub fn parse(dotted: &str) -> Result<Self, EvalError> {
        let mut segments: SmallVec<[Ident; 4]> = SmallVec::new();
        for segment in dotted.split('.') {
            let segment = segment.trim();
            if segment.is_empty() {
                return Err(empty_member_path());
            }
            segments.push(Ident::new(segment));
        }
        Self::new(segments)
    }

    /// One-segment path, as used by `GET_ATTR`-style access.
    pub fn single(name: impl Into<Ident>) -> Self {
        MemberPath {
            init: SmallVec::new(),
            last: name.into(),
        }
    }

    /// Segments in walk order.
    pub fn segments(&self) -> impl Iterator<Item = &Ident> + '_ {
        self.init.iter().chain(std::iter::once(&self.last))
    }

    /// All segments but the last, and the last.
    #[inline]
    pub fn split_last(&self) -> (&[Ident], &Ident) {
        (&self.init, &self.last)
    }

    pub fn len(&self) -> usize {
        self.init.len() + 1
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for MemberPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment.as_str())?;
        }
        Ok(())
    }
}

/// Single-step lookup of `name` on `base`.
pub fn get_attr(base: &Value, name: &Ident) -> EvalResult {
    match base {
        Value::Object(obj) => {
            if let Some(field) = obj.get_field(name) {
                return Ok(field);
            }
            let class = obj.class();
            match class.find_method(name) {
                Some(routine) => Ok(Value::Method(BoundMethod {
                    receiver: obj.clone(),
                    routine,
                })),
                None => Err(member_not_found(name, class.name().as_str())),
            }
        }
        Value::Null => Err(null_reference(name)),
        other => Err(member_not_found(name, other.type_name())),
    }
}

/// Walk `path` from `base`, left to right.
pub fn get_path(base: &Value, path: &MemberPath) -> EvalResult {
    let mut current = base.clone();
    for name in path.segments() {
        current = get_attr(&current, name)?;
    }
    Ok(current)
}

/// Walk all but the last segment, then create or overwrite the last
/// segment's field on the object reached.
pub fn set_path(base: &Value, path: &MemberPath, value: Value) -> Result<(), EvalError> {
    let (init, last) = path.split_last();
    let mut target = base.clone();
    for name in init {
        target = get_attr(&target, name)?;
    }
    match &target {
        Value::Object(obj) => {
            obj.set_field(last.clone(), value);
            Ok(())
        }
        Value::Null => Err(null_reference(last)),
        other => Err(immutable_target(last, other.type_name())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;
