//! Class definitions and the class registry consulted by `NEW`.
//!
//! A class is a name, an optional parent, field defaults and a method table.
//! Methods resolve along the parent chain; `INIT`, when present, is the
//! constructor. Definitions are immutable once registered and shared by every
//! instance through `Arc`.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use xb_ir::Ident;

use crate::errors::{class_not_found, EvalError, EvalNote};
use crate::value::{ObjectRef, Routine, Value};

/// Name of the implicit root class.
pub const OBJECT_CLASS: &str = "OBJECT";

/// Name of the constructor method.
pub const CONSTRUCTOR: &str = "INIT";

/// Name of the method `DELETE_NAME` runs before releasing an instance.
pub const DESTRUCTOR: &str = "DESTROY";

/// Field default. Restricted to immutable scalars so class definitions can
/// be shared across executions.
#[derive(Clone, Debug, PartialEq)]
pub enum Constant {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
}

impl Constant {
    pub fn to_value(&self) -> Value {
        match self {
            Constant::Null => Value::Null,
            Constant::Bool(b) => Value::Bool(*b),
            Constant::Number(n) => Value::Number(*n),
            Constant::Str(s) => Value::string(s.as_str()),
        }
    }
}

impl From<bool> for Constant {
    fn from(b: bool) -> Self {
        Constant::Bool(b)
    }
}

impl From<f64> for Constant {
    fn from(n: f64) -> Self {
        Constant::Number(n)
    }
}

impl From<i32> for Constant {
    fn from(n: i32) -> Self {
        Constant::Number(f64::from(n))
    }
}

impl From<&str> for Constant {
    fn from(s: &str) -> Self {
        Constant::Str(s.to_string())
    }
}

/// A registered class.
pub struct ClassDef {
    name: Ident,
    parent: Option<Arc<ClassDef>>,
    fields: Vec<(Ident, Constant)>,
    methods: FxHashMap<Ident, Routine>,
}

impl ClassDef {
    pub fn builder(name: impl Into<Ident>) -> ClassBuilder {
        ClassBuilder {
            name: name.into(),
            parent: None,
            fields: Vec::new(),
            methods: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn name(&self) -> &Ident {
        &self.name
    }

    #[inline]
    pub fn parent(&self) -> Option<&Arc<ClassDef>> {
        self.parent.as_ref()
    }

    /// Look up a method on this class or the nearest ancestor defining it.
    pub fn find_method(&self, name: &Ident) -> Option<Routine> {
        let mut class = Some(self);
        while let Some(current) = class {
            if let Some(method) = current.methods.get(name) {
                return Some(method.clone());
            }
            class = current.parent.as_deref();
        }
        None
    }

    /// The `INIT` method, if this class or an ancestor defines one.
    pub fn constructor(&self) -> Option<Routine> {
        self.find_method(&Ident::new(CONSTRUCTOR))
    }

    /// The `DESTROY` method, if this class or an ancestor defines one.
    pub fn destructor(&self) -> Option<Routine> {
        self.find_method(&Ident::new(DESTRUCTOR))
    }

    /// Returns `true` if `name` is this class or one of its ancestors.
    pub fn is_descendant_of(&self, name: &Ident) -> bool {
        let mut class = Some(self);
        while let Some(current) = class {
            if current.name == *name {
                return true;
            }
            class = current.parent.as_deref();
        }
        false
    }

    /// Write field defaults into a fresh instance, ancestors first so a
    /// subclass default overrides its parent's.
    pub(crate) fn apply_defaults(&self, object: &ObjectRef) {
        if let Some(parent) = &self.parent {
            parent.apply_defaults(object);
        }
        for (name, default) in &self.fields {
            object.set_field(name.clone(), default.to_value());
        }
    }
}

impl fmt::Debug for ClassDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&Ident> = self.methods.keys().collect();
        methods.sort();
        f.debug_struct("ClassDef")
            .field("name", &self.name)
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .field("fields", &self.fields)
            .field("methods", &methods)
            .finish()
    }
}

/// Builder for [`ClassDef`]. The parent is named, and resolved when the class
/// is registered.
pub struct ClassBuilder {
    name: Ident,
    parent: Option<Ident>,
    fields: Vec<(Ident, Constant)>,
    methods: FxHashMap<Ident, Routine>,
}

impl ClassBuilder {
    #[must_use]
    pub fn extends(mut self, parent: impl Into<Ident>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Declare a field with its default.
    #[must_use]
    pub fn field(mut self, name: impl Into<Ident>, default: impl Into<Constant>) -> Self {
        self.fields.push((name.into(), default.into()));
        self
    }

    /// Add a method. The routine's name is the method name.
    #[must_use]
    pub fn method(mut self, routine: Routine) -> Self {
        self.methods.insert(routine.name().clone(), routine);
        self
    }
}

/// Process-wide table of classes by name.
pub struct ClassRegistry {
    classes: FxHashMap<Ident, Arc<ClassDef>>,
}

impl ClassRegistry {
    /// Create a registry holding only the builtin `OBJECT` class.
    pub fn new() -> Self {
        let object = Arc::new(ClassDef {
            name: Ident::new(OBJECT_CLASS),
            parent: None,
            fields: Vec::new(),
            methods: FxHashMap::default(),
        });
        let mut classes = FxHashMap::default();
        classes.insert(object.name.clone(), object);
        ClassRegistry { classes }
    }

    /// Register a class, replacing any previous definition with that name.
    ///
    /// Classes without an explicit parent extend `OBJECT`. Instances created
    /// before a redefinition keep the class they were built from.
    pub fn define(&mut self, builder: ClassBuilder) -> Result<Arc<ClassDef>, EvalError> {
        let ClassBuilder {
            name,
            parent,
            fields,
            methods,
        } = builder;
        let parent = if name.as_str() == OBJECT_CLASS {
            None
        } else {
            let parent_name = parent.unwrap_or_else(|| Ident::new(OBJECT_CLASS));
            Some(self.lookup(&parent_name)?)
        };
        let class = Arc::new(ClassDef {
            name,
            parent,
            fields,
            methods,
        });
        tracing::debug!(class = %class.name, "registered class");
        self.classes.insert(class.name.clone(), Arc::clone(&class));
        Ok(class)
    }

    pub fn get(&self, name: &Ident) -> Option<Arc<ClassDef>> {
        self.classes.get(name).cloned()
    }

    /// Like [`get`](Self::get), but fails with `ClassNotFoundError` listing the
    /// known classes.
    pub fn lookup(&self, name: &Ident) -> Result<Arc<ClassDef>, EvalError> {
        self.get(name).ok_or_else(|| {
            let known = self
                .names()
                .iter()
                .map(Ident::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            class_not_found(name).with_note(EvalNote::new(format!("known classes: {known}")))
        })
    }

    pub fn contains(&self, name: &Ident) -> bool {
        self.classes.contains_key(name)
    }

    /// Registered class names, sorted.
    pub fn names(&self) -> Vec<Ident> {
        let mut names: Vec<Ident> = self.classes.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassRegistry")
            .field("classes", &self.names())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;
