//! Object references.
//!
//! Objects are the only mutable values. Every object carries its class (for
//! method lookup and display) and an attribute table keyed by folded name.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use xb_ir::Ident;

use crate::classes::ClassDef;
use crate::value::Value;

struct Object {
    class: Arc<ClassDef>,
    fields: FxHashMap<Ident, Value>,
}

/// Shared handle to an object. Equality is identity.
///
/// Borrows of the inner table never outlive a single accessor call, so a
/// method holding its receiver can freely read and write the same object.
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<Object>>);

impl ObjectRef {
    /// Allocate an object with no fields. `NEW` fills in class defaults.
    pub fn new(class: Arc<ClassDef>) -> Self {
        ObjectRef(Rc::new(RefCell::new(Object {
            class,
            fields: FxHashMap::default(),
        })))
    }

    /// The class this object was instantiated from.
    pub fn class(&self) -> Arc<ClassDef> {
        Arc::clone(&self.0.borrow().class)
    }

    /// Name of the object's class, as shown by `WRITE`.
    pub fn class_name(&self) -> Ident {
        self.0.borrow().class.name().clone()
    }

    /// Read a field (not a method).
    pub fn get_field(&self, name: &Ident) -> Option<Value> {
        self.0.borrow().fields.get(name).cloned()
    }

    /// Create or overwrite a field.
    pub fn set_field(&self, name: Ident, value: Value) {
        self.0.borrow_mut().fields.insert(name, value);
    }

    /// Returns `true` if a field (not a method) named `name` exists.
    pub fn has_field(&self, name: &Ident) -> bool {
        self.0.borrow().fields.contains_key(name)
    }

    /// Field names in sorted order.
    pub fn field_names(&self) -> Vec<Ident> {
        let mut names: Vec<Ident> = self.0.borrow().fields.keys().cloned().collect();
        names.sort();
        names
    }

    /// Identity: both handles refer to the same object.
    #[inline]
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ObjectRef {
    // Fields are not printed: objects may reference themselves.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectRef({}@{:p})", self.class_name(), Rc::as_ptr(&self.0))
    }
}
