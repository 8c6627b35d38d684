use super::*;
use crate::errors::{ErrorCategory, EvalResult};
use crate::runtime::Runtime;
use pretty_assertions::assert_eq;

fn noop(_rt: &mut Runtime, _args: &[Value]) -> EvalResult {
    Ok(Value::Null)
}

fn shape_registry() -> ClassRegistry {
    let mut registry = ClassRegistry::new();
    registry
        .define(
            ClassDef::builder("shape")
                .field("name", "shape")
                .field("sides", 0)
                .method(Routine::native("area", 0, noop))
                .method(Routine::native("describe", 0, noop)),
        )
        .unwrap();
    registry
        .define(
            ClassDef::builder("square")
                .extends("Shape")
                .field("sides", 4)
                .method(Routine::native("area", 0, noop)),
        )
        .unwrap();
    registry
}

#[test]
fn new_registry_knows_object() {
    let registry = ClassRegistry::new();
    assert!(registry.contains(&Ident::new("object")));
    assert_eq!(registry.names(), vec![Ident::new("OBJECT")]);
}

#[test]
fn classes_default_to_object_parent() {
    let registry = shape_registry();
    let shape = registry.get(&Ident::new("SHAPE")).unwrap();
    assert_eq!(shape.parent().map(|p| p.name().clone()), Some(Ident::new("OBJECT")));
    assert!(shape.is_descendant_of(&Ident::new("OBJECT")));
}

#[test]
fn methods_resolve_along_parent_chain() {
    let registry = shape_registry();
    let square = registry.get(&Ident::new("SQUARE")).unwrap();
    assert!(square.find_method(&Ident::new("DESCRIBE")).is_some());
    assert!(square.find_method(&Ident::new("AREA")).is_some());
    assert!(square.find_method(&Ident::new("MISSING")).is_none());
    assert!(square.is_descendant_of(&Ident::new("shape")));
    assert!(square.constructor().is_none());
    assert!(square.destructor().is_none());
}

#[test]
fn defaults_apply_parent_first() {
    let registry = shape_registry();
    let square = registry.get(&Ident::new("SQUARE")).unwrap();
    let object = ObjectRef::new(Arc::clone(&square));
    square.apply_defaults(&object);
    assert_eq!(object.get_field(&Ident::new("SIDES")), Some(Value::from(4)));
    assert_eq!(object.get_field(&Ident::new("NAME")), Some(Value::from("shape")));
    assert_eq!(
        object.field_names(),
        vec![Ident::new("NAME"), Ident::new("SIDES")]
    );
}

#[test]
fn unknown_parent_is_class_not_found() {
    let mut registry = ClassRegistry::new();
    let err = registry
        .define(ClassDef::builder("orphan").extends("nobody"))
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ClassNotFound);
    assert!(!registry.contains(&Ident::new("ORPHAN")));
}

#[test]
fn lookup_failure_lists_known_classes() {
    let registry = shape_registry();
    let err = registry.lookup(&Ident::new("circle")).unwrap_err();
    assert_eq!(err.message, "class 'CIRCLE' is not defined");
    assert_eq!(err.notes[0].message, "known classes: OBJECT, SHAPE, SQUARE");
}

#[test]
fn redefinition_replaces_class() {
    let mut registry = shape_registry();
    registry
        .define(ClassDef::builder("shape").field("colour", "red"))
        .unwrap();
    let shape = registry.get(&Ident::new("SHAPE")).unwrap();
    assert!(shape.find_method(&Ident::new("AREA")).is_none());
}

#[test]
fn destructor_is_inherited() {
    let mut registry = ClassRegistry::new();
    registry
        .define(ClassDef::builder("resource").method(Routine::native("Destroy", 0, noop)))
        .unwrap();
    let file = registry
        .define(ClassDef::builder("file").extends("resource"))
        .unwrap();
    let destroy = file.destructor().unwrap();
    assert_eq!(destroy.name().as_str(), DESTRUCTOR);
    assert_eq!(file.parent().unwrap().name().as_str(), "RESOURCE");
}
