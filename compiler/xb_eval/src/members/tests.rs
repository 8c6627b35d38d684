use super::*;
use std::sync::Arc;

use crate::classes::{ClassDef, ClassRegistry, Constant};
use crate::errors::ErrorCategory;
use crate::runtime::Runtime;
use crate::value::{ObjectRef, Routine};
use pretty_assertions::assert_eq;

fn noop(_rt: &mut Runtime, _args: &[Value]) -> EvalResult {
    Ok(Value::Null)
}

fn node_registry() -> ClassRegistry {
    let mut registry = ClassRegistry::new();
    registry
        .define(
            ClassDef::builder("node")
                .field("value", 0)
                .field("next", Constant::Null)
                .method(Routine::native("describe", 0, noop)),
        )
        .unwrap();
    registry
}

fn node(registry: &ClassRegistry, value: i32) -> ObjectRef {
    let class = registry.get(&Ident::new("NODE")).unwrap();
    let obj = ObjectRef::new(Arc::clone(&class));
    class.apply_defaults(&obj);
    obj.set_field(Ident::new("value"), Value::from(value));
    obj
}

#[test]
fn path_construction() {
    assert_eq!(MemberPath::parse("a.b.c").unwrap().to_string(), "A.B.C");
    assert_eq!(MemberPath::new(["x", "y"]).unwrap().len(), 2);
    let empty: [&str; 0] = [];
    assert_eq!(
        MemberPath::new(empty).unwrap_err().category(),
        ErrorCategory::Usage
    );
    assert!(MemberPath::parse("a..b").is_err());
    assert!(MemberPath::parse("").is_err());
}

#[test]
fn split_last_separates_target_segment() {
    let path = MemberPath::parse("a.b.c").unwrap();
    let (init, last) = path.split_last();
    assert_eq!(init, &[Ident::new("A"), Ident::new("B")]);
    assert_eq!(last.as_str(), "C");
    let names: Vec<&str> = path.segments().map(Ident::as_str).collect();
    assert_eq!(names, vec!["A", "B", "C"]);

    let single = MemberPath::single("x");
    assert_eq!(single.split_last().0.len(), 0);
    assert_eq!(single.len(), 1);
}

#[test]
fn get_attr_prefers_fields_then_methods() {
    let registry = node_registry();
    let n = Value::Object(node(&registry, 3));
    assert_eq!(get_attr(&n, &Ident::new("value")).unwrap(), Value::from(3));
    match get_attr(&n, &Ident::new("describe")).unwrap() {
        Value::Method(method) => assert_eq!(method.routine.name().as_str(), "DESCRIBE"),
        other => panic!("expected bound method, got {other:?}"),
    }
}

#[test]
fn field_shadows_method_of_same_name() {
    let registry = node_registry();
    let obj = node(&registry, 1);
    obj.set_field(Ident::new("describe"), Value::from("field"));
    let got = get_attr(&Value::Object(obj), &Ident::new("DESCRIBE")).unwrap();
    assert_eq!(got, Value::from("field"));
}

#[test]
fn get_walks_nested_objects() {
    let registry = node_registry();
    let first = node(&registry, 1);
    let second = node(&registry, 2);
    first.set_field(Ident::new("next"), Value::Object(second));
    let path = MemberPath::parse("next.value").unwrap();
    assert_eq!(get_path(&Value::Object(first), &path).unwrap(), Value::from(2));
}

#[test]
fn null_intermediate_is_null_reference() {
    let registry = node_registry();
    let first = Value::Object(node(&registry, 1));
    let path = MemberPath::parse("next.value").unwrap();
    let err = get_path(&first, &path).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NullReference);
    let err = set_path(&first, &path, Value::from(9)).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NullReference);
}

#[test]
fn missing_member_is_member_not_found() {
    let registry = node_registry();
    let n = Value::Object(node(&registry, 1));
    let err = get_attr(&n, &Ident::new("nope")).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::MemberNotFound);
    assert_eq!(err.message, "member 'NOPE' not found in NODE");
}

#[test]
fn methods_mid_path_are_not_invoked() {
    let registry = node_registry();
    let n = Value::Object(node(&registry, 1));
    let path = MemberPath::parse("describe.value").unwrap();
    let err = get_path(&n, &path).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::MemberNotFound);
}

#[test]
fn set_creates_and_overwrites_fields() {
    let registry = node_registry();
    let obj = node(&registry, 1);
    let base = Value::Object(obj.clone());
    set_path(&base, &MemberPath::single("value"), Value::from(10)).unwrap();
    set_path(&base, &MemberPath::single("label"), Value::from("L")).unwrap();
    assert_eq!(obj.get_field(&Ident::new("VALUE")), Some(Value::from(10)));
    assert_eq!(obj.get_field(&Ident::new("LABEL")), Some(Value::from("L")));
}

#[test]
fn set_on_non_object_is_immutable_target() {
    let registry = node_registry();
    let obj = node(&registry, 1);
    let base = Value::Object(obj);
    let err = set_path(&base, &MemberPath::parse("value.x").unwrap(), Value::Null).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ImmutableTarget);
    let err = set_path(&Value::from("s"), &MemberPath::single("len"), Value::Null).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ImmutableTarget);
}
