//! End-to-end scenarios driving the runtime the way a front-end does: one
//! call per source construct, in program order.

#![allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]

use pretty_assertions::assert_eq;
use xb_eval::{
    buffer_handler, exec, init_tracing, ClassDef, ClassRegistry, Constant, ErrorCategory,
    EvalMode, Flow, Routine, Runtime, SharedMutableRegistry, Value,
};

fn runtime() -> Runtime {
    init_tracing();
    Runtime::builder().mode(EvalMode::TestRun).build()
}

/// ```text
/// DEFINE CLASS Point
///   x = 0
///   y = 0
///   PROCEDURE Init
///     PARAMETER x, y
///     THIS.x = x
///     THIS.y = y
/// ENDDEFINE
/// ```
fn define_point(rt: &Runtime) {
    let init = Routine::script("Init", |rt| {
        exec!(rt.parameter(&["x", "y"]));
        let this = rt.get_this()?;
        rt.set(&this, "x", rt.get_name("x")?)?;
        rt.set(&this, "y", rt.get_name("y")?)?;
        Ok(Flow::Next)
    });
    rt.define_class(
        ClassDef::builder("Point")
            .field("x", 0)
            .field("y", 0)
            .method(init),
    )
    .unwrap();
}

#[test]
fn set_then_get_returns_the_value_for_every_kind() {
    let mut rt = runtime();
    define_point(&rt);
    let point = rt.new_object("Point", vec![Value::from(1), Value::from(2)]).unwrap();
    let values = [
        Value::Null,
        Value::from(true),
        Value::from(2.5),
        Value::from("text"),
        Value::array(vec![Value::from(1), Value::from("a")]),
        point,
    ];
    for value in values {
        rt.set_name("x", value.clone());
        assert_eq!(rt.get_name("x").unwrap(), value);
    }
}

#[test]
fn bound_to_null_is_not_unbound() {
    let mut rt = runtime();
    rt.set_name("nothing", Value::Null);
    assert_eq!(rt.get_name("nothing").unwrap(), Value::Null);
    assert_eq!(
        rt.get_name("never").unwrap_err().category(),
        ErrorCategory::NameResolution
    );
}

#[test]
fn parameter_shadows_outer_binding_until_the_call_ends() {
    let mut rt = runtime();
    rt.set_name("x", Value::from("outer"));
    rt.define_procedure("Inner", |rt| {
        exec!(rt.parameter(&["x"]));
        rt.ret(rt.get_name("x")?)
    });
    let seen = rt.call_name("Inner", vec![Value::from("inner")]).unwrap();
    assert_eq!(seen, Value::from("inner"));
    assert_eq!(rt.get_name("x").unwrap(), Value::from("outer"));
}

#[test]
fn nested_with_blocks_restore_the_outer_receiver() {
    let mut rt = runtime();
    rt.define_class(ClassDef::builder("Box").field("f", 0)).unwrap();
    let a = rt.new_object("Box", Vec::new()).unwrap();
    let b = rt.new_object("Box", Vec::new()).unwrap();

    rt.push_with(&a).unwrap();
    rt.push_with(&b).unwrap();
    rt.with_set("f", Value::from(1)).unwrap();
    assert_eq!(rt.get(&b, "f").unwrap(), Value::from(1));
    assert_eq!(rt.get(&a, "f").unwrap(), Value::from(0));
    rt.pop_with().unwrap();
    rt.with_set("f", Value::from(2)).unwrap();
    rt.pop_with().unwrap();

    assert_eq!(rt.get(&a, "f").unwrap(), Value::from(2));
    assert_eq!(rt.get(&b, "f").unwrap(), Value::from(1));
    assert_eq!(
        rt.with_set("f", Value::from(3)).unwrap_err().category(),
        ErrorCategory::WithContext
    );
}

#[test]
fn binop_examples() {
    let rt = runtime();
    assert_eq!(
        rt.binop(&Value::from(2), "+", &Value::from(3)).unwrap(),
        Value::from(5)
    );
    assert_eq!(
        rt.binop(&Value::from("a"), "+", &Value::from("b")).unwrap(),
        Value::from("ab")
    );
    assert_eq!(
        rt.binop(&Value::from(1), "+", &Value::from("x"))
            .unwrap_err()
            .category(),
        ErrorCategory::TypeCoercion
    );
    assert_eq!(
        rt.binop(&Value::from(0), ".OR.", &Value::from("x")).unwrap(),
        Value::from(true)
    );
}

#[test]
fn truthiness_examples() {
    let rt = runtime();
    assert!(!rt.truthy(&Value::Null));
    assert!(!rt.truthy(&Value::from(0)));
    assert!(!rt.truthy(&Value::from("")));
    assert!(rt.truthy(&Value::from(1)));
    assert!(rt.truthy(&Value::from("x")));
    assert!(!rt.truthy(&Value::array(Vec::new())));
}

#[test]
fn for_cond_examples() {
    let rt = runtime();
    let cond = |i: i32, end: i32, step: i32| {
        rt.for_cond(&Value::from(i), &Value::from(end), &Value::from(step))
    };
    assert!((1..=5).all(|i| cond(i, 5, 1).unwrap()));
    assert!(!cond(6, 5, 1).unwrap());
    assert!((1..=5).all(|i| cond(i, 1, -1).unwrap()));
    assert!(!cond(0, 1, -1).unwrap());
    assert_eq!(
        cond(1, 5, 0).unwrap_err().category(),
        ErrorCategory::InfiniteLoopGuard
    );
}

#[test]
fn return_inside_nested_loops_yields_its_value() {
    let mut rt = runtime();
    rt.set_name("iterations", Value::from(0));
    rt.define_procedure("Search", |rt| {
        exec!(rt.for_loop("i", &Value::from(1), &Value::from(10), None, |rt| {
            rt.for_loop("j", &Value::from(1), &Value::from(10), None, |rt| {
                let n = rt.binop(&rt.get_name("iterations")?, "+", &Value::from(1))?;
                rt.set_name("iterations", n);
                let j = rt.get_name("j")?;
                if rt.binop(&j, "=", &Value::from(2))?.is_truthy() {
                    return rt.ret(Value::from(7));
                }
                Ok(Flow::Next)
            })
        }));
        rt.ret(Value::Null)
    });
    assert_eq!(rt.call_name("Search", Vec::new()).unwrap(), Value::from(7));
    assert_eq!(rt.get_name("iterations").unwrap(), Value::from(2));
    assert_eq!(rt.call_depth(), 0);
}

#[test]
fn new_point_exposes_constructor_arguments() {
    let mut rt = runtime();
    define_point(&rt);
    let p = rt.new_object("Point", vec![Value::from(3), Value::from(4)]).unwrap();
    assert_eq!(rt.get_attr(&p, "x").unwrap(), Value::from(3));
    assert_eq!(rt.get_attr(&p, "Y").unwrap(), Value::from(4));
    assert_eq!(
        rt.get_attr(&p, "z").unwrap_err().category(),
        ErrorCategory::MemberNotFound
    );
}

#[test]
fn member_paths_through_null_and_scalars() {
    let mut rt = runtime();
    rt.define_class(ClassDef::builder("Node").field("next", Constant::Null).field("label", "a"))
        .unwrap();
    let node = rt.new_object("Node", Vec::new()).unwrap();
    assert_eq!(
        rt.get(&node, "next.label").unwrap_err().category(),
        ErrorCategory::NullReference
    );
    assert_eq!(
        rt.set(&node, "label.size", Value::from(1))
            .unwrap_err()
            .category(),
        ErrorCategory::ImmutableTarget
    );
    let other = rt.new_object("Node", Vec::new()).unwrap();
    rt.set(&node, "next", other.clone()).unwrap();
    rt.set(&node, "next.label", Value::from("b")).unwrap();
    assert_eq!(rt.get(&other, "label").unwrap(), Value::from("b"));
}

#[test]
fn inherited_methods_and_overridden_defaults() {
    let mut rt = runtime();
    let describe = Routine::script("Describe", |rt| {
        let this = rt.get_this()?;
        let kind = rt.get(&this, "kind")?;
        rt.ret(rt.binop(&Value::from("I am "), "+", &kind)?)
    });
    rt.define_class(
        ClassDef::builder("Animal")
            .field("kind", "animal")
            .method(describe),
    )
    .unwrap();
    rt.define_class(ClassDef::builder("Dog").extends("Animal").field("kind", "dog"))
        .unwrap();
    let dog = rt.new_object("Dog", Vec::new()).unwrap();
    assert_eq!(
        rt.call(&dog, "Describe", Vec::new()).unwrap(),
        Value::from("I am dog")
    );
}

#[test]
fn write_formats_values_for_the_sink() {
    let rt = Runtime::builder()
        .mode(EvalMode::TestRun)
        .print_handler(buffer_handler())
        .build();
    rt.write(&Value::from(3.0));
    rt.write(&Value::from(2.5));
    rt.write(&Value::from(true));
    rt.write(&Value::Null);
    rt.write(&Value::array(vec![Value::from(1), Value::from("a")]));
    assert_eq!(rt.output(), "3\n2.5\nTRUE\nNULL\n{1, a}\n");
}

#[test]
fn runaway_recursion_is_stack_overflow() {
    let mut rt = runtime();
    rt.define_procedure("Forever", |rt| {
        rt.call_name("Forever", Vec::new())?;
        Ok(Flow::Next)
    });
    let err = rt.call_name("Forever", Vec::new()).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::StackOverflow);
    assert_eq!(rt.call_depth(), 0);
}

#[test]
fn unknown_class_lists_known_classes() {
    let mut rt = runtime();
    define_point(&rt);
    let err = rt.new_object("Pointt", Vec::new()).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ClassNotFound);
    assert_eq!(err.notes[0].message, "known classes: OBJECT, POINT");
}

#[test]
fn runtimes_built_on_one_registry_share_classes() {
    let classes = SharedMutableRegistry::new(ClassRegistry::new());
    let first = Runtime::builder()
        .mode(EvalMode::TestRun)
        .classes(classes.clone())
        .build();
    let mut second = Runtime::builder()
        .mode(EvalMode::TestRun)
        .classes(classes.clone())
        .build();
    assert!(first.classes().ptr_eq(second.classes()));
    define_point(&first);
    let p = second
        .new_object("Point", vec![Value::from(1), Value::from(2)])
        .unwrap();
    assert_eq!(second.get(&p, "y").unwrap(), Value::from(2));
    assert!(!runtime().classes().ptr_eq(&classes));
}
