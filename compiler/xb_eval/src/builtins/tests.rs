use super::*;
use crate::errors::ErrorCategory;
use crate::eval_mode::EvalMode;
use pretty_assertions::assert_eq;

fn runtime() -> Runtime {
    Runtime::builder().mode(EvalMode::TestRun).build()
}

fn call(rt: &mut Runtime, name: &str, args: Vec<Value>) -> EvalResult {
    rt.call_name(name, args)
}

#[test]
fn numeric_prefix_parsing() {
    assert_eq!(parse_numeric_prefix("123"), 123.0);
    assert_eq!(parse_numeric_prefix("  -4.5kg"), -4.5);
    assert_eq!(parse_numeric_prefix("12."), 12.0);
    assert_eq!(parse_numeric_prefix(".5"), 0.5);
    assert_eq!(parse_numeric_prefix("abc"), 0.0);
    assert_eq!(parse_numeric_prefix("-"), 0.0);
    assert_eq!(parse_numeric_prefix(""), 0.0);
}

#[test]
fn val_builtin() {
    let mut rt = runtime();
    assert_eq!(call(&mut rt, "val", vec![Value::from("42 apples")]).unwrap(), Value::from(42));
    assert_eq!(call(&mut rt, "VAL", vec![Value::Null]).unwrap(), Value::from(0));
    assert_eq!(call(&mut rt, "Val", vec![Value::from(7.5)]).unwrap(), Value::from(7.5));
    let err = call(&mut rt, "VAL", vec![Value::from(true)]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::TypeCoercion);
}

#[test]
fn str_builtin() {
    let mut rt = runtime();
    assert_eq!(call(&mut rt, "STR", vec![Value::from(3.0)]).unwrap(), Value::from("3"));
    assert_eq!(call(&mut rt, "STR", vec![Value::Null]).unwrap(), Value::from(""));
    assert_eq!(call(&mut rt, "STR", vec![Value::from(false)]).unwrap(), Value::from("FALSE"));
}

#[test]
fn iif_builtin() {
    let mut rt = runtime();
    let args = |c: Value| vec![c, Value::from("yes"), Value::from("no")];
    assert_eq!(call(&mut rt, "IIF", args(Value::from(1))).unwrap(), Value::from("yes"));
    assert_eq!(call(&mut rt, "IIF", args(Value::Null)).unwrap(), Value::from("no"));
}

#[test]
fn len_builtin() {
    let mut rt = runtime();
    assert_eq!(call(&mut rt, "LEN", vec![Value::from("größe")]).unwrap(), Value::from(5));
    let array = Value::array(vec![Value::Null, Value::Null]);
    assert_eq!(call(&mut rt, "LEN", vec![array]).unwrap(), Value::from(2));
    let err = call(&mut rt, "LEN", vec![Value::from(1)]).unwrap_err();
    assert_eq!(err.message, "LEN expects a string or array, got number");
}

#[test]
fn builtins_check_arity() {
    let mut rt = runtime();
    let err = call(&mut rt, "IIF", vec![Value::from(true)]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Arity);
    assert_eq!(err.message, "IIF expects 3 arguments, got 1");
}

#[test]
fn builtins_can_be_disabled() {
    let rt = Runtime::builder()
        .mode(EvalMode::TestRun)
        .without_builtins()
        .build();
    assert_eq!(
        rt.get_name("VAL").unwrap_err().category(),
        ErrorCategory::NameResolution
    );
}
