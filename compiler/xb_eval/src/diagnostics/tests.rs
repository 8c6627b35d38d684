use super::*;
use crate::errors::{undefined_name, ErrorCategory};
use pretty_assertions::assert_eq;

fn frame(name: &str) -> CallFrame {
    CallFrame {
        name: Ident::new(name),
        receiver: None,
        args: Vec::new(),
        params_bound: false,
        env_depth: 1,
        with_depth: 0,
    }
}

#[test]
fn push_and_pop() {
    let mut stack = CallStack::new(Some(10));
    stack.push(frame("outer")).unwrap();
    stack.push(frame("inner")).unwrap();
    assert_eq!(stack.depth(), 2);
    assert_eq!(stack.current_frame().unwrap().name.as_str(), "INNER");
    assert_eq!(stack.pop().unwrap().name.as_str(), "INNER");
    assert_eq!(stack.depth(), 1);
}

#[test]
fn depth_limit_rejects_push() {
    let mut stack = CallStack::new(Some(2));
    stack.push(frame("a")).unwrap();
    stack.push(frame("b")).unwrap();
    let err = stack.push(frame("c")).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::StackOverflow);
    assert_eq!(err.message, "maximum call depth exceeded (limit: 2)");
    assert_eq!(stack.depth(), 2);
}

#[test]
fn unlimited_stack() {
    let mut stack = CallStack::default();
    for i in 0..500 {
        stack.push(frame(&format!("f{i}"))).unwrap();
    }
    assert_eq!(stack.max_depth(), None);
    assert_eq!(stack.depth(), 500);
}

#[test]
fn capture_lists_most_recent_first() {
    let mut stack = CallStack::new(None);
    stack.push(frame("main")).unwrap();
    stack.push(frame("helper")).unwrap();
    let trace = stack.capture();
    let names: Vec<&str> = trace.frames().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["HELPER", "MAIN"]);
}

#[test]
fn innermost_backtrace_wins() {
    let mut stack = CallStack::new(None);
    stack.push(frame("outer")).unwrap();
    stack.push(frame("inner")).unwrap();
    let err = stack.attach_backtrace(undefined_name(&Ident::new("x")));
    stack.pop();
    let err = stack.attach_backtrace(err);
    assert_eq!(err.backtrace.unwrap().len(), 2);
}

#[test]
fn empty_stack_attaches_nothing() {
    let stack = CallStack::new(None);
    let err = stack.attach_backtrace(undefined_name(&Ident::new("x")));
    assert!(err.backtrace.is_none());
}
