use super::*;
use pretty_assertions::assert_eq;

#[test]
fn arithmetic_symbols() {
    assert_eq!(BinaryOp::from_symbol("+"), Some(BinaryOp::Add));
    assert_eq!(BinaryOp::from_symbol("%"), Some(BinaryOp::Mod));
    assert_eq!(BinaryOp::from_symbol("**"), Some(BinaryOp::Pow));
    assert_eq!(BinaryOp::from_symbol("^"), Some(BinaryOp::Pow));
}

#[test]
fn comparison_spellings_fold_together() {
    assert_eq!(BinaryOp::from_symbol("="), Some(BinaryOp::Eq));
    assert_eq!(BinaryOp::from_symbol("=="), Some(BinaryOp::Eq));
    for ne in ["<>", "#", "!="] {
        assert_eq!(BinaryOp::from_symbol(ne), Some(BinaryOp::NotEq), "{ne}");
    }
}

#[test]
fn logical_keywords_are_case_insensitive() {
    assert_eq!(BinaryOp::from_symbol("and"), Some(BinaryOp::And));
    assert_eq!(BinaryOp::from_symbol(".Or."), Some(BinaryOp::Or));
    assert_eq!(UnaryOp::from_symbol("not"), Some(UnaryOp::Not));
    assert_eq!(UnaryOp::from_symbol(".NOT."), Some(UnaryOp::Not));
}

#[test]
fn surrounding_whitespace_is_ignored() {
    assert_eq!(BinaryOp::from_symbol(" <= "), Some(BinaryOp::LtEq));
}

#[test]
fn unknown_symbol_is_rejected() {
    assert_eq!(BinaryOp::from_symbol("<<"), None);
    let err = "xor".parse::<BinaryOp>().unwrap_err();
    assert_eq!(err.to_string(), "unknown operator `xor`");
    assert!("~".parse::<UnaryOp>().is_err());
}

#[test]
fn canonical_symbol_round_trips() {
    for op in [
        BinaryOp::Add,
        BinaryOp::NotEq,
        BinaryOp::Contains,
        BinaryOp::And,
    ] {
        assert_eq!(BinaryOp::from_symbol(op.as_symbol()), Some(op));
    }
}

#[test]
fn operator_families() {
    assert!(BinaryOp::Mod.is_arithmetic());
    assert!(BinaryOp::GtEq.is_comparison());
    assert!(!BinaryOp::Contains.is_comparison());
    assert!(BinaryOp::Or.is_logical());
}
