#![cfg(feature = "serialization")]

mod common;

use common::{multi_line, var};
use pretty_expr::constructors::{call, dict, kwarg, lambda, list, lit, slice};
use pretty_expr::{Expression, ExpressionAlias, Id};

#[track_caller]
fn assert_round_trip(expression: &Expression) {
    let json = serde_json::to_string(expression).expect("serializes");
    let restored: Expression = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(&restored, expression);
    assert_eq!(multi_line(&restored, 40), multi_line(expression, 40));
}

#[test]
fn serialization_round_trips() {
    assert_round_trip(&lit(5));
    assert_round_trip(&lit("abc"));
    assert_round_trip(&lit(2.5));
    assert_round_trip(&(var("a") + var("b") * lit(3)));
    assert_round_trip(&list(vec![lit(1), dict(vec![(lit(2), lit("x"))])]));
    assert_round_trip(&call(
        var("f"),
        vec![lit(1), kwarg("k", lit(2)).unwrap()],
    ));
    assert_round_trip(&lambda(vec![Id::new("x").unwrap()], var("x") + lit(1)));
    assert_round_trip(&var("xs").index(vec![slice(Some(lit(1)), None, None)]));
}

#[test]
fn serialization_flattens_aliases() {
    // An alias serializes as its target; the restored tree compares equal
    // because aliases are transparent for equality.
    let alias = ExpressionAlias::new(var("x") + lit(1));
    let tree = Expression::from(alias) * lit(2);
    assert_round_trip(&tree);

    let json = serde_json::to_string(&tree).unwrap();
    let plain = (var("x") + lit(1)) * lit(2);
    assert_eq!(json, serde_json::to_string(&plain).unwrap());
}
