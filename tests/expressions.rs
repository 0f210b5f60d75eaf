mod common;

use common::var;
use pretty_expr::constructors::{
    call, dict, dict_entry, epsilon, id, kwarg, lambda, list, lit, operation, set, slice, tuple,
    unary,
};
use pretty_expr::{
    make_expression, BinaryOperator, Expression, ExpressionAlias, ExpressionError, Id, Literal,
    Operation, ToExpression, UnaryOperator,
};
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::hash::{Hash, Hasher};

fn hash_of(expression: &Expression) -> u64 {
    let mut hasher = DefaultHasher::new();
    expression.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn expressions_fluent_operators() {
    let a = || var("a");
    let b = || var("b");

    let cases = vec![
        (a() + b(), BinaryOperator::Add),
        (a() - b(), BinaryOperator::Sub),
        (a() * b(), BinaryOperator::Mul),
        (a() / b(), BinaryOperator::Div),
        (a() % b(), BinaryOperator::Mod),
        (a() << b(), BinaryOperator::Shl),
        (a() >> b(), BinaryOperator::Shr),
        (a() & b(), BinaryOperator::BitAnd),
        (a() ^ b(), BinaryOperator::BitXor),
        (a() | b(), BinaryOperator::BitOr),
        (a().pow_(b()), BinaryOperator::Pow),
        (a().matmul_(b()), BinaryOperator::Matmul),
        (a().floor_div_(b()), BinaryOperator::FloorDiv),
        (a().eq_(b()), BinaryOperator::Eq),
        (a().ne_(b()), BinaryOperator::Ne),
        (a().lt_(b()), BinaryOperator::Lt),
        (a().le_(b()), BinaryOperator::Le),
        (a().gt_(b()), BinaryOperator::Gt),
        (a().ge_(b()), BinaryOperator::Ge),
        (a().in_(b()), BinaryOperator::In),
        (a().not_in_(b()), BinaryOperator::NotIn),
        (a().is_(b()), BinaryOperator::Is),
        (a().is_not_(b()), BinaryOperator::IsNot),
        (a().and_(b()), BinaryOperator::And),
        (a().or_(b()), BinaryOperator::Or),
    ];
    for (expression, operator) in cases {
        let expected = operation(operator, vec![a(), b()]).unwrap();
        assert_eq!(expression, expected, "{}", operator);
    }

    assert_eq!(-a(), unary(UnaryOperator::Neg, a()));
    assert_eq!(a().pos_(), unary(UnaryOperator::Pos, a()));
    assert_eq!(!a(), unary(UnaryOperator::Invert, a()));
    assert_eq!(a().not_(), unary(UnaryOperator::Not, a()));
}

#[test]
fn expressions_flattening() {
    let a = || var("a");
    let b = || var("b");
    let c = || var("c");

    // Chained construction flattens into a single n-ary node, equal to the
    // one built in a single call.
    let chained = (a() + b()) + c();
    let explicit = operation(BinaryOperator::Add, vec![a(), b(), c()]).unwrap();
    assert_eq!(chained, explicit);
    assert_eq!(chained.subexpressions().len(), 3);

    // Flattening inspects only the first operand: a right-grouped chain
    // keeps its nesting.
    let right_grouped = operation(BinaryOperator::Add, vec![a(), b() + c()]).unwrap();
    assert_ne!(right_grouped, explicit);
    assert_eq!(right_grouped.subexpressions().len(), 2);

    // Differing operators do not flatten.
    let mixed = (a() - b()) + c();
    assert_eq!(mixed.subexpressions().len(), 2);
}

#[test]
fn expressions_operation_arity() {
    assert_eq!(
        Operation::new(BinaryOperator::Add, vec![]).unwrap_err(),
        ExpressionError::TooFewOperands(0)
    );
    assert_eq!(
        Operation::new(BinaryOperator::Add, vec![var("a")]).unwrap_err(),
        ExpressionError::TooFewOperands(1)
    );
    assert!(Operation::new(BinaryOperator::Add, vec![var("a"), var("b")]).is_ok());
}

#[test]
fn expressions_identifier_validation() {
    assert!(Id::new("x").is_ok());
    assert_eq!(Id::new("").unwrap_err(), ExpressionError::EmptyIdentifier);
    assert_eq!(id("").unwrap_err(), ExpressionError::EmptyIdentifier);
    assert_eq!(
        var("x").attr("").unwrap_err(),
        ExpressionError::EmptyIdentifier
    );
    assert_eq!(kwarg("", lit(1)).unwrap_err(), ExpressionError::EmptyIdentifier);
}

#[test]
fn expressions_structural_equality() {
    let build = || list(vec![var("x") + var("y") * lit(3), dict_entry(var("y"), var("x"))]);
    assert_eq!(build(), build());
    assert_eq!(hash_of(&build()), hash_of(&build()));

    // Type-exact: a literal never equals an identifier of the same text.
    assert_ne!(lit("5"), var("5"));
    assert_ne!(lit(5), lit(5.0));

    // Same brackets, different collection kinds.
    assert_ne!(set(vec![lit(1)]), dict(vec![]));
    assert_ne!(list(vec![]), tuple(vec![]));

    // Expressions are usable as set members.
    let mut seen = HashSet::new();
    seen.insert(build());
    assert!(seen.contains(&build()));
    seen.insert(build());
    assert_eq!(seen.len(), 1);
}

#[test]
fn expressions_precedence_accessors() {
    assert_eq!(lit(5).precedence(), pretty_expr::MAX_PRECEDENCE);
    assert_eq!(list(vec![]).precedence(), pretty_expr::MAX_PRECEDENCE);
    assert_eq!(
        (var("a") + var("b")).precedence(),
        BinaryOperator::Add.precedence()
    );
    assert_eq!(
        (-var("a")).precedence(),
        UnaryOperator::Neg.precedence()
    );
    assert_eq!(
        var("a").call(vec![]).precedence(),
        BinaryOperator::Dot.precedence()
    );
    assert_eq!(epsilon().subexpressions(), vec![]);
    assert_eq!(
        (var("a") + var("b")).subexpressions(),
        vec![var("a"), var("b")]
    );
}

#[test]
fn expressions_alias_transparency() {
    let alias = ExpressionAlias::new(var("x"));
    let aliased: Expression = alias.clone().into();

    // Transparent for equality and hashing in both directions.
    assert_eq!(aliased, var("x"));
    assert_eq!(var("x"), aliased);
    assert_eq!(hash_of(&aliased), hash_of(&var("x")));

    let sum = aliased.clone() + lit(1);
    assert_eq!(sum, var("x") + lit(1));

    // Rebinding the alias substitutes the subexpression in place, without
    // rebuilding the surrounding tree.
    alias.set_expression(var("y") * lit(2));
    assert_eq!(sum, var("y") * lit(2) + lit(1));
    assert_eq!(sum.precedence(), BinaryOperator::Add.precedence());
}

#[test]
fn expressions_attr_chains_flatten() {
    let chain = var("a").attr("b").unwrap().attr("c").unwrap();
    let explicit = operation(
        BinaryOperator::Dot,
        vec![var("a"), var("b"), var("c")],
    )
    .unwrap();
    assert_eq!(chain, explicit);
}

#[test]
fn convert_host_values() {
    assert_eq!(make_expression(&5_i64), lit(5));
    assert_eq!(make_expression(&2.5_f64), lit(2.5));
    assert_eq!(make_expression(&true), lit(Literal::Bool(true)));
    assert_eq!(make_expression("abc"), lit("abc"));
    assert_eq!(make_expression(&()), lit(Literal::None));
    assert_eq!(make_expression(&None::<i64>), lit(Literal::None));
    assert_eq!(make_expression(&Some(7_i64)), lit(7));

    // Nested sequences become nested list literals.
    assert_eq!(
        make_expression(&vec![vec![1_i64, 2], vec![3]]),
        list(vec![list(vec![lit(1), lit(2)]), list(vec![lit(3)])])
    );
    assert_eq!(make_expression(&[1_i64, 2]), list(vec![lit(1), lit(2)]));

    assert_eq!(
        make_expression(&(1_i64, "x")),
        tuple(vec![lit(1), lit("x")])
    );

    let mut ordered_set = BTreeSet::new();
    ordered_set.insert(2_i64);
    ordered_set.insert(1);
    assert_eq!(make_expression(&ordered_set), set(vec![lit(1), lit(2)]));

    let mut map = BTreeMap::new();
    map.insert(1_i64, "x");
    map.insert(2, "y");
    assert_eq!(
        make_expression(&map),
        dict(vec![(lit(1), lit("x")), (lit(2), lit("y"))])
    );

    // Ranges become slice expressions.
    assert_eq!(
        make_expression(&(2_i64..5)),
        slice(Some(lit(2)), Some(lit(5)), None)
    );
    assert_eq!(make_expression(&(2_i64..)), slice(Some(lit(2)), None, None));
    assert_eq!(make_expression(&(..5_i64)), slice(None, Some(lit(5)), None));
    assert_eq!(make_expression(&(..)), slice(None, None, None));

    // An expression converts to itself.
    let expression = var("x") + lit(1);
    assert_eq!(make_expression(&expression), expression);
}

#[test]
fn convert_custom_capability() {
    struct Point {
        x: i64,
        y: i64,
    }

    impl ToExpression for Point {
        fn to_expression(&self) -> Expression {
            call(
                var("Point"),
                vec![
                    kwarg("x", lit(self.x)).unwrap(),
                    kwarg("y", lit(self.y)).unwrap(),
                ],
            )
        }
    }

    let point = Point { x: 1, y: 2 };
    assert_eq!(common::single_line(&point.to_expression()), "Point(x=1, y=2)");
}

#[test]
fn expressions_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Expression>();
    assert_send_sync::<ExpressionAlias>();

    let tree = std::sync::Arc::new(var("x") + lit(1));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tree = std::sync::Arc::clone(&tree);
            std::thread::spawn(move || common::multi_line(&tree, 40))
        })
        .collect();
    let texts: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for text in &texts {
        assert_eq!(text, "x + 1");
    }
}

#[test]
fn expressions_lambda_structure() {
    let zero = lambda(vec![], lit(5));
    assert_eq!(zero.subexpressions().len(), 2);
    assert!(zero.subexpressions()[0].is_epsilon());

    let two = lambda(
        vec![Id::new("x").unwrap(), Id::new("y").unwrap()],
        var("x") + var("y"),
    );
    assert_eq!(two, two.clone());
}
