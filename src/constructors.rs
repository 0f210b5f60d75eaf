//! Free constructor functions for building expression trees without spelling
//! out the node types.

use crate::expression::{
    Call, CollectionLiteral, DictEntry, Expression, ExpressionError, Id, KeywordArgument, Lambda,
    Literal, Operation, UnaryOperation,
};
use crate::operator::{BinaryOperator, UnaryOperator};

/// A literal expression.
pub fn lit(value: impl Into<Literal>) -> Expression {
    Expression::Lit(value.into())
}

/// An identifier expression. Fails on an empty name.
pub fn id(name: &str) -> Result<Expression, ExpressionError> {
    Ok(Expression::Id(Id::new(name)?))
}

/// The empty expression.
pub fn epsilon() -> Expression {
    Expression::Epsilon
}

/// A list literal, `[a, b, c]`.
pub fn list(elements: Vec<Expression>) -> Expression {
    Expression::Collection(CollectionLiteral::list(elements))
}

/// A tuple literal, `(a, b, c)`.
pub fn tuple(elements: Vec<Expression>) -> Expression {
    Expression::Collection(CollectionLiteral::tuple(elements))
}

/// A set literal, `{a, b, c}`.
pub fn set(elements: Vec<Expression>) -> Expression {
    Expression::Collection(CollectionLiteral::set(elements))
}

/// A dictionary literal, `{k1: v1, k2: v2}`. Entries render in the order
/// supplied here.
pub fn dict(entries: Vec<(Expression, Expression)>) -> Expression {
    Expression::Collection(CollectionLiteral::dict(entries))
}

/// A single `key: value` dictionary entry.
pub fn dict_entry(key: impl Into<Expression>, value: impl Into<Expression>) -> Expression {
    Expression::DictEntry(DictEntry::new(key.into(), value.into()))
}

/// A call expression, `callee(args)`.
pub fn call(callee: impl Into<Expression>, args: Vec<Expression>) -> Expression {
    Expression::Call(Call::new(callee.into(), args))
}

/// A keyword argument, `name=value`, for use in [call] argument lists.
pub fn kwarg(
    name: &str,
    value: impl Into<Expression>,
) -> Result<Expression, ExpressionError> {
    Ok(Expression::KeywordArg(KeywordArgument::new(
        name,
        value.into(),
    )?))
}

/// A lambda expression, `lambda params: body`.
pub fn lambda(params: Vec<Id>, body: impl Into<Expression>) -> Expression {
    Expression::Lambda(Lambda::new(params, body.into()))
}

/// An n-ary infix operation. Fails with fewer than two operands.
pub fn operation(
    operator: BinaryOperator,
    operands: Vec<Expression>,
) -> Result<Expression, ExpressionError> {
    Ok(Expression::Operation(Operation::new(operator, operands)?))
}

/// A unary operation.
pub fn unary(operator: UnaryOperator, operand: impl Into<Expression>) -> Expression {
    Expression::UnaryOp(UnaryOperation::new(operator, operand.into()))
}

/// A slice expression, `start:stop` or `start:stop:step`, with open ends
/// rendered as nothing. Used as an index key: `xs[a:b]`.
pub fn slice(
    start: Option<Expression>,
    stop: Option<Expression>,
    step: Option<Expression>,
) -> Expression {
    let start = start.unwrap_or(Expression::Epsilon);
    let stop = stop.unwrap_or(Expression::Epsilon);
    let mut operands = vec![start, stop];
    if let Some(step) = step {
        operands.push(step);
    }
    Expression::Operation(
        Operation::new(BinaryOperator::Slice, operands).expect("at least two operands"),
    )
}
