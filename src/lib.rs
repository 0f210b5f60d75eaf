//! Immutable expression trees with a width-aware pretty printer.
//!
//! Build an expression tree — fluently with `std::ops` operators, with the
//! free functions in [constructors], or by converting host values through
//! [ToExpression] — and render it as Python-style source text. The formatter
//! uses as few lines as will fit within a maximum width, breaking subtrees
//! across indented lines only when necessary, with precedence-correct
//! parenthesization.
//!
//! ```
//! use pretty_expr::constructors::{call, id, kwarg, lit};
//!
//! let expr = call(
//!     id("f").unwrap(),
//!     vec![lit(1) + lit(2), kwarg("flag", true).unwrap()],
//! );
//! assert_eq!(format!("{}", expr), "f(1 + 2, flag=True)");
//! ```

mod convert;
mod expression;
mod format;
mod operator;

pub mod constructors;

pub use convert::{make_expression, ToExpression};
pub use expression::{
    BracketPair, Call, CollectionKind, CollectionLiteral, DictEntry, Expression, ExpressionAlias,
    ExpressionError, Id, Index, KeywordArgument, Lambda, LambdaDefinition, Literal, Operation,
    UnaryOperation,
};
pub use format::{
    default_format, register_default_format, ExpressionFormatter, FormatError, FormattingConfig,
    PythonFormatter,
};
pub use operator::{BinaryOperator, Precedence, UnaryOperator, MAX_PRECEDENCE, MIN_PRECEDENCE};
