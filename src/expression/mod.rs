//! The expression tree model.
//!
//! An [Expression] is an immutable tree of literals, identifiers,
//! collections, prefix constructs, and n-ary infix operations. Nodes are
//! constructed once and never mutated; sharing subtrees is permitted (and
//! cheap, as children are reference counted), cycles are not. The only
//! mutable node is the [ExpressionAlias] indirection.

mod alias;
mod atomic;
mod composite;

pub use alias::ExpressionAlias;
pub use atomic::{Id, Literal};
pub use composite::{
    BracketPair, Call, CollectionKind, CollectionLiteral, DictEntry, Index, KeywordArgument,
    Lambda, LambdaDefinition, Operation, UnaryOperation,
};

use crate::operator::{BinaryOperator, Precedence, UnaryOperator, MAX_PRECEDENCE};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops;

/// An error raised when constructing a malformed expression node.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("identifier name must not be empty")]
    EmptyIdentifier,
    #[error("operation requires at least two operands, got {0}")]
    TooFewOperands(usize),
}

/// An expression composed of literals and (possibly nested) operations.
///
/// The set of node kinds is closed; the layout engine is exhaustive over it.
#[derive(Clone, Debug, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum Expression {
    /// A literal value.
    Lit(Literal),
    /// An identifier.
    Id(Id),
    /// The empty expression.
    Epsilon,
    /// A bracketed collection literal, or an invocation argument list.
    Collection(CollectionLiteral),
    /// A unary operation such as `-x` or `not x`.
    UnaryOp(UnaryOperation),
    /// A keyword argument, `name=value`.
    KeywordArg(KeywordArgument),
    /// A dictionary entry, `key: value`.
    DictEntry(DictEntry),
    /// The `params: body` part of a lambda expression.
    LambdaDef(LambdaDefinition),
    /// A lambda expression.
    Lambda(Lambda),
    /// A function invocation, `callee(args)`.
    Call(Call),
    /// An indexing operation, `target[keys]`.
    Index(Index),
    /// An n-ary infix operation.
    Operation(Operation),
    /// A rebindable indirection to another expression. Serialized
    /// transparently as its target.
    #[cfg_attr(feature = "serialization", serde(untagged))]
    Alias(ExpressionAlias),
}

impl Expression {
    /// The precedence of this expression, used to determine the need for
    /// parentheses around subexpressions.
    pub fn precedence(&self) -> Precedence {
        match self {
            Expression::Lit(_) | Expression::Id(_) | Expression::Epsilon => MAX_PRECEDENCE,
            Expression::Collection(c) => c.precedence(),
            Expression::UnaryOp(u) => u.precedence(),
            Expression::KeywordArg(k) => k.precedence(),
            Expression::DictEntry(d) => d.precedence(),
            Expression::LambdaDef(l) => l.precedence(),
            Expression::Lambda(l) => l.precedence(),
            Expression::Call(c) => c.precedence(),
            Expression::Index(i) => i.precedence(),
            Expression::Operation(o) => o.precedence(),
            Expression::Alias(a) => a.expression().precedence(),
        }
    }

    /// The subexpressions of this expression, in rendering order. Atomic
    /// expressions have none; a collection has its normalized interior; a
    /// prefix construct has its prefix and body; an operation has its
    /// operands; an alias has its target.
    pub fn subexpressions(&self) -> Vec<Expression> {
        match self {
            Expression::Lit(_) | Expression::Id(_) | Expression::Epsilon => vec![],
            Expression::Collection(c) => vec![c.interior()],
            Expression::Operation(o) => o.operands(),
            Expression::Alias(a) => vec![a.expression()],
            _ => {
                let parts = self.prefix_parts().expect("prefix expression");
                vec![parts.prefix, parts.body]
            }
        }
    }

    /// Whether this is the empty expression. Does not see through aliases.
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Expression::Epsilon)
    }

    /// The prefix/separator/body decomposition of prefix-category nodes.
    pub(crate) fn prefix_parts(&self) -> Option<PrefixParts> {
        match self {
            Expression::UnaryOp(u) => Some(PrefixParts {
                prefix: Expression::Epsilon,
                separator: u.operator().symbol().to_owned(),
                body: u.operand(),
                precedence: u.precedence(),
            }),
            Expression::KeywordArg(k) => Some(PrefixParts {
                prefix: Expression::Id(k.name_id()),
                separator: "=".to_owned(),
                body: k.value(),
                precedence: k.precedence(),
            }),
            Expression::DictEntry(d) => Some(PrefixParts {
                prefix: d.key(),
                separator: ": ".to_owned(),
                body: d.value(),
                precedence: d.precedence(),
            }),
            Expression::LambdaDef(l) => Some(PrefixParts {
                prefix: l.params(),
                separator: ": ".to_owned(),
                body: l.body(),
                precedence: l.precedence(),
            }),
            Expression::Lambda(l) => Some(PrefixParts {
                prefix: Expression::Epsilon,
                separator: format!("{} ", UnaryOperator::Lambda.symbol()),
                body: Expression::LambdaDef(l.definition().clone()),
                precedence: l.precedence(),
            }),
            Expression::Call(c) => Some(PrefixParts {
                prefix: c.callee(),
                separator: String::new(),
                body: Expression::Collection(c.arguments().clone()),
                precedence: c.precedence(),
            }),
            Expression::Index(i) => Some(PrefixParts {
                prefix: i.target(),
                separator: String::new(),
                body: Expression::Collection(i.arguments().clone()),
                precedence: i.precedence(),
            }),
            _ => None,
        }
    }

    /// Whether this is a prefix-category node whose prefix is the empty
    /// expression (a unary operation or a lambda). Such a node needs no
    /// parentheses as the trailing operand of an infix chain.
    pub(crate) fn is_prefix_with_empty_prefix(&self) -> bool {
        match self.prefix_parts() {
            Some(parts) => parts.prefix.is_epsilon(),
            None => false,
        }
    }

    fn binary(operator: BinaryOperator, lhs: Expression, rhs: Expression) -> Expression {
        Expression::Operation(Operation::binary(operator, lhs, rhs))
    }

    /// Invoke this expression: `self(args)`. Keyword arguments are passed as
    /// [KeywordArgument] nodes at the end of `args`.
    pub fn call(self, args: Vec<Expression>) -> Expression {
        Expression::Call(Call::new(self, args))
    }

    /// Index this expression: `self[keys]`.
    pub fn index(self, keys: Vec<Expression>) -> Expression {
        Expression::Index(Index::new(self, keys))
    }

    /// Reference an attribute of this expression: `self.name`. A chain of
    /// attribute accesses flattens into a single dot operation.
    pub fn attr(self, name: &str) -> Result<Expression, ExpressionError> {
        let attribute = Id::new(name)?;
        Ok(Expression::binary(
            BinaryOperator::Dot,
            self,
            Expression::Id(attribute),
        ))
    }

    /// Shorthand for a `**` operation.
    pub fn pow_(self, other: impl Into<Expression>) -> Expression {
        Expression::binary(BinaryOperator::Pow, self, other.into())
    }

    /// Shorthand for an `@` operation.
    pub fn matmul_(self, other: impl Into<Expression>) -> Expression {
        Expression::binary(BinaryOperator::Matmul, self, other.into())
    }

    /// Shorthand for a `//` operation.
    pub fn floor_div_(self, other: impl Into<Expression>) -> Expression {
        Expression::binary(BinaryOperator::FloorDiv, self, other.into())
    }

    /// Shorthand for an `==` comparison expression. (Rust's `==` compares
    /// expressions structurally instead of building a node.)
    pub fn eq_(self, other: impl Into<Expression>) -> Expression {
        Expression::binary(BinaryOperator::Eq, self, other.into())
    }

    /// Shorthand for a `!=` comparison expression.
    pub fn ne_(self, other: impl Into<Expression>) -> Expression {
        Expression::binary(BinaryOperator::Ne, self, other.into())
    }

    /// Shorthand for a `<` comparison expression.
    pub fn lt_(self, other: impl Into<Expression>) -> Expression {
        Expression::binary(BinaryOperator::Lt, self, other.into())
    }

    /// Shorthand for a `<=` comparison expression.
    pub fn le_(self, other: impl Into<Expression>) -> Expression {
        Expression::binary(BinaryOperator::Le, self, other.into())
    }

    /// Shorthand for a `>` comparison expression.
    pub fn gt_(self, other: impl Into<Expression>) -> Expression {
        Expression::binary(BinaryOperator::Gt, self, other.into())
    }

    /// Shorthand for a `>=` comparison expression.
    pub fn ge_(self, other: impl Into<Expression>) -> Expression {
        Expression::binary(BinaryOperator::Ge, self, other.into())
    }

    /// Shorthand for an `in` expression.
    pub fn in_(self, other: impl Into<Expression>) -> Expression {
        Expression::binary(BinaryOperator::In, self, other.into())
    }

    /// Shorthand for a `not in` expression.
    pub fn not_in_(self, other: impl Into<Expression>) -> Expression {
        Expression::binary(BinaryOperator::NotIn, self, other.into())
    }

    /// Shorthand for an `is` expression.
    pub fn is_(self, other: impl Into<Expression>) -> Expression {
        Expression::binary(BinaryOperator::Is, self, other.into())
    }

    /// Shorthand for an `is not` expression.
    pub fn is_not_(self, other: impl Into<Expression>) -> Expression {
        Expression::binary(BinaryOperator::IsNot, self, other.into())
    }

    /// Shorthand for a logical `and` expression.
    pub fn and_(self, other: impl Into<Expression>) -> Expression {
        Expression::binary(BinaryOperator::And, self, other.into())
    }

    /// Shorthand for a logical `or` expression.
    pub fn or_(self, other: impl Into<Expression>) -> Expression {
        Expression::binary(BinaryOperator::Or, self, other.into())
    }

    /// Shorthand for a logical `not` expression.
    pub fn not_(self) -> Expression {
        Expression::UnaryOp(UnaryOperation::new(UnaryOperator::Not, self))
    }

    /// Shorthand for a unary `+` expression.
    pub fn pos_(self) -> Expression {
        Expression::UnaryOp(UnaryOperation::new(UnaryOperator::Pos, self))
    }
}

pub(crate) struct PrefixParts {
    pub prefix: Expression,
    pub separator: String,
    pub body: Expression,
    pub precedence: Precedence,
}

// Equality is structural and type-exact, except that an alias on either side
// transparently compares as its target.
impl PartialEq for Expression {
    fn eq(&self, other: &Expression) -> bool {
        use crate::expression::Expression as E;

        match (self, other) {
            (E::Alias(a), _) => a.expression() == *other,
            (_, E::Alias(b)) => *self == b.expression(),
            (E::Lit(a), E::Lit(b)) => a == b,
            (E::Id(a), E::Id(b)) => a == b,
            (E::Epsilon, E::Epsilon) => true,
            (E::Collection(a), E::Collection(b)) => a == b,
            (E::UnaryOp(a), E::UnaryOp(b)) => a == b,
            (E::KeywordArg(a), E::KeywordArg(b)) => a == b,
            (E::DictEntry(a), E::DictEntry(b)) => a == b,
            (E::LambdaDef(a), E::LambdaDef(b)) => a == b,
            (E::Lambda(a), E::Lambda(b)) => a == b,
            (E::Call(a), E::Call(b)) => a == b,
            (E::Index(a), E::Index(b)) => a == b,
            (E::Operation(a), E::Operation(b)) => a == b,
            _ => false,
        }
    }
}

impl Hash for Expression {
    fn hash<H: Hasher>(&self, state: &mut H) {
        use crate::expression::Expression as E;

        match self {
            // An alias hashes exactly as its target, with no discriminant of
            // its own, so it collides with the target as equality requires.
            E::Alias(a) => a.expression().hash(state),
            _ => {
                mem::discriminant(self).hash(state);
                match self {
                    E::Lit(a) => a.hash(state),
                    E::Id(a) => a.hash(state),
                    E::Epsilon => (),
                    E::Collection(a) => a.hash(state),
                    E::UnaryOp(a) => a.hash(state),
                    E::KeywordArg(a) => a.hash(state),
                    E::DictEntry(a) => a.hash(state),
                    E::LambdaDef(a) => a.hash(state),
                    E::Lambda(a) => a.hash(state),
                    E::Call(a) => a.hash(state),
                    E::Index(a) => a.hash(state),
                    E::Operation(a) => a.hash(state),
                    E::Alias(_) => unreachable!("handled above"),
                }
            }
        }
    }
}

impl fmt::Display for Expression {
    /// Renders the expression with the default format: single-line for `{}`,
    /// width-aware multi-line for `{:#}`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", crate::format::display_text(self, f.alternate()))
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $operator:ident, $doc:expr) => {
        impl<T: Into<Expression>> ops::$trait<T> for Expression {
            type Output = Expression;

            #[doc = $doc]
            fn $method(self, other: T) -> Expression {
                Expression::binary(BinaryOperator::$operator, self, other.into())
            }
        }
    };
}

impl_binary_op!(Add, add, Add, "Shorthand for a `+` operation.");
impl_binary_op!(Sub, sub, Sub, "Shorthand for a `-` operation.");
impl_binary_op!(Mul, mul, Mul, "Shorthand for a `*` operation.");
impl_binary_op!(Div, div, Div, "Shorthand for a `/` operation.");
impl_binary_op!(Rem, rem, Mod, "Shorthand for a `%` operation.");
impl_binary_op!(Shl, shl, Shl, "Shorthand for a `<<` operation.");
impl_binary_op!(Shr, shr, Shr, "Shorthand for a `>>` operation.");
impl_binary_op!(BitAnd, bitand, BitAnd, "Shorthand for an `&` operation.");
impl_binary_op!(BitXor, bitxor, BitXor, "Shorthand for a `^` operation.");
impl_binary_op!(BitOr, bitor, BitOr, "Shorthand for a `|` operation.");

impl ops::Neg for Expression {
    type Output = Expression;

    /// Shorthand for a unary `-` expression.
    fn neg(self) -> Expression {
        Expression::UnaryOp(UnaryOperation::new(UnaryOperator::Neg, self))
    }
}

impl ops::Not for Expression {
    type Output = Expression;

    /// Shorthand for a unary `~` (bitwise invert) expression. For logical
    /// negation, use [Expression::not_].
    fn not(self) -> Expression {
        Expression::UnaryOp(UnaryOperation::new(UnaryOperator::Invert, self))
    }
}

impl From<Literal> for Expression {
    fn from(value: Literal) -> Expression {
        Expression::Lit(value)
    }
}

impl From<Id> for Expression {
    fn from(value: Id) -> Expression {
        Expression::Id(value)
    }
}

impl From<CollectionLiteral> for Expression {
    fn from(value: CollectionLiteral) -> Expression {
        Expression::Collection(value)
    }
}

impl From<UnaryOperation> for Expression {
    fn from(value: UnaryOperation) -> Expression {
        Expression::UnaryOp(value)
    }
}

impl From<KeywordArgument> for Expression {
    fn from(value: KeywordArgument) -> Expression {
        Expression::KeywordArg(value)
    }
}

impl From<DictEntry> for Expression {
    fn from(value: DictEntry) -> Expression {
        Expression::DictEntry(value)
    }
}

impl From<LambdaDefinition> for Expression {
    fn from(value: LambdaDefinition) -> Expression {
        Expression::LambdaDef(value)
    }
}

impl From<Lambda> for Expression {
    fn from(value: Lambda) -> Expression {
        Expression::Lambda(value)
    }
}

impl From<Call> for Expression {
    fn from(value: Call) -> Expression {
        Expression::Call(value)
    }
}

impl From<Index> for Expression {
    fn from(value: Index) -> Expression {
        Expression::Index(value)
    }
}

impl From<Operation> for Expression {
    fn from(value: Operation) -> Expression {
        Expression::Operation(value)
    }
}

impl From<ExpressionAlias> for Expression {
    fn from(value: ExpressionAlias) -> Expression {
        Expression::Alias(value)
    }
}

impl From<bool> for Expression {
    fn from(value: bool) -> Expression {
        Expression::Lit(Literal::Bool(value))
    }
}

impl From<i64> for Expression {
    fn from(value: i64) -> Expression {
        Expression::Lit(Literal::Int(value))
    }
}

impl From<i32> for Expression {
    fn from(value: i32) -> Expression {
        Expression::Lit(Literal::Int(value as i64))
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Expression {
        Expression::Lit(Literal::Float(value))
    }
}

impl From<&str> for Expression {
    fn from(value: &str) -> Expression {
        Expression::Lit(Literal::Str(value.to_owned()))
    }
}

impl From<String> for Expression {
    fn from(value: String) -> Expression {
        Expression::Lit(Literal::Str(value))
    }
}
