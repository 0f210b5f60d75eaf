//! Conversion of host values into expression trees.
//!
//! [ToExpression] is the single normalization boundary: any object that can
//! render itself as an expression implements it, and all downstream code
//! operates only on [Expression] nodes. Conversions are total and pure.
//!
//! Hash-based collections are deliberately not convertible: their iteration
//! order would make rendering nondeterministic. Convert through a
//! `BTreeMap`/`BTreeSet` or a vector of elements instead.

use crate::constructors::slice;
use crate::expression::{CollectionLiteral, Expression, Literal};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

/// The capability of rendering oneself as an expression. The motivating use
/// case: complex host objects (models, configurations, jobs) expose a
/// readable, width-formatted diagnostic representation by building an
/// expression tree for themselves.
pub trait ToExpression {
    /// Render this object as an expression.
    fn to_expression(&self) -> Expression;
}

/// Convert a host value into an expression. Never fails.
pub fn make_expression<T: ToExpression + ?Sized>(value: &T) -> Expression {
    value.to_expression()
}

impl<'a, T: ToExpression + ?Sized> ToExpression for &'a T {
    fn to_expression(&self) -> Expression {
        (**self).to_expression()
    }
}

impl ToExpression for Expression {
    fn to_expression(&self) -> Expression {
        self.clone()
    }
}

impl ToExpression for Literal {
    fn to_expression(&self) -> Expression {
        Expression::Lit(self.clone())
    }
}

impl ToExpression for bool {
    fn to_expression(&self) -> Expression {
        Expression::Lit(Literal::Bool(*self))
    }
}

macro_rules! impl_to_expression_int {
    ($($ty:ty)*) => {
        $(
            impl ToExpression for $ty {
                fn to_expression(&self) -> Expression {
                    Expression::Lit(Literal::Int(*self as i64))
                }
            }
        )*
    };
}

impl_to_expression_int!(i8 i16 i32 i64 u8 u16 u32 usize);

impl ToExpression for f32 {
    fn to_expression(&self) -> Expression {
        Expression::Lit(Literal::Float(*self as f64))
    }
}

impl ToExpression for f64 {
    fn to_expression(&self) -> Expression {
        Expression::Lit(Literal::Float(*self))
    }
}

impl ToExpression for str {
    fn to_expression(&self) -> Expression {
        Expression::Lit(Literal::Str(self.to_owned()))
    }
}

impl ToExpression for String {
    fn to_expression(&self) -> Expression {
        Expression::Lit(Literal::Str(self.clone()))
    }
}

impl ToExpression for () {
    fn to_expression(&self) -> Expression {
        Expression::Lit(Literal::None)
    }
}

/// `None` converts to the `None` literal, `Some(x)` to the conversion of
/// `x`.
impl<T: ToExpression> ToExpression for Option<T> {
    fn to_expression(&self) -> Expression {
        match self {
            Some(value) => value.to_expression(),
            None => Expression::Lit(Literal::None),
        }
    }
}

/// Sequences convert to list literals; nested sequences of arbitrary depth
/// become nested list literals.
impl<T: ToExpression> ToExpression for [T] {
    fn to_expression(&self) -> Expression {
        Expression::Collection(CollectionLiteral::list(
            self.iter().map(ToExpression::to_expression).collect(),
        ))
    }
}

impl<T: ToExpression> ToExpression for Vec<T> {
    fn to_expression(&self) -> Expression {
        self.as_slice().to_expression()
    }
}

impl<T: ToExpression, const N: usize> ToExpression for [T; N] {
    fn to_expression(&self) -> Expression {
        self.as_ref().to_expression()
    }
}

impl<T: ToExpression> ToExpression for BTreeSet<T> {
    fn to_expression(&self) -> Expression {
        Expression::Collection(CollectionLiteral::set(
            self.iter().map(ToExpression::to_expression).collect(),
        ))
    }
}

impl<K: ToExpression, V: ToExpression> ToExpression for BTreeMap<K, V> {
    fn to_expression(&self) -> Expression {
        Expression::Collection(CollectionLiteral::dict(
            self.iter()
                .map(|(key, value)| (key.to_expression(), value.to_expression()))
                .collect(),
        ))
    }
}

macro_rules! impl_to_expression_tuple {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: ToExpression),+> ToExpression for ($($name,)+) {
            fn to_expression(&self) -> Expression {
                Expression::Collection(CollectionLiteral::tuple(
                    vec![$(self.$idx.to_expression()),+],
                ))
            }
        }
    };
}

impl_to_expression_tuple!(A: 0);
impl_to_expression_tuple!(A: 0, B: 1);
impl_to_expression_tuple!(A: 0, B: 1, C: 2);
impl_to_expression_tuple!(A: 0, B: 1, C: 2, D: 3);

/// Ranges convert to slice expressions, with open ends rendered as nothing.
impl<T: ToExpression> ToExpression for Range<T> {
    fn to_expression(&self) -> Expression {
        slice(
            Some(self.start.to_expression()),
            Some(self.end.to_expression()),
            None,
        )
    }
}

impl<T: ToExpression> ToExpression for RangeFrom<T> {
    fn to_expression(&self) -> Expression {
        slice(Some(self.start.to_expression()), None, None)
    }
}

impl<T: ToExpression> ToExpression for RangeTo<T> {
    fn to_expression(&self) -> Expression {
        slice(None, Some(self.end.to_expression()), None)
    }
}

impl ToExpression for RangeFull {
    fn to_expression(&self) -> Expression {
        slice(None, None, None)
    }
}
