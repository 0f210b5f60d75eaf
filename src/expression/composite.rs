//! Composite expressions: bracketed collections, prefix constructs, and
//! n-ary infix operations.

use super::{Expression, ExpressionError};
use crate::operator::{BinaryOperator, Precedence, UnaryOperator, MAX_PRECEDENCE};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A pair of bracket characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BracketPair {
    /// The opening bracket.
    pub opening: &'static str,
    /// The closing bracket.
    pub closing: &'static str,
}

#[cfg(feature = "serialization")]
impl serde::Serialize for BracketPair {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.opening, self.closing).serialize(serializer)
    }
}

#[cfg(feature = "serialization")]
impl<'de> serde::Deserialize<'de> for BracketPair {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (opening, closing): (String, String) = serde::Deserialize::deserialize(deserializer)?;
        match (opening.as_str(), closing.as_str()) {
            ("(", ")") => Ok(BracketPair::ROUND),
            ("[", "]") => Ok(BracketPair::SQUARE),
            ("{", "}") => Ok(BracketPair::CURLY),
            ("<", ">") => Ok(BracketPair::ANGLE),
            _ => Err(serde::de::Error::custom("unknown bracket pair")),
        }
    }
}

impl BracketPair {
    /// A pair of round brackets.
    pub const ROUND: BracketPair = BracketPair {
        opening: "(",
        closing: ")",
    };
    /// A pair of square brackets.
    pub const SQUARE: BracketPair = BracketPair {
        opening: "[",
        closing: "]",
    };
    /// A pair of curly brackets.
    pub const CURLY: BracketPair = BracketPair {
        opening: "{",
        closing: "}",
    };
    /// A pair of angle brackets.
    pub const ANGLE: BracketPair = BracketPair {
        opening: "<",
        closing: ">",
    };
}

/// The flavor of a collection literal. Part of a collection's identity: a set
/// and a dict render with the same brackets but are never equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum CollectionKind {
    List,
    Tuple,
    Set,
    Dict,
    /// The argument list of a call or index expression.
    Arguments,
}

/// A collection literal: a list, tuple, set, or dictionary, or the argument
/// list of an invocation.
///
/// The bracket interior is normalized: zero elements render as the empty
/// expression, a single element renders directly, and two or more elements
/// are joined into a single n-ary comma operation. This keeps single-element
/// collections visually distinct from the comma operator.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectionLiteral {
    kind: CollectionKind,
    brackets: BracketPair,
    elements: Vec<Arc<Expression>>,
}

impl CollectionLiteral {
    /// A list literal with square brackets.
    pub fn list(elements: Vec<Expression>) -> CollectionLiteral {
        CollectionLiteral::with_kind(CollectionKind::List, BracketPair::SQUARE, elements)
    }

    /// A tuple literal with round brackets.
    pub fn tuple(elements: Vec<Expression>) -> CollectionLiteral {
        CollectionLiteral::with_kind(CollectionKind::Tuple, BracketPair::ROUND, elements)
    }

    /// A set literal with curly brackets.
    pub fn set(elements: Vec<Expression>) -> CollectionLiteral {
        CollectionLiteral::with_kind(CollectionKind::Set, BracketPair::CURLY, elements)
    }

    /// A dictionary literal: `key: value` entries with curly brackets.
    /// Entries render in the order supplied here.
    pub fn dict(entries: Vec<(Expression, Expression)>) -> CollectionLiteral {
        let entries = entries
            .into_iter()
            .map(|(key, value)| Expression::DictEntry(DictEntry::new(key, value)))
            .collect();
        CollectionLiteral::with_kind(CollectionKind::Dict, BracketPair::CURLY, entries)
    }

    pub(crate) fn arguments(brackets: BracketPair, args: Vec<Expression>) -> CollectionLiteral {
        CollectionLiteral::with_kind(CollectionKind::Arguments, brackets, args)
    }

    fn with_kind(
        kind: CollectionKind,
        brackets: BracketPair,
        elements: Vec<Expression>,
    ) -> CollectionLiteral {
        CollectionLiteral {
            kind,
            brackets,
            elements: elements.into_iter().map(Arc::new).collect(),
        }
    }

    /// The flavor of this collection.
    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    /// The brackets enclosing this collection.
    pub fn brackets(&self) -> BracketPair {
        self.brackets
    }

    /// The elements of this collection, in construction order.
    pub fn elements(&self) -> Vec<Expression> {
        self.elements.iter().map(|e| (**e).clone()).collect()
    }

    /// The normalized bracket interior:
    ///
    /// - the empty expression for zero elements,
    /// - the element itself for one element,
    /// - a single comma operation joining all elements otherwise.
    pub fn interior(&self) -> Expression {
        match self.elements.len() {
            0 => Expression::Epsilon,
            1 => (*self.elements[0]).clone(),
            _ => Expression::Operation(Operation {
                operator: BinaryOperator::Comma,
                operands: self.elements.clone(),
            }),
        }
    }

    pub fn precedence(&self) -> Precedence {
        MAX_PRECEDENCE
    }
}

// Two collections are equal iff they have the same kind, the same brackets,
// and equal normalized interiors (matching the interior-based hash).
impl PartialEq for CollectionLiteral {
    fn eq(&self, other: &CollectionLiteral) -> bool {
        self.kind == other.kind
            && self.brackets == other.brackets
            && self.interior() == other.interior()
    }
}

impl Eq for CollectionLiteral {}

impl Hash for CollectionLiteral {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.brackets.hash(state);
        self.interior().hash(state);
    }
}

/// A unary operation: an operator symbol prefixed to a single operand.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct UnaryOperation {
    operator: UnaryOperator,
    operand: Arc<Expression>,
}

impl UnaryOperation {
    pub fn new(operator: UnaryOperator, operand: Expression) -> UnaryOperation {
        UnaryOperation {
            operator,
            operand: Arc::new(operand),
        }
    }

    pub fn operator(&self) -> UnaryOperator {
        self.operator
    }

    pub fn operand(&self) -> Expression {
        (*self.operand).clone()
    }

    pub fn precedence(&self) -> Precedence {
        self.operator.precedence()
    }
}

/// A keyword argument of a call, in the shape of `name=value`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct KeywordArgument {
    name: super::Id,
    value: Arc<Expression>,
}

impl KeywordArgument {
    pub fn new(name: &str, value: Expression) -> Result<KeywordArgument, ExpressionError> {
        Ok(KeywordArgument {
            name: super::Id::new(name)?,
            value: Arc::new(value),
        })
    }

    /// The name of this keyword argument.
    pub fn name(&self) -> &str {
        self.name.name()
    }

    pub(crate) fn name_id(&self) -> super::Id {
        self.name.clone()
    }

    pub fn value(&self) -> Expression {
        (*self.value).clone()
    }

    pub fn precedence(&self) -> Precedence {
        BinaryOperator::Eq.precedence()
    }
}

/// Two expressions separated by a colon, used in dictionary literals.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct DictEntry {
    key: Arc<Expression>,
    value: Arc<Expression>,
}

impl DictEntry {
    pub fn new(key: Expression, value: Expression) -> DictEntry {
        DictEntry {
            key: Arc::new(key),
            value: Arc::new(value),
        }
    }

    pub fn key(&self) -> Expression {
        (*self.key).clone()
    }

    pub fn value(&self) -> Expression {
        (*self.value).clone()
    }

    pub fn precedence(&self) -> Precedence {
        BinaryOperator::Colon.precedence()
    }
}

/// Parameters and body separated by a colon, the part of a lambda expression
/// after the `lambda` keyword.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct LambdaDefinition {
    params: Arc<Expression>,
    body: Arc<Expression>,
}

impl LambdaDefinition {
    pub fn new(params: Expression, body: Expression) -> LambdaDefinition {
        LambdaDefinition {
            params: Arc::new(params),
            body: Arc::new(body),
        }
    }

    /// The parameter list: the empty expression, a single identifier, or a
    /// comma operation over identifiers.
    pub fn params(&self) -> Expression {
        (*self.params).clone()
    }

    pub fn body(&self) -> Expression {
        (*self.body).clone()
    }

    pub fn precedence(&self) -> Precedence {
        UnaryOperator::Lambda.precedence()
    }
}

/// A lambda expression: `lambda <params>: <body>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Lambda {
    definition: LambdaDefinition,
}

impl Lambda {
    pub fn new(params: Vec<super::Id>, body: Expression) -> Lambda {
        let params: Vec<Expression> = params.into_iter().map(Expression::Id).collect();
        let param_list = match params.len() {
            0 => Expression::Epsilon,
            1 => params.into_iter().next().unwrap(),
            _ => Expression::Operation(Operation {
                operator: BinaryOperator::Comma,
                operands: params.into_iter().map(Arc::new).collect(),
            }),
        };
        Lambda {
            definition: LambdaDefinition::new(param_list, body),
        }
    }

    pub fn definition(&self) -> &LambdaDefinition {
        &self.definition
    }

    pub fn precedence(&self) -> Precedence {
        UnaryOperator::Lambda.precedence()
    }
}

/// A function invocation: `callee(args)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Call {
    callee: Arc<Expression>,
    arguments: CollectionLiteral,
}

impl Call {
    pub fn new(callee: Expression, args: Vec<Expression>) -> Call {
        Call {
            callee: Arc::new(callee),
            arguments: CollectionLiteral::arguments(BracketPair::ROUND, args),
        }
    }

    /// The expression invoked by this call.
    pub fn callee(&self) -> Expression {
        (*self.callee).clone()
    }

    /// The argument list enclosed by the brackets.
    pub fn arguments(&self) -> &CollectionLiteral {
        &self.arguments
    }

    pub fn precedence(&self) -> Precedence {
        BinaryOperator::Dot.precedence()
    }
}

/// An indexing operation: `target[keys]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Index {
    target: Arc<Expression>,
    arguments: CollectionLiteral,
}

impl Index {
    pub fn new(target: Expression, keys: Vec<Expression>) -> Index {
        Index {
            target: Arc::new(target),
            arguments: CollectionLiteral::arguments(BracketPair::SQUARE, keys),
        }
    }

    /// The expression being indexed.
    pub fn target(&self) -> Expression {
        (*self.target).clone()
    }

    /// The key list enclosed by the brackets.
    pub fn arguments(&self) -> &CollectionLiteral {
        &self.arguments
    }

    pub fn precedence(&self) -> Precedence {
        BinaryOperator::Dot.precedence()
    }
}

/// An n-ary infix operation: one binary operator joining two or more
/// operands.
///
/// Chained applications of the same operator are flattened: if the *first*
/// operand is itself an operation with the same operator, its operand list
/// is spliced in. Only the first operand is inspected, so explicitly
/// right-grouped chains like `a + (b + c)` keep their grouping.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Operation {
    operator: BinaryOperator,
    operands: Vec<Arc<Expression>>,
}

impl Operation {
    /// Construct an n-ary operation. Fails unless at least two operands are
    /// supplied.
    pub fn new(
        operator: BinaryOperator,
        operands: Vec<Expression>,
    ) -> Result<Operation, ExpressionError> {
        if operands.len() < 2 {
            return Err(ExpressionError::TooFewOperands(operands.len()));
        }
        Ok(Operation::flattened(
            operator,
            operands.into_iter().map(Arc::new).collect(),
        ))
    }

    pub(crate) fn binary(operator: BinaryOperator, lhs: Expression, rhs: Expression) -> Operation {
        Operation::flattened(operator, vec![Arc::new(lhs), Arc::new(rhs)])
    }

    fn flattened(operator: BinaryOperator, mut operands: Vec<Arc<Expression>>) -> Operation {
        let spliced = match &*operands[0] {
            Expression::Operation(first) if first.operator == operator => {
                Some(first.operands.clone())
            }
            _ => None,
        };
        if let Some(mut flattened) = spliced {
            flattened.extend(operands.drain(1..));
            operands = flattened;
        }
        Operation { operator, operands }
    }

    pub fn operator(&self) -> BinaryOperator {
        self.operator
    }

    /// The operands of this operation, in rendering order.
    pub fn operands(&self) -> Vec<Expression> {
        self.operands.iter().map(|e| (**e).clone()).collect()
    }

    pub(crate) fn operand_refs(&self) -> impl Iterator<Item = &Expression> {
        self.operands.iter().map(|e| &**e)
    }

    pub fn precedence(&self) -> Precedence {
        self.operator.precedence()
    }
}
