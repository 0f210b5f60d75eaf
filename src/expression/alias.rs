//! A rebindable indirection node, for substituting subexpressions without
//! rebuilding their ancestors.

use super::Expression;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

/// An alias pointing to another expression, and representing that
/// expression.
///
/// The alias is the only mutable node in a tree: its target can be
/// reassigned after construction. For equality and hashing an alias
/// transparently defers to its target, so trees containing aliases are
/// indistinguishable from their non-aliased counterparts.
///
/// Rebinding an alias while another thread formats a tree containing it must
/// be externally synchronized; an unsynchronized race will not corrupt
/// memory, but the formatted text may mix old and new targets. The target
/// must not contain the alias itself: cycles are disallowed.
#[derive(Clone, Debug)]
pub struct ExpressionAlias {
    target: Arc<RwLock<Expression>>,
}

impl ExpressionAlias {
    pub fn new(expression: Expression) -> ExpressionAlias {
        ExpressionAlias {
            target: Arc::new(RwLock::new(expression)),
        }
    }

    /// The expression this alias currently represents.
    pub fn expression(&self) -> Expression {
        self.target
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }

    /// Rebind this alias to a new target expression. Every tree holding this
    /// alias observes the change.
    pub fn set_expression(&self, expression: Expression) {
        *self
            .target
            .write()
            .unwrap_or_else(|poison| poison.into_inner()) = expression;
    }
}

impl PartialEq for ExpressionAlias {
    fn eq(&self, other: &ExpressionAlias) -> bool {
        self.expression() == other.expression()
    }
}

impl Eq for ExpressionAlias {}

impl Hash for ExpressionAlias {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Transparent: hash exactly as the target does, so an alias and its
        // target collide as equality requires.
        self.expression().hash(state);
    }
}

impl fmt::Display for ExpressionAlias {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.expression(), f)
    }
}

#[cfg(feature = "serialization")]
impl serde::Serialize for ExpressionAlias {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // An alias serializes as its target; the aliasing topology is not
        // preserved across a round trip.
        self.expression().serialize(serializer)
    }
}

#[cfg(feature = "serialization")]
impl<'de> serde::Deserialize<'de> for ExpressionAlias {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(ExpressionAlias::new(Expression::deserialize(deserializer)?))
    }
}
