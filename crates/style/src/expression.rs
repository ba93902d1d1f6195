//! Expression tree for computed styling values
//!
//! Every styling property in a document is held as an expression: a literal
//! constant, a reference to a data attribute, or a named function applied to
//! further expressions. The editor core only ever constructs literal leaves
//! and distinguishes literal from non-literal shapes; evaluation belongs to
//! the rendering side and is not performed here.

use meridian_core::StyleValue;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Expression
// ============================================================================

/// A node in the expression tree of a styling property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expression {
    /// A constant leaf value
    Literal { value: StyleValue },
    /// A reference to a feature data attribute
    Property { name: String },
    /// A named function applied to argument expressions
    Function { name: String, args: Vec<Expression> },
}

impl Expression {
    /// Create a literal leaf
    pub fn literal(value: StyleValue) -> Self {
        Expression::Literal { value }
    }

    /// Create a string literal leaf
    pub fn literal_string(value: impl Into<String>) -> Self {
        Expression::Literal {
            value: StyleValue::String(value.into()),
        }
    }

    /// Create a property-reference node
    pub fn property(name: impl Into<String>) -> Self {
        Expression::Property { name: name.into() }
    }

    /// Create a function-call node
    pub fn function(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Function {
            name: name.into(),
            args,
        }
    }

    /// Check whether this node is a literal leaf
    pub fn is_literal(&self) -> bool {
        matches!(self, Expression::Literal { .. })
    }

    /// Get the literal value, if this node is a literal leaf
    pub fn as_literal(&self) -> Option<&StyleValue> {
        match self {
            Expression::Literal { value } => Some(value),
            _ => None,
        }
    }

    /// Get the short name of this node's shape, for diagnostics
    pub fn shape_name(&self) -> &'static str {
        match self {
            Expression::Literal { .. } => "literal",
            Expression::Property { .. } => "property",
            Expression::Function { .. } => "function",
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal { value } => write!(f, "{value}"),
            Expression::Property { name } => write!(f, "[{name}]"),
            Expression::Function { name, args } => {
                write!(f, "{name}(")?;
                for (index, arg) in args.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
