//! Process functions — opaque computed-value payloads
//!
//! A process function is a named geometry/rendering transformation with a
//! parameter list (for example `vec:Heatmap` with a radius and a weight
//! attribute). The editor stores the payload verbatim and displays the
//! canonical textual summary; parameter editing is delegated to an external
//! dialog collaborator.

use crate::expression::Expression;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ProcessParameter
// ============================================================================

/// One named parameter of a process function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessParameter {
    /// Parameter name
    pub name: String,

    /// Parameter value expression
    pub value: Expression,
}

impl ProcessParameter {
    /// Create a new parameter
    pub fn new(name: impl Into<String>, value: Expression) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

// ============================================================================
// ProcessFunction
// ============================================================================

/// An opaque named-function-with-parameters payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessFunction {
    /// Qualified function name, e.g. `vec:Heatmap`
    pub name: String,

    /// Ordered parameter list
    pub parameters: Vec<ProcessParameter>,
}

impl ProcessFunction {
    /// Create a new process function
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    /// Add a parameter
    pub fn with_parameter(mut self, name: impl Into<String>, value: Expression) -> Self {
        self.parameters.push(ProcessParameter::new(name, value));
        self
    }

    /// Canonical textual summary of this process function
    ///
    /// This is the single source of truth for the preview text shown beside
    /// a transformation field; the field never stores the text itself.
    pub fn summary(&self) -> String {
        self.to_string()
    }

    /// Encode as a function-shaped expression for document storage
    ///
    /// Each parameter becomes a single-argument function node named after
    /// the parameter, so named parameters survive the round trip.
    pub fn to_expression(&self) -> Expression {
        Expression::function(
            self.name.clone(),
            self.parameters
                .iter()
                .map(|parameter| {
                    Expression::function(parameter.name.clone(), vec![parameter.value.clone()])
                })
                .collect(),
        )
    }

    /// Decode from a function-shaped expression
    ///
    /// Returns `None` when the expression does not have the shape produced
    /// by [`to_expression`](Self::to_expression).
    pub fn from_expression(expression: &Expression) -> Option<Self> {
        let Expression::Function { name, args } = expression else {
            return None;
        };
        let mut parameters = Vec::with_capacity(args.len());
        for arg in args {
            let Expression::Function {
                name: parameter_name,
                args: parameter_args,
            } = arg
            else {
                return None;
            };
            if parameter_args.len() != 1 {
                return None;
            }
            parameters.push(ProcessParameter::new(
                parameter_name.clone(),
                parameter_args[0].clone(),
            ));
        }
        Some(Self {
            name: name.clone(),
            parameters,
        })
    }
}

impl fmt::Display for ProcessFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (index, parameter) in self.parameters.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", parameter.name, parameter.value)?;
        }
        write!(f, ")")
    }
}

// ============================================================================
// Tests
// ============================================================================
