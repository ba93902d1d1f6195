//! Attribute/expression binding control
//!
//! Fields that are not value-only carry an `AttributeSelection`: the state
//! of the control that switches a field between holding a literal value, a
//! reference to a feature data attribute, or an externally built expression.
//! Value-only fields have no such control at all, so the non-literal modes
//! are unrepresentable for them.

use meridian_style::Expression;

// ============================================================================
// ValueBinding
// ============================================================================

/// The representation mode of a field's value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ValueBinding {
    /// The field holds its own literal value
    #[default]
    Value,
    /// The field is bound to a named data attribute
    Attribute(String),
    /// The field holds an externally built expression
    Expression(Expression),
}

impl ValueBinding {
    /// Short name of this binding mode, for diagnostics
    pub fn mode_name(&self) -> &'static str {
        match self {
            ValueBinding::Value => "value",
            ValueBinding::Attribute(_) => "attribute",
            ValueBinding::Expression(_) => "expression",
        }
    }
}

// ============================================================================
// AttributeSelection
// ============================================================================

/// State of the value/attribute/expression mode control
#[derive(Debug, Clone, Default)]
pub struct AttributeSelection {
    /// Whether the control itself is enabled
    enabled: bool,

    /// The current binding mode
    binding: ValueBinding,
}

impl AttributeSelection {
    /// Create a new control in literal-value mode
    pub fn new() -> Self {
        Self {
            enabled: true,
            binding: ValueBinding::Value,
        }
    }

    /// Check if the control is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set the control's enabled state
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Get the current binding
    pub fn binding(&self) -> &ValueBinding {
        &self.binding
    }

    /// Switch to literal-value mode
    pub fn select_value(&mut self) {
        self.binding = ValueBinding::Value;
    }

    /// Bind to a named data attribute
    pub fn select_attribute(&mut self, name: impl Into<String>) {
        self.binding = ValueBinding::Attribute(name.into());
    }

    /// Bind to an externally built expression
    pub fn select_expression(&mut self, expression: Expression) {
        self.binding = ValueBinding::Expression(expression);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_core::StyleValue;

    #[test]
    fn test_initial_mode_is_value() {
        let selection = AttributeSelection::new();
        assert_eq!(selection.binding(), &ValueBinding::Value);
        assert!(selection.is_enabled());
    }

    #[test]
    fn test_mode_switching() {
        let mut selection = AttributeSelection::new();

        selection.select_attribute("population");
        assert_eq!(
            selection.binding(),
            &ValueBinding::Attribute("population".to_string())
        );
        assert_eq!(selection.binding().mode_name(), "attribute");

        selection.select_expression(Expression::literal(StyleValue::Integer(4)));
        assert_eq!(selection.binding().mode_name(), "expression");

        selection.select_value();
        assert_eq!(selection.binding(), &ValueBinding::Value);
    }
}
