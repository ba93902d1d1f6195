//! Numeric field configurations
//!
//! Two variants share this module: `FieldInteger` for whole-number
//! properties (font size, cell counts) and `FieldDouble` for continuous
//! properties (stroke width, opacity, rotation).

use crate::field::base::FieldConfigBase;
use crate::undo::{UndoEvent, UndoManager, UndoValue};
use meridian_core::{FieldKey, PanelKind, StudioError, StudioResult, StyleValue, ValueType};
use meridian_style::Expression;

// ============================================================================
// FieldInteger
// ============================================================================

/// A field configuration editing a whole-number value
#[derive(Debug, Clone)]
pub struct FieldInteger {
    base: FieldConfigBase,
    value: i64,
    default: i64,
}

impl FieldInteger {
    /// Create a new integer field holding zero
    pub fn new(
        panel: PanelKind,
        field: FieldKey,
        label: impl Into<String>,
        value_only: bool,
        multiple_values: bool,
    ) -> Self {
        Self {
            base: FieldConfigBase::new(panel, field, label, value_only, multiple_values),
            value: 0,
            default: 0,
        }
    }

    /// Set the default value (also becomes the initial value)
    pub fn with_default(mut self, default: i64) -> Self {
        self.default = default;
        self.value = default;
        self
    }

    /// Get the shared base state
    pub fn base(&self) -> &FieldConfigBase {
        &self.base
    }

    /// Get the shared base state mutably
    pub fn base_mut(&mut self) -> &mut FieldConfigBase {
        &mut self.base
    }

    /// Get the current value
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Get the default value
    pub fn default_value(&self) -> i64 {
        self.default
    }

    /// The semantic value type this field edits
    pub fn value_type(&self) -> ValueType {
        ValueType::Integer
    }

    /// Current value rendered as text
    pub fn string_value(&self) -> Option<String> {
        Some(self.value.to_string())
    }

    fn convert(&self, value: &StyleValue) -> StudioResult<i64> {
        match value {
            StyleValue::Integer(number) => Ok(*number),
            StyleValue::Double(number) if number.fract() == 0.0 => Ok(*number as i64),
            other => Err(StudioError::unknown_value(
                self.base.field().as_str(),
                other.to_text(),
            )),
        }
    }

    /// Commit a literal edit: one undo event plus the change notification
    pub fn populate_field(
        &mut self,
        value: StyleValue,
        undo: &mut UndoManager,
    ) -> StudioResult<()> {
        let number = self.convert(&value)?;
        let old = UndoValue::Value(StyleValue::Integer(self.value));
        self.value = number;
        self.base.bind_value();
        undo.add_undo_event(UndoEvent::new(
            self.base.panel(),
            self.base.field(),
            old,
            UndoValue::Value(StyleValue::Integer(number)),
        ));
        self.base.value_updated();
        Ok(())
    }

    /// Load a value from an expression (no undo event)
    pub fn populate_expression(&mut self, expression: &Expression) -> StudioResult<()> {
        match expression {
            Expression::Literal { value } => {
                self.value = self.convert(value)?;
                self.base.bind_value();
                Ok(())
            }
            other => self.base.populate_non_literal(other),
        }
    }

    /// Produce the expression for the current state
    pub fn generate_expression(&self) -> Option<Expression> {
        self.base
            .bound_expression()
            .or_else(|| Some(Expression::literal(StyleValue::Integer(self.value))))
    }

    /// Revert to the default value (commit semantics)
    pub fn revert_to_default(&mut self, undo: &mut UndoManager) -> StudioResult<()> {
        self.populate_field(StyleValue::Integer(self.default), undo)
    }

    /// Replay the old side of an undo event (no undo event)
    pub fn undo_action(&mut self, event: &UndoEvent) {
        self.replay(&event.old);
    }

    /// Replay the new side of an undo event (no undo event)
    pub fn redo_action(&mut self, event: &UndoEvent) {
        self.replay(&event.new);
    }

    fn replay(&mut self, value: &UndoValue) {
        match value {
            UndoValue::Value(StyleValue::Integer(number)) => {
                self.value = *number;
                self.base.bind_value();
                self.base.value_updated();
            }
            other => {
                tracing::warn!(field = %self.base.field(), value = %other, "cannot replay value into integer field");
            }
        }
    }

    /// Create a fresh, unpopulated copy sharing the static configuration
    pub fn create_copy(&self) -> Self {
        Self {
            base: self.base.create_copy(),
            value: self.default,
            default: self.default,
        }
    }
}

// ============================================================================
// FieldDouble
// ============================================================================

/// A field configuration editing a floating-point value
#[derive(Debug, Clone)]
pub struct FieldDouble {
    base: FieldConfigBase,
    value: f64,
    default: f64,
}

impl FieldDouble {
    /// Create a new double field holding zero
    pub fn new(
        panel: PanelKind,
        field: FieldKey,
        label: impl Into<String>,
        value_only: bool,
        multiple_values: bool,
    ) -> Self {
        Self {
            base: FieldConfigBase::new(panel, field, label, value_only, multiple_values),
            value: 0.0,
            default: 0.0,
        }
    }

    /// Set the default value (also becomes the initial value)
    pub fn with_default(mut self, default: f64) -> Self {
        self.default = default;
        self.value = default;
        self
    }

    /// Get the shared base state
    pub fn base(&self) -> &FieldConfigBase {
        &self.base
    }

    /// Get the shared base state mutably
    pub fn base_mut(&mut self) -> &mut FieldConfigBase {
        &mut self.base
    }

    /// Get the current value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Get the default value
    pub fn default_value(&self) -> f64 {
        self.default
    }

    /// The semantic value type this field edits
    pub fn value_type(&self) -> ValueType {
        ValueType::Double
    }

    /// Current value rendered as text
    pub fn string_value(&self) -> Option<String> {
        Some(self.value.to_string())
    }

    fn convert(&self, value: &StyleValue) -> StudioResult<f64> {
        match value {
            StyleValue::Double(number) => Ok(*number),
            StyleValue::Integer(number) => Ok(*number as f64),
            other => Err(StudioError::unknown_value(
                self.base.field().as_str(),
                other.to_text(),
            )),
        }
    }

    /// Commit a literal edit: one undo event plus the change notification
    pub fn populate_field(
        &mut self,
        value: StyleValue,
        undo: &mut UndoManager,
    ) -> StudioResult<()> {
        let number = self.convert(&value)?;
        let old = UndoValue::Value(StyleValue::Double(self.value));
        self.value = number;
        self.base.bind_value();
        undo.add_undo_event(UndoEvent::new(
            self.base.panel(),
            self.base.field(),
            old,
            UndoValue::Value(StyleValue::Double(number)),
        ));
        self.base.value_updated();
        Ok(())
    }

    /// Load a value from an expression (no undo event)
    pub fn populate_expression(&mut self, expression: &Expression) -> StudioResult<()> {
        match expression {
            Expression::Literal { value } => {
                self.value = self.convert(value)?;
                self.base.bind_value();
                Ok(())
            }
            other => self.base.populate_non_literal(other),
        }
    }

    /// Produce the expression for the current state
    pub fn generate_expression(&self) -> Option<Expression> {
        self.base
            .bound_expression()
            .or_else(|| Some(Expression::literal(StyleValue::Double(self.value))))
    }

    /// Revert to the default value (commit semantics)
    pub fn revert_to_default(&mut self, undo: &mut UndoManager) -> StudioResult<()> {
        self.populate_field(StyleValue::Double(self.default), undo)
    }

    /// Replay the old side of an undo event (no undo event)
    pub fn undo_action(&mut self, event: &UndoEvent) {
        self.replay(&event.old);
    }

    /// Replay the new side of an undo event (no undo event)
    pub fn redo_action(&mut self, event: &UndoEvent) {
        self.replay(&event.new);
    }

    fn replay(&mut self, value: &UndoValue) {
        match value {
            UndoValue::Value(StyleValue::Double(number)) => {
                self.value = *number;
                self.base.bind_value();
                self.base.value_updated();
            }
            UndoValue::Value(StyleValue::Integer(number)) => {
                self.value = *number as f64;
                self.base.bind_value();
                self.base.value_updated();
            }
            other => {
                tracing::warn!(field = %self.base.field(), value = %other, "cannot replay value into double field");
            }
        }
    }

    /// Create a fresh, unpopulated copy sharing the static configuration
    pub fn create_copy(&self) -> Self {
        Self {
            base: self.base.create_copy(),
            value: self.default,
            default: self.default,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
