//! Boolean field configuration

use crate::field::base::FieldConfigBase;
use crate::undo::{UndoEvent, UndoManager, UndoValue};
use meridian_core::{FieldKey, PanelKind, StudioError, StudioResult, StyleValue, ValueType};
use meridian_style::Expression;

/// A field configuration editing an on/off value
#[derive(Debug, Clone)]
pub struct FieldBoolean {
    base: FieldConfigBase,
    value: bool,
    default: bool,
}

impl FieldBoolean {
    /// Create a new boolean field holding false
    pub fn new(
        panel: PanelKind,
        field: FieldKey,
        label: impl Into<String>,
        value_only: bool,
        multiple_values: bool,
    ) -> Self {
        Self {
            base: FieldConfigBase::new(panel, field, label, value_only, multiple_values),
            value: false,
            default: false,
        }
    }

    /// Set the default value (also becomes the initial value)
    pub fn with_default(mut self, default: bool) -> Self {
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
    pub fn value(&self) -> bool {
        self.value
    }

    /// The semantic value type this field edits
    pub fn value_type(&self) -> ValueType {
        ValueType::Boolean
    }

    /// Current value rendered as text
    pub fn string_value(&self) -> Option<String> {
        Some(self.value.to_string())
    }

    fn convert(&self, value: &StyleValue) -> StudioResult<bool> {
        match value {
            StyleValue::Boolean(flag) => Ok(*flag),
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
        let flag = self.convert(&value)?;
        let old = UndoValue::Value(StyleValue::Boolean(self.value));
        self.value = flag;
        self.base.bind_value();
        undo.add_undo_event(UndoEvent::new(
            self.base.panel(),
            self.base.field(),
            old,
            UndoValue::Value(StyleValue::Boolean(flag)),
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
            .or_else(|| Some(Expression::literal(StyleValue::Boolean(self.value))))
    }

    /// Revert to the default value (commit semantics)
    pub fn revert_to_default(&mut self, undo: &mut UndoManager) -> StudioResult<()> {
        self.populate_field(StyleValue::Boolean(self.default), undo)
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
            UndoValue::Value(StyleValue::Boolean(flag)) => {
                self.value = *flag;
                self.base.bind_value();
                self.base.value_updated();
            }
            other => {
                tracing::warn!(field = %self.base.field(), value = %other, "cannot replay value into boolean field");
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_and_replay() {
        let mut field = FieldBoolean::new(
            PanelKind::Stroke,
            FieldKey::StrokeOpacity,
            "Outline",
            false,
            false,
        )
        .with_default(true);
        let mut undo = UndoManager::new();

        field
            .populate_field(StyleValue::Boolean(false), &mut undo)
            .unwrap();
        assert!(!field.value());

        let event = undo.last_event().unwrap().clone();
        field.undo_action(&event);
        assert!(field.value());
        field.redo_action(&event);
        assert!(!field.value());
    }

    #[test]
    fn test_rejects_non_boolean() {
        let mut field = FieldBoolean::new(
            PanelKind::Stroke,
            FieldKey::StrokeOpacity,
            "Outline",
            false,
            false,
        );
        let mut undo = UndoManager::new();
        assert!(
            field
                .populate_field(StyleValue::string("yes"), &mut undo)
                .is_err()
        );
        assert_eq!(undo.undo_count(), 0);
    }
}
