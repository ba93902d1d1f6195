//! Text field configuration

use crate::field::base::FieldConfigBase;
use crate::undo::{UndoEvent, UndoManager, UndoValue};
use meridian_core::{FieldKey, PanelKind, StudioError, StudioResult, StyleValue, ValueType};
use meridian_style::Expression;

/// A field configuration editing a plain text value
#[derive(Debug, Clone)]
pub struct FieldText {
    base: FieldConfigBase,
    value: String,
    default: String,
}

impl FieldText {
    /// Create a new text field holding its default value
    pub fn new(
        panel: PanelKind,
        field: FieldKey,
        label: impl Into<String>,
        value_only: bool,
        multiple_values: bool,
    ) -> Self {
        Self {
            base: FieldConfigBase::new(panel, field, label, value_only, multiple_values),
            value: String::new(),
            default: String::new(),
        }
    }

    /// Set the default value (also becomes the initial value)
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self.value = self.default.clone();
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

    /// Get the current text value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Get the default value
    pub fn default_value(&self) -> &str {
        &self.default
    }

    /// The semantic value type this field edits
    pub fn value_type(&self) -> ValueType {
        ValueType::String
    }

    /// Current value rendered as text
    pub fn string_value(&self) -> Option<String> {
        Some(self.value.clone())
    }

    fn convert(&self, value: &StyleValue) -> StudioResult<String> {
        match value {
            StyleValue::String(text) => Ok(text.clone()),
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
        let text = self.convert(&value)?;
        let old = UndoValue::Value(StyleValue::String(self.value.clone()));
        self.value = text.clone();
        self.base.bind_value();
        undo.add_undo_event(UndoEvent::new(
            self.base.panel(),
            self.base.field(),
            old,
            UndoValue::Value(StyleValue::String(text)),
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
        if let Some(expression) = self.base.bound_expression() {
            return Some(expression);
        }
        (!self.value.is_empty())
            .then(|| Expression::literal(StyleValue::String(self.value.clone())))
    }

    /// Revert to the default value (commit semantics)
    pub fn revert_to_default(&mut self, undo: &mut UndoManager) -> StudioResult<()> {
        self.populate_field(StyleValue::String(self.default.clone()), undo)
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
            UndoValue::Value(StyleValue::String(text)) => {
                self.value = text.clone();
                self.base.bind_value();
                self.base.value_updated();
            }
            other => {
                tracing::warn!(field = %self.base.field(), value = %other, "cannot replay value into text field");
            }
        }
    }

    /// Create a fresh, unpopulated copy sharing the static configuration
    pub fn create_copy(&self) -> Self {
        Self {
            base: self.base.create_copy(),
            value: self.default.clone(),
            default: self.default.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> FieldText {
        FieldText::new(
            PanelKind::Label,
            FieldKey::FontFamily,
            "Font Family",
            false,
            false,
        )
        .with_default("Arial")
    }

    #[test]
    fn test_commit_pushes_one_event() {
        let mut field = field();
        let mut undo = UndoManager::new();

        field
            .populate_field(StyleValue::string("Verdana"), &mut undo)
            .unwrap();

        assert_eq!(field.value(), "Verdana");
        assert_eq!(undo.undo_count(), 1);
        let event = undo.last_event().unwrap();
        assert_eq!(
            event.old,
            UndoValue::Value(StyleValue::string("Arial"))
        );
        assert_eq!(
            event.new,
            UndoValue::Value(StyleValue::string("Verdana"))
        );
        assert!(field.base().has_pending_update());
    }

    #[test]
    fn test_bad_conversion_leaves_state_unchanged() {
        let mut field = field();
        let mut undo = UndoManager::new();

        let err = field
            .populate_field(StyleValue::Integer(10), &mut undo)
            .unwrap_err();
        assert!(err.is_reportable());
        assert_eq!(field.value(), "Arial");
        assert_eq!(undo.undo_count(), 0);
        assert!(!field.base().has_pending_update());
    }

    #[test]
    fn test_generate_empty_is_none() {
        let field = FieldText::new(
            PanelKind::Label,
            FieldKey::Label,
            "Label",
            false,
            false,
        );
        assert_eq!(field.generate_expression(), None);
    }

    #[test]
    fn test_populate_expression_is_silent() {
        let mut field = field();
        field
            .populate_expression(&Expression::literal_string("Courier"))
            .unwrap();
        assert_eq!(field.value(), "Courier");
        assert!(!field.base().has_pending_update());

        field
            .populate_expression(&Expression::property("font"))
            .unwrap();
        assert_eq!(
            field.generate_expression(),
            Some(Expression::property("font"))
        );
    }

    #[test]
    fn test_undo_redo_replay() {
        let mut field = field();
        let mut undo = UndoManager::new();
        field
            .populate_field(StyleValue::string("Verdana"), &mut undo)
            .unwrap();

        let event = undo.last_event().unwrap().clone();
        field.undo_action(&event);
        assert_eq!(field.value(), "Arial");

        field.redo_action(&event);
        assert_eq!(field.value(), "Verdana");
        // replay never commits
        assert_eq!(undo.undo_count(), 1);
    }

    #[test]
    fn test_revert_to_default_commits() {
        let mut field = field();
        let mut undo = UndoManager::new();
        field
            .populate_field(StyleValue::string("Verdana"), &mut undo)
            .unwrap();
        field.revert_to_default(&mut undo).unwrap();
        assert_eq!(field.value(), "Arial");
        assert_eq!(undo.undo_count(), 2);
    }

    #[test]
    fn test_create_copy_is_unpopulated() {
        let mut field = field();
        let mut undo = UndoManager::new();
        field
            .populate_field(StyleValue::string("Verdana"), &mut undo)
            .unwrap();

        let copy = field.create_copy();
        assert_eq!(copy.value(), "Arial");
        assert_eq!(copy.default_value(), "Arial");
    }
}
