//! Colour field configuration
//!
//! Colour values are held as `#RRGGBB` literals. Population validates the
//! literal form; comparison in the test harness normalizes case.

use crate::field::base::FieldConfigBase;
use crate::undo::{UndoEvent, UndoManager, UndoValue};
use meridian_core::{
    FieldKey, PanelKind, StudioError, StudioResult, StyleValue, ValueType, is_valid_colour,
};
use meridian_style::Expression;

/// A field configuration editing a colour value
#[derive(Debug, Clone)]
pub struct FieldColour {
    base: FieldConfigBase,
    value: String,
    default: String,
}

impl FieldColour {
    /// Create a new colour field holding mid-grey
    pub fn new(
        panel: PanelKind,
        field: FieldKey,
        label: impl Into<String>,
        value_only: bool,
        multiple_values: bool,
    ) -> Self {
        Self {
            base: FieldConfigBase::new(panel, field, label, value_only, multiple_values),
            value: "#808080".to_string(),
            default: "#808080".to_string(),
        }
    }

    /// Set the default colour (also becomes the initial value)
    ///
    /// An invalid literal is rejected and the previous default kept.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        let default = default.into();
        if is_valid_colour(&default) {
            self.value = default.clone();
            self.default = default;
        } else {
            tracing::warn!(field = %self.base.field(), value = %default, "ignoring invalid default colour");
        }
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

    /// Get the current colour literal
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Get the default colour literal
    pub fn default_value(&self) -> &str {
        &self.default
    }

    /// The semantic value type this field edits
    pub fn value_type(&self) -> ValueType {
        ValueType::Colour
    }

    /// Current value rendered as text
    pub fn string_value(&self) -> Option<String> {
        Some(self.value.clone())
    }

    fn convert(&self, value: &StyleValue) -> StudioResult<String> {
        let text = match value {
            StyleValue::Colour(text) | StyleValue::String(text) => text,
            other => {
                return Err(StudioError::unknown_value(
                    self.base.field().as_str(),
                    other.to_text(),
                ));
            }
        };
        if is_valid_colour(text) {
            Ok(text.clone())
        } else {
            Err(StudioError::unknown_value(
                self.base.field().as_str(),
                text.clone(),
            ))
        }
    }

    /// Commit a literal edit: one undo event plus the change notification
    pub fn populate_field(
        &mut self,
        value: StyleValue,
        undo: &mut UndoManager,
    ) -> StudioResult<()> {
        let colour = self.convert(&value)?;
        let old = UndoValue::Value(StyleValue::Colour(self.value.clone()));
        self.value = colour.clone();
        self.base.bind_value();
        undo.add_undo_event(UndoEvent::new(
            self.base.panel(),
            self.base.field(),
            old,
            UndoValue::Value(StyleValue::Colour(colour)),
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
        self.base.bound_expression().or_else(|| {
            Some(Expression::literal(StyleValue::Colour(self.value.clone())))
        })
    }

    /// Revert to the default colour (commit semantics)
    pub fn revert_to_default(&mut self, undo: &mut UndoManager) -> StudioResult<()> {
        self.populate_field(StyleValue::Colour(self.default.clone()), undo)
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
            UndoValue::Value(StyleValue::Colour(colour)) => {
                self.value = colour.clone();
                self.base.bind_value();
                self.base.value_updated();
            }
            other => {
                tracing::warn!(field = %self.base.field(), value = %other, "cannot replay value into colour field");
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
