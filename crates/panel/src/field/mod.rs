//! Field configurations
//!
//! One field configuration exists per `(PanelKind, FieldKey)` pair for the
//! lifetime of its detail panel. The concrete variants differ in widget and
//! value domain but satisfy the same contract: generate/populate against
//! the expression tree, commit edits through the undo manager, and replay
//! undo/redo events without re-committing.
//!
//! The variants are a closed enum matched exhaustively, so adding a field
//! kind forces every dispatch site to handle it.

pub mod base;
pub mod boolean;
pub mod choice;
pub mod colour;
pub mod number;
pub mod text;
pub mod transformation;

pub use base::{FieldConfigBase, WidgetState};
pub use boolean::FieldBoolean;
pub use choice::{ChoiceOption, FieldChoice};
pub use colour::FieldColour;
pub use number::{FieldDouble, FieldInteger};
pub use text::FieldText;
pub use transformation::{FieldTransformation, TransformationEditor};

use crate::undo::{UndoEvent, UndoManager};
use meridian_core::{FieldKey, PanelKind, StudioResult, StyleValue, ValueType};
use meridian_style::Expression;

// ============================================================================
// FieldConfig
// ============================================================================

/// A field configuration of any concrete kind
#[derive(Debug, Clone)]
pub enum FieldConfig {
    Text(FieldText),
    Integer(FieldInteger),
    Double(FieldDouble),
    Boolean(FieldBoolean),
    Colour(FieldColour),
    Choice(FieldChoice),
    Transformation(FieldTransformation),
}

impl FieldConfig {
    /// Get the shared base state
    pub fn base(&self) -> &FieldConfigBase {
        match self {
            FieldConfig::Text(field) => field.base(),
            FieldConfig::Integer(field) => field.base(),
            FieldConfig::Double(field) => field.base(),
            FieldConfig::Boolean(field) => field.base(),
            FieldConfig::Colour(field) => field.base(),
            FieldConfig::Choice(field) => field.base(),
            FieldConfig::Transformation(field) => field.base(),
        }
    }

    /// Get the shared base state mutably
    pub fn base_mut(&mut self) -> &mut FieldConfigBase {
        match self {
            FieldConfig::Text(field) => field.base_mut(),
            FieldConfig::Integer(field) => field.base_mut(),
            FieldConfig::Double(field) => field.base_mut(),
            FieldConfig::Boolean(field) => field.base_mut(),
            FieldConfig::Colour(field) => field.base_mut(),
            FieldConfig::Choice(field) => field.base_mut(),
            FieldConfig::Transformation(field) => field.base_mut(),
        }
    }

    /// Get the panel scope
    pub fn panel(&self) -> PanelKind {
        self.base().panel()
    }

    /// Get the field identifier
    pub fn field(&self) -> FieldKey {
        self.base().field()
    }

    /// Check if the field reports enabled
    pub fn is_enabled(&self) -> bool {
        self.base().is_enabled()
    }

    /// Set the enabled state; stored value and mode are untouched
    pub fn set_enabled(&mut self, enabled: bool) {
        self.base_mut().set_enabled(enabled);
    }

    /// Set the visible state; no other side effects
    pub fn set_visible(&mut self, visible: bool) {
        self.base_mut().set_visible(visible);
    }

    /// The semantic value type this field edits
    pub fn value_type(&self) -> ValueType {
        match self {
            FieldConfig::Text(field) => field.value_type(),
            FieldConfig::Integer(field) => field.value_type(),
            FieldConfig::Double(field) => field.value_type(),
            FieldConfig::Boolean(field) => field.value_type(),
            FieldConfig::Colour(field) => field.value_type(),
            FieldConfig::Choice(field) => field.value_type(),
            FieldConfig::Transformation(field) => field.value_type(),
        }
    }

    /// Current value rendered as text
    pub fn string_value(&self) -> Option<String> {
        match self {
            FieldConfig::Text(field) => field.string_value(),
            FieldConfig::Integer(field) => field.string_value(),
            FieldConfig::Double(field) => field.string_value(),
            FieldConfig::Boolean(field) => field.string_value(),
            FieldConfig::Colour(field) => field.string_value(),
            FieldConfig::Choice(field) => field.string_value(),
            FieldConfig::Transformation(field) => field.string_value(),
        }
    }

    /// Produce the expression for the current state
    ///
    /// Pure read; `None` means the field holds no meaningful value.
    pub fn generate_expression(&self) -> Option<Expression> {
        match self {
            FieldConfig::Text(field) => field.generate_expression(),
            FieldConfig::Integer(field) => field.generate_expression(),
            FieldConfig::Double(field) => field.generate_expression(),
            FieldConfig::Boolean(field) => field.generate_expression(),
            FieldConfig::Colour(field) => field.generate_expression(),
            FieldConfig::Choice(field) => field.generate_expression(),
            FieldConfig::Transformation(field) => field.generate_expression(),
        }
    }

    /// The expression the document stores for this field
    ///
    /// Identical to [`generate_expression`](Self::generate_expression)
    /// except for the transformation variant, whose payload is kept
    /// function-shaped in the document.
    pub fn document_expression(&self) -> Option<Expression> {
        match self {
            FieldConfig::Transformation(field) => field.document_expression(),
            other => other.generate_expression(),
        }
    }

    /// Load a value from an expression (load semantics, no undo event)
    pub fn populate_expression(&mut self, expression: &Expression) -> StudioResult<()> {
        match self {
            FieldConfig::Text(field) => field.populate_expression(expression),
            FieldConfig::Integer(field) => field.populate_expression(expression),
            FieldConfig::Double(field) => field.populate_expression(expression),
            FieldConfig::Boolean(field) => field.populate_expression(expression),
            FieldConfig::Colour(field) => field.populate_expression(expression),
            FieldConfig::Choice(field) => field.populate_expression(expression),
            FieldConfig::Transformation(field) => field.populate_expression(expression),
        }
    }

    /// Commit a literal edit (edit semantics: one undo event, notification)
    pub fn populate_field(
        &mut self,
        value: StyleValue,
        undo: &mut UndoManager,
    ) -> StudioResult<()> {
        match self {
            FieldConfig::Text(field) => field.populate_field(value, undo),
            FieldConfig::Integer(field) => field.populate_field(value, undo),
            FieldConfig::Double(field) => field.populate_field(value, undo),
            FieldConfig::Boolean(field) => field.populate_field(value, undo),
            FieldConfig::Colour(field) => field.populate_field(value, undo),
            FieldConfig::Choice(field) => field.populate_field(value, undo),
            FieldConfig::Transformation(field) => field.populate_field(value, undo),
        }
    }

    /// Designated entry point for automated test drivers
    ///
    /// Deliberately identical in effect to a user edit: the commit path,
    /// the undo event, and the change notification are all exercised.
    pub fn set_test_value(
        &mut self,
        field: FieldKey,
        value: StyleValue,
        undo: &mut UndoManager,
    ) -> StudioResult<()> {
        if field != self.field() {
            tracing::warn!(
                expected = %self.field(),
                supplied = %field,
                "test value addressed to a different field"
            );
        }
        self.populate_field(value, undo)
    }

    /// Revert to the default value (commit semantics)
    pub fn revert_to_default(&mut self, undo: &mut UndoManager) -> StudioResult<()> {
        match self {
            FieldConfig::Text(field) => field.revert_to_default(undo),
            FieldConfig::Integer(field) => field.revert_to_default(undo),
            FieldConfig::Double(field) => field.revert_to_default(undo),
            FieldConfig::Boolean(field) => field.revert_to_default(undo),
            FieldConfig::Colour(field) => field.revert_to_default(undo),
            FieldConfig::Choice(field) => field.revert_to_default(undo),
            FieldConfig::Transformation(field) => field.revert_to_default(undo),
        }
    }

    /// Replay the old side of an undo event (never commits)
    pub fn undo_action(&mut self, event: &UndoEvent) {
        match self {
            FieldConfig::Text(field) => field.undo_action(event),
            FieldConfig::Integer(field) => field.undo_action(event),
            FieldConfig::Double(field) => field.undo_action(event),
            FieldConfig::Boolean(field) => field.undo_action(event),
            FieldConfig::Colour(field) => field.undo_action(event),
            FieldConfig::Choice(field) => field.undo_action(event),
            FieldConfig::Transformation(field) => field.undo_action(event),
        }
    }

    /// Replay the new side of an undo event (never commits)
    pub fn redo_action(&mut self, event: &UndoEvent) {
        match self {
            FieldConfig::Text(field) => field.redo_action(event),
            FieldConfig::Integer(field) => field.redo_action(event),
            FieldConfig::Double(field) => field.redo_action(event),
            FieldConfig::Boolean(field) => field.redo_action(event),
            FieldConfig::Colour(field) => field.redo_action(event),
            FieldConfig::Choice(field) => field.redo_action(event),
            FieldConfig::Transformation(field) => field.redo_action(event),
        }
    }

    /// Create a fresh, unpopulated instance sharing the static configuration
    pub fn create_copy(&self) -> FieldConfig {
        match self {
            FieldConfig::Text(field) => FieldConfig::Text(field.create_copy()),
            FieldConfig::Integer(field) => FieldConfig::Integer(field.create_copy()),
            FieldConfig::Double(field) => FieldConfig::Double(field.create_copy()),
            FieldConfig::Boolean(field) => FieldConfig::Boolean(field.create_copy()),
            FieldConfig::Colour(field) => FieldConfig::Colour(field.create_copy()),
            FieldConfig::Choice(field) => FieldConfig::Choice(field.create_copy()),
            FieldConfig::Transformation(field) => {
                FieldConfig::Transformation(field.create_copy())
            }
        }
    }

    /// View as a choice field, if that is the concrete kind
    pub fn as_choice(&self) -> Option<&FieldChoice> {
        match self {
            FieldConfig::Choice(field) => Some(field),
            _ => None,
        }
    }

    /// View as a mutable transformation field, if that is the concrete kind
    pub fn as_transformation_mut(&mut self) -> Option<&mut FieldTransformation> {
        match self {
            FieldConfig::Transformation(field) => Some(field),
            _ => None,
        }
    }

    /// Consume this field's value-changed notification
    pub fn take_pending_update(&mut self) -> bool {
        self.base_mut().take_pending_update()
    }
}

impl From<FieldText> for FieldConfig {
    fn from(field: FieldText) -> Self {
        FieldConfig::Text(field)
    }
}

impl From<FieldInteger> for FieldConfig {
    fn from(field: FieldInteger) -> Self {
        FieldConfig::Integer(field)
    }
}

impl From<FieldDouble> for FieldConfig {
    fn from(field: FieldDouble) -> Self {
        FieldConfig::Double(field)
    }
}

impl From<FieldBoolean> for FieldConfig {
    fn from(field: FieldBoolean) -> Self {
        FieldConfig::Boolean(field)
    }
}

impl From<FieldColour> for FieldConfig {
    fn from(field: FieldColour) -> Self {
        FieldConfig::Colour(field)
    }
}

impl From<FieldChoice> for FieldConfig {
    fn from(field: FieldChoice) -> Self {
        FieldConfig::Choice(field)
    }
}

impl From<FieldTransformation> for FieldConfig {
    fn from(field: FieldTransformation) -> Self {
        FieldConfig::Transformation(field)
    }
}

// ============================================================================
// Tests
// ============================================================================
