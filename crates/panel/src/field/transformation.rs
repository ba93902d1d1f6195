//! Transformation (process function) field configuration
//!
//! The transformation variant edits an opaque `ProcessFunction` payload.
//! Parameter editing is delegated to an external dialog collaborator; the
//! field stores the payload verbatim and derives the text preview from its
//! canonical serialization. Edit and clear are two independent commit
//! points. This field is always value-only: it never emits a
//! property-reference node.

use crate::field::base::FieldConfigBase;
use crate::undo::{UndoEvent, UndoManager, UndoValue};
use meridian_core::{FieldKey, PanelKind, StudioError, StudioResult, StyleValue, ValueType};
use meridian_style::{Expression, ProcessFunction};

// ============================================================================
// TransformationEditor
// ============================================================================

/// External dialog collaborator editing process-function parameters
///
/// The dialog runs synchronously on the control thread. Returning `None`
/// means the dialog was cancelled; the field state is left unchanged and
/// no event is emitted.
pub trait TransformationEditor {
    /// Show the dialog seeded with the current payload
    fn show_dialog(&mut self, current: Option<&ProcessFunction>) -> Option<ProcessFunction>;
}

// ============================================================================
// FieldTransformation
// ============================================================================

/// A field configuration editing an opaque process-function payload
#[derive(Debug, Clone)]
pub struct FieldTransformation {
    base: FieldConfigBase,
    process: Option<ProcessFunction>,
    edit_label: String,
    clear_label: String,
}

impl FieldTransformation {
    /// Create a new, empty transformation field
    ///
    /// Transformation fields are value-only by construction; there is no
    /// attribute or expression mode to reach.
    pub fn new(
        panel: PanelKind,
        field: FieldKey,
        label: impl Into<String>,
        edit_label: impl Into<String>,
        clear_label: impl Into<String>,
        multiple_values: bool,
    ) -> Self {
        Self {
            base: FieldConfigBase::new(panel, field, label, true, multiple_values),
            process: None,
            edit_label: edit_label.into(),
            clear_label: clear_label.into(),
        }
    }

    /// Get the shared base state
    pub fn base(&self) -> &FieldConfigBase {
        &self.base
    }

    /// Get the shared base state mutably
    pub fn base_mut(&mut self) -> &mut FieldConfigBase {
        &mut self.base
    }

    /// Get the stored payload
    pub fn process(&self) -> Option<&ProcessFunction> {
        self.process.as_ref()
    }

    /// Get the edit button label
    pub fn edit_label(&self) -> &str {
        &self.edit_label
    }

    /// Get the clear button label
    pub fn clear_label(&self) -> &str {
        &self.clear_label
    }

    /// Derived text preview: the canonical serialization of the payload
    pub fn preview(&self) -> String {
        self.process
            .as_ref()
            .map(ProcessFunction::summary)
            .unwrap_or_default()
    }

    /// The semantic value type this field edits
    pub fn value_type(&self) -> ValueType {
        ValueType::String
    }

    /// Current preview rendered as text
    pub fn string_value(&self) -> Option<String> {
        Some(self.preview())
    }

    /// Run the external dialog and commit its result
    ///
    /// A cancelled dialog is a no-op: no state change, no event. Returns
    /// whether a new payload was committed.
    pub fn edit(
        &mut self,
        editor: &mut dyn TransformationEditor,
        undo: &mut UndoManager,
    ) -> bool {
        let Some(result) = editor.show_dialog(self.process.as_ref()) else {
            return false;
        };
        let old = UndoValue::from_process(self.process.as_ref());
        self.process = Some(result.clone());
        undo.add_undo_event(UndoEvent::new(
            self.base.panel(),
            self.base.field(),
            old,
            UndoValue::Process(result),
        ));
        self.base.value_updated();
        true
    }

    /// Clear the stored payload (commit semantics)
    pub fn clear(&mut self, undo: &mut UndoManager) {
        let old = UndoValue::from_process(self.process.as_ref());
        self.process = None;
        undo.add_undo_event(UndoEvent::new(
            self.base.panel(),
            self.base.field(),
            old,
            UndoValue::Empty,
        ));
        self.base.value_updated();
    }

    /// Direct literal population is not part of this field's value domain
    pub fn populate_field(
        &mut self,
        value: StyleValue,
        _undo: &mut UndoManager,
    ) -> StudioResult<()> {
        Err(StudioError::unknown_value(
            self.base.field().as_str(),
            value.to_text(),
        ))
    }

    /// Load a payload from a function-shaped expression (no undo event)
    pub fn populate_expression(&mut self, expression: &Expression) -> StudioResult<()> {
        match ProcessFunction::from_expression(expression) {
            Some(function) => {
                self.process = Some(function);
                Ok(())
            }
            None => Err(StudioError::expression_shape(
                self.base.field().as_str(),
                expression.shape_name(),
            )),
        }
    }

    /// Produce the expression for the current state
    ///
    /// A literal node of the serialized text, or `None` while empty.
    pub fn generate_expression(&self) -> Option<Expression> {
        let preview = self.preview();
        (!preview.is_empty()).then(|| Expression::literal(StyleValue::String(preview)))
    }

    /// The expression the document stores for this field
    ///
    /// Unlike [`generate_expression`](Self::generate_expression), the
    /// document keeps the function-shaped encoding so the payload survives
    /// reselection.
    pub fn document_expression(&self) -> Option<Expression> {
        self.process.as_ref().map(ProcessFunction::to_expression)
    }

    /// Revert to the default (empty) payload (commit semantics)
    pub fn revert_to_default(&mut self, undo: &mut UndoManager) -> StudioResult<()> {
        self.clear(undo);
        Ok(())
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
            UndoValue::Process(function) => {
                self.process = Some(function.clone());
                self.base.value_updated();
            }
            UndoValue::Empty => {
                self.process = None;
                self.base.value_updated();
            }
            other => {
                tracing::warn!(field = %self.base.field(), value = %other, "cannot replay value into transformation field");
            }
        }
    }

    /// Create a fresh, unpopulated copy sharing the static configuration
    pub fn create_copy(&self) -> Self {
        Self {
            base: self.base.create_copy(),
            process: None,
            edit_label: self.edit_label.clone(),
            clear_label: self.clear_label.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedEditor(Option<ProcessFunction>);

    impl TransformationEditor for FixedEditor {
        fn show_dialog(&mut self, _current: Option<&ProcessFunction>) -> Option<ProcessFunction> {
            self.0.clone()
        }
    }

    fn field() -> FieldTransformation {
        FieldTransformation::new(
            PanelKind::Fill,
            FieldKey::Transformation,
            "Transformation",
            "Edit...",
            "Clear",
            false,
        )
    }

    fn heatmap() -> ProcessFunction {
        ProcessFunction::new("vec:Heatmap")
            .with_parameter("radius", Expression::literal(StyleValue::Integer(10)))
    }

    #[test]
    fn test_field_is_value_only() {
        let field = field();
        assert!(field.base().is_value_only());
    }

    #[test]
    fn test_edit_commits_one_event() {
        let mut field = field();
        let mut undo = UndoManager::new();
        let mut editor = FixedEditor(Some(heatmap()));

        assert!(field.edit(&mut editor, &mut undo));
        assert_eq!(field.preview(), "vec:Heatmap(radius=10)");
        assert_eq!(undo.undo_count(), 1);

        let event = undo.last_event().unwrap();
        assert_eq!(event.old, UndoValue::Empty);
        assert_eq!(event.new, UndoValue::Process(heatmap()));
    }

    #[test]
    fn test_cancelled_dialog_is_noop() {
        let mut field = field();
        let mut undo = UndoManager::new();
        let mut editor = FixedEditor(None);

        assert!(!field.edit(&mut editor, &mut undo));
        assert!(field.process().is_none());
        assert_eq!(undo.undo_count(), 0);
    }

    #[test]
    fn test_edit_then_clear_produces_two_events() {
        let mut field = field();
        let mut undo = UndoManager::new();
        let mut editor = FixedEditor(Some(heatmap()));

        field.edit(&mut editor, &mut undo);
        field.clear(&mut undo);

        assert!(field.process().is_none());
        assert_eq!(field.preview(), "");
        assert_eq!(field.generate_expression(), None);
        assert_eq!(undo.undo_count(), 2);

        let events = undo.events();
        assert_eq!(events[0].old, UndoValue::Empty);
        assert_eq!(events[0].new, UndoValue::Process(heatmap()));
        assert_eq!(events[1].old, UndoValue::Process(heatmap()));
        assert_eq!(events[1].new, UndoValue::Empty);
    }

    #[test]
    fn test_generate_is_literal_of_serialized_text() {
        let mut field = field();
        let mut undo = UndoManager::new();
        let mut editor = FixedEditor(Some(heatmap()));
        field.edit(&mut editor, &mut undo);

        assert_eq!(
            field.generate_expression(),
            Some(Expression::literal_string("vec:Heatmap(radius=10)"))
        );
    }

    #[test]
    fn test_document_expression_round_trip() {
        let mut field = field();
        let mut undo = UndoManager::new();
        let mut editor = FixedEditor(Some(heatmap()));
        field.edit(&mut editor, &mut undo);

        let stored = field.document_expression().unwrap();
        let mut reloaded = field.create_copy();
        reloaded.populate_expression(&stored).unwrap();
        assert_eq!(reloaded.process(), Some(&heatmap()));
        assert_eq!(reloaded.preview(), field.preview());
    }

    #[test]
    fn test_undo_redo_replay() {
        let mut field = field();
        let mut undo = UndoManager::new();
        let mut editor = FixedEditor(Some(heatmap()));
        field.edit(&mut editor, &mut undo);
        field.clear(&mut undo);

        let clear_event = undo.events()[1].clone();
        field.undo_action(&clear_event);
        assert_eq!(field.process(), Some(&heatmap()));

        field.redo_action(&clear_event);
        assert!(field.process().is_none());
        assert_eq!(undo.undo_count(), 2);
    }

    #[test]
    fn test_populate_field_is_rejected() {
        let mut field = field();
        let mut undo = UndoManager::new();
        assert!(
            field
                .populate_field(StyleValue::string("vec:Heatmap()"), &mut undo)
                .is_err()
        );
        assert_eq!(undo.undo_count(), 0);
    }
}
