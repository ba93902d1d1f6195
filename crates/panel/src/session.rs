//! Editor session
//!
//! The `EditorSession` owns the open document, the live field
//! configurations, and the undo/redo stacks. All mutation runs on one
//! logical control thread: edits commit through the fields, committed
//! changes are flushed back into the document as regenerated expressions,
//! and undo/redo replays through the same fields without re-committing.

use crate::field::{FieldConfig, TransformationEditor};
use crate::manager::FieldConfigManager;
use crate::panels::{DetailPanel, apply_choice_states};
use crate::undo::UndoManager;
use meridian_core::{FieldKey, PanelKind, StudioError, StudioResult, StyleValue};
use meridian_style::{NodePath, StyledDocument};

/// The active editing session for one document
#[derive(Debug)]
pub struct EditorSession {
    document: StyledDocument,
    manager: FieldConfigManager,
    undo: UndoManager,
    panel: Option<DetailPanel>,
    selection: Option<NodePath>,
}

impl EditorSession {
    /// Start a session on a new empty document
    pub fn new_document(name: impl Into<String>) -> Self {
        Self::load_document(StyledDocument::new(name))
    }

    /// Start a session on an existing document
    ///
    /// The undo history starts empty; loading is not an edit.
    pub fn load_document(document: StyledDocument) -> Self {
        Self {
            document,
            manager: FieldConfigManager::new(),
            undo: UndoManager::new(),
            panel: None,
            selection: None,
        }
    }

    /// Replace the open document, discarding panels and undo history
    pub fn open(&mut self, document: StyledDocument) {
        self.document = document;
        self.manager.clear();
        self.undo.clear();
        self.panel = None;
        self.selection = None;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get the open document
    pub fn document(&self) -> &StyledDocument {
        &self.document
    }

    /// Get the undo manager
    pub fn undo_manager(&self) -> &UndoManager {
        &self.undo
    }

    /// Get the field configuration registry
    pub fn manager(&self) -> &FieldConfigManager {
        &self.manager
    }

    /// Get the active detail panel
    pub fn active_panel(&self) -> Option<&DetailPanel> {
        self.panel.as_ref()
    }

    /// Get the current selection
    pub fn selection(&self) -> Option<NodePath> {
        self.selection
    }

    /// Whether the selected node supplied data for the active panel
    pub fn data_present(&self) -> bool {
        self.panel.as_ref().is_some_and(|panel| panel.data_present)
    }

    fn current_panel_kind(&self) -> StudioResult<PanelKind> {
        self.panel
            .as_ref()
            .map(|panel| panel.kind)
            .ok_or(StudioError::NoSelection)
    }

    /// Get a field configuration of the active panel
    pub fn field(&self, key: FieldKey) -> StudioResult<&FieldConfig> {
        let kind = self.current_panel_kind()?;
        self.manager.require_field(kind, key)
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Select a symbolizer detail by tree path
    ///
    /// Moving to a different panel type tears the old panel down and builds
    /// the new one; moving within the same panel type resets and
    /// repopulates the existing fields. Population is load semantics and
    /// never touches the undo history.
    pub fn select(&mut self, path: NodePath) -> StudioResult<PanelKind> {
        let kind = self.document.panel_kind(&path)?;
        let rebuild = self.panel.as_ref().is_none_or(|panel| panel.kind != kind);
        if rebuild {
            if let Some(previous) = self.panel.take() {
                self.manager.clear_panel(previous.kind);
            }
            self.panel = Some(DetailPanel::build(kind, &mut self.manager));
        } else {
            self.manager.reset_panel(kind);
        }

        let properties = self.document.symbolizer(&path)?.properties.clone();
        self.manager.populate(kind, &properties);
        apply_choice_states(kind, &mut self.manager);

        let keys = self.manager.panel_keys(kind);
        if let Some(panel) = &mut self.panel {
            panel.data_present = keys.iter().any(|key| properties.contains_key(key));
        }
        self.selection = Some(path);
        tracing::debug!(path = %path, panel = %kind, "selection changed");
        Ok(kind)
    }

    // ========================================================================
    // Edits
    // ========================================================================

    /// Commit a literal edit on a field of the active panel
    pub fn set_field_value(&mut self, key: FieldKey, value: StyleValue) -> StudioResult<()> {
        let kind = self.current_panel_kind()?;
        let field = self.manager.require_field_mut(kind, key)?;
        field.populate_field(value, &mut self.undo)?;
        self.flush_updates()
    }

    /// Inject a value through the designated test entry point
    ///
    /// Side effects are identical to [`set_field_value`](Self::set_field_value):
    /// the commit path, the undo event, and the document synchronization
    /// all run.
    pub fn set_test_value(&mut self, key: FieldKey, value: StyleValue) -> StudioResult<()> {
        let kind = self.current_panel_kind()?;
        let field = self.manager.require_field_mut(kind, key)?;
        field.set_test_value(key, value, &mut self.undo)?;
        self.flush_updates()
    }

    /// Revert a field of the active panel to its default value
    pub fn revert_field(&mut self, key: FieldKey) -> StudioResult<()> {
        let kind = self.current_panel_kind()?;
        let field = self.manager.require_field_mut(kind, key)?;
        field.revert_to_default(&mut self.undo)?;
        self.flush_updates()
    }

    /// Edit a transformation field through its external dialog
    ///
    /// Returns whether a new payload was committed; a cancelled dialog
    /// changes nothing.
    pub fn edit_transformation(
        &mut self,
        key: FieldKey,
        editor: &mut dyn TransformationEditor,
    ) -> StudioResult<bool> {
        let kind = self.current_panel_kind()?;
        let field = self.manager.require_field_mut(kind, key)?;
        let Some(transformation) = field.as_transformation_mut() else {
            return Err(StudioError::internal(format!(
                "field '{key}' is not a transformation field"
            )));
        };
        let committed = transformation.edit(editor, &mut self.undo);
        if committed {
            self.flush_updates()?;
        }
        Ok(committed)
    }

    /// Clear a transformation field of the active panel
    pub fn clear_transformation(&mut self, key: FieldKey) -> StudioResult<()> {
        let kind = self.current_panel_kind()?;
        let field = self.manager.require_field_mut(kind, key)?;
        let Some(transformation) = field.as_transformation_mut() else {
            return Err(StudioError::internal(format!(
                "field '{key}' is not a transformation field"
            )));
        };
        transformation.clear(&mut self.undo);
        self.flush_updates()
    }

    /// Toggle a field group of the active panel
    pub fn set_group_enabled(&mut self, label: &str, enabled: bool) -> StudioResult<()> {
        let kind = self.current_panel_kind()?;
        let Some(panel) = &mut self.panel else {
            return Err(StudioError::NoSelection);
        };
        let Some(group) = panel.group_mut(label) else {
            return Err(StudioError::PanelNotFound(format!(
                "group '{label}' in panel '{kind}'"
            )));
        };
        group.set_enabled(enabled, kind, &mut self.manager);
        Ok(())
    }

    // ========================================================================
    // Undo / redo
    // ========================================================================

    /// Undo the most recent edit; returns whether anything was undone
    pub fn undo(&mut self) -> bool {
        let applied = self.undo.undo(&mut self.manager);
        if applied {
            self.sync_after_replay();
        }
        applied
    }

    /// Redo the most recently undone edit; returns whether anything was
    /// redone
    pub fn redo(&mut self) -> bool {
        let applied = self.undo.redo(&mut self.manager);
        if applied {
            self.sync_after_replay();
        }
        applied
    }

    fn sync_after_replay(&mut self) {
        if let Err(error) = self.flush_updates() {
            tracing::warn!(%error, "failed to sync document after undo/redo replay");
        }
    }

    // ========================================================================
    // Document synchronization
    // ========================================================================

    /// Flush committed field changes back into the document
    ///
    /// Drains the value-changed notifications of the active panel,
    /// re-applies option enable maps when a choice field changed, and
    /// rewrites each changed field's document expression.
    fn flush_updates(&mut self) -> StudioResult<()> {
        let Some(path) = self.selection else {
            return Ok(());
        };
        let kind = self.current_panel_kind()?;
        let updated = self.manager.take_pending_updates(kind);
        if updated.is_empty() {
            return Ok(());
        }

        let choice_changed = updated.iter().any(|key| {
            matches!(
                self.manager.field(kind, *key),
                Some(FieldConfig::Choice(_))
            )
        });
        if choice_changed {
            apply_choice_states(kind, &mut self.manager);
        }

        let mut changes = Vec::with_capacity(updated.len());
        for key in updated {
            let expression = self
                .manager
                .field(kind, key)
                .and_then(FieldConfig::document_expression);
            changes.push((key, expression));
        }

        let symbolizer = self.document.symbolizer_mut(&path)?;
        for (key, expression) in changes {
            match expression {
                Some(expression) => symbolizer.set_property(key, expression),
                None => {
                    symbolizer.clear_property(key);
                }
            }
        }
        self.document.touch();
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_style::sample;
    use meridian_style::Expression;

    #[test]
    fn test_select_builds_panel() {
        let mut session = EditorSession::load_document(sample::polygon_document());
        let kind = session.select(NodePath::first()).unwrap();
        assert_eq!(kind, PanelKind::Fill);
        assert!(session.data_present());
        assert_eq!(
            session.field(FieldKey::FillColour).unwrap().string_value(),
            Some("#000080".to_string())
        );
    }

    #[test]
    fn test_edit_flows_into_document() {
        let mut session = EditorSession::load_document(sample::polygon_document());
        session.select(NodePath::first()).unwrap();
        session
            .set_field_value(FieldKey::FillColour, StyleValue::string("#FF0000"))
            .unwrap();

        let symbolizer = session.document().symbolizer(&NodePath::first()).unwrap();
        assert_eq!(
            symbolizer.property(FieldKey::FillColour).unwrap(),
            &Expression::literal(StyleValue::Colour("#FF0000".to_string()))
        );
        assert_eq!(session.undo_manager().undo_count(), 1);
    }

    #[test]
    fn test_undo_restores_document() {
        let mut session = EditorSession::load_document(sample::polygon_document());
        session.select(NodePath::first()).unwrap();
        session
            .set_field_value(FieldKey::FillColour, StyleValue::string("#FF0000"))
            .unwrap();

        assert!(session.undo());
        assert_eq!(
            session.field(FieldKey::FillColour).unwrap().string_value(),
            Some("#000080".to_string())
        );
        let symbolizer = session.document().symbolizer(&NodePath::first()).unwrap();
        assert_eq!(
            symbolizer.property(FieldKey::FillColour).unwrap(),
            &Expression::literal(StyleValue::Colour("#000080".to_string()))
        );

        assert!(session.redo());
        assert_eq!(
            session.field(FieldKey::FillColour).unwrap().string_value(),
            Some("#FF0000".to_string())
        );
    }

    #[test]
    fn test_selection_within_same_panel_repopulates() {
        let mut session = EditorSession::load_document(sample::attribute_filtered_document());
        session.select(NodePath::first()).unwrap();
        assert_eq!(
            session.field(FieldKey::FillColour).unwrap().string_value(),
            Some("#66FF66".to_string())
        );

        session.select(NodePath::new(0, 0, 0, 1, 0, 0)).unwrap();
        assert_eq!(
            session.field(FieldKey::FillColour).unwrap().string_value(),
            Some("#FF6666".to_string())
        );
        // navigating is not an edit
        assert_eq!(session.undo_manager().undo_count(), 0);
    }

    #[test]
    fn test_open_clears_undo_history(){
        let mut session = EditorSession::load_document(sample::polygon_document());
        session.select(NodePath::first()).unwrap();
        session
            .set_field_value(FieldKey::FillColour, StyleValue::string("#FF0000"))
            .unwrap();
        assert!(session.undo_manager().can_undo());

        session.open(sample::line_document());
        assert!(!session.undo_manager().can_undo());
        assert!(session.active_panel().is_none());
    }

    #[test]
    fn test_edit_without_selection_fails() {
        let mut session = EditorSession::new_document("empty");
        let err = session
            .set_field_value(FieldKey::FillColour, StyleValue::string("#FF0000"))
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
