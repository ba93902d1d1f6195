//! Undo/redo event log
//!
//! Every committed field edit is recorded as one `UndoEvent` on a stack
//! pair owned by the editor session. Undo pops an event, replays its old
//! value through the field manager, and moves the event to the redo stack;
//! redo mirrors the operation with the new value. Replay repopulates fields
//! through their non-committing paths, so replaying can never enqueue a
//! further event.

use crate::manager::FieldConfigManager;
use meridian_core::{FieldKey, PanelKind, StyleValue};
use meridian_style::ProcessFunction;
use std::fmt;

// ============================================================================
// UndoValue
// ============================================================================

/// One side (old or new) of an undo event
#[derive(Debug, Clone, PartialEq)]
pub enum UndoValue {
    /// No value was held
    Empty,
    /// A literal value
    Value(StyleValue),
    /// A process-function payload
    Process(ProcessFunction),
}

impl UndoValue {
    /// Wrap an optional process function
    pub fn from_process(process: Option<&ProcessFunction>) -> Self {
        match process {
            Some(function) => UndoValue::Process(function.clone()),
            None => UndoValue::Empty,
        }
    }

    /// Get the literal value, if present
    pub fn as_value(&self) -> Option<&StyleValue> {
        match self {
            UndoValue::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for UndoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndoValue::Empty => write!(f, "<empty>"),
            UndoValue::Value(value) => write!(f, "{value}"),
            UndoValue::Process(function) => write!(f, "{function}"),
        }
    }
}

// ============================================================================
// UndoEvent
// ============================================================================

/// A single reversible edit record
///
/// Events are immutable once pushed; the `(panel, field)` pair addresses the
/// field configuration the edit targeted.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoEvent {
    /// Panel scope of the edited field
    pub panel: PanelKind,

    /// The edited field
    pub field: FieldKey,

    /// Value before the edit
    pub old: UndoValue,

    /// Value after the edit
    pub new: UndoValue,
}

impl UndoEvent {
    /// Create a new undo event
    pub fn new(panel: PanelKind, field: FieldKey, old: UndoValue, new: UndoValue) -> Self {
        Self {
            panel,
            field,
            old,
            new,
        }
    }
}

impl fmt::Display for UndoEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}: {} -> {}",
            self.panel, self.field, self.old, self.new
        )
    }
}

// ============================================================================
// UndoManager
// ============================================================================

/// Session-wide undo/redo state
///
/// One instance lives on the active document session and is passed into
/// every commit path explicitly. It is cleared when a document is created
/// or loaded. The stacks are unbounded.
#[derive(Debug, Default)]
pub struct UndoManager {
    /// Committed edits available to undo
    undo_stack: Vec<UndoEvent>,

    /// Undone edits available to redo
    redo_stack: Vec<UndoEvent>,
}

impl UndoManager {
    /// Create a new empty undo manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a committed edit
    ///
    /// A fresh edit invalidates all future-redo history.
    pub fn add_undo_event(&mut self, event: UndoEvent) {
        tracing::debug!(event = %event, "undo event recorded");
        self.undo_stack.push(event);
        self.redo_stack.clear();
    }

    /// Undo the most recent edit
    ///
    /// Replays the event's old value through the field manager and moves
    /// the event to the redo stack. Returns false when there is nothing
    /// to undo.
    pub fn undo(&mut self, fields: &mut FieldConfigManager) -> bool {
        let Some(event) = self.undo_stack.pop() else {
            return false;
        };
        tracing::debug!(event = %event, "undo");
        fields.replay_undo(&event);
        self.redo_stack.push(event);
        true
    }

    /// Redo the most recently undone edit
    ///
    /// Replays the event's new value through the field manager and moves
    /// the event back to the undo stack. Returns false when there is
    /// nothing to redo.
    pub fn redo(&mut self, fields: &mut FieldConfigManager) -> bool {
        let Some(event) = self.redo_stack.pop() else {
            return false;
        };
        tracing::debug!(event = %event, "redo");
        fields.replay_redo(&event);
        self.undo_stack.push(event);
        true
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the undo stack size
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the redo stack size
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Get the most recent committed event, if any
    pub fn last_event(&self) -> Option<&UndoEvent> {
        self.undo_stack.last()
    }

    /// Get the committed events oldest-first
    pub fn events(&self) -> &[UndoEvent] {
        &self.undo_stack
    }

    /// Clear both stacks (new or loaded document)
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================
