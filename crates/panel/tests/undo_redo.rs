//! Undo/redo behavior across the editing session
//!
//! Exercises the inverse law, redo invalidation, non-reentrant replay, and
//! the ordering of events produced by independent commit points.

use meridian_core::{FieldKey, StyleValue};
use meridian_panel::{EditorSession, TransformationEditor, UndoValue};
use meridian_style::{Expression, NodePath, ProcessFunction, sample};

struct FixedEditor(Option<ProcessFunction>);

impl TransformationEditor for FixedEditor {
    fn show_dialog(&mut self, _current: Option<&ProcessFunction>) -> Option<ProcessFunction> {
        self.0.clone()
    }
}

fn polygon_session() -> EditorSession {
    let mut session = EditorSession::load_document(sample::polygon_document());
    session.select(NodePath::first()).unwrap();
    session
}

#[test]
fn undo_restores_the_immediately_prior_value() {
    let mut session = polygon_session();

    session
        .set_field_value(FieldKey::FillColour, StyleValue::string("#111111"))
        .unwrap();
    session
        .set_field_value(FieldKey::FillColour, StyleValue::string("#222222"))
        .unwrap();

    assert!(session.undo());
    assert_eq!(
        session.field(FieldKey::FillColour).unwrap().string_value(),
        Some("#111111".to_string())
    );

    assert!(session.redo());
    assert_eq!(
        session.field(FieldKey::FillColour).unwrap().string_value(),
        Some("#222222".to_string())
    );
}

#[test]
fn undo_on_empty_stack_is_noop() {
    let mut session = polygon_session();
    assert!(!session.undo());
    assert!(!session.redo());
}

#[test]
fn fresh_edit_after_undo_clears_redo() {
    let mut session = polygon_session();

    session
        .set_field_value(FieldKey::FillColour, StyleValue::string("#111111"))
        .unwrap();
    session
        .set_field_value(FieldKey::FillColour, StyleValue::string("#222222"))
        .unwrap();
    assert!(session.undo());
    assert!(session.undo_manager().can_redo());

    session
        .set_field_value(FieldKey::FillColour, StyleValue::string("#333333"))
        .unwrap();
    assert!(!session.undo_manager().can_redo());
    assert!(!session.redo());
}

#[test]
fn replay_is_not_reentrant() {
    let mut session = polygon_session();

    for colour in ["#111111", "#222222", "#333333"] {
        session
            .set_field_value(FieldKey::FillColour, StyleValue::string(colour))
            .unwrap();
    }
    let initial = session.undo_manager().undo_count();
    assert_eq!(initial, 3);

    assert!(session.undo());
    assert!(session.undo());
    assert_eq!(session.undo_manager().undo_count(), initial - 2);
    assert_eq!(session.undo_manager().redo_count(), 2);

    assert!(session.redo());
    assert_eq!(session.undo_manager().undo_count(), initial - 1);
    assert_eq!(session.undo_manager().redo_count(), 1);
}

#[test]
fn recommitting_the_same_value_still_pushes_an_event() {
    let mut session = polygon_session();

    session
        .set_field_value(FieldKey::FillOpacity, StyleValue::Double(0.5))
        .unwrap();
    session
        .set_field_value(FieldKey::FillOpacity, StyleValue::Double(0.5))
        .unwrap();

    assert_eq!(session.undo_manager().undo_count(), 2);
}

#[test]
fn transformation_edit_then_clear_produces_two_ordered_events() {
    let mut session = polygon_session();
    let heatmap = ProcessFunction::new("vec:Heatmap")
        .with_parameter("radius", Expression::literal(StyleValue::Integer(10)));

    let committed = session
        .edit_transformation(FieldKey::Transformation, &mut FixedEditor(Some(heatmap.clone())))
        .unwrap();
    assert!(committed);
    session.clear_transformation(FieldKey::Transformation).unwrap();

    let field = session.field(FieldKey::Transformation).unwrap();
    assert_eq!(field.string_value(), Some(String::new()));
    assert_eq!(field.generate_expression(), None);

    let events = session.undo_manager().events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].old, UndoValue::Empty);
    assert_eq!(events[0].new, UndoValue::Process(heatmap.clone()));
    assert_eq!(events[1].old, UndoValue::Process(heatmap));
    assert_eq!(events[1].new, UndoValue::Empty);
}

#[test]
fn cancelled_transformation_dialog_commits_nothing() {
    let mut session = polygon_session();

    let committed = session
        .edit_transformation(FieldKey::Transformation, &mut FixedEditor(None))
        .unwrap();
    assert!(!committed);
    assert_eq!(session.undo_manager().undo_count(), 0);
}

#[test]
fn undo_walks_back_through_a_mixed_edit_sequence() {
    let mut session = polygon_session();

    session
        .set_field_value(FieldKey::FillColour, StyleValue::string("#111111"))
        .unwrap();
    session
        .set_field_value(FieldKey::FillOpacity, StyleValue::Double(0.25))
        .unwrap();
    session
        .set_field_value(FieldKey::StrokeColour, StyleValue::string("#ABCDEF"))
        .unwrap_err(); // stroke colour belongs to the other detail panel

    assert!(session.undo());
    assert_eq!(
        session.field(FieldKey::FillOpacity).unwrap().string_value(),
        Some("0.5".to_string())
    );
    assert!(session.undo());
    assert_eq!(
        session.field(FieldKey::FillColour).unwrap().string_value(),
        Some("#000080".to_string())
    );
    assert!(!session.undo());
}
