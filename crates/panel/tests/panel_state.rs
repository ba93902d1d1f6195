//! Field state machine behavior
//!
//! Covers literal round-trips, option-driven dependent-field activation,
//! value-only containment, and the polygon fill colour editing scenario.

use meridian_core::{FieldKey, PanelKind, StyleValue};
use meridian_panel::{
    EditorSession, FieldChoice, FieldConfig, FieldConfigManager, FieldDouble, SymbolTypeConfig,
    UndoManager, UndoValue, apply_choice_states,
};
use meridian_style::{Expression, NodePath, sample};

#[test]
fn literal_round_trip_for_every_field_type() {
    let mut session = EditorSession::load_document(sample::polygon_document());
    session.select(NodePath::first()).unwrap();

    session
        .set_field_value(FieldKey::FillColour, StyleValue::string("#0A0B0C"))
        .unwrap();
    assert_eq!(
        session
            .field(FieldKey::FillColour)
            .unwrap()
            .generate_expression(),
        Some(Expression::literal(StyleValue::Colour(
            "#0A0B0C".to_string()
        )))
    );

    session
        .set_field_value(FieldKey::FillOpacity, StyleValue::Double(0.12345))
        .unwrap();
    let generated = session
        .field(FieldKey::FillOpacity)
        .unwrap()
        .generate_expression()
        .unwrap();
    let value = generated.as_literal().unwrap().as_f64().unwrap();
    assert!((value - 0.12345).abs() < 1e-4);

    session
        .set_field_value(FieldKey::GeometryField, StyleValue::string("the_geom"))
        .unwrap();
    assert_eq!(
        session
            .field(FieldKey::GeometryField)
            .unwrap()
            .generate_expression(),
        Some(Expression::literal_string("the_geom"))
    );
}

#[test]
fn fill_colour_test_injection_scenario() {
    let mut session = EditorSession::load_document(sample::polygon_document());
    session.select(NodePath::first()).unwrap();

    session
        .set_test_value(FieldKey::FillColour, StyleValue::string("#FF0000"))
        .unwrap();

    let field = session.field(FieldKey::FillColour).unwrap();
    assert!(field.is_enabled());
    assert_eq!(
        field.generate_expression(),
        Some(Expression::literal(StyleValue::Colour(
            "#FF0000".to_string()
        )))
    );

    assert_eq!(session.undo_manager().undo_count(), 1);
    let event = session.undo_manager().last_event().unwrap();
    assert_eq!(
        event.old,
        UndoValue::Value(StyleValue::Colour("#000080".to_string()))
    );
    assert_eq!(
        event.new,
        UndoValue::Value(StyleValue::Colour("#FF0000".to_string()))
    );
}

/// Option groups for a choice where "point" and "line" enable disjoint
/// dependent fields.
fn point_line_configs() -> Vec<SymbolTypeConfig> {
    vec![
        SymbolTypeConfig::new(PanelKind::Marker)
            .with_option("point", "Point")
            .with_field(FieldKey::SymbolType, true)
            .with_field(FieldKey::Size, true)
            .with_field(FieldKey::Rotation, true),
        SymbolTypeConfig::new(PanelKind::Stroke)
            .with_option("line", "Line")
            .with_field(FieldKey::SymbolType, true)
            .with_field(FieldKey::StrokeWidth, true),
    ]
}

#[test]
fn option_selection_enables_exactly_the_mapped_fields() {
    let mut manager = FieldConfigManager::new();
    let mut choice = FieldChoice::new(
        PanelKind::Marker,
        FieldKey::SymbolType,
        "Symbol Type",
        false,
        false,
    );
    choice.add_config(&point_line_configs());
    manager.register(choice.into());
    manager.register(
        FieldDouble::new(PanelKind::Marker, FieldKey::Size, "Size", false, false).into(),
    );
    manager.register(
        FieldDouble::new(PanelKind::Marker, FieldKey::Rotation, "Rotation", false, false).into(),
    );
    manager.register(
        FieldDouble::new(PanelKind::Stroke, FieldKey::StrokeWidth, "Width", false, false).into(),
    );

    // default option "point"
    apply_choice_states(PanelKind::Marker, &mut manager);
    assert!(manager.field(PanelKind::Marker, FieldKey::Size).unwrap().is_enabled());
    assert!(manager.field(PanelKind::Marker, FieldKey::Rotation).unwrap().is_enabled());
    assert!(
        !manager
            .field(PanelKind::Stroke, FieldKey::StrokeWidth)
            .unwrap()
            .is_enabled()
    );

    // select "line"
    let mut undo = UndoManager::new();
    manager
        .field_mut(PanelKind::Marker, FieldKey::SymbolType)
        .unwrap()
        .populate_field(StyleValue::string("line"), &mut undo)
        .unwrap();
    apply_choice_states(PanelKind::Marker, &mut manager);

    assert!(!manager.field(PanelKind::Marker, FieldKey::Size).unwrap().is_enabled());
    assert!(!manager.field(PanelKind::Marker, FieldKey::Rotation).unwrap().is_enabled());
    assert!(
        manager
            .field(PanelKind::Stroke, FieldKey::StrokeWidth)
            .unwrap()
            .is_enabled()
    );
}

#[test]
fn marker_panel_option_switch_in_session() {
    let mut session = EditorSession::load_document(sample::point_document());
    let kind = session.select(NodePath::first()).unwrap();
    assert_eq!(kind, PanelKind::Marker);

    // loaded "circle": mark fields enabled, filename disabled
    assert!(session.field(FieldKey::Size).unwrap().is_enabled());
    assert!(!session.field(FieldKey::ExternalGraphic).unwrap().is_enabled());

    session
        .set_field_value(FieldKey::SymbolType, StyleValue::string("external"))
        .unwrap();

    assert!(session.field(FieldKey::ExternalGraphic).unwrap().is_enabled());
    assert!(!session.field(FieldKey::Opacity).unwrap().is_enabled());
    assert!(session.field(FieldKey::SymbolType).unwrap().is_enabled());
}

#[test]
fn unknown_option_key_is_nonfatal_and_leaves_state() {
    let mut session = EditorSession::load_document(sample::point_document());
    session.select(NodePath::first()).unwrap();

    let err = session
        .set_field_value(FieldKey::SymbolType, StyleValue::string("hexagon"))
        .unwrap_err();
    assert!(err.is_reportable());
    assert_eq!(
        session.field(FieldKey::SymbolType).unwrap().string_value(),
        Some("circle".to_string())
    );
    assert_eq!(session.undo_manager().undo_count(), 0);

    // the session remains editable
    session
        .set_field_value(FieldKey::Size, StyleValue::Double(9.0))
        .unwrap();
    assert_eq!(session.undo_manager().undo_count(), 1);
}

#[test]
fn value_only_fields_cannot_leave_literal_mode() {
    let mut session = EditorSession::load_document(sample::point_document());
    session.select(NodePath::first()).unwrap();

    // external graphic is value-only: loading a property reference into it
    // is a shape error, and its state stays literal
    let manager_field = session.field(FieldKey::ExternalGraphic).unwrap();
    assert!(manager_field.base().is_value_only());

    let mut copy = manager_field.create_copy();
    let err = copy
        .populate_expression(&Expression::property("icon"))
        .unwrap_err();
    assert!(matches!(
        err,
        meridian_core::StudioError::ExpressionShape { .. }
    ));
    assert!(copy.base().bound_expression().is_none());
}

#[test]
fn disabled_fields_are_excluded_from_generation() {
    let mut session = EditorSession::load_document(sample::point_document());
    session.select(NodePath::first()).unwrap();

    // "circle" is selected, so the filename field is disabled and absent
    let generated = session.manager().generate(PanelKind::Marker);
    assert!(generated.contains_key(&FieldKey::Size));
    assert!(!generated.contains_key(&FieldKey::ExternalGraphic));
}

#[test]
fn group_toggle_disables_members_and_preserves_values() {
    let mut session = EditorSession::load_document(sample::polygon_document());
    session.select(NodePath::first()).unwrap();
    session
        .set_field_value(FieldKey::GeometryField, StyleValue::string("boundary"))
        .unwrap();

    session.set_group_enabled("Geometry", false).unwrap();
    let field = session.field(FieldKey::GeometryField).unwrap();
    assert!(!field.is_enabled());
    assert_eq!(field.string_value(), Some("boundary".to_string()));

    session.set_group_enabled("Geometry", true).unwrap();
    let field = session.field(FieldKey::GeometryField).unwrap();
    assert!(field.is_enabled());
    assert_eq!(field.string_value(), Some("boundary".to_string()));

    assert!(session.set_group_enabled("Dashes", true).is_err());
}

#[test]
fn revert_to_default_is_an_undoable_commit() {
    let mut session = EditorSession::load_document(sample::polygon_document());
    session.select(NodePath::first()).unwrap();
    session
        .set_field_value(FieldKey::FillColour, StyleValue::string("#FF0000"))
        .unwrap();

    session.revert_field(FieldKey::FillColour).unwrap();
    assert_eq!(
        session.field(FieldKey::FillColour).unwrap().string_value(),
        Some("#808080".to_string())
    );
    assert_eq!(session.undo_manager().undo_count(), 2);

    assert!(session.undo());
    assert_eq!(
        session.field(FieldKey::FillColour).unwrap().string_value(),
        Some("#FF0000".to_string())
    );
}

#[test]
fn create_copy_shares_static_configuration_only() {
    let mut session = EditorSession::load_document(sample::polygon_document());
    session.select(NodePath::first()).unwrap();
    session
        .set_field_value(FieldKey::FillColour, StyleValue::string("#FF0000"))
        .unwrap();

    let field = session.field(FieldKey::FillColour).unwrap();
    let copy = field.create_copy();
    assert_eq!(copy.panel(), field.panel());
    assert_eq!(copy.field(), field.field());
    assert!(matches!(copy, FieldConfig::Colour(_)));
    assert_eq!(copy.string_value(), Some("#808080".to_string()));
}
