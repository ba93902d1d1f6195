//! Detail panel construction
//!
//! One `DetailPanel` is built per selected symbolizer detail. Building a
//! panel registers its canonical field set with the field manager; the
//! session then repopulates the fields from the document (load semantics)
//! and applies option-driven enable maps.

use crate::field::{
    FieldChoice, FieldColour, FieldDouble, FieldInteger, FieldText, FieldTransformation,
};
use crate::manager::FieldConfigManager;
use crate::symbol::SymbolTypeConfig;
use meridian_core::{FieldKey, PanelKind};

// ============================================================================
// GroupConfig
// ============================================================================

/// An explicit toggle over a group of fields
///
/// Disabling a group disables its member fields; their stored values are
/// preserved and return untouched when the group is re-enabled.
#[derive(Debug, Clone)]
pub struct GroupConfig {
    /// Group label
    pub label: String,

    /// Member fields
    pub fields: Vec<FieldKey>,

    /// Current toggle state
    pub enabled: bool,
}

impl GroupConfig {
    /// Create a new enabled group
    pub fn new(label: impl Into<String>, fields: Vec<FieldKey>) -> Self {
        Self {
            label: label.into(),
            fields,
            enabled: true,
        }
    }

    /// Toggle the group, propagating to the member fields
    pub fn set_enabled(
        &mut self,
        enabled: bool,
        panel: PanelKind,
        manager: &mut FieldConfigManager,
    ) {
        self.enabled = enabled;
        for key in &self.fields {
            if let Some(config) = manager.field_mut(panel, *key) {
                config.set_enabled(enabled);
            }
        }
    }
}

// ============================================================================
// DetailPanel
// ============================================================================

/// One detail panel of the selected symbolizer
#[derive(Debug)]
pub struct DetailPanel {
    /// Panel identity
    pub kind: PanelKind,

    /// Display label
    pub label: String,

    /// Whether the selected node supplied data for this panel
    pub data_present: bool,

    /// Explicit field group toggles
    pub groups: Vec<GroupConfig>,
}

impl DetailPanel {
    /// Build the canonical panel for a kind, registering its fields
    pub fn build(kind: PanelKind, manager: &mut FieldConfigManager) -> Self {
        let mut groups = Vec::new();
        match kind {
            PanelKind::Fill => build_fill(manager, &mut groups),
            PanelKind::Stroke => build_stroke(manager, &mut groups),
            PanelKind::Marker => build_marker(manager, &mut groups),
            PanelKind::ExternalGraphic => {}
            PanelKind::Label => build_label(manager, &mut groups),
            PanelKind::Halo => build_halo(manager),
            PanelKind::Raster => build_raster(manager),
        }
        apply_choice_states(kind, manager);
        Self {
            kind,
            label: kind.display_name().to_string(),
            data_present: false,
            groups,
        }
    }

    /// Find a group toggle by label
    pub fn group_mut(&mut self, label: &str) -> Option<&mut GroupConfig> {
        self.groups.iter_mut().find(|group| group.label == label)
    }
}

/// Re-apply the enable maps of every choice field in a panel
///
/// Called after construction, population, and every committed selection so
/// the dependent fields always reflect the selected options.
pub fn apply_choice_states(panel: PanelKind, manager: &mut FieldConfigManager) {
    let mut applications = Vec::new();
    for config in manager.panel_fields(panel) {
        if let Some(choice) = config.as_choice() {
            if let Some(states) = choice.field_enable_state() {
                applications.push((choice.config_panels(), states.clone()));
            }
        }
    }
    for (scope, states) in applications {
        manager.apply_option_state(&scope, &states);
    }
}

// ============================================================================
// Symbol type configuration
// ============================================================================

/// The built-in marker option groups
///
/// Well-known mark shapes enable the mark-oriented fields; the external
/// graphic option swaps those for the filename field.
pub fn marker_symbol_configs() -> Vec<SymbolTypeConfig> {
    vec![
        SymbolTypeConfig::new(PanelKind::Marker)
            .with_option("circle", "Circle")
            .with_option("square", "Square")
            .with_option("triangle", "Triangle")
            .with_option("star", "Star")
            .with_option("cross", "Cross")
            .with_field(FieldKey::SymbolType, true)
            .with_field(FieldKey::Size, true)
            .with_field(FieldKey::Rotation, true)
            .with_field(FieldKey::Opacity, true)
            .with_field(FieldKey::GeometryField, true)
            .with_field(FieldKey::Transformation, true),
        SymbolTypeConfig::new(PanelKind::ExternalGraphic)
            .with_option("external", "External Graphic")
            .with_field(FieldKey::SymbolType, true)
            .with_field(FieldKey::ExternalGraphic, true)
            .with_field(FieldKey::Size, true)
            .with_field(FieldKey::Rotation, true)
            .with_field(FieldKey::GeometryField, true)
            .with_field(FieldKey::Transformation, true),
    ]
}

// ============================================================================
// Panel field sets
// ============================================================================

fn geometry_fields(
    kind: PanelKind,
    manager: &mut FieldConfigManager,
    groups: &mut Vec<GroupConfig>,
) {
    manager.register(
        FieldText::new(kind, FieldKey::GeometryField, "Geometry", true, false).into(),
    );
    manager.register(
        FieldTransformation::new(
            kind,
            FieldKey::Transformation,
            "Transformation",
            "Edit...",
            "Clear",
            false,
        )
        .into(),
    );
    groups.push(GroupConfig::new(
        "Geometry",
        vec![FieldKey::GeometryField, FieldKey::Transformation],
    ));
}

fn build_fill(manager: &mut FieldConfigManager, groups: &mut Vec<GroupConfig>) {
    manager.register(
        FieldColour::new(PanelKind::Fill, FieldKey::FillColour, "Fill Colour", false, false)
            .with_default("#808080")
            .into(),
    );
    manager.register(
        FieldDouble::new(
            PanelKind::Fill,
            FieldKey::FillOpacity,
            "Fill Opacity",
            false,
            false,
        )
        .with_default(1.0)
        .into(),
    );
    geometry_fields(PanelKind::Fill, manager, groups);
}

fn build_stroke(manager: &mut FieldConfigManager, groups: &mut Vec<GroupConfig>) {
    manager.register(
        FieldColour::new(
            PanelKind::Stroke,
            FieldKey::StrokeColour,
            "Stroke Colour",
            false,
            false,
        )
        .with_default("#000000")
        .into(),
    );
    manager.register(
        FieldDouble::new(
            PanelKind::Stroke,
            FieldKey::StrokeWidth,
            "Stroke Width",
            false,
            false,
        )
        .with_default(1.0)
        .into(),
    );
    manager.register(
        FieldDouble::new(
            PanelKind::Stroke,
            FieldKey::StrokeOpacity,
            "Stroke Opacity",
            false,
            false,
        )
        .with_default(1.0)
        .into(),
    );
    geometry_fields(PanelKind::Stroke, manager, groups);
}

fn build_marker(manager: &mut FieldConfigManager, groups: &mut Vec<GroupConfig>) {
    let mut symbol_type = FieldChoice::new(
        PanelKind::Marker,
        FieldKey::SymbolType,
        "Symbol Type",
        false,
        false,
    );
    symbol_type.add_config(&marker_symbol_configs());
    manager.register(symbol_type.into());

    manager.register(
        FieldDouble::new(PanelKind::Marker, FieldKey::Size, "Size", false, false)
            .with_default(6.0)
            .into(),
    );
    manager.register(
        FieldDouble::new(PanelKind::Marker, FieldKey::Rotation, "Rotation", false, false)
            .with_default(0.0)
            .into(),
    );
    manager.register(
        FieldDouble::new(PanelKind::Marker, FieldKey::Opacity, "Opacity", false, false)
            .with_default(1.0)
            .into(),
    );
    manager.register(
        FieldText::new(
            PanelKind::Marker,
            FieldKey::ExternalGraphic,
            "External Graphic",
            true,
            false,
        )
        .into(),
    );
    geometry_fields(PanelKind::Marker, manager, groups);
}

fn build_label(manager: &mut FieldConfigManager, groups: &mut Vec<GroupConfig>) {
    manager.register(
        FieldText::new(PanelKind::Label, FieldKey::Label, "Label", false, false).into(),
    );
    manager.register(
        FieldText::new(
            PanelKind::Label,
            FieldKey::FontFamily,
            "Font Family",
            false,
            false,
        )
        .with_default("Arial")
        .into(),
    );
    manager.register(
        FieldInteger::new(PanelKind::Label, FieldKey::FontSize, "Font Size", false, false)
            .with_default(10)
            .into(),
    );
    geometry_fields(PanelKind::Label, manager, groups);
}

fn build_halo(manager: &mut FieldConfigManager) {
    manager.register(
        FieldColour::new(PanelKind::Halo, FieldKey::HaloColour, "Halo Colour", false, false)
            .with_default("#FFFFFF")
            .into(),
    );
    manager.register(
        FieldDouble::new(
            PanelKind::Halo,
            FieldKey::HaloRadius,
            "Halo Radius",
            false,
            false,
        )
        .with_default(1.0)
        .into(),
    );
}

fn build_raster(manager: &mut FieldConfigManager) {
    manager.register(
        FieldDouble::new(PanelKind::Raster, FieldKey::Opacity, "Opacity", false, false)
            .with_default(1.0)
            .into(),
    );
    manager.register(
        FieldDouble::new(PanelKind::Raster, FieldKey::Gamma, "Gamma", false, false)
            .with_default(1.0)
            .into(),
    );
}

// ============================================================================
// Tests
// ============================================================================
