//! Field configuration registry
//!
//! The `FieldConfigManager` owns every field configuration of the panels
//! currently built, keyed by `(PanelKind, FieldKey)`. It applies option
//! enable maps, collects generated expressions per panel, repopulates
//! panels from document properties, and dispatches undo/redo replay to the
//! targeted field.

use crate::field::FieldConfig;
use crate::undo::UndoEvent;
use meridian_core::{FieldKey, PanelKind, StudioError, StudioResult};
use meridian_style::Expression;
use std::collections::{BTreeMap, HashMap};

/// Registry of the live field configurations, keyed by panel and field
#[derive(Debug, Default)]
pub struct FieldConfigManager {
    panels: BTreeMap<PanelKind, BTreeMap<FieldKey, FieldConfig>>,
}

impl FieldConfigManager {
    /// Create a new empty manager
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Registration & lookup
    // ========================================================================

    /// Register a field configuration under its own panel scope
    ///
    /// A configuration already registered for the same pair is replaced.
    pub fn register(&mut self, config: FieldConfig) {
        self.panels
            .entry(config.panel())
            .or_default()
            .insert(config.field(), config);
    }

    /// Check whether a panel has any registered fields
    pub fn has_panel(&self, panel: PanelKind) -> bool {
        self.panels
            .get(&panel)
            .is_some_and(|fields| !fields.is_empty())
    }

    /// Get a field configuration
    pub fn field(&self, panel: PanelKind, key: FieldKey) -> Option<&FieldConfig> {
        self.panels.get(&panel).and_then(|fields| fields.get(&key))
    }

    /// Get a mutable field configuration
    pub fn field_mut(&mut self, panel: PanelKind, key: FieldKey) -> Option<&mut FieldConfig> {
        self.panels
            .get_mut(&panel)
            .and_then(|fields| fields.get_mut(&key))
    }

    /// Get a field configuration or fail
    pub fn require_field(&self, panel: PanelKind, key: FieldKey) -> StudioResult<&FieldConfig> {
        self.field(panel, key)
            .ok_or_else(|| StudioError::field_not_found(panel.as_str(), key.as_str()))
    }

    /// Get a mutable field configuration or fail
    pub fn require_field_mut(
        &mut self,
        panel: PanelKind,
        key: FieldKey,
    ) -> StudioResult<&mut FieldConfig> {
        self.field_mut(panel, key)
            .ok_or_else(|| StudioError::field_not_found(panel.as_str(), key.as_str()))
    }

    /// The field keys registered for a panel, in key order
    pub fn panel_keys(&self, panel: PanelKind) -> Vec<FieldKey> {
        self.panels
            .get(&panel)
            .map(|fields| fields.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Iterate the field configurations of a panel
    pub fn panel_fields(&self, panel: PanelKind) -> impl Iterator<Item = &FieldConfig> {
        self.panels.get(&panel).into_iter().flat_map(|f| f.values())
    }

    /// Discard all field configurations of a panel (panel teardown)
    pub fn clear_panel(&mut self, panel: PanelKind) {
        self.panels.remove(&panel);
    }

    /// Reset a panel's fields to fresh, unpopulated instances
    ///
    /// Used when selection moves between nodes of the same panel type: the
    /// panel is repopulated rather than rebuilt, so values from the
    /// previous node must not leak into the new one.
    pub fn reset_panel(&mut self, panel: PanelKind) {
        if let Some(fields) = self.panels.get_mut(&panel) {
            for config in fields.values_mut() {
                *config = config.create_copy();
            }
        }
    }

    /// Discard everything (document closed)
    pub fn clear(&mut self) {
        self.panels.clear();
    }

    // ========================================================================
    // Option-driven enabling
    // ========================================================================

    /// Apply an option enable map across the given panel scopes
    ///
    /// Every registered field in the scope ends in a definite state: enabled
    /// exactly when the map marks it true, disabled otherwise. Stored values
    /// are untouched.
    pub fn apply_option_state(
        &mut self,
        scope: &[PanelKind],
        states: &HashMap<FieldKey, bool>,
    ) {
        for panel in scope {
            let Some(fields) = self.panels.get_mut(panel) else {
                continue;
            };
            for (key, config) in fields.iter_mut() {
                let enabled = states.get(key).copied().unwrap_or(false);
                config.set_enabled(enabled);
            }
        }
    }

    // ========================================================================
    // Expression bridge
    // ========================================================================

    /// Collect the document expressions of a panel's enabled fields
    ///
    /// Disabled fields keep their values but are excluded here.
    pub fn generate(&self, panel: PanelKind) -> BTreeMap<FieldKey, Expression> {
        let mut generated = BTreeMap::new();
        for config in self.panel_fields(panel) {
            if !config.is_enabled() {
                continue;
            }
            if let Some(expression) = config.document_expression() {
                generated.insert(config.field(), expression);
            }
        }
        generated
    }

    /// Repopulate a panel's fields from document properties (load semantics)
    ///
    /// Fields without a matching property keep their defaults. Reportable
    /// population failures are logged and skipped; the panel stays usable.
    pub fn populate(&mut self, panel: PanelKind, properties: &BTreeMap<FieldKey, Expression>) {
        let Some(fields) = self.panels.get_mut(&panel) else {
            return;
        };
        for (key, config) in fields.iter_mut() {
            let Some(expression) = properties.get(key) else {
                continue;
            };
            if let Err(error) = config.populate_expression(expression) {
                tracing::warn!(panel = %panel, field = %key, %error, "failed to populate field");
            }
        }
    }

    // ========================================================================
    // Undo/redo replay
    // ========================================================================

    /// Replay the old side of an event through its target field
    pub fn replay_undo(&mut self, event: &UndoEvent) {
        match self.field_mut(event.panel, event.field) {
            Some(config) => config.undo_action(event),
            None => {
                tracing::warn!(panel = %event.panel, field = %event.field, "undo target field no longer exists");
            }
        }
    }

    /// Replay the new side of an event through its target field
    pub fn replay_redo(&mut self, event: &UndoEvent) {
        match self.field_mut(event.panel, event.field) {
            Some(config) => config.redo_action(event),
            None => {
                tracing::warn!(panel = %event.panel, field = %event.field, "redo target field no longer exists");
            }
        }
    }

    /// Drain the value-changed notifications of a panel
    ///
    /// Returns the keys of fields edited since the last drain, in key order.
    pub fn take_pending_updates(&mut self, panel: PanelKind) -> Vec<FieldKey> {
        let Some(fields) = self.panels.get_mut(&panel) else {
            return Vec::new();
        };
        fields
            .iter_mut()
            .filter_map(|(key, config)| config.take_pending_update().then_some(*key))
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldColour, FieldDouble};
    use crate::undo::UndoManager;
    use meridian_core::StyleValue;

    fn manager() -> FieldConfigManager {
        let mut manager = FieldConfigManager::new();
        manager.register(
            FieldColour::new(
                PanelKind::Fill,
                FieldKey::FillColour,
                "Fill Colour",
                false,
                false,
            )
            .with_default("#000080")
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
        manager
    }

    #[test]
    fn test_register_and_lookup() {
        let manager = manager();
        assert!(manager.has_panel(PanelKind::Fill));
        assert!(!manager.has_panel(PanelKind::Stroke));
        assert!(manager.field(PanelKind::Fill, FieldKey::FillColour).is_some());
        assert!(
            manager
                .require_field(PanelKind::Fill, FieldKey::StrokeWidth)
                .is_err()
        );
    }

    #[test]
    fn test_generate_excludes_disabled_fields() {
        let mut manager = manager();
        let generated = manager.generate(PanelKind::Fill);
        assert_eq!(generated.len(), 2);

        manager
            .field_mut(PanelKind::Fill, FieldKey::FillOpacity)
            .unwrap()
            .set_enabled(false);
        let generated = manager.generate(PanelKind::Fill);
        assert_eq!(generated.len(), 1);
        assert!(generated.contains_key(&FieldKey::FillColour));
    }

    #[test]
    fn test_apply_option_state_is_exact() {
        let mut manager = manager();
        let mut states = HashMap::new();
        states.insert(FieldKey::FillColour, true);

        manager.apply_option_state(&[PanelKind::Fill], &states);
        assert!(
            manager
                .field(PanelKind::Fill, FieldKey::FillColour)
                .unwrap()
                .is_enabled()
        );
        assert!(
            !manager
                .field(PanelKind::Fill, FieldKey::FillOpacity)
                .unwrap()
                .is_enabled()
        );
    }

    #[test]
    fn test_populate_skips_bad_values() {
        let mut manager = manager();
        let mut properties = BTreeMap::new();
        properties.insert(
            FieldKey::FillColour,
            Expression::literal(StyleValue::string("not-a-colour")),
        );
        properties.insert(
            FieldKey::FillOpacity,
            Expression::literal(StyleValue::Double(0.25)),
        );

        manager.populate(PanelKind::Fill, &properties);

        // bad colour left at default, good opacity applied
        assert_eq!(
            manager
                .field(PanelKind::Fill, FieldKey::FillColour)
                .unwrap()
                .string_value(),
            Some("#000080".to_string())
        );
        assert_eq!(
            manager
                .field(PanelKind::Fill, FieldKey::FillOpacity)
                .unwrap()
                .string_value(),
            Some("0.25".to_string())
        );
    }

    #[test]
    fn test_pending_updates_drain_once() {
        let mut manager = manager();
        let mut undo = UndoManager::new();
        manager
            .field_mut(PanelKind::Fill, FieldKey::FillColour)
            .unwrap()
            .populate_field(StyleValue::string("#FF0000"), &mut undo)
            .unwrap();

        assert_eq!(
            manager.take_pending_updates(PanelKind::Fill),
            vec![FieldKey::FillColour]
        );
        assert!(manager.take_pending_updates(PanelKind::Fill).is_empty());
    }

    #[test]
    fn test_replay_missing_field_is_noop() {
        let mut manager = FieldConfigManager::new();
        let event = UndoEvent::new(
            PanelKind::Stroke,
            FieldKey::StrokeWidth,
            crate::undo::UndoValue::Empty,
            crate::undo::UndoValue::Empty,
        );
        manager.replay_undo(&event);
        manager.replay_redo(&event);
    }
}
