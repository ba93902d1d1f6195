//! Choice (option dropdown) field configuration
//!
//! The choice variant backs enum-valued properties such as the marker
//! symbol type. Its options come from one or more declarative
//! `SymbolTypeConfig` sources aggregated at construction; each option
//! belongs to a panel identity whose enable map declares which dependent
//! fields are active while that option is selected.

use crate::field::base::FieldConfigBase;
use crate::symbol::SymbolTypeConfig;
use crate::undo::{UndoEvent, UndoManager, UndoValue};
use meridian_core::{FieldKey, PanelKind, StudioError, StudioResult, StyleValue, ValueType};
use meridian_style::Expression;
use std::collections::HashMap;

// ============================================================================
// ChoiceOption
// ============================================================================

/// One selectable option of a choice field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    /// Option key, stored in the document
    pub key: String,

    /// Display label
    pub label: String,

    /// Panel identity owning this option
    pub panel: PanelKind,
}

// ============================================================================
// FieldChoice
// ============================================================================

/// A field configuration editing one option from an ordered list
#[derive(Debug, Clone)]
pub struct FieldChoice {
    base: FieldConfigBase,
    options: Vec<ChoiceOption>,
    field_map: HashMap<PanelKind, HashMap<FieldKey, bool>>,
    selected: Option<usize>,
}

impl FieldChoice {
    /// Create a new choice field with no options
    pub fn new(
        panel: PanelKind,
        field: FieldKey,
        label: impl Into<String>,
        value_only: bool,
        multiple_values: bool,
    ) -> Self {
        Self {
            base: FieldConfigBase::new(panel, field, label, value_only, multiple_values),
            options: Vec::new(),
            field_map: HashMap::new(),
            selected: None,
        }
    }

    /// Aggregate option groups into this field
    ///
    /// Called once during panel construction. The first declared option
    /// becomes the default and initial selection.
    pub fn add_config(&mut self, configs: &[SymbolTypeConfig]) {
        for config in configs {
            self.field_map
                .insert(config.panel, config.field_states.clone());
            for option in &config.options {
                self.options.push(ChoiceOption {
                    key: option.key.clone(),
                    label: option.label.clone(),
                    panel: config.panel,
                });
            }
        }
        if self.selected.is_none() && !self.options.is_empty() {
            self.selected = Some(0);
        }
    }

    /// Builder form of [`add_config`](Self::add_config)
    pub fn with_configs(mut self, configs: &[SymbolTypeConfig]) -> Self {
        self.add_config(configs);
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

    /// Get the options in declaration order
    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    /// Get the currently selected option
    pub fn selected_option(&self) -> Option<&ChoiceOption> {
        self.selected.and_then(|index| self.options.get(index))
    }

    /// Get the default option key (the first declared option)
    pub fn default_key(&self) -> Option<&str> {
        self.options.first().map(|option| option.key.as_str())
    }

    /// The panel identities contributing option groups, sorted
    pub fn config_panels(&self) -> Vec<PanelKind> {
        let mut panels: Vec<PanelKind> = self.field_map.keys().copied().collect();
        panels.sort();
        panels
    }

    /// The dependent-field enable map for the selected option's panel
    pub fn field_enable_state(&self) -> Option<&HashMap<FieldKey, bool>> {
        let option = self.selected_option()?;
        self.field_map.get(&option.panel)
    }

    /// The semantic value type this field edits
    pub fn value_type(&self) -> ValueType {
        ValueType::String
    }

    /// Current option key rendered as text
    pub fn string_value(&self) -> Option<String> {
        self.selected_option().map(|option| option.key.clone())
    }

    fn find_option(&self, key: &str) -> Option<usize> {
        self.options.iter().position(|option| option.key == key)
    }

    fn convert<'a>(&self, value: &'a StyleValue) -> StudioResult<&'a str> {
        match value {
            StyleValue::String(key) => Ok(key),
            other => Err(StudioError::unknown_value(
                self.base.field().as_str(),
                other.to_text(),
            )),
        }
    }

    /// Commit an option selection: one undo event plus the change
    /// notification
    ///
    /// An unrecognized key is a reportable error; the selection is left
    /// unchanged and no event is pushed.
    pub fn populate_field(
        &mut self,
        value: StyleValue,
        undo: &mut UndoManager,
    ) -> StudioResult<()> {
        let key = self.convert(&value)?;
        let Some(index) = self.find_option(key) else {
            return Err(StudioError::unknown_option(
                self.base.field().as_str(),
                key,
            ));
        };
        let old = match self.selected_option() {
            Some(option) => UndoValue::Value(StyleValue::String(option.key.clone())),
            None => UndoValue::Empty,
        };
        let key = key.to_string();
        self.selected = Some(index);
        self.base.bind_value();
        undo.add_undo_event(UndoEvent::new(
            self.base.panel(),
            self.base.field(),
            old,
            UndoValue::Value(StyleValue::String(key)),
        ));
        self.base.value_updated();
        Ok(())
    }

    /// Load a selection from an expression (no undo event)
    pub fn populate_expression(&mut self, expression: &Expression) -> StudioResult<()> {
        match expression {
            Expression::Literal { value } => {
                let key = self.convert(value)?;
                let Some(index) = self.find_option(key) else {
                    return Err(StudioError::unknown_option(
                        self.base.field().as_str(),
                        key,
                    ));
                };
                self.selected = Some(index);
                self.base.bind_value();
                Ok(())
            }
            other => self.base.populate_non_literal(other),
        }
    }

    /// Produce the expression for the current state
    ///
    /// The literal carries the option key, never the display label.
    pub fn generate_expression(&self) -> Option<Expression> {
        if let Some(expression) = self.base.bound_expression() {
            return Some(expression);
        }
        self.selected_option()
            .map(|option| Expression::literal(StyleValue::String(option.key.clone())))
    }

    /// Revert to the default option (commit semantics)
    pub fn revert_to_default(&mut self, undo: &mut UndoManager) -> StudioResult<()> {
        let Some(key) = self.default_key().map(str::to_string) else {
            return Ok(());
        };
        self.populate_field(StyleValue::String(key), undo)
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
            UndoValue::Value(StyleValue::String(key)) => match self.find_option(key) {
                Some(index) => {
                    self.selected = Some(index);
                    self.base.bind_value();
                    self.base.value_updated();
                }
                None => {
                    tracing::warn!(field = %self.base.field(), key = %key, "cannot replay unknown option key");
                }
            },
            other => {
                tracing::warn!(field = %self.base.field(), value = %other, "cannot replay value into choice field");
            }
        }
    }

    /// Create a fresh copy sharing the static configuration and option
    /// groups, reset to the default selection
    pub fn create_copy(&self) -> Self {
        Self {
            base: self.base.create_copy(),
            options: self.options.clone(),
            field_map: self.field_map.clone(),
            selected: (!self.options.is_empty()).then_some(0),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
