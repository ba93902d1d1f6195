//! Symbol type configuration sources
//!
//! A `SymbolTypeConfig` is one declarative contribution to a choice field:
//! the options it adds to the dropdown and the map of dependent fields that
//! are enabled while one of its options is selected. Configs are aggregated
//! into the field at construction time and never mutated afterwards.

use meridian_core::{FieldKey, PanelKind, Persistable, StudioError, StudioResult, Validatable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// SymbolOption
// ============================================================================

/// One option a config contributes to a choice field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolOption {
    /// Option key, stored in the document
    pub key: String,

    /// Display label shown in the dropdown
    pub label: String,
}

impl SymbolOption {
    /// Create a new option
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

// ============================================================================
// SymbolTypeConfig
// ============================================================================

/// A declarative option group for a choice field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolTypeConfig {
    /// The panel identity owning this option group
    pub panel: PanelKind,

    /// Options contributed to the dropdown, in declaration order
    pub options: Vec<SymbolOption>,

    /// Dependent fields enabled while one of this group's options is
    /// selected; fields absent from the map are disabled
    pub field_states: HashMap<FieldKey, bool>,
}

impl SymbolTypeConfig {
    /// Create a new empty config for a panel
    pub fn new(panel: PanelKind) -> Self {
        Self {
            panel,
            options: Vec::new(),
            field_states: HashMap::new(),
        }
    }

    /// Add an option
    pub fn with_option(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(SymbolOption::new(key, label));
        self
    }

    /// Declare a dependent field state
    pub fn with_field(mut self, field: FieldKey, enabled: bool) -> Self {
        self.field_states.insert(field, enabled);
        self
    }
}

impl Validatable for SymbolTypeConfig {
    fn validate(&self) -> StudioResult<()> {
        if self.options.is_empty() {
            return Err(StudioError::InvalidSymbolConfig(format!(
                "config for panel '{}' declares no options",
                self.panel
            )));
        }
        for (index, option) in self.options.iter().enumerate() {
            if option.key.is_empty() {
                return Err(StudioError::InvalidSymbolConfig(format!(
                    "option {index} for panel '{}' has an empty key",
                    self.panel
                )));
            }
        }
        let mut keys: Vec<&str> = self.options.iter().map(|o| o.key.as_str()).collect();
        keys.sort_unstable();
        keys.dedup();
        if keys.len() != self.options.len() {
            return Err(StudioError::InvalidSymbolConfig(format!(
                "config for panel '{}' has duplicate option keys",
                self.panel
            )));
        }
        Ok(())
    }
}

impl Persistable for SymbolTypeConfig {
    fn file_extension() -> &'static str {
        "json"
    }
}

// ============================================================================
// Tests
// ============================================================================
