//! Shared field configuration state
//!
//! `FieldConfigBase` carries everything the concrete field variants have in
//! common: the `(panel, field)` scope, the static flags fixed at
//! construction, the widget enabled/visible state, the optional
//! attribute/expression mode control, and the consumable value-changed
//! notification the session drains to regenerate document expressions.

use crate::attribute::{AttributeSelection, ValueBinding};
use meridian_core::{FieldKey, PanelKind, StudioError, StudioResult};
use meridian_style::Expression;

// ============================================================================
// WidgetState
// ============================================================================

/// Enabled/visible state of a field's value widget
#[derive(Debug, Clone)]
pub struct WidgetState {
    pub enabled: bool,
    pub visible: bool,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            enabled: true,
            visible: true,
        }
    }
}

// ============================================================================
// FieldConfigBase
// ============================================================================

/// State shared by every concrete field configuration variant
#[derive(Debug, Clone)]
pub struct FieldConfigBase {
    /// Panel scope this field belongs to
    panel: PanelKind,

    /// The field identifier within the panel scope
    field: FieldKey,

    /// Display label
    label: String,

    /// When true, attribute and expression modes are unavailable
    value_only: bool,

    /// Whether this field participates in batch edits across rules
    multiple_values: bool,

    /// Value widget state
    widget: WidgetState,

    /// Mode control; present only when the field is not value-only
    attribute_selection: Option<AttributeSelection>,

    /// Consumable value-changed notification
    pending_update: bool,
}

impl FieldConfigBase {
    /// Create a new field configuration base
    ///
    /// The attribute/expression mode control exists only when `value_only`
    /// is false; value-only fields therefore cannot reach the non-literal
    /// modes through any operation.
    pub fn new(
        panel: PanelKind,
        field: FieldKey,
        label: impl Into<String>,
        value_only: bool,
        multiple_values: bool,
    ) -> Self {
        Self {
            panel,
            field,
            label: label.into(),
            value_only,
            multiple_values,
            widget: WidgetState::default(),
            attribute_selection: (!value_only).then(AttributeSelection::new),
            pending_update: false,
        }
    }

    // ========================================================================
    // Static configuration
    // ========================================================================

    /// Get the panel scope
    pub fn panel(&self) -> PanelKind {
        self.panel
    }

    /// Get the field identifier
    pub fn field(&self) -> FieldKey {
        self.field
    }

    /// Get the display label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Check if the field is value-only
    pub fn is_value_only(&self) -> bool {
        self.value_only
    }

    /// Check if the field participates in batch edits
    pub fn has_multiple_values(&self) -> bool {
        self.multiple_values
    }

    /// Create a fresh base sharing only the static configuration
    pub fn create_copy(&self) -> Self {
        Self::new(
            self.panel,
            self.field,
            self.label.clone(),
            self.value_only,
            self.multiple_values,
        )
    }

    // ========================================================================
    // Widget state
    // ========================================================================

    /// Check if the field reports enabled
    ///
    /// When a mode control exists it is the authority, otherwise the value
    /// widget is.
    pub fn is_enabled(&self) -> bool {
        match &self.attribute_selection {
            Some(selection) => selection.is_enabled(),
            None => self.widget.enabled,
        }
    }

    /// Set the enabled state of the widget(s)
    ///
    /// Does not alter the stored value or the binding mode.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.widget.enabled = enabled;
        if let Some(selection) = &mut self.attribute_selection {
            selection.set_enabled(enabled);
        }
    }

    /// Set the visible state of the widget(s)
    pub fn set_visible(&mut self, visible: bool) {
        self.widget.visible = visible;
    }

    /// Check if the field is visible
    pub fn is_visible(&self) -> bool {
        self.widget.visible
    }

    // ========================================================================
    // Binding mode
    // ========================================================================

    /// Get the current binding mode
    pub fn binding(&self) -> &ValueBinding {
        static VALUE: ValueBinding = ValueBinding::Value;
        match &self.attribute_selection {
            Some(selection) => selection.binding(),
            None => &VALUE,
        }
    }

    /// Switch to literal-value mode
    pub fn bind_value(&mut self) {
        if let Some(selection) = &mut self.attribute_selection {
            selection.select_value();
        }
        self.widget.enabled = true;
    }

    /// Bind to a named data attribute
    ///
    /// Returns false (without changing state) when the field is value-only.
    /// The value widget is inactive while an attribute is bound.
    pub fn bind_attribute(&mut self, name: impl Into<String>) -> bool {
        match &mut self.attribute_selection {
            Some(selection) => {
                selection.select_attribute(name);
                self.widget.enabled = false;
                true
            }
            None => false,
        }
    }

    /// Bind to an externally built expression
    ///
    /// Returns false (without changing state) when the field is value-only.
    pub fn bind_expression(&mut self, expression: Expression) -> bool {
        match &mut self.attribute_selection {
            Some(selection) => {
                selection.select_expression(expression);
                self.widget.enabled = false;
                true
            }
            None => false,
        }
    }

    /// The expression produced by a non-literal binding, if one is active
    pub fn bound_expression(&self) -> Option<Expression> {
        match self.binding() {
            ValueBinding::Value => None,
            ValueBinding::Attribute(name) => Some(Expression::property(name.clone())),
            ValueBinding::Expression(expression) => Some(expression.clone()),
        }
    }

    /// Load a non-literal expression shape (load semantics, no event)
    ///
    /// A non-literal shape arriving at a value-only field is an escalated
    /// failure: there is no mode that could display it.
    pub fn populate_non_literal(&mut self, expression: &Expression) -> StudioResult<()> {
        match &mut self.attribute_selection {
            Some(selection) => {
                match expression {
                    Expression::Property { name } => selection.select_attribute(name.clone()),
                    other => selection.select_expression(other.clone()),
                }
                self.widget.enabled = false;
                Ok(())
            }
            None => Err(StudioError::expression_shape(
                self.field.as_str(),
                expression.shape_name(),
            )),
        }
    }

    // ========================================================================
    // Value-changed notification
    // ========================================================================

    /// Mark the field as changed since the last synchronization
    pub fn value_updated(&mut self) {
        self.pending_update = true;
    }

    /// Consume the value-changed notification
    pub fn take_pending_update(&mut self) -> bool {
        std::mem::take(&mut self.pending_update)
    }

    /// Check the value-changed notification without consuming it
    pub fn has_pending_update(&self) -> bool {
        self.pending_update
    }
}

// ============================================================================
// Tests
// ============================================================================
