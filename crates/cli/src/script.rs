//! Declarative test scripts
//!
//! A test script opens a sample document, walks an ordered list of tree
//! selections, and for each selection asserts the active panel and drives
//! or inspects individual fields. Scripts are JSON documents; panels,
//! fields, and sample documents are resolved from closed enumerations via
//! lookup tables.

use meridian_core::{
    FieldKey, PanelKind, Persistable, StudioError, StudioResult, StyleValue, Validatable,
};
use meridian_style::{NodePath, StyledDocument, sample};
use serde::{Deserialize, Serialize};

// ============================================================================
// SampleDocument
// ============================================================================

/// The sample documents a script can open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleDocument {
    Point,
    Line,
    Polygon,
    Label,
    AttributeFiltered,
}

impl SampleDocument {
    /// Materialize the sample document
    pub fn build(&self) -> StyledDocument {
        match self {
            SampleDocument::Point => sample::point_document(),
            SampleDocument::Line => sample::line_document(),
            SampleDocument::Polygon => sample::polygon_document(),
            SampleDocument::Label => sample::label_document(),
            SampleDocument::AttributeFiltered => sample::attribute_filtered_document(),
        }
    }
}

// ============================================================================
// FieldCheck
// ============================================================================

/// One field operation within a step
///
/// `set` runs first (through the designated test entry point), then the
/// assertions are evaluated against the resulting state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldCheck {
    /// The field to drive or inspect
    pub field: FieldKey,

    /// Value to inject via `set_test_value`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set: Option<StyleValue>,

    /// Expected literal value after any injection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<StyleValue>,

    /// Expected enabled state after any injection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect_enabled: Option<bool>,
}

// ============================================================================
// TestStep
// ============================================================================

/// One tree selection plus its field operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestStep {
    /// The tree node to select
    pub path: NodePath,

    /// The panel kind the selection must resolve to
    pub expected_panel: PanelKind,

    /// Whether the selected node must supply data for the panel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect_data: Option<bool>,

    /// Field operations, in order
    #[serde(default)]
    pub fields: Vec<FieldCheck>,
}

// ============================================================================
// TestScript
// ============================================================================

/// A complete declarative test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestScript {
    /// Script name, shown in reports
    pub name: String,

    /// The document the script runs against
    pub document: SampleDocument,

    /// Ordered steps
    pub steps: Vec<TestStep>,
}

impl Validatable for TestScript {
    fn validate(&self) -> StudioResult<()> {
        if self.name.is_empty() {
            return Err(StudioError::InvalidScript {
                script: "<unnamed>".to_string(),
                message: "script name cannot be empty".to_string(),
            });
        }
        if self.steps.is_empty() {
            return Err(StudioError::InvalidScript {
                script: self.name.clone(),
                message: "script declares no steps".to_string(),
            });
        }
        for (index, step) in self.steps.iter().enumerate() {
            for check in &step.fields {
                if check.set.is_none() && check.expect.is_none() && check.expect_enabled.is_none()
                {
                    return Err(StudioError::InvalidScript {
                        script: self.name.clone(),
                        message: format!(
                            "step {index} field '{}' neither sets nor asserts anything",
                            check.field
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Persistable for TestScript {
    fn file_extension() -> &'static str {
        "json"
    }
}

// ============================================================================
// Tests
// ============================================================================
