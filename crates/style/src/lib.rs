//! # Meridian Style
//!
//! Styling document model and expression tree for Meridian Studio.
//!
//! This crate provides the data structures the editor navigates and edits:
//!
//! - **StyledDocument**: layers → styles → feature-type styles → rules →
//!   symbolizers, addressed by `NodePath`
//! - **Expression**: literal / property-reference / function nodes holding
//!   every styling property value
//! - **ProcessFunction**: opaque computed-value payloads with a canonical
//!   textual summary
//!

// Module declarations
pub mod document;
pub mod expression;
pub mod process;
pub mod sample;

// Re-export commonly used types at crate root
pub use document::{
    DocumentMeta, FeatureTypeStyle, NodePath, Rule, Style, StyledDocument, StyledLayer,
    Symbolizer, SymbolizerKind,
};
pub use expression::Expression;
pub use process::{ProcessFunction, ProcessParameter};

// Re-export core types that are commonly used with the model
pub use meridian_core::{FieldKey, PanelKind, StudioError, StudioResult, StyleValue, ValueType};

/// Current schema version for styled documents
pub const SCHEMA_VERSION: u32 = 1;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient re-exports for common usage
pub mod prelude {
    pub use crate::{
        Expression, FieldKey, NodePath, PanelKind, ProcessFunction, Rule, StudioError,
        StudioResult, Style, StyleValue, StyledDocument, StyledLayer, Symbolizer, SymbolizerKind,
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_version() {
        assert_eq!(SCHEMA_VERSION, 1);
    }

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
