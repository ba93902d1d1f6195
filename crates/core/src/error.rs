//! Error types for Meridian Studio
//!
//! This module provides unified error handling across the editor core,
//! covering field population failures, expression shape mismatches,
//! lookup failures, and script/config IO.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Meridian Studio
#[derive(Debug, Error)]
pub enum StudioError {
    // ========================================================================
    // Field Population Errors
    // ========================================================================
    /// A value could not be converted into the field's value domain
    #[error("Unknown value for field '{field}': {value}")]
    UnknownValue { field: String, value: String },

    /// A key passed to an option field matched no declared option
    #[error("Unknown option key for field '{field}': {key}")]
    UnknownOption { field: String, key: String },

    /// An expression node had an unexpected shape where a literal was required
    #[error("Unexpected expression shape for field '{field}': {found}")]
    ExpressionShape { field: String, found: String },

    // ========================================================================
    // Lookup Errors
    // ========================================================================
    /// No detail panel of the requested kind is active
    #[error("Panel not found: {0}")]
    PanelNotFound(String),

    /// No field configuration registered for the (panel, field) pair
    #[error("Field '{field}' not found in panel '{panel}'")]
    FieldNotFound { panel: String, field: String },

    /// A tree node path did not resolve to a document node
    #[error("Node path does not resolve: {0}")]
    PathNotFound(String),

    /// No document is open in the session
    #[error("No document is open")]
    NoDocument,

    /// No tree node is selected in the session
    #[error("No node is selected")]
    NoSelection,

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A symbol type configuration source is malformed
    #[error("Invalid symbol configuration: {0}")]
    InvalidSymbolConfig(String),

    /// A test script is malformed
    #[error("Invalid test script '{script}': {message}")]
    InvalidScript { script: String, message: String },

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Operation cancelled by user
    #[error("Operation cancelled")]
    Cancelled,

    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl StudioError {
    /// Create an unknown-value error
    pub fn unknown_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        StudioError::UnknownValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an unknown-option error
    pub fn unknown_option(field: impl Into<String>, key: impl Into<String>) -> Self {
        StudioError::UnknownOption {
            field: field.into(),
            key: key.into(),
        }
    }

    /// Create an expression-shape error
    pub fn expression_shape(field: impl Into<String>, found: impl Into<String>) -> Self {
        StudioError::ExpressionShape {
            field: field.into(),
            found: found.into(),
        }
    }

    /// Create a field-not-found error
    pub fn field_not_found(panel: impl Into<String>, field: impl Into<String>) -> Self {
        StudioError::FieldNotFound {
            panel: panel.into(),
            field: field.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        StudioError::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        StudioError::Internal(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        StudioError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error is a reportable population error
    ///
    /// Reportable errors are logged and leave the field state unchanged;
    /// they never abort the editing session.
    pub fn is_reportable(&self) -> bool {
        matches!(
            self,
            StudioError::UnknownValue { .. } | StudioError::UnknownOption { .. }
        )
    }

    /// Check if this error is a lookup failure
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StudioError::PanelNotFound(_)
                | StudioError::FieldNotFound { .. }
                | StudioError::PathNotFound(_)
                | StudioError::NoDocument
                | StudioError::NoSelection
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            StudioError::Io(_) | StudioError::FileRead { .. } | StudioError::FileWrite { .. }
        )
    }
}

/// Result type alias using StudioError
pub type StudioResult<T> = Result<T, StudioError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> StudioResult<T>;
}

impl<T, E: Into<StudioError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> StudioResult<T> {
        self.map_err(|e| {
            let err: StudioError = e.into();
            StudioError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_value_error() {
        let err = StudioError::unknown_value("stroke_width", "wide");
        assert!(err.is_reportable());
        assert!(!err.is_not_found());
        assert_eq!(
            err.to_string(),
            "Unknown value for field 'stroke_width': wide"
        );
    }

    #[test]
    fn test_unknown_option_error() {
        let err = StudioError::unknown_option("symbol_type", "hexagon");
        assert!(err.is_reportable());
        assert_eq!(
            err.to_string(),
            "Unknown option key for field 'symbol_type': hexagon"
        );
    }

    #[test]
    fn test_expression_shape_error() {
        let err = StudioError::expression_shape("fill_colour", "function");
        assert!(!err.is_reportable());
        assert_eq!(
            err.to_string(),
            "Unexpected expression shape for field 'fill_colour': function"
        );
    }

    #[test]
    fn test_not_found_errors() {
        let err = StudioError::field_not_found("fill", "stroke_width");
        assert!(err.is_not_found());
        assert!(!err.is_reportable());
        assert_eq!(
            err.to_string(),
            "Field 'stroke_width' not found in panel 'fill'"
        );

        let err = StudioError::PanelNotFound("halo".to_string());
        assert!(err.is_not_found());
    }

    #[test]
    fn test_error_with_context() {
        let err = StudioError::with_context("Loading script", "Permission denied");
        assert_eq!(err.to_string(), "Loading script: Permission denied");
    }

    #[test]
    fn test_io_error_classification() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: StudioError = io_err.into();
        assert!(err.is_io());
    }

    #[test]
    fn test_result_ext_context() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk offline",
        ));
        let err = result.with_context("Reading symbol config").unwrap_err();
        assert!(err.to_string().starts_with("Reading symbol config"));
    }
}
