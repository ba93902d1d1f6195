//! Core traits for Meridian Studio
//!
//! This module defines the small set of behaviors shared across the
//! workspace: validation of declarative configuration, JSON persistence
//! for scripts and config sources, and naming for display purposes.

use crate::error::StudioResult;
use serde::{Serialize, de::DeserializeOwned};

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `StudioError` describing the problem.
    fn validate(&self) -> StudioResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// Persistable Trait
// ============================================================================

/// Trait for types that can be serialized to and deserialized from files
///
/// Used for symbol-type configuration sources and declarative test scripts,
/// which are JSON documents on disk.
pub trait Persistable: Serialize + DeserializeOwned + Sized {
    /// Get the file extension for this type (without the dot)
    fn file_extension() -> &'static str;

    /// Save to a JSON string
    fn to_json(&self) -> StudioResult<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }

    /// Load from a JSON string
    fn from_json(json: &str) -> StudioResult<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Save to a file
    fn save_to_file(&self, path: &std::path::Path) -> StudioResult<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| crate::error::StudioError::FileWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load from a file
    fn load_from_file(path: &std::path::Path) -> StudioResult<Self> {
        let json =
            std::fs::read_to_string(path).map_err(|e| crate::error::StudioError::FileRead {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Self::from_json(&json)
    }
}

// ============================================================================
// Named Trait
// ============================================================================

/// Trait for types that have a human-readable name
pub trait Named {
    /// Get the name
    fn name(&self) -> &str;

    /// Set the name
    fn set_name(&mut self, name: String);

    /// Check if the name matches (case-insensitive)
    fn name_matches(&self, other: &str) -> bool {
        self.name().eq_ignore_ascii_case(other)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    struct TestValidatable {
        valid: bool,
    }

    impl Validatable for TestValidatable {
        fn validate(&self) -> StudioResult<()> {
            if self.valid {
                Ok(())
            } else {
                Err(crate::error::StudioError::validation("Invalid state"))
            }
        }
    }

    #[test]
    fn test_validatable_trait() {
        let valid = TestValidatable { valid: true };
        assert!(valid.is_valid());
        assert!(valid.validation_errors().is_empty());

        let invalid = TestValidatable { valid: false };
        assert!(!invalid.is_valid());
        assert!(!invalid.validation_errors().is_empty());
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct TestDoc {
        name: String,
        count: u32,
    }

    impl Persistable for TestDoc {
        fn file_extension() -> &'static str {
            "json"
        }
    }

    #[test]
    fn test_persistable_json_round_trip() {
        let doc = TestDoc {
            name: "roads".to_string(),
            count: 3,
        };
        let json = doc.to_json().unwrap();
        let back = TestDoc::from_json(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_persistable_rejects_bad_json() {
        assert!(TestDoc::from_json("{not json").is_err());
    }

    struct TestNamed {
        name: String,
    }

    impl Named for TestNamed {
        fn name(&self) -> &str {
            &self.name
        }

        fn set_name(&mut self, name: String) {
            self.name = name;
        }
    }

    #[test]
    fn test_named_trait() {
        let mut item = TestNamed {
            name: "Roads".to_string(),
        };
        assert!(item.name_matches("roads"));
        item.set_name("Rivers".to_string());
        assert_eq!(item.name(), "Rivers");
    }
}
