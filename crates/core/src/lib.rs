//! # Meridian Core
//!
//! Core types, traits, and error handling for Meridian Studio.
//!
//! This crate provides the foundational building blocks used throughout
//! the Meridian Studio workspace, including:
//!
//! - **Types**: panel and field identifiers, the typed value sum
//! - **Traits**: common behaviors like `Validatable` and `Persistable`
//! - **Errors**: unified error handling with `StudioError` and `StudioResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{ResultExt, StudioError, StudioResult};
pub use traits::{Named, Persistable, Validatable};
pub use types::{FieldKey, PanelKind, StyleValue, ValueType, is_valid_colour};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
