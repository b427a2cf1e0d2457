//! Error types for stackgen runtime operations.

use thiserror::Error;

/// Core error type for template operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A resource with the same logical name is already registered.
    #[error("logical name '{logical_name}' already registered for {existing_type}")]
    DuplicateLogicalName {
        /// Conflicting logical name.
        logical_name: String,
        /// Resource type already holding the name.
        existing_type: String,
    },

    /// Logical names must not be empty.
    #[error("empty logical name for resource type {resource_type}")]
    EmptyLogicalName {
        /// Resource type being registered.
        resource_type: String,
    },
}

/// Result type alias for stackgen runtime operations.
pub type Result<T> = std::result::Result<T, Error>;
