//! Error types for code generation.

use stackgen_schema::ResolveError;
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema parsing error.
    #[error("schema parse error: {0}")]
    Parse(#[from] stackgen_schema::ParseError),

    /// Schema merge or validation error.
    #[error("schema error: {0}")]
    Schema(#[from] stackgen_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A field type could not be resolved.
    #[error("cannot resolve field '{field}' of '{type_name}': {source}")]
    Resolve {
        /// Type declaring the field.
        type_name: String,
        /// Field name.
        field: String,
        /// Underlying resolution failure.
        source: ResolveError,
    },

    /// Two schema types map to the same generated item.
    #[error("'{first}' and '{second}' both generate '{path}'")]
    ArtifactCollision {
        /// First type, by name order.
        first: String,
        /// Second type.
        second: String,
        /// Colliding module path and item name.
        path: String,
    },

    /// Two fields of one type map to the same member name.
    #[error("fields '{first}' and '{second}' of '{type_name}' both generate member '{member}'")]
    MemberCollision {
        /// Type declaring the fields.
        type_name: String,
        /// First field.
        first: String,
        /// Second field.
        second: String,
        /// Colliding member name.
        member: String,
    },

    /// A name cannot be turned into a Rust identifier.
    #[error("'{name}' is not a valid identifier")]
    InvalidIdentifier {
        /// Offending name.
        name: String,
    },

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates a resolution error for a field.
    pub fn resolve(
        type_name: impl Into<String>,
        field: impl Into<String>,
        source: ResolveError,
    ) -> Self {
        Self::Resolve {
            type_name: type_name.into(),
            field: field.into(),
            source,
        }
    }

    /// Creates an invalid identifier error.
    pub fn invalid_identifier(name: impl Into<String>) -> Self {
        Self::InvalidIdentifier { name: name.into() }
    }
}
