//! Error types for schema parsing, merging and resolution.

use thiserror::Error;

/// Error type for schema document parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON syntax error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A section or descriptor has the wrong shape.
    #[error("invalid descriptor at '{path}': {message}")]
    InvalidDescriptor {
        /// Location of the descriptor (`PropertyTypes/AWS::S3::Bucket.Rule/Properties/Id`).
        path: String,
        /// Error message.
        message: String,
    },

    /// Invalid document structure.
    #[error("invalid document structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for merging and validating schemas.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Merge invoked without documents.
    #[error("no schema documents to merge")]
    EmptyInput,

    /// A field descriptor sets no shape.
    #[error(
        "malformed descriptor for field '{field}' of '{type_name}': none of PrimitiveType, PrimitiveItemType, ItemType or Type is set"
    )]
    MalformedPropertyDescriptor {
        /// Owning type name.
        type_name: String,
        /// Field name.
        field: String,
    },

    /// A type name has an empty segment.
    #[error("invalid type name '{name}'")]
    InvalidTypeName {
        /// The offending name.
        name: String,
    },
}

/// Error type for resolving a single field to a type reference.
///
/// Carries no location; callers attach the type and field path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// Referenced type is not declared.
    #[error("unresolved type reference '{type_name}'")]
    UnresolvedTypeReference {
        /// Requested name.
        type_name: String,
    },

    /// Several declared types match the short name.
    #[error("ambiguous type reference '{type_name}', candidates: {}", candidates.join(", "))]
    AmbiguousTypeReference {
        /// Requested name.
        type_name: String,
        /// Matching fully qualified names.
        candidates: Vec<String>,
    },

    /// The descriptor sets no shape.
    #[error("malformed property descriptor")]
    MalformedPropertyDescriptor,
}

impl ParseError {
    /// Creates an invalid descriptor error.
    pub fn invalid_descriptor(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid structure error.
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}

impl SchemaError {
    /// Creates a malformed descriptor error.
    pub fn malformed(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MalformedPropertyDescriptor {
            type_name: type_name.into(),
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_display_lists_candidates() {
        let err = ResolveError::AmbiguousTypeReference {
            type_name: "Foo".to_string(),
            candidates: vec!["A::B.Foo".to_string(), "C::D.Foo".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "ambiguous type reference 'Foo', candidates: A::B.Foo, C::D.Foo"
        );
    }

    #[test]
    fn test_malformed_display_names_path() {
        let err = SchemaError::malformed("AWS::S3::Bucket", "Name");
        let msg = err.to_string();
        assert!(msg.contains("'Name'"));
        assert!(msg.contains("'AWS::S3::Bucket'"));
    }
}
