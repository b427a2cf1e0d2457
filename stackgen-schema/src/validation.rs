//! Schema validation utilities.
//!
//! This module checks a merged schema before emission so that malformed
//! descriptors are reported with their full path instead of surfacing midway
//! through code generation.

use crate::error::SchemaError;
use crate::types::{Schema, TypeInfo, name_segments};

/// Validates a merged schema.
///
/// # Arguments
/// * `schema` - The schema to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the first issue.
///
/// # Errors
/// Returns `SchemaError` if a type name is malformed or a field sets no shape.
pub fn validate_schema(schema: &Schema) -> Result<(), SchemaError> {
    for (name, info) in schema
        .property_types
        .iter()
        .chain(schema.resource_types.iter())
    {
        validate_type_name(name)?;
        validate_fields(name, info)?;
    }
    Ok(())
}

/// Validates that every segment of a type name is non-empty.
fn validate_type_name(name: &str) -> Result<(), SchemaError> {
    if name_segments(name).iter().any(|segment| segment.is_empty()) {
        return Err(SchemaError::InvalidTypeName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Validates the field descriptors of one type.
fn validate_fields(type_name: &str, info: &TypeInfo) -> Result<(), SchemaError> {
    for (field_name, field) in &info.properties {
        match field.shape_count() {
            0 => return Err(SchemaError::malformed(type_name, field_name)),
            1 => {}
            _ => tracing::warn!(
                "field '{}' of '{}' sets several shapes, the first by priority is used",
                field_name,
                type_name
            ),
        }
    }
    Ok(())
}
