//! Schema document parser.
//!
//! This module reads JSON resource specification documents into the
//! [`Schema`] model. Descriptor keys (`PrimitiveType`, `Required`, ...) are
//! matched case-insensitively; type, field and attribute names are kept
//! verbatim.

use crate::error::ParseError;
use crate::types::{Attribute, Field, Schema, TypeInfo, TypeKind};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Parses a schema document from a JSON string.
///
/// # Arguments
/// * `json` - Document content
///
/// # Returns
/// Parsed schema or parse error.
///
/// # Errors
/// Returns `ParseError` if the JSON is malformed or a section has the wrong shape.
pub fn parse_schema(json: &str) -> Result<Schema, ParseError> {
    let root: Value = serde_json::from_str(json)?;
    let Value::Object(root) = root else {
        return Err(ParseError::invalid_structure(
            "document root must be an object",
        ));
    };

    let mut schema = Schema::new();
    for (key, section) in &root {
        match key.to_ascii_lowercase().as_str() {
            // Single-resource documents use the singular key.
            "resourcetypes" | "resourcetype" => {
                parse_section(&mut schema, TypeKind::Resource, key, section)?;
            }
            "propertytypes" => {
                parse_section(&mut schema, TypeKind::Property, key, section)?;
            }
            "resourcespecificationversion" => {}
            _ => tracing::warn!("ignoring unknown document section '{}'", key),
        }
    }

    tracing::debug!(
        "parsed document with {} resource and {} property types",
        schema.resource_types.len(),
        schema.property_types.len()
    );
    Ok(schema)
}

/// Parses a schema document from a file.
///
/// # Errors
/// Returns `ParseError` if reading or parsing fails.
pub fn parse_schema_file(path: &Path) -> Result<Schema, ParseError> {
    let json = std::fs::read_to_string(path)?;
    parse_schema(&json)
}

/// Parses a `ResourceTypes` or `PropertyTypes` section.
fn parse_section(
    schema: &mut Schema,
    kind: TypeKind,
    key: &str,
    section: &Value,
) -> Result<(), ParseError> {
    let types = as_object(section, key)?;
    for (name, descriptor) in types {
        let path = format!("{key}/{name}");
        let info = parse_type(descriptor, &path)?;
        match kind {
            TypeKind::Resource => schema.add_resource_type(name.clone(), info),
            TypeKind::Property => schema.add_property_type(name.clone(), info),
        }
    }
    Ok(())
}

/// Parses one type descriptor.
fn parse_type(descriptor: &Value, path: &str) -> Result<TypeInfo, ParseError> {
    let mut info = TypeInfo::new();

    for (key, value) in as_object(descriptor, path)? {
        match key.to_ascii_lowercase().as_str() {
            "properties" => {
                for (name, field) in as_object(value, &format!("{path}/{key}"))? {
                    let field_path = format!("{path}/{key}/{name}");
                    let doc: FieldDoc = from_folded(field, &field_path)?;
                    info.properties.insert(name.clone(), doc.into());
                }
            }
            "attributes" => {
                for (name, attribute) in as_object(value, &format!("{path}/{key}"))? {
                    let attribute_path = format!("{path}/{key}/{name}");
                    let doc: AttributeDoc = from_folded(attribute, &attribute_path)?;
                    info.attributes.insert(name.clone(), doc.into());
                }
            }
            "documentation" => {
                info.documentation = value.as_str().map(str::to_string);
            }
            _ => {}
        }
    }

    Ok(info)
}

/// Deserializes a descriptor after lower-casing its keys.
fn from_folded<T: for<'de> Deserialize<'de>>(value: &Value, path: &str) -> Result<T, ParseError> {
    let folded: Map<String, Value> = as_object(value, path)?
        .iter()
        .map(|(key, value)| (key.to_ascii_lowercase(), value.clone()))
        .collect();
    serde_json::from_value(Value::Object(folded))
        .map_err(|e| ParseError::invalid_descriptor(path, e.to_string()))
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ParseError> {
    value
        .as_object()
        .ok_or_else(|| ParseError::invalid_descriptor(path, "expected an object"))
}

/// Field descriptor as written in a document (keys lower-cased).
#[derive(Debug, Deserialize)]
struct FieldDoc {
    #[serde(default)]
    required: bool,
    #[serde(rename = "primitivetype")]
    primitive_type: Option<String>,
    #[serde(rename = "primitiveitemtype")]
    primitive_item_type: Option<String>,
    #[serde(rename = "itemtype")]
    item_type: Option<String>,
    #[serde(rename = "type")]
    type_name: Option<String>,
    documentation: Option<String>,
}

impl From<FieldDoc> for Field {
    fn from(doc: FieldDoc) -> Self {
        Self {
            required: doc.required,
            primitive_type: non_empty(doc.primitive_type),
            primitive_item_type: non_empty(doc.primitive_item_type),
            item_type: non_empty(doc.item_type),
            type_name: non_empty(doc.type_name),
            documentation: doc.documentation,
        }
    }
}

/// Attribute descriptor as written in a document (keys lower-cased).
#[derive(Debug, Deserialize)]
struct AttributeDoc {
    #[serde(rename = "primitivetype")]
    primitive_type: Option<String>,
    #[serde(rename = "primitiveitemtype")]
    primitive_item_type: Option<String>,
    #[serde(rename = "type")]
    type_name: Option<String>,
}

impl From<AttributeDoc> for Attribute {
    fn from(doc: AttributeDoc) -> Self {
        Self {
            primitive_type: non_empty(doc.primitive_type),
            primitive_item_type: non_empty(doc.primitive_item_type),
            type_name: non_empty(doc.type_name),
        }
    }
}

/// Empty strings count as unset, matching how the shape priority treats them.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "ResourceSpecificationVersion": "1.0.0",
        "PropertyTypes": {
            "AWS::EC2::Instance.SomeProperty": {
                "Documentation": "http://docs/some-property",
                "Properties": {
                    "PropOne": { "PrimitiveType": "String", "Required": true },
                    "PropTwo": { "ItemType": "SomeSubProperty", "Type": "List", "Required": false }
                }
            },
            "AWS::EC2::Instance.SomeSubProperty": {
                "Properties": {
                    "Tags": { "PrimitiveItemType": "String", "Type": "Map" }
                }
            }
        },
        "ResourceTypes": {
            "AWS::EC2::Instance": {
                "Attributes": {
                    "PrivateIp": { "PrimitiveType": "String" }
                },
                "Properties": {
                    "Prop": { "Type": "SomeProperty", "Required": true }
                }
            }
        }
    }"#;

    #[test]
    fn test_parse_sections() {
        let schema = parse_schema(DOCUMENT).expect("Failed to parse");
        assert_eq!(schema.property_types.len(), 2);
        assert_eq!(schema.resource_types.len(), 1);

        let some = &schema.property_types["AWS::EC2::Instance.SomeProperty"];
        assert_eq!(some.documentation.as_deref(), Some("http://docs/some-property"));
        assert_eq!(some.properties["PropOne"], Field::primitive("String").required(true));
        assert_eq!(some.properties["PropTwo"], Field::list_of("SomeSubProperty"));
    }

    #[test]
    fn test_parse_attributes() {
        let schema = parse_schema(DOCUMENT).expect("Failed to parse");
        let instance = &schema.resource_types["AWS::EC2::Instance"];
        assert_eq!(
            instance.attributes["PrivateIp"],
            Attribute::primitive("String")
        );
        assert_eq!(instance.properties["Prop"], Field::nested("SomeProperty").required(true));
    }

    #[test]
    fn test_parse_keys_case_insensitive() {
        let json = r#"{
            "propertytypes": {
                "Custom::Thing.Part": {
                    "PROPERTIES": {
                        "Size": { "primitivetype": "Integer", "REQUIRED": true },
                        "Labels": { "primitiveItemType": "String", "type": "map" }
                    }
                }
            }
        }"#;
        let schema = parse_schema(json).expect("Failed to parse");
        let part = &schema.property_types["Custom::Thing.Part"];
        assert_eq!(part.properties["Size"], Field::primitive("Integer").required(true));
        assert!(part.properties["Labels"].is_map());
        assert_eq!(part.properties["Labels"].primitive_item_type.as_deref(), Some("String"));
    }

    #[test]
    fn test_parse_names_kept_verbatim() {
        let json = r#"{ "PropertyTypes": { "Aws::Mixed.Case": { "Properties": { "fooBar": { "PrimitiveType": "String" } } } } }"#;
        let schema = parse_schema(json).expect("Failed to parse");
        assert!(schema.property_types["Aws::Mixed.Case"].properties.contains_key("fooBar"));
    }

    #[test]
    fn test_parse_missing_sections_are_empty() {
        let schema = parse_schema("{}").expect("Failed to parse");
        assert!(schema.is_empty());
    }

    #[test]
    fn test_parse_empty_strings_are_unset() {
        let json = r#"{ "PropertyTypes": { "A::B.C": { "Properties": { "X": { "PrimitiveType": "", "Type": "D" } } } } }"#;
        let schema = parse_schema(json).expect("Failed to parse");
        assert_eq!(schema.property_types["A::B.C"].properties["X"], Field::nested("D"));
    }

    #[test]
    fn test_parse_rejects_non_object_root() {
        let err = parse_schema("[]").unwrap_err();
        assert!(matches!(err, ParseError::InvalidStructure { .. }));
    }

    #[test]
    fn test_parse_rejects_bad_descriptor() {
        let json = r#"{ "PropertyTypes": { "A::B.C": { "Properties": { "X": { "Required": "yes" } } } } }"#;
        let err = parse_schema(json).unwrap_err();
        match err {
            ParseError::InvalidDescriptor { path, .. } => {
                assert_eq!(path, "PropertyTypes/A::B.C/Properties/X");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(parse_schema("{"), Err(ParseError::Json(_))));
    }

    #[test]
    fn test_parse_schema_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{ "ResourceTypes": { "AWS::SNS::Topic": {} } }"#)
            .expect("Failed to write");

        let schema = parse_schema_file(&path).expect("parse failed");
        assert!(schema.resource_types.contains_key("AWS::SNS::Topic"));
        assert!(schema.property_types.is_empty());

        let missing = parse_schema_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, ParseError::Io(_)));
    }
}
