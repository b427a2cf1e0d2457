//! Schema model definitions.
//!
//! This module contains the data structures representing a resource
//! catalogue: resource and property types, their fields and attributes.

use std::collections::BTreeMap;

/// Complete schema: resource and property types keyed by fully qualified name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// Resource types (instances carry a logical name).
    pub resource_types: BTreeMap<String, TypeInfo>,
    /// Property types (nested value types).
    pub property_types: BTreeMap<String, TypeInfo>,
}

impl Schema {
    /// Creates a new empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource type, replacing any previous definition.
    pub fn add_resource_type(&mut self, name: impl Into<String>, info: TypeInfo) {
        self.resource_types.insert(name.into(), info);
    }

    /// Adds a property type, replacing any previous definition.
    pub fn add_property_type(&mut self, name: impl Into<String>, info: TypeInfo) {
        self.property_types.insert(name.into(), info);
    }

    /// Looks up a type by fully qualified name.
    ///
    /// A property type shadows a resource type of the same name, matching
    /// how nested references are resolved.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<(TypeKind, &TypeInfo)> {
        self.property_types
            .get(name)
            .map(|info| (TypeKind::Property, info))
            .or_else(|| {
                self.resource_types
                    .get(name)
                    .map(|info| (TypeKind::Resource, info))
            })
    }

    /// Returns true if a type with the given name exists.
    #[must_use]
    pub fn has_type(&self, name: &str) -> bool {
        self.resource_types.contains_key(name) || self.property_types.contains_key(name)
    }

    /// Iterates over all known type names (properties, then resources).
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.property_types
            .keys()
            .chain(self.resource_types.keys())
            .map(String::as_str)
    }

    /// Returns the total number of types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resource_types.len() + self.property_types.len()
    }

    /// Returns true if the schema declares no types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resource_types.is_empty() && self.property_types.is_empty()
    }
}

/// Which section of the schema a type was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Declared under `ResourceTypes`.
    Resource,
    /// Declared under `PropertyTypes`.
    Property,
}

impl TypeKind {
    /// Returns true for resource types.
    #[must_use]
    pub const fn is_resource(&self) -> bool {
        matches!(self, Self::Resource)
    }
}

/// Field and attribute descriptors of one type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeInfo {
    /// Fields keyed by name.
    pub properties: BTreeMap<String, Field>,
    /// Attributes keyed by name (resource types only).
    pub attributes: BTreeMap<String, Attribute>,
    /// Documentation URL.
    pub documentation: Option<String>,
}

impl TypeInfo {
    /// Creates an empty type.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.properties.insert(name.into(), field);
        self
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    /// Sets the documentation URL.
    #[must_use]
    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }
}

/// Field descriptor.
///
/// Exactly one of `primitive_type`, `primitive_item_type`, `item_type` or
/// `type_name` is expected to describe the shape. `type_name` holds the raw
/// `Type` key, which is either a nested type name or, next to an item type,
/// the collection kind (`List` or `Map`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
    /// Whether the member must be supplied.
    pub required: bool,
    /// Scalar kind of a single value.
    pub primitive_type: Option<String>,
    /// Scalar kind of collection elements.
    pub primitive_item_type: Option<String>,
    /// Nested type name of collection elements.
    pub item_type: Option<String>,
    /// Nested type name, or the collection kind marker.
    pub type_name: Option<String>,
    /// Documentation URL.
    pub documentation: Option<String>,
}

impl Field {
    /// Creates a scalar field.
    #[must_use]
    pub fn primitive(kind: impl Into<String>) -> Self {
        Self {
            primitive_type: Some(kind.into()),
            ..Self::default()
        }
    }

    /// Creates a list of scalars.
    #[must_use]
    pub fn primitive_list(kind: impl Into<String>) -> Self {
        Self {
            primitive_item_type: Some(kind.into()),
            type_name: Some("List".to_string()),
            ..Self::default()
        }
    }

    /// Creates a string-keyed map of scalars.
    #[must_use]
    pub fn primitive_map(kind: impl Into<String>) -> Self {
        Self {
            primitive_item_type: Some(kind.into()),
            type_name: Some("Map".to_string()),
            ..Self::default()
        }
    }

    /// Creates a list of nested types.
    #[must_use]
    pub fn list_of(item_type: impl Into<String>) -> Self {
        Self {
            item_type: Some(item_type.into()),
            type_name: Some("List".to_string()),
            ..Self::default()
        }
    }

    /// Creates a single nested type.
    #[must_use]
    pub fn nested(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Self::default()
        }
    }

    /// Sets the required flag.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Returns true if the collection kind marker is `Map`.
    #[must_use]
    pub fn is_map(&self) -> bool {
        self.type_name
            .as_deref()
            .is_some_and(|kind| kind.eq_ignore_ascii_case("map"))
    }

    /// Number of shape descriptors set; a well-formed field has one.
    ///
    /// The collection kind marker is not counted when an item type is set.
    #[must_use]
    pub fn shape_count(&self) -> usize {
        let collection = self.primitive_item_type.is_some() || self.item_type.is_some();
        [
            self.primitive_type.is_some(),
            self.primitive_item_type.is_some(),
            self.item_type.is_some(),
            self.type_name.is_some() && !collection,
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }
}

/// Attribute descriptor.
///
/// The scalar kind is advisory; accessors are always string valued.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attribute {
    /// Scalar kind of the attribute.
    pub primitive_type: Option<String>,
    /// Scalar kind of list elements.
    pub primitive_item_type: Option<String>,
    /// Collection kind marker.
    pub type_name: Option<String>,
}

impl Attribute {
    /// Creates a scalar attribute.
    #[must_use]
    pub fn primitive(kind: impl Into<String>) -> Self {
        Self {
            primitive_type: Some(kind.into()),
            ..Self::default()
        }
    }
}

/// Splits a fully qualified type name on `::` and `.`.
///
/// `AWS::EC2::Instance.Ebs` yields `["AWS", "EC2", "Instance", "Ebs"]`.
#[must_use]
pub fn name_segments(name: &str) -> Vec<&str> {
    name.split("::").flat_map(|part| part.split('.')).collect()
}

/// Returns the final segment of a type name.
#[must_use]
pub fn short_name(name: &str) -> &str {
    let tail = name.rsplit("::").next().unwrap_or(name);
    tail.rsplit('.').next().unwrap_or(tail)
}

/// Returns the owning namespace of a type name: everything before the first `.`.
///
/// Property types are named after their owning resource
/// (`AWS::EC2::Instance.Ebs` is owned by `AWS::EC2::Instance`); resource
/// types own themselves.
#[must_use]
pub fn owner_namespace(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}
