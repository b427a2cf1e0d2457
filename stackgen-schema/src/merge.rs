//! Merging of partial schema documents.
//!
//! Documents are folded left to right. Types present in several documents
//! are combined member by member; on a name collision the earlier document's
//! descriptor is kept as is.

use crate::error::SchemaError;
use crate::types::{Schema, TypeInfo};
use std::collections::BTreeMap;

/// Merges an ordered sequence of schema documents into one schema.
///
/// # Arguments
/// * `documents` - Schemas in precedence order (earlier wins on collision)
///
/// # Errors
/// Returns `SchemaError::EmptyInput` if `documents` is empty.
pub fn merge<I>(documents: I) -> Result<Schema, SchemaError>
where
    I: IntoIterator<Item = Schema>,
{
    let mut documents = documents.into_iter();
    let first = documents.next().ok_or(SchemaError::EmptyInput)?;

    let merged = documents.enumerate().fold(first, |acc, (index, next)| {
        tracing::debug!(
            "merging document {} ({} types) into {} types",
            index + 1,
            next.len(),
            acc.len()
        );
        acc.merge(next)
    });

    Ok(merged)
}

impl Schema {
    /// Combines two schemas, keeping `self`'s descriptors on collision.
    #[must_use]
    pub fn merge(self, other: Schema) -> Schema {
        Schema {
            resource_types: merge_maps(self.resource_types, other.resource_types, TypeInfo::merge),
            property_types: merge_maps(self.property_types, other.property_types, TypeInfo::merge),
        }
    }
}

impl TypeInfo {
    /// Combines two descriptors of the same type.
    ///
    /// Fields and attributes are unioned; on a name collision `self` wins.
    #[must_use]
    pub fn merge(self, other: TypeInfo) -> TypeInfo {
        TypeInfo {
            properties: merge_maps(self.properties, other.properties, keep_left),
            attributes: merge_maps(self.attributes, other.attributes, keep_left),
            documentation: self.documentation.or(other.documentation),
        }
    }
}

/// Unions two maps, combining values present on both sides with `combine`.
fn merge_maps<V>(
    mut left: BTreeMap<String, V>,
    right: BTreeMap<String, V>,
    combine: impl Fn(V, V) -> V,
) -> BTreeMap<String, V> {
    for (key, value) in right {
        let merged = match left.remove(&key) {
            Some(existing) => combine(existing, value),
            None => value,
        };
        left.insert(key, merged);
    }
    left
}

fn keep_left<V>(left: V, _right: V) -> V {
    left
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attribute, Field};

    fn resource(name: &str, info: TypeInfo) -> Schema {
        let mut schema = Schema::new();
        schema.add_resource_type(name, info);
        schema
    }

    fn property(name: &str, info: TypeInfo) -> Schema {
        let mut schema = Schema::new();
        schema.add_property_type(name, info);
        schema
    }

    #[test]
    fn test_merge_empty_input() {
        assert_eq!(merge(Vec::new()), Err(SchemaError::EmptyInput));
    }

    #[test]
    fn test_merge_single_is_identity() {
        let schema = resource(
            "R",
            TypeInfo::new()
                .with_field("p", Field::primitive("String").required(true))
                .with_attribute("Arn", Attribute::primitive("String")),
        );
        assert_eq!(merge(vec![schema.clone()]), Ok(schema));
    }

    #[test]
    fn test_merge_left_wins_on_collision() {
        let a = resource(
            "R",
            TypeInfo::new().with_field("p", Field::primitive("String").required(true)),
        );
        let b = resource(
            "R",
            TypeInfo::new().with_field("p", Field::primitive("String").required(false)),
        );

        let merged = merge(vec![a.clone(), b.clone()]).expect("merge failed");
        assert!(merged.resource_types["R"].properties["p"].required);

        let reversed = merge(vec![b, a]).expect("merge failed");
        assert!(!reversed.resource_types["R"].properties["p"].required);
    }

    #[test]
    fn test_merge_no_deep_reconciliation() {
        let a = property("P", TypeInfo::new().with_field("x", Field::primitive("String")));
        let b = property(
            "P",
            TypeInfo::new().with_field("x", Field::list_of("Other").required(true)),
        );

        let merged = merge(vec![a, b]).expect("merge failed");
        assert_eq!(merged.property_types["P"].properties["x"], Field::primitive("String"));
    }

    #[test]
    fn test_merge_key_union() {
        let a = resource("A", TypeInfo::new());
        let b = resource("B", TypeInfo::new());
        let merged = merge(vec![a, b]).expect("merge failed");
        assert!(merged.resource_types.contains_key("A"));
        assert!(merged.resource_types.contains_key("B"));
    }

    #[test]
    fn test_merge_field_union_within_type() {
        let a = property("P", TypeInfo::new().with_field("x", Field::primitive("String")));
        let b = property("P", TypeInfo::new().with_field("y", Field::primitive("Long")));
        let merged = merge(vec![a, b]).expect("merge failed");
        let fields: Vec<_> = merged.property_types["P"].properties.keys().cloned().collect();
        assert_eq!(fields, vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_merge_sections_are_independent() {
        let a = resource("T", TypeInfo::new().with_field("r", Field::primitive("String")));
        let b = property("T", TypeInfo::new().with_field("p", Field::primitive("String")));
        let merged = merge(vec![a, b]).expect("merge failed");
        assert!(merged.resource_types["T"].properties.contains_key("r"));
        assert!(!merged.resource_types["T"].properties.contains_key("p"));
        assert!(merged.property_types["T"].properties.contains_key("p"));
    }

    #[test]
    fn test_merge_keeps_attributes_from_later_documents() {
        let a = resource(
            "R",
            TypeInfo::new().with_attribute("Arn", Attribute::primitive("String")),
        );
        let b = resource(
            "R",
            TypeInfo::new()
                .with_attribute("Arn", Attribute::primitive("Integer"))
                .with_attribute("Id", Attribute::primitive("String")),
        );
        let merged = merge(vec![a, b]).expect("merge failed");
        let attributes = &merged.resource_types["R"].attributes;
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes["Arn"], Attribute::primitive("String"));
        assert!(attributes.contains_key("Id"));
    }

    #[test]
    fn test_merge_is_left_fold() {
        let a = property("P", TypeInfo::new().with_field("x", Field::primitive("A")));
        let b = property(
            "P",
            TypeInfo::new()
                .with_field("x", Field::primitive("B"))
                .with_field("y", Field::primitive("B")),
        );
        let c = property(
            "P",
            TypeInfo::new()
                .with_field("y", Field::primitive("C"))
                .with_field("z", Field::primitive("C")),
        );

        let merged = merge(vec![a, b, c]).expect("merge failed");
        let fields = &merged.property_types["P"].properties;
        assert_eq!(fields["x"], Field::primitive("A"));
        assert_eq!(fields["y"], Field::primitive("B"));
        assert_eq!(fields["z"], Field::primitive("C"));
    }

    #[test]
    fn test_merge_documentation_prefers_left() {
        let a = property("P", TypeInfo::new());
        let b = property("P", TypeInfo::new().with_documentation("http://b"));
        let merged = merge(vec![a, b]).expect("merge failed");
        assert_eq!(merged.property_types["P"].documentation.as_deref(), Some("http://b"));
    }
}
