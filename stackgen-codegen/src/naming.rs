//! Naming rules for generated items.
//!
//! Type names are split into a module path and a class name; field and
//! attribute names become snake_case member names. Fields are ordered with
//! [`required_first`] everywhere a parameter list is produced.

use crate::config::GeneratorConfig;
use heck::ToSnakeCase;
use stackgen_schema::{Field, TypeKind, name_segments};
use std::cmp::Ordering;

/// Rust keywords that may be used as raw identifiers.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const PATH_KEYWORDS: &[&str] = &["self", "Self", "super", "crate"];

/// Builder methods a setter must not shadow.
const BUILDER_METHODS: &[&str] = &["new", "build"];

/// Module path and class name of a generated type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypePath {
    /// Root module (`resource` or `property` by default).
    pub root: String,
    /// Lower-cased namespace segments below the root.
    pub namespace: Vec<String>,
    /// Final segment of the type name.
    pub class_name: String,
}

impl TypePath {
    /// Derives the path of a schema type.
    ///
    /// The final segment becomes the class name; the remaining segments are
    /// lower-cased. Property namespaces drop a leading vendor segment.
    /// Resource types sit directly under the resource root unless
    /// `qualify_resource_namespaces` is set.
    #[must_use]
    pub fn derive(type_name: &str, kind: TypeKind, config: &GeneratorConfig) -> Self {
        let segments = name_segments(type_name);
        let (class_name, rest) = match segments.split_last() {
            Some((last, rest)) => (last.to_string(), rest),
            None => (type_name.to_string(), &[][..]),
        };

        let mut namespace: Vec<String> = rest.iter().map(|s| s.to_lowercase()).collect();
        let qualified = match kind {
            TypeKind::Property => true,
            TypeKind::Resource => config.qualify_resource_namespaces,
        };
        if qualified {
            strip_vendor(&mut namespace, config.vendor_prefix.as_deref());
        } else {
            namespace.clear();
        }

        let root = match kind {
            TypeKind::Resource => config.resource_root.clone(),
            TypeKind::Property => config.property_root.clone(),
        };

        Self {
            root,
            namespace,
            class_name,
        }
    }

    /// Namespace below the root, dot separated (`ec2.instance`).
    #[must_use]
    pub fn namespace_path(&self) -> String {
        self.namespace.join(".")
    }

    /// Full module path including the root.
    #[must_use]
    pub fn module_path(&self) -> Vec<String> {
        std::iter::once(self.root.clone())
            .chain(self.namespace.iter().cloned())
            .collect()
    }

    /// Name of the builder type.
    #[must_use]
    pub fn builder_name(&self) -> String {
        format!("{}Builder", self.class_name)
    }

    /// Name of the DSL helper function.
    #[must_use]
    pub fn helper_name(&self) -> String {
        member_name(&self.class_name)
    }
}

fn strip_vendor(namespace: &mut Vec<String>, vendor: Option<&str>) {
    if let (Some(vendor), Some(first)) = (vendor, namespace.first())
        && first.eq_ignore_ascii_case(vendor)
    {
        namespace.remove(0);
    }
}

/// Converts a schema field or attribute name to a member name.
///
/// Dots are dropped (`Endpoint.Address` becomes `endpoint_address`) and
/// names that cannot be raw identifiers get a trailing underscore.
#[must_use]
pub fn member_name(name: &str) -> String {
    let snake = name.replace('.', "").to_snake_case();
    if PATH_KEYWORDS.contains(&snake.as_str()) {
        format!("{snake}_")
    } else {
        snake
    }
}

/// Name of the primary setter for a member.
#[must_use]
pub fn setter_name(member: &str) -> String {
    if BUILDER_METHODS.contains(&member) {
        format!("{member}_")
    } else {
        member.to_string()
    }
}

/// Returns true if `name` is a keyword usable as a raw identifier.
#[must_use]
pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Returns true if `name` can never be an identifier, raw or not.
#[must_use]
pub fn is_path_keyword(name: &str) -> bool {
    PATH_KEYWORDS.contains(&name)
}

/// Orders fields required first, then by name.
///
/// This single ordering drives field declarations, the full constructor,
/// the builder constructor and the factory parameters.
#[must_use]
pub fn required_first(a: (&String, &Field), b: (&String, &Field)) -> Ordering {
    b.1.required
        .cmp(&a.1.required)
        .then_with(|| a.0.cmp(b.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_namespace_strips_vendor() {
        let config = GeneratorConfig::default();
        let path = TypePath::derive("AWS::EC2::Instance.SomeProperty", TypeKind::Property, &config);
        assert_eq!(path.namespace_path(), "ec2.instance");
        assert_eq!(path.class_name, "SomeProperty");
        assert_eq!(path.module_path(), vec!["property", "ec2", "instance"]);
    }

    #[test]
    fn test_property_namespace_vendor_case_insensitive() {
        let config = GeneratorConfig::default();
        let path = TypePath::derive("Aws::EC2::Instance.Ebs", TypeKind::Property, &config);
        assert_eq!(path.namespace_path(), "ec2.instance");
    }

    #[test]
    fn test_property_namespace_other_vendor_kept() {
        let config = GeneratorConfig::default();
        let path = TypePath::derive("Alexa::Something::Else", TypeKind::Property, &config);
        assert_eq!(path.namespace_path(), "alexa.something");
        assert_eq!(path.class_name, "Else");
    }

    #[test]
    fn test_resource_is_flat_by_default() {
        let config = GeneratorConfig::default();
        let path = TypePath::derive("AWS::EC2::Instance", TypeKind::Resource, &config);
        assert!(path.namespace.is_empty());
        assert_eq!(path.root, "resource");
        assert_eq!(path.class_name, "Instance");
    }

    #[test]
    fn test_resource_qualified_namespace() {
        let config = GeneratorConfig {
            qualify_resource_namespaces: true,
            ..GeneratorConfig::default()
        };
        let path = TypePath::derive("AWS::EC2::Instance", TypeKind::Resource, &config);
        assert_eq!(path.module_path(), vec!["resource", "ec2"]);
    }

    #[test]
    fn test_unqualified_type_name() {
        let config = GeneratorConfig::default();
        let path = TypePath::derive("Tag", TypeKind::Property, &config);
        assert!(path.namespace.is_empty());
        assert_eq!(path.class_name, "Tag");
        assert_eq!(path.builder_name(), "TagBuilder");
        assert_eq!(path.helper_name(), "tag");
    }

    #[test]
    fn test_member_name() {
        assert_eq!(member_name("PropOne"), "prop_one");
        assert_eq!(member_name("VPCId"), "vpc_id");
        assert_eq!(member_name("Endpoint.Address"), "endpoint_address");
        assert_eq!(member_name("Type"), "type");
        assert_eq!(member_name("Self"), "self_");
    }

    #[test]
    fn test_setter_name_avoids_builder_methods() {
        assert_eq!(setter_name("build"), "build_");
        assert_eq!(setter_name("new"), "new_");
        assert_eq!(setter_name("name"), "name");
    }

    #[test]
    fn test_keywords() {
        assert!(is_keyword("type"));
        assert!(!is_keyword("name"));
        assert!(is_path_keyword("crate"));
    }

    #[test]
    fn test_required_first_ordering() {
        let z = ("z".to_string(), Field::primitive("String").required(true));
        let a = ("a".to_string(), Field::primitive("String"));
        let m = ("m".to_string(), Field::primitive("String").required(true));

        let mut fields = vec![(&z.0, &z.1), (&a.0, &a.1), (&m.0, &m.1)];
        fields.sort_by(|x, y| required_first(*x, *y));
        let names: Vec<&str> = fields.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["m", "z", "a"]);
    }
}
