//! Field type resolution.
//!
//! This module maps field descriptors to concrete type references. Nested
//! type references are matched against the declared type names through a
//! short-name index; ambiguity is settled by namespace affinity with the
//! consuming type.

use crate::error::ResolveError;
use crate::types::{Field, Schema, owner_namespace, short_name};
use std::collections::{BTreeSet, HashMap};

/// Scalar kinds after primitive name substitution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scalar {
    /// `String`.
    String,
    /// `Integer`, the host's standard integer.
    Integer,
    /// `Long`.
    Long,
    /// `Double`.
    Double,
    /// `Boolean`.
    Boolean,
    /// `Json`, a structured document.
    Json,
    /// `Timestamp`, an instant.
    Timestamp,
    /// Any other primitive, kept by name.
    Other(String),
}

impl Scalar {
    /// Maps a schema primitive name to a scalar kind.
    #[must_use]
    pub fn from_primitive(name: &str) -> Self {
        match name {
            "String" => Self::String,
            "Integer" => Self::Integer,
            "Long" => Self::Long,
            "Double" => Self::Double,
            "Boolean" => Self::Boolean,
            "Json" => Self::Json,
            "Timestamp" => Self::Timestamp,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the Rust type name for this scalar.
    ///
    /// `Json` and `Timestamp` name the runtime crate's aliases.
    #[must_use]
    pub fn rust_type(&self) -> &str {
        match self {
            Self::String => "String",
            Self::Integer => "i32",
            Self::Long => "i64",
            Self::Double => "f64",
            Self::Boolean => "bool",
            Self::Json => "Json",
            Self::Timestamp => "Timestamp",
            Self::Other(name) => name,
        }
    }

    /// Returns true if the Rust type lives in the runtime crate.
    #[must_use]
    pub const fn is_runtime_alias(&self) -> bool {
        matches!(self, Self::Json | Self::Timestamp)
    }
}

/// Resolved type of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Bare scalar (only produced by [`TypeRef::unwrapped`]).
    Scalar(Scalar),
    /// Scalar inside the value envelope.
    Value(Scalar),
    /// Ordered sequence.
    List(Box<TypeRef>),
    /// String-keyed mapping.
    Map(Box<TypeRef>),
    /// Nested type, by fully qualified name.
    Named(String),
}

impl TypeRef {
    /// Returns the same shape with every value envelope removed.
    #[must_use]
    pub fn unwrapped(&self) -> TypeRef {
        match self {
            Self::Value(scalar) => Self::Scalar(scalar.clone()),
            Self::List(inner) => Self::List(Box::new(inner.unwrapped())),
            Self::Map(inner) => Self::Map(Box::new(inner.unwrapped())),
            other => other.clone(),
        }
    }

    /// Returns true for an enveloped scalar or a collection of them.
    #[must_use]
    pub fn is_wrapped_scalar(&self) -> bool {
        match self {
            Self::Value(_) => true,
            Self::List(inner) | Self::Map(inner) => matches!(**inner, Self::Value(_)),
            _ => false,
        }
    }

    /// Returns the referenced nested type for a single nested reference.
    #[must_use]
    pub fn as_named(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Returns the nested type this reference mentions, directly or as elements.
    #[must_use]
    pub fn referenced_type(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name.as_str()),
            Self::List(inner) | Self::Map(inner) => inner.referenced_type(),
            _ => None,
        }
    }
}

/// Resolves field descriptors against a fixed set of type names.
#[derive(Debug, Clone, Default)]
pub struct TypeResolver {
    known: BTreeSet<String>,
    by_short_name: HashMap<String, Vec<String>>,
}

impl TypeResolver {
    /// Builds the short-name index over `names`.
    #[must_use]
    pub fn new<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let known: BTreeSet<String> = names.into_iter().map(str::to_string).collect();
        let mut by_short_name: HashMap<String, Vec<String>> = HashMap::new();
        // BTreeSet iteration keeps every candidate list sorted.
        for name in &known {
            by_short_name
                .entry(short_name(name).to_string())
                .or_default()
                .push(name.clone());
        }
        Self {
            known,
            by_short_name,
        }
    }

    /// Builds a resolver over every type declared in `schema`.
    #[must_use]
    pub fn from_schema(schema: &Schema) -> Self {
        Self::new(schema.type_names())
    }

    /// Resolves a field of `consumer` to a type reference.
    ///
    /// Shapes are tried in priority order: scalar, scalar collection,
    /// nested collection, nested type.
    ///
    /// # Errors
    /// Returns `ResolveError` if the descriptor sets no shape or a nested
    /// reference cannot be matched to exactly one declared type.
    pub fn resolve(&self, field: &Field, consumer: &str) -> Result<TypeRef, ResolveError> {
        if let Some(primitive) = set(&field.primitive_type) {
            return Ok(TypeRef::Value(Scalar::from_primitive(primitive)));
        }
        if let Some(primitive) = set(&field.primitive_item_type) {
            let element = Box::new(TypeRef::Value(Scalar::from_primitive(primitive)));
            return Ok(if field.is_map() {
                TypeRef::Map(element)
            } else {
                TypeRef::List(element)
            });
        }
        if let Some(item) = set(&field.item_type) {
            let name = self.lookup(item, consumer)?;
            return Ok(TypeRef::List(Box::new(TypeRef::Named(name.to_string()))));
        }
        if let Some(nested) = set(&field.type_name) {
            let name = self.lookup(nested, consumer)?;
            return Ok(TypeRef::Named(name.to_string()));
        }
        Err(ResolveError::MalformedPropertyDescriptor)
    }

    /// Matches a requested type name to one declared name.
    ///
    /// A declared name always resolves to itself, and other qualified
    /// requests fail. Short names collect every declared name with that
    /// final segment; several candidates are narrowed to the ones owned by
    /// the consumer's namespace.
    ///
    /// # Errors
    /// Returns `UnresolvedTypeReference` when nothing matches and
    /// `AmbiguousTypeReference` when no unique candidate remains.
    pub fn lookup(&self, requested: &str, consumer: &str) -> Result<&str, ResolveError> {
        if let Some(declared) = self.known.get(requested) {
            return Ok(declared.as_str());
        }
        if requested.contains("::") || requested.contains('.') {
            return Err(ResolveError::UnresolvedTypeReference {
                type_name: requested.to_string(),
            });
        }

        let candidates = self
            .by_short_name
            .get(requested)
            .map(Vec::as_slice)
            .unwrap_or_default();

        match candidates {
            [] => Err(ResolveError::UnresolvedTypeReference {
                type_name: requested.to_string(),
            }),
            [only] => Ok(only.as_str()),
            _ => {
                let owner = owner_namespace(consumer);
                let mut affine = candidates
                    .iter()
                    .filter(|candidate| owner_namespace(candidate) == owner);
                match (affine.next(), affine.next()) {
                    (Some(unique), None) => Ok(unique.as_str()),
                    _ => Err(ResolveError::AmbiguousTypeReference {
                        type_name: requested.to_string(),
                        candidates: candidates.to_vec(),
                    }),
                }
            }
        }
    }

    /// Returns true if `name` is a declared type.
    #[must_use]
    pub fn is_known(&self, name: &str) -> bool {
        self.known.contains(name)
    }
}

fn set(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
