//! # Stackgen Schema
//!
//! Resource specification model, parsing, merging and type resolution.
//!
//! This crate provides:
//! - JSON specification document parsing
//! - The schema model (resource and property types, fields, attributes)
//! - Left-biased merging of partial documents
//! - Field type resolution with namespace-affine short-name lookup
//! - Schema validation

pub mod error;
pub mod merge;
pub mod parser;
pub mod resolve;
pub mod types;
pub mod validation;

pub use error::{ParseError, ResolveError, SchemaError};
pub use merge::merge;
pub use parser::{parse_schema, parse_schema_file};
pub use resolve::{Scalar, TypeRef, TypeResolver};
pub use types::{
    Attribute, Field, Schema, TypeInfo, TypeKind, name_segments, owner_namespace, short_name,
};
pub use validation::validate_schema;
