//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use stackgen::prelude::*;
//! ```

// Runtime types
pub use stackgen_core::error::{Error as CoreError, Result as CoreResult};
pub use stackgen_core::{Deferred, Json, Resource, Template, TemplateBuilder, Timestamp, Value};

// Schema types
pub use stackgen_schema::{Schema, SchemaError, TypeInfo, TypeKind, merge, parse_schema};

// Generator types
pub use stackgen_codegen::{
    ArtifactSink, ArtifactTree, CodegenError, FileSink, Generator, GeneratorBuilder,
    GeneratorConfig, MemorySink,
};
