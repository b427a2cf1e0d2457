//! # Stackgen
//!
//! Typed infrastructure DSL generated from resource specification documents.
//!
//! Stackgen reads one or more partial specification documents, merges them
//! left-first into a single schema, resolves every field type and emits a
//! data type, a builder, a factory and a DSL helper per declared type.
//!
//! ## Features
//!
//! - **Partial documents** - Later documents only fill gaps left by earlier ones
//! - **Namespace-affine resolution** - Short type names prefer the owning resource
//! - **Builder pattern** - Required values up front, optional values through setters
//! - **Template registration** - Resource helpers name and register resources
//!
//! ## Quick Start
//!
//! ```ignore
//! // build.rs
//! fn main() {
//!     stackgen::codegen::build::generate_to_out_dir(&["spec/base.json"], "stack.rs")
//!         .expect("code generation failed");
//! }
//!
//! // src/lib.rs
//! pub mod stack {
//!     include!(concat!(env!("OUT_DIR"), "/stack.rs"));
//! }
//!
//! use stackgen::prelude::*;
//!
//! let mut template = TemplateBuilder::new();
//! let topic = stack::resource::topic(&mut template, None, None, |b| b.topic_name("alerts"))?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Runtime types referenced by generated code
//! - [`schema`] - Document parsing, merging and type resolution
//! - [`codegen`] - Artifact emission and Rust rendering

pub mod prelude;

/// Runtime types referenced by generated code.
pub mod core {
    pub use stackgen_core::*;
}

/// Schema parsing, merging and resolution.
pub mod schema {
    pub use stackgen_schema::*;
}

/// Code generation from merged schemas.
pub mod codegen {
    pub use stackgen_codegen::*;
}

// Re-export commonly used items at the crate root
pub use stackgen_codegen::{Generator, GeneratorBuilder, generate_from_files, generate_from_json};
pub use stackgen_core::{Resource, Template, TemplateBuilder, Value};
