//! # Stackgen Codegen
//!
//! Code generation from merged resource specification documents.
//!
//! This crate provides:
//! - Artifact emission (data types, builders, factories, DSL helpers)
//! - Rust source rendering with `quote`
//! - Pluggable artifact sinks
//! - Build script integration

pub mod artifact;
pub mod build;
pub mod config;
pub mod emitter;
pub mod error;
pub mod expr;
pub mod generator;
pub mod naming;
pub mod rust;
pub mod sink;

pub use artifact::ArtifactTree;
pub use config::{GeneratorBuilder, GeneratorConfig};
pub use emitter::Emitter;
pub use error::CodegenError;
pub use generator::Generator;
pub use rust::RustRenderer;
pub use sink::{ArtifactSink, FileSink, MemorySink};

/// Generates Rust code from JSON documents, merged in order.
///
/// # Arguments
/// * `documents` - Document contents, earlier ones winning on collision
///
/// # Returns
/// Generated Rust code as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing, merging, or generation fails.
pub fn generate_from_json(documents: &[&str]) -> Result<String, CodegenError> {
    let generator = Generator::new();
    let tree = generator.generate_from_json(documents)?;
    generator.render(&tree)
}

/// Generates Rust code from document files, merged in order.
///
/// # Arguments
/// * `paths` - Paths to the documents
///
/// # Returns
/// Generated Rust code as a string.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or generation fails.
pub fn generate_from_files<P: AsRef<std::path::Path>>(paths: &[P]) -> Result<String, CodegenError> {
    let generator = Generator::new();
    let tree = generator.generate_from_files(paths)?;
    generator.render(&tree)
}
