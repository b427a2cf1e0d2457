//! Pipeline driver: merge, validate, emit, render.

use crate::artifact::ArtifactTree;
use crate::config::{GeneratorBuilder, GeneratorConfig};
use crate::emitter::Emitter;
use crate::error::CodegenError;
use crate::rust::RustRenderer;
use crate::sink::ArtifactSink;
use stackgen_schema::{Schema, merge, parse_schema, parse_schema_file, validate_schema};
use std::path::Path;

/// Runs the generation pipeline with one configuration.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Creates a generator with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator with the given settings.
    #[must_use]
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Starts configuring a generator.
    #[must_use]
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Merges `documents` in order and emits artifacts for the result.
    ///
    /// # Arguments
    /// * `documents` - Parsed documents, earlier ones winning on collision
    ///
    /// # Errors
    /// Returns `CodegenError` if the input is empty, the merged schema is
    /// malformed, or emission fails.
    pub fn generate<I>(&self, documents: I) -> Result<ArtifactTree, CodegenError>
    where
        I: IntoIterator<Item = Schema>,
    {
        let schema = merge(documents)?;
        validate_schema(&schema)?;
        Emitter::new(&schema, &self.config).emit()
    }

    /// Parses JSON documents and generates artifacts from them.
    ///
    /// # Errors
    /// Returns `CodegenError` if parsing or generation fails.
    pub fn generate_from_json(&self, documents: &[&str]) -> Result<ArtifactTree, CodegenError> {
        let schemas = documents
            .iter()
            .map(|json| parse_schema(json))
            .collect::<Result<Vec<_>, _>>()?;
        self.generate(schemas)
    }

    /// Reads and parses document files, then generates artifacts from them.
    ///
    /// # Errors
    /// Returns `CodegenError` if reading, parsing, or generation fails.
    pub fn generate_from_files<P: AsRef<Path>>(
        &self,
        paths: &[P],
    ) -> Result<ArtifactTree, CodegenError> {
        let schemas = paths
            .iter()
            .map(|path| {
                tracing::debug!("reading {}", path.as_ref().display());
                parse_schema_file(path.as_ref())
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.generate(schemas)
    }

    /// Renders artifacts to Rust source.
    ///
    /// # Errors
    /// Returns `CodegenError` if the runtime path or a generated name is not
    /// valid Rust.
    pub fn render(&self, tree: &ArtifactTree) -> Result<String, CodegenError> {
        RustRenderer::new(&self.config)?.render(tree)
    }

    /// Generates artifacts and hands them to `sink`.
    ///
    /// # Errors
    /// Returns `CodegenError` if generation or the sink fails.
    pub fn generate_into<I, S>(&self, documents: I, sink: &mut S) -> Result<(), CodegenError>
    where
        I: IntoIterator<Item = Schema>,
        S: ArtifactSink + ?Sized,
    {
        let tree = self.generate(documents)?;
        sink.accept(&tree)
    }
}
