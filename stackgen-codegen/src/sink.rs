//! Destinations for generated artifacts.

use crate::artifact::ArtifactTree;
use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::rust::RustRenderer;
use std::path::{Path, PathBuf};

/// Receives the artifacts of one generation run.
pub trait ArtifactSink {
    /// Accepts a complete artifact tree.
    ///
    /// # Errors
    /// Returns `CodegenError` if the artifacts cannot be stored.
    fn accept(&mut self, tree: &ArtifactTree) -> Result<(), CodegenError>;
}

/// Keeps artifact trees in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    trees: Vec<ArtifactTree>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the accepted trees in order.
    #[must_use]
    pub fn trees(&self) -> &[ArtifactTree] {
        &self.trees
    }

    /// Consumes the sink, returning the accepted trees.
    #[must_use]
    pub fn into_trees(self) -> Vec<ArtifactTree> {
        self.trees
    }
}

impl ArtifactSink for MemorySink {
    fn accept(&mut self, tree: &ArtifactTree) -> Result<(), CodegenError> {
        self.trees.push(tree.clone());
        Ok(())
    }
}

/// Renders artifacts to a single Rust source file.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    renderer: RustRenderer,
}

impl FileSink {
    /// Creates a sink writing `file_name` inside `dir`.
    ///
    /// # Errors
    /// Returns `CodegenError` if the configured runtime path is invalid.
    pub fn new(
        dir: impl AsRef<Path>,
        file_name: &str,
        config: &GeneratorConfig,
    ) -> Result<Self, CodegenError> {
        Ok(Self {
            path: dir.as_ref().join(file_name),
            renderer: RustRenderer::new(config)?,
        })
    }

    /// Returns the output file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ArtifactSink for FileSink {
    fn accept(&mut self, tree: &ArtifactTree) -> Result<(), CodegenError> {
        let source = self.renderer.render(tree)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, source)?;
        tracing::info!(
            "wrote {} artifacts to {}",
            tree.len(),
            self.path.display()
        );
        Ok(())
    }
}
