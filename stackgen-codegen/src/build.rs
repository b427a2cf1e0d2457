//! Build script integration.
//!
//! ```ignore
//! // build.rs
//! fn main() {
//!     let documents = ["spec/base.json", "spec/overrides.json"];
//!     stackgen_codegen::build::generate_to_out_dir(&documents, "stack.rs")
//!         .expect("code generation failed");
//! }
//!
//! // src/lib.rs
//! pub mod stack {
//!     include!(concat!(env!("OUT_DIR"), "/stack.rs"));
//! }
//! ```

use crate::error::CodegenError;
use crate::generator::Generator;
use crate::sink::{ArtifactSink, FileSink};
use std::path::{Path, PathBuf};

/// Generates code from document files into `OUT_DIR` with default settings.
///
/// # Errors
/// Returns `CodegenError` if `OUT_DIR` is unset or generation fails.
pub fn generate_to_out_dir<P: AsRef<Path>>(
    paths: &[P],
    file_name: &str,
) -> Result<PathBuf, CodegenError> {
    generate_to_out_dir_with(&Generator::new(), paths, file_name)
}

/// Generates code from document files into `OUT_DIR` with `generator`.
///
/// Emits `cargo:rerun-if-changed` for every input file.
///
/// # Errors
/// Returns `CodegenError` if `OUT_DIR` is unset or generation fails.
pub fn generate_to_out_dir_with<P: AsRef<Path>>(
    generator: &Generator,
    paths: &[P],
    file_name: &str,
) -> Result<PathBuf, CodegenError> {
    let out_dir = std::env::var_os("OUT_DIR")
        .ok_or_else(|| CodegenError::generation("OUT_DIR is not set"))?;
    generate_to_dir(generator, paths, Path::new(&out_dir), file_name)
}

fn generate_to_dir<P: AsRef<Path>>(
    generator: &Generator,
    paths: &[P],
    dir: &Path,
    file_name: &str,
) -> Result<PathBuf, CodegenError> {
    for path in paths {
        println!("cargo:rerun-if-changed={}", path.as_ref().display());
    }
    let tree = generator.generate_from_files(paths)?;
    let mut sink = FileSink::new(dir, file_name, generator.config())?;
    sink.accept(&tree)?;
    Ok(sink.path().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_to_dir() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let spec = dir.path().join("spec.json");
        std::fs::write(
            &spec,
            r#"{ "PropertyTypes": { "Tag": { "Properties": { "Key": { "PrimitiveType": "String", "Required": true } } } } }"#,
        )
        .expect("Failed to write");

        let out = generate_to_dir(&Generator::new(), &[&spec], dir.path(), "stack.rs")
            .expect("generation failed");
        assert_eq!(out, dir.path().join("stack.rs"));
        let source = std::fs::read_to_string(out).expect("Failed to read");
        assert!(source.contains("pub struct TagBuilder"));
    }

    #[test]
    fn test_generate_to_dir_missing_input() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let missing = dir.path().join("missing.json");
        let err = generate_to_dir(&Generator::new(), &[&missing], dir.path(), "stack.rs")
            .unwrap_err();
        assert!(matches!(err, CodegenError::Parse(_)));
    }
}
