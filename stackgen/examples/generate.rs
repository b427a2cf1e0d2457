//! Generates the DSL for one or more specification documents and prints it.
//!
//! Run with: `cargo run --example generate -- base.json overrides.json`
//!
//! Documents are merged in order; earlier documents win on collision. Set
//! `RUST_LOG=debug` to trace emission.

use stackgen::codegen::GeneratorBuilder;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        eprintln!("usage: generate <document.json>...");
        return ExitCode::from(2);
    }

    let generator = GeneratorBuilder::new().qualify_resource_namespaces(true).build();
    let source = generator
        .generate_from_files(&paths)
        .and_then(|tree| {
            eprintln!(
                "[Generate] {} property types, {} resource types",
                tree.properties.len(),
                tree.resources.len()
            );
            generator.render(&tree)
        });

    match source {
        Ok(source) => {
            println!("{source}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("[Generate] {e}");
            ExitCode::FAILURE
        }
    }
}
