//! Generates the demo DSL exercised by the integration tests.

fn main() {
    if let Err(e) = stackgen_codegen::build::generate_to_out_dir(
        &["specs/demo/base.json", "specs/demo/overrides.json"],
        "demo.rs",
    ) {
        panic!("demo code generation failed: {e}");
    }
}
