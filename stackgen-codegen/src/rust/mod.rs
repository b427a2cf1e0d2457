//! Rust source rendering.
//!
//! Artifacts are rendered into a single file of nested modules mirroring
//! their module paths. Cross-module references use `super::` paths so the
//! file can be included anywhere in a crate.

mod exprs;
mod items;
mod types;

use crate::artifact::{ArtifactTree, TypeArtifact};
use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::naming;
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use std::collections::{BTreeMap, HashMap};

/// Header written above rendered source.
pub const GENERATED_HEADER: &str = "// @generated by stackgen-codegen. Do not edit.";

/// Renders artifact trees to Rust source.
#[derive(Debug, Clone)]
pub struct RustRenderer {
    runtime: TokenStream,
}

impl RustRenderer {
    /// Creates a renderer for `config`.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` if the runtime path does not parse.
    pub fn new(config: &GeneratorConfig) -> Result<Self, CodegenError> {
        let runtime = syn::parse_str::<syn::Path>(&config.runtime_path).map_err(|e| {
            CodegenError::generation(format!(
                "invalid runtime path '{}': {e}",
                config.runtime_path
            ))
        })?;
        Ok(Self {
            runtime: quote!(#runtime),
        })
    }

    /// Renders `tree` to a source string.
    ///
    /// # Errors
    /// Returns `CodegenError` if a generated name is not a valid identifier
    /// or an expression references a type missing from `tree`.
    pub fn render(&self, tree: &ArtifactTree) -> Result<String, CodegenError> {
        let tokens = self.render_tokens(tree)?;
        Ok(format!("{GENERATED_HEADER}\n{tokens}\n"))
    }

    /// Renders `tree` to a token stream.
    ///
    /// # Errors
    /// See [`RustRenderer::render`].
    pub fn render_tokens(&self, tree: &ArtifactTree) -> Result<TokenStream, CodegenError> {
        let index = Index::new(tree);

        let mut root = ModuleNode::default();
        for artifact in tree.iter() {
            root.insert(&artifact.path.module_path(), artifact);
        }

        let tokens = root.render(&[], &index, &self.runtime)?;
        tracing::debug!("rendered {} artifacts", tree.len());
        Ok(tokens)
    }
}

/// Artifacts by schema name, property types shadowing resource types.
pub(crate) struct Index<'a> {
    by_name: HashMap<&'a str, &'a TypeArtifact>,
}

impl<'a> Index<'a> {
    fn new(tree: &'a ArtifactTree) -> Self {
        let by_name = tree
            .resources
            .iter()
            .chain(tree.properties.iter())
            .map(|artifact| (artifact.schema_name.as_str(), artifact))
            .collect();
        Self { by_name }
    }

    fn get(&self, schema_name: &str) -> Result<&'a TypeArtifact, CodegenError> {
        self.by_name.get(schema_name).copied().ok_or_else(|| {
            CodegenError::generation(format!("reference to unknown type '{schema_name}'"))
        })
    }
}

/// Where tokens are being rendered.
pub(crate) struct Scope<'a> {
    /// Module path of the item being rendered.
    pub module: &'a [String],
    index: &'a Index<'a>,
    /// Runtime crate path.
    pub runtime: &'a TokenStream,
}

impl Scope<'_> {
    /// Path from the current module to the data type of `schema_name`.
    pub fn data_path(&self, schema_name: &str) -> Result<TokenStream, CodegenError> {
        let artifact = self.index.get(schema_name)?;
        self.relative_path(artifact, &artifact.path.class_name)
    }

    /// Path from the current module to the builder of `schema_name`.
    pub fn builder_path(&self, schema_name: &str) -> Result<TokenStream, CodegenError> {
        let artifact = self.index.get(schema_name)?;
        self.relative_path(artifact, &artifact.path.builder_name())
    }

    fn relative_path(
        &self,
        artifact: &TypeArtifact,
        item: &str,
    ) -> Result<TokenStream, CodegenError> {
        let item = ident(item)?;
        let target = artifact.path.module_path();
        if target.as_slice() == self.module {
            return Ok(quote!(#item));
        }
        let supers = self.module.iter().map(|_| quote!(super));
        let segments = target
            .iter()
            .map(|segment| ident(segment))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(quote!(#(#supers::)* #(#segments::)* #item))
    }
}

/// Creates an identifier, falling back to a raw identifier for keywords.
///
/// # Errors
/// Returns `CodegenError::InvalidIdentifier` if `name` cannot be an identifier.
pub fn ident(name: &str) -> Result<Ident, CodegenError> {
    if naming::is_path_keyword(name) {
        return Err(CodegenError::invalid_identifier(name));
    }
    if naming::is_keyword(name) {
        return Ok(Ident::new_raw(name, Span::call_site()));
    }
    syn::parse_str::<Ident>(name).map_err(|_| CodegenError::invalid_identifier(name))
}

#[derive(Default)]
struct ModuleNode<'a> {
    items: Vec<&'a TypeArtifact>,
    children: BTreeMap<String, ModuleNode<'a>>,
}

impl<'a> ModuleNode<'a> {
    fn insert(&mut self, path: &[String], artifact: &'a TypeArtifact) {
        match path.split_first() {
            Some((head, rest)) => self
                .children
                .entry(head.clone())
                .or_default()
                .insert(rest, artifact),
            None => self.items.push(artifact),
        }
    }

    fn render(
        &self,
        module: &[String],
        index: &Index<'_>,
        runtime: &TokenStream,
    ) -> Result<TokenStream, CodegenError> {
        let scope = Scope {
            module,
            index,
            runtime,
        };
        let items = self
            .items
            .iter()
            .map(|artifact| items::artifact_tokens(artifact, &scope))
            .collect::<Result<Vec<_>, _>>()?;

        let mut children = Vec::with_capacity(self.children.len());
        for (name, child) in &self.children {
            let path: Vec<String> = module.iter().cloned().chain([name.clone()]).collect();
            let inner = child.render(&path, index, runtime)?;
            let name_ident = ident(name)?;
            let doc = format!(" Types of the `{}` namespace.", path.join("."));
            children.push(quote! {
                #[doc = #doc]
                pub mod #name_ident {
                    #inner
                }
            });
        }

        Ok(quote! {
            #(#items)*
            #(#children)*
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Generator;

    const DOCUMENT: &str = r#"{
        "PropertyTypes": {
            "AWS::EC2::Instance.SomeProperty": {
                "Documentation": "http://docs/some-property",
                "Properties": {
                    "PropOne": { "PrimitiveType": "String", "Required": true },
                    "Labels": { "PrimitiveItemType": "String", "Type": "Map" },
                    "Sizes": { "PrimitiveItemType": "Integer", "Type": "List" },
                    "Type": { "PrimitiveType": "Json" }
                }
            },
            "Tag": {
                "Properties": {
                    "Key": { "PrimitiveType": "String", "Required": true },
                    "Value": { "PrimitiveType": "String", "Required": true }
                }
            }
        },
        "ResourceTypes": {
            "AWS::EC2::Instance": {
                "Attributes": {
                    "PrivateIp": { "PrimitiveType": "String" }
                },
                "Properties": {
                    "Prop": { "Type": "SomeProperty", "Required": true },
                    "Tags": { "ItemType": "Tag", "Type": "List" },
                    "LaunchedAt": { "PrimitiveType": "Timestamp" }
                }
            }
        }
    }"#;

    fn render(generator: &Generator) -> String {
        let tree = generator
            .generate_from_json(&[DOCUMENT])
            .expect("generation failed");
        generator.render(&tree).expect("render failed")
    }

    fn parse(source: &str) -> syn::File {
        syn::parse_file(source).expect("generated source does not parse")
    }

    fn module<'a>(items: &'a [syn::Item], name: &str) -> &'a [syn::Item] {
        items
            .iter()
            .find_map(|item| match item {
                syn::Item::Mod(m) if m.ident == name => m.content.as_ref().map(|(_, i)| &i[..]),
                _ => None,
            })
            .unwrap_or_else(|| panic!("module {name} missing"))
    }

    fn has_struct(items: &[syn::Item], name: &str) -> bool {
        items
            .iter()
            .any(|item| matches!(item, syn::Item::Struct(s) if s.ident == name))
    }

    fn has_fn(items: &[syn::Item], name: &str) -> bool {
        items
            .iter()
            .any(|item| matches!(item, syn::Item::Fn(f) if f.sig.ident == name))
    }

    #[test]
    fn test_render_parses_as_rust() {
        let source = render(&Generator::new());
        assert!(source.starts_with(GENERATED_HEADER));
        parse(&source);
    }

    #[test]
    fn test_render_module_layout() {
        let file = parse(&render(&Generator::new()));

        let property = module(&file.items, "property");
        assert!(has_struct(property, "Tag"));
        assert!(has_struct(property, "TagBuilder"));
        assert!(has_fn(property, "tag"));

        let instance = module(module(property, "ec2"), "instance");
        assert!(has_struct(instance, "SomeProperty"));
        assert!(has_struct(instance, "SomePropertyBuilder"));
        assert!(has_fn(instance, "some_property"));

        let resource = module(&file.items, "resource");
        assert!(has_struct(resource, "Instance"));
        assert!(has_fn(resource, "instance"));
    }

    #[test]
    fn test_render_qualified_resources() {
        let generator = Generator::builder().qualify_resource_namespaces(true).build();
        let file = parse(&render(&generator));
        let ec2 = module(module(&file.items, "resource"), "ec2");
        assert!(has_struct(ec2, "Instance"));
    }

    #[test]
    fn test_render_relative_paths() {
        let source = render(&Generator::new());
        assert!(source.contains("super :: property :: ec2 :: instance :: SomeProperty"));
        assert!(source.contains("super :: property :: Tag"));
    }

    #[test]
    fn test_render_runtime_path() {
        let source = render(&Generator::builder().runtime_path("crate::runtime").build());
        assert!(source.contains("crate :: runtime :: Value"));
        assert!(source.contains("crate :: runtime :: Json"));
        assert!(source.contains("crate :: runtime :: Timestamp"));
        assert!(!source.contains("stackgen_core"));
    }

    #[test]
    fn test_render_keyword_member_is_raw() {
        let source = render(&Generator::new());
        assert!(source.contains("r#type"));
    }

    #[test]
    fn test_render_documentation() {
        let source = render(&Generator::new());
        assert!(source.contains("http://docs/some-property"));
    }

    #[test]
    fn test_render_invalid_runtime_path() {
        let config = GeneratorConfig {
            runtime_path: "::".to_string(),
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            RustRenderer::new(&config),
            Err(CodegenError::Generation { .. })
        ));
    }

    #[test]
    fn test_ident() {
        assert_eq!(ident("name").expect("ident").to_string(), "name");
        assert_eq!(ident("type").expect("ident").to_string(), "r#type");
        assert!(ident("self").is_err());
        assert!(ident("has space").is_err());
        assert!(ident("1abc").is_err());
    }
}
