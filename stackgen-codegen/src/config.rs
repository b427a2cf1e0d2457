//! Generator configuration.

use crate::generator::Generator;

/// Default root module for resource types.
pub const DEFAULT_RESOURCE_ROOT: &str = "resource";
/// Default root module for property types.
pub const DEFAULT_PROPERTY_ROOT: &str = "property";
/// Default vendor segment stripped from property namespaces.
pub const DEFAULT_VENDOR_PREFIX: &str = "aws";
/// Default path of the runtime crate in generated code.
pub const DEFAULT_RUNTIME_PATH: &str = "::stackgen_core";

/// Settings shared by the emitter and the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Root module for resource types.
    pub resource_root: String,
    /// Root module for property types.
    pub property_root: String,
    /// Leading namespace segment dropped from property namespaces.
    pub vendor_prefix: Option<String>,
    /// Path of the runtime crate (`Value`, `Resource`, `Template`).
    pub runtime_path: String,
    /// Places resources in per-service modules instead of directly under the root.
    pub qualify_resource_namespaces: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            resource_root: DEFAULT_RESOURCE_ROOT.to_string(),
            property_root: DEFAULT_PROPERTY_ROOT.to_string(),
            vendor_prefix: Some(DEFAULT_VENDOR_PREFIX.to_string()),
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
            qualify_resource_namespaces: false,
        }
    }
}

/// Builder for configuring a [`Generator`].
#[derive(Debug, Clone, Default)]
pub struct GeneratorBuilder {
    config: GeneratorConfig,
}

impl GeneratorBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root module for resource types.
    #[must_use]
    pub fn resource_root(mut self, root: impl Into<String>) -> Self {
        self.config.resource_root = root.into();
        self
    }

    /// Sets the root module for property types.
    #[must_use]
    pub fn property_root(mut self, root: impl Into<String>) -> Self {
        self.config.property_root = root.into();
        self
    }

    /// Sets the vendor segment stripped from property namespaces.
    #[must_use]
    pub fn vendor_prefix(mut self, vendor: impl Into<String>) -> Self {
        self.config.vendor_prefix = Some(vendor.into());
        self
    }

    /// Keeps every namespace segment.
    #[must_use]
    pub fn keep_vendor_prefix(mut self) -> Self {
        self.config.vendor_prefix = None;
        self
    }

    /// Sets the path generated code uses to reach the runtime crate.
    #[must_use]
    pub fn runtime_path(mut self, path: impl Into<String>) -> Self {
        self.config.runtime_path = path.into();
        self
    }

    /// Places resource types in per-service modules.
    #[must_use]
    pub fn qualify_resource_namespaces(mut self, qualify: bool) -> Self {
        self.config.qualify_resource_namespaces = qualify;
        self
    }

    /// Returns the configuration built so far.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Builds the generator.
    #[must_use]
    pub fn build(self) -> Generator {
        Generator::with_config(self.config)
    }
}
