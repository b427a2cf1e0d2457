//! Aggregation context generated resources register into.

use crate::error::{Error, Result};
use crate::resource::Resource;
use std::collections::{HashMap, HashSet};

/// Context that owns logical names and collects registered resources.
///
/// Generated DSL helpers call [`Template::allocate_logical_name`] when the
/// caller supplies no name, [`Template::current_dependee`] when the caller
/// supplies no dependencies, and [`Template::register`] with the built value.
pub trait Template {
    /// Allocates a fresh logical name scoped to `type_name`.
    fn allocate_logical_name(&mut self, type_name: &str) -> String;

    /// Dependencies applied to resources created without explicit ones.
    fn current_dependee(&self) -> Option<Vec<String>>;

    /// Registers a resource and returns it.
    ///
    /// # Errors
    /// Returns an error if the logical name is empty or already registered.
    fn register<R: Resource + Clone + 'static>(&mut self, resource: R) -> Result<R>;
}

/// Reference [`Template`] implementation.
///
/// Allocated names are the type name for the first instance, then the type
/// name suffixed with a counter (`Bucket`, `Bucket2`, `Bucket3`, ...),
/// skipping names already taken.
#[derive(Default)]
pub struct TemplateBuilder {
    resources: Vec<Box<dyn Resource>>,
    names: HashSet<String>,
    counters: HashMap<String, usize>,
    dependee: Option<Vec<String>>,
}

impl TemplateBuilder {
    /// Creates an empty template.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the dependencies applied to subsequently created resources.
    pub fn set_current_dependee(&mut self, dependee: Option<Vec<String>>) {
        self.dependee = dependee;
    }

    /// Returns the registered resources in registration order.
    pub fn resources(&self) -> impl Iterator<Item = &dyn Resource> {
        self.resources.iter().map(|r| r.as_ref())
    }

    /// Returns the number of registered resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns true if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Returns true if `logical_name` is registered.
    #[must_use]
    pub fn contains(&self, logical_name: &str) -> bool {
        self.names.contains(logical_name)
    }
}

impl Template for TemplateBuilder {
    fn allocate_logical_name(&mut self, type_name: &str) -> String {
        let counter = self.counters.entry(type_name.to_string()).or_insert(0);
        loop {
            *counter += 1;
            let candidate = if *counter == 1 {
                type_name.to_string()
            } else {
                format!("{type_name}{counter}")
            };
            if !self.names.contains(&candidate) {
                tracing::trace!("allocated logical name {}", candidate);
                return candidate;
            }
        }
    }

    fn current_dependee(&self) -> Option<Vec<String>> {
        self.dependee.clone()
    }

    fn register<R: Resource + Clone + 'static>(&mut self, resource: R) -> Result<R> {
        let logical_name = resource.logical_name();
        if logical_name.is_empty() {
            return Err(Error::EmptyLogicalName {
                resource_type: resource.resource_type().to_string(),
            });
        }
        if let Some(existing) = self
            .resources
            .iter()
            .find(|r| r.logical_name() == logical_name)
        {
            return Err(Error::DuplicateLogicalName {
                logical_name: logical_name.to_string(),
                existing_type: existing.resource_type().to_string(),
            });
        }

        self.names.insert(logical_name.to_string());
        self.resources.push(Box::new(resource.clone()));
        Ok(resource)
    }
}
