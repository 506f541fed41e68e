//! Provider registry - maps resource type names to factories

use crate::error::{Error, Result};
use crate::resource::BoxedResource;
use crate::schema::Schema;
use std::collections::BTreeMap;

/// Constructor for a registered resource
pub type ResourceFactory = fn() -> BoxedResource;

/// A provider: a type name plus the resources registered under it
#[derive(Debug, Clone)]
pub struct Provider {
    type_name: String,
    factories: BTreeMap<String, ResourceFactory>,
}

impl Provider {
    /// Create an empty provider
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            factories: BTreeMap::new(),
        }
    }

    /// Register a resource factory
    ///
    /// The full type name is taken from the resource's metadata.
    pub fn register(&mut self, factory: ResourceFactory) -> &mut Self {
        let type_name = factory().metadata(&self.type_name);
        log::trace!("Registering resource type {type_name}");
        self.factories.insert(type_name, factory);
        self
    }

    /// Builder form of [`Provider::register`]
    pub fn with_resource(mut self, factory: ResourceFactory) -> Self {
        self.register(factory);
        self
    }

    /// Instantiate the resource registered under a full type name
    pub fn resource(&self, type_name: &str) -> Result<BoxedResource> {
        self.factories
            .get(type_name)
            .map(|factory| factory())
            .ok_or_else(|| Error::UnknownResourceType(type_name.to_string()))
    }

    /// Registered resource type names, sorted
    pub fn resource_types(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Schemas of all registered resources
    pub fn schemas(&self) -> BTreeMap<String, Schema> {
        self.factories
            .iter()
            .map(|(name, factory)| (name.clone(), factory().schema()))
            .collect()
    }
}
