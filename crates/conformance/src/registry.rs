//! Resource binding registry.
//!
//! The registry associates each resource type with the handlers that serve
//! it. The Conformance builder only ever sees a point-in-time snapshot of the
//! registry, taken through [`BindingRegistry::resource_bindings`].

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::operations::{ResourceOperation, SystemOperation};
use crate::params::Parameter;

/// A single handler bound to a resource type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerBinding {
    /// Handler name, used for diagnostics only.
    #[serde(default)]
    pub name: String,
    /// Resource-level operation served by this handler.
    #[serde(default, rename = "operation")]
    pub resource_operation: Option<ResourceOperation>,
    /// System-level operation served by this handler.
    #[serde(default)]
    pub system_operation: Option<SystemOperation>,
    /// Ordered parameter list; present only on search handlers.
    #[serde(default, rename = "search")]
    pub search_parameters: Option<Vec<Parameter>>,
}

impl HandlerBinding {
    /// Creates a handler with no operations.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Creates a search handler with the given ordered parameters.
    ///
    /// Search handlers serve `search-type` unless overridden.
    pub fn search(name: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        Self {
            name: name.into(),
            resource_operation: Some(ResourceOperation::SearchType),
            system_operation: None,
            search_parameters: Some(parameters),
        }
    }

    /// Sets the resource-level operation.
    pub fn with_resource_operation(mut self, operation: ResourceOperation) -> Self {
        self.resource_operation = Some(operation);
        self
    }

    /// Sets the system-level operation.
    pub fn with_system_operation(mut self, operation: SystemOperation) -> Self {
        self.system_operation = Some(operation);
        self
    }

    /// Returns true if this is a search handler.
    pub fn is_search(&self) -> bool {
        self.search_parameters.is_some()
    }

    /// Returns the ordered parameter list for search handlers.
    pub fn parameters(&self) -> &[Parameter] {
        self.search_parameters.as_deref().unwrap_or(&[])
    }
}

/// Registry entry associating a resource type with its handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceBinding {
    /// The resource type name as registered (e.g. "Patient").
    #[serde(rename = "resource")]
    pub resource_name: String,
    /// Handlers, in registration order.
    #[serde(default)]
    pub handlers: Vec<HandlerBinding>,
}

impl ResourceBinding {
    /// Creates a binding with no handlers.
    pub fn new(resource_name: impl Into<String>) -> Self {
        Self {
            resource_name: resource_name.into(),
            handlers: Vec::new(),
        }
    }

    /// Appends a handler.
    pub fn with_handler(mut self, handler: HandlerBinding) -> Self {
        self.handlers.push(handler);
        self
    }
}

/// Source of resource bindings for the Conformance builder.
pub trait BindingRegistry: Send + Sync {
    /// Returns a snapshot of all resource bindings, in registry order.
    fn resource_bindings(&self) -> Vec<ResourceBinding>;
}

/// In-memory registry that handlers can be added to at runtime.
///
/// Bindings are kept in registration order. Registering a handler for a
/// resource type that is already bound appends to the existing binding.
#[derive(Debug, Default)]
pub struct ServerRegistry {
    bindings: RwLock<Vec<ResourceBinding>>,
}

impl ServerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-populated with bindings.
    pub fn with_bindings(bindings: Vec<ResourceBinding>) -> Self {
        let registry = Self::new();
        for binding in bindings {
            registry.register_binding(binding);
        }
        registry
    }

    /// Registers a handler for a resource type.
    pub fn register(&self, resource_name: &str, handler: HandlerBinding) {
        let mut bindings = self.bindings.write();
        match bindings
            .iter_mut()
            .find(|b| b.resource_name == resource_name)
        {
            Some(binding) => binding.handlers.push(handler),
            None => bindings.push(ResourceBinding::new(resource_name).with_handler(handler)),
        }
    }

    /// Registers every handler of a binding.
    pub fn register_binding(&self, binding: ResourceBinding) {
        let mut bindings = self.bindings.write();
        match bindings
            .iter_mut()
            .find(|b| b.resource_name == binding.resource_name)
        {
            Some(existing) => existing.handlers.extend(binding.handlers),
            None => bindings.push(binding),
        }
    }

    /// Returns the number of bound resource types.
    pub fn len(&self) -> usize {
        self.bindings.read().len()
    }

    /// Returns true if no resource type is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.read().is_empty()
    }
}

impl BindingRegistry for ServerRegistry {
    fn resource_bindings(&self) -> Vec<ResourceBinding> {
        self.bindings.read().clone()
    }
}

impl BindingRegistry for Vec<ResourceBinding> {
    fn resource_bindings(&self) -> Vec<ResourceBinding> {
        self.clone()
    }
}
