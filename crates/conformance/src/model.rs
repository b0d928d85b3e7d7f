//! The Conformance document model.
//!
//! These types are the builder's output. They are plain data: once the
//! builder hands a [`CapabilityDocument`] out it is never mutated again, and
//! the provider shares it behind an `Arc`.

use serde::{Deserialize, Serialize};

use crate::operations::{ResourceOperation, SystemOperation};
use crate::params::SearchParamType;

/// Name and version of the server software.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServerIdentity {
    /// Software name.
    pub name: String,
    /// Software version.
    pub version: String,
}

impl ServerIdentity {
    /// Creates a server identity.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Mode in which the server participates in a RESTful exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestMode {
    /// The application acts as a server.
    #[default]
    Server,
    /// The application acts as a client.
    Client,
}

impl std::fmt::Display for RestMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RestMode::Server => write!(f, "server"),
            RestMode::Client => write!(f, "client"),
        }
    }
}

/// The aggregated capability statement for a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityDocument {
    /// Server software identity.
    pub software: ServerIdentity,
    /// The server's REST interface.
    pub rest: RestInterface,
}

impl CapabilityDocument {
    /// Returns the capability entry for a resource type.
    pub fn resource(&self, resource_type: &str) -> Option<&ResourceCapability> {
        self.rest
            .resources
            .iter()
            .find(|r| r.resource_type == resource_type)
    }
}

/// The REST interface of a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestInterface {
    /// Always [`RestMode::Server`] for documents produced by the builder.
    pub mode: RestMode,
    /// System-level operations, unique, in first-seen order.
    pub operations: Vec<SystemOperation>,
    /// One entry per bound resource type, in registry order.
    pub resources: Vec<ResourceCapability>,
}

/// Capabilities for a single resource type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCapability {
    /// Canonical resource type name.
    pub resource_type: String,
    /// Profile URL for the resource type.
    pub profile: String,
    /// Resource-level operations, unique, in first-seen order.
    pub operations: Vec<ResourceOperation>,
    /// Search parameters, unique by name, in first-seen order.
    pub search_params: Vec<SearchParameterDeclaration>,
}

impl ResourceCapability {
    /// Creates an empty capability entry.
    pub fn new(resource_type: impl Into<String>, profile: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            profile: profile.into(),
            operations: Vec::new(),
            search_params: Vec::new(),
        }
    }

    /// Returns the declaration for a search parameter.
    pub fn search_param(&self, name: &str) -> Option<&SearchParameterDeclaration> {
        self.search_params.iter().find(|p| p.name == name)
    }

    /// Returns true if the resource supports an operation.
    pub fn supports(&self, operation: ResourceOperation) -> bool {
        self.operations.contains(&operation)
    }
}

/// A search parameter exposed on a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParameterDeclaration {
    /// Parameter name.
    pub name: String,
    /// Parameter type, as declared by the most recent contributing handler.
    pub param_type: SearchParamType,
    /// Qualifier parameters usable after this one (`subject.name`).
    pub chain: Vec<ChainLink>,
}

impl SearchParameterDeclaration {
    /// Creates a declaration with an empty chain.
    pub fn new(name: impl Into<String>, param_type: SearchParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
            chain: Vec::new(),
        }
    }
}

/// One qualifier link in a search parameter's chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainLink {
    /// Qualifier name (`name` for `subject.name`).
    pub name: String,
    /// Whether the contributing handler requires this qualifier.
    pub required: bool,
    /// Alternative qualifiers reachable through the same slot.
    pub also_chainable: Vec<AlternativeChain>,
}

impl ChainLink {
    /// Creates a link with no alternatives.
    pub fn new(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            required,
            also_chainable: Vec::new(),
        }
    }
}

/// An "also chainable" annotation on a [`ChainLink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeChain {
    /// Qualifier name of the alternative.
    pub name: String,
    /// Whether the contributing handler requires this qualifier.
    pub required: bool,
}
