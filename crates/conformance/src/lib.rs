//! # helios-conformance - FHIR Conformance Generation
//!
//! This crate builds the self-describing [Conformance](https://hl7.org/fhir/DSTU1/conformance.html)
//! document for the Helios FHIR Server: given the resource bindings a server
//! has registered, it aggregates which resource types exist, which operations
//! apply to each resource and to the system, and which search parameters
//! (including parameter chains) are accepted.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use helios_conformance::{
//!     ConformanceProvider, HandlerBinding, QueryParameter, ResourceOperation,
//!     SearchParamType, ServerIdentity, ServerRegistry, StaticDefinitionResolver,
//! };
//!
//! let registry = Arc::new(ServerRegistry::new());
//! registry.register(
//!     "Observation",
//!     HandlerBinding::new("read").with_resource_operation(ResourceOperation::Read),
//! );
//! registry.register(
//!     "Observation",
//!     HandlerBinding::search(
//!         "searchBySubject",
//!         vec![
//!             QueryParameter::optional("_count", SearchParamType::Number).into(),
//!             QueryParameter::required("subject", SearchParamType::Reference).into(),
//!             QueryParameter::optional("subject.name", SearchParamType::String).into(),
//!         ],
//!     ),
//! );
//!
//! let provider = ConformanceProvider::new(
//!     ServerIdentity::new("Helios FHIR Server", "0.1.0"),
//!     registry,
//!     Arc::new(StaticDefinitionResolver::default()),
//! );
//!
//! let document = provider.get_or_build()?;
//! let observation = document.resource("Observation").unwrap();
//! assert_eq!(observation.search_params[0].chain[0].name, "name");
//! # Ok::<(), helios_conformance::ConformanceError>(())
//! ```
//!
//! ## Search Parameter Chains
//!
//! Each search handler contributes one root search parameter: the first of
//! its query parameters that is not a reserved control parameter (`_count`,
//! `_sort`, ...). The second such parameter opens a chain link on that root,
//! and every later one is recorded as an "also chainable" alternative on the
//! same link. Handlers that share a root parameter name merge into one
//! declaration, each adding its own link.
//!
//! ## Caching
//!
//! [`ConformanceProvider`] builds the document once and serves it lock-free
//! afterwards. Registry changes are only reflected after
//! [`ConformanceProvider::invalidate`] or [`ConformanceProvider::rebuild`].
//!
//! ## Architecture
//!
//! - [`model`] - The Conformance document model
//! - [`operations`] - Resource and system operation codes
//! - [`params`] - Handler parameter types
//! - [`registry`] - Resource bindings and the in-memory registry
//! - [`definitions`] - Resource type name resolution
//! - [`chain`] - Search-parameter chain assembly
//! - [`builder`] - Document builder
//! - [`provider`] - Cached, invalidatable provider
//! - [`fhir`] - FHIR `Conformance` JSON rendering
//! - [`manifest`] - JSON registry manifests
//! - [`config`] - Configuration
//! - [`error`] - Error types

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod builder;
pub mod chain;
pub mod config;
pub mod definitions;
pub mod error;
pub mod fhir;
pub mod manifest;
pub mod model;
pub mod operations;
pub mod params;
pub mod provider;
pub mod registry;

// Re-export commonly used types
pub use builder::CapabilityBuilder;
pub use config::ConformanceConfig;
pub use definitions::{DefinitionResolver, ResourceDefinition, StaticDefinitionResolver};
pub use error::{ConformanceError, ConformanceResult};
pub use fhir::to_conformance_json;
pub use manifest::RegistryManifest;
pub use model::{
    AlternativeChain, CapabilityDocument, ChainLink, ResourceCapability, RestInterface, RestMode,
    SearchParameterDeclaration, ServerIdentity,
};
pub use operations::{ResourceOperation, SystemOperation};
pub use params::{Parameter, QueryParameter, SearchParamType};
pub use provider::ConformanceProvider;
pub use registry::{BindingRegistry, HandlerBinding, ResourceBinding, ServerRegistry};

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("helios_conformance={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
