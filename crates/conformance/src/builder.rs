//! Conformance document builder.
//!
//! One pass over a registry snapshot produces one [`CapabilityDocument`].
//! The document is purely derivative of the snapshot: resources and
//! operations that no binding declares never appear in it.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::chain::{self, SearchParamSet};
use crate::definitions::DefinitionResolver;
use crate::error::ConformanceResult;
use crate::model::{
    CapabilityDocument, ResourceCapability, RestInterface, RestMode, ServerIdentity,
};
use crate::operations::{ResourceOperation, SystemOperation};
use crate::registry::ResourceBinding;

/// Builds Conformance documents from resource bindings.
pub struct CapabilityBuilder<'a> {
    identity: &'a ServerIdentity,
    resolver: &'a dyn DefinitionResolver,
}

/// In-progress state for one resource type.
struct ResourceEntry {
    capability: ResourceCapability,
    seen_operations: HashSet<ResourceOperation>,
    search_params: SearchParamSet,
}

impl ResourceEntry {
    fn into_capability(self) -> ResourceCapability {
        let mut capability = self.capability;
        capability.search_params = self.search_params.into_declarations();
        capability
    }
}

impl<'a> CapabilityBuilder<'a> {
    /// Creates a builder for a server identity and definition resolver.
    pub fn new(identity: &'a ServerIdentity, resolver: &'a dyn DefinitionResolver) -> Self {
        Self { identity, resolver }
    }

    /// Builds a document from bindings, in the order given.
    ///
    /// Bindings that resolve to the same canonical resource type contribute
    /// to a single resource entry.
    ///
    /// # Errors
    ///
    /// Fails on the first binding whose resource type cannot be resolved. No
    /// partial document is returned.
    pub fn build(&self, bindings: &[ResourceBinding]) -> ConformanceResult<CapabilityDocument> {
        let mut system_operations: Vec<SystemOperation> = Vec::new();
        let mut seen_system: HashSet<SystemOperation> = HashSet::new();
        let mut entries: Vec<ResourceEntry> = Vec::new();
        let mut by_type: HashMap<String, usize> = HashMap::new();

        for binding in bindings {
            let definition = self.resolver.resolve(&binding.resource_name)?;

            let index = *by_type.entry(definition.name.clone()).or_insert_with(|| {
                entries.push(ResourceEntry {
                    capability: ResourceCapability::new(&definition.name, &definition.profile),
                    seen_operations: HashSet::new(),
                    search_params: SearchParamSet::new(),
                });
                entries.len() - 1
            });
            let entry = &mut entries[index];

            for handler in &binding.handlers {
                if let Some(op) = handler.resource_operation
                    && entry.seen_operations.insert(op)
                {
                    entry.capability.operations.push(op);
                }

                if let Some(op) = handler.system_operation
                    && seen_system.insert(op)
                {
                    system_operations.push(op);
                }

                if handler.is_search() {
                    chain::assemble(handler.parameters(), &mut entry.search_params);
                }
            }

            debug!(
                resource_type = %definition.name,
                handlers = binding.handlers.len(),
                operations = entry.capability.operations.len(),
                search_params = entry.search_params.len(),
                "Added resource to conformance"
            );
        }

        let resources: Vec<ResourceCapability> = entries
            .into_iter()
            .map(ResourceEntry::into_capability)
            .collect();

        info!(
            resources = resources.len(),
            system_operations = system_operations.len(),
            "Built conformance document"
        );

        Ok(CapabilityDocument {
            software: self.identity.clone(),
            rest: RestInterface {
                mode: RestMode::Server,
                operations: system_operations,
                resources,
            },
        })
    }
}
