//! Cached Conformance provider.
//!
//! The provider owns the process-scoped Conformance document. The first call
//! to [`ConformanceProvider::get_or_build`] builds it from a registry
//! snapshot; later calls return the cached document with a single atomic
//! load. Readers never block.
//!
//! Two callers that both observe an empty cache will both build a full
//! document. Each builds into its own local value and publishes it with one
//! atomic store, so no caller can observe a partially built document; the
//! last store wins. Later registry changes are not picked up until
//! [`ConformanceProvider::invalidate`] or [`ConformanceProvider::rebuild`] is
//! called.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::{debug, info, warn};

use crate::builder::CapabilityBuilder;
use crate::definitions::DefinitionResolver;
use crate::error::ConformanceResult;
use crate::model::{CapabilityDocument, ServerIdentity};
use crate::registry::BindingRegistry;

/// Builds the Conformance document on demand and caches it.
pub struct ConformanceProvider {
    identity: ServerIdentity,
    registry: Arc<dyn BindingRegistry>,
    resolver: Arc<dyn DefinitionResolver>,
    cached: ArcSwapOption<CapabilityDocument>,
}

impl ConformanceProvider {
    /// Creates a provider with an empty cache.
    pub fn new(
        identity: ServerIdentity,
        registry: Arc<dyn BindingRegistry>,
        resolver: Arc<dyn DefinitionResolver>,
    ) -> Self {
        Self {
            identity,
            registry,
            resolver,
            cached: ArcSwapOption::empty(),
        }
    }

    /// Returns the server identity written into documents.
    pub fn identity(&self) -> &ServerIdentity {
        &self.identity
    }

    /// Returns the cached document, building it first if necessary.
    ///
    /// # Errors
    ///
    /// Propagates build failures (unknown resource types). Nothing is cached
    /// when the build fails.
    pub fn get_or_build(&self) -> ConformanceResult<Arc<CapabilityDocument>> {
        if let Some(document) = self.cached.load_full() {
            return Ok(document);
        }
        debug!("Conformance cache empty, building");
        self.rebuild()
    }

    /// Returns the cached document without building.
    pub fn cached(&self) -> Option<Arc<CapabilityDocument>> {
        self.cached.load_full()
    }

    /// Builds a fresh document from the current registry and publishes it.
    ///
    /// # Errors
    ///
    /// Propagates build failures. The previously cached document, if any, is
    /// left in place.
    pub fn rebuild(&self) -> ConformanceResult<Arc<CapabilityDocument>> {
        let bindings = self.registry.resource_bindings();
        let builder = CapabilityBuilder::new(&self.identity, self.resolver.as_ref());

        let document = match builder.build(&bindings) {
            Ok(document) => Arc::new(document),
            Err(e) => {
                warn!(error = %e, "Failed to build conformance document");
                return Err(e);
            }
        };

        self.cached.store(Some(Arc::clone(&document)));
        info!(
            resources = document.rest.resources.len(),
            "Published conformance document"
        );
        Ok(document)
    }

    /// Drops the cached document so the next call rebuilds it.
    pub fn invalidate(&self) {
        if self.cached.swap(None).is_some() {
            debug!("Conformance cache invalidated");
        }
    }
}

impl std::fmt::Debug for ConformanceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConformanceProvider")
            .field("identity", &self.identity)
            .field("cached", &self.cached.load().is_some())
            .finish()
    }
}
