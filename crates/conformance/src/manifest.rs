//! Registry manifests.
//!
//! A manifest is a JSON description of a server's resource bindings, used to
//! produce a Conformance document without running the server itself:
//!
//! ```json
//! {
//!   "resources": [
//!     {
//!       "resource": "Observation",
//!       "handlers": [
//!         { "name": "read", "operation": "read" },
//!         {
//!           "name": "searchBySubject",
//!           "operation": "search-type",
//!           "search": [
//!             { "kind": "query", "name": "_count", "type": "number" },
//!             { "kind": "query", "name": "subject", "type": "reference", "required": true },
//!             { "kind": "query", "name": "subject.name", "type": "string" }
//!           ]
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConformanceError, ConformanceResult};
use crate::model::ServerIdentity;
use crate::registry::{ResourceBinding, ServerRegistry};

/// A serialized registry snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryManifest {
    /// Optional server identity; overrides configuration when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerIdentity>,
    /// Resource bindings, in registry order.
    #[serde(default)]
    pub resources: Vec<ResourceBinding>,
}

impl RegistryManifest {
    /// Parses and validates a manifest from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ConformanceError::Serialization`] for malformed JSON and
    /// [`ConformanceError::InvalidManifest`] for empty resource or parameter
    /// names.
    pub fn from_json_str(json: &str) -> ConformanceResult<Self> {
        let manifest: RegistryManifest = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Reads, parses and validates a manifest file.
    ///
    /// # Errors
    ///
    /// Returns [`ConformanceError::ManifestIo`] if the file cannot be read,
    /// otherwise as [`RegistryManifest::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> ConformanceResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConformanceError::ManifestIo {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = json.len(), "Read registry manifest");
        Self::from_json_str(&json)
    }

    /// Checks manifest contents beyond what deserialization enforces.
    ///
    /// # Errors
    ///
    /// Returns [`ConformanceError::InvalidManifest`] describing the first problem.
    pub fn validate(&self) -> ConformanceResult<()> {
        for (index, binding) in self.resources.iter().enumerate() {
            if binding.resource_name.trim().is_empty() {
                return Err(ConformanceError::InvalidManifest {
                    message: format!("resource binding {} has an empty resource name", index),
                });
            }

            for handler in &binding.handlers {
                let empty_param = handler
                    .parameters()
                    .iter()
                    .filter_map(|p| p.as_query())
                    .any(|q| q.name.trim().is_empty());
                if empty_param {
                    return Err(ConformanceError::InvalidManifest {
                        message: format!(
                            "handler '{}' on {} declares a query parameter with an empty name",
                            handler.name, binding.resource_name
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    /// Converts the manifest into an in-memory registry.
    pub fn into_registry(self) -> ServerRegistry {
        ServerRegistry::with_bindings(self.resources)
    }
}
