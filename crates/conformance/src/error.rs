//! Error types for conformance document generation.
//!
//! Building a Conformance document has no I/O and no transient dependencies,
//! so every error here reflects a static misconfiguration of the server: an
//! unknown resource type bound in the registry, a malformed registry manifest,
//! or an unrecognized operation/parameter code.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type for conformance operations.
#[derive(Error, Debug)]
pub enum ConformanceError {
    /// A resource binding names a type the definition resolver does not know.
    #[error("unknown resource type: {resource_type}")]
    UnknownResourceType { resource_type: String },

    /// An operation code could not be parsed.
    #[error("invalid {scope} operation code: {code}")]
    InvalidOperationCode { scope: &'static str, code: String },

    /// A search parameter type could not be parsed.
    #[error("invalid search parameter type: {value}")]
    InvalidParamType { value: String },

    /// The registry manifest is structurally valid JSON but semantically wrong.
    #[error("invalid registry manifest: {message}")]
    InvalidManifest { message: String },

    /// The registry manifest could not be read from disk.
    #[error("failed to read registry manifest {path}: {source}")]
    ManifestIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failed.
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl ConformanceError {
    /// Returns true if this error indicates a registry/definition mismatch.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ConformanceError::UnknownResourceType { .. } | ConformanceError::InvalidManifest { .. }
        )
    }
}

/// Result type alias for conformance operations.
pub type ConformanceResult<T> = Result<T, ConformanceError>;
