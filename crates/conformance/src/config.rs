//! Configuration for Conformance generation.
//!
//! Supports programmatic construction, command line arguments and
//! environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CONFORMANCE_SERVER_NAME` | Helios FHIR Server | Software name |
//! | `CONFORMANCE_SERVER_VERSION` | crate version | Software version |
//! | `CONFORMANCE_LOG_LEVEL` | info | Log level |
//! | `CONFORMANCE_PROFILE_BASE` | http://hl7.org/fhir/StructureDefinition | Profile base URL |
//! | `CONFORMANCE_MANIFEST` | registry.json | Registry manifest path |
//! | `CONFORMANCE_PRETTY` | true | Pretty-print output |
//! | `CONFORMANCE_STRICT_TYPES` | true | Reject unknown resource types |
//!
//! # Example
//!
//! ```rust
//! use helios_conformance::ConformanceConfig;
//!
//! let config = ConformanceConfig {
//!     server_name: "My Server".to_string(),
//!     strict_resource_types: false,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::definitions::{DEFAULT_PROFILE_BASE, StaticDefinitionResolver};
use crate::model::ServerIdentity;

/// Configuration for Conformance generation.
#[derive(Debug, Clone, Parser)]
#[command(name = "hfs-conformance")]
#[command(about = "Prints the FHIR Conformance document for a registry manifest")]
pub struct ConformanceConfig {
    /// Software name reported in the document.
    #[arg(long, env = "CONFORMANCE_SERVER_NAME", default_value = "Helios FHIR Server")]
    pub server_name: String,

    /// Software version reported in the document.
    #[arg(long, env = "CONFORMANCE_SERVER_VERSION", default_value = env!("CARGO_PKG_VERSION"))]
    pub server_version: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "CONFORMANCE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Base URL for resource profile references.
    #[arg(long, env = "CONFORMANCE_PROFILE_BASE", default_value = DEFAULT_PROFILE_BASE)]
    pub profile_base: String,

    /// Path to the registry manifest.
    #[arg(short, long, env = "CONFORMANCE_MANIFEST", default_value = "registry.json")]
    pub manifest: PathBuf,

    /// Pretty-print the JSON output.
    #[arg(long, env = "CONFORMANCE_PRETTY", default_value = "true", action = clap::ArgAction::Set)]
    pub pretty: bool,

    /// Reject resource types that are not known FHIR resources.
    #[arg(long, env = "CONFORMANCE_STRICT_TYPES", default_value = "true", action = clap::ArgAction::Set)]
    pub strict_resource_types: bool,
}

impl Default for ConformanceConfig {
    fn default() -> Self {
        Self {
            server_name: "Helios FHIR Server".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: "info".to_string(),
            profile_base: DEFAULT_PROFILE_BASE.to_string(),
            manifest: PathBuf::from("registry.json"),
            pretty: true,
            strict_resource_types: true,
        }
    }
}

impl ConformanceConfig {
    /// Creates a configuration from environment variables.
    ///
    /// Falls back to defaults when the environment cannot be parsed.
    pub fn from_env() -> Self {
        Self::try_parse_from(["hfs-conformance"]).unwrap_or_default()
    }

    /// Returns the server identity described by this configuration.
    pub fn identity(&self) -> ServerIdentity {
        ServerIdentity::new(&self.server_name, &self.server_version)
    }

    /// Returns a definition resolver honoring the profile base and strictness.
    pub fn resolver(&self) -> StaticDefinitionResolver {
        StaticDefinitionResolver::new(&self.profile_base).permissive(!self.strict_resource_types)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.server_name.trim().is_empty() {
            errors.push("Server name cannot be empty".to_string());
        }

        if self.server_version.trim().is_empty() {
            errors.push("Server version cannot be empty".to_string());
        }

        if !(self.profile_base.starts_with("http://") || self.profile_base.starts_with("https://"))
        {
            errors.push(format!(
                "Profile base must be an http(s) URL: {}",
                self.profile_base
            ));
        }

        if !["error", "warn", "info", "debug", "trace"].contains(&self.log_level.as_str()) {
            errors.push(format!("Unknown log level: {}", self.log_level));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    pub fn for_testing() -> Self {
        Self {
            server_name: "Test Server".to_string(),
            server_version: "0.0.0-test".to_string(),
            log_level: "debug".to_string(),
            pretty: false,
            strict_resource_types: false,
            ..Default::default()
        }
    }
}
