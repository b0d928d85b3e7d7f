//! Helios Conformance CLI
//!
//! Builds the FHIR Conformance document for a registry manifest and prints
//! it to stdout.

use std::sync::Arc;

use clap::Parser;
use helios_conformance::{
    ConformanceConfig, ConformanceProvider, RegistryManifest, init_logging, to_conformance_json,
};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = ConformanceConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    let manifest = RegistryManifest::from_path(&config.manifest).map_err(|e| {
        anyhow::anyhow!(
            "Failed to load registry manifest {}: {}",
            config.manifest.display(),
            e
        )
    })?;

    let identity = manifest.server.clone().unwrap_or_else(|| config.identity());
    info!(
        manifest = %config.manifest.display(),
        server = %identity.name,
        version = %identity.version,
        resources = manifest.resources.len(),
        "Building conformance document"
    );

    let provider = ConformanceProvider::new(
        identity,
        Arc::new(manifest.into_registry()),
        Arc::new(config.resolver()),
    );
    let document = provider.get_or_build()?;
    let json = to_conformance_json(&document);

    let output = if config.pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };
    println!("{}", output);

    Ok(())
}
