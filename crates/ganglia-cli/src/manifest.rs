//! Loading declared service manifests.
//!
//! Each manifest file declares exactly one service as YAML. The publish
//! operation loads every file named on the command line, in order, and the
//! resulting topology must not declare the same service name twice.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use ganglia_types::{ServiceDefinition, Topology};
use tracing::info;

use crate::AppError;

const MANIFEST_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::manifest");

/// Loads one service definition from a YAML manifest.
pub(crate) fn load_service(path: &Utf8Path) -> Result<ServiceDefinition, AppError> {
    let text = fs::read_to_string(path).map_err(|source| AppError::ReadManifest {
        path: path.to_owned(),
        source,
    })?;
    serde_saphyr::from_str(&text).map_err(|source| AppError::ParseManifest {
        path: path.to_owned(),
        source,
    })
}

/// Loads every manifest into a topology, rejecting duplicate service names.
pub(crate) fn load_topology(paths: &[Utf8PathBuf]) -> Result<Topology, AppError> {
    let mut services = Vec::with_capacity(paths.len());
    for path in paths {
        let service = load_service(path)?;
        info!(
            target: MANIFEST_TARGET,
            manifest = %path,
            service = %service.name,
            service_port = service.service_port,
            "loaded service manifest"
        );
        services.push(service);
    }
    let topology = Topology::new(services);
    if let Some(name) = topology.duplicate_name() {
        return Err(AppError::DuplicateService {
            name: name.to_owned(),
        });
    }
    Ok(topology)
}
