//! The publish operation: manifests → coordination store.

use camino::Utf8PathBuf;
use ganglia_config::Config;
use ganglia_store::{StoreError, TopologyStore};
use tracing::info;

use crate::AppError;
use crate::manifest;

const PUBLISH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::publish");

/// Publishes the declared manifests as the canonical topology.
///
/// The currently stored revision is observed first so the write is
/// conditional on it; if no topology exists yet the write is conditional on
/// the key still being absent. A concurrent publish from another host
/// surfaces as a version conflict and the operator re-runs.
pub(crate) async fn run(config: &Config, manifests: &[Utf8PathBuf]) -> Result<(), AppError> {
    let topology = manifest::load_topology(manifests)?;
    let mut store = TopologyStore::connect(config.coordination_hosts()).await?;
    let expected = match store.fetch(config.topology_path()).await {
        Ok(versioned) => Some(versioned.revision),
        Err(StoreError::NotFound { .. }) => None,
        Err(error) => return Err(error.into()),
    };
    store
        .publish(config.topology_path(), &topology, expected)
        .await?;
    info!(
        target: PUBLISH_TARGET,
        path = config.topology_path(),
        services = topology.services.len(),
        "topology published"
    );
    Ok(())
}
