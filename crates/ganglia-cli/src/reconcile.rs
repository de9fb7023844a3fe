//! The reconcile operation: topology + ambient state → sidecar configuration.

use ganglia_agent::{fetch_state, resolve_endpoints};
use ganglia_config::Config;
use ganglia_project::{
    ProjectionContext, Recover, RestartCoordinator, RestartTarget, edge_stanzas, encode_document,
    load_router_document, merge_router_document, registrar_document, replace_and_compare,
    router_services,
};
use ganglia_store::TopologyStore;
use tracing::info;

use crate::AppError;

const RECONCILE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::reconcile");

/// Reconciles this node's sidecar configuration with the published topology.
///
/// The flow is strictly sequential: fetch ambient state, fetch the topology,
/// resolve endpoints per service, project the registrar and router
/// documents, rewrite every target file through the diff gate, then restart
/// each dependent daemon whose configuration actually changed. Any failure
/// aborts the run immediately; files already rewritten stay rewritten.
pub(crate) async fn run<R: Recover>(config: &Config, recovery: &R) -> Result<(), AppError> {
    let snapshot = fetch_state(config.agent_uri()).await?;
    let mut store = TopologyStore::connect(config.coordination_hosts()).await?;
    let versioned = store.fetch(config.topology_path()).await?;
    let topology = versioned.topology;
    let context = ProjectionContext {
        coordination_hosts: config.coordination_hosts(),
        base_path: config.topology_path(),
    };

    let mut resolved = Vec::with_capacity(topology.services.len());
    for definition in &topology.services {
        let endpoints = resolve_endpoints(&snapshot, definition)?;
        resolved.push((definition, endpoints));
    }
    let endpoint_count: usize = resolved.iter().map(|(_, endpoints)| endpoints.len()).sum();

    let registrar = registrar_document(context, &snapshot.id, &resolved);
    let registrar_bytes = encode_document(&registrar)?;

    let operator = load_router_document(config.router_config())?;
    let services = router_services(context, &topology.services, config.public_only());
    let merged = merge_router_document(operator, &services)?;
    let router_bytes = encode_document(&merged)?;

    let registrar_state = replace_and_compare(config.registrar_config(), &registrar_bytes)?;
    let router_state = replace_and_compare(config.router_config(), &router_bytes)?;
    let edge_state = match config.edge_config() {
        Some(path) => {
            let stanzas = edge_stanzas(&topology.services);
            Some(replace_and_compare(path, stanzas.as_bytes())?)
        }
        None => None,
    };

    let coordinator = RestartCoordinator::new(recovery);
    coordinator.apply(RestartTarget::Registrar, registrar_state)?;
    coordinator.apply(RestartTarget::Router, router_state)?;
    if let Some(state) = edge_state {
        coordinator.apply(RestartTarget::PublicEdge, state)?;
    }

    info!(
        target: RECONCILE_TARGET,
        services = topology.services.len(),
        endpoints = endpoint_count,
        "reconciliation complete"
    );
    Ok(())
}
