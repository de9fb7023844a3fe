//! Building registrar, router, and public-edge configuration.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::io;

use camino::Utf8Path;
use ganglia_types::{
    Discovery, RegistrarDocument, RegistrarEntry, ResolvedEndpoint, RouterDocument, RouterEntry,
    ServiceDefinition,
};
use serde::Serialize;

use crate::error::ProjectError;

/// Router document key owned by the reconciler.
const SERVICES_KEY: &str = "services";

/// Reporter/discovery backend name written into the generated documents.
const COORDINATION_METHOD: &str = "etcd";

/// Link-local address the edge balancer uses to reach the node-local router.
const HOST_LOCAL_ADDRESS: &str = "169.254.255.254";

/// Inputs shared by every projection in one run.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionContext<'run> {
    /// Coordination-store endpoints written into discovery pointers.
    pub coordination_hosts: &'run [String],
    /// Coordination-store path the topology and discovery nodes live under.
    pub base_path: &'run str,
}

/// Builds the registrar document for this node.
///
/// One entry per resolved endpoint, in the order the services and their
/// endpoints were resolved. Registrar entries are never filtered by
/// visibility: every matched instance registers for local health visibility
/// even when router projection is restricted to public services.
#[must_use]
pub fn registrar_document(
    context: ProjectionContext<'_>,
    instance_id: &str,
    resolved: &[(&ServiceDefinition, Vec<ResolvedEndpoint>)],
) -> RegistrarDocument {
    let mut services = Vec::new();
    for (definition, endpoints) in resolved {
        for endpoint in endpoints {
            services.push(RegistrarEntry {
                host: endpoint.host.clone(),
                port: endpoint.port,
                reporter_type: COORDINATION_METHOD.to_owned(),
                etcd_hosts: context.coordination_hosts.to_vec(),
                etcd_path: definition.node_path(context.base_path),
                check_interval: definition.registrar.check_interval,
                checks: definition.registrar.checks.clone(),
            });
        }
    }
    RegistrarDocument {
        instance_id: instance_id.to_owned(),
        services,
    }
}

/// Builds the router entry for one service.
///
/// The entry is independent of how many instances are running: traffic is
/// routed through the discovery pointer, not an enumerated endpoint list.
/// Operator-declared default servers and HAProxy options pass through
/// unchanged; only the discovery section and the HAProxy port are computed.
#[must_use]
pub fn router_entry(
    context: ProjectionContext<'_>,
    definition: &ServiceDefinition,
) -> RouterEntry {
    let mut haproxy = definition.router.haproxy.clone();
    haproxy.port = definition.service_port;
    RouterEntry {
        default_servers: definition.router.default_servers.clone(),
        discovery: Discovery {
            method: COORDINATION_METHOD.to_owned(),
            path: definition.node_path(context.base_path),
            hosts: context.coordination_hosts.to_vec(),
        },
        haproxy,
    }
}

/// Builds the router entries for every projected service, keyed by name.
///
/// In public-only mode, services not marked public are left out of the
/// router document entirely.
#[must_use]
pub fn router_services(
    context: ProjectionContext<'_>,
    definitions: &[ServiceDefinition],
    public_only: bool,
) -> BTreeMap<String, RouterEntry> {
    definitions
        .iter()
        .filter(|definition| !public_only || definition.public)
        .map(|definition| (definition.name.clone(), router_entry(context, definition)))
        .collect()
}

/// Loads the operator's router document from disk.
///
/// A missing file yields an empty document so a node can bootstrap before
/// the operator has written one; the diff gate treats the corresponding
/// target as changed by definition on that first run.
pub fn load_router_document(path: &Utf8Path) -> Result<RouterDocument, ProjectError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(RouterDocument::new()),
        Err(source) => {
            return Err(ProjectError::ReadPrevious {
                path: path.to_owned(),
                source,
            });
        }
    };
    let value: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|source| ProjectError::DecodeRouterDocument {
            path: path.to_owned(),
            source,
        })?;
    match value {
        serde_json::Value::Object(document) => Ok(document),
        _ => Err(ProjectError::RouterDocumentNotObject {
            path: path.to_owned(),
        }),
    }
}

/// Replaces the `services` key of the operator's router document.
///
/// Every other top-level key passes through byte-for-byte; the operator owns
/// them.
pub fn merge_router_document(
    mut document: RouterDocument,
    services: &BTreeMap<String, RouterEntry>,
) -> Result<RouterDocument, ProjectError> {
    let services_value =
        serde_json::to_value(services).map_err(|source| ProjectError::EncodeDocument { source })?;
    document.insert(SERVICES_KEY.to_owned(), services_value);
    Ok(document)
}

/// Renders the load-balancer stanzas for every public service.
///
/// The template is the contract with the edge balancer; each public service
/// contributes one frontend/backend pair forwarding its static service port
/// to the node-local router.
#[must_use]
pub fn edge_stanzas(definitions: &[ServiceDefinition]) -> String {
    let mut rendered = String::new();
    for definition in definitions.iter().filter(|definition| definition.public) {
        let name = &definition.name;
        let port = definition.service_port;
        let _ = writeln!(rendered, "frontend {name}");
        let _ = writeln!(rendered, "    mode tcp");
        let _ = writeln!(rendered, "    bind *:{port}");
        let _ = writeln!(rendered, "    default_backend {name}");
        let _ = writeln!(rendered, "backend {name}");
        let _ = writeln!(rendered, "    mode tcp");
        let _ = writeln!(rendered, "    balance roundrobin");
        let _ = writeln!(
            rendered,
            "    server {name}-hostlocal {HOST_LOCAL_ADDRESS}:{port} check"
        );
    }
    rendered
}

/// Serialises a projected document to the bytes written on disk.
///
/// Compact JSON with a trailing newline; the encoding is deterministic so
/// unchanged derived state produces byte-identical files and the diff gate
/// reports no change.
pub fn encode_document<T: Serialize>(document: &T) -> Result<Vec<u8>, ProjectError> {
    let mut bytes =
        serde_json::to_vec(document).map_err(|source| ProjectError::EncodeDocument { source })?;
    bytes.push(b'\n');
    Ok(bytes)
}
