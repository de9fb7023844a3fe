//! Declared service definitions as provided by operator manifests.

use serde::{Deserialize, Serialize};

/// Regular-expression patterns selecting the executors and tasks running a
/// service.
///
/// Both patterns are compiled once per run; they are stored here as source
/// text so definitions round-trip through the coordination store unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServicePatterns {
    /// Pattern matched against executor identifiers.
    pub executor: String,
    /// Pattern matched against task names.
    pub task: String,
}

/// Check policy forwarded to the registrar for every matched instance.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RegistrarPolicy {
    /// Seconds between health checks run by the registrar.
    #[serde(default)]
    pub check_interval: u32,
    /// Check definitions forwarded verbatim to the registrar.
    #[serde(default)]
    pub checks: Vec<serde_json::Value>,
}

/// A static fallback server declared by the operator for a router entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerEntry {
    /// Label the router uses for the server.
    pub name: String,
    /// Server host.
    pub host: String,
    /// Server port.
    pub port: u16,
}

/// Operator-declared HAProxy settings carried through to the router entry.
///
/// The `port` is overwritten by the projector with the declared service
/// port; `server_options` and `listen` pass through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HaproxyOptions {
    /// Frontend port the router binds for the service.
    #[serde(default)]
    pub port: u16,
    /// Options appended to each generated `server` line.
    #[serde(default)]
    pub server_options: String,
    /// Extra lines inserted into the service's `listen` stanza.
    #[serde(default)]
    pub listen: Vec<String>,
}

/// Static router-side declaration carried by a service definition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RouterPolicy {
    /// Fallback servers used when discovery yields no instances.
    #[serde(default)]
    pub default_servers: Vec<ServerEntry>,
    /// HAProxy settings for the generated listen stanza.
    #[serde(default)]
    pub haproxy: HaproxyOptions,
}

/// One declared network service: who runs it, which allocated port it
/// listens on, and the static registrar/router policy the operator supplied.
///
/// Definitions are created from manifests, published as part of a
/// [`crate::Topology`], and immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServiceDefinition {
    /// Service name; unique within a topology.
    pub name: String,
    /// Whether the service is exposed through the public edge.
    #[serde(default)]
    pub public: bool,
    /// Patterns selecting the executors and tasks running the service.
    pub patterns: ServicePatterns,
    /// Which of the task's allocated ports the service listens on.
    #[serde(default)]
    pub port_index: usize,
    /// The stable port the router exposes the service on.
    pub service_port: u16,
    /// Check policy forwarded to the registrar.
    #[serde(default)]
    pub registrar: RegistrarPolicy,
    /// Static router declaration.
    #[serde(default)]
    pub router: RouterPolicy,
}

impl ServiceDefinition {
    /// Coordination-store path holding this service's discovery data.
    #[must_use]
    pub fn node_path(&self, base_path: &str) -> String {
        format!("{base_path}/{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_json() -> &'static str {
        r#"{
            "name": "web",
            "patterns": {"executor": "marathon", "task": "web"},
            "service_port": 8080
        }"#
    }

    #[test]
    fn optional_manifest_fields_default() {
        let definition: ServiceDefinition =
            serde_json::from_str(minimal_json()).expect("definition should deserialise");
        assert!(!definition.public);
        assert_eq!(definition.port_index, 0);
        assert!(definition.registrar.checks.is_empty());
        assert!(definition.router.default_servers.is_empty());
        assert!(definition.router.haproxy.listen.is_empty());
    }

    #[test]
    fn node_path_appends_service_name() {
        let definition: ServiceDefinition =
            serde_json::from_str(minimal_json()).expect("definition should deserialise");
        assert_eq!(definition.node_path("/ganglia"), "/ganglia/web");
    }
}
