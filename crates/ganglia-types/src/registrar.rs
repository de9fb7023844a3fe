//! The document consumed by the local registrar daemon.

use serde::{Deserialize, Serialize};

/// One instance the registrar should advertise into the coordination store.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RegistrarEntry {
    /// Host the instance runs on.
    pub host: String,
    /// Port the instance listens on.
    pub port: u16,
    /// Reporter backend the registrar should use.
    pub reporter_type: String,
    /// Coordination-store endpoints the reporter connects to.
    pub etcd_hosts: Vec<String>,
    /// Coordination-store path the instance is advertised under.
    pub etcd_path: String,
    /// Seconds between health checks.
    pub check_interval: u32,
    /// Check definitions forwarded verbatim from the service manifest.
    pub checks: Vec<serde_json::Value>,
}

/// The full registrar configuration projected for one node.
///
/// `services` is a list: every matched instance registers, including
/// multiple instances of the same service on one node.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RegistrarDocument {
    /// Identifier of the node the registrar runs on.
    pub instance_id: String,
    /// All instances to advertise.
    pub services: Vec<RegistrarEntry>,
}
