//! The document consumed by the local router daemon.

use serde::{Deserialize, Serialize};

use crate::{HaproxyOptions, ServerEntry};

/// How the router discovers live instances of a service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Discovery {
    /// Discovery backend; always the coordination store.
    pub method: String,
    /// Coordination-store path the registrars advertise instances under.
    pub path: String,
    /// Coordination-store endpoints.
    pub hosts: Vec<String>,
}

/// One service's entry in the router document.
///
/// Exactly one entry exists per declared service regardless of how many
/// instances are currently running: the discovery pointer, not an enumerated
/// instance list, is what routes traffic.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouterEntry {
    /// Operator-declared fallback servers, passed through unchanged.
    pub default_servers: Vec<ServerEntry>,
    /// Discovery pointer computed by the projector.
    pub discovery: Discovery,
    /// HAProxy settings; the port is the declared static service port.
    pub haproxy: HaproxyOptions,
}

/// The operator's router document.
///
/// Only the `services` key is owned by the reconciler; every other top-level
/// key belongs to the operator and passes through each run untouched.
pub type RouterDocument = serde_json::Map<String, serde_json::Value>;
