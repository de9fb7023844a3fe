//! Concrete locations of running service instances.

use serde::{Deserialize, Serialize};

/// A concrete (host, port) location of one running instance of a service.
///
/// The port is always drawn from the task's own resource allocation, never
/// guessed. Multiple endpoints may exist per service; they are kept in
/// snapshot traversal order and never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResolvedEndpoint {
    /// Host the instance runs on.
    pub host: String,
    /// Port the instance listens on.
    pub port: u16,
}
