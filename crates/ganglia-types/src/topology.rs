//! The cluster-wide set of declared services.

use serde::{Deserialize, Serialize};

use crate::ServiceDefinition;

/// Every service currently declared cluster-wide, as last published to the
/// coordination store.
///
/// A topology is created by a publish operation, read by every reconcile
/// operation, and superseded by the next successful publish. The version
/// token guarding concurrent publishes travels outside the document itself;
/// see the store crate.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Topology {
    /// All declared services.
    pub services: Vec<ServiceDefinition>,
}

impl Topology {
    /// Builds a topology from the given definitions.
    #[must_use]
    pub fn new(services: Vec<ServiceDefinition>) -> Self {
        Self { services }
    }

    /// Returns the first service name declared more than once, if any.
    ///
    /// Service names key the coordination-store layout and the router
    /// document, so duplicates must be rejected before publishing.
    #[must_use]
    pub fn duplicate_name(&self) -> Option<&str> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.services.len());
        for service in &self.services {
            if seen.contains(&service.name.as_str()) {
                return Some(&service.name);
            }
            seen.push(&service.name);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ServicePatterns, ServiceDefinition};

    fn definition(name: &str) -> ServiceDefinition {
        ServiceDefinition {
            name: name.to_owned(),
            public: false,
            patterns: ServicePatterns {
                executor: ".*".to_owned(),
                task: name.to_owned(),
            },
            port_index: 0,
            service_port: 8080,
            registrar: Default::default(),
            router: Default::default(),
        }
    }

    #[test]
    fn unique_names_pass() {
        let topology = Topology::new(vec![definition("web"), definition("api")]);
        assert_eq!(topology.duplicate_name(), None);
    }

    #[test]
    fn duplicate_names_are_reported() {
        let topology = Topology::new(vec![definition("web"), definition("api"), definition("web")]);
        assert_eq!(topology.duplicate_name(), Some("web"));
    }

    #[test]
    fn serialisation_is_stable() {
        let topology = Topology::new(vec![definition("web")]);
        let first = serde_json::to_vec(&topology).expect("topology should serialise");
        let second = serde_json::to_vec(&topology).expect("topology should serialise");
        assert_eq!(first, second);
    }
}
