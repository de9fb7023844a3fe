//! The canonical topology in the coordination store.
//!
//! One node in etcd holds the full list of declared services as JSON. Every
//! reconcile run reads it; publish runs replace it under optimistic
//! concurrency: the key's modification revision observed at read time is the
//! opaque version token, and a publish is a single transaction guarded on
//! that token. A concurrent writer makes the guard fail, which surfaces as
//! [`StoreError::VersionConflict`] verbatim — the caller re-fetches and
//! re-runs if it wants eventual success; nothing here retries or merges.

mod error;

use std::time::Duration;

use etcd_client::{Client, Compare, CompareOp, ConnectOptions, Txn, TxnOp};
use ganglia_types::Topology;
use tracing::{debug, info};

pub use error::StoreError;

const STORE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::topology");

/// Connect timeout towards the coordination store.
///
/// This is the only timeout in the system; see the concurrency model notes
/// in the crate documentation of the cli crate.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(600);

/// A fetched topology together with the version token guarding its
/// replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionedTopology {
    /// The deserialised topology document.
    pub topology: Topology,
    /// Modification revision of the key at read time.
    pub revision: i64,
}

/// Client for the topology node in the coordination store.
pub struct TopologyStore {
    client: Client,
}

impl std::fmt::Debug for TopologyStore {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("TopologyStore").finish_non_exhaustive()
    }
}

impl TopologyStore {
    /// Connects to the coordination store.
    pub async fn connect(hosts: &[String]) -> Result<Self, StoreError> {
        let options = ConnectOptions::new().with_connect_timeout(CONNECT_TIMEOUT);
        let client = Client::connect(hosts, Some(options))
            .await
            .map_err(|source| StoreError::Connect { source })?;
        debug!(target: STORE_TARGET, hosts = ?hosts, "connected to coordination store");
        Ok(Self { client })
    }

    /// Reads the stored topology and its version token.
    pub async fn fetch(&mut self, path: &str) -> Result<VersionedTopology, StoreError> {
        let response = self
            .client
            .get(path, None)
            .await
            .map_err(|source| StoreError::Read {
                path: path.to_owned(),
                source,
            })?;
        let Some(node) = response.kvs().first() else {
            return Err(StoreError::NotFound {
                path: path.to_owned(),
            });
        };
        let topology =
            serde_json::from_slice(node.value()).map_err(|source| StoreError::DecodeTopology {
                path: path.to_owned(),
                source,
            })?;
        Ok(VersionedTopology {
            topology,
            revision: node.mod_revision(),
        })
    }

    /// Publishes a topology at `path` under optimistic concurrency.
    ///
    /// With `expected = None` the write is guarded on the key not existing
    /// yet; with `Some(revision)` it is guarded on the key's modification
    /// revision still matching the token returned by [`Self::fetch`]. Either
    /// guard failing means another writer got there first, reported as
    /// [`StoreError::VersionConflict`] with the stored topology unchanged.
    pub async fn publish(
        &mut self,
        path: &str,
        topology: &Topology,
        expected: Option<i64>,
    ) -> Result<(), StoreError> {
        let payload = canonical_bytes(topology)?;
        let guard = match expected {
            Some(revision) => Compare::mod_revision(path, CompareOp::Equal, revision),
            None => Compare::create_revision(path, CompareOp::Equal, 0),
        };
        let transaction = Txn::new()
            .when(vec![guard])
            .and_then(vec![TxnOp::put(path, payload, None)]);
        let response = self
            .client
            .txn(transaction)
            .await
            .map_err(|source| StoreError::Write {
                path: path.to_owned(),
                source,
            })?;
        if !response.succeeded() {
            return Err(StoreError::VersionConflict {
                path: path.to_owned(),
            });
        }
        info!(
            target: STORE_TARGET,
            path,
            services = topology.services.len(),
            "topology published"
        );
        Ok(())
    }
}

/// Serialises a topology deterministically.
///
/// Struct fields serialise in declaration order and open-ended check maps
/// are key-sorted, so equal topologies always produce identical bytes; the
/// conditional write therefore never churns the stored value without a real
/// change.
fn canonical_bytes(topology: &Topology) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(topology).map_err(|source| StoreError::EncodeTopology { source })
}

#[cfg(test)]
mod tests {
    use ganglia_types::{ServiceDefinition, ServicePatterns};

    use super::*;

    fn topology() -> Topology {
        Topology::new(vec![ServiceDefinition {
            name: "web".to_owned(),
            public: true,
            patterns: ServicePatterns {
                executor: "marathon".to_owned(),
                task: "web".to_owned(),
            },
            port_index: 0,
            service_port: 8080,
            registrar: Default::default(),
            router: Default::default(),
        }])
    }

    #[test]
    fn canonical_bytes_are_reproducible() {
        let first = canonical_bytes(&topology()).expect("topology should serialise");
        let second = canonical_bytes(&topology()).expect("topology should serialise");
        assert_eq!(first, second);
    }

    #[test]
    fn canonical_bytes_round_trip() {
        let bytes = canonical_bytes(&topology()).expect("topology should serialise");
        let decoded: Topology =
            serde_json::from_slice(&bytes).expect("canonical bytes should decode");
        assert_eq!(decoded, topology());
    }
}
