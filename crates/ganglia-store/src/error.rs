//! Error types for coordination-store access.

use thiserror::Error;

/// Failures talking to or interpreting the coordination store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("failed to connect to coordination store: {source}")]
    Connect {
        /// Underlying client error.
        #[source]
        source: etcd_client::Error,
    },
    /// Reading a key failed.
    #[error("failed to read '{path}' from coordination store: {source}")]
    Read {
        /// Key that was read.
        path: String,
        /// Underlying client error.
        #[source]
        source: etcd_client::Error,
    },
    /// Writing a key failed at the transport level.
    #[error("failed to write '{path}' to coordination store: {source}")]
    Write {
        /// Key that was written.
        path: String,
        /// Underlying client error.
        #[source]
        source: etcd_client::Error,
    },
    /// No topology has been published at the given path.
    #[error("no topology published at '{path}'")]
    NotFound {
        /// Key that was read.
        path: String,
    },
    /// Another writer updated the key since the version token was read.
    ///
    /// The stored topology is unchanged. Surfaced verbatim; the caller must
    /// re-fetch and re-run to retry.
    #[error("topology at '{path}' was updated by a concurrent writer")]
    VersionConflict {
        /// Key that was contended.
        path: String,
    },
    /// The stored bytes are not a valid topology document.
    #[error("stored topology at '{path}' is invalid: {source}")]
    DecodeTopology {
        /// Key that was read.
        path: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
    /// The topology could not be serialised.
    #[error("failed to serialise topology: {source}")]
    EncodeTopology {
        /// Underlying serialisation error.
        #[source]
        source: serde_json::Error,
    },
}
