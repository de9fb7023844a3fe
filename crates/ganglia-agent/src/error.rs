//! Error types for ambient-state fetching, decoding, and matching.

use thiserror::Error;

/// Failures decoding the compact port-range encoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// A range segment was not two integer bounds joined by a hyphen.
    #[error("malformed port range segment '{segment}'")]
    MalformedRange {
        /// The offending segment, as reported by the node agent.
        segment: String,
    },
    /// The requested index lies beyond the flattened port sequence.
    #[error("port index {index} out of range for {len} allocated ports")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of ports the task actually has allocated.
        len: usize,
    },
}

/// Failures compiling a service's match patterns.
///
/// Patterns come from the operator manifest, so a compile failure is a fatal
/// configuration error for the whole run, not a per-task condition.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The executor pattern is not a valid regular expression.
    #[error("invalid executor pattern '{pattern}': {source}")]
    ExecutorPattern {
        /// Pattern source text.
        pattern: String,
        /// Underlying compile error.
        #[source]
        source: regex::Error,
    },
    /// The task pattern is not a valid regular expression.
    #[error("invalid task pattern '{pattern}': {source}")]
    TaskPattern {
        /// Pattern source text.
        pattern: String,
        /// Underlying compile error.
        #[source]
        source: regex::Error,
    },
}

/// Failures fetching or interpreting ambient node state.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The node agent could not be reached or answered with an error status.
    #[error("failed to fetch node state from '{uri}': {source}")]
    Fetch {
        /// Endpoint that was queried.
        uri: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The node agent's response was not a valid state document.
    #[error("failed to decode node state from '{uri}': {source}")]
    DecodeState {
        /// Endpoint that was queried.
        uri: String,
        /// Underlying decode error.
        #[source]
        source: reqwest::Error,
    },
    /// A matched task carries no `ports` resource at all.
    ///
    /// This indicates a cluster state mismatch the operator must see, so the
    /// whole run fails rather than skipping the task.
    #[error("matched task '{task}' carries no ports resource")]
    MissingPorts {
        /// Task name.
        task: String,
    },
    /// A matched task's `ports` resource is not the range-string shape.
    #[error("matched task '{task}' has a ports resource that is not a range string")]
    PortsNotText {
        /// Task name.
        task: String,
    },
    /// A matched task's port allocation could not satisfy the service.
    #[error("matched task '{task}': {source}")]
    Ports {
        /// Task name.
        task: String,
        /// Underlying decode error.
        #[source]
        source: DecodeError,
    },
    /// A service's patterns failed to compile.
    #[error(transparent)]
    Match(#[from] MatchError),
}
