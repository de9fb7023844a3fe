//! Ambient node state: fetching, decoding, and matching.
//!
//! The node agent exposes the live tree of frameworks, executors, and tasks
//! running on a host, each task carrying its resource allocation. This crate
//! owns that boundary: the snapshot data model with a typed resource union,
//! the HTTP fetch, the compact port-range decoding, and the matcher that
//! turns declared service patterns into concrete endpoints.
//!
//! The snapshot is fetched fresh each run and never mutated; everything here
//! is read-only over it.

mod error;
mod fetch;
mod matcher;
mod ports;
mod snapshot;

pub use error::{AgentError, DecodeError, MatchError};
pub use fetch::fetch_state;
pub use matcher::{ServiceMatcher, resolve_endpoints};
pub use ports::PortSequence;
pub use snapshot::{AgentState, ExecutorState, FrameworkState, ResourceValue, TaskState};
