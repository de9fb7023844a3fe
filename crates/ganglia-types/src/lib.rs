//! Shared data model for the Ganglia service reconciler.
//!
//! This crate provides the canonical type definitions exchanged between the
//! publishing and reconciling halves of the system: declared service
//! definitions, the cluster topology stored in the coordination store, the
//! registrar and router documents projected onto each node, and the resolved
//! endpoints that connect the two. It carries no I/O; the crates that move
//! these types over the wire or onto disk depend on it.
//!
//! # Core types
//!
//! - [`ServiceDefinition`] — one declared service and its match patterns
//! - [`Topology`] — the full set of declared services, as published
//! - [`ResolvedEndpoint`] — a concrete (host, port) of one running instance
//! - [`RegistrarDocument`] and [`RegistrarEntry`] — registrar sidecar input
//! - [`RouterEntry`], [`Discovery`], [`RouterDocument`] — router sidecar input

mod endpoint;
mod registrar;
mod router;
mod service;
mod topology;

pub use endpoint::ResolvedEndpoint;
pub use registrar::{RegistrarDocument, RegistrarEntry};
pub use router::{Discovery, RouterDocument, RouterEntry};
pub use service::{HaproxyOptions, RegistrarPolicy, RouterPolicy, ServerEntry, ServiceDefinition, ServicePatterns};
pub use topology::Topology;
