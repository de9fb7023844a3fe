//! Projection of matched endpoints into sidecar configuration.
//!
//! Given the declared topology and the endpoints resolved on this node, this
//! crate builds the registrar document, merges router entries into the
//! operator's router document, and renders the public-edge load-balancer
//! stanzas. It also owns the two pieces that make reconciliation safe to
//! repeat: the content-digest diff gate deciding whether a file actually
//! changed, and the restart coordinator that invokes an injected recovery
//! capability only when it did.

mod diff;
mod error;
mod projector;
mod restart;

pub use diff::{FileState, replace_and_compare};
pub use error::{ProjectError, RestartError};
pub use projector::{
    ProjectionContext, edge_stanzas, encode_document, load_router_document,
    merge_router_document, registrar_document, router_entry, router_services,
};
pub use restart::{Recover, RestartCoordinator, RestartTarget, ShellRecovery};
