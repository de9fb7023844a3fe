//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use ganglia_agent::AgentError;
use ganglia_project::{ProjectError, RestartError};
use ganglia_store::StoreError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to initialise telemetry: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to read manifest '{path}': {source}")]
    ReadManifest {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse manifest '{path}': {source}")]
    ParseManifest {
        path: Utf8PathBuf,
        #[source]
        source: serde_saphyr::Error,
    },
    #[error("service '{name}' is declared more than once")]
    DuplicateService { name: String },
    #[error(transparent)]
    Agent(#[from] AgentError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Project(#[from] ProjectError),
    #[error("recovery failed: {0}")]
    Restart(#[from] RestartError),
}
