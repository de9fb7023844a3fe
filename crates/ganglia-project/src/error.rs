//! Error types for projection, diffing, and restart coordination.

use std::io;
use std::process::ExitStatus;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Failures building or writing projected configuration.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// Reading the previous content of a target file failed.
    #[error("failed to read previous configuration '{path}': {source}")]
    ReadPrevious {
        /// Target file.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Preserving the previous content at the `.old` sibling failed.
    #[error("failed to preserve previous configuration at '{path}': {source}")]
    PreserveOld {
        /// Sibling path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Staging the new content in a temporary file failed.
    #[error("failed to stage new configuration for '{path}': {source}")]
    Stage {
        /// Target file.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Atomically replacing the target with the staged content failed.
    #[error("failed to replace configuration '{path}': {source}")]
    Replace {
        /// Target file.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The operator's router document is not valid JSON.
    #[error("failed to parse router document '{path}': {source}")]
    DecodeRouterDocument {
        /// Router document path.
        path: Utf8PathBuf,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
    /// The operator's router document is valid JSON but not an object.
    #[error("router document '{path}' must be a JSON object")]
    RouterDocumentNotObject {
        /// Router document path.
        path: Utf8PathBuf,
    },
    /// A projected document could not be serialised.
    #[error("failed to serialise projected configuration: {source}")]
    EncodeDocument {
        /// Underlying serialisation error.
        #[source]
        source: serde_json::Error,
    },
}

/// Failures running a recovery action for a dependent daemon.
#[derive(Debug, Error)]
pub enum RestartError {
    /// No recovery command is configured for a target that must restart.
    #[error("no recovery command for {target}: environment variable {variable} is unset or empty")]
    MissingCommand {
        /// Restart target name.
        target: &'static str,
        /// Environment variable that was consulted.
        variable: String,
    },
    /// The recovery command could not be launched.
    #[error("failed to launch recovery command for {target}: {source}")]
    Launch {
        /// Restart target name.
        target: &'static str,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The recovery command ran but exited unsuccessfully.
    #[error("recovery command for {target} failed with {status}")]
    CommandFailed {
        /// Restart target name.
        target: &'static str,
        /// Exit status of the command.
        status: ExitStatus,
    },
}
