//! CLI argument definitions for the Ganglia binary.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Command-line interface for the Ganglia service reconciler.
#[derive(Parser, Debug)]
#[command(name = "ganglia", disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// The operation to run.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Operations supported by the binary.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Publishes declared service manifests as the canonical topology.
    Publish {
        /// Manifest files, one declared service per file.
        #[arg(value_name = "MANIFEST", required = true)]
        manifests: Vec<Utf8PathBuf>,
    },
    /// Reconciles this node's sidecar configuration with the published
    /// topology.
    Reconcile,
}
