//! Command-line runtime for the Ganglia service reconciler.
//!
//! The module owns argument parsing, configuration bootstrapping, telemetry
//! initialisation, and dispatch to the two operations: publishing the
//! declared topology into the coordination store, and reconciling a node's
//! sidecar configuration against it. Each invocation is a single sequential
//! flow of control; the Tokio runtime exists only because the store and
//! agent clients are async, and every await is sequential.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use ganglia_config::Config;
use ganglia_project::ShellRecovery;
use ortho_config::OrthoConfig;

mod cli;
mod config_args;
mod errors;
mod manifest;
mod publish;
mod reconcile;
mod telemetry;

use cli::{Cli, CliCommand};
use clap::Parser;
use config_args::split_config_arguments;
pub(crate) use errors::AppError;

/// Runs the CLI using the provided arguments, reporting failures to
/// `stderr`.
///
/// Configuration flags must appear before the command token; everything
/// after the command belongs to clap. The process exit code is non-zero on
/// any failure, and the error chain printed identifies the failing step.
pub async fn run<I, E>(args: I, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    E: Write,
{
    let args: Vec<OsString> = args.into_iter().collect();
    let split = split_config_arguments(&args);

    let result = Cli::try_parse_from(split.command_arguments(&args))
        .map_err(AppError::CliUsage)
        .and_then(|parsed| {
            Config::load_from_iter(split.config_arguments.iter().cloned())
                .map_err(AppError::LoadConfiguration)
                .map(|config| (parsed, config))
        });
    let (parsed, config) = match result {
        Ok(loaded) => loaded,
        Err(error) => {
            let _ = writeln!(stderr, "{error}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(error) = telemetry::initialise(&config) {
        let _ = writeln!(stderr, "{}", AppError::from(error));
        return ExitCode::FAILURE;
    }

    let outcome = match parsed.command {
        CliCommand::Publish { manifests } => publish::run(&config, &manifests).await,
        CliCommand::Reconcile => reconcile::run(&config, &ShellRecovery::new()).await,
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = writeln!(stderr, "{error}");
            ExitCode::FAILURE
        }
    }
}
