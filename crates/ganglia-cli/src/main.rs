//! CLI entrypoint for the Ganglia service reconciler.
//!
//! The binary delegates to [`ganglia_cli::run`], which loads configuration,
//! initialises telemetry, and executes the requested publish or reconcile
//! operation.

use std::io;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let mut stderr = io::stderr().lock();
    ganglia_cli::run(std::env::args_os(), &mut stderr).await
}
