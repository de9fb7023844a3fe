//! Restarting the daemons that consume projected configuration.

use std::env;
use std::process::Command;

use tracing::{debug, info};

use crate::diff::FileState;
use crate::error::RestartError;

const RESTART_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::restart");

/// Environment-variable prefix for recovery command lookup.
const ENV_PREFIX: &str = "GANGLIA";

/// Daemons whose configuration a reconcile run may rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartTarget {
    /// The local registrar daemon.
    Registrar,
    /// The local router daemon.
    Router,
    /// The public-edge load balancer.
    PublicEdge,
}

impl RestartTarget {
    /// Human-readable target name used in errors and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Registrar => "registrar",
            Self::Router => "router",
            Self::PublicEdge => "public-edge",
        }
    }

    const fn env_fragment(self) -> &'static str {
        match self {
            Self::Registrar => "REGISTRAR",
            Self::Router => "ROUTER",
            Self::PublicEdge => "PUBLIC_EDGE",
        }
    }
}

/// Capability to bring a dependent daemon up on new configuration.
///
/// The core depends only on this trait; the concrete mechanism (subprocess,
/// RPC, orchestrator API) is supplied at the boundary so nothing here knows
/// about shells.
pub trait Recover {
    /// Performs the recovery action for `target`, blocking until done.
    fn recover(&self, target: RestartTarget) -> Result<(), RestartError>;
}

impl<R: Recover + ?Sized> Recover for &R {
    fn recover(&self, target: RestartTarget) -> Result<(), RestartError> {
        (**self).recover(target)
    }
}

/// Recovery through an operator-supplied shell command.
///
/// The command for each target is resolved from
/// `GANGLIA_<TARGET>_RESTART_CMD` at recovery time and run through `sh -c`,
/// blocking without timeout. An unset or empty variable for a target that
/// must restart is an error: a restart that has to happen but cannot is
/// something the operator must see, not a silent no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRecovery;

impl ShellRecovery {
    /// Builds the shell-backed recovery capability.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn command_variable(target: RestartTarget) -> String {
        format!("{ENV_PREFIX}_{}_RESTART_CMD", target.env_fragment())
    }
}

impl Recover for ShellRecovery {
    fn recover(&self, target: RestartTarget) -> Result<(), RestartError> {
        let variable = Self::command_variable(target);
        let command = env::var(&variable)
            .ok()
            .filter(|command| !command.trim().is_empty())
            .ok_or_else(|| RestartError::MissingCommand {
                target: target.as_str(),
                variable: variable.clone(),
            })?;
        info!(
            target: RESTART_TARGET,
            daemon = target.as_str(),
            %command,
            "running recovery command"
        );
        let status = Command::new("sh")
            .arg("-c")
            .arg(&command)
            .status()
            .map_err(|source| RestartError::Launch {
                target: target.as_str(),
                source,
            })?;
        if !status.success() {
            return Err(RestartError::CommandFailed {
                target: target.as_str(),
                status,
            });
        }
        Ok(())
    }
}

/// Invokes recovery for each daemon whose configuration actually changed.
#[derive(Debug)]
pub struct RestartCoordinator<R: Recover> {
    recovery: R,
}

impl<R: Recover> RestartCoordinator<R> {
    /// Builds a coordinator around the injected recovery capability.
    pub const fn new(recovery: R) -> Self {
        Self { recovery }
    }

    /// Restarts `target` iff the diff gate reported a change.
    ///
    /// The restart is not transactional with the preceding file write: a
    /// failure here leaves the new configuration on disk with the old daemon
    /// still running it, and the next run's diff will not retry.
    pub fn apply(&self, target: RestartTarget, state: FileState) -> Result<(), RestartError> {
        match state {
            FileState::Unchanged => {
                debug!(
                    target: RESTART_TARGET,
                    daemon = target.as_str(),
                    "configuration unchanged; not restarting"
                );
                Ok(())
            }
            FileState::Changed => self.recovery.recover(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::ffi::OsString;
    use std::sync::{Mutex, MutexGuard};

    use super::*;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    struct EnvOverride {
        key: String,
        previous: Option<OsString>,
        _guard: MutexGuard<'static, ()>,
    }

    impl EnvOverride {
        fn set(key: &str, value: Option<&str>) -> Self {
            let guard = ENV_MUTEX.lock().expect("env mutex poisoned");
            let previous = env::var_os(key);
            // Environment mutation is process-global; the mutex serialises
            // the tests that touch it.
            unsafe {
                match value {
                    Some(value) => env::set_var(key, value),
                    None => env::remove_var(key),
                }
            }
            Self {
                key: key.to_owned(),
                previous,
                _guard: guard,
            }
        }
    }

    impl Drop for EnvOverride {
        fn drop(&mut self) {
            match self.previous.take() {
                Some(value) => unsafe { env::set_var(&self.key, value) },
                None => unsafe { env::remove_var(&self.key) },
            }
        }
    }

    #[derive(Default)]
    struct CountingRecovery {
        invoked: RefCell<Vec<RestartTarget>>,
    }

    impl Recover for CountingRecovery {
        fn recover(&self, target: RestartTarget) -> Result<(), RestartError> {
            self.invoked.borrow_mut().push(target);
            Ok(())
        }
    }

    #[test]
    fn unchanged_configuration_never_invokes_recovery() {
        let recovery = CountingRecovery::default();
        let coordinator = RestartCoordinator::new(recovery);
        coordinator
            .apply(RestartTarget::Registrar, FileState::Unchanged)
            .expect("unchanged should succeed");
        coordinator
            .apply(RestartTarget::Router, FileState::Unchanged)
            .expect("unchanged should succeed");
        assert!(coordinator.recovery.invoked.borrow().is_empty());
    }

    #[test]
    fn changed_configuration_invokes_recovery_for_that_target() {
        let recovery = CountingRecovery::default();
        let coordinator = RestartCoordinator::new(recovery);
        coordinator
            .apply(RestartTarget::Router, FileState::Changed)
            .expect("changed should succeed");
        assert_eq!(
            *coordinator.recovery.invoked.borrow(),
            vec![RestartTarget::Router]
        );
    }

    #[test]
    fn missing_command_is_an_error_not_a_silent_no_op() {
        let _env = EnvOverride::set("GANGLIA_REGISTRAR_RESTART_CMD", None);
        let error = ShellRecovery::new()
            .recover(RestartTarget::Registrar)
            .expect_err("missing command should fail");
        assert!(matches!(error, RestartError::MissingCommand { .. }));
    }

    #[test]
    fn successful_command_recovers() {
        let _env = EnvOverride::set("GANGLIA_ROUTER_RESTART_CMD", Some("true"));
        ShellRecovery::new()
            .recover(RestartTarget::Router)
            .expect("successful command should recover");
    }

    #[test]
    fn failing_command_is_fatal() {
        let _env = EnvOverride::set("GANGLIA_PUBLIC_EDGE_RESTART_CMD", Some("exit 3"));
        let error = ShellRecovery::new()
            .recover(RestartTarget::PublicEdge)
            .expect_err("non-zero exit should fail");
        assert!(matches!(error, RestartError::CommandFailed { .. }));
    }
}
