//! Run configuration shared by every Ganglia component.
//!
//! Configuration is resolved exactly once at process startup, layering an
//! optional TOML file, `GANGLIA_*` environment variables, and command-line
//! flags into a single immutable [`Config`] value that is passed explicitly
//! to every component. Nothing in the system reads configuration from
//! anywhere else after startup.

mod defaults;
mod logging;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use logging::{LogFormat, LogFormatParseError};
pub use ortho_config::OrthoError;

/// Immutable run configuration for the reconciler.
///
/// Fields are public so tests can construct variations directly; production
/// code goes through [`Config::load_from_iter`] and the accessor methods.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "GANGLIA")]
pub struct Config {
    /// Coordination-store endpoints, `host:port`.
    #[serde(default = "defaults::coordination_hosts")]
    pub coordination_hosts: Vec<String>,
    /// Coordination-store path holding the published topology.
    #[serde(default = "defaults::topology_path")]
    pub topology_path: String,
    /// Base URI of the node agent's state endpoint.
    #[serde(default = "defaults::agent_uri")]
    pub agent_uri: String,
    /// Output location for the registrar configuration document.
    #[serde(default = "defaults::registrar_config")]
    pub registrar_config: Utf8PathBuf,
    /// Output location for the router configuration document.
    #[serde(default = "defaults::router_config")]
    pub router_config: Utf8PathBuf,
    /// Output location for the public-edge load-balancer stanzas.
    ///
    /// Edge projection is skipped entirely when unset.
    #[serde(default)]
    pub edge_config: Option<Utf8PathBuf>,
    /// Restrict router projection to services marked public.
    #[serde(default)]
    pub public_only: bool,
    /// Log filter expression, `tracing` env-filter syntax.
    #[serde(default = "defaults::log_filter_string")]
    pub log_filter: String,
    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Config {
    /// Coordination-store endpoints.
    #[must_use]
    pub fn coordination_hosts(&self) -> &[String] {
        &self.coordination_hosts
    }

    /// Coordination-store path holding the published topology.
    #[must_use]
    pub fn topology_path(&self) -> &str {
        &self.topology_path
    }

    /// Base URI of the node agent's state endpoint.
    #[must_use]
    pub fn agent_uri(&self) -> &str {
        &self.agent_uri
    }

    /// Output location for the registrar configuration document.
    #[must_use]
    pub fn registrar_config(&self) -> &Utf8Path {
        self.registrar_config.as_path()
    }

    /// Output location for the router configuration document.
    #[must_use]
    pub fn router_config(&self) -> &Utf8Path {
        self.router_config.as_path()
    }

    /// Output location for the public-edge stanzas, when edge projection is
    /// enabled.
    #[must_use]
    pub fn edge_config(&self) -> Option<&Utf8Path> {
        self.edge_config.as_deref()
    }

    /// Whether router projection is restricted to public services.
    #[must_use]
    pub fn public_only(&self) -> bool {
        self.public_only
    }

    /// Log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            coordination_hosts: defaults::coordination_hosts(),
            topology_path: defaults::topology_path(),
            agent_uri: defaults::agent_uri(),
            registrar_config: defaults::registrar_config(),
            router_config: defaults::router_config(),
            edge_config: None,
            public_only: false,
            log_filter: defaults::log_filter_string(),
            log_format: LogFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_collaborators() {
        let config = Config::default();
        assert_eq!(config.coordination_hosts(), ["127.0.0.1:2379"]);
        assert_eq!(config.topology_path(), "/ganglia");
        assert_eq!(config.agent_uri(), "http://localhost:5051");
        assert_eq!(config.registrar_config().as_str(), "registrar.conf.json");
        assert_eq!(config.router_config().as_str(), "router.conf.json");
        assert_eq!(config.edge_config(), None);
        assert!(!config.public_only());
        assert_eq!(config.log_filter(), "info");
        assert_eq!(config.log_format(), LogFormat::Json);
    }

    #[test]
    fn edge_config_accessor_borrows_path() {
        let mut config = Config::default();
        config.edge_config = Some(Utf8PathBuf::from("/etc/haproxy/ganglia.cfg"));
        assert_eq!(
            config.edge_config().map(Utf8Path::as_str),
            Some("/etc/haproxy/ganglia.cfg")
        );
    }
}
