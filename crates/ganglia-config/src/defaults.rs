//! Default values shared by the configuration loader and [`crate::Config::default`].

use camino::Utf8PathBuf;

/// Default coordination-store endpoint.
pub const DEFAULT_COORDINATION_HOST: &str = "127.0.0.1:2379";

/// Default coordination-store path for the published topology.
pub const DEFAULT_TOPOLOGY_PATH: &str = "/ganglia";

/// Default base URI for the node agent API.
pub const DEFAULT_AGENT_URI: &str = "http://localhost:5051";

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default coordination-store endpoints.
pub(crate) fn coordination_hosts() -> Vec<String> {
    vec![DEFAULT_COORDINATION_HOST.to_owned()]
}

/// Default topology path.
pub(crate) fn topology_path() -> String {
    DEFAULT_TOPOLOGY_PATH.to_owned()
}

/// Default node agent base URI.
pub(crate) fn agent_uri() -> String {
    DEFAULT_AGENT_URI.to_owned()
}

/// Default registrar document location.
pub(crate) fn registrar_config() -> Utf8PathBuf {
    Utf8PathBuf::from("registrar.conf.json")
}

/// Default router document location.
pub(crate) fn router_config() -> Utf8PathBuf {
    Utf8PathBuf::from("router.conf.json")
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub(crate) fn log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}
