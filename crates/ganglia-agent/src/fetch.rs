//! Fetching the state document from the node agent.

use tracing::debug;

use crate::error::AgentError;
use crate::snapshot::AgentState;

const FETCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::fetch");

/// Path of the state document below the agent's base URI.
const STATE_PATH: &str = "/slave(1)/state";

/// Fetches a fresh state snapshot from the node agent.
///
/// The request blocks until the agent answers; no timeout is enforced. Each
/// run is a short-lived, externally-scheduled process, so a stalled agent
/// stalls the run rather than being papered over.
pub async fn fetch_state(base_uri: &str) -> Result<AgentState, AgentError> {
    let uri = format!("{}{STATE_PATH}", base_uri.trim_end_matches('/'));
    debug!(target: FETCH_TARGET, uri = %uri, "fetching node state");
    let response = reqwest::get(&uri)
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|source| AgentError::Fetch {
            uri: uri.clone(),
            source,
        })?;
    response
        .json::<AgentState>()
        .await
        .map_err(|source| AgentError::DecodeState { uri, source })
}
