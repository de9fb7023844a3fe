//! The node agent's state document.
//!
//! The shapes here mirror the agent's JSON exactly; the snapshot is decoded
//! once per run and treated as read-only afterwards. Traversal order in the
//! matcher follows the document's own framework/executor/task order, so the
//! field layout is the contract.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::AgentError;

/// Resource key under which the agent reports a task's port allocation.
pub(crate) const PORTS_RESOURCE: &str = "ports";

/// One value in a task's resource allocation.
///
/// The agent reports resources as an open-ended dictionary; only the shapes
/// below are meaningful to the reconciler. Anything else (objects, arrays,
/// nulls) fails snapshot decoding outright rather than surfacing later as a
/// cast failure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ResourceValue {
    /// Numeric allocation such as `cpus` or `mem`.
    Scalar(f64),
    /// Textual allocation; the `ports` key carries the compact range
    /// encoding in this shape.
    Text(String),
}

/// One running task and its resource allocation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaskState {
    /// Task name, matched against a service's task pattern.
    pub name: String,
    /// Resource allocation keyed by resource name.
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceValue>,
}

impl TaskState {
    /// Returns the raw port-range encoding from the task's allocation.
    ///
    /// A task that matched a service but has no usable `ports` resource is a
    /// cluster state mismatch; both absent and mis-shaped values are errors.
    pub fn port_range(&self) -> Result<&str, AgentError> {
        match self.resources.get(PORTS_RESOURCE) {
            Some(ResourceValue::Text(raw)) => Ok(raw),
            Some(ResourceValue::Scalar(_)) => Err(AgentError::PortsNotText {
                task: self.name.clone(),
            }),
            None => Err(AgentError::MissingPorts {
                task: self.name.clone(),
            }),
        }
    }
}

/// One executor and the tasks running under it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExecutorState {
    /// Executor identifier, matched against a service's executor pattern.
    pub id: String,
    /// Tasks currently running under the executor.
    #[serde(default)]
    pub tasks: Vec<TaskState>,
}

/// One framework and its executors on this node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FrameworkState {
    /// Executors the framework currently has on this node.
    #[serde(default)]
    pub executors: Vec<ExecutorState>,
}

/// The node agent's full state snapshot for one host.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AgentState {
    /// Node identifier; becomes the registrar document's instance id.
    pub id: String,
    /// Hostname instances are advertised under.
    pub hostname: String,
    /// Frameworks with presence on this node.
    #[serde(default)]
    pub frameworks: Vec<FrameworkState>,
}
