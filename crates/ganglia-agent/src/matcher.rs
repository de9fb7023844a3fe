//! Matching declared service patterns against the ambient snapshot.

use ganglia_types::{ResolvedEndpoint, ServiceDefinition, ServicePatterns};
use regex::Regex;

use crate::error::{AgentError, MatchError};
use crate::ports::PortSequence;
use crate::snapshot::{AgentState, TaskState};

/// A service's executor/task patterns, compiled once for the run.
#[derive(Debug)]
pub struct ServiceMatcher {
    executor: Regex,
    task: Regex,
}

impl ServiceMatcher {
    /// Compiles both patterns of a service definition.
    pub fn compile(patterns: &ServicePatterns) -> Result<Self, MatchError> {
        let executor =
            Regex::new(&patterns.executor).map_err(|source| MatchError::ExecutorPattern {
                pattern: patterns.executor.clone(),
                source,
            })?;
        let task = Regex::new(&patterns.task).map_err(|source| MatchError::TaskPattern {
            pattern: patterns.task.clone(),
            source,
        })?;
        Ok(Self { executor, task })
    }

    /// Tasks whose executor and name both match, in snapshot traversal
    /// order.
    ///
    /// The order is the document's own framework/executor/task order, stable
    /// across runs against an unchanged snapshot; nothing is sorted or
    /// deduplicated.
    pub fn matching_tasks<'snapshot>(
        &self,
        state: &'snapshot AgentState,
    ) -> Vec<&'snapshot TaskState> {
        let mut matched = Vec::new();
        for framework in &state.frameworks {
            for executor in &framework.executors {
                if !self.executor.is_match(&executor.id) {
                    continue;
                }
                for task in &executor.tasks {
                    if self.task.is_match(&task.name) {
                        matched.push(task);
                    }
                }
            }
        }
        matched
    }
}

/// Resolves every endpoint of one service on this node.
///
/// Each matching task contributes exactly one endpoint: the snapshot's
/// hostname paired with the port at the service's configured index within
/// the task's own allocation. A service matching zero tasks yields an empty
/// list, which is not an error — the service is simply not running here. A
/// matched task without a usable port allocation fails the whole run.
pub fn resolve_endpoints(
    state: &AgentState,
    definition: &ServiceDefinition,
) -> Result<Vec<ResolvedEndpoint>, AgentError> {
    let matcher = ServiceMatcher::compile(&definition.patterns)?;
    let mut endpoints = Vec::new();
    for task in matcher.matching_tasks(state) {
        let ports = PortSequence::parse(task.port_range()?).map_err(|source| {
            AgentError::Ports {
                task: task.name.clone(),
                source,
            }
        })?;
        let port = ports
            .get(definition.port_index)
            .map_err(|source| AgentError::Ports {
                task: task.name.clone(),
                source,
            })?;
        endpoints.push(ResolvedEndpoint {
            host: state.hostname.clone(),
            port,
        });
    }
    Ok(endpoints)
}

#[cfg(test)]
mod tests {
    use ganglia_types::{RegistrarPolicy, RouterPolicy};

    use super::*;

    fn state(json: &str) -> AgentState {
        serde_json::from_str(json).expect("state should decode")
    }

    fn definition(executor: &str, task: &str, port_index: usize) -> ServiceDefinition {
        ServiceDefinition {
            name: "web".to_owned(),
            public: false,
            patterns: ServicePatterns {
                executor: executor.to_owned(),
                task: task.to_owned(),
            },
            port_index,
            service_port: 8080,
            registrar: RegistrarPolicy::default(),
            router: RouterPolicy::default(),
        }
    }

    const TWO_TASKS: &str = r#"{
        "id": "node-7",
        "hostname": "node-7.example.net",
        "frameworks": [
            {"executors": [
                {"id": "marathon.web", "tasks": [
                    {"name": "web.1", "resources": {"ports": "[31000-31000]"}},
                    {"name": "web.2", "resources": {"ports": "[31004-31005]"}}
                ]},
                {"id": "marathon.batch", "tasks": [
                    {"name": "batch.1", "resources": {"ports": "[32000-32000]"}}
                ]}
            ]}
        ]
    }"#;

    #[test]
    fn every_matching_task_contributes_one_endpoint_in_snapshot_order() {
        let endpoints = resolve_endpoints(&state(TWO_TASKS), &definition("marathon\\.web", "web", 0))
            .expect("endpoints should resolve");
        assert_eq!(
            endpoints,
            vec![
                ResolvedEndpoint {
                    host: "node-7.example.net".to_owned(),
                    port: 31_000,
                },
                ResolvedEndpoint {
                    host: "node-7.example.net".to_owned(),
                    port: 31_004,
                },
            ]
        );
    }

    #[test]
    fn executor_pattern_prunes_whole_subtrees() {
        let endpoints =
            resolve_endpoints(&state(TWO_TASKS), &definition("marathon\\.batch", ".*", 0))
                .expect("endpoints should resolve");
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].port, 32_000);
    }

    #[test]
    fn zero_matches_is_an_empty_result_not_an_error() {
        let endpoints = resolve_endpoints(&state(TWO_TASKS), &definition("nomad", ".*", 0))
            .expect("zero matches should be valid");
        assert!(endpoints.is_empty());
    }

    #[test]
    fn out_of_range_port_index_fails_the_run() {
        let error = resolve_endpoints(&state(TWO_TASKS), &definition("marathon\\.web", "web", 5))
            .expect_err("index past the allocation should fail");
        assert!(matches!(
            error,
            AgentError::Ports {
                source: crate::DecodeError::IndexOutOfRange { .. },
                ..
            }
        ));
    }

    #[test]
    fn matched_task_without_ports_fails_the_run() {
        let snapshot = state(
            r#"{
                "id": "node-7",
                "hostname": "node-7.example.net",
                "frameworks": [
                    {"executors": [
                        {"id": "marathon.web", "tasks": [
                            {"name": "web.1", "resources": {"cpus": 1.0}}
                        ]}
                    ]}
                ]
            }"#,
        );
        let error = resolve_endpoints(&snapshot, &definition("marathon\\.web", "web", 0))
            .expect_err("missing ports should fail");
        assert!(matches!(error, AgentError::MissingPorts { .. }));
    }

    #[test]
    fn invalid_pattern_is_a_fatal_configuration_error() {
        let error = ServiceMatcher::compile(&ServicePatterns {
            executor: "(".to_owned(),
            task: ".*".to_owned(),
        })
        .expect_err("unbalanced pattern should fail to compile");
        assert!(matches!(error, MatchError::ExecutorPattern { .. }));
    }
}
