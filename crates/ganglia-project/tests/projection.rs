//! End-to-end projection: declared topology + ambient snapshot → sidecar
//! configuration, with the diff gate holding restarts back on repeat runs.

use camino::Utf8PathBuf;
use ganglia_agent::{AgentState, resolve_endpoints};
use ganglia_project::{
    FileState, ProjectionContext, encode_document, load_router_document, merge_router_document,
    registrar_document, replace_and_compare, router_services,
};
use ganglia_types::{ServiceDefinition, Topology};

const SNAPSHOT: &str = r#"{
    "id": "node-3-id",
    "hostname": "node-3.example.net",
    "frameworks": [
        {"executors": [
            {"id": "marathon.web", "tasks": [
                {"name": "web.instance-1", "resources": {"cpus": 0.5, "ports": "[9000-9000]"}}
            ]}
        ]}
    ]
}"#;

const TOPOLOGY: &str = r#"{
    "services": [
        {
            "name": "web",
            "public": true,
            "patterns": {"executor": "marathon\\.web", "task": "web"},
            "port_index": 0,
            "service_port": 8080,
            "registrar": {"check_interval": 2, "checks": [{"type": "tcp"}]},
            "router": {"haproxy": {"server_options": "check inter 2000"}}
        }
    ]
}"#;

fn resolved(
    topology: &Topology,
    snapshot: &AgentState,
) -> Vec<(ServiceDefinition, Vec<ganglia_types::ResolvedEndpoint>)> {
    topology
        .services
        .iter()
        .map(|definition| {
            let endpoints =
                resolve_endpoints(snapshot, definition).expect("endpoints should resolve");
            (definition.clone(), endpoints)
        })
        .collect()
}

#[test]
fn declared_service_projects_to_registrar_and_router_configuration() {
    let snapshot: AgentState = serde_json::from_str(SNAPSHOT).expect("snapshot should decode");
    let topology: Topology = serde_json::from_str(TOPOLOGY).expect("topology should decode");
    let coordination_hosts = vec!["127.0.0.1:2379".to_owned()];
    let context = ProjectionContext {
        coordination_hosts: &coordination_hosts,
        base_path: "/ganglia",
    };

    let resolved = resolved(&topology, &snapshot);
    let borrowed: Vec<_> = resolved
        .iter()
        .map(|(definition, endpoints)| (definition, endpoints.clone()))
        .collect();
    let registrar = registrar_document(context, &snapshot.id, &borrowed);
    assert_eq!(registrar.instance_id, "node-3-id");
    assert_eq!(registrar.services.len(), 1);
    let entry = &registrar.services[0];
    assert_eq!(entry.host, "node-3.example.net");
    assert_eq!(entry.port, 9000);
    assert_eq!(entry.etcd_path, "/ganglia/web");
    assert_eq!(entry.check_interval, 2);

    let services = router_services(context, &topology.services, false);
    let web = services.get("web").expect("router entry should exist");
    assert_eq!(web.discovery.path, "/ganglia/web");
    assert_eq!(web.haproxy.port, 8080);
    assert_eq!(web.haproxy.server_options, "check inter 2000");
}

#[test]
fn repeated_projection_is_byte_identical_and_gated_as_unchanged() {
    let snapshot: AgentState = serde_json::from_str(SNAPSHOT).expect("snapshot should decode");
    let topology: Topology = serde_json::from_str(TOPOLOGY).expect("topology should decode");
    let coordination_hosts = vec!["127.0.0.1:2379".to_owned()];
    let context = ProjectionContext {
        coordination_hosts: &coordination_hosts,
        base_path: "/ganglia",
    };
    let directory = tempfile::tempdir().expect("create temp dir");
    let router_path = Utf8PathBuf::from_path_buf(directory.path().join("router.conf.json"))
        .expect("temp paths should be UTF-8");

    let mut states = Vec::new();
    let mut outputs = Vec::new();
    for _ in 0..2 {
        let operator = load_router_document(&router_path).expect("router document should load");
        let services = router_services(context, &topology.services, false);
        let merged = merge_router_document(operator, &services).expect("merge should succeed");
        let bytes = encode_document(&merged).expect("document should serialise");
        states.push(replace_and_compare(&router_path, &bytes).expect("replace should succeed"));
        outputs.push(bytes);
    }

    assert_eq!(outputs[0], outputs[1], "projection must be deterministic");
    assert_eq!(states, vec![FileState::Changed, FileState::Unchanged]);
}

#[test]
fn changing_one_service_port_leaves_operator_keys_untouched() {
    let topology: Topology = serde_json::from_str(TOPOLOGY).expect("topology should decode");
    let coordination_hosts = vec!["127.0.0.1:2379".to_owned()];
    let context = ProjectionContext {
        coordination_hosts: &coordination_hosts,
        base_path: "/ganglia",
    };
    let mut operator = ganglia_types::RouterDocument::new();
    operator.insert(
        "file_output_path".to_owned(),
        serde_json::Value::String("/run/router".to_owned()),
    );

    let before = merge_router_document(
        operator.clone(),
        &router_services(context, &topology.services, false),
    )
    .expect("merge should succeed");

    let mut changed = topology.clone();
    changed.services[0].service_port = 9090;
    let after = merge_router_document(
        operator,
        &router_services(context, &changed.services, false),
    )
    .expect("merge should succeed");

    assert_eq!(before.get("file_output_path"), after.get("file_output_path"));
    let port = |document: &ganglia_types::RouterDocument| {
        document
            .get("services")
            .and_then(|services| services.get("web"))
            .and_then(|web| web.get("haproxy"))
            .and_then(|haproxy| haproxy.get("port"))
            .and_then(serde_json::Value::as_u64)
    };
    assert_eq!(port(&before), Some(8080));
    assert_eq!(port(&after), Some(9090));
}
