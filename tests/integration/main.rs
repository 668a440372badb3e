//! Integration tests for tabgraph
//!
//! These tests verify that ingestion, the store and the CLI work together.

use std::process::Command;

use tabgraph_core::{
    CanvasConfig, EdgeChange, GraphError, GraphStore, LayoutConfig, Position, Scatter,
    VertexChange, VertexId,
};
use tempfile::TempDir;

const TABLE: &str = "\
source_node_name,destination_node_name,label,team
A,B,calls,core
A,C,calls,core
B,C,reads,data
X
";

fn store_from(text: &str) -> GraphStore {
    let canvas = CanvasConfig::default();
    let mut scatter = Scatter::seeded(3, &canvas);
    let outcome = tabgraph_ingest::import(text.as_bytes(), &mut scatter).unwrap();
    GraphStore::new(outcome.graph, Scatter::seeded(4, &canvas), LayoutConfig::default())
}

fn write_table(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("edges.csv");
    std::fs::write(&path, TABLE).unwrap();
    path
}

/// Import, edit, lay out, and check the partial update contract end to end.
#[test]
fn test_session_flow() {
    let mut store = store_from(TABLE);
    assert_eq!(store.vertices().count(), 3);
    assert_eq!(store.graph().edge(&"eA-B-0".into()).unwrap().label, "calls");

    store.create_vertex("D").unwrap();
    store.create_vertex("E").unwrap();
    let edge = store.connect(&"C".into(), &"D".into()).unwrap();
    store.relabel_edge(&edge.id, "writes").unwrap();

    let parked = Position::new(-50.0, -50.0);
    store.apply_vertex_changes(vec![VertexChange::Position {
        id: "E".into(),
        position: parked,
    }]);

    let report = store.layout_from(&"A".into()).unwrap();
    assert_eq!(report.positions.len(), 4);

    let graph = store.graph();
    let at = |name: &str| graph.vertex(&VertexId::from(name)).unwrap().position;
    assert_eq!(at("A"), Position::new(0.0, 0.0));
    assert_eq!(at("B"), Position::new(200.0, 100.0));
    assert_eq!(at("C"), Position::new(200.0, 200.0));
    assert_eq!(at("D"), Position::new(400.0, 300.0));
    assert_eq!(at("E"), parked);
    assert_eq!(graph.edge(&edge.id).unwrap().label, "writes");
}

#[test]
fn test_relayout_after_removal() {
    let mut store = store_from(TABLE);
    store.apply_edge_changes(vec![EdgeChange::Remove { id: "eA-C-1".into() }]);
    store.layout_from(&"A".into()).unwrap();
    assert_eq!(
        store.graph().vertex(&"C".into()).unwrap().position,
        Position::new(400.0, 200.0)
    );

    store.apply_vertex_changes(vec![VertexChange::Remove { id: "B".into() }]);
    let report = store.layout_from(&"A".into()).unwrap();
    assert_eq!(report.positions.len(), 1);
    assert_eq!(store.edges().count(), 0);
}

#[test]
fn test_failed_commands_leave_graph_unchanged() {
    let mut store = store_from(TABLE);
    let before = store.graph().snapshot();

    assert_eq!(store.create_vertex("A"), Err(GraphError::DuplicateId("A".into())));
    assert_eq!(store.create_vertex(""), Err(GraphError::EmptyName));
    assert!(store.connect(&"A".into(), &"nope".into()).is_err());
    assert!(store.relabel_edge(&"nope".into(), "x").is_err());
    assert!(store.layout_from(&"nope".into()).is_err());

    assert_eq!(store.graph().snapshot(), before);
}

/// Test that the CLI can be invoked
#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_tabgraph"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("edge-list tables"));
}

#[test]
fn test_cli_layout() {
    let dir = TempDir::new().unwrap();
    let path = write_table(&dir);

    let output = Command::new(env!("CARGO_BIN_EXE_tabgraph"))
        .current_dir(dir.path())
        .args(["layout", path.to_str().unwrap(), "--root", "A", "--seed", "1"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let positions: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(positions["A"]["x"], 0.0);
    assert_eq!(positions["B"]["y"], 100.0);
    assert_eq!(positions["C"]["x"], 200.0);
    assert_eq!(positions["C"]["y"], 200.0);
}

#[test]
fn test_cli_build_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = write_table(&dir);

    let output = Command::new(env!("CARGO_BIN_EXE_tabgraph"))
        .current_dir(dir.path())
        .args(["build", path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["vertices"].as_array().unwrap().len(), 3);
    assert_eq!(report["edges"].as_array().unwrap().len(), 3);
    assert_eq!(report["edges"][2]["attributes"]["team"], "data");
    assert_eq!(report["warnings"][0]["row"], 3);
}

#[test]
fn test_cli_unknown_root_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_table(&dir);

    let output = Command::new(env!("CARGO_BIN_EXE_tabgraph"))
        .current_dir(dir.path())
        .args(["layout", path.to_str().unwrap(), "--root", "Q"])
        .output()
        .expect("Failed to execute command");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Q"));
}

#[test]
fn test_cli_respects_config_spacing() {
    let dir = TempDir::new().unwrap();
    let path = write_table(&dir);
    std::fs::write(
        dir.path().join("tabgraph.toml"),
        "[layout]\nhorizontal_spacing = 50.0\nvertical_spacing = 10.0\n",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_tabgraph"))
        .current_dir(dir.path())
        .args(["layout", path.to_str().unwrap(), "--root", "A"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let positions: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(positions["C"]["x"], 50.0);
    assert_eq!(positions["C"]["y"], 20.0);
}
