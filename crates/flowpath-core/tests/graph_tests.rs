// Rust guideline compliant 2026-10-12

//! Unit tests for the graph module.
//!
//! These tests validate path search, reachability, case handling, and the
//! renderings of workflow graphs.

use flowpath_core::{Error, Transition, WorkflowError, WorkflowGraph};
use std::collections::BTreeSet;

/// Helper to build a graph from `(status, [(id, name, to)])` entries.
fn graph(states: &[(&str, &[(&str, &str, &str)])]) -> WorkflowGraph {
    let mut graph = WorkflowGraph::new("Task", "10001");
    for (status, transitions) in states {
        graph.add_state(
            status,
            transitions
                .iter()
                .map(|(id, name, to)| Transition::new(*id, *name, *to))
                .collect(),
        );
    }
    graph
}

/// Open -> In Progress -> Review -> Done, with a Reopen edge back to Open.
fn standard_workflow() -> WorkflowGraph {
    graph(&[
        ("Open", &[("11", "Start Progress", "In Progress")]),
        (
            "In Progress",
            &[("21", "Submit", "Review"), ("22", "Stop Progress", "Open")],
        ),
        ("Review", &[("31", "Approve", "Done"), ("32", "Reject", "In Progress")]),
        ("Done", &[("41", "Reopen", "Open")]),
    ])
}

fn ids(path: &[Transition]) -> Vec<&str> {
    path.iter().map(|t| t.id.as_str()).collect()
}

#[test]
fn test_empty_graph() {
    let graph = WorkflowGraph::new("Task", "10001");

    assert!(graph.is_empty());
    assert!(graph.all_states().is_empty());
    assert!(graph.transitions_from("Open").is_empty());
}

#[test]
fn test_path_to_same_status_is_empty() {
    let graph = standard_workflow();
    assert!(graph.path_to("Open", "Open").unwrap().is_empty());
}

#[test]
fn test_path_to_same_status_in_unknown_graph_is_empty() {
    let graph = WorkflowGraph::new("Task", "10001");
    assert!(graph.path_to("Anything", "anything").unwrap().is_empty());
}

#[test]
fn test_path_to_direct_edge() {
    let graph = standard_workflow();
    let path = graph.path_to("Open", "In Progress").unwrap();

    assert_eq!(path.len(), 1);
    assert_eq!(path[0].to, "In Progress");
}

#[test]
fn test_path_to_multi_hop() {
    let graph = standard_workflow();
    let path = graph.path_to("Open", "Done").unwrap();

    assert_eq!(ids(&path), vec!["11", "21", "31"]);
    assert_eq!(path.last().unwrap().to, "Done");
}

#[test]
fn test_path_to_prefers_shortest_route() {
    let graph = graph(&[
        (
            "A",
            &[("1", "Long way", "B"), ("2", "Detour", "X")],
        ),
        ("B", &[("3", "Continue", "C")]),
        ("X", &[("4", "Detour on", "Y")]),
        ("Y", &[("5", "Detour end", "C")]),
    ]);

    let path = graph.path_to("A", "C").unwrap();
    assert_eq!(ids(&path), vec!["1", "3"]);
}

#[test]
fn test_path_to_breaks_ties_by_insertion_order() {
    let graph = graph(&[
        ("A", &[("1", "Via B", "B"), ("2", "Via C", "C")]),
        ("B", &[("3", "B to D", "D")]),
        ("C", &[("4", "C to D", "D")]),
    ]);

    let path = graph.path_to("A", "D").unwrap();
    assert_eq!(ids(&path), vec!["1", "3"]);
}

#[test]
fn test_path_to_is_case_insensitive() {
    let graph = standard_workflow();

    assert!(graph.path_to("open", "OPEN").unwrap().is_empty());
    let path = graph.path_to("Open", "in progress").unwrap();
    assert_eq!(path.len(), 1);
    assert_eq!(path[0].to, "In Progress");

    let path = graph.path_to("REVIEW", "done").unwrap();
    assert_eq!(ids(&path), vec!["31"]);
}

#[test]
fn test_path_to_matches_transition_name_fragment() {
    let graph = standard_workflow();
    let path = graph.path_to("Open", "start").unwrap();

    assert_eq!(ids(&path), vec!["11"]);
}

#[test]
fn test_path_to_name_fragment_is_secondary() {
    let graph = graph(&[(
        "Open",
        &[("1", "Send to Done queue", "Triage"), ("2", "Finish", "Done")],
    )]);

    let path = graph.path_to("Open", "done").unwrap();
    assert_eq!(ids(&path), vec!["2"]);
}

#[test]
fn test_path_not_found_reports_reachable_set() {
    let graph = graph(&[
        ("Open", &[("1", "Start", "Active")]),
        ("Active", &[("2", "Stop", "Open")]),
        ("Done", &[]),
    ]);

    let err = graph.path_to("Open", "Done").unwrap_err();
    match err {
        Error::Workflow(WorkflowError::PathNotFound {
            from,
            to,
            reachable,
            committed,
        }) => {
            assert!(committed.is_empty());
            assert_eq!(from, "Open");
            assert_eq!(to, "Done");
            assert_eq!(
                reachable,
                BTreeSet::from(["Active".to_string(), "Open".to_string()])
            );
            assert!(!reachable.contains("Done"));
        }
        other => panic!("expected PathNotFound, got {:?}", other),
    }
}

#[test]
fn test_path_not_found_from_unknown_status() {
    let graph = standard_workflow();
    let err = graph.path_to("Nowhere", "Done").unwrap_err();

    match err.as_workflow() {
        Some(WorkflowError::PathNotFound { reachable, .. }) => {
            assert_eq!(reachable, &BTreeSet::from(["Nowhere".to_string()]));
        }
        other => panic!("expected PathNotFound, got {:?}", other),
    }
}

#[test]
fn test_reachable_from_follows_cycles() {
    let graph = standard_workflow();
    let reachable = graph.reachable_from("Review");

    assert_eq!(reachable.len(), 4);
    assert!(reachable.contains("Open"));
    assert!(reachable.contains("Done"));
}

#[test]
fn test_reachable_from_includes_unexplored_targets() {
    let graph = graph(&[("Open", &[("1", "Close", "Closed")])]);
    let reachable = graph.reachable_from("open");

    assert_eq!(
        reachable,
        BTreeSet::from(["Closed".to_string(), "Open".to_string()])
    );
}

#[test]
fn test_add_state_replaces_transitions() {
    let mut graph = standard_workflow();
    graph.add_state("Open", vec![Transition::new("99", "Skip", "Done")]);

    assert_eq!(graph.transitions_from("Open").len(), 1);
    assert_eq!(ids(&graph.path_to("Open", "Done").unwrap()), vec!["99"]);
}

#[test]
fn test_transitions_from_unknown_status_is_empty() {
    let graph = standard_workflow();
    assert!(graph.transitions_from("Blocked").is_empty());
}

#[test]
fn test_all_states_includes_targets() {
    let graph = graph(&[("Open", &[("1", "Close", "Closed")])]);
    assert_eq!(
        graph.all_states(),
        BTreeSet::from(["Closed".to_string(), "Open".to_string()])
    );
}

#[test]
fn test_search_finds_nearest_matching_edge() {
    let graph = standard_workflow();
    let path = graph.search("Open", |t| t.name == "Reject").unwrap();

    assert_eq!(ids(&path), vec!["11", "21", "32"]);
    assert!(graph.search("Open", |t| t.name == "Archive").is_none());
}

#[test]
fn test_to_ascii_lists_states() {
    let mut graph = standard_workflow();
    graph.discovered_from = Some("PROJ-1".to_string());
    let rendered = graph.to_ascii();

    assert!(rendered.starts_with("Workflow: Task (10001)"));
    assert!(rendered.contains("Discovered from: PROJ-1"));
    assert!(rendered.contains("[Open]"));
    assert!(rendered.contains("--Start Progress--> In Progress"));
}

#[test]
fn test_to_table_has_header_and_rows() {
    let graph = standard_workflow();
    let rendered = graph.to_table();

    assert!(rendered.contains("State"));
    assert!(rendered.contains("Transition"));
    assert!(rendered.contains("Approve"));
    assert!(rendered.contains("41"));
}

#[test]
fn test_record_round_trip_preserves_graph() {
    let mut graph = standard_workflow();
    graph.discovered_from = Some("PROJ-7".to_string());

    let json = serde_json::to_string(&graph.to_record()).unwrap();
    let record = serde_json::from_str(&json).unwrap();
    let restored = WorkflowGraph::from_record("Task", record);

    assert_eq!(restored, graph);
}

#[test]
fn test_record_accepts_missing_optional_fields() {
    let json = r#"{"id": "5", "states": {"Open": [{"id": "1", "name": "Go", "to": "Done"}]}}"#;
    let record = serde_json::from_str(json).unwrap();
    let graph = WorkflowGraph::from_record("Bug", record);

    assert_eq!(graph.issue_type, "Bug");
    assert!(graph.discovered_from.is_none());
    assert!(graph.discovered_at.is_none());
    assert_eq!(graph.transitions_from("open").len(), 1);
}

#[test]
fn test_serializes_with_issue_type() {
    let graph = standard_workflow();
    let value = serde_json::to_value(&graph).unwrap();

    assert_eq!(value["issue_type"], "Task");
    assert_eq!(value["id"], "10001");
    assert!(value["discovered_at"].is_null());
    assert_eq!(value["states"]["Review"][1]["name"], "Reject");
}
