// Rust guideline compliant 2026-10-12

//! Tests for live workflow discovery against `SimulatedTracker`.

use flowpath_core::simulation::SimulatedTracker;
use flowpath_core::{
    discover_workflow, DiscoveryOptions, DiscoveryReport, Error, Transition, WorkflowError,
};
use std::collections::BTreeSet;

fn linear_tracker() -> SimulatedTracker {
    SimulatedTracker::new("Task", "10001")
        .with_state(
            "Open",
            vec![Transition::new("11", "Start Progress", "In Progress")],
        )
        .with_state("In Progress", vec![Transition::new("21", "Resolve", "Done")])
        .with_state("Done", vec![])
        .with_issue("PROJ-1", "Open")
}

fn cyclic_tracker() -> SimulatedTracker {
    SimulatedTracker::new("Story", "10002")
        .with_state(
            "Backlog",
            vec![
                Transition::new("1", "Select", "Selected"),
                Transition::new("2", "Drop", "Won't Do"),
            ],
        )
        .with_state(
            "Selected",
            vec![
                Transition::new("3", "Start", "In Progress"),
                Transition::new("4", "Deselect", "Backlog"),
            ],
        )
        .with_state(
            "In Progress",
            vec![
                Transition::new("5", "Finish", "Done"),
                Transition::new("6", "Pause", "Selected"),
            ],
        )
        .with_state("Done", vec![Transition::new("7", "Reopen", "Backlog")])
        .with_state("Won't Do", vec![Transition::new("8", "Revive", "Backlog")])
        .with_issue("STORY-9", "Backlog")
}

#[test]
fn test_discovers_linear_workflow() {
    let tracker = linear_tracker();
    let report = discover_workflow(&tracker, "PROJ-1", &DiscoveryOptions::default()).unwrap();

    assert!(report.complete);
    assert_eq!(report.graph.state_count(), 3);
    assert_eq!(report.graph.issue_type, "Task");
    assert_eq!(report.graph.issue_type_id, "10001");
    assert_eq!(report.graph.discovered_from.as_deref(), Some("PROJ-1"));
    assert!(report.graph.discovered_at.is_some());
    assert_eq!(report.hops.len(), 2);
    assert_eq!(report.final_status, "Done");
}

#[test]
fn test_discovers_every_state_of_cyclic_workflow() {
    let tracker = cyclic_tracker();
    let report = discover_workflow(&tracker, "STORY-9", &DiscoveryOptions::default()).unwrap();

    assert!(report.complete);
    assert_eq!(report.graph.states(), tracker.workflow().states());
    assert!(report.graph.unexplored().is_empty());
}

#[test]
fn test_probe_issue_is_left_at_final_status() {
    let tracker = cyclic_tracker();
    let report = discover_workflow(&tracker, "STORY-9", &DiscoveryOptions::default()).unwrap();

    assert_eq!(
        tracker.current_status("STORY-9").unwrap(),
        report.final_status
    );
    assert_eq!(tracker.executed(), report.hops);
}

#[test]
fn test_discovered_graph_supports_path_queries() {
    let tracker = cyclic_tracker();
    let report = discover_workflow(&tracker, "STORY-9", &DiscoveryOptions::default()).unwrap();

    let path = report.graph.path_to("Backlog", "done").unwrap();
    let ids: Vec<&str> = path.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3", "5"]);
}

#[test]
fn test_single_state_without_transitions() {
    let tracker = SimulatedTracker::new("Task", "1")
        .with_state("Closed", vec![])
        .with_issue("PROJ-2", "Closed");

    let report = discover_workflow(&tracker, "PROJ-2", &DiscoveryOptions::default()).unwrap();

    assert!(report.complete);
    assert!(report.hops.is_empty());
    assert_eq!(report.graph.state_count(), 1);
}

#[test]
fn test_hop_limit_reports_incomplete() {
    let tracker = linear_tracker();
    let report = discover_workflow(&tracker, "PROJ-1", &DiscoveryOptions { max_hops: 1 }).unwrap();

    assert!(!report.complete);
    assert_eq!(report.hops.len(), 1);
    assert_eq!(report.graph.state_count(), 2);
    assert_eq!(
        report.graph.unexplored(),
        BTreeSet::from(["Done".to_string()])
    );
}

#[test]
fn test_stuck_at_dead_end() {
    let tracker = SimulatedTracker::new("Task", "1")
        .with_state(
            "Open",
            vec![
                Transition::new("1", "Archive", "Archived"),
                Transition::new("2", "Start", "Active"),
            ],
        )
        .with_state("Archived", vec![])
        .with_state("Active", vec![])
        .with_issue("PROJ-3", "Open");

    let err = discover_workflow(&tracker, "PROJ-3", &DiscoveryOptions::default()).unwrap_err();
    match &err {
        Error::Workflow(
            workflow @ WorkflowError::Discovery {
                issue_key,
                stuck_at,
                discovered,
                partial,
                committed,
            },
        ) => {
            assert_eq!(issue_key, "PROJ-3");
            assert_eq!(stuck_at, "Archived");
            assert_eq!(
                discovered,
                &BTreeSet::from(["Archived".to_string(), "Open".to_string()])
            );
            assert_eq!(partial.unexplored(), BTreeSet::from(["Active".to_string()]));
            assert_eq!(partial.discovered_from.as_deref(), Some("PROJ-3"));
            assert_eq!(committed.len(), 1);
            assert_eq!(committed[0].id, "1");

            let report = DiscoveryReport::from_stuck(workflow).unwrap();
            assert!(!report.complete);
            assert_eq!(report.stuck_at.as_deref(), Some("Archived"));
            assert_eq!(report.final_status, "Archived");
            assert_eq!(report.hops, committed.clone());
            assert_eq!(report.graph.state_count(), 2);
        }
        other => panic!("expected Discovery error, got {:?}", other),
    }
}

#[test]
fn test_stuck_with_two_terminal_statuses_keeps_mapped_states() {
    let tracker = SimulatedTracker::new("Bug", "10004")
        .with_state(
            "Open",
            vec![
                Transition::new("1", "Start", "In Progress"),
                Transition::new("2", "Close", "Closed"),
            ],
        )
        .with_state("In Progress", vec![Transition::new("3", "Resolve", "Resolved")])
        .with_state("Resolved", vec![])
        .with_state("Closed", vec![])
        .with_issue("BUG-1", "Open");

    let err = discover_workflow(&tracker, "BUG-1", &DiscoveryOptions::default()).unwrap_err();
    let workflow = err.as_workflow().expect("workflow error");
    let report = DiscoveryReport::from_stuck(workflow).expect("stuck discovery");

    assert_eq!(report.graph.state_count(), 3);
    assert_eq!(
        report.graph.unexplored(),
        BTreeSet::from(["Closed".to_string()])
    );
    assert_eq!(workflow.committed().len(), 2);
    assert_eq!(tracker.current_status("BUG-1").unwrap(), "Resolved");
}

#[test]
fn test_read_failure_after_hop_reports_committed_hops() {
    let tracker = linear_tracker().fail_reads_after(1, "connection reset");

    let err = discover_workflow(&tracker, "PROJ-1", &DiscoveryOptions::default()).unwrap_err();
    match err.as_workflow() {
        Some(WorkflowError::Interrupted { committed, .. }) => {
            assert_eq!(committed.len(), 1);
            assert_eq!(committed[0].id, "11");
        }
        other => panic!("expected Interrupted, got {:?}", other),
    }
    assert!(DiscoveryReport::from_stuck(err.as_workflow().unwrap()).is_none());
}

#[test]
fn test_rejected_transition_reports_committed_hops() {
    let tracker = linear_tracker().fail_transition("21", "Resolution is required");

    let err = discover_workflow(&tracker, "PROJ-1", &DiscoveryOptions::default()).unwrap_err();
    match err.as_workflow() {
        Some(WorkflowError::TransitionFailed {
            transition,
            current_status,
            committed,
            ..
        }) => {
            assert_eq!(transition.id, "21");
            assert_eq!(current_status, "In Progress");
            assert_eq!(committed.len(), 1);
            assert_eq!(err.as_workflow().map(|e| e.committed().len()), Some(1));
        }
        other => panic!("expected TransitionFailed, got {:?}", other),
    }
}

#[test]
fn test_unknown_issue_fails_before_moving_anything() {
    let tracker = linear_tracker();
    let err = discover_workflow(&tracker, "PROJ-404", &DiscoveryOptions::default()).unwrap_err();

    assert!(matches!(err, Error::Tracker(_)));
    assert!(tracker.executed().is_empty());
}
