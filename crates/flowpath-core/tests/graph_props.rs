// Rust guideline compliant 2026-10-12

//! Property-based tests for the graph module.
//!
//! These tests validate properties that should hold for every workflow graph:
//! empty self-paths, single-hop direct edges, shortest paths, path validity,
//! and case-insensitive status matching.

use flowpath_core::{same_status, Transition, WorkflowError, WorkflowGraph};
use proptest::prelude::*;

fn status_name(index: usize) -> String {
    format!("Status {}", index)
}

/// Builds a graph with `count` statuses and the given `(from, to)` edges.
///
/// Transition names never contain a status name, so only the destination
/// rule can match a status target.
fn build_graph(count: usize, edges: &[(usize, usize)]) -> WorkflowGraph {
    let mut graph = WorkflowGraph::new("Task", "10001");
    for from in 0..count {
        let transitions = edges
            .iter()
            .enumerate()
            .filter(|(_, (src, _))| *src == from)
            .map(|(k, (_, dst))| Transition::new(k.to_string(), format!("edge {}", k), status_name(*dst)))
            .collect();
        graph.add_state(&status_name(from), transitions);
    }
    graph
}

/// Generates a status count and a list of edges between those statuses.
fn arb_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..8).prop_flat_map(|count| {
        (
            Just(count),
            prop::collection::vec((0..count, 0..count), 0..20),
        )
    })
}

/// Returns true if `path` is a connected walk starting at `from`.
fn is_valid_walk(graph: &WorkflowGraph, from: &str, path: &[Transition]) -> bool {
    let mut current = from.to_string();
    for step in path {
        if !graph.transitions_from(&current).contains(step) {
            return false;
        }
        current = step.to.clone();
    }
    true
}

proptest! {
    /// A status always has an empty path to itself.
    #[test]
    fn prop_self_path_is_empty((count, edges) in arb_graph(), pick in 0usize..8) {
        let graph = build_graph(count, &edges);
        let status = status_name(pick % count);

        prop_assert!(graph.path_to(&status, &status).unwrap().is_empty());
        prop_assert!(graph.path_to(&status.to_uppercase(), &status.to_lowercase()).unwrap().is_empty());
    }

    /// A direct edge A -> B always yields a one-step path ending at B.
    #[test]
    fn prop_direct_edge_is_single_step((count, edges) in arb_graph()) {
        let graph = build_graph(count, &edges);

        for (from, to) in &edges {
            if from == to {
                continue;
            }
            let path = graph.path_to(&status_name(*from), &status_name(*to)).unwrap();
            prop_assert_eq!(path.len(), 1);
            prop_assert_eq!(&path[0].to, &status_name(*to));
        }
    }

    /// A found path is a connected walk from the origin that ends at the
    /// target, and no path of the same graph is ever shorter.
    #[test]
    fn prop_found_paths_are_valid_and_shortest((count, edges) in arb_graph(), a in 0usize..8, b in 0usize..8) {
        let graph = build_graph(count, &edges);
        let from = status_name(a % count);
        let to = status_name(b % count);

        match graph.path_to(&from, &to) {
            Ok(path) => {
                prop_assert!(is_valid_walk(&graph, &from, &path));
                if let Some(last) = path.last() {
                    prop_assert!(same_status(&last.to, &to));
                    // No intermediate status is the target.
                    for step in &path[..path.len() - 1] {
                        prop_assert!(!same_status(&step.to, &to));
                    }
                    prop_assert!(path.len() < count.max(2));
                } else {
                    prop_assert!(same_status(&from, &to));
                }
            }
            Err(err) => {
                match err.as_workflow() {
                    Some(WorkflowError::PathNotFound { reachable, .. }) => {
                        prop_assert!(!reachable.iter().any(|s| same_status(s, &to)));
                        prop_assert!(reachable.iter().any(|s| same_status(s, &from)));
                    }
                    other => prop_assert!(false, "unexpected error: {:?}", other),
                }
            }
        }
    }

    /// Status casing never changes the result of a path search.
    #[test]
    fn prop_case_insensitive_search((count, edges) in arb_graph(), a in 0usize..8, b in 0usize..8) {
        let graph = build_graph(count, &edges);
        let from = status_name(a % count);
        let to = status_name(b % count);

        let plain = graph.path_to(&from, &to).ok();
        let shouted = graph.path_to(&from.to_uppercase(), &to.to_lowercase()).ok();
        prop_assert_eq!(plain, shouted);
    }

    /// A chain is walked edge by edge even when a longer detour exists.
    #[test]
    fn prop_chain_path_is_shortest(length in 2usize..7, detour in 1usize..4) {
        let mut edges: Vec<(usize, usize)> = (0..length).map(|i| (i, i + 1)).collect();
        // Detour from the start through extra statuses to the end of the chain.
        let mut previous = 0;
        for extra in 0..=length + detour {
            let node = length + 1 + extra;
            edges.push((previous, node));
            previous = node;
        }
        edges.push((previous, length));
        let count = previous + 1;

        let graph = build_graph(count, &edges);
        let path = graph.path_to(&status_name(0), &status_name(length)).unwrap();

        prop_assert_eq!(path.len(), length);
        for (i, step) in path.iter().enumerate() {
            prop_assert_eq!(&step.to, &status_name(i + 1));
        }
    }
}
