// Rust guideline compliant 2026-10-12

//! Queries over cached workflows.

use crate::error::{AppError, Result};
use flowpath_core::{timestamp, Transition, WorkflowError, WorkflowGraph, WorkflowStore};
use serde::Serialize;
use tracing::info;

/// One cached workflow, summarized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowSummary {
    /// Issue type name.
    pub issue_type: String,
    /// Issue type identifier.
    pub issue_type_id: String,
    /// Number of statuses, including ones only seen as targets.
    pub states: usize,
    /// Number of transitions.
    pub transitions: usize,
    /// Issue the workflow was discovered from.
    pub discovered_from: Option<String>,
    /// When discovery ran (RFC 3339).
    pub discovered_at: Option<String>,
}

impl From<&WorkflowGraph> for WorkflowSummary {
    fn from(graph: &WorkflowGraph) -> Self {
        Self {
            issue_type: graph.issue_type.clone(),
            issue_type_id: graph.issue_type_id.clone(),
            states: graph.all_states().len(),
            transitions: graph.states().values().map(Vec::len).sum(),
            discovered_from: graph.discovered_from.clone(),
            discovered_at: graph.discovered_at.as_ref().map(timestamp::format),
        }
    }
}

/// Shortest path between two statuses of a cached workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowPath {
    /// Issue type name.
    pub issue_type: String,
    /// Starting status.
    pub from: String,
    /// Target status or transition name fragment.
    pub to: String,
    /// Transitions to apply, in order.
    pub transitions: Vec<Transition>,
    /// Number of transitions.
    pub steps: usize,
}

/// Lists every cached workflow, ordered by issue type.
///
/// # Errors
///
/// Returns an error if the workflow cache cannot be read.
pub fn list_workflows(store: &WorkflowStore) -> Result<Vec<WorkflowSummary>> {
    let mut summaries = Vec::new();
    for issue_type in store.list_types()? {
        if let Some(graph) = store.get(&issue_type)? {
            summaries.push(WorkflowSummary::from(&graph));
        }
    }
    Ok(summaries)
}

/// Loads the cached workflow for an issue type.
///
/// # Errors
///
/// Returns `WorkflowError::WorkflowNotFound` if nothing is cached for
/// `issue_type`, or an error if the cache cannot be read.
pub fn show_workflow(store: &WorkflowStore, issue_type: &str) -> Result<WorkflowGraph> {
    store.get(issue_type)?.ok_or_else(|| {
        AppError::from(WorkflowError::WorkflowNotFound {
            issue_type: issue_type.to_string(),
        })
    })
}

/// Removes the cached workflow for an issue type.
///
/// # Errors
///
/// Returns `WorkflowError::WorkflowNotFound` if nothing is cached for
/// `issue_type`, or an error if the cache cannot be written.
pub fn delete_workflow(store: &mut WorkflowStore, issue_type: &str) -> Result<()> {
    if !store.delete(issue_type)? {
        return Err(WorkflowError::WorkflowNotFound {
            issue_type: issue_type.to_string(),
        }
        .into());
    }
    info!(issue_type, "Deleted cached workflow");
    Ok(())
}

/// Computes the shortest path between two statuses of a cached workflow.
///
/// No tracker is contacted.
///
/// # Errors
///
/// Returns an error if:
/// - Nothing is cached for `issue_type` (`WorkflowError::WorkflowNotFound`)
/// - `to` cannot be reached from `from` (`WorkflowError::PathNotFound`)
pub fn workflow_path(
    store: &WorkflowStore,
    issue_type: &str,
    from: &str,
    to: &str,
) -> Result<WorkflowPath> {
    let graph = show_workflow(store, issue_type)?;
    let transitions = graph.path_to(from, to)?;

    Ok(WorkflowPath {
        issue_type: graph.issue_type,
        from: from.to_string(),
        to: to.to_string(),
        steps: transitions.len(),
        transitions,
    })
}
