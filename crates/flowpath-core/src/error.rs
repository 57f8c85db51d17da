// Rust guideline compliant 2026-10-12

//! Error types for the Flowpath core library.

use crate::graph::WorkflowGraph;
use crate::models::Transition;
use crate::tracker::TrackerError;
use std::collections::BTreeSet;
use thiserror::Error;

/// Result type alias for Flowpath operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Flowpath operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration value or file.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid argument passed to a library call.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The issue tracker rejected or failed a request.
    #[error(transparent)]
    Tracker(#[from] TrackerError),

    /// Workflow-level failure (path search, discovery, execution).
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

impl Error {
    /// Returns the workflow error if this is one.
    pub fn as_workflow(&self) -> Option<&WorkflowError> {
        match self {
            Error::Workflow(err) => Some(err),
            _ => None,
        }
    }

    /// Wraps a tracker failure that happened after `committed` moves.
    ///
    /// Before the first move the tracker error is returned unchanged.
    pub(crate) fn after_moves(
        issue_key: &str,
        committed: &[Transition],
        source: TrackerError,
    ) -> Self {
        if committed.is_empty() {
            return Error::Tracker(source);
        }
        WorkflowError::Interrupted {
            issue_key: issue_key.to_string(),
            source,
            committed: committed.to_vec(),
        }
        .into()
    }
}

/// Workflow failures.
///
/// Every variant that can happen after a transition was executed carries the
/// transitions already committed, since the tracker offers no rollback.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// No route exists in the graph as currently observed.
    #[error("No path from '{from}' to '{to}' (reachable: {})", join(.reachable))]
    PathNotFound {
        /// Status the search started from.
        from: String,
        /// Requested target status or transition name.
        to: String,
        /// Every status reachable from `from`.
        reachable: BTreeSet<String>,
        /// Transitions executed while exploring for a route.
        committed: Vec<Transition>,
    },

    /// No cached graph exists for the issue type.
    #[error("No cached workflow for issue type '{issue_type}'")]
    WorkflowNotFound {
        /// The requested issue type name.
        issue_type: String,
    },

    /// Discovery reached a status with no route to the remaining unexplored ones.
    #[error(
        "Discovery of {issue_key} stuck at '{stuck_at}' (discovered: {})",
        join(.discovered)
    )]
    Discovery {
        /// The probe issue.
        issue_key: String,
        /// Status the issue was left in.
        stuck_at: String,
        /// Statuses whose transitions were observed.
        discovered: BTreeSet<String>,
        /// Graph built before discovery got stuck.
        partial: Box<WorkflowGraph>,
        /// Transitions executed against the probe issue.
        committed: Vec<Transition>,
    },

    /// The tracker rejected a single transition.
    #[error(
        "Transition '{}' (id {}) failed for {issue_key} at status '{current_status}': {reason}",
        .transition.name,
        .transition.id
    )]
    TransitionFailed {
        /// The issue being moved.
        issue_key: String,
        /// The transition that was attempted.
        transition: Transition,
        /// Status the issue was in when the attempt was made.
        current_status: String,
        /// Raw reason reported by the tracker.
        reason: String,
        /// Transitions executed earlier in the same run.
        committed: Vec<Transition>,
    },

    /// The target could not be reached within the step budget.
    #[error("'{target}' not reachable from {issue_key} within {max_steps} steps")]
    StepLimitExceeded {
        /// The issue being moved.
        issue_key: String,
        /// Requested target status or transition name.
        target: String,
        /// The step budget.
        max_steps: usize,
        /// Transitions executed before the budget ran out.
        committed: Vec<Transition>,
    },

    /// A tracker call failed after the issue had already been moved.
    #[error(
        "{issue_key} was moved {} step(s) before the tracker failed: {source}",
        .committed.len()
    )]
    Interrupted {
        /// The issue being moved.
        issue_key: String,
        /// The tracker failure.
        #[source]
        source: TrackerError,
        /// Transitions executed before the failure.
        committed: Vec<Transition>,
    },
}

impl WorkflowError {
    /// Transitions that were executed before the failure.
    ///
    /// Empty for errors raised before anything moved.
    pub fn committed(&self) -> &[Transition] {
        match self {
            WorkflowError::PathNotFound { committed, .. }
            | WorkflowError::Discovery { committed, .. }
            | WorkflowError::TransitionFailed { committed, .. }
            | WorkflowError::StepLimitExceeded { committed, .. }
            | WorkflowError::Interrupted { committed, .. } => committed,
            WorkflowError::WorkflowNotFound { .. } => &[],
        }
    }
}

fn join(states: &BTreeSet<String>) -> String {
    if states.is_empty() {
        return "none".to_string();
    }
    states.iter().cloned().collect::<Vec<_>>().join(", ")
}
