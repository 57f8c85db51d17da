// Rust guideline compliant 2026-10-12

//! Live workflow discovery.
//!
//! The tracker only reports transitions legal from an issue's *current*
//! status, so the only way to learn a workflow is to move a real issue
//! through it. Discovery walks the probe issue breadth-first: at each status
//! it records the live transitions, then moves along the shortest known
//! route to the nearest status whose transitions have not been observed.
//!
//! The probe issue is left wherever the last move landed.

use crate::error::{Error, Result, WorkflowError};
use crate::graph::WorkflowGraph;
use crate::models::Transition;
use crate::tracker::IssueTracker;
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Default upper bound on the number of moves a discovery run may make.
pub const DEFAULT_MAX_HOPS: usize = 50;

/// Options for a discovery run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Maximum number of transitions to execute before giving up.
    pub max_hops: usize,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            max_hops: DEFAULT_MAX_HOPS,
        }
    }
}

/// Result of a discovery run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoveryReport {
    /// The discovered graph, stamped with the probe issue and time.
    pub graph: WorkflowGraph,
    /// Transitions executed against the probe issue, in order.
    pub hops: Vec<Transition>,
    /// Status the probe issue was left in.
    pub final_status: String,
    /// False if the hop limit or a dead end cut exploration short.
    pub complete: bool,
    /// Status where the probe got stuck, if it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stuck_at: Option<String>,
}

impl DiscoveryReport {
    /// Rebuilds the report carried by a stuck-discovery error.
    ///
    /// Returns `None` for any other error.
    pub fn from_stuck(err: &WorkflowError) -> Option<Self> {
        let WorkflowError::Discovery {
            stuck_at,
            partial,
            committed,
            ..
        } = err
        else {
            return None;
        };
        Some(Self {
            graph: partial.as_ref().clone(),
            hops: committed.clone(),
            final_status: stuck_at.clone(),
            complete: false,
            stuck_at: Some(stuck_at.clone()),
        })
    }
}

/// Maps the workflow of `issue_key`'s issue type by exercising it.
///
/// # Arguments
///
/// * `tracker` - The issue tracker
/// * `issue_key` - An existing issue used as the probe
/// * `options` - Hop limit
///
/// # Returns
///
/// A `DiscoveryReport` whose graph contains every status reachable from the
/// probe's starting status, unless the hop limit was hit (`complete == false`).
///
/// # Errors
///
/// Returns an error if:
/// - A tracker call fails
/// - A transition is rejected (`WorkflowError::TransitionFailed`)
/// - The probe reaches a status from which no unexplored status can be
///   reached (`WorkflowError::Discovery`, carrying the partial graph and the
///   hops already made; see `DiscoveryReport::from_stuck`)
/// - A tracker call fails after the probe was moved
///   (`WorkflowError::Interrupted`)
pub fn discover_workflow<T>(
    tracker: &T,
    issue_key: &str,
    options: &DiscoveryOptions,
) -> Result<DiscoveryReport>
where
    T: IssueTracker + ?Sized,
{
    let issue = tracker.issue(issue_key)?;
    let mut graph = WorkflowGraph::new(&issue.issue_type, &issue.issue_type_id);
    let mut current = issue.status;
    let mut hops: Vec<Transition> = Vec::new();
    let mut complete = true;

    info!(
        issue_key,
        issue_type = %graph.issue_type,
        start = %current,
        "Starting workflow discovery"
    );

    loop {
        let transitions = tracker
            .list_transitions(issue_key)
            .map_err(|err| Error::after_moves(issue_key, &hops, err))?;
        debug!(status = %current, count = transitions.len(), "Observed transitions");
        graph.add_state(&current, transitions);

        if graph.unexplored().is_empty() {
            break;
        }

        let route = graph.search(&current, |t| !graph.has_state(&t.to));
        let Some(step) = route.and_then(|route| route.into_iter().next()) else {
            warn!(
                issue_key,
                status = %current,
                unexplored = graph.unexplored().len(),
                "Discovery stuck; remaining statuses are unreachable from here"
            );
            let discovered = graph.states().keys().cloned().collect();
            graph.discovered_from = Some(issue_key.to_string());
            graph.discovered_at = Some(Utc::now());
            return Err(WorkflowError::Discovery {
                issue_key: issue_key.to_string(),
                stuck_at: current,
                discovered,
                partial: Box::new(graph),
                committed: hops,
            }
            .into());
        };

        if hops.len() >= options.max_hops {
            warn!(
                issue_key,
                max_hops = options.max_hops,
                unexplored = graph.unexplored().len(),
                "Discovery hop limit reached; workflow is incomplete"
            );
            complete = false;
            break;
        }

        debug!(from = %current, transition = %step, "Moving probe issue");
        if let Err(err) = tracker.execute_transition(issue_key, &step.id) {
            return Err(WorkflowError::TransitionFailed {
                issue_key: issue_key.to_string(),
                transition: step,
                current_status: current,
                reason: err.reason(),
                committed: hops,
            }
            .into());
        }

        hops.push(step);
        current = tracker
            .status(issue_key)
            .map_err(|err| Error::after_moves(issue_key, &hops, err))?;
    }

    graph.discovered_from = Some(issue_key.to_string());
    graph.discovered_at = Some(Utc::now());

    info!(
        issue_key,
        states = graph.state_count(),
        hops = hops.len(),
        complete,
        "Workflow discovery finished"
    );

    Ok(DiscoveryReport {
        graph,
        hops,
        final_status: current,
        complete,
        stuck_at: None,
    })
}
