// Rust guideline compliant 2026-10-12

//! Deterministic in-memory issue tracker.
//!
//! `SimulatedTracker` holds a fixed workflow and a set of issues, and behaves
//! like a real tracker at the `IssueTracker` boundary: only transitions legal
//! from an issue's current status are listed or executable. Failures can be
//! injected per transition id, for comments, and for reads after a number of
//! moves.

use crate::graph::WorkflowGraph;
use crate::models::{IssueInfo, Transition};
use crate::tracker::{IssueTracker, TrackerError, TrackerResult};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

const PROVIDER_NAME: &str = "simulation";

/// In-memory tracker driven by a static workflow.
#[derive(Debug)]
pub struct SimulatedTracker {
    workflow: WorkflowGraph,
    state: Mutex<SimState>,
}

#[derive(Debug, Default)]
struct SimState {
    statuses: HashMap<String, String>,
    executed: Vec<(String, Transition)>,
    comments: Vec<(String, String)>,
    failing_transitions: HashMap<String, String>,
    comment_failure: Option<String>,
    read_failure: Option<(usize, String)>,
    list_calls: usize,
}

impl SimulatedTracker {
    /// Creates a tracker for one issue type with no states and no issues.
    pub fn new(issue_type: &str, issue_type_id: &str) -> Self {
        Self {
            workflow: WorkflowGraph::new(issue_type, issue_type_id),
            state: Mutex::new(SimState::default()),
        }
    }

    /// Adds a status and the transitions legal from it.
    pub fn with_state(mut self, status: &str, transitions: Vec<Transition>) -> Self {
        self.workflow.add_state(status, transitions);
        self
    }

    /// Adds an issue in the given status.
    pub fn with_issue(self, issue_key: &str, status: &str) -> Self {
        self.lock()
            .statuses
            .insert(issue_key.to_string(), status.to_string());
        self
    }

    /// Makes executing `transition_id` fail with `reason`.
    pub fn fail_transition(self, transition_id: &str, reason: &str) -> Self {
        self.lock()
            .failing_transitions
            .insert(transition_id.to_string(), reason.to_string());
        self
    }

    /// Makes every comment fail with `reason`.
    pub fn fail_comments(self, reason: &str) -> Self {
        self.lock().comment_failure = Some(reason.to_string());
        self
    }

    /// Makes reads (`issue`, `list_transitions`) fail with a network error
    /// once `moves` transitions have been executed.
    pub fn fail_reads_after(self, moves: usize, reason: &str) -> Self {
        self.lock().read_failure = Some((moves, reason.to_string()));
        self
    }

    /// Current status of an issue, if it exists.
    pub fn current_status(&self, issue_key: &str) -> Option<String> {
        self.lock().statuses.get(issue_key).cloned()
    }

    /// Transitions executed so far, in order.
    pub fn executed(&self) -> Vec<Transition> {
        self.lock()
            .executed
            .iter()
            .map(|(_, transition)| transition.clone())
            .collect()
    }

    /// Comments posted so far as `(issue_key, body)`.
    pub fn comments(&self) -> Vec<(String, String)> {
        self.lock().comments.clone()
    }

    /// Number of times transitions were listed.
    pub fn list_calls(&self) -> usize {
        self.lock().list_calls
    }

    /// The workflow the tracker enforces.
    pub fn workflow(&self) -> &WorkflowGraph {
        &self.workflow
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_read(state: &SimState) -> TrackerResult<()> {
        match &state.read_failure {
            Some((moves, reason)) if state.executed.len() >= *moves => {
                Err(TrackerError::network(PROVIDER_NAME, reason.clone()))
            }
            _ => Ok(()),
        }
    }

    fn status_of(state: &SimState, issue_key: &str) -> TrackerResult<String> {
        state
            .statuses
            .get(issue_key)
            .cloned()
            .ok_or_else(|| TrackerError::not_found(PROVIDER_NAME, format!("issue {}", issue_key)))
    }
}

impl IssueTracker for SimulatedTracker {
    fn issue(&self, issue_key: &str) -> TrackerResult<IssueInfo> {
        let state = self.lock();
        Self::check_read(&state)?;
        let status = Self::status_of(&state, issue_key)?;
        Ok(IssueInfo {
            key: issue_key.to_string(),
            status,
            issue_type: self.workflow.issue_type.clone(),
            issue_type_id: self.workflow.issue_type_id.clone(),
        })
    }

    fn list_transitions(&self, issue_key: &str) -> TrackerResult<Vec<Transition>> {
        let mut state = self.lock();
        state.list_calls += 1;
        Self::check_read(&state)?;
        let status = Self::status_of(&state, issue_key)?;
        Ok(self.workflow.transitions_from(&status).to_vec())
    }

    fn execute_transition(&self, issue_key: &str, transition_id: &str) -> TrackerResult<()> {
        let mut state = self.lock();
        let status = Self::status_of(&state, issue_key)?;

        let transition = self
            .workflow
            .transitions_from(&status)
            .iter()
            .find(|t| t.id == transition_id)
            .cloned()
            .ok_or_else(|| {
                TrackerError::rejected(
                    PROVIDER_NAME,
                    format!(
                        "transition {} is not available from '{}'",
                        transition_id, status
                    ),
                )
            })?;

        if let Some(reason) = state.failing_transitions.get(transition_id) {
            return Err(TrackerError::rejected(PROVIDER_NAME, reason.clone()));
        }

        state
            .statuses
            .insert(issue_key.to_string(), transition.to.clone());
        state.executed.push((issue_key.to_string(), transition));
        Ok(())
    }

    fn post_comment(&self, issue_key: &str, body: &str) -> TrackerResult<()> {
        let mut state = self.lock();
        Self::status_of(&state, issue_key)?;

        if let Some(reason) = &state.comment_failure {
            return Err(TrackerError::rejected(PROVIDER_NAME, reason.clone()));
        }

        state
            .comments
            .push((issue_key.to_string(), body.to_string()));
        Ok(())
    }
}
