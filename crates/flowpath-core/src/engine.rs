// Rust guideline compliant 2026-10-12

//! Goal-directed multi-step transitions ("smart transition").
//!
//! Given an issue and a target status, the engine moves the issue one
//! transition at a time until it reaches the target. Like discovery it can
//! only see the transitions legal from the issue's live status, so it learns
//! the graph as it goes: each step either follows the shortest known route
//! to the target or, failing that, the shortest route to the nearest status
//! it has not observed yet.
//!
//! There is no rollback. Any failure after the first move reports the
//! transitions already committed.

use crate::error::{Error, Result, WorkflowError};
use crate::graph::WorkflowGraph;
use crate::models::{same_status, IssueInfo, Transition};
use crate::tracker::IssueTracker;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Default upper bound on the number of transitions one request may execute.
pub const DEFAULT_MAX_STEPS: usize = 5;

/// Options for a smart transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionOptions {
    /// Post an audit comment summarizing the path once complete.
    pub add_comment: bool,
    /// Compute and report the path without executing anything.
    pub dry_run: bool,
    /// Upper bound on path length.
    pub max_steps: usize,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            add_comment: false,
            dry_run: false,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// Result of a smart transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionOutcome {
    /// The issue that was moved.
    pub issue_key: String,
    /// Status before the request.
    pub from_status: String,
    /// Status after the request (planned status for dry runs).
    pub final_status: String,
    /// Transitions applied, or planned for dry runs.
    pub transitions: Vec<Transition>,
    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl TransitionOutcome {
    /// Number of transitions applied or planned.
    pub fn steps(&self) -> usize {
        self.transitions.len()
    }

    fn unchanged(issue_key: &str, status: &str, dry_run: bool) -> Self {
        Self {
            issue_key: issue_key.to_string(),
            from_status: status.to_string(),
            final_status: status.to_string(),
            transitions: Vec::new(),
            dry_run,
        }
    }
}

/// Moves issues to target statuses through an `IssueTracker`.
pub struct TransitionEngine<'a, T: IssueTracker + ?Sized> {
    tracker: &'a T,
    known: Option<&'a WorkflowGraph>,
}

impl<'a, T: IssueTracker + ?Sized> TransitionEngine<'a, T> {
    /// Creates an engine that always probes the tracker live.
    pub fn new(tracker: &'a T) -> Self {
        Self {
            tracker,
            known: None,
        }
    }

    /// Supplies a previously discovered workflow for dry-run planning.
    ///
    /// Live runs never consult it; they always follow what the tracker
    /// reports.
    pub fn with_known_workflow(mut self, workflow: &'a WorkflowGraph) -> Self {
        self.known = Some(workflow);
        self
    }

    /// Moves `issue_key` to `target`.
    ///
    /// # Arguments
    ///
    /// * `issue_key` - The issue to move
    /// * `target` - Target status name, or a fragment of a transition name
    /// * `options` - Comment, dry-run, and step budget options
    ///
    /// # Returns
    ///
    /// The transitions applied (or planned) and the final status. If the
    /// issue is already in `target`, nothing is executed and no comment is
    /// posted.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No route to `target` can be found (`WorkflowError::PathNotFound`)
    /// - The step budget runs out (`WorkflowError::StepLimitExceeded`)
    /// - The tracker rejects a transition (`WorkflowError::TransitionFailed`)
    /// - A tracker call fails after the issue was moved
    ///   (`WorkflowError::Interrupted`)
    /// - Any other tracker call fails
    pub fn transition(
        &self,
        issue_key: &str,
        target: &str,
        options: &TransitionOptions,
    ) -> Result<TransitionOutcome> {
        let issue = self.tracker.issue(issue_key)?;

        if same_status(&issue.status, target) {
            debug!(issue_key, status = %issue.status, "Already at target");
            return Ok(TransitionOutcome::unchanged(
                issue_key,
                &issue.status,
                options.dry_run,
            ));
        }

        if options.dry_run {
            return self.plan(&issue, target, options);
        }

        let outcome = self.execute(&issue, target, options)?;

        if options.add_comment {
            self.post_audit_comment(&outcome);
        }

        info!(
            issue_key,
            from = %outcome.from_status,
            to = %outcome.final_status,
            steps = outcome.steps(),
            "Transition complete"
        );

        Ok(outcome)
    }

    /// Plans a path without moving the issue.
    ///
    /// Only the current status can be observed live, so planning uses its
    /// live transitions plus the known workflow, if one was supplied.
    fn plan(
        &self,
        issue: &IssueInfo,
        target: &str,
        options: &TransitionOptions,
    ) -> Result<TransitionOutcome> {
        let mut graph = match self.known {
            Some(known) if known.issue_type == issue.issue_type => known.clone(),
            _ => WorkflowGraph::new(&issue.issue_type, &issue.issue_type_id),
        };
        graph.add_state(&issue.status, self.tracker.list_transitions(&issue.key)?);

        let path = graph.path_to(&issue.status, target)?;
        if path.len() > options.max_steps {
            return Err(WorkflowError::StepLimitExceeded {
                issue_key: issue.key.clone(),
                target: target.to_string(),
                max_steps: options.max_steps,
                committed: Vec::new(),
            }
            .into());
        }

        let final_status = path
            .last()
            .map(|t| t.to.clone())
            .unwrap_or_else(|| issue.status.clone());

        Ok(TransitionOutcome {
            issue_key: issue.key.clone(),
            from_status: issue.status.clone(),
            final_status,
            transitions: path,
            dry_run: true,
        })
    }

    /// Moves the issue step by step, learning the graph as it goes.
    fn execute(
        &self,
        issue: &IssueInfo,
        target: &str,
        options: &TransitionOptions,
    ) -> Result<TransitionOutcome> {
        let issue_key = issue.key.as_str();
        let mut graph = WorkflowGraph::new(&issue.issue_type, &issue.issue_type_id);
        let mut current = issue.status.clone();
        let mut executed: Vec<Transition> = Vec::new();

        loop {
            let live = self
                .tracker
                .list_transitions(issue_key)
                .map_err(|err| Error::after_moves(issue_key, &executed, err))?;
            debug!(status = %current, count = live.len(), "Observed transitions");
            graph.add_state(&current, live);

            let (route, towards_target) = match graph.route(&current, target) {
                Some(route) => (route, true),
                None => match graph.search(&current, |t| !graph.has_state(&t.to)) {
                    Some(route) => (route, false),
                    None => {
                        if !executed.is_empty() {
                            warn!(
                                issue_key,
                                status = %current,
                                committed = executed.len(),
                                "No route to target; issue was moved while exploring"
                            );
                        }
                        return Err(WorkflowError::PathNotFound {
                            from: issue.status.clone(),
                            to: target.to_string(),
                            reachable: graph.reachable_from(&issue.status),
                            committed: executed,
                        }
                        .into());
                    }
                },
            };
            let arrives = towards_target && route.len() == 1;
            let Some(step) = route.into_iter().next() else {
                break;
            };

            if executed.len() >= options.max_steps {
                return Err(WorkflowError::StepLimitExceeded {
                    issue_key: issue_key.to_string(),
                    target: target.to_string(),
                    max_steps: options.max_steps,
                    committed: executed,
                }
                .into());
            }

            debug!(from = %current, transition = %step, "Executing transition");
            if let Err(err) = self.tracker.execute_transition(issue_key, &step.id) {
                return Err(WorkflowError::TransitionFailed {
                    issue_key: issue_key.to_string(),
                    transition: step,
                    current_status: current,
                    reason: err.reason(),
                    committed: executed,
                }
                .into());
            }

            executed.push(step);
            current = self
                .tracker
                .status(issue_key)
                .map_err(|err| Error::after_moves(issue_key, &executed, err))?;

            if arrives || same_status(&current, target) {
                break;
            }
        }

        Ok(TransitionOutcome {
            issue_key: issue_key.to_string(),
            from_status: issue.status.clone(),
            final_status: current,
            transitions: executed,
            dry_run: false,
        })
    }

    /// Posts the audit comment. Failures are logged, never returned.
    fn post_audit_comment(&self, outcome: &TransitionOutcome) {
        let body = audit_comment(outcome);
        if let Err(err) = self.tracker.post_comment(&outcome.issue_key, &body) {
            warn!(
                issue_key = %outcome.issue_key,
                error = %err,
                "Failed to post transition comment"
            );
        }
    }
}

/// Builds the audit comment text for a completed transition.
pub fn audit_comment(outcome: &TransitionOutcome) -> String {
    let via = outcome
        .transitions
        .iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>()
        .join(" -> ");
    format!(
        "Transitioned from {} to {} via: {}",
        outcome.from_status, outcome.final_status, via
    )
}

/// Moves `issue_key` to `target`, always probing the tracker live.
///
/// Shorthand for `TransitionEngine::new(tracker).transition(..)`.
pub fn smart_transition<T>(
    tracker: &T,
    issue_key: &str,
    target: &str,
    options: &TransitionOptions,
) -> Result<TransitionOutcome>
where
    T: IssueTracker + ?Sized,
{
    TransitionEngine::new(tracker).transition(issue_key, target, options)
}
