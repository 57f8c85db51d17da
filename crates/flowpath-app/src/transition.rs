// Rust guideline compliant 2026-10-12

//! Live transition listing and goal-directed transitions.

use crate::error::{AppError, Result};
use flowpath_core::{
    Error as CoreError, IssueTracker, Transition, TransitionEngine, TransitionOptions,
    TransitionOutcome, WorkflowError, WorkflowStore,
};
use serde::Serialize;
use tracing::{debug, info};

/// Transitions currently available on an issue.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionList {
    /// Issue key.
    pub issue_key: String,
    /// Current status.
    pub status: String,
    /// Issue type name.
    pub issue_type: String,
    /// Transitions available from `status`.
    pub transitions: Vec<Transition>,
}

/// Result of a transition command.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionResult {
    /// Engine outcome.
    #[serde(flatten)]
    pub outcome: TransitionOutcome,
    /// Number of transitions applied or planned.
    pub steps: usize,
}

impl From<TransitionOutcome> for TransitionResult {
    fn from(outcome: TransitionOutcome) -> Self {
        let steps = outcome.steps();
        Self { outcome, steps }
    }
}

/// Checks that an issue key is safe to put in a request path.
///
/// # Errors
///
/// Returns `AppError::InvalidInput` for empty keys or keys containing
/// whitespace, `/`, `?`, or `#`.
pub fn validate_issue_key(issue_key: &str) -> Result<()> {
    if issue_key.is_empty() {
        return Err(AppError::InvalidInput("Issue key cannot be empty".to_string()));
    }
    if issue_key
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#'))
    {
        return Err(AppError::InvalidInput(format!(
            "Invalid issue key: {}",
            issue_key
        )));
    }
    Ok(())
}

/// Lists the transitions available on an issue right now.
///
/// # Errors
///
/// Returns an error if the key is invalid or a tracker call fails.
pub fn list_transitions<T>(tracker: &T, issue_key: &str) -> Result<TransitionList>
where
    T: IssueTracker + ?Sized,
{
    validate_issue_key(issue_key)?;
    let issue = tracker.issue(issue_key)?;
    let transitions = tracker.list_transitions(issue_key)?;
    debug!(issue_key, status = %issue.status, count = transitions.len(), "Listed transitions");

    Ok(TransitionList {
        issue_key: issue.key,
        status: issue.status,
        issue_type: issue.issue_type,
        transitions,
    })
}

/// Moves an issue to `target`.
///
/// Live runs always probe the tracker. Dry runs also plan over the cached
/// workflow for the issue's type, when one exists.
///
/// # Arguments
///
/// * `tracker` - Issue tracker to act on
/// * `store` - Workflow cache consulted for dry runs
/// * `issue_key` - The issue to move
/// * `target` - Target status name, or a fragment of a transition name
/// * `options` - Comment, dry-run, and step budget options
///
/// # Errors
///
/// Returns an error if:
/// - The key or target is invalid (`AppError::InvalidInput`)
/// - A dry run finds no route and no workflow is cached
///   (`AppError::Unplanned`)
/// - The engine fails (see `TransitionEngine::transition`)
pub fn run_transition<T>(
    tracker: &T,
    store: &WorkflowStore,
    issue_key: &str,
    target: &str,
    options: &TransitionOptions,
) -> Result<TransitionResult>
where
    T: IssueTracker + ?Sized,
{
    validate_issue_key(issue_key)?;
    let target = target.trim();
    if target.is_empty() {
        return Err(AppError::InvalidInput("Target status cannot be empty".to_string()));
    }
    if options.max_steps == 0 {
        return Err(AppError::InvalidInput(
            "max_steps must be greater than 0".to_string(),
        ));
    }

    let mut uncached_type = None;
    let cached = if options.dry_run {
        let issue = tracker.issue(issue_key)?;
        let cached = store.get(&issue.issue_type)?;
        debug!(
            issue_type = %issue.issue_type,
            cached = cached.is_some(),
            "Dry-run planning"
        );
        if cached.is_none() {
            uncached_type = Some(issue.issue_type);
        }
        cached
    } else {
        None
    };

    let mut engine = TransitionEngine::new(tracker);
    if let Some(graph) = cached.as_ref() {
        engine = engine.with_known_workflow(graph);
    }

    let outcome = engine
        .transition(issue_key, target, options)
        .map_err(|err| match (err, uncached_type) {
            (
                CoreError::Workflow(source @ WorkflowError::PathNotFound { .. }),
                Some(issue_type),
            ) => AppError::Unplanned { issue_type, source },
            (err, _) => err.into(),
        })?;
    if outcome.dry_run {
        info!(issue_key, steps = outcome.steps(), "Planned transition");
    }
    Ok(outcome.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_issue_key() {
        assert!(validate_issue_key("PROJ-123").is_ok());
        assert!(validate_issue_key("10042").is_ok());
        assert!(validate_issue_key("").is_err());
        assert!(validate_issue_key("PROJ 1").is_err());
        assert!(validate_issue_key("../admin").is_err());
        assert!(validate_issue_key("PROJ-1?expand=all").is_err());
    }
}
