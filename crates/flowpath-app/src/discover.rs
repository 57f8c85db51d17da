// Rust guideline compliant 2026-10-12

//! Workflow discovery with optional persistence.

use crate::error::{AppError, Result};
use crate::transition::validate_issue_key;
use flowpath_core::{
    discover_workflow, DiscoveryOptions, DiscoveryReport, Error as CoreError, IssueTracker,
    WorkflowStore,
};
use serde::Serialize;
use tracing::{info, warn};

/// Options for a discovery command.
#[derive(Debug, Clone, Default)]
pub struct DiscoverRequest {
    /// Hop limit; `None` uses the core default.
    pub max_hops: Option<usize>,
    /// Persist the discovered workflow.
    pub save: bool,
    /// Keep and persist the partial graph when the hop limit or a dead end
    /// cut exploration short.
    pub force: bool,
}

/// Result of a discovery command.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryResult {
    /// Discovery report.
    #[serde(flatten)]
    pub report: DiscoveryReport,
    /// Whether the graph was written to the workflow cache.
    pub saved: bool,
}

/// Discovers the workflow of `issue_key`'s type by walking the issue.
///
/// The issue is moved through every reachable status and left wherever the
/// walk ends. Incomplete discoveries are only saved with `force`. Without
/// `force`, a probe stuck at a dead end is an error; with it, the partial
/// graph is returned (and saved, if requested).
///
/// # Errors
///
/// Returns an error if:
/// - The key or hop limit is invalid (`AppError::InvalidInput`)
/// - Discovery fails (see `discover_workflow`)
/// - The workflow cache cannot be written
pub fn run_discovery<T>(
    tracker: &T,
    store: &mut WorkflowStore,
    issue_key: &str,
    request: &DiscoverRequest,
) -> Result<DiscoveryResult>
where
    T: IssueTracker + ?Sized,
{
    validate_issue_key(issue_key)?;
    let mut options = DiscoveryOptions::default();
    if let Some(max_hops) = request.max_hops {
        if max_hops == 0 {
            return Err(AppError::InvalidInput(
                "max_hops must be greater than 0".to_string(),
            ));
        }
        options.max_hops = max_hops;
    }

    let report = match discover_workflow(tracker, issue_key, &options) {
        Ok(report) => report,
        Err(CoreError::Workflow(err)) if request.force => {
            match DiscoveryReport::from_stuck(&err) {
                Some(report) => report,
                None => return Err(err.into()),
            }
        }
        Err(err) => return Err(err.into()),
    };

    let saved = if !request.save {
        false
    } else if report.complete || request.force {
        store.save(&report.graph)?;
        info!(
            issue_type = %report.graph.issue_type,
            path = %store.path().display(),
            "Saved workflow"
        );
        true
    } else {
        warn!(
            issue_type = %report.graph.issue_type,
            max_hops = options.max_hops,
            "Discovery incomplete; not saving (use --force to save anyway)"
        );
        false
    };

    Ok(DiscoveryResult { report, saved })
}
