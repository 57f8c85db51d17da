// Rust guideline compliant 2026-10-12

//! Implementation of the `flowpath discover` command.
//!
//! Walks a probe issue through every reachable status. The issue is left
//! wherever the walk ends, so use a throwaway issue.

use crate::commands::connect;
use crate::OutputFormatter;
use flowpath_app::{run_discovery, DiscoverRequest, Result, Workspace};

/// Discovers the workflow of `issue_key`'s issue type.
///
/// # Arguments
///
/// * `save` - Write the workflow to the cache when discovery completes
/// * `force` - Also save when the hop limit or a dead end cut discovery short
/// * `max_hops` - Hop limit override
///
/// # Errors
///
/// Returns an error if Jira is not configured, a transition is rejected,
/// or discovery gets stuck without `force`.
pub fn execute(
    workspace: &Workspace,
    issue_key: &str,
    save: bool,
    force: bool,
    max_hops: Option<usize>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let client = connect(workspace)?;
    let mut store = workspace.open_store()?;
    let request = DiscoverRequest {
        max_hops: Some(max_hops.unwrap_or(workspace.config().discovery_max_hops)),
        save: save || force,
        force,
    };

    let result = run_discovery(&client, &mut store, issue_key, &request)?;
    println!("{}", formatter.format_discovery(&result));
    Ok(())
}
