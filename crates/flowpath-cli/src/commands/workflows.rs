// Rust guideline compliant 2026-10-12

//! Implementation of the `flowpath workflows` commands.
//!
//! These work on the local workflow cache only and never contact Jira.

use crate::OutputFormatter;
use flowpath_app::{
    delete_workflow, list_workflows, show_workflow, workflow_path, Result, Workspace,
};

/// Lists cached workflows.
///
/// # Errors
///
/// Returns an error if the cache cannot be read.
pub fn list(workspace: &Workspace, formatter: &dyn OutputFormatter) -> Result<()> {
    let store = workspace.open_store()?;
    println!("{}", formatter.format_workflows(&list_workflows(&store)?));
    Ok(())
}

/// Shows one cached workflow, or its Graphviz rendering with `dot`.
///
/// # Errors
///
/// Returns an error if nothing is cached for `issue_type`.
pub fn show(
    workspace: &Workspace,
    issue_type: &str,
    dot: bool,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let store = workspace.open_store()?;
    let graph = show_workflow(&store, issue_type)?;
    if dot {
        println!("{}", graph.to_dot());
    } else {
        println!("{}", formatter.format_workflow(&graph));
    }
    Ok(())
}

/// Removes one cached workflow.
///
/// # Errors
///
/// Returns an error if nothing is cached for `issue_type` or the cache
/// cannot be written.
pub fn delete(
    workspace: &Workspace,
    issue_type: &str,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let mut store = workspace.open_store()?;
    delete_workflow(&mut store, issue_type)?;
    println!("{}", formatter.format_deleted(issue_type));
    Ok(())
}

/// Prints the shortest path between two statuses of a cached workflow.
///
/// # Errors
///
/// Returns an error if nothing is cached for `issue_type` or `to` is not
/// reachable from `from`.
pub fn path(
    workspace: &Workspace,
    issue_type: &str,
    from: &str,
    to: &str,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let store = workspace.open_store()?;
    let path = workflow_path(&store, issue_type, from, to)?;
    println!("{}", formatter.format_path(&path));
    Ok(())
}
