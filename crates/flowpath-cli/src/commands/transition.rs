// Rust guideline compliant 2026-10-12

//! Implementation of the `flowpath transition` command.
//!
//! Moves an issue to a target status along the shortest route, one
//! transition at a time, learning the workflow as it goes.

use crate::commands::connect;
use crate::OutputFormatter;
use flowpath_app::{run_transition, Result, Workspace};
use flowpath_core::TransitionOptions;

/// Flags for the `transition` command.
#[derive(Debug, Clone, Default)]
pub struct TransitionArgs {
    /// Post an audit comment after a successful transition.
    pub comment: bool,
    /// Plan without executing.
    pub dry_run: bool,
    /// Step budget override.
    pub max_steps: Option<usize>,
}

impl TransitionArgs {
    /// Resolves engine options against configured defaults.
    pub fn options(&self, workspace: &Workspace) -> TransitionOptions {
        let config = workspace.config();
        TransitionOptions {
            add_comment: self.comment || config.add_comment,
            dry_run: self.dry_run,
            max_steps: self.max_steps.unwrap_or(config.max_steps),
        }
    }
}

/// Moves `issue_key` to `target`.
///
/// # Errors
///
/// Returns an error if:
/// - Jira is not configured
/// - No route to `target` exists or the step budget runs out
/// - Jira rejects a transition (the error lists what was already applied)
pub fn execute(
    workspace: &Workspace,
    issue_key: &str,
    target: &str,
    args: &TransitionArgs,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let client = connect(workspace)?;
    let store = workspace.open_store()?;
    let result = run_transition(&client, &store, issue_key, target, &args.options(workspace))?;
    println!("{}", formatter.format_transition(&result));
    Ok(())
}
