// Rust guideline compliant 2026-10-12

//! Implementation of the `flowpath transitions` command.

use crate::commands::connect;
use crate::OutputFormatter;
use flowpath_app::{list_transitions, Result, Workspace};

/// Lists the transitions available on an issue right now.
///
/// # Errors
///
/// Returns an error if Jira is not configured or a request fails.
pub fn execute(
    workspace: &Workspace,
    issue_key: &str,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let client = connect(workspace)?;
    let list = list_transitions(&client, issue_key)?;
    println!("{}", formatter.format_transitions(&list));
    Ok(())
}
