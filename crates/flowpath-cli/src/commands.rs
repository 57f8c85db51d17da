// Rust guideline compliant 2026-10-12

//! Command implementations for the Flowpath CLI.

pub mod discover;
pub mod transition;
pub mod transitions;
pub mod workflows;

use flowpath_app::{Result, Workspace};
use flowpath_jira::JiraClient;

/// Connects to the configured Jira instance.
///
/// # Errors
///
/// Returns `AppError::NotConfigured` if connection settings are missing.
pub fn connect(workspace: &Workspace) -> Result<JiraClient> {
    Ok(JiraClient::new(workspace.jira_config()?)?)
}
