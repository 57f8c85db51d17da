// Rust guideline compliant 2026-10-12

//! Error handling for Flowpath application services.

use flowpath_core::{Error as CoreError, TrackerError, WorkflowError};
use serde::Serialize;
use thiserror::Error;

/// Result type alias for application-level operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Stable error codes for command and tool responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// No route to the target in the workflow as observed.
    PathNotFound,
    /// No cached workflow for the issue type.
    WorkflowNotFound,
    /// Discovery could not reach the remaining statuses.
    DiscoveryStuck,
    /// The tracker rejected a single transition.
    TransitionFailed,
    /// The target was not reached within the step budget.
    StepLimitExceeded,
    /// Tracker credentials were rejected or lack permission.
    Unauthorized,
    /// The issue or resource does not exist in the tracker.
    NotFound,
    /// The tracker asked the client to slow down.
    RateLimited,
    /// Any other tracker failure.
    TrackerError,
    /// Tracker connection settings are missing.
    NotConfigured,
    /// A configuration file or variable is invalid.
    ConfigError,
    /// The request included invalid inputs.
    InvalidInput,
    /// IO failure while reading or writing local files.
    IoError,
    /// JSON serialization or parsing failed.
    JsonError,
}

/// Application-level errors with stable mapping to error codes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Tracker connection settings are missing or incomplete.
    #[error("Jira is not configured: {0}")]
    NotConfigured(String),

    /// Invalid input was provided by the caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A dry run found no route and had no cached workflow to plan over.
    #[error("{source} (no cached workflow for '{issue_type}')")]
    Unplanned {
        /// The issue's type.
        issue_type: String,
        /// The path search failure.
        #[source]
        source: WorkflowError,
    },

    /// Error from core library operations.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// IO error not represented by core errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        AppError::Core(err.into())
    }
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        AppError::Core(err.into())
    }
}

impl AppError {
    /// Returns a stable error code for the error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotConfigured(_) => ErrorCode::NotConfigured,
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::Io(_) => ErrorCode::IoError,
            AppError::Unplanned { source, .. } => workflow_code(source),
            AppError::Core(core) => match core {
                CoreError::Io(_) => ErrorCode::IoError,
                CoreError::Json(_) => ErrorCode::JsonError,
                CoreError::InvalidConfig(_) => ErrorCode::ConfigError,
                CoreError::InvalidInput(_) => ErrorCode::InvalidInput,
                CoreError::Tracker(tracker) => tracker_code(tracker),
                CoreError::Workflow(workflow) => workflow_code(workflow),
            },
        }
    }

    /// Returns structured details for errors that benefit from extra context.
    ///
    /// Failures after the first executed transition always include the
    /// committed transitions.
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        let core = match self {
            AppError::Unplanned { issue_type, source } => {
                let mut details = workflow_details(source);
                details["issue_type"] = serde_json::json!(issue_type);
                return Some(details);
            }
            AppError::Core(core) => core,
            _ => return None,
        };

        match core {
            CoreError::Workflow(workflow) => Some(workflow_details(workflow)),
            CoreError::Tracker(TrackerError::RateLimited {
                retry_after_secs, ..
            }) => Some(serde_json::json!({
                "retry_after_secs": retry_after_secs,
            })),
            CoreError::Tracker(TrackerError::Http { status, .. }) => Some(serde_json::json!({
                "status": status,
            })),
            _ => None,
        }
    }

    /// Returns a suggested next step, if there is an obvious one.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        let hint = match self {
            AppError::NotConfigured(_) => {
                "Set JIRA_URL plus JIRA_PERSONAL_TOKEN (or JIRA_USERNAME and JIRA_API_TOKEN), or add a [jira] section to config.toml".to_string()
            }
            AppError::Unplanned { issue_type, .. } => format!(
                "Without a cached workflow a dry run only sees the current status; run 'flowpath discover <KEY> --save' on a '{}' issue first",
                issue_type
            ),
            AppError::Core(CoreError::Workflow(workflow)) => match workflow {
                WorkflowError::PathNotFound { committed, .. } if !committed.is_empty() => format!(
                    "The issue was moved {} step(s) while searching and was not moved back",
                    committed.len()
                ),
                WorkflowError::PathNotFound { .. } => {
                    "Use 'flowpath transitions <KEY>' to see available transitions".to_string()
                }
                WorkflowError::WorkflowNotFound { .. } => {
                    "Run 'flowpath discover <KEY> --save' on an issue of this type".to_string()
                }
                WorkflowError::Discovery { stuck_at, .. } => format!(
                    "The probe issue was left in '{}'; move it manually and run discovery again",
                    stuck_at
                ),
                WorkflowError::TransitionFailed { current_status, .. } => format!(
                    "Earlier transitions were not rolled back; the issue is in '{}'",
                    current_status
                ),
                WorkflowError::StepLimitExceeded { .. } => {
                    "Increase --max-steps or choose a closer target".to_string()
                }
                WorkflowError::Interrupted { .. } => {
                    "The issue was moved before the failure; run 'flowpath transitions <KEY>' to see where it is now".to_string()
                }
            },
            AppError::Core(CoreError::Tracker(tracker)) if tracker.is_auth_error() => {
                "Check JIRA_USERNAME and JIRA_API_TOKEN, or JIRA_PERSONAL_TOKEN".to_string()
            }
            _ => return None,
        };
        Some(hint)
    }
}

fn tracker_code(tracker: &TrackerError) -> ErrorCode {
    match tracker {
        TrackerError::Unauthorized { .. } | TrackerError::Forbidden { .. } => {
            ErrorCode::Unauthorized
        }
        TrackerError::NotFound { .. } => ErrorCode::NotFound,
        TrackerError::RateLimited { .. } => ErrorCode::RateLimited,
        _ => ErrorCode::TrackerError,
    }
}

fn workflow_code(workflow: &WorkflowError) -> ErrorCode {
    match workflow {
        WorkflowError::PathNotFound { .. } => ErrorCode::PathNotFound,
        WorkflowError::WorkflowNotFound { .. } => ErrorCode::WorkflowNotFound,
        WorkflowError::Discovery { .. } => ErrorCode::DiscoveryStuck,
        WorkflowError::TransitionFailed { .. } => ErrorCode::TransitionFailed,
        WorkflowError::StepLimitExceeded { .. } => ErrorCode::StepLimitExceeded,
        WorkflowError::Interrupted { source, .. } => tracker_code(source),
    }
}

fn workflow_details(workflow: &WorkflowError) -> serde_json::Value {
    match workflow {
        WorkflowError::PathNotFound {
            from,
            to,
            reachable,
            committed,
        } => serde_json::json!({
            "from": from,
            "to": to,
            "reachable": reachable,
            "committed": committed,
        }),
        WorkflowError::WorkflowNotFound { issue_type } => serde_json::json!({
            "issue_type": issue_type,
        }),
        WorkflowError::Discovery {
            issue_key,
            stuck_at,
            discovered,
            partial,
            committed,
        } => serde_json::json!({
            "issue_key": issue_key,
            "stuck_at": stuck_at,
            "discovered": discovered,
            "committed": committed,
            "workflow": partial,
        }),
        WorkflowError::TransitionFailed {
            issue_key,
            transition,
            current_status,
            reason,
            committed,
        } => serde_json::json!({
            "issue_key": issue_key,
            "attempted": transition,
            "current_status": current_status,
            "reason": reason,
            "committed": committed,
        }),
        WorkflowError::StepLimitExceeded {
            issue_key,
            target,
            max_steps,
            committed,
        } => serde_json::json!({
            "issue_key": issue_key,
            "target": target,
            "max_steps": max_steps,
            "committed": committed,
        }),
        WorkflowError::Interrupted {
            issue_key,
            source,
            committed,
        } => serde_json::json!({
            "issue_key": issue_key,
            "reason": source.reason(),
            "committed": committed,
        }),
    }
}
