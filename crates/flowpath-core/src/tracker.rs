// Rust guideline compliant 2026-10-12

//! Issue tracker collaborator interface.
//!
//! The engine only needs to read an issue's status, list the transitions
//! legal from that status, execute one, and optionally comment. Keeping the
//! trait this narrow lets discovery and path execution run unchanged against
//! a live tracker or `crate::simulation::SimulatedTracker`.

use crate::models::{IssueInfo, Transition};
use thiserror::Error;

/// Errors reported by an issue tracker.
#[derive(Debug, Clone, Error)]
pub enum TrackerError {
    /// Credentials were rejected.
    #[error("{provider}: unauthorized (check credentials)")]
    Unauthorized {
        /// Tracker name.
        provider: String,
    },

    /// The caller lacks permission for the operation.
    #[error("{provider}: forbidden")]
    Forbidden {
        /// Tracker name.
        provider: String,
    },

    /// The issue or resource does not exist.
    #[error("{provider}: not found: {resource}")]
    NotFound {
        /// Tracker name.
        provider: String,
        /// What was looked up.
        resource: String,
    },

    /// The tracker asked us to slow down.
    #[error("{provider}: rate limited")]
    RateLimited {
        /// Tracker name.
        provider: String,
        /// Seconds to wait, if the tracker said.
        retry_after_secs: Option<u64>,
    },

    /// Transport-level failure.
    #[error("{provider}: network error: {message}")]
    Network {
        /// Tracker name.
        provider: String,
        /// Underlying error text.
        message: String,
    },

    /// Any other non-success response.
    #[error("{provider}: HTTP {status}: {message}")]
    Http {
        /// Tracker name.
        provider: String,
        /// HTTP status code.
        status: u16,
        /// Response body or message.
        message: String,
    },

    /// The response could not be understood.
    #[error("{provider}: unexpected response: {message}")]
    InvalidResponse {
        /// Tracker name.
        provider: String,
        /// What was wrong.
        message: String,
    },

    /// The tracker rejected the request for a domain reason.
    #[error("{provider}: {message}")]
    Rejected {
        /// Tracker name.
        provider: String,
        /// Reason given by the tracker.
        message: String,
    },
}

impl TrackerError {
    /// Creates a network error.
    pub fn network(provider: impl Into<String>, message: impl Into<String>) -> Self {
        TrackerError::Network {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Creates an HTTP error.
    pub fn http(provider: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        TrackerError::Http {
            provider: provider.into(),
            status,
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(provider: impl Into<String>, resource: impl Into<String>) -> Self {
        TrackerError::NotFound {
            provider: provider.into(),
            resource: resource.into(),
        }
    }

    /// Creates an error for a malformed response.
    pub fn invalid_response(provider: impl Into<String>, message: impl Into<String>) -> Self {
        TrackerError::InvalidResponse {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Creates a domain rejection.
    pub fn rejected(provider: impl Into<String>, message: impl Into<String>) -> Self {
        TrackerError::Rejected {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// The reason text without the provider prefix.
    pub fn reason(&self) -> String {
        match self {
            TrackerError::Unauthorized { .. } => "unauthorized".to_string(),
            TrackerError::Forbidden { .. } => "forbidden".to_string(),
            TrackerError::NotFound { resource, .. } => format!("not found: {}", resource),
            TrackerError::RateLimited { .. } => "rate limited".to_string(),
            TrackerError::Network { message, .. }
            | TrackerError::Http { message, .. }
            | TrackerError::InvalidResponse { message, .. }
            | TrackerError::Rejected { message, .. } => message.clone(),
        }
    }

    /// Returns true for credential or permission failures.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            TrackerError::Unauthorized { .. } | TrackerError::Forbidden { .. }
        )
    }
}

/// Result type alias for tracker calls.
pub type TrackerResult<T> = std::result::Result<T, TrackerError>;

/// The operations the workflow engine consumes from an issue tracker.
pub trait IssueTracker {
    /// Reads the issue's key, current status, and type.
    fn issue(&self, issue_key: &str) -> TrackerResult<IssueInfo>;

    /// Lists the transitions legal from the issue's current status.
    fn list_transitions(&self, issue_key: &str) -> TrackerResult<Vec<Transition>>;

    /// Executes one transition by id.
    fn execute_transition(&self, issue_key: &str, transition_id: &str) -> TrackerResult<()>;

    /// Posts a comment on the issue.
    fn post_comment(&self, issue_key: &str, body: &str) -> TrackerResult<()>;

    /// Reads only the current status name.
    fn status(&self, issue_key: &str) -> TrackerResult<String> {
        Ok(self.issue(issue_key)?.status)
    }
}
