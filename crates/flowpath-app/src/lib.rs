// Rust guideline compliant 2026-10-12

//! Shared application services for Flowpath.
//!
//! This crate provides reusable, non-CLI-specific helpers for workspace
//! resolution, issue transitions, workflow discovery, cached workflow
//! queries, and standardized response envelopes.

pub mod discover;
pub mod error;
pub mod response;
pub mod transition;
pub mod workflows;
pub mod workspace;

pub use discover::{run_discovery, DiscoverRequest, DiscoveryResult};
pub use error::{AppError, ErrorCode, Result};
pub use response::{ErrorEnvelope, SuccessEnvelope};
pub use transition::{
    list_transitions, run_transition, validate_issue_key, TransitionList, TransitionResult,
};
pub use workflows::{
    delete_workflow, list_workflows, show_workflow, workflow_path, WorkflowPath, WorkflowSummary,
};
pub use workspace::Workspace;
