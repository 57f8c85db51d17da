// Rust guideline compliant 2026-10-12

//! Jira REST implementation of `flowpath_core::IssueTracker`.
//!
//! Uses the blocking `reqwest` client against REST API v2, which Cloud and
//! Server/Data Center both serve and which accepts plain-text comment bodies.

mod client;
mod wire;

pub use client::{JiraClient, PROVIDER_NAME};
