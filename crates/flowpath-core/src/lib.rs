// Rust guideline compliant 2026-10-12

//! Flowpath Core Library
//!
//! This crate provides the workflow engine behind Flowpath:
//! - Data models (Transition, IssueInfo)
//! - Workflow graphs with breadth-first path search
//! - Durable workflow cache (JSON, atomic rewrite)
//! - Live workflow discovery against an issue tracker
//! - Goal-directed multi-step transitions ("smart transition")
//! - Error types and result handling

pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod graph;
pub mod models;
pub mod simulation;
pub mod store;
pub mod timestamp;
pub mod tracker;

pub use config::{Config, JiraAuth, JiraConfig, OutputFormat};
pub use discovery::{discover_workflow, DiscoveryOptions, DiscoveryReport};
pub use engine::{
    audit_comment, smart_transition, TransitionEngine, TransitionOptions, TransitionOutcome,
};
pub use error::{Error, Result, WorkflowError};
pub use graph::{WorkflowGraph, WorkflowRecord};
pub use models::{same_status, IssueInfo, Transition};
pub use store::WorkflowStore;
pub use tracker::{IssueTracker, TrackerError, TrackerResult};
