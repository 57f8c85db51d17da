// Rust guideline compliant 2026-10-12

//! Core data models for Flowpath.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One edge of a workflow graph.
///
/// `to` is the destination status display name. Names are the only identity
/// that stays stable across tracker calls, so statuses are never keyed by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    /// Tracker-assigned transition identifier.
    pub id: String,
    /// Display name of the transition ("Start Progress").
    pub name: String,
    /// Destination status name.
    pub to: String,
}

impl Transition {
    /// Creates a new Transition.
    pub fn new(id: impl Into<String>, name: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            to: to.into(),
        }
    }

    /// Returns true if this transition satisfies a requested target.
    ///
    /// The target matches the destination status (case-insensitive) or, as a
    /// secondary rule, is a case-insensitive substring of the transition name.
    pub fn matches_target(&self, target: &str) -> bool {
        let target = fold(target);
        if target.is_empty() {
            return false;
        }
        fold(&self.to) == target || fold(&self.name).contains(&target)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.name, self.to)
    }
}

/// Snapshot of the fields of a live issue the engine cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueInfo {
    /// Issue key ("PROJ-123").
    pub key: String,
    /// Current status name.
    pub status: String,
    /// Issue type name ("Task").
    pub issue_type: String,
    /// Issue type identifier.
    pub issue_type_id: String,
}

/// Compares two status names case-insensitively.
pub fn same_status(a: &str, b: &str) -> bool {
    fold(a) == fold(b)
}

/// Normalized form of a status name used for lookups.
pub(crate) fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_status_ignores_case() {
        assert!(same_status("In Progress", "in progress"));
        assert!(same_status("OPEN", "open"));
        assert!(!same_status("Open", "Opened"));
    }

    #[test]
    fn test_matches_target_by_destination() {
        let t = Transition::new("11", "Close", "Done");
        assert!(t.matches_target("done"));
        assert!(!t.matches_target("Open"));
    }

    #[test]
    fn test_matches_target_by_name_substring() {
        let t = Transition::new("11", "Start Progress", "In Progress");
        assert!(t.matches_target("start"));
        assert!(t.matches_target("PROGRESS"));
    }

    #[test]
    fn test_transition_json_shape() {
        let t = Transition::new("11", "Start", "In Progress");
        let value = serde_json::to_value(&t).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": "11", "name": "Start", "to": "In Progress"})
        );
    }
}
