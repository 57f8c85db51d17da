// Rust guideline compliant 2026-10-12

//! Jira response and request bodies, and HTTP status mapping.

use crate::client::PROVIDER_NAME;
use flowpath_core::{IssueInfo, TrackerError, Transition};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct IssueResponse {
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueFields {
    pub status: NamedRef,
    #[serde(rename = "issuetype")]
    pub issue_type: IssueTypeRef,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NamedRef {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueTypeRef {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransitionsResponse {
    #[serde(default)]
    pub transitions: Vec<JiraTransition>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JiraTransition {
    pub id: String,
    pub name: String,
    pub to: NamedRef,
}

#[derive(Debug, Serialize)]
pub(crate) struct TransitionRequest<'a> {
    pub transition: IdRef<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct IdRef<'a> {
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CommentRequest<'a> {
    pub body: &'a str,
}

/// Jira's error body: `{"errorMessages": [...], "errors": {"field": "message"}}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    error_messages: Vec<String>,
    #[serde(default)]
    errors: std::collections::BTreeMap<String, String>,
}

impl From<IssueResponse> for IssueInfo {
    fn from(issue: IssueResponse) -> Self {
        IssueInfo {
            key: issue.key,
            status: issue.fields.status.name,
            issue_type: issue.fields.issue_type.name,
            issue_type_id: issue.fields.issue_type.id,
        }
    }
}

impl From<JiraTransition> for Transition {
    fn from(t: JiraTransition) -> Self {
        Transition::new(t.id, t.name, t.to.name)
    }
}

/// Extracts a readable message from a Jira error body, falling back to the raw text.
pub(crate) fn error_message(body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let mut parts = parsed.error_messages;
    parts.extend(
        parsed
            .errors
            .into_iter()
            .map(|(field, message)| format!("{}: {}", field, message)),
    );

    if parts.is_empty() {
        body.trim().to_string()
    } else {
        parts.join("; ")
    }
}

/// Maps a non-success HTTP status to a tracker error.
pub(crate) fn status_error(
    status: u16,
    body: &str,
    resource: &str,
    retry_after_secs: Option<u64>,
) -> TrackerError {
    match status {
        400 | 409 | 422 => TrackerError::rejected(PROVIDER_NAME, error_message(body)),
        401 => TrackerError::Unauthorized {
            provider: PROVIDER_NAME.to_string(),
        },
        403 => TrackerError::Forbidden {
            provider: PROVIDER_NAME.to_string(),
        },
        404 => TrackerError::not_found(PROVIDER_NAME, resource),
        429 => TrackerError::RateLimited {
            provider: PROVIDER_NAME.to_string(),
            retry_after_secs,
        },
        _ => TrackerError::http(PROVIDER_NAME, status, error_message(body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_issue() {
        let body = r#"{
            "id": "10042",
            "key": "PROJ-7",
            "fields": {
                "status": {"id": "3", "name": "In Progress"},
                "issuetype": {"id": "10001", "name": "Task", "subtask": false}
            }
        }"#;
        let issue: IssueResponse = serde_json::from_str(body).unwrap();
        let info = IssueInfo::from(issue);

        assert_eq!(info.key, "PROJ-7");
        assert_eq!(info.status, "In Progress");
        assert_eq!(info.issue_type, "Task");
        assert_eq!(info.issue_type_id, "10001");
    }

    #[test]
    fn test_parse_transitions() {
        let body = r#"{
            "expand": "transitions",
            "transitions": [
                {"id": "21", "name": "Start Progress", "to": {"id": "3", "name": "In Progress"}, "hasScreen": false},
                {"id": "31", "name": "Done", "to": {"id": "10002", "name": "Done"}}
            ]
        }"#;
        let response: TransitionsResponse = serde_json::from_str(body).unwrap();
        let transitions: Vec<Transition> =
            response.transitions.into_iter().map(Transition::from).collect();

        assert_eq!(
            transitions,
            vec![
                Transition::new("21", "Start Progress", "In Progress"),
                Transition::new("31", "Done", "Done"),
            ]
        );
    }

    #[test]
    fn test_transition_request_shape() {
        let body = serde_json::to_value(TransitionRequest {
            transition: IdRef { id: "21" },
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"transition": {"id": "21"}}));
    }

    #[test]
    fn test_error_message_from_jira_body() {
        let body = r#"{"errorMessages": ["You do not have permission"], "errors": {"resolution": "Resolution is required."}}"#;
        assert_eq!(
            error_message(body),
            "You do not have permission; resolution: Resolution is required."
        );
    }

    #[test]
    fn test_error_message_falls_back_to_raw_text() {
        assert_eq!(error_message("  Bad Gateway \n"), "Bad Gateway");
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(401, "", "issue PROJ-1", None),
            TrackerError::Unauthorized { .. }
        ));
        assert!(matches!(
            status_error(403, "", "issue PROJ-1", None),
            TrackerError::Forbidden { .. }
        ));
        assert!(matches!(
            status_error(404, "", "issue PROJ-1", None),
            TrackerError::NotFound { .. }
        ));
        assert!(matches!(
            status_error(429, "", "issue PROJ-1", Some(30)),
            TrackerError::RateLimited {
                retry_after_secs: Some(30),
                ..
            }
        ));
        assert!(matches!(
            status_error(500, "boom", "issue PROJ-1", None),
            TrackerError::Http { status: 500, .. }
        ));
    }

    #[test]
    fn test_bad_request_is_rejection_with_reason() {
        let err = status_error(
            400,
            r#"{"errorMessages": ["Transition id '99' is not valid for this issue."]}"#,
            "issue PROJ-1",
            None,
        );
        assert_eq!(err.reason(), "Transition id '99' is not valid for this issue.");
    }
}
