// Rust guideline compliant 2026-10-12

//! Blocking Jira REST client.

use crate::wire::{
    status_error, CommentRequest, IdRef, IssueResponse, TransitionRequest, TransitionsResponse,
};
use flowpath_core::{
    Error, IssueInfo, IssueTracker, JiraAuth, JiraConfig, Result, TrackerError, TrackerResult,
    Transition,
};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, RETRY_AFTER};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Provider name used in tracker errors.
pub const PROVIDER_NAME: &str = "jira";

/// Jira REST API client.
pub struct JiraClient {
    base_url: String,
    auth: JiraAuth,
    cloud: bool,
    client: Client,
}

impl std::fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraClient")
            .field("base_url", &self.base_url)
            .field("auth", &self.auth)
            .field("cloud", &self.cloud)
            .finish()
    }
}

impl JiraClient {
    /// Creates a client from connection settings.
    ///
    /// # Arguments
    ///
    /// * `config` - Jira URL, credentials, and timeout
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required settings are missing (`Error::InvalidConfig`)
    /// - The HTTP client cannot be built
    pub fn new(config: &JiraConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.base_url()?;
        let auth = config.auth()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("flowpath/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::InvalidConfig(format!("Failed to build HTTP client: {}", e)))?;

        let cloud = config.is_cloud();
        debug!(base_url = %base_url, cloud, "Created Jira client");

        Ok(Self {
            base_url,
            auth,
            cloud,
            client,
        })
    }

    /// The instance base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns true when talking to Jira Cloud.
    pub fn is_cloud(&self) -> bool {
        self.cloud
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/rest/api/2{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(ACCEPT, "application/json");
        match &self.auth {
            JiraAuth::Basic {
                username,
                api_token,
            } => request.basic_auth(username, Some(api_token)),
            JiraAuth::Bearer { token } => request.bearer_auth(token),
        }
    }

    /// Sends a request and maps transport and status failures.
    fn send(&self, request: RequestBuilder, resource: &str) -> TrackerResult<Response> {
        let response = self
            .authorize(request)
            .send()
            .map_err(|e| TrackerError::network(PROVIDER_NAME, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse().ok());
        let body = response.text().unwrap_or_default();
        debug!(status = status.as_u16(), resource, "Jira request failed");
        Err(status_error(status.as_u16(), &body, resource, retry_after))
    }

    fn get<T: DeserializeOwned>(&self, path: &str, resource: &str) -> TrackerResult<T> {
        let url = self.api_url(path);
        debug!("Jira GET: {}", url);
        self.send(self.client.get(&url), resource)?
            .json()
            .map_err(|e| TrackerError::invalid_response(PROVIDER_NAME, e.to_string()))
    }

    fn post<B: Serialize>(&self, path: &str, body: &B, resource: &str) -> TrackerResult<()> {
        let url = self.api_url(path);
        debug!("Jira POST: {}", url);
        self.send(self.client.post(&url).json(body), resource)?;
        Ok(())
    }
}

impl IssueTracker for JiraClient {
    fn issue(&self, issue_key: &str) -> TrackerResult<IssueInfo> {
        let path = format!("/issue/{}?fields=status,issuetype", issue_key);
        let issue: IssueResponse = self.get(&path, &format!("issue {}", issue_key))?;
        Ok(issue.into())
    }

    fn list_transitions(&self, issue_key: &str) -> TrackerResult<Vec<Transition>> {
        let path = format!("/issue/{}/transitions", issue_key);
        let response: TransitionsResponse = self.get(&path, &format!("issue {}", issue_key))?;
        Ok(response
            .transitions
            .into_iter()
            .map(Transition::from)
            .collect())
    }

    fn execute_transition(&self, issue_key: &str, transition_id: &str) -> TrackerResult<()> {
        let path = format!("/issue/{}/transitions", issue_key);
        let body = TransitionRequest {
            transition: IdRef { id: transition_id },
        };
        self.post(&path, &body, &format!("issue {}", issue_key))
    }

    fn post_comment(&self, issue_key: &str, body: &str) -> TrackerResult<()> {
        let path = format!("/issue/{}/comment", issue_key);
        self.post(
            &path,
            &CommentRequest { body },
            &format!("issue {}", issue_key),
        )
    }
}
