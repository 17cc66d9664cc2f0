use crate::error::{ReleaseNotesError, Result};
use crate::tracker::{IssueRecord, IssueTracker, SearchQuery};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use std::env;

/// Basic-auth credentials for the Jira REST API
#[derive(Clone, PartialEq, Eq)]
pub struct JiraCredentials {
    pub username: String,
    pub password: String,
}

impl JiraCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        JiraCredentials {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read credentials from the named environment variables.
    ///
    /// Unset variables become empty strings so that the tracker, not this
    /// function, reports the authentication failure.
    pub fn from_env(user_var: &str, password_var: &str) -> Self {
        let username = env::var(user_var).unwrap_or_else(|_| {
            log::warn!("{} is not set; tracker authentication will likely fail", user_var);
            String::new()
        });
        let password = env::var(password_var).unwrap_or_else(|_| {
            log::warn!(
                "{} is not set; tracker authentication will likely fail",
                password_var
            );
            String::new()
        });

        JiraCredentials { username, password }
    }
}

impl std::fmt::Debug for JiraCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<IssueRecord>,
    #[serde(default)]
    total: Option<u64>,
}

/// Blocking client for the Jira search endpoint
pub struct JiraClient {
    http: Client,
    base_url: String,
    credentials: JiraCredentials,
}

impl JiraClient {
    /// Create a client for `<scheme>://<host>`
    pub fn new(scheme: &str, host: &str, credentials: JiraCredentials) -> Result<Self> {
        if host.trim().is_empty() {
            return Err(ReleaseNotesError::config("Tracker host must not be empty"));
        }

        let http = Client::builder()
            .user_agent(concat!("git-release-notes/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(JiraClient {
            http,
            base_url: format!("{}://{}", scheme, host.trim_end_matches('/')),
            credentials,
        })
    }

    pub fn search_url(&self) -> String {
        format!("{}/rest/api/2/search", self.base_url)
    }
}

impl IssueTracker for JiraClient {
    fn search(&self, query: &SearchQuery) -> Result<Vec<IssueRecord>> {
        let url = self.search_url();
        log::debug!("POST {} jql={}", url, query.jql);

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .json(query)
            .send()?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ReleaseNotesError::tracker_auth(format!(
                "{} responded {}",
                url, status
            )));
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ReleaseNotesError::tracker(format!(
                "{} responded {}: {}",
                url,
                status,
                body.trim()
            )));
        }

        let body: SearchResponse = response.json()?;

        if let Some(total) = body.total {
            if total > body.issues.len() as u64 {
                log::warn!(
                    "Tracker has {} issues for '{}' but returned {}; raise max_results to see all",
                    total,
                    query.jql,
                    body.issues.len()
                );
            }
        }

        Ok(body.issues)
    }
}
