//! Issue tracker abstraction and issue enrichment
//!
//! The pipeline issues exactly one search against the tracker and turns the
//! result into an [IssueMap]. Any failure of that search is fatal; there is
//! no partial-report mode.
//!
//! - [jira::JiraClient]: Jira REST implementation over `reqwest`
//! - [mock::MockTracker]: In-memory implementation for testing

pub mod jira;
pub mod mock;

pub use jira::{JiraClient, JiraCredentials};
pub use mock::MockTracker;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A tracker search: query expression, result ceiling and fields to return
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub jql: String,
    #[serde(rename = "maxResults")]
    pub max_results: u32,
    pub fields: Vec<String>,
}

impl SearchQuery {
    /// Query every issue of a project
    pub fn for_project(project: &str, max_results: u32, fields: Vec<String>) -> Self {
        SearchQuery {
            jql: format!("project=\"{}\"", project),
            max_results,
            fields,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: String,
}

/// Issue as returned by the tracker search
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueRecord {
    pub key: String,
    pub id: String,
    #[serde(default)]
    pub fields: IssueFields,
}

/// Issue details shown in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueMetadata {
    pub key: String,
    /// Tracker-internal id
    pub id: String,
    pub url: String,
    pub summary: String,
}

/// Issue key -> metadata
pub type IssueMap = BTreeMap<String, IssueMetadata>;

/// Search capability consumed by the enricher
pub trait IssueTracker {
    fn search(&self, query: &SearchQuery) -> Result<Vec<IssueRecord>>;
}

/// Browse URL of an issue on the tracker
pub fn issue_url(scheme: &str, host: &str, key: &str) -> String {
    format!("{}://{}/browse/{}", scheme, host, key)
}

/// Turn search results into an [IssueMap]; a repeated key keeps the last record
pub fn build_issue_map(scheme: &str, host: &str, records: Vec<IssueRecord>) -> IssueMap {
    records
        .into_iter()
        .map(|record| {
            let metadata = IssueMetadata {
                url: issue_url(scheme, host, &record.key),
                key: record.key.clone(),
                id: record.id,
                summary: record.fields.summary,
            };
            (record.key, metadata)
        })
        .collect()
}

/// Run the single tracker query and build the issue map from it
pub fn fetch_issue_map<T: IssueTracker + ?Sized>(
    tracker: &T,
    query: &SearchQuery,
    scheme: &str,
    host: &str,
) -> Result<IssueMap> {
    let records = tracker.search(query)?;
    log::info!("Tracker returned {} issues for {}", records.len(), query.jql);

    Ok(build_issue_map(scheme, host, records))
}
