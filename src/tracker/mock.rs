use crate::error::{ReleaseNotesError, Result};
use crate::tracker::{IssueRecord, IssueTracker, SearchQuery};
use std::cell::RefCell;

/// Mock tracker for testing without network access
#[derive(Debug, Default)]
pub struct MockTracker {
    issues: Vec<IssueRecord>,
    auth_failure: Option<String>,
    queries: RefCell<Vec<SearchQuery>>,
}

impl MockTracker {
    /// Tracker answering every search with `issues`
    pub fn with_issues(issues: Vec<IssueRecord>) -> Self {
        MockTracker {
            issues,
            ..Default::default()
        }
    }

    /// Tracker rejecting every search as unauthenticated
    pub fn failing_auth(message: impl Into<String>) -> Self {
        MockTracker {
            auth_failure: Some(message.into()),
            ..Default::default()
        }
    }

    /// Queries received so far
    pub fn queries(&self) -> Vec<SearchQuery> {
        self.queries.borrow().clone()
    }
}

impl IssueTracker for MockTracker {
    fn search(&self, query: &SearchQuery) -> Result<Vec<IssueRecord>> {
        self.queries.borrow_mut().push(query.clone());

        if let Some(message) = &self.auth_failure {
            return Err(ReleaseNotesError::tracker_auth(message.clone()));
        }

        Ok(self
            .issues
            .iter()
            .take(query.max_results as usize)
            .cloned()
            .collect())
    }
}
