use crate::domain::CommitRecord;
use crate::error::{ReleaseNotesError, Result};
use crate::git::Repository;
use std::collections::HashMap;

/// Mock repository for testing without actual git operations
#[derive(Debug, Clone)]
pub struct MockRepository {
    merge_records: HashMap<String, Vec<CommitRecord>>,
    branches: Vec<String>,
    ref_hashes: HashMap<String, String>,
    merge_subjects: HashMap<(String, String), Vec<String>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            merge_records: HashMap::new(),
            branches: Vec::new(),
            ref_hashes: HashMap::new(),
            merge_subjects: HashMap::new(),
        }
    }

    /// Append a merge record to the history of `refname` (newest last)
    pub fn add_merge_record(&mut self, refname: impl Into<String>, record: CommitRecord) {
        self.merge_records
            .entry(refname.into())
            .or_default()
            .push(record);
    }

    /// Add a remote branch pointing at `hash`
    pub fn add_branch(&mut self, name: impl Into<String>, hash: impl Into<String>) {
        let name = name.into();
        self.ref_hashes.insert(name.clone(), hash.into());
        self.branches.push(name);
    }

    /// Point a ref at a hash without listing it as a branch
    pub fn set_ref(&mut self, refname: impl Into<String>, hash: impl Into<String>) {
        self.ref_hashes.insert(refname.into(), hash.into());
    }

    /// Set the merge subjects returned for `from...to`
    pub fn set_merge_subjects<S: Into<String>>(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        subjects: Vec<S>,
    ) {
        self.merge_subjects.insert(
            (from.into(), to.into()),
            subjects.into_iter().map(Into::into).collect(),
        );
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn merge_records(&self, refname: &str) -> Result<Vec<CommitRecord>> {
        if !self.ref_hashes.contains_key(refname) && !self.merge_records.contains_key(refname) {
            return Err(ReleaseNotesError::git_lookup(format!(
                "Cannot resolve ref '{}'",
                refname
            )));
        }

        // Stored oldest first, returned newest first like `git log`
        let mut records = self.merge_records.get(refname).cloned().unwrap_or_default();
        records.reverse();
        Ok(records)
    }

    fn list_remote_branches(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .branches
            .iter()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn resolve_ref(&self, refname: &str) -> Result<String> {
        self.ref_hashes.get(refname).cloned().ok_or_else(|| {
            ReleaseNotesError::git_lookup(format!("Cannot resolve ref '{}'", refname))
        })
    }

    fn merge_subjects_between(&self, from: &str, to: &str) -> Result<Vec<String>> {
        Ok(self
            .merge_subjects
            .get(&(from.to_string(), to.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    fn fetch_from_remote(&self, _remote: &str) -> Result<()> {
        Ok(())
    }
}
