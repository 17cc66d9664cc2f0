use crate::error::{ReleaseNotesError, Result};
use chrono::NaiveDate;
use std::str::FromStr;

/// Date format used by merge-commit log lines (`git log --date=short`)
pub const SHORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// A commit as seen by the date index: its hash, author date and parents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub hash: String,
    pub date: NaiveDate,
    pub parent_hashes: Vec<String>,
}

impl CommitRecord {
    /// Create a new commit record
    pub fn new(hash: impl Into<String>, date: NaiveDate, parent_hashes: Vec<String>) -> Self {
        CommitRecord {
            hash: hash.into(),
            date,
            parent_hashes,
        }
    }

    /// True for a merge of exactly two parents
    pub fn is_two_parent_merge(&self) -> bool {
        self.parent_hashes.len() == 2
    }
}

impl FromStr for CommitRecord {
    type Err = ReleaseNotesError;

    /// Parse a line of the form `<date> <hash> <parent1> <parent2>`.
    ///
    /// Lines whose tokens after the date are not exactly a hash and two
    /// parents are rejected.
    fn from_str(line: &str) -> Result<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let (date, rest) = tokens
            .split_first()
            .ok_or_else(|| ReleaseNotesError::parse("Empty merge-commit line"))?;

        if rest.len() != 3 {
            return Err(ReleaseNotesError::parse(format!(
                "Expected '<date> <hash> <parent1> <parent2>', got '{}'",
                line.trim()
            )));
        }

        let date = NaiveDate::parse_from_str(date, SHORT_DATE_FORMAT).map_err(|e| {
            ReleaseNotesError::parse(format!("Invalid commit date '{}': {}", date, e))
        })?;

        Ok(CommitRecord {
            hash: rest[0].to_string(),
            date,
            parent_hashes: vec![rest[1].to_string(), rest[2].to_string()],
        })
    }
}
