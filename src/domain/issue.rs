use crate::error::{ReleaseNotesError, Result};
use regex::Regex;

/// Matcher for issue identifiers in pull-request merge subjects.
///
/// Matches `Merge pull request ... <PREFIX>-<digits>`; the identifier taken
/// is the last `<PREFIX>-<digits>` token on the line.
#[derive(Debug, Clone)]
pub struct IssuePattern {
    prefix: String,
    regex: Regex,
}

impl IssuePattern {
    /// Build a pattern for a tracker project prefix such as `PCD`
    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        if prefix.trim().is_empty() {
            return Err(ReleaseNotesError::config("Issue prefix must not be empty"));
        }

        let pattern = format!(r"Merge pull request.*({}-\d+)", regex::escape(&prefix));
        let regex = Regex::new(&pattern)
            .map_err(|e| ReleaseNotesError::config(format!("Invalid issue pattern: {}", e)))?;

        Ok(IssuePattern { prefix, regex })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Extract the issue identifier from one merge subject, if any
    pub fn extract(&self, subject: &str) -> Option<String> {
        self.regex
            .captures(subject)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Extract identifiers from subjects in order, keeping duplicates
    pub fn extract_all<S: AsRef<str>>(&self, subjects: &[S]) -> Vec<String> {
        subjects
            .iter()
            .filter_map(|subject| self.extract(subject.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_preserves_order_and_skips_unmatched() {
        let pattern = IssuePattern::new("PCD").unwrap();
        let subjects = [
            "Merge pull request #1 from x (PCD-42)",
            "Merge pull request #2 from y (PCD-7)",
            "routine merge, no ticket",
        ];
        assert_eq!(pattern.extract_all(&subjects), vec!["PCD-42", "PCD-7"]);
    }

    #[test]
    fn test_extract_keeps_duplicates() {
        let pattern = IssuePattern::new("PCD").unwrap();
        let subjects = [
            "Merge pull request #3 from a/PCD-9-part-one",
            "Merge pull request #4 from a/PCD-9-part-two",
        ];
        assert_eq!(pattern.extract_all(&subjects), vec!["PCD-9", "PCD-9"]);
    }

    #[test]
    fn test_requires_pull_request_merge() {
        let pattern = IssuePattern::new("PCD").unwrap();
        assert_eq!(pattern.extract("Merge branch 'PCD-11' into master"), None);
    }

    #[test]
    fn test_takes_last_identifier_on_line() {
        let pattern = IssuePattern::new("PCD").unwrap();
        assert_eq!(
            pattern.extract("abc1234 Merge pull request #5 from PCD-1 to fix PCD-23").as_deref(),
            Some("PCD-23")
        );
    }

    #[test]
    fn test_other_prefix_does_not_match() {
        let pattern = IssuePattern::new("OPS").unwrap();
        assert_eq!(pattern.extract("Merge pull request #1 from x (PCD-42)"), None);
        assert_eq!(
            pattern.extract("Merge pull request #1 from x (OPS-42)").as_deref(),
            Some("OPS-42")
        );
    }

    #[test]
    fn test_prefix_is_escaped() {
        let pattern = IssuePattern::new("A.B").unwrap();
        assert_eq!(pattern.extract("Merge pull request #1 (AxB-1)"), None);
        assert_eq!(pattern.prefix(), "A.B");
    }

    #[test]
    fn test_empty_prefix_is_rejected() {
        assert!(IssuePattern::new("").is_err());
    }
}
