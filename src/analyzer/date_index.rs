use crate::boundary::BoundaryWarning;
use crate::domain::CommitRecord;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Maps commit hashes to the date of the merge that took them in.
///
/// Both parents of every two-parent merge map to the merge's date. When a
/// hash is a parent of several merges, the last record processed wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitDateIndex {
    dates: HashMap<String, NaiveDate>,
}

impl CommitDateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a merge; returns false (and records nothing) unless it has exactly two parents
    pub fn insert_record(&mut self, record: &CommitRecord) -> bool {
        if !record.is_two_parent_merge() {
            return false;
        }

        for parent in &record.parent_hashes {
            self.dates.insert(parent.clone(), record.date);
        }
        true
    }

    /// Build an index from structured merge records, in input order
    pub fn from_records(records: &[CommitRecord]) -> (Self, Vec<BoundaryWarning>) {
        let mut index = CommitDateIndex::new();
        let mut warnings = Vec::new();

        for record in records {
            if !index.insert_record(record) {
                warnings.push(BoundaryWarning::NonBinaryMerge {
                    hash: record.hash.clone(),
                    parents: record.parent_hashes.len(),
                });
            }
        }

        log::debug!(
            "Indexed {} merge parents from {} records",
            index.len(),
            records.len()
        );
        (index, warnings)
    }

    /// Build an index from raw `<date> <hash> <parent1> <parent2>` lines.
    ///
    /// Blank lines are ignored; any other line that does not parse is skipped
    /// with a warning.
    pub fn from_log_lines<S: AsRef<str>>(lines: &[S]) -> (Self, Vec<BoundaryWarning>) {
        let mut index = CommitDateIndex::new();
        let mut warnings = Vec::new();

        for line in lines.iter().map(|l| l.as_ref().trim()) {
            if line.is_empty() {
                continue;
            }

            match line.parse::<CommitRecord>() {
                Ok(record) => {
                    index.insert_record(&record);
                }
                Err(e) => warnings.push(BoundaryWarning::MalformedMergeLine {
                    line: line.to_string(),
                    reason: e.to_string(),
                }),
            }
        }

        (index, warnings)
    }

    pub fn date_for(&self, hash: &str) -> Option<NaiveDate> {
        self.dates.get(hash).copied()
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.dates.contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn merge(hash: &str, day: u32, parents: &[&str]) -> CommitRecord {
        CommitRecord::new(
            hash,
            date(2024, 1, day),
            parents.iter().map(|p| p.to_string()).collect(),
        )
    }

    #[test]
    fn test_every_parent_is_indexed() {
        let records = vec![merge("m1", 3, &["a", "b"]), merge("m2", 2, &["c", "d"])];
        let (index, warnings) = CommitDateIndex::from_records(&records);

        assert!(warnings.is_empty());
        for hash in ["a", "b", "c", "d"] {
            assert!(index.contains(hash), "{} should be indexed", hash);
        }
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_merge_hash_itself_is_not_indexed() {
        let (index, _) = CommitDateIndex::from_records(&[merge("m1", 1, &["a", "b"])]);
        assert!(!index.contains("m1"));
        assert_eq!(index.date_for("zzz"), None);
    }

    #[test]
    fn test_last_processed_record_wins() {
        let records = vec![merge("m2", 5, &["a", "t2"]), merge("m1", 1, &["a", "t1"])];
        let (index, _) = CommitDateIndex::from_records(&records);

        assert_eq!(index.date_for("a"), Some(date(2024, 1, 1)));
        assert_eq!(index.date_for("t2"), Some(date(2024, 1, 5)));
    }

    #[test]
    fn test_octopus_merge_is_skipped_with_warning() {
        let records = vec![merge("m1", 1, &["a", "b", "c"]), merge("m2", 2, &["d", "e"])];
        let (index, warnings) = CommitDateIndex::from_records(&records);

        assert!(!index.contains("a"));
        assert!(index.contains("d"));
        assert_eq!(
            warnings,
            vec![BoundaryWarning::NonBinaryMerge {
                hash: "m1".to_string(),
                parents: 3
            }]
        );
    }

    #[test]
    fn test_from_log_lines_drops_malformed() {
        let lines = [
            "2024-01-01 m1 a t",
            "2024-01-02 c1 p1",
            "",
            "not-a-date m2 b t",
        ];
        let (index, warnings) = CommitDateIndex::from_log_lines(&lines);

        assert_eq!(index.date_for("a"), Some(date(2024, 1, 1)));
        assert_eq!(index.date_for("t"), Some(date(2024, 1, 1)));
        assert!(!index.contains("p1"));
        assert!(!index.contains("b"));
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let (index, warnings) = CommitDateIndex::from_records(&[]);
        assert!(index.is_empty());
        assert!(warnings.is_empty());
    }
}
