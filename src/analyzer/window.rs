use crate::analyzer::catalog::{ReleaseCatalog, ReleaseWindow};
use crate::analyzer::date_index::CommitDateIndex;
use crate::boundary::BoundaryWarning;
use crate::domain::IssuePattern;
use crate::error::Result;
use crate::git::Repository;
use chrono::NaiveDate;
use serde::Serialize;

/// The issues that shipped in one release, and when it shipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseReport {
    /// Short branch name, e.g. `2.3.x`
    pub release: String,
    pub date: Option<NaiveDate>,
    /// Issue ids in log order, duplicates kept
    pub issue_ids: Vec<String>,
}

/// Extracts a [ReleaseReport] for every window of a release catalog
pub struct ReleaseWindowExtractor {
    pattern: IssuePattern,
}

impl ReleaseWindowExtractor {
    pub fn new(pattern: IssuePattern) -> Self {
        ReleaseWindowExtractor { pattern }
    }

    /// Build the report for a single window
    ///
    /// Returns a [BoundaryWarning::MissingReleaseDate] alongside the report
    /// when the release tip is not in the date index.
    pub fn extract_window<R: Repository>(
        &self,
        repo: &R,
        index: &CommitDateIndex,
        window: ReleaseWindow<'_>,
    ) -> Result<(ReleaseReport, Option<BoundaryWarning>)> {
        let subjects =
            repo.merge_subjects_between(&window.previous.branch_name, &window.current.branch_name)?;
        let issue_ids = self.pattern.extract_all(&subjects);

        let tip = repo.resolve_ref(&window.current.branch_name)?;
        let date = index.date_for(&tip);
        let release = window.current.short_name().to_string();

        log::debug!(
            "{}...{}: {} merges, {} issues, date {:?}",
            window.previous.branch_name,
            window.current.branch_name,
            subjects.len(),
            issue_ids.len(),
            date
        );

        let warning = match date {
            Some(_) => None,
            None => Some(BoundaryWarning::MissingReleaseDate {
                release: release.clone(),
                commit_hash: tip,
            }),
        };

        Ok((
            ReleaseReport {
                release,
                date,
                issue_ids,
            },
            warning,
        ))
    }

    /// Build reports for all windows, newest release first
    pub fn extract<R: Repository>(
        &self,
        repo: &R,
        catalog: &ReleaseCatalog,
        index: &CommitDateIndex,
    ) -> Result<(Vec<ReleaseReport>, Vec<BoundaryWarning>)> {
        let mut reports = Vec::with_capacity(catalog.len().saturating_sub(1));
        let mut warnings = Vec::new();

        for window in catalog.windows() {
            let (report, warning) = self.extract_window(repo, index, window)?;
            reports.push(report);
            warnings.extend(warning);
        }

        Ok((reports, warnings))
    }
}
