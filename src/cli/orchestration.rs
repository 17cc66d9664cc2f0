//! Main workflow orchestration logic
//!
//! Runs the pipeline in dependency order: git discovery and release window
//! extraction complete before the single issue-tracker query, and rendering
//! happens last. Any infrastructure failure aborts with no partial output.

use crate::analyzer::{CommitDateIndex, ReleaseCatalog, ReleaseReport, ReleaseWindowExtractor};
use crate::boundary::BoundaryWarning;
use crate::config::{Config, ReportConfig};
use crate::domain::IssuePattern;
use crate::error::Result;
use crate::git::Repository;
use crate::render::ReportRenderer;
use crate::tracker::{fetch_issue_map, IssueMap, IssueTracker};

/// Reports per release plus the data-quality warnings met on the way
#[derive(Debug, Clone, PartialEq)]
pub struct Correlation {
    pub reports: Vec<ReleaseReport>,
    pub warnings: Vec<BoundaryWarning>,
}

/// Result of a successful report workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub reports: Vec<ReleaseReport>,
    pub issues: IssueMap,
    pub warnings: Vec<BoundaryWarning>,
    /// The rendered document
    pub rendered: String,
}

/// Correlate release branches with the issues merged into them
///
/// 1. Optionally fetch the remote (failure is a warning)
/// 2. Index trunk merge dates
/// 3. Build the release catalog
/// 4. Extract one report per release window
pub fn correlate_releases<R: Repository>(repo: &R, config: &Config) -> Result<Correlation> {
    let repository = &config.repository;
    let mut warnings = Vec::new();

    if repository.fetch {
        if let Err(e) = repo.fetch_from_remote(&repository.remote) {
            warnings.push(BoundaryWarning::FetchFailed {
                remote: repository.remote.clone(),
                reason: e.to_string(),
            });
        }
    }

    let records = repo.merge_records(&repository.trunk)?;
    let (index, index_warnings) = CommitDateIndex::from_records(&records);
    warnings.extend(index_warnings);

    let prefix = repository.release_branch_prefix();
    let branches = repo.list_remote_branches(&prefix)?;
    log::info!("Found {} branches below {}", branches.len(), prefix);

    let (catalog, catalog_warnings) = ReleaseCatalog::from_branches(&branches);
    warnings.extend(catalog_warnings);

    let extractor = ReleaseWindowExtractor::new(IssuePattern::new(config.issue_prefix())?);
    let (reports, window_warnings) = extractor.extract(repo, &catalog, &index)?;
    warnings.extend(window_warnings);

    Ok(Correlation { reports, warnings })
}

/// Warnings for issue ids absent from the tracker response, once per release and id
pub fn unknown_issue_warnings(reports: &[ReleaseReport], issues: &IssueMap) -> Vec<BoundaryWarning> {
    let mut warnings = Vec::new();

    for report in reports {
        let mut seen: Vec<&str> = Vec::new();
        for id in &report.issue_ids {
            if issues.contains_key(id) || seen.contains(&id.as_str()) {
                continue;
            }
            seen.push(id);
            warnings.push(BoundaryWarning::UnknownIssue {
                issue: id.clone(),
                release: report.release.clone(),
            });
        }
    }

    warnings
}

/// Build the renderer described by the report settings
pub fn build_renderer(report: &ReportConfig) -> Result<ReportRenderer> {
    match &report.template {
        Some(path) => ReportRenderer::from_template_file(report.format, path),
        None => ReportRenderer::new(report.format),
    }
}

/// Main report workflow
///
/// # Arguments
///
/// * `repo` - Git queries
/// * `tracker` - Issue tracker queried exactly once
/// * `config` - Resolved configuration (file plus CLI overrides)
///
/// # Returns
///
/// The reports, the issue map, all warnings and the rendered document
pub fn run_report_workflow<R: Repository, T: IssueTracker + ?Sized>(
    repo: &R,
    tracker: &T,
    config: &Config,
) -> Result<WorkflowResult> {
    let host = config.tracker.require_host()?.to_string();
    let renderer = build_renderer(&config.report)?;

    let Correlation {
        reports,
        mut warnings,
    } = correlate_releases(repo, config)?;

    let issues = fetch_issue_map(
        tracker,
        &config.tracker.search_query(),
        &config.tracker.scheme,
        &host,
    )?;
    warnings.extend(unknown_issue_warnings(&reports, &issues));

    let rendered = renderer.render(&config.report.title, &reports, &issues)?;

    Ok(WorkflowResult {
        reports,
        issues,
        warnings,
        rendered,
    })
}
