//! Pure formatting functions for UI output.
//!
//! Everything here writes to stderr: stdout is reserved for the rendered
//! report so it can be redirected to a file.

use console::style;

use crate::analyzer::ReleaseReport;
use crate::boundary::BoundaryWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().for_stderr(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green().for_stderr(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow().for_stderr(), message);
}

/// Display a boundary warning to the user.
///
/// Shows a yellow warning icon followed by the warning message.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow().for_stderr(), warning);
}

/// Display every warning, in the order they were raised.
pub fn display_boundary_warnings(warnings: &[BoundaryWarning]) {
    for warning in warnings {
        display_boundary_warning(warning);
    }
}

/// One line per release: name, date and issue count.
pub fn format_release_summary(report: &ReleaseReport) -> String {
    let date = report
        .date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "unreleased".to_string());

    format!(
        "{} ({}): {} issue{}",
        report.release,
        date,
        report.issue_ids.len(),
        if report.issue_ids.len() == 1 { "" } else { "s" }
    )
}

/// Display the per-release summary of a run.
pub fn display_release_summary(reports: &[ReleaseReport]) {
    eprintln!(
        "\n{}",
        style(format!("Found {} releases", reports.len()))
            .bold()
            .for_stderr()
    );
    for report in reports {
        eprintln!("  - {}", format_release_summary(report));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_display_functions_do_not_panic() {
        display_error("test error");
        display_success("test success");
        display_status("test status");
        display_boundary_warning(&BoundaryWarning::UnversionedBranch {
            branch: "origin/release/next".to_string(),
        });
    }

    #[test]
    fn test_format_release_summary() {
        let report = ReleaseReport {
            release: "2.0.x".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1),
            issue_ids: vec!["PCD-1".to_string()],
        };
        assert_eq!(format_release_summary(&report), "2.0.x (2024-01-01): 1 issue");

        let undated = ReleaseReport {
            release: "1.0.x".to_string(),
            date: None,
            issue_ids: vec![],
        };
        assert_eq!(format_release_summary(&undated), "1.0.x (unreleased): 0 issues");
    }
}
