//! Report rendering through handlebars templates
//!
//! Rendering is plain substitution: the correlated reports and the issue map
//! are joined into a view model, and the template only iterates over it.
//! Missing dates and issues without tracker metadata render as placeholders.

use crate::analyzer::ReleaseReport;
use crate::domain::commit::SHORT_DATE_FORMAT;
use crate::error::Result;
use crate::tracker::IssueMap;
use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

const HTML_TEMPLATE: &str = include_str!("templates/release-notes.html.hbs");
const TEXT_TEMPLATE: &str = include_str!("templates/release-notes.txt.hbs");
const TEMPLATE_NAME: &str = "release-notes";

/// Output format of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Html,
    Text,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Html => write!(f, "html"),
            ReportFormat::Text => write!(f, "text"),
        }
    }
}

impl ReportFormat {
    fn builtin_template(&self) -> &'static str {
        match self {
            ReportFormat::Html => HTML_TEMPLATE,
            ReportFormat::Text => TEXT_TEMPLATE,
        }
    }
}

#[derive(Debug, Serialize)]
struct IssueView<'a> {
    id: &'a str,
    url: Option<&'a str>,
    summary: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ReleaseView<'a> {
    release: &'a str,
    date: Option<String>,
    issues: Vec<IssueView<'a>>,
}

#[derive(Debug, Serialize)]
struct ReportView<'a> {
    title: &'a str,
    releases: Vec<ReleaseView<'a>>,
}

fn build_view<'a>(title: &'a str, reports: &'a [ReleaseReport], issues: &'a IssueMap) -> ReportView<'a> {
    let releases = reports
        .iter()
        .map(|report| ReleaseView {
            release: &report.release,
            date: report
                .date
                .map(|date| date.format(SHORT_DATE_FORMAT).to_string()),
            issues: report
                .issue_ids
                .iter()
                .map(|id| {
                    let metadata = issues.get(id);
                    IssueView {
                        id,
                        url: metadata.map(|m| m.url.as_str()),
                        summary: metadata
                            .map(|m| m.summary.as_str())
                            .filter(|s| !s.is_empty()),
                    }
                })
                .collect(),
        })
        .collect();

    ReportView { title, releases }
}

/// Renders release reports with a built-in or user-supplied template
pub struct ReportRenderer {
    registry: Handlebars<'static>,
}

impl ReportRenderer {
    /// Renderer using the built-in template for `format`
    pub fn new(format: ReportFormat) -> Result<Self> {
        Self::with_template(format, format.builtin_template())
    }

    /// Renderer using a template string; HTML output is escaped, text is not
    pub fn with_template(format: ReportFormat, template: &str) -> Result<Self> {
        let mut registry = Handlebars::new();
        if format == ReportFormat::Text {
            registry.register_escape_fn(handlebars::no_escape);
        }
        registry.register_template_string(TEMPLATE_NAME, template)?;

        Ok(ReportRenderer { registry })
    }

    /// Renderer using a template read from `path`
    pub fn from_template_file<P: AsRef<Path>>(format: ReportFormat, path: P) -> Result<Self> {
        let template = fs::read_to_string(path)?;
        Self::with_template(format, &template)
    }

    pub fn render(&self, title: &str, reports: &[ReleaseReport], issues: &IssueMap) -> Result<String> {
        let view = build_view(title, reports, issues);
        Ok(self.registry.render(TEMPLATE_NAME, &view)?)
    }
}
