use std::fmt;

/// Data-quality problems found while correlating releases and issues.
/// These are non-fatal and degrade report completeness; they are reported
/// to the user instead of aborting the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Merge-commit line that is not `<date> <hash> <parent1> <parent2>`
    MalformedMergeLine { line: String, reason: String },
    /// Merge commit with a parent count other than two
    NonBinaryMerge { hash: String, parents: usize },
    /// Release branch whose name carries no `<major>.<minor>` version
    UnversionedBranch { branch: String },
    /// Release whose tip is not a parent of any recorded merge
    MissingReleaseDate {
        release: String,
        commit_hash: String,
    },
    /// Issue identifier without metadata in the tracker response
    UnknownIssue { issue: String, release: String },
    /// Fetch from the remote failed, local refs were used
    FetchFailed { remote: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::MalformedMergeLine { line, reason } => {
                write!(f, "Skipping merge-commit line '{}': {}", line, reason)
            }
            BoundaryWarning::NonBinaryMerge { hash, parents } => {
                write!(
                    f,
                    "Skipping merge commit {} with {} parents",
                    short_hash(hash),
                    parents
                )
            }
            BoundaryWarning::UnversionedBranch { branch } => {
                write!(f, "Skipping branch '{}': no version in name", branch)
            }
            BoundaryWarning::MissingReleaseDate {
                release,
                commit_hash,
            } => {
                write!(
                    f,
                    "No release date for '{}' (tip {} is not a merge parent)",
                    release,
                    short_hash(commit_hash)
                )
            }
            BoundaryWarning::UnknownIssue { issue, release } => {
                write!(
                    f,
                    "Issue {} in release '{}' was not returned by the tracker",
                    issue, release
                )
            }
            BoundaryWarning::FetchFailed { remote, reason } => {
                write!(
                    f,
                    "Could not fetch from remote '{}': {}. Using local refs",
                    remote, reason
                )
            }
        }
    }
}

fn short_hash(hash: &str) -> &str {
    hash.get(..7).unwrap_or(hash)
}
