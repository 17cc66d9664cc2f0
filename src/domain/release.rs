use crate::error::{ReleaseNotesError, Result};
use regex::Regex;
use semver::Version;
use std::sync::OnceLock;

const VERSION_PATTERN: &str = r"(\d+)\.(\d+)";

static VERSION_REGEX: OnceLock<Regex> = OnceLock::new();

/// The `<major>.<minor>` matcher, compiled on first use
fn version_regex() -> Result<&'static Regex> {
    if let Some(re) = VERSION_REGEX.get() {
        return Ok(re);
    }

    let re = Regex::new(VERSION_PATTERN)
        .map_err(|e| ReleaseNotesError::version(format!("Invalid version pattern: {}", e)))?;
    Ok(VERSION_REGEX.get_or_init(|| re))
}

/// A release branch together with the version it encodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRef {
    pub branch_name: String,
    pub version_key: Version,
}

impl ReleaseRef {
    /// Derive a release from a branch name such as `origin/release/2.3.x`.
    ///
    /// The first `<major>.<minor>` pair in the name becomes `<major>.<minor>.0`.
    pub fn from_branch(branch_name: impl Into<String>) -> Result<Self> {
        let branch_name = branch_name.into();
        let version_key = version_key_from_branch(&branch_name)?;

        Ok(ReleaseRef {
            branch_name,
            version_key,
        })
    }

    /// Last path segment of the branch name (`origin/release/2.3.x` -> `2.3.x`)
    pub fn short_name(&self) -> &str {
        self.branch_name
            .rsplit('/')
            .next()
            .unwrap_or(&self.branch_name)
    }
}

/// Extract the version key encoded in a release branch name
pub fn version_key_from_branch(branch_name: &str) -> Result<Version> {
    let captures = version_regex()?.captures(branch_name).ok_or_else(|| {
        ReleaseNotesError::version(format!(
            "No <major>.<minor> version found in branch '{}'",
            branch_name
        ))
    })?;

    let major = captures[1].parse::<u64>().map_err(|_| {
        ReleaseNotesError::version(format!("Invalid major version: {}", &captures[1]))
    })?;
    let minor = captures[2].parse::<u64>().map_err(|_| {
        ReleaseNotesError::version(format!("Invalid minor version: {}", &captures[2]))
    })?;

    Ok(Version::new(major, minor, 0))
}
