use thiserror::Error;

/// Unified error type for release-notes generation
#[derive(Error, Debug)]
pub enum ReleaseNotesError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Git lookup failed: {0}")]
    GitLookup(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Issue tracker error: {0}")]
    Tracker(String),

    #[error("Issue tracker authentication failed: {0}")]
    TrackerAuth(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-release-notes
pub type Result<T> = std::result::Result<T, ReleaseNotesError>;

impl ReleaseNotesError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseNotesError::Config(msg.into())
    }

    /// Create a git lookup error naming the ref or remote involved
    pub fn git_lookup(msg: impl Into<String>) -> Self {
        ReleaseNotesError::GitLookup(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseNotesError::Version(msg.into())
    }

    /// Create a parse error for malformed git data
    pub fn parse(msg: impl Into<String>) -> Self {
        ReleaseNotesError::Parse(msg.into())
    }

    /// Create a tracker error with context
    pub fn tracker(msg: impl Into<String>) -> Self {
        ReleaseNotesError::Tracker(msg.into())
    }

    /// Create a tracker authentication error with context
    pub fn tracker_auth(msg: impl Into<String>) -> Self {
        ReleaseNotesError::TrackerAuth(msg.into())
    }

    /// Whether this error originates from an external collaborator (git, tracker, network)
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            ReleaseNotesError::Git(_)
                | ReleaseNotesError::GitLookup(_)
                | ReleaseNotesError::Tracker(_)
                | ReleaseNotesError::TrackerAuth(_)
                | ReleaseNotesError::Http(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseNotesError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseNotesError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_from_git2() {
        let err: ReleaseNotesError = git2::Error::from_str("reference not found").into();
        assert!(err.to_string().starts_with("Git operation failed"));
        assert!(err.is_external());
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseNotesError::config("x"), "Configuration error"),
            (ReleaseNotesError::version("x"), "Version parsing error"),
            (ReleaseNotesError::parse("x"), "Parse error"),
            (ReleaseNotesError::git_lookup("x"), "Git lookup failed"),
            (ReleaseNotesError::tracker("x"), "Issue tracker error"),
            (
                ReleaseNotesError::tracker_auth("x"),
                "Issue tracker authentication failed",
            ),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_data_errors_are_not_external() {
        assert!(!ReleaseNotesError::version("no version").is_external());
        assert!(!ReleaseNotesError::config("bad").is_external());
        assert!(!ReleaseNotesError::parse("bad line").is_external());
        assert!(ReleaseNotesError::tracker_auth("401").is_external());
        assert!(ReleaseNotesError::git_lookup("origin/master").is_external());
    }
}
