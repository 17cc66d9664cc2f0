use crate::error::{ReleaseNotesError, Result};
use crate::render::ReportFormat;
use crate::tracker::SearchQuery;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "release-notes.toml";

/// Represents the complete configuration for git-release-notes.
///
/// Contains repository layout, issue tracker access, and report output settings.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub tracker: TrackerConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

fn default_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_trunk() -> String {
    "origin/master".to_string()
}

fn default_release_prefix() -> String {
    "release/".to_string()
}

/// Where the release branches and the trunk live.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RepositoryConfig {
    #[serde(default = "default_path")]
    pub path: PathBuf,

    #[serde(default = "default_remote")]
    pub remote: String,

    /// Ref whose merge commits date the releases
    #[serde(default = "default_trunk")]
    pub trunk: String,

    /// Branch prefix below the remote, e.g. `release/` for `origin/release/2.3.x`
    #[serde(default = "default_release_prefix")]
    pub release_prefix: String,

    #[serde(default)]
    pub fetch: bool,
}

impl RepositoryConfig {
    /// Short-name prefix of remote release branches (`origin/release/`)
    pub fn release_branch_prefix(&self) -> String {
        format!("{}/{}", self.remote, self.release_prefix)
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            path: default_path(),
            remote: default_remote(),
            trunk: default_trunk(),
            release_prefix: default_release_prefix(),
            fetch: false,
        }
    }
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_project() -> String {
    "PCD".to_string()
}

fn default_max_results() -> u32 {
    10000
}

fn default_fields() -> Vec<String> {
    vec!["summary".to_string()]
}

fn default_user_env() -> String {
    "JIRA_USER".to_string()
}

fn default_password_env() -> String {
    "JIRA_PASSWORD".to_string()
}

/// Issue tracker access.
///
/// Credentials are never stored here, only the names of the environment
/// variables holding them.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TrackerConfig {
    #[serde(default)]
    pub host: Option<String>,

    #[serde(default = "default_scheme")]
    pub scheme: String,

    #[serde(default = "default_project")]
    pub project: String,

    /// Replaces the default `project="<project>"` query
    #[serde(default)]
    pub jql: Option<String>,

    #[serde(default = "default_max_results")]
    pub max_results: u32,

    #[serde(default = "default_fields")]
    pub fields: Vec<String>,

    #[serde(default = "default_user_env")]
    pub user_env: String,

    #[serde(default = "default_password_env")]
    pub password_env: String,
}

impl TrackerConfig {
    /// The configured host, or an error naming the missing setting
    pub fn require_host(&self) -> Result<&str> {
        self.host
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| {
                ReleaseNotesError::config("tracker.host is not set (use --host or the config file)")
            })
    }

    /// The single search issued against the tracker
    pub fn search_query(&self) -> SearchQuery {
        let mut query = SearchQuery::for_project(&self.project, self.max_results, self.fields.clone());
        if let Some(jql) = &self.jql {
            query.jql = jql.clone();
        }
        query
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            host: None,
            scheme: default_scheme(),
            project: default_project(),
            jql: None,
            max_results: default_max_results(),
            fields: default_fields(),
            user_env: default_user_env(),
            password_env: default_password_env(),
        }
    }
}

fn default_title() -> String {
    "Release Notes".to_string()
}

/// Report output settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: ReportFormat,

    #[serde(default = "default_title")]
    pub title: String,

    /// Handlebars template replacing the built-in one
    #[serde(default)]
    pub template: Option<PathBuf>,

    /// Prefix of issue ids in merge subjects; defaults to the tracker project
    #[serde(default)]
    pub issue_prefix: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            format: ReportFormat::default(),
            title: default_title(),
            template: None,
            issue_prefix: None,
        }
    }
}

impl Config {
    /// Prefix used to recognise issue ids in merge subjects
    pub fn issue_prefix(&self) -> &str {
        self.report
            .issue_prefix
            .as_deref()
            .unwrap_or(&self.tracker.project)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release-notes.toml` in current directory
/// 3. `.release-notes.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        PathBuf::from(path)
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        PathBuf::from(CONFIG_FILE_NAME)
    } else if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if !path.exists() {
            return Ok(Config::default());
        }
        path
    } else {
        return Ok(Config::default());
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        ReleaseNotesError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    parse_config(&config_str)
        .map_err(|e| ReleaseNotesError::config(format!("{}: {}", path.display(), e)))
}

/// Parse configuration from TOML text
pub fn parse_config(config_str: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(config_str)
}
