//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git queries the
//! release-notes pipeline needs, allowing for a real libgit2-backed
//! implementation and a mock implementation for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! # Usage
//!
//! Pipeline code depends on the [Repository] trait rather than concrete
//! implementations.
//!
//! ```rust
//! # use git_release_notes::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let branches = repo.list_remote_branches("origin/release/")?;
//! for branch in &branches {
//!     println!("{} -> {}", branch, repo.resolve_ref(branch)?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::CommitRecord;
use crate::error::Result;

/// Read-only git queries used to build release notes
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. A failing query is an
/// infrastructure failure and aborts report generation; implementations map
/// underlying errors (like `git2::Error`) to
/// [crate::error::ReleaseNotesError] variants.
pub trait Repository {
    /// Merge commits reachable from `refname`, newest first
    ///
    /// Only commits with more than one parent are returned. Callers decide
    /// which parent arities they accept.
    ///
    /// # Arguments
    /// * `refname` - A ref such as "origin/master"
    fn merge_records(&self, refname: &str) -> Result<Vec<CommitRecord>>;

    /// Remote-tracking branch names starting with `prefix`
    ///
    /// Branches whose tip does not resolve to a commit are left out.
    ///
    /// # Arguments
    /// * `prefix` - Short-name prefix, e.g. "origin/release/"
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Branch short names, e.g. "origin/release/2.3.x"
    fn list_remote_branches(&self, prefix: &str) -> Result<Vec<String>>;

    /// Resolve a ref to the full hash of the commit it points to
    fn resolve_ref(&self, refname: &str) -> Result<String>;

    /// Subjects of merge commits in `from...to`, newest first
    ///
    /// The range is the symmetric difference: commits reachable from either
    /// ref but not from both.
    ///
    /// # Example
    /// ```rust
    /// # use git_release_notes::git::Repository;
    /// # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
    /// let subjects = repo.merge_subjects_between("origin/release/1.0.x", "origin/release/2.0.x")?;
    /// for subject in subjects {
    ///     println!("{}", subject);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    fn merge_subjects_between(&self, from: &str, to: &str) -> Result<Vec<String>>;

    /// Fetch all branches of `remote` into its remote-tracking refs
    fn fetch_from_remote(&self, remote: &str) -> Result<()>;
}
